use leptos::prelude::*;

use crate::state::use_app_state;

/// Stack of active toasts in the bottom-right corner.
#[component]
pub fn ToastHost() -> impl IntoView {
    let state = use_app_state();
    let toasts = state.toasts;

    view! {
        <div class="toast-host" role="status" aria-live="polite">
            {move || toasts.get().into_iter().map(|toast| {
                let id = toast.id;
                view! {
                    <div class=format!("toast {}", toast.level.css_class())>
                        <div class="toast-body">
                            <strong class="toast-title">{toast.title}</strong>
                            <span class="toast-message">{toast.message}</span>
                        </div>
                        <button
                            class="toast-close"
                            aria-label="Dismiss"
                            on:click=move |_| state.dismiss_toast(id)
                        >
                            "\u{00d7}"
                        </button>
                    </div>
                }
            }).collect_view()}
        </div>
    }
}
