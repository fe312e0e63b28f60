use leptos::prelude::*;

pub mod api;
pub mod components;
pub mod pages;
pub mod state;

use components::nav_bar::AppTab;
use wasm_bindgen::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    state::provide_app_state();

    let (current_tab, set_current_tab) = signal(AppTab::Pipeline);
    let (show_new_deal, set_show_new_deal) = signal(false);

    let on_new_deal = Callback::new(move |_| {
        set_current_tab.set(AppTab::Pipeline);
        set_show_new_deal.set(true);
    });

    view! {
        <components::nav_bar::NavBar
            current_tab=current_tab
            set_current_tab=set_current_tab
            on_new_deal=on_new_deal
        />
        <div class="content">
            {move || match current_tab.get() {
                AppTab::Pipeline => view! {
                    <pages::pipeline::PipelinePage
                        show_new_deal=show_new_deal
                        set_show_new_deal=set_show_new_deal
                    />
                }.into_any(),
                AppTab::Sellers => view! { <pages::sellers::SellersPage /> }.into_any(),
            }}
        </div>
        <components::toast::ToastHost />
    }
}

#[wasm_bindgen(start)]
pub fn mount() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(App);
}
