use dr_core::navigation::WizardNav;
use dr_core::types::PickerOption;
use leptos::prelude::*;

use crate::api;
use crate::components::seller_detail::SellerDetail;
use crate::components::seller_wizard::SellerWizard;
use crate::state::use_app_state;

/// Seller directory plus the onboarding wizard.
#[component]
pub fn SellersPage() -> impl IntoView {
    let state = use_app_state();
    let (sellers, set_sellers) = signal(Vec::<PickerOption>::new());
    let (viewing, set_viewing) = signal(None::<i64>);
    // Resume the wizard when a seller id survived a reload.
    let (onboarding, set_onboarding) = signal(state.nav.get_untracked().seller_id().is_some());

    let load_sellers = move || {
        leptos::task::spawn_local(async move {
            match api::fetch_sellers().await {
                Ok(list) => set_sellers.set(list),
                Err(e) => {
                    leptos::logging::log!("Failed to fetch sellers: {}", e);
                    state.error_toast("Could not load sellers", e);
                }
            }
        });
    };
    load_sellers();

    // Setting the flag again remounts the wizard so it loads this seller.
    let edit_seller = move |seller_id: i64| {
        state.update_nav(|n, store| {
            *n = WizardNav::for_seller(seller_id);
            n.set_seller_id(seller_id, store);
        });
        set_viewing.set(None);
        set_onboarding.set(true);
    };

    let on_done = Callback::new(move |seller_id: i64| {
        state.success_toast("Seller profile submitted", format!("Seller #{seller_id}"));
        state.update_nav(|n, store| n.reset(store));
        set_onboarding.set(false);
        set_viewing.set(Some(seller_id));
        load_sellers();
    });

    view! {
        <div class="page sellers-page">
            <header class="page-header">
                <h1>"Sellers"</h1>
                <div class="page-actions">
                    <button
                        class="btn btn-primary"
                        on:click=move |_| set_onboarding.update(|open| *open = !*open)
                    >
                        {move || if onboarding.get() { "Close onboarding" } else { "+ Onboard seller" }}
                    </button>
                </div>
            </header>

            {move || onboarding.get().then(|| view! { <SellerWizard on_done=on_done /> })}

            <ul class="seller-list">
                {move || sellers.get().into_iter().map(|s| {
                    let id = s.id;
                    view! {
                        <li class="seller-row" on:click=move |_| set_viewing.set(Some(id))>
                            <span class="seller-name">{s.label}</span>
                            <span class="seller-id">{format!("#{id}")}</span>
                            <button
                                class="btn btn-secondary"
                                on:click=move |ev| {
                                    ev.stop_propagation();
                                    edit_seller(id);
                                }
                            >
                                "Edit"
                            </button>
                        </li>
                    }
                }).collect_view()}
            </ul>

            {move || viewing.get().map(|id| view! {
                <SellerDetail seller_id=id on_close=Callback::new(move |_| set_viewing.set(None)) />
            })}
        </div>
    }
}
