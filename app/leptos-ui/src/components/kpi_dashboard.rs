use dr_core::format::kpi_cards;
use leptos::prelude::*;

use crate::components::kpi_card::KpiCard;
use crate::state::use_app_state;

/// The five pipeline metrics. Each card shows a dash until the snapshot
/// arrives.
#[component]
pub fn KpiDashboard() -> impl IntoView {
    let state = use_app_state();
    let kpis = state.kpis;
    let loading = state.kpis_loading;

    view! {
        <section class="kpi-dashboard">
            {move || {
                let is_loading = loading.get();
                kpis.with(|snapshot| kpi_cards(snapshot.as_ref(), is_loading))
                    .into_iter()
                    .map(|card| view! {
                        <KpiCard
                            label=card.label
                            value=card.value
                            hint=card.hint
                            loading=is_loading
                        />
                    })
                    .collect_view()
            }}
        </section>
    }
}
