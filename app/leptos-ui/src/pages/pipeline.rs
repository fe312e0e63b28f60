use dr_core::pipeline::{DropIntent, MoveCommand, MoveOutcome};
use dr_core::types::{Deal, Stage};
use leptos::prelude::*;

use crate::api;
use crate::components::create_deal_modal::CreateDealModal;
use crate::components::deal_detail::DealDetail;
use crate::components::kpi_dashboard::KpiDashboard;
use crate::components::seller_detail::SellerDetail;
use crate::components::stage_column::StageColumn;
use crate::state::{use_app_state, AppState};

/// Reload stages and deals. The server copy replaces local state wholesale.
pub fn refresh_board(state: AppState) {
    state.set_board_loading.set(true);
    leptos::task::spawn_local(async move {
        let (stages, deals) = futures::join!(api::fetch_stages(), api::fetch_deals());
        match (stages, deals) {
            (Ok(stages), Ok(deals)) => state.set_board.update(|b| b.replace(stages, deals)),
            (Err(e), _) | (_, Err(e)) => {
                leptos::logging::log!("Failed to load pipeline: {}", e);
                state.error_toast("Could not load pipeline", e);
            }
        }
        state.set_board_loading.set(false);
    });
}

pub fn refresh_kpis(state: AppState) {
    state.set_kpis_loading.set(true);
    leptos::task::spawn_local(async move {
        match api::fetch_kpis().await {
            Ok(kpis) => state.set_kpis.set(Some(kpis)),
            Err(e) => {
                leptos::logging::log!("Failed to fetch KPIs: {}", e);
                state.set_kpis.set(None);
            }
        }
        state.set_kpis_loading.set(false);
    });
}

/// Persist an optimistic move. Success clears the in-flight record; failure
/// puts the deal back and raises an error toast.
fn persist_move(state: AppState, cmd: MoveCommand) {
    leptos::task::spawn_local(async move {
        match api::update_deal_stage(cmd.deal_id, &cmd.to).await {
            Ok(()) => {
                state.set_board.update(|b| {
                    b.confirm(&cmd);
                });
                refresh_kpis(state);
            }
            Err(e) => {
                let (name, from_label) = state.board.with_untracked(|b| {
                    (
                        b.deal(cmd.deal_id).map(|d| d.name.clone()).unwrap_or_else(|| cmd.deal_id.to_string()),
                        b.stage(&cmd.from).map(|s| s.label.clone()).unwrap_or_else(|| cmd.from.to_string()),
                    )
                });
                state.set_board.update(|b| {
                    b.rollback(&cmd);
                });
                leptos::logging::log!("Failed to move {} (rolled back): {}", cmd, e);
                state.error_toast("Move failed", format!("{name} stays in {from_label}: {e}"));
            }
        }
    });
}

/// Apply a drop to the board. Only a real stage change is sent to the API.
pub fn handle_drop(state: AppState, intent: DropIntent) {
    let outcome = state.set_board.try_update(|b| b.apply_drop(&intent));
    match outcome {
        Some(MoveOutcome::Moved(cmd)) => persist_move(state, cmd),
        Some(MoveOutcome::SameStage) | None => {}
        Some(MoveOutcome::UnknownDeal) | Some(MoveOutcome::UnknownStage) => {
            leptos::logging::log!("Ignored drop of deal {} on {}", intent.deal_id, intent.target);
        }
    }
}

#[component]
pub fn PipelinePage(
    show_new_deal: ReadSignal<bool>,
    set_show_new_deal: WriteSignal<bool>,
) -> impl IntoView {
    let state = use_app_state();
    let board = state.board;
    let loading = state.board_loading;
    let selected_deal = state.selected_deal;
    let set_selected_deal = state.set_selected_deal;
    let (viewing_seller, set_viewing_seller) = signal(None::<i64>);

    refresh_board(state);
    refresh_kpis(state);

    let on_open = Callback::new(move |deal: Deal| set_selected_deal.set(Some(deal)));
    let on_drop = Callback::new(move |intent: DropIntent| handle_drop(state, intent));
    let on_created = Callback::new(move |deal: Deal| {
        state.set_board.update(|b| b.upsert_deal(deal));
        refresh_kpis(state);
    });

    let columns = move || {
        board.with(|b| {
            b.columns()
                .into_iter()
                .map(|c| (c.stage.clone(), c.deals.into_iter().cloned().collect::<Vec<_>>()))
                .collect::<Vec<(Stage, Vec<Deal>)>>()
        })
    };

    let unassigned = move || {
        board.with(|b| b.unassigned().into_iter().cloned().collect::<Vec<Deal>>())
    };

    view! {
        <div class="page pipeline-page">
            <header class="page-header">
                <h1>"Deal Pipeline"</h1>
                <div class="page-actions">
                    <button
                        class="btn btn-secondary"
                        disabled=move || loading.get()
                        on:click=move |_| {
                            refresh_board(state);
                            refresh_kpis(state);
                        }
                    >
                        {move || if loading.get() { "Refreshing\u{2026}" } else { "Refresh" }}
                    </button>
                    <button class="btn btn-primary" on:click=move |_| set_show_new_deal.set(true)>
                        "+ New Deal"
                    </button>
                </div>
            </header>

            <KpiDashboard />

            <div class="pipeline-board">
                {move || columns().into_iter().map(|(stage, deals)| view! {
                    <StageColumn stage=stage deals=deals on_open=on_open on_drop=on_drop />
                }).collect_view()}
            </div>

            {move || {
                let orphans = unassigned();
                (!orphans.is_empty()).then(|| view! {
                    <section class="pipeline-unassigned">
                        <h3>{format!("Unknown stage ({})", orphans.len())}</h3>
                        <ul>
                            {orphans.into_iter().map(|d| view! {
                                <li>{format!("{} [{}]", d.name, d.stage)}</li>
                            }).collect_view()}
                        </ul>
                    </section>
                })
            }}

            {move || selected_deal.get().map(|deal| view! {
                <DealDetail
                    deal=deal
                    on_close=Callback::new(move |_| set_selected_deal.set(None))
                    on_view_seller=Callback::new(move |id| set_viewing_seller.set(Some(id)))
                />
            })}

            {move || viewing_seller.get().map(|id| view! {
                <SellerDetail seller_id=id on_close=Callback::new(move |_| set_viewing_seller.set(None)) />
            })}

            {move || show_new_deal.get().then(|| view! {
                <CreateDealModal
                    on_close=Callback::new(move |_| set_show_new_deal.set(false))
                    on_created=on_created
                />
            })}
        </div>
    }
}
