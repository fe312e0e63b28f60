use dr_core::pipeline::DropIntent;
use dr_core::types::{Deal, Stage};
use leptos::prelude::*;
use web_sys::DragEvent;

use crate::components::deal_card::DealCard;
use crate::state::use_app_state;

/// One board column. Dropping a card here hands a `DropIntent` to
/// `on_drop`; the page decides whether it becomes a move.
#[component]
pub fn StageColumn(
    stage: Stage,
    deals: Vec<Deal>,
    #[prop(into)] on_open: Callback<Deal>,
    #[prop(into)] on_drop: Callback<DropIntent>,
) -> impl IntoView {
    let state = use_app_state();
    let drag = state.drag;
    let set_drag = state.set_drag;

    let code_over = stage.code.clone();
    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        if !drag.with_untracked(|s| s.is_over(&code_over)) {
            set_drag.update(|s| s.hover(&code_over));
        }
    };

    let code_leave = stage.code.clone();
    let on_dragleave = move |_ev: DragEvent| {
        set_drag.update(|s| s.leave(&code_leave));
    };

    let code_drop = stage.code.clone();
    let on_drop_ev = move |ev: DragEvent| {
        ev.prevent_default();
        let intent = set_drag.try_update(|s| s.drop_on(&code_drop)).flatten();
        if let Some(intent) = intent {
            on_drop.run(intent);
        }
    };

    let code_class = stage.code.clone();
    let col_class = move || {
        if drag.with(|s| s.is_over(&code_class)) {
            "stage-column drop-target is-over"
        } else {
            "stage-column drop-target"
        }
    };

    let count = deals.len();
    let is_empty = deals.is_empty();
    let cards = deals
        .into_iter()
        .map(|deal| view! { <DealCard deal=deal on_open=on_open /> })
        .collect_view();

    view! {
        <div
            class=col_class
            data-stage=stage.code.to_string()
            on:dragover=on_dragover
            on:dragleave=on_dragleave
            on:drop=on_drop_ev
        >
            <h3 class="stage-column-header">
                <span class="stage-label">{stage.label.clone()}</span>
                <span class="stage-count">{count}</span>
            </h3>
            <div class="stage-column-body">
                {cards}
                {is_empty.then(|| view! {
                    <div class="stage-empty">"No deals in this stage"</div>
                })}
            </div>
        </div>
    }
}
