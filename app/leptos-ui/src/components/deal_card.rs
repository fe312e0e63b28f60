use chrono::Utc;
use dr_core::format::{format_close_date, format_deal_value, format_updated};
use dr_core::types::Deal;
use leptos::prelude::*;
use web_sys::DragEvent;

use crate::state::use_app_state;

/// A draggable deal summary. Clicking opens the detail view through
/// `on_open`.
#[component]
pub fn DealCard(
    deal: Deal,
    #[prop(into)] on_open: Callback<Deal>,
) -> impl IntoView {
    let state = use_app_state();
    let set_drag = state.set_drag;
    let drag = state.drag;
    let board = state.board;
    let id = deal.id;

    let on_dragstart = move |ev: DragEvent| {
        if let Some(dt) = ev.data_transfer() {
            let _ = dt.set_data("text/plain", &id.to_string());
            dt.set_effect_allowed("move");
        }
        set_drag.update(|session| session.begin(&id));
    };

    // Fires after `drop` too; by then the session is already idle.
    let on_dragend = move |_ev: DragEvent| {
        set_drag.update(|session| session.cancel());
    };

    let card_class = move || {
        let mut class = String::from("deal-card");
        if drag.with(|session| session.is_dragging(id)) {
            class.push_str(" dragging");
        }
        if board.with(|b| b.is_in_flight(id)) {
            class.push_str(" saving");
        }
        class
    };

    let value = format_deal_value(&deal.estimate);
    let close = format_close_date(deal.target_close_date);
    let updated = format_updated(deal.updated_at, Utc::now());
    let priority_class = format!("priority-badge {}", deal.priority.css_class());
    let priority_label = deal.priority.to_string();
    let progress = deal.progress;
    let pic = deal.pic.as_ref().map(|p| p.name.clone());
    let parties = format!("{} \u{2192} {}", deal.buyer.name, deal.seller.name);
    let title = deal.name.clone();
    let comments = deal.comments_count;
    let attachments = deal.attachments_count;

    let on_click = move |_| on_open.run(deal.clone());

    view! {
        <div
            class=card_class
            draggable="true"
            on:dragstart=on_dragstart
            on:dragend=on_dragend
            on:click=on_click
        >
            <div class="deal-card-header">
                <span class="deal-title">{title}</span>
                <span class=priority_class>{priority_label}</span>
            </div>
            <div class="deal-parties">{parties}</div>
            <div class="deal-value">{value}</div>
            <div class="deal-progress" title=format!("{progress}%")>
                <div class="deal-progress-fill" style=format!("width: {progress}%")></div>
            </div>
            <div class="deal-card-footer">
                <span class="deal-close">{close}</span>
                {pic.map(|name| view! { <span class="deal-pic">{name}</span> })}
                <span class="deal-counts">
                    {format!("\u{1f4ac} {comments}  \u{1f4ce} {attachments}")}
                </span>
            </div>
            <div class="deal-updated">{updated}</div>
            {move || board.with(|b| b.is_in_flight(id)).then(|| view! {
                <div class="deal-saving">"Saving\u{2026}"</div>
            })}
        </div>
    }
}
