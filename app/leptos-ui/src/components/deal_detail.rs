use dr_core::format::{format_close_date, format_deal_value, PLACEHOLDER};
use dr_core::types::Deal;
use leptos::prelude::*;

use crate::state::use_app_state;

fn row(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div class="detail-row">
            <span class="detail-label">{label}</span>
            <span class="detail-value">{value}</span>
        </div>
    }
}

/// Read-only side panel for a deal.
#[component]
pub fn DealDetail(
    deal: Deal,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_view_seller: Callback<i64>,
) -> impl IntoView {
    let state = use_app_state();
    let stage_label = state.board.with_untracked(|b| {
        b.stage(&deal.stage)
            .map(|s| s.label.clone())
            .unwrap_or_else(|| deal.stage.to_string())
    });
    let seller_id = deal.seller.id;
    let or_dash = |s: &str| {
        if s.trim().is_empty() {
            PLACEHOLDER.to_string()
        } else {
            s.to_string()
        }
    };

    view! {
        <aside class="detail-panel deal-detail">
            <header class="detail-header">
                <h2>{deal.name.clone()}</h2>
                <button class="detail-close" aria-label="Close" on:click=move |_| on_close.run(())>
                    "\u{00d7}"
                </button>
            </header>
            {row("Stage", stage_label)}
            {row("Buyer", or_dash(&deal.buyer.name))}
            {row("Seller", or_dash(&deal.seller.name))}
            {row("Industry", or_dash(&deal.industry))}
            {row("Estimated EV", format_deal_value(&deal.estimate))}
            {row("Priority", deal.priority.to_string())}
            {row("PIC", deal.pic.as_ref().map(|p| p.name.clone()).unwrap_or_else(|| PLACEHOLDER.to_string()))}
            {row("Target close", format_close_date(deal.target_close_date))}
            {row("Progress", format!("{}%", deal.progress))}
            {row("Comments", deal.comments_count.to_string())}
            {row("Attachments", deal.attachments_count.to_string())}
            {(seller_id > 0).then(|| view! {
                <button class="btn btn-secondary" on:click=move |_| on_view_seller.run(seller_id)>
                    "View seller profile"
                </button>
            })}
        </aside>
    }
}
