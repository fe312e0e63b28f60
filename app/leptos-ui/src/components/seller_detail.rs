use dr_core::format::{format_deal_value, seller_summary, PLACEHOLDER};
use dr_core::types::{Money, SellerProfile};
use leptos::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::api;
use crate::state::use_app_state;

fn field(label: &'static str, value: Option<String>) -> impl IntoView {
    let value = value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| PLACEHOLDER.to_string());
    view! {
        <div class="detail-row">
            <span class="detail-label">{label}</span>
            <span class="detail-value">{value}</span>
        </div>
    }
}

async fn copy_to_clipboard(text: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("no global window")?;
    let promise = window.navigator().clipboard().write_text(text);
    JsFuture::from(promise)
        .await
        .map(|_| ())
        .map_err(|e| format!("{:?}", e))
}

fn overview_section(profile: &SellerProfile) -> impl IntoView {
    let o = &profile.company_overview;
    let contacts = o
        .contacts
        .iter()
        .map(|c| {
            let line = [Some(c.name.clone()), c.title.clone(), c.email.clone(), c.phone.clone()]
                .into_iter()
                .flatten()
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(" \u{00b7} ");
            view! { <li>{line}</li> }
        })
        .collect_view();
    let shareholders = o
        .shareholders
        .iter()
        .map(|s| {
            let line = match &s.percentage {
                Some(p) => format!("{} ({p}%)", s.name),
                None => s.name.clone(),
            };
            view! { <li>{line}</li> }
        })
        .collect_view();

    view! {
        <section class="detail-section">
            <h3>"Company Overview"</h3>
            {field("Registered name", Some(o.registered_name.clone()))}
            {field("Industry", o.industry.clone())}
            {field("Country", o.country.clone())}
            {field("Rank", o.rank.clone())}
            {field("Website", o.website.clone())}
            {field("Founded", o.year_founded.map(|y| y.to_string()))}
            {field("Employees", o.employee_count.map(|c| c.to_string()))}
            {field("Description", o.description.clone())}
            <h4>"Contacts"</h4>
            <ul class="detail-list">{contacts}</ul>
            <h4>"Shareholders"</h4>
            <ul class="detail-list">{shareholders}</ul>
        </section>
    }
}

fn financial_section(profile: &SellerProfile) -> impl IntoView {
    let body = match &profile.financial_details {
        None => view! { <p class="detail-empty">"Not submitted yet."</p> }.into_any(),
        Some(fin) => {
            let currency = fin.currency.clone().unwrap_or_default();
            let amount = |value: Option<f64>| {
                value.map(|v| {
                    format_deal_value(&Money {
                        value: Some(v),
                        currency: currency.clone(),
                    })
                })
            };
            view! {
                <div>
                    {field("Currency", fin.currency.clone())}
                    {field("Annual revenue", amount(fin.annual_revenue))}
                    {field("EBITDA", amount(fin.ebitda))}
                    {field("Net profit", amount(fin.net_profit))}
                    {field("Total assets", amount(fin.total_assets))}
                    {field("Total liabilities", amount(fin.total_liabilities))}
                    {field("Asking price", amount(fin.asking_price))}
                </div>
            }
            .into_any()
        }
    };
    view! {
        <section class="detail-section">
            <h3>"Financial Details"</h3>
            {body}
        </section>
    }
}

fn teaser_section(profile: &SellerProfile) -> impl IntoView {
    let body = match &profile.teaser_center {
        None => view! { <p class="detail-empty">"Not submitted yet."</p> }.into_any(),
        Some(t) => {
            let highlights = t
                .highlights
                .iter()
                .map(|h| view! { <li>{h.clone()}</li> })
                .collect_view();
            view! {
                <div>
                    {field("Headline", t.headline.clone())}
                    <ul class="detail-list">{highlights}</ul>
                    {field("Investment thesis", t.investment_thesis.clone())}
                    {field("Visibility", Some(if t.is_public { "Public" } else { "Private" }.to_string()))}
                </div>
            }
            .into_any()
        }
    };
    view! {
        <section class="detail-section">
            <h3>"Teaser Center"</h3>
            {body}
        </section>
    }
}

/// Seller profile loaded from `GET /api/seller/{id}`, with a "copy summary"
/// action.
#[component]
pub fn SellerDetail(seller_id: i64, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let state = use_app_state();
    let (profile, set_profile) = signal(None::<SellerProfile>);
    let (load_error, set_load_error) = signal(None::<String>);

    leptos::task::spawn_local(async move {
        match api::fetch_seller(seller_id).await {
            Ok(p) => set_profile.set(Some(p)),
            Err(e) => {
                leptos::logging::log!("Failed to fetch seller {}: {}", seller_id, e);
                set_load_error.set(Some(e.clone()));
                state.error_toast("Could not load seller", e);
            }
        }
    });

    let on_copy = move |_| {
        let Some(text) = profile.with_untracked(|p| p.as_ref().map(seller_summary)) else {
            return;
        };
        leptos::task::spawn_local(async move {
            match copy_to_clipboard(&text).await {
                Ok(()) => state.success_toast("Copied", "Seller summary copied to clipboard"),
                Err(e) => state.error_toast("Copy failed", e),
            }
        });
    };

    view! {
        <aside class="detail-panel seller-detail">
            <header class="detail-header">
                <h2>
                    {move || profile.with(|p| {
                        p.as_ref()
                            .map(SellerProfile::display_name)
                            .unwrap_or_else(|| format!("Seller #{seller_id}"))
                    })}
                </h2>
                <button
                    class="btn btn-secondary"
                    disabled=move || profile.with(Option::is_none)
                    on:click=on_copy
                >
                    "Copy summary"
                </button>
                <button class="detail-close" aria-label="Close" on:click=move |_| on_close.run(())>
                    "\u{00d7}"
                </button>
            </header>
            {move || match (profile.get(), load_error.get()) {
                (Some(p), _) => view! {
                    <div>
                        {overview_section(&p)}
                        {financial_section(&p)}
                        {teaser_section(&p)}
                    </div>
                }.into_any(),
                (None, Some(e)) => view! { <p class="detail-error">{e}</p> }.into_any(),
                (None, None) => view! { <p class="detail-loading">"Loading\u{2026}"</p> }.into_any(),
            }}
        </aside>
    }
}
