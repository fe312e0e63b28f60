use dr_core::types::{Contact, ReferenceItem, Shareholder};
use dr_core::wizard::{CompanyOverviewForm, FinancialDetailsForm, SellerTab, TeaserCenterForm};
use leptos::prelude::*;

use crate::api;
use crate::state::{use_app_state, AppState};

fn text_input(
    label: &'static str,
    value: impl Fn() -> String + Send + Sync + 'static,
    on_input: impl Fn(String) + 'static,
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label>{label}</label>
            <input
                type="text"
                prop:value=value
                on:input=move |ev| on_input(event_target_value(&ev))
            />
        </div>
    }
}

fn reference_list(id: &'static str, items: ReadSignal<Vec<ReferenceItem>>) -> impl IntoView {
    view! {
        <datalist id=id>
            {move || items.get().into_iter().map(|i| view! { <option value=i.name></option> }).collect_view()}
        </datalist>
    }
}

/// Result of a tab submission, shared by all three tabs.
fn report(state: AppState, tab: SellerTab, is_draft: bool, result: Result<(), String>) -> bool {
    match result {
        Ok(()) => {
            let title = if is_draft { "Draft saved" } else { "Saved" };
            state.success_toast(title, tab.label());
            true
        }
        Err(e) => {
            leptos::logging::log!("Failed to submit {}: {}", tab.label(), e);
            state.error_toast(format!("Could not save {}", tab.label()), e);
            false
        }
    }
}

/// Seller onboarding: company overview, financial details, teaser center.
/// Each tab posts its own section; the seller id from the first tab is kept
/// in the navigation context for the others.
#[component]
pub fn SellerWizard(#[prop(into)] on_done: Callback<i64>) -> impl IntoView {
    let state = use_app_state();
    let nav = state.nav;

    let (overview, set_overview) = signal(CompanyOverviewForm::default());
    let (financials, set_financials) = signal(FinancialDetailsForm::default());
    let (teaser, set_teaser) = signal(TeaserCenterForm::default());
    let (saving, set_saving) = signal(false);

    let (industries, set_industries) = signal(Vec::<ReferenceItem>::new());
    let (countries, set_countries) = signal(Vec::<ReferenceItem>::new());
    let (currencies, set_currencies) = signal(Vec::<ReferenceItem>::new());

    leptos::task::spawn_local(async move {
        let (i, c, cur) = futures::join!(
            api::fetch_industries(),
            api::fetch_countries(),
            api::fetch_currencies(),
        );
        match i {
            Ok(v) => set_industries.set(v),
            Err(e) => leptos::logging::log!("Failed to fetch industries: {}", e),
        }
        match c {
            Ok(v) => set_countries.set(v),
            Err(e) => leptos::logging::log!("Failed to fetch countries: {}", e),
        }
        match cur {
            Ok(v) => set_currencies.set(v),
            Err(e) => leptos::logging::log!("Failed to fetch currencies: {}", e),
        }
    });

    // Resume a seller restored from localStorage.
    if let Some(seller_id) = nav.get_untracked().seller_id() {
        leptos::task::spawn_local(async move {
            match api::fetch_seller(seller_id).await {
                Ok(profile) => {
                    set_overview.set(CompanyOverviewForm::from_profile(&profile.company_overview));
                    if let Some(fin) = &profile.financial_details {
                        set_financials.set(FinancialDetailsForm::from_profile(fin));
                    }
                    if let Some(t) = &profile.teaser_center {
                        set_teaser.set(TeaserCenterForm::from_profile(t));
                    }
                }
                Err(e) => leptos::logging::log!("Failed to resume seller {}: {}", seller_id, e),
            }
        });
    }

    let submit = move |is_draft: bool| {
        if saving.get_untracked() {
            return;
        }
        let current = nav.get_untracked();
        let tab = current.tab();
        let seller_id = current.seller_id();

        // Build the body first: validation failures never reach the network.
        let pending = match tab {
            SellerTab::CompanyOverview => overview
                .with_untracked(|f| f.to_submission(seller_id, is_draft))
                .map(Submission::Overview),
            SellerTab::FinancialDetails => financials
                .with_untracked(|f| f.to_submission(seller_id, is_draft))
                .map(Submission::Financials),
            SellerTab::TeaserCenter => teaser
                .with_untracked(|f| f.to_submission(seller_id, is_draft))
                .map(Submission::Teaser),
        };
        let pending = match pending {
            Ok(p) => p,
            Err(e) => {
                state.error_toast("Check the form", e.to_string());
                return;
            }
        };

        set_saving.set(true);
        leptos::task::spawn_local(async move {
            let result = match &pending {
                Submission::Overview(body) => api::submit_company_overview(body).await,
                Submission::Financials(body) => api::submit_financial_details(body).await,
                Submission::Teaser(body) => api::submit_teaser_center(body).await,
            };
            let ack = result.as_ref().ok().cloned();
            let ok = report(state, tab, is_draft, result.map(|_| ()));
            set_saving.set(false);
            let Some(ack) = ack.filter(|_| ok) else {
                return;
            };

            if ack.seller_id > 0 {
                state.update_nav(|n, store| n.set_seller_id(ack.seller_id, store));
            }
            if !is_draft {
                match tab.next() {
                    Some(next) => state.update_nav(|n, store| n.go_to(next, store)),
                    None => {
                        let id = state.nav.get_untracked().seller_id().unwrap_or(ack.seller_id);
                        on_done.run(id);
                    }
                }
            }
        });
    };

    let start_new = move |_| {
        state.update_nav(|n, store| n.reset(store));
        set_overview.set(CompanyOverviewForm::default());
        set_financials.set(FinancialDetailsForm::default());
        set_teaser.set(TeaserCenterForm::default());
    };

    let overview_tab = move || view! {
        <div class="wizard-step-content">
            {text_input(
                "Registered name",
                move || overview.with(|f| f.registered_name.clone()),
                move |v| set_overview.update(|f| f.registered_name = v),
            )}
            <div class="form-row">
                <div class="form-group">
                    <label>"Industry"</label>
                    <input
                        type="text"
                        list="seller-industries"
                        prop:value=move || overview.with(|f| f.industry.clone())
                        on:input=move |ev| {
                            let v = event_target_value(&ev);
                            set_overview.update(|f| f.industry = v);
                        }
                    />
                    {reference_list("seller-industries", industries)}
                </div>
                <div class="form-group">
                    <label>"Country"</label>
                    <input
                        type="text"
                        list="seller-countries"
                        prop:value=move || overview.with(|f| f.country.clone())
                        on:input=move |ev| {
                            let v = event_target_value(&ev);
                            set_overview.update(|f| f.country = v);
                        }
                    />
                    {reference_list("seller-countries", countries)}
                </div>
            </div>
            <div class="form-row">
                {text_input(
                    "Rank",
                    move || overview.with(|f| f.rank.clone()),
                    move |v| set_overview.update(|f| f.rank = v),
                )}
                {text_input(
                    "Website",
                    move || overview.with(|f| f.website.clone()),
                    move |v| set_overview.update(|f| f.website = v),
                )}
            </div>
            <div class="form-row">
                {text_input(
                    "Year founded",
                    move || overview.with(|f| f.year_founded.clone()),
                    move |v| set_overview.update(|f| f.year_founded = v),
                )}
                {text_input(
                    "Employees",
                    move || overview.with(|f| f.employee_count.clone()),
                    move |v| set_overview.update(|f| f.employee_count = v),
                )}
            </div>
            <div class="form-group">
                <label>"Description"</label>
                <textarea
                    rows="4"
                    prop:value=move || overview.with(|f| f.description.clone())
                    on:input=move |ev| {
                        let v = event_target_value(&ev);
                        set_overview.update(|f| f.description = v);
                    }
                ></textarea>
            </div>

            <h4>"Contacts"</h4>
            {move || (0..overview.with(|f| f.contacts.len())).map(|idx| {
                let contact_field = move |get: fn(&Contact) -> String, set: fn(&mut Contact, String)| {
                    (
                        move || overview.with(|f| f.contacts.get(idx).map(get).unwrap_or_default()),
                        move |v: String| set_overview.update(|f| {
                            if let Some(c) = f.contacts.get_mut(idx) {
                                set(c, v);
                            }
                        }),
                    )
                };
                let (name, set_name) = contact_field(|c| c.name.clone(), |c, v| c.name = v);
                let (title, set_title) = contact_field(
                    |c| c.title.clone().unwrap_or_default(),
                    |c, v| c.title = Some(v).filter(|s| !s.is_empty()),
                );
                let (email, set_email) = contact_field(
                    |c| c.email.clone().unwrap_or_default(),
                    |c, v| c.email = Some(v).filter(|s| !s.is_empty()),
                );
                let (phone, set_phone) = contact_field(
                    |c| c.phone.clone().unwrap_or_default(),
                    |c, v| c.phone = Some(v).filter(|s| !s.is_empty()),
                );
                view! {
                    <div class="form-row contact-row">
                        {text_input("Name", name, set_name)}
                        {text_input("Title", title, set_title)}
                        {text_input("Email", email, set_email)}
                        {text_input("Phone", phone, set_phone)}
                        <button
                            class="btn-remove"
                            aria-label="Remove contact"
                            on:click=move |_| set_overview.update(|f| {
                                if idx < f.contacts.len() {
                                    f.contacts.remove(idx);
                                }
                            })
                        >
                            "\u{00d7}"
                        </button>
                    </div>
                }
            }).collect_view()}
            <button
                class="btn btn-secondary"
                on:click=move |_| set_overview.update(|f| f.contacts.push(Contact::default()))
            >
                "+ Add contact"
            </button>

            <h4>"Shareholders"</h4>
            {move || (0..overview.with(|f| f.shareholders.len())).map(|idx| view! {
                <div class="form-row shareholder-row">
                    {text_input(
                        "Name",
                        move || overview.with(|f| f.shareholders.get(idx).map(|s| s.name.clone()).unwrap_or_default()),
                        move |v| set_overview.update(|f| {
                            if let Some(s) = f.shareholders.get_mut(idx) {
                                s.name = v;
                            }
                        }),
                    )}
                    {text_input(
                        "Share %",
                        move || overview.with(|f| {
                            f.shareholders.get(idx).and_then(|s| s.percentage.clone()).unwrap_or_default()
                        }),
                        move |v| set_overview.update(|f| {
                            if let Some(s) = f.shareholders.get_mut(idx) {
                                s.percentage = Some(v).filter(|p| !p.trim().is_empty());
                            }
                        }),
                    )}
                    <button
                        class="btn-remove"
                        aria-label="Remove shareholder"
                        on:click=move |_| set_overview.update(|f| {
                            if idx < f.shareholders.len() {
                                f.shareholders.remove(idx);
                            }
                        })
                    >
                        "\u{00d7}"
                    </button>
                </div>
            }).collect_view()}
            <button
                class="btn btn-secondary"
                on:click=move |_| set_overview.update(|f| f.shareholders.push(Shareholder {
                    name: String::new(),
                    percentage: None,
                }))
            >
                "+ Add shareholder"
            </button>
        </div>
    };

    let financials_tab = move || view! {
        <div class="wizard-step-content">
            <div class="form-group">
                <label>"Currency"</label>
                <input
                    type="text"
                    list="seller-currencies"
                    maxlength="3"
                    prop:value=move || financials.with(|f| f.currency.clone())
                    on:input=move |ev| {
                        let v = event_target_value(&ev);
                        set_financials.update(|f| f.currency = v);
                    }
                />
                <datalist id="seller-currencies">
                    {move || currencies.get().into_iter().map(|c| view! {
                        <option value=c.code>{c.name}</option>
                    }).collect_view()}
                </datalist>
            </div>
            <div class="form-row">
                {text_input(
                    "Annual revenue",
                    move || financials.with(|f| f.annual_revenue.clone()),
                    move |v| set_financials.update(|f| f.annual_revenue = v),
                )}
                {text_input(
                    "EBITDA",
                    move || financials.with(|f| f.ebitda.clone()),
                    move |v| set_financials.update(|f| f.ebitda = v),
                )}
                {text_input(
                    "Net profit",
                    move || financials.with(|f| f.net_profit.clone()),
                    move |v| set_financials.update(|f| f.net_profit = v),
                )}
            </div>
            <div class="form-row">
                {text_input(
                    "Total assets",
                    move || financials.with(|f| f.total_assets.clone()),
                    move |v| set_financials.update(|f| f.total_assets = v),
                )}
                {text_input(
                    "Total liabilities",
                    move || financials.with(|f| f.total_liabilities.clone()),
                    move |v| set_financials.update(|f| f.total_liabilities = v),
                )}
                {text_input(
                    "Asking price",
                    move || financials.with(|f| f.asking_price.clone()),
                    move |v| set_financials.update(|f| f.asking_price = v),
                )}
            </div>
        </div>
    };

    let teaser_tab = move || view! {
        <div class="wizard-step-content">
            {text_input(
                "Headline",
                move || teaser.with(|f| f.headline.clone()),
                move |v| set_teaser.update(|f| f.headline = v),
            )}
            <div class="form-group">
                <label>"Highlights (one per line)"</label>
                <textarea
                    rows="5"
                    prop:value=move || teaser.with(|f| f.highlights.clone())
                    on:input=move |ev| {
                        let v = event_target_value(&ev);
                        set_teaser.update(|f| f.highlights = v);
                    }
                ></textarea>
            </div>
            <div class="form-group">
                <label>"Investment thesis"</label>
                <textarea
                    rows="4"
                    prop:value=move || teaser.with(|f| f.investment_thesis.clone())
                    on:input=move |ev| {
                        let v = event_target_value(&ev);
                        set_teaser.update(|f| f.investment_thesis = v);
                    }
                ></textarea>
            </div>
            <label class="form-check">
                <input
                    type="checkbox"
                    prop:checked=move || teaser.with(|f| f.is_public)
                    on:change=move |ev| {
                        let checked = event_target_checked(&ev);
                        set_teaser.update(|f| f.is_public = checked);
                    }
                />
                " Visible to all buyers"
            </label>
        </div>
    };

    view! {
        <div class="seller-wizard">
            <header class="seller-wizard-header">
                <h2>"Seller Onboarding"</h2>
                <span class="seller-wizard-id">
                    {move || match nav.get().seller_id() {
                        Some(id) => format!("Seller #{id}"),
                        None => "New seller".to_string(),
                    }}
                </span>
                <button class="btn btn-secondary" on:click=start_new>"Start new seller"</button>
            </header>

            <div class="wizard-tabs" role="tablist">
                {SellerTab::ALL.into_iter().map(|tab| view! {
                    <button
                        role="tab"
                        class="wizard-tab"
                        class:active=move || nav.get().tab() == tab
                        on:click=move |_| state.update_nav(|n, store| n.go_to(tab, store))
                    >
                        {tab.label()}
                    </button>
                }).collect_view()}
            </div>

            {move || {
                let current = nav.get();
                let locked = current.tab() != SellerTab::CompanyOverview && current.seller_id().is_none();
                let body = match current.tab() {
                    SellerTab::CompanyOverview => overview_tab().into_any(),
                    SellerTab::FinancialDetails => financials_tab().into_any(),
                    SellerTab::TeaserCenter => teaser_tab().into_any(),
                };
                view! {
                    {locked.then(|| view! {
                        <p class="wizard-notice">"Save the company overview first to get a seller id."</p>
                    })}
                    {body}
                }
            }}

            <div class="modal-actions wizard-nav">
                {move || nav.get().tab().prev().map(|prev| view! {
                    <button class="btn-back" on:click=move |_| state.update_nav(|n, store| n.go_to(prev, store))>
                        "Back"
                    </button>
                })}
                <div class="wizard-nav-right">
                    <button class="btn btn-secondary" disabled=move || saving.get() on:click=move |_| submit(true)>
                        "Save draft"
                    </button>
                    <button class="btn-next" disabled=move || saving.get() on:click=move |_| submit(false)>
                        {move || if nav.get().tab().next().is_some() { "Save & continue" } else { "Submit" }}
                    </button>
                </div>
            </div>
        </div>
    }
}

enum Submission {
    Overview(dr_api_types::CompanyOverviewSubmission),
    Financials(dr_api_types::FinancialDetailsSubmission),
    Teaser(dr_api_types::TeaserCenterSubmission),
}
