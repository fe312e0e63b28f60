use dr_core::convert::parse_date;
use dr_core::format::{format_close_date, format_deal_value};
use dr_core::types::{Deal, Money, PickerOption, Priority, ReferenceItem};
use dr_core::wizard::{parse_amount, CreateDealForm, CreateDealStep, ValidationError};
use leptos::prelude::*;

use crate::api;
use crate::state::use_app_state;

/// Select change → option lookup. An empty or unknown value clears the pick.
pub fn find_option(options: &[PickerOption], raw: &str) -> Option<PickerOption> {
    let id: i64 = raw.parse().ok()?;
    options.iter().find(|o| o.id == id).cloned()
}

/// Checks the current step before moving on. Details runs the full form
/// validation so a bad EV is caught before the review screen.
pub fn check_step(step: CreateDealStep, form: &CreateDealForm) -> Result<(), ValidationError> {
    match step {
        CreateDealStep::Parties => {
            if form.buyer().is_none() {
                return Err(ValidationError::Missing("buyer"));
            }
            if form.seller().is_none() {
                return Err(ValidationError::Missing("seller"));
            }
            Ok(())
        }
        CreateDealStep::Details | CreateDealStep::Review => form.validate(),
    }
}

#[component]
fn PickerSelect(
    label: &'static str,
    options: ReadSignal<Vec<PickerOption>>,
    selected: Signal<Option<i64>>,
    #[prop(into)] on_pick: Callback<Option<PickerOption>>,
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label>{label}</label>
            <select on:change=move |ev| {
                let raw = event_target_value(&ev);
                on_pick.run(options.with_untracked(|opts| find_option(opts, &raw)));
            }>
                <option value="" selected=move || selected.get().is_none()>"Select\u{2026}"</option>
                {move || options.get().into_iter().map(|o| {
                    let id = o.id;
                    view! {
                        <option value=id.to_string() selected=move || selected.get() == Some(id)>
                            {o.label}
                        </option>
                    }
                }).collect_view()}
            </select>
        </div>
    }
}

/// Three-step "new deal" wizard: parties, details, review.
#[component]
pub fn CreateDealModal(
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_created: Callback<Deal>,
) -> impl IntoView {
    let state = use_app_state();

    let (step, set_step) = signal(CreateDealStep::Parties);
    let (form, set_form) = signal(CreateDealForm::new());
    let (submitting, set_submitting) = signal(false);

    let (buyers, set_buyers) = signal(Vec::<PickerOption>::new());
    let (sellers, set_sellers) = signal(Vec::<PickerOption>::new());
    let (employees, set_employees) = signal(Vec::<PickerOption>::new());
    let (currencies, set_currencies) = signal(Vec::<ReferenceItem>::new());
    let (industries, set_industries) = signal(Vec::<ReferenceItem>::new());

    // Pickers load independently; one failing leaves the others usable.
    leptos::task::spawn_local(async move {
        let (b, s, e, c, i) = futures::join!(
            api::fetch_buyers(),
            api::fetch_sellers(),
            api::fetch_employees(),
            api::fetch_currencies(),
            api::fetch_industries(),
        );
        match b {
            Ok(v) => set_buyers.set(v),
            Err(e) => state.error_toast("Could not load buyers", e),
        }
        match s {
            Ok(v) => set_sellers.set(v),
            Err(e) => state.error_toast("Could not load sellers", e),
        }
        match e {
            Ok(v) => set_employees.set(v),
            Err(err) => leptos::logging::log!("Failed to fetch employees: {}", err),
        }
        match c {
            Ok(v) => set_currencies.set(v),
            Err(err) => leptos::logging::log!("Failed to fetch currencies: {}", err),
        }
        match i {
            Ok(v) => set_industries.set(v),
            Err(err) => leptos::logging::log!("Failed to fetch industries: {}", err),
        }
    });

    let go_next = move |_| {
        let current = step.get_untracked();
        match form.with_untracked(|f| check_step(current, f)) {
            Ok(()) => set_step.set(current.next()),
            Err(e) => state.error_toast("Check the form", e.to_string()),
        }
    };

    let do_submit = move |_| {
        if submitting.get_untracked() {
            return;
        }
        let request = match form.with_untracked(CreateDealForm::to_request) {
            Ok(request) => request,
            Err(e) => {
                state.error_toast("Check the form", e.to_string());
                return;
            }
        };
        set_submitting.set(true);
        leptos::task::spawn_local(async move {
            match api::create_deal(&request).await {
                Ok(deal) => {
                    state.success_toast("Deal created", deal.name.clone());
                    on_created.run(deal);
                    on_close.run(());
                }
                Err(e) => {
                    leptos::logging::log!("Failed to create deal: {}", e);
                    state.error_toast("Could not create deal", e);
                }
            }
            set_submitting.set(false);
        });
    };

    let buyer_id = Signal::derive(move || form.with(|f| f.buyer().map(|b| b.id)));
    let seller_id = Signal::derive(move || form.with(|f| f.seller().map(|s| s.id)));

    let parties_step = move || view! {
        <div class="wizard-step-content">
            <PickerSelect
                label="Buyer"
                options=buyers
                selected=buyer_id
                on_pick=Callback::new(move |pick| set_form.update(|f| f.select_buyer(pick)))
            />
            <PickerSelect
                label="Seller"
                options=sellers
                selected=seller_id
                on_pick=Callback::new(move |pick| set_form.update(|f| f.select_seller(pick)))
            />
            <div class="form-group">
                <label>"Deal name"</label>
                <input
                    type="text"
                    placeholder="Buyer \u{2013} Seller"
                    prop:value=move || form.with(|f| f.name().to_string())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        set_form.update(|f| f.set_name(value));
                    }
                />
            </div>
        </div>
    };

    let details_step = move || view! {
        <div class="wizard-step-content">
            <div class="form-group">
                <label>"Industry"</label>
                <input
                    type="text"
                    list="deal-industries"
                    prop:value=move || form.with(|f| f.industry.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        set_form.update(|f| f.industry = value);
                    }
                />
                <datalist id="deal-industries">
                    {move || industries.get().into_iter().map(|i| view! {
                        <option value=i.name></option>
                    }).collect_view()}
                </datalist>
            </div>
            <div class="form-row">
                <div class="form-group">
                    <label>"Estimated EV"</label>
                    <input
                        type="text"
                        inputmode="decimal"
                        placeholder="e.g. 85,000,000"
                        prop:value=move || form.with(|f| f.ev_value.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            set_form.update(|f| f.ev_value = value);
                        }
                    />
                </div>
                <div class="form-group">
                    <label>"Currency"</label>
                    <select on:change=move |ev| {
                        let value = event_target_value(&ev);
                        set_form.update(|f| f.ev_currency = value);
                    }>
                        {move || {
                            let current = form.with(|f| f.ev_currency.clone());
                            let mut codes: Vec<String> =
                                currencies.get().into_iter().map(|c| c.code).collect();
                            if !codes.contains(&current) {
                                codes.insert(0, current.clone());
                            }
                            codes.into_iter().map(|code| {
                                let selected = code == current;
                                view! { <option value=code.clone() selected=selected>{code.clone()}</option> }
                            }).collect_view()
                        }}
                    </select>
                </div>
            </div>
            <div class="form-row">
                <div class="form-group">
                    <label>"Priority"</label>
                    <select on:change=move |ev| {
                        let value = Priority::parse(&event_target_value(&ev));
                        set_form.update(|f| f.priority = value);
                    }>
                        {Priority::ALL.into_iter().map(|p| view! {
                            <option
                                value=p.as_str()
                                selected=move || form.with(|f| f.priority == p)
                            >
                                {p.to_string()}
                            </option>
                        }).collect_view()}
                    </select>
                </div>
                <div class="form-group">
                    <label>"PIC"</label>
                    <select on:change=move |ev| {
                        let pic = event_target_value(&ev).parse::<i64>().ok();
                        set_form.update(|f| f.pic_user_id = pic);
                    }>
                        <option value="">"Unassigned"</option>
                        {move || employees.get().into_iter().map(|e| {
                            let id = e.id;
                            view! {
                                <option
                                    value=id.to_string()
                                    selected=move || form.with(|f| f.pic_user_id == Some(id))
                                >
                                    {e.label}
                                </option>
                            }
                        }).collect_view()}
                    </select>
                </div>
                <div class="form-group">
                    <label>"Target close"</label>
                    <input
                        type="date"
                        prop:value=move || form.with(|f| {
                            f.target_close_date
                                .map(|d| d.format("%Y-%m-%d").to_string())
                                .unwrap_or_default()
                        })
                        on:change=move |ev| {
                            let date = parse_date(&event_target_value(&ev));
                            set_form.update(|f| f.target_close_date = date);
                        }
                    />
                </div>
            </div>
        </div>
    };

    let review_step = move || {
        let f = form.get();
        let value = match parse_amount("estimated EV", &f.ev_value) {
            Ok(value) => format_deal_value(&Money {
                value,
                currency: f.ev_currency.clone(),
            }),
            Err(e) => e.to_string(),
        };
        let pic = f
            .pic_user_id
            .and_then(|id| employees.with(|list| list.iter().find(|e| e.id == id).map(|e| e.label.clone())))
            .unwrap_or_else(|| "Unassigned".to_string());
        let rows = [
            ("Name", f.name().to_string()),
            ("Buyer", f.buyer().map(|b| b.label.clone()).unwrap_or_default()),
            ("Seller", f.seller().map(|s| s.label.clone()).unwrap_or_default()),
            ("Industry", f.industry.clone()),
            ("Estimated EV", value),
            ("Priority", f.priority.to_string()),
            ("PIC", pic),
            ("Target close", format_close_date(f.target_close_date)),
        ];
        view! {
            <div class="wizard-step-content wizard-review">
                {rows.into_iter().map(|(label, value)| view! {
                    <div class="review-row">
                        <span class="review-label">{label}</span>
                        <span class="review-value">{value}</span>
                    </div>
                }).collect_view()}
            </div>
        }
    };

    view! {
        <div class="modal-overlay" on:click=move |_| on_close.run(())></div>
        <div class="modal wizard-modal create-deal-modal">
            <h2>"New Deal"</h2>

            <div class="wizard-steps">
                {CreateDealStep::ALL.into_iter().map(|s| {
                    let idx = s.index();
                    let cls = move || {
                        let current = step.get().index();
                        if current == idx {
                            "wizard-step active"
                        } else if current > idx {
                            "wizard-step completed"
                        } else {
                            "wizard-step"
                        }
                    };
                    view! {
                        <div class=cls>
                            <span class="wizard-step-number">{idx + 1}</span>
                            <span class="wizard-step-label">{s.label()}</span>
                        </div>
                    }
                }).collect_view()}
            </div>

            {move || match step.get() {
                CreateDealStep::Parties => parties_step().into_any(),
                CreateDealStep::Details => details_step().into_any(),
                CreateDealStep::Review => review_step().into_any(),
            }}

            <div class="modal-actions wizard-nav">
                <button class="btn-cancel" on:click=move |_| on_close.run(())>"Cancel"</button>
                <div class="wizard-nav-right">
                    {move || (step.get() != CreateDealStep::Parties).then(|| view! {
                        <button class="btn-back" on:click=move |_| set_step.update(|s| *s = s.prev())>
                            "Back"
                        </button>
                    })}
                    {move || (step.get() != CreateDealStep::Review).then(|| view! {
                        <button class="btn-next" on:click=go_next>"Next"</button>
                    })}
                    {move || (step.get() == CreateDealStep::Review).then(|| view! {
                        <button class="btn-create" disabled=move || submitting.get() on:click=do_submit>
                            {move || if submitting.get() { "Creating\u{2026}" } else { "Create Deal" }}
                        </button>
                    })}
                </div>
            </div>
        </div>
    }
}
