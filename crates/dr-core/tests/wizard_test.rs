use chrono::NaiveDate;
use dr_core::navigation::{MemoryNavStore, NavStore, WizardNav, SELLER_ID_KEY};
use dr_core::types::{PickerOption, Priority, Shareholder};
use dr_core::wizard::*;

fn option(id: i64, label: &str) -> PickerOption {
    PickerOption {
        id,
        label: label.into(),
    }
}

#[test]
fn name_is_derived_from_parties() {
    let mut form = CreateDealForm::new();
    form.select_buyer(Some(option(1, "Acme Co")));
    assert_eq!(form.name(), "");
    form.select_seller(Some(option(2, "Globex Inc")));
    assert_eq!(form.name(), "Acme Co \u{2013} Globex Inc");

    let req = form.to_request().expect("valid form");
    assert_eq!(req.name, "Acme Co \u{2013} Globex Inc");
    assert_eq!(req.buyer_id, 1);
    assert_eq!(req.seller_id, 2);
    assert_eq!(req.priority, "medium");
    assert_eq!(req.estimated_ev_currency, "USD");
    assert_eq!(req.estimated_ev_value, None);
}

#[test]
fn typed_name_survives_party_changes() {
    let mut form = CreateDealForm::new();
    form.select_buyer(Some(option(1, "Acme Co")));
    form.select_seller(Some(option(2, "Globex Inc")));
    form.set_name("Project Falcon");
    form.select_seller(Some(option(3, "Initech")));
    assert_eq!(form.name(), "Project Falcon");

    form.set_name("");
    assert_eq!(form.name(), "Acme Co \u{2013} Initech");
}

#[test]
fn missing_party_is_rejected() {
    let mut form = CreateDealForm::new();
    form.select_seller(Some(option(2, "Globex Inc")));
    assert_eq!(form.validate(), Err(ValidationError::Missing("buyer")));

    let mut form = CreateDealForm::new();
    form.select_buyer(Some(option(1, "Acme Co")));
    assert_eq!(form.validate(), Err(ValidationError::Missing("seller")));
}

#[test]
fn ev_value_must_be_a_non_negative_number() {
    let mut form = CreateDealForm::new();
    form.select_buyer(Some(option(1, "Acme Co")));
    form.select_seller(Some(option(2, "Globex Inc")));

    form.ev_value = "lots".into();
    assert!(matches!(
        form.validate(),
        Err(ValidationError::Invalid { field: "estimated EV", .. })
    ));

    form.ev_value = "-5".into();
    assert!(form.validate().is_err());

    form.ev_value = "85,000,000".into();
    form.ev_currency = "eur".into();
    form.priority = Priority::High;
    form.pic_user_id = Some(7);
    form.target_close_date = NaiveDate::from_ymd_opt(2025, 12, 31);
    let req = form.to_request().expect("valid form");
    assert_eq!(req.estimated_ev_value, Some(85_000_000.0));
    assert_eq!(req.estimated_ev_currency, "EUR");
    assert_eq!(req.priority, "high");
    assert_eq!(req.pic_user_id, Some(7));
    assert_eq!(req.target_close_date.as_deref(), Some("2025-12-31"));
}

#[test]
fn steps_advance_and_go_back() {
    let step = CreateDealStep::default();
    assert_eq!(step, CreateDealStep::Parties);
    assert_eq!(step.next().next(), CreateDealStep::Review);
    assert_eq!(CreateDealStep::Review.next(), CreateDealStep::Review);
    assert_eq!(CreateDealStep::Review.prev().label(), "Details");
}

#[test]
fn overview_requires_fields_unless_draft() {
    let mut form = CompanyOverviewForm {
        registered_name: "Globex Inc".into(),
        ..Default::default()
    };
    assert_eq!(
        form.to_submission(None, false),
        Err(ValidationError::Missing("industry"))
    );
    let draft = form.to_submission(None, true).expect("drafts skip checks");
    assert!(draft.is_draft);
    assert_eq!(draft.seller_id, None);

    form.industry = "Logistics".into();
    form.country = "Singapore".into();
    form.year_founded = "1998".into();
    form.shareholders = vec![
        Shareholder {
            name: "Founder".into(),
            percentage: Some("60".into()),
        },
        Shareholder {
            name: " ".into(),
            percentage: None,
        },
    ];
    let submission = form.to_submission(Some(4), false).expect("complete form");
    assert_eq!(submission.seller_id, Some(4));
    assert_eq!(submission.year_founded, Some(1998));
    assert_eq!(
        submission.shareholders,
        r#"[{"name":"Founder","percentage":"60"}]"#
    );
}

#[test]
fn bad_numbers_fail_even_for_drafts() {
    let form = CompanyOverviewForm {
        employee_count: "about fifty".into(),
        ..Default::default()
    };
    assert!(matches!(
        form.to_submission(None, true),
        Err(ValidationError::Invalid { field: "employee count", .. })
    ));
}

#[test]
fn later_tabs_need_a_seller_id() {
    let financials = FinancialDetailsForm {
        currency: "usd".into(),
        annual_revenue: "12000000".into(),
        ..Default::default()
    };
    assert_eq!(
        financials.to_submission(None, true),
        Err(ValidationError::MissingSellerId)
    );
    let submission = financials.to_submission(Some(4), false).expect("valid");
    assert_eq!(submission.currency, "USD");
    assert_eq!(submission.annual_revenue, Some(12_000_000.0));

    let teaser = TeaserCenterForm {
        highlights: "Strong margins\n\n  Asset light ".into(),
        ..Default::default()
    };
    assert_eq!(
        teaser.to_submission(None, false),
        Err(ValidationError::MissingSellerId)
    );
    assert_eq!(
        teaser.to_submission(Some(4), false),
        Err(ValidationError::Missing("headline"))
    );
    let draft = teaser.to_submission(Some(4), true).expect("draft");
    assert_eq!(draft.highlights, vec!["Strong margins", "Asset light"]);
}

#[test]
fn seller_tabs_walk_in_order() {
    assert_eq!(SellerTab::default(), SellerTab::CompanyOverview);
    assert_eq!(
        SellerTab::CompanyOverview.next(),
        Some(SellerTab::FinancialDetails)
    );
    assert_eq!(SellerTab::TeaserCenter.next(), None);
    assert_eq!(SellerTab::CompanyOverview.prev(), None);
}

#[test]
fn nav_persists_seller_id_across_tabs() {
    let store = MemoryNavStore::new();
    let mut nav = WizardNav::new();
    nav.set_seller_id(42, &store);
    nav.go_to(SellerTab::FinancialDetails, &store);
    assert_eq!(store.get(SELLER_ID_KEY).as_deref(), Some("42"));

    let restored = WizardNav::restore(&store);
    assert_eq!(restored.seller_id(), Some(42));
    assert_eq!(restored.tab(), SellerTab::CompanyOverview);

    nav.reset(&store);
    assert_eq!(nav.seller_id(), None);
    assert_eq!(store.get(SELLER_ID_KEY), None);
}

#[test]
fn nav_ignores_garbage_in_store() {
    let store = MemoryNavStore::new();
    store.set(SELLER_ID_KEY, "not-a-number");
    assert_eq!(WizardNav::restore(&store).seller_id(), None);
}

#[test]
fn nav_for_existing_seller_starts_on_overview() {
    let store = MemoryNavStore::new();
    let mut nav = WizardNav::for_seller(9);
    assert_eq!(nav.seller_id(), Some(9));
    assert_eq!(nav.tab(), SellerTab::CompanyOverview);

    nav.go_to(SellerTab::TeaserCenter, &store);
    assert_eq!(store.get(SELLER_ID_KEY).as_deref(), Some("9"));
}
