//! Wire → domain conversions.
//!
//! The backend is loose about shapes (nullable names, dates with or without a
//! time part, composite fields stored as JSON strings). Everything is
//! normalised here so the rest of the crate works with total types.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use dr_api_types::{
    ApiCompanyOverview, ApiContact, ApiDeal, ApiEmployee, ApiFinancialDetails, ApiKpi,
    ApiPartyRef, ApiPartySummary, ApiReferenceItem, ApiSellerProfile, ApiStage, ApiTeaserCenter,
};

use crate::types::{
    CompanyOverview, Contact, Deal, DealId, EmployeeRef, FinancialDetails, KpiSnapshot, Money,
    PartyRef, PickerOption, Priority, ReferenceItem, SellerProfile, Shareholder, Stage, StageCode,
    TeaserCenter,
};

pub const DEFAULT_CURRENCY: &str = "USD";

/// Parse a date that may carry a time component (`2025-03-31`,
/// `2025-03-31T00:00:00Z`, `2025-03-31 00:00:00`).
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_timestamp(raw).map(|ts| ts.date_naive()))
}

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

/// Decode the JSON-encoded shareholder list stored on a company overview.
///
/// Malformed input is logged and read as an empty list.
pub fn parse_shareholders(raw: Option<&str>) -> Vec<Shareholder> {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return Vec::new();
    };
    match serde_json::from_str::<Vec<Shareholder>>(raw) {
        Ok(list) => list,
        Err(e) => {
            tracing::warn!(error = %e, "malformed shareholders field, using empty list");
            Vec::new()
        }
    }
}

fn party(reference: Option<ApiPartyRef>, fallback_id: Option<i64>) -> PartyRef {
    match reference {
        Some(r) => PartyRef { id: r.id, name: r.name },
        None => PartyRef {
            id: fallback_id.unwrap_or_default(),
            name: String::new(),
        },
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl From<ApiDeal> for Deal {
    fn from(api: ApiDeal) -> Self {
        let progress = api.progress_percent.clamp(0.0, 100.0).round() as u8;
        Deal {
            id: DealId(api.id),
            name: api.name,
            buyer: party(api.buyer, api.buyer_id),
            seller: party(api.seller, api.seller_id),
            industry: api.industry.unwrap_or_default(),
            estimate: Money {
                value: api.estimated_ev_value,
                currency: non_empty(api.estimated_ev_currency)
                    .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            },
            priority: api
                .priority
                .as_deref()
                .map(Priority::parse)
                .unwrap_or_default(),
            pic: api.pic.map(|p| EmployeeRef { id: p.id, name: p.name }),
            target_close_date: api.target_close_date.as_deref().and_then(parse_date),
            progress,
            comments_count: api.comments_count,
            attachments_count: api.attachments_count,
            updated_at: api.updated_at.as_deref().and_then(parse_timestamp),
            stage: StageCode(api.stage_code),
        }
    }
}

impl From<ApiStage> for Stage {
    fn from(api: ApiStage) -> Self {
        let label = if api.label.trim().is_empty() {
            api.code.clone()
        } else {
            api.label
        };
        Stage {
            code: StageCode(api.code),
            label,
            position: api.position,
        }
    }
}

impl From<ApiKpi> for KpiSnapshot {
    fn from(api: ApiKpi) -> Self {
        KpiSnapshot {
            expected_transaction_value: api.expected_transaction_value,
            active_deals: api.active_deals,
            late_stage_deals: api.late_stage_deals,
            average_progress: api.average_progress,
            velocity_score: api.velocity_score,
        }
    }
}

impl From<ApiContact> for Contact {
    fn from(api: ApiContact) -> Self {
        Contact {
            name: api.name,
            title: api.title,
            email: api.email,
            phone: api.phone,
        }
    }
}

impl From<Contact> for ApiContact {
    fn from(contact: Contact) -> Self {
        ApiContact {
            name: contact.name,
            title: contact.title,
            email: contact.email,
            phone: contact.phone,
        }
    }
}

impl From<ApiCompanyOverview> for CompanyOverview {
    fn from(api: ApiCompanyOverview) -> Self {
        let shareholders = parse_shareholders(api.shareholders.as_deref());
        CompanyOverview {
            registered_name: api.registered_name,
            industry: non_empty(api.industry),
            country: non_empty(api.country),
            rank: non_empty(api.rank),
            website: non_empty(api.website),
            year_founded: api.year_founded,
            employee_count: api.employee_count,
            description: non_empty(api.description),
            contacts: api.contacts.into_iter().map(Contact::from).collect(),
            shareholders,
        }
    }
}

impl From<ApiFinancialDetails> for FinancialDetails {
    fn from(api: ApiFinancialDetails) -> Self {
        FinancialDetails {
            currency: non_empty(api.currency),
            annual_revenue: api.annual_revenue,
            ebitda: api.ebitda,
            net_profit: api.net_profit,
            total_assets: api.total_assets,
            total_liabilities: api.total_liabilities,
            asking_price: api.asking_price,
        }
    }
}

impl From<ApiTeaserCenter> for TeaserCenter {
    fn from(api: ApiTeaserCenter) -> Self {
        TeaserCenter {
            headline: non_empty(api.headline),
            highlights: api
                .highlights
                .into_iter()
                .filter(|h| !h.trim().is_empty())
                .collect(),
            investment_thesis: non_empty(api.investment_thesis),
            is_public: api.is_public,
        }
    }
}

impl From<ApiSellerProfile> for SellerProfile {
    fn from(api: ApiSellerProfile) -> Self {
        SellerProfile {
            id: api.id,
            company_overview: api.company_overview.map(Into::into).unwrap_or_default(),
            financial_details: api.financial_details.map(Into::into),
            teaser_center: api.teaser_center.map(Into::into),
        }
    }
}

impl From<ApiPartySummary> for PickerOption {
    fn from(api: ApiPartySummary) -> Self {
        PickerOption {
            id: api.id,
            label: api.display_name(),
        }
    }
}

impl From<ApiEmployee> for PickerOption {
    fn from(api: ApiEmployee) -> Self {
        PickerOption {
            id: api.id,
            label: api.name,
        }
    }
}

impl From<ApiReferenceItem> for ReferenceItem {
    fn from(api: ApiReferenceItem) -> Self {
        let code = api.code.unwrap_or_else(|| api.name.clone());
        ReferenceItem {
            id: api.id,
            code,
            name: api.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_with_and_without_time() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 31);
        assert_eq!(parse_date("2025-03-31"), expected);
        assert_eq!(parse_date("2025-03-31T10:00:00Z"), expected);
        assert_eq!(parse_date("2025-03-31 10:00:00"), expected);
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("next tuesday"), None);
    }

    #[test]
    fn deal_defaults_are_normalised() {
        let api = ApiDeal {
            id: 5,
            buyer_id: Some(9),
            priority: Some("URGENT".into()),
            progress_percent: 140.0,
            estimated_ev_currency: Some(" ".into()),
            stage_code: "NDA".into(),
            ..Default::default()
        };
        let deal = Deal::from(api);
        assert_eq!(deal.buyer.id, 9);
        assert_eq!(deal.priority, Priority::Medium);
        assert_eq!(deal.progress, 100);
        assert_eq!(deal.estimate.currency, "USD");
        assert_eq!(deal.stage, StageCode::from("NDA"));
    }

    #[test]
    fn shareholders_parse_and_fall_back() {
        let parsed = parse_shareholders(Some(r#"[{"name":"Founder","percentage":"60"}]"#));
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].name, "Founder");

        assert!(parse_shareholders(Some("{not json")).is_empty());
        assert!(parse_shareholders(Some("")).is_empty());
        assert!(parse_shareholders(None).is_empty());
    }

    #[test]
    fn stage_label_falls_back_to_code() {
        let stage = Stage::from(ApiStage {
            code: "LOI".into(),
            label: String::new(),
            position: 3,
        });
        assert_eq!(stage.label, "LOI");
    }
}
