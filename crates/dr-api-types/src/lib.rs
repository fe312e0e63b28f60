//! Shared wire types for the deal-room REST API.
//!
//! Every response field is `#[serde(default)]` so that a backend adding,
//! dropping or nulling a column never breaks the front end. Request bodies are
//! strict: they serialize exactly what the backend expects.

use serde::{Deserialize, Serialize};

// ── Envelope ──

/// List and detail endpoints answer either with the bare payload or with a
/// `{"data": ...}` wrapper. Both shapes decode through this type.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ApiEnvelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> ApiEnvelope<T> {
    pub fn into_inner(self) -> T {
        match self {
            ApiEnvelope::Wrapped { data } => data,
            ApiEnvelope::Bare(inner) => inner,
        }
    }
}

// ── Pipeline ──

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ApiPartyRef {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ApiEmployee {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiDeal {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub buyer_id: Option<i64>,
    #[serde(default)]
    pub seller_id: Option<i64>,
    #[serde(default)]
    pub buyer: Option<ApiPartyRef>,
    #[serde(default)]
    pub seller: Option<ApiPartyRef>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub estimated_ev_value: Option<f64>,
    #[serde(default)]
    pub estimated_ev_currency: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub pic: Option<ApiEmployee>,
    #[serde(default)]
    pub target_close_date: Option<String>,
    #[serde(default)]
    pub progress_percent: f64,
    #[serde(default)]
    pub comments_count: u32,
    #[serde(default)]
    pub attachments_count: u32,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub stage_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ApiStage {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub position: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ApiKpi {
    #[serde(default)]
    pub expected_transaction_value: f64,
    #[serde(default)]
    pub active_deals: u64,
    #[serde(default)]
    pub late_stage_deals: u64,
    #[serde(default)]
    pub average_progress: f64,
    #[serde(default)]
    pub velocity_score: f64,
}

// ── Parties ──

/// Row returned by the buyer and seller pickers.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiPartySummary {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub company_overview: Option<ApiCompanyOverview>,
}

impl ApiPartySummary {
    /// Best available display name: explicit company name, then the
    /// registered name from the nested overview, then a numbered fallback.
    pub fn display_name(&self) -> String {
        self.company_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .or_else(|| {
                self.company_overview
                    .as_ref()
                    .map(|o| o.registered_name.as_str())
                    .filter(|n| !n.trim().is_empty())
            })
            .map(str::to_string)
            .unwrap_or_else(|| format!("#{}", self.id))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ApiContact {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiCompanyOverview {
    #[serde(default)]
    pub registered_name: String,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub rank: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub year_founded: Option<i32>,
    #[serde(default)]
    pub employee_count: Option<u32>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub contacts: Vec<ApiContact>,
    /// Composite field stored by the backend as a JSON-encoded string.
    #[serde(default)]
    pub shareholders: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiFinancialDetails {
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub annual_revenue: Option<f64>,
    #[serde(default)]
    pub ebitda: Option<f64>,
    #[serde(default)]
    pub net_profit: Option<f64>,
    #[serde(default)]
    pub total_assets: Option<f64>,
    #[serde(default)]
    pub total_liabilities: Option<f64>,
    #[serde(default)]
    pub asking_price: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiTeaserCenter {
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub investment_thesis: Option<String>,
    #[serde(default)]
    pub is_public: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiSellerProfile {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub company_overview: Option<ApiCompanyOverview>,
    #[serde(default)]
    pub financial_details: Option<ApiFinancialDetails>,
    #[serde(default)]
    pub teaser_center: Option<ApiTeaserCenter>,
}

/// Acknowledgement returned by the seller wizard endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiSellerAck {
    #[serde(default)]
    pub seller_id: i64,
    #[serde(default)]
    pub is_draft: bool,
}

// ── Reference data ──

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ApiReferenceItem {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: String,
}

// ── Request bodies ──

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CreateDealRequest {
    pub buyer_id: i64,
    pub seller_id: i64,
    pub name: String,
    pub industry: String,
    pub estimated_ev_value: Option<f64>,
    pub estimated_ev_currency: String,
    pub priority: String,
    pub pic_user_id: Option<i64>,
    pub target_close_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UpdateDealStageRequest {
    pub stage_code: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CompanyOverviewSubmission {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller_id: Option<i64>,
    pub is_draft: bool,
    pub registered_name: String,
    pub industry: String,
    pub country: String,
    pub rank: String,
    pub website: String,
    pub year_founded: Option<i32>,
    pub employee_count: Option<u32>,
    pub description: String,
    pub contacts: Vec<ApiContact>,
    /// JSON-encoded shareholder list, mirroring how the backend stores it.
    pub shareholders: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FinancialDetailsSubmission {
    pub seller_id: i64,
    pub is_draft: bool,
    pub currency: String,
    pub annual_revenue: Option<f64>,
    pub ebitda: Option<f64>,
    pub net_profit: Option<f64>,
    pub total_assets: Option<f64>,
    pub total_liabilities: Option<f64>,
    pub asking_price: Option<f64>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TeaserCenterSubmission {
    pub seller_id: i64,
    pub is_draft: bool,
    pub headline: String,
    pub highlights: Vec<String>,
    pub investment_thesis: String,
    pub is_public: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_accepts_bare_and_wrapped_lists() {
        let bare: ApiEnvelope<Vec<ApiStage>> =
            serde_json::from_str(r#"[{"code":"LOI","label":"Letter of Intent","position":2}]"#)
                .expect("bare list");
        let wrapped: ApiEnvelope<Vec<ApiStage>> = serde_json::from_str(
            r#"{"data":[{"code":"LOI","label":"Letter of Intent","position":2}]}"#,
        )
        .expect("wrapped list");
        assert_eq!(bare.into_inner(), wrapped.into_inner());
    }

    #[test]
    fn deal_tolerates_missing_fields() {
        let deal: ApiDeal =
            serde_json::from_str(r#"{"id": 7, "stage_code": "NDA"}"#).expect("minimal deal");
        assert_eq!(deal.id, 7);
        assert_eq!(deal.stage_code, "NDA");
        assert!(deal.buyer.is_none());
        assert!(deal.estimated_ev_value.is_none());
        assert_eq!(deal.comments_count, 0);
    }

    #[test]
    fn deal_reads_nested_parties() {
        let json = r#"{
            "id": 1,
            "name": "Acme Co – Globex Inc",
            "buyer": {"id": 10, "name": "Acme Co"},
            "seller": {"id": 20, "name": "Globex Inc"},
            "estimated_ev_value": 85000000,
            "estimated_ev_currency": "USD",
            "priority": "high",
            "pic": {"id": 3, "name": "Dana"},
            "progress_percent": 40,
            "stage_code": "LOI"
        }"#;
        let deal: ApiDeal = serde_json::from_str(json).expect("full deal");
        assert_eq!(deal.buyer.map(|b| b.name), Some("Acme Co".to_string()));
        assert_eq!(deal.estimated_ev_value, Some(85_000_000.0));
        assert_eq!(deal.pic.map(|p| p.id), Some(3));
    }

    #[test]
    fn party_display_name_falls_back() {
        let named = ApiPartySummary {
            id: 1,
            company_name: Some("Acme Co".into()),
            company_overview: None,
        };
        assert_eq!(named.display_name(), "Acme Co");

        let overview_only = ApiPartySummary {
            id: 2,
            company_name: Some("  ".into()),
            company_overview: Some(ApiCompanyOverview {
                registered_name: "Globex Inc".into(),
                ..Default::default()
            }),
        };
        assert_eq!(overview_only.display_name(), "Globex Inc");

        let anonymous = ApiPartySummary { id: 3, ..Default::default() };
        assert_eq!(anonymous.display_name(), "#3");
    }

    #[test]
    fn create_deal_request_serializes_nulls() {
        let body = CreateDealRequest {
            buyer_id: 1,
            seller_id: 2,
            name: "A – B".into(),
            industry: String::new(),
            estimated_ev_value: None,
            estimated_ev_currency: "USD".into(),
            priority: "medium".into(),
            pic_user_id: None,
            target_close_date: None,
        };
        let value = serde_json::to_value(&body).expect("serialize");
        assert!(value["estimated_ev_value"].is_null());
        assert!(value["pic_user_id"].is_null());
        assert_eq!(value["priority"], "medium");
    }
}
