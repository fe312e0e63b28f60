use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DealId(pub i64);

impl std::fmt::Display for DealId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stage code such as `"LOI"`; the foreign key a deal carries into the
/// stage list.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StageCode(pub String);

impl StageCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StageCode {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Wire value used by the REST API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Lenient parse; anything unrecognised reads as `Medium`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "low" => Priority::Low,
            "high" => Priority::High,
            _ => Priority::Medium,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Priority::Low => "priority-low",
            Priority::Medium => "priority-medium",
            Priority::High => "priority-high",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Low => write!(f, "Low"),
            Priority::Medium => write!(f, "Medium"),
            Priority::High => write!(f, "High"),
        }
    }
}

// ---------------------------------------------------------------------------
// Deal
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyRef {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRef {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Money {
    pub value: Option<f64>,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    pub id: DealId,
    pub name: String,
    pub buyer: PartyRef,
    pub seller: PartyRef,
    pub industry: String,
    pub estimate: Money,
    pub priority: Priority,
    pub pic: Option<EmployeeRef>,
    pub target_close_date: Option<NaiveDate>,
    /// 0..=100
    pub progress: u8,
    pub comments_count: u32,
    pub attachments_count: u32,
    pub updated_at: Option<DateTime<Utc>>,
    pub stage: StageCode,
}

// ---------------------------------------------------------------------------
// Stage
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    pub code: StageCode,
    pub label: String,
    pub position: i32,
}

impl Stage {
    pub fn new(code: impl Into<String>, label: impl Into<String>, position: i32) -> Self {
        Self {
            code: StageCode::new(code),
            label: label.into(),
            position,
        }
    }
}

// ---------------------------------------------------------------------------
// KPI snapshot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct KpiSnapshot {
    pub expected_transaction_value: f64,
    pub active_deals: u64,
    pub late_stage_deals: u64,
    pub average_progress: f64,
    pub velocity_score: f64,
}

// ---------------------------------------------------------------------------
// Seller profile
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shareholder {
    pub name: String,
    #[serde(default)]
    pub percentage: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub title: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CompanyOverview {
    pub registered_name: String,
    pub industry: Option<String>,
    pub country: Option<String>,
    pub rank: Option<String>,
    pub website: Option<String>,
    pub year_founded: Option<i32>,
    pub employee_count: Option<u32>,
    pub description: Option<String>,
    pub contacts: Vec<Contact>,
    pub shareholders: Vec<Shareholder>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FinancialDetails {
    pub currency: Option<String>,
    pub annual_revenue: Option<f64>,
    pub ebitda: Option<f64>,
    pub net_profit: Option<f64>,
    pub total_assets: Option<f64>,
    pub total_liabilities: Option<f64>,
    pub asking_price: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TeaserCenter {
    pub headline: Option<String>,
    pub highlights: Vec<String>,
    pub investment_thesis: Option<String>,
    pub is_public: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SellerProfile {
    pub id: i64,
    pub company_overview: CompanyOverview,
    pub financial_details: Option<FinancialDetails>,
    pub teaser_center: Option<TeaserCenter>,
}

impl SellerProfile {
    pub fn display_name(&self) -> String {
        if self.company_overview.registered_name.trim().is_empty() {
            format!("Seller #{}", self.id)
        } else {
            self.company_overview.registered_name.clone()
        }
    }
}

// ---------------------------------------------------------------------------
// Pickers and reference data
// ---------------------------------------------------------------------------

/// One entry in a buyer, seller or employee picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickerOption {
    pub id: i64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceItem {
    pub id: i64,
    pub code: String,
    pub name: String,
}
