//! Field state for the create-deal wizard and the seller onboarding tabs.
//!
//! Forms keep raw user input (numbers stay strings until submission) and only
//! check presence of required fields and parseability; business validation is
//! the backend's job.

use chrono::NaiveDate;
use dr_api_types::{
    CompanyOverviewSubmission, CreateDealRequest, FinancialDetailsSubmission,
    TeaserCenterSubmission,
};
use serde::{Deserialize, Serialize};

use crate::convert::DEFAULT_CURRENCY;
use crate::types::{
    CompanyOverview, Contact, FinancialDetails, PickerOption, Priority, Shareholder, TeaserCenter,
};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("{field}: {reason}")]
    Invalid { field: &'static str, reason: String },
    #[error("save the company overview before this tab")]
    MissingSellerId,
}

fn required(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Missing(field))
    } else {
        Ok(())
    }
}

/// Parse an optional amount typed by a user; `1,500,000` and `1 500 000` are
/// accepted.
pub fn parse_amount(field: &'static str, raw: &str) -> Result<Option<f64>, ValidationError> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, ',' | '_' | ' '))
        .collect();
    if cleaned.is_empty() {
        return Ok(None);
    }
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(ValidationError::Invalid {
            field,
            reason: format!("{raw:?} is not a number"),
        }),
    }
}

fn parse_whole<T: std::str::FromStr>(
    field: &'static str,
    raw: &str,
) -> Result<Option<T>, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<T>()
        .map(Some)
        .map_err(|_| ValidationError::Invalid {
            field,
            reason: format!("{raw:?} is not a whole number"),
        })
}

// ---------------------------------------------------------------------------
// Create deal
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CreateDealStep {
    #[default]
    Parties,
    Details,
    Review,
}

impl CreateDealStep {
    pub const ALL: [CreateDealStep; 3] = [
        CreateDealStep::Parties,
        CreateDealStep::Details,
        CreateDealStep::Review,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CreateDealStep::Parties => "Parties",
            CreateDealStep::Details => "Details",
            CreateDealStep::Review => "Review",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            CreateDealStep::Parties => 0,
            CreateDealStep::Details => 1,
            CreateDealStep::Review => 2,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            CreateDealStep::Parties => CreateDealStep::Details,
            CreateDealStep::Details | CreateDealStep::Review => CreateDealStep::Review,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            CreateDealStep::Parties | CreateDealStep::Details => CreateDealStep::Parties,
            CreateDealStep::Review => CreateDealStep::Details,
        }
    }
}

/// `"<buyer> – <seller>"`, joined with an en dash.
pub fn suggested_deal_name(buyer: &str, seller: &str) -> String {
    format!("{} \u{2013} {}", buyer.trim(), seller.trim())
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateDealForm {
    buyer: Option<PickerOption>,
    seller: Option<PickerOption>,
    name: String,
    name_edited: bool,
    pub industry: String,
    pub ev_value: String,
    pub ev_currency: String,
    pub priority: Priority,
    pub pic_user_id: Option<i64>,
    pub target_close_date: Option<NaiveDate>,
}

impl Default for CreateDealForm {
    fn default() -> Self {
        Self {
            buyer: None,
            seller: None,
            name: String::new(),
            name_edited: false,
            industry: String::new(),
            ev_value: String::new(),
            ev_currency: DEFAULT_CURRENCY.to_string(),
            priority: Priority::Medium,
            pic_user_id: None,
            target_close_date: None,
        }
    }
}

impl CreateDealForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buyer(&self) -> Option<&PickerOption> {
        self.buyer.as_ref()
    }

    pub fn seller(&self) -> Option<&PickerOption> {
        self.seller.as_ref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn select_buyer(&mut self, buyer: Option<PickerOption>) {
        self.buyer = buyer;
        self.refresh_name();
    }

    pub fn select_seller(&mut self, seller: Option<PickerOption>) {
        self.seller = seller;
        self.refresh_name();
    }

    /// A typed name sticks; clearing the field hands it back to auto-naming.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.name_edited = !self.name.trim().is_empty();
        self.refresh_name();
    }

    fn refresh_name(&mut self) {
        if self.name_edited {
            return;
        }
        self.name = match (&self.buyer, &self.seller) {
            (Some(b), Some(s)) => suggested_deal_name(&b.label, &s.label),
            _ => String::new(),
        };
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.to_request().map(|_| ())
    }

    /// Build the `POST /api/deals` body, or the first validation error.
    pub fn to_request(&self) -> Result<CreateDealRequest, ValidationError> {
        let buyer = self.buyer.as_ref().ok_or(ValidationError::Missing("buyer"))?;
        let seller = self
            .seller
            .as_ref()
            .ok_or(ValidationError::Missing("seller"))?;
        let estimated_ev_value = parse_amount("estimated EV", &self.ev_value)?;
        if estimated_ev_value.is_some_and(|v| v < 0.0) {
            return Err(ValidationError::Invalid {
                field: "estimated EV",
                reason: "must not be negative".to_string(),
            });
        }
        let name = if self.name.trim().is_empty() {
            suggested_deal_name(&buyer.label, &seller.label)
        } else {
            self.name.trim().to_string()
        };
        let currency = if self.ev_currency.trim().is_empty() {
            DEFAULT_CURRENCY.to_string()
        } else {
            self.ev_currency.trim().to_ascii_uppercase()
        };
        Ok(CreateDealRequest {
            buyer_id: buyer.id,
            seller_id: seller.id,
            name,
            industry: self.industry.trim().to_string(),
            estimated_ev_value,
            estimated_ev_currency: currency,
            priority: self.priority.as_str().to_string(),
            pic_user_id: self.pic_user_id,
            target_close_date: self
                .target_close_date
                .map(|d| d.format("%Y-%m-%d").to_string()),
        })
    }
}

// ---------------------------------------------------------------------------
// Seller onboarding
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SellerTab {
    #[default]
    CompanyOverview,
    FinancialDetails,
    TeaserCenter,
}

impl SellerTab {
    pub const ALL: [SellerTab; 3] = [
        SellerTab::CompanyOverview,
        SellerTab::FinancialDetails,
        SellerTab::TeaserCenter,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SellerTab::CompanyOverview => "Company Overview",
            SellerTab::FinancialDetails => "Financial Details",
            SellerTab::TeaserCenter => "Teaser Center",
        }
    }

    pub fn next(&self) -> Option<SellerTab> {
        match self {
            SellerTab::CompanyOverview => Some(SellerTab::FinancialDetails),
            SellerTab::FinancialDetails => Some(SellerTab::TeaserCenter),
            SellerTab::TeaserCenter => None,
        }
    }

    pub fn prev(&self) -> Option<SellerTab> {
        match self {
            SellerTab::CompanyOverview => None,
            SellerTab::FinancialDetails => Some(SellerTab::CompanyOverview),
            SellerTab::TeaserCenter => Some(SellerTab::FinancialDetails),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompanyOverviewForm {
    pub registered_name: String,
    pub industry: String,
    pub country: String,
    pub rank: String,
    pub website: String,
    pub year_founded: String,
    pub employee_count: String,
    pub description: String,
    pub contacts: Vec<Contact>,
    pub shareholders: Vec<Shareholder>,
}

impl CompanyOverviewForm {
    pub fn from_profile(overview: &CompanyOverview) -> Self {
        Self {
            registered_name: overview.registered_name.clone(),
            industry: overview.industry.clone().unwrap_or_default(),
            country: overview.country.clone().unwrap_or_default(),
            rank: overview.rank.clone().unwrap_or_default(),
            website: overview.website.clone().unwrap_or_default(),
            year_founded: overview
                .year_founded
                .map(|y| y.to_string())
                .unwrap_or_default(),
            employee_count: overview
                .employee_count
                .map(|c| c.to_string())
                .unwrap_or_default(),
            description: overview.description.clone().unwrap_or_default(),
            contacts: overview.contacts.clone(),
            shareholders: overview.shareholders.clone(),
        }
    }

    /// Drafts skip the required-field checks but still reject unparsable
    /// numbers.
    pub fn to_submission(
        &self,
        seller_id: Option<i64>,
        is_draft: bool,
    ) -> Result<CompanyOverviewSubmission, ValidationError> {
        if !is_draft {
            required("registered name", &self.registered_name)?;
            required("industry", &self.industry)?;
            required("country", &self.country)?;
        }
        let shareholders: Vec<&Shareholder> = self
            .shareholders
            .iter()
            .filter(|s| !s.name.trim().is_empty())
            .collect();
        let shareholders =
            serde_json::to_string(&shareholders).map_err(|e| ValidationError::Invalid {
                field: "shareholders",
                reason: e.to_string(),
            })?;
        Ok(CompanyOverviewSubmission {
            seller_id,
            is_draft,
            registered_name: self.registered_name.trim().to_string(),
            industry: self.industry.trim().to_string(),
            country: self.country.trim().to_string(),
            rank: self.rank.trim().to_string(),
            website: self.website.trim().to_string(),
            year_founded: parse_whole("year founded", &self.year_founded)?,
            employee_count: parse_whole("employee count", &self.employee_count)?,
            description: self.description.trim().to_string(),
            contacts: self
                .contacts
                .iter()
                .filter(|c| !c.name.trim().is_empty())
                .cloned()
                .map(Into::into)
                .collect(),
            shareholders,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FinancialDetailsForm {
    pub currency: String,
    pub annual_revenue: String,
    pub ebitda: String,
    pub net_profit: String,
    pub total_assets: String,
    pub total_liabilities: String,
    pub asking_price: String,
}

fn amount_text(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl FinancialDetailsForm {
    pub fn from_profile(details: &FinancialDetails) -> Self {
        Self {
            currency: details.currency.clone().unwrap_or_default(),
            annual_revenue: amount_text(details.annual_revenue),
            ebitda: amount_text(details.ebitda),
            net_profit: amount_text(details.net_profit),
            total_assets: amount_text(details.total_assets),
            total_liabilities: amount_text(details.total_liabilities),
            asking_price: amount_text(details.asking_price),
        }
    }

    pub fn to_submission(
        &self,
        seller_id: Option<i64>,
        is_draft: bool,
    ) -> Result<FinancialDetailsSubmission, ValidationError> {
        let seller_id = seller_id.ok_or(ValidationError::MissingSellerId)?;
        if !is_draft {
            required("currency", &self.currency)?;
        }
        Ok(FinancialDetailsSubmission {
            seller_id,
            is_draft,
            currency: self.currency.trim().to_ascii_uppercase(),
            annual_revenue: parse_amount("annual revenue", &self.annual_revenue)?,
            ebitda: parse_amount("EBITDA", &self.ebitda)?,
            net_profit: parse_amount("net profit", &self.net_profit)?,
            total_assets: parse_amount("total assets", &self.total_assets)?,
            total_liabilities: parse_amount("total liabilities", &self.total_liabilities)?,
            asking_price: parse_amount("asking price", &self.asking_price)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TeaserCenterForm {
    pub headline: String,
    /// One highlight per line.
    pub highlights: String,
    pub investment_thesis: String,
    pub is_public: bool,
}

impl TeaserCenterForm {
    pub fn from_profile(teaser: &TeaserCenter) -> Self {
        Self {
            headline: teaser.headline.clone().unwrap_or_default(),
            highlights: teaser.highlights.join("\n"),
            investment_thesis: teaser.investment_thesis.clone().unwrap_or_default(),
            is_public: teaser.is_public,
        }
    }

    pub fn to_submission(
        &self,
        seller_id: Option<i64>,
        is_draft: bool,
    ) -> Result<TeaserCenterSubmission, ValidationError> {
        let seller_id = seller_id.ok_or(ValidationError::MissingSellerId)?;
        if !is_draft {
            required("headline", &self.headline)?;
        }
        Ok(TeaserCenterSubmission {
            seller_id,
            is_draft,
            headline: self.headline.trim().to_string(),
            highlights: self
                .highlights
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect(),
            investment_thesis: self.investment_thesis.trim().to_string(),
            is_public: self.is_public,
        })
    }
}
