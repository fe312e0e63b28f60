//! Browser fetch helpers for the deal room REST API.
//!
//! Every helper returns `Result<T, String>`; the string is shown verbatim in
//! an error toast.

use dr_api_types::{
    ApiDeal, ApiEmployee, ApiEnvelope, ApiKpi, ApiPartySummary, ApiReferenceItem, ApiSellerAck,
    ApiSellerProfile, ApiStage, CompanyOverviewSubmission, CreateDealRequest,
    FinancialDetailsSubmission, TeaserCenterSubmission, UpdateDealStageRequest,
};
use dr_core::types::{
    Deal, DealId, KpiSnapshot, PickerOption, ReferenceItem, SellerProfile, Stage, StageCode,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

pub const API_BASE: &str = "http://localhost:8000";

// ── Generic fetch helpers ──

async fn request_text<B: Serialize + ?Sized>(
    method: &str,
    path: &str,
    body: Option<&B>,
) -> Result<String, String> {
    let opts = RequestInit::new();
    opts.set_method(method);
    if let Some(body) = body {
        let body_str = serde_json::to_string(body).map_err(|e| format!("{method} {path}: {e}"))?;
        opts.set_body(&JsValue::from_str(&body_str));
    }

    let url = format!("{API_BASE}{path}");
    let request = Request::new_with_str_and_init(&url, &opts).map_err(|e| format!("{:?}", e))?;
    let headers = request.headers();
    headers
        .set("Accept", "application/json")
        .map_err(|e| format!("{:?}", e))?;
    headers
        .set("x-request-id", &uuid::Uuid::new_v4().as_simple().to_string())
        .map_err(|e| format!("{:?}", e))?;
    if body.is_some() {
        headers
            .set("Content-Type", "application/json")
            .map_err(|e| format!("{:?}", e))?;
    }

    let window = web_sys::window().ok_or("no global window")?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| format!("{method} {path}: network error {:?}", e))?;
    let resp: Response = resp_value.dyn_into().map_err(|e| format!("{:?}", e))?;
    if !resp.ok() {
        return Err(format!("{method} {path}: HTTP {}", resp.status()));
    }

    let text = JsFuture::from(resp.text().map_err(|e| format!("{:?}", e))?)
        .await
        .map_err(|e| format!("{:?}", e))?;
    Ok(text.as_string().unwrap_or_default())
}

async fn request_json<B: Serialize + ?Sized, T: DeserializeOwned>(
    method: &str,
    path: &str,
    body: Option<&B>,
) -> Result<T, String> {
    let text = request_text(method, path, body).await?;
    decode_envelope(method, path, &text)
}

fn decode_envelope<T: DeserializeOwned>(method: &str, path: &str, text: &str) -> Result<T, String> {
    let text = if text.trim().is_empty() { "null" } else { text };
    serde_json::from_str::<ApiEnvelope<T>>(text)
        .map(ApiEnvelope::into_inner)
        .map_err(|e| format!("{method} {path} parse: {e}"))
}

async fn fetch_json<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    request_json::<(), T>("GET", path, None).await
}

// ── Pipeline ──

pub async fn fetch_deals() -> Result<Vec<Deal>, String> {
    let deals: Vec<ApiDeal> = fetch_json("/api/deals").await?;
    Ok(deals.into_iter().map(Deal::from).collect())
}

pub async fn fetch_stages() -> Result<Vec<Stage>, String> {
    let stages: Vec<ApiStage> = fetch_json("/api/deals/stages").await?;
    Ok(stages.into_iter().map(Stage::from).collect())
}

pub async fn fetch_kpis() -> Result<KpiSnapshot, String> {
    let kpi: ApiKpi = fetch_json("/api/deals/kpis").await?;
    Ok(kpi.into())
}

pub async fn create_deal(request: &CreateDealRequest) -> Result<Deal, String> {
    let deal: ApiDeal = request_json("POST", "/api/deals", Some(request)).await?;
    Ok(deal.into())
}

pub async fn update_deal_stage(id: DealId, stage: &StageCode) -> Result<(), String> {
    let body = UpdateDealStageRequest {
        stage_code: stage.as_str().to_string(),
    };
    request_text("PATCH", &format!("/api/deals/{id}/stage"), Some(&body))
        .await
        .map(|_| ())
}

// ── Pickers and reference data ──

pub async fn fetch_buyers() -> Result<Vec<PickerOption>, String> {
    let buyers: Vec<ApiPartySummary> = fetch_json("/api/buyer").await?;
    Ok(buyers.into_iter().map(PickerOption::from).collect())
}

pub async fn fetch_sellers() -> Result<Vec<PickerOption>, String> {
    let sellers: Vec<ApiPartySummary> = fetch_json("/api/seller").await?;
    Ok(sellers.into_iter().map(PickerOption::from).collect())
}

pub async fn fetch_employees() -> Result<Vec<PickerOption>, String> {
    let employees: Vec<ApiEmployee> = fetch_json("/api/employees").await?;
    Ok(employees.into_iter().map(PickerOption::from).collect())
}

async fn fetch_reference(path: &str) -> Result<Vec<ReferenceItem>, String> {
    let items: Vec<ApiReferenceItem> = fetch_json(path).await?;
    Ok(items.into_iter().map(ReferenceItem::from).collect())
}

pub async fn fetch_industries() -> Result<Vec<ReferenceItem>, String> {
    fetch_reference("/api/industries").await
}

pub async fn fetch_countries() -> Result<Vec<ReferenceItem>, String> {
    fetch_reference("/api/countries").await
}

pub async fn fetch_currencies() -> Result<Vec<ReferenceItem>, String> {
    fetch_reference("/api/currencies").await
}

// ── Seller onboarding ──

pub async fn fetch_seller(id: i64) -> Result<SellerProfile, String> {
    let profile: ApiSellerProfile = fetch_json(&format!("/api/seller/{id}")).await?;
    Ok(profile.into())
}

/// An empty 2xx answer decodes as `null`; the ack then carries no seller id.
async fn submit_seller<B: Serialize + ?Sized>(path: &str, body: &B) -> Result<ApiSellerAck, String> {
    let text = request_text("POST", path, Some(body)).await?;
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(ApiSellerAck::default());
    }
    decode_envelope("POST", path, trimmed)
}

pub async fn submit_company_overview(
    body: &CompanyOverviewSubmission,
) -> Result<ApiSellerAck, String> {
    submit_seller("/api/seller/company-overviews", body).await
}

pub async fn submit_financial_details(
    body: &FinancialDetailsSubmission,
) -> Result<ApiSellerAck, String> {
    submit_seller("/api/seller/financial-details", body).await
}

pub async fn submit_teaser_center(body: &TeaserCenterSubmission) -> Result<ApiSellerAck, String> {
    submit_seller("/api/seller/teaser-center", body).await
}
