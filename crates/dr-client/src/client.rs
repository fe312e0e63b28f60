//! Async HTTP client for the deal room REST API.

use std::time::Duration;

use async_trait::async_trait;
use dr_api_types::{
    ApiDeal, ApiEmployee, ApiEnvelope, ApiKpi, ApiPartySummary, ApiReferenceItem, ApiSellerAck,
    ApiSellerProfile, ApiStage, CompanyOverviewSubmission, CreateDealRequest,
    FinancialDetailsSubmission, TeaserCenterSubmission, UpdateDealStageRequest,
};
use dr_core::config::ApiConfig;
use dr_core::pipeline::PipelineBoard;
use dr_core::types::{
    Deal, DealId, KpiSnapshot, PickerOption, ReferenceItem, SellerProfile, Stage, StageCode,
};
use dr_telemetry::tracing_setup::{create_child_span, create_operation_span, REQUEST_ID_HEADER};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::Instrument;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("{method} {path}: {source}")]
    Transport {
        method: Method,
        path: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{method} {path}: HTTP {status}")]
    Status {
        method: Method,
        path: String,
        status: u16,
    },
    #[error("{method} {path}: unexpected response body: {message}")]
    Decode {
        method: Method,
        path: String,
        message: String,
    },
}

impl ClientError {
    pub fn is_connect(&self) -> bool {
        matches!(self, ClientError::Transport { source, .. } if source.is_connect())
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ClientError::Transport { source, .. } if source.is_timeout())
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Stage persistence seam
// ---------------------------------------------------------------------------

/// Persists a deal's stage change. Implemented by [`ApiClient`]; tests swap in
/// their own.
#[async_trait]
pub trait StageWriter: Send + Sync {
    async fn update_deal_stage(&self, id: DealId, stage: &StageCode) -> Result<(), ClientError>;
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Reusable async client + base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base: String,
}

impl ApiClient {
    pub fn new(base: &str, timeout: Duration) -> Self {
        let client = match reqwest::Client::builder().timeout(timeout).build() {
            Ok(client) => client,
            Err(e) => {
                tracing::warn!(error = %e, ?timeout, "http client build failed, using defaults without timeout");
                reqwest::Client::new()
            }
        };
        Self {
            client,
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(api: &ApiConfig) -> Self {
        Self::new(&api.base_url, Duration::from_secs(api.timeout_secs))
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    async fn send<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let text = self.send_raw(method.clone(), path, body).await?;
        decode_envelope(method, path, &text)
    }

    async fn send_raw<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<String, ClientError>
    where
        B: Serialize + ?Sized,
    {
        let (span, request_id) = create_operation_span(path);
        async {
            let url = format!("{}{}", self.base, path);
            let mut req = self
                .client
                .request(method.clone(), &url)
                .header("Accept", "application/json")
                .header(REQUEST_ID_HEADER, request_id.as_str());
            if let Some(body) = body {
                req = req.json(body);
            }
            tracing::debug!(%method, path, "api request");

            let transport = |source| ClientError::Transport {
                method: method.clone(),
                path: path.to_string(),
                source,
            };
            let resp = req.send().await.map_err(transport)?;
            let status = resp.status();
            if !status.is_success() {
                tracing::warn!(%method, path, status = status.as_u16(), "api request failed");
                return Err(ClientError::Status {
                    method: method.clone(),
                    path: path.to_string(),
                    status: status.as_u16(),
                });
            }
            resp.text()
                .instrument(create_child_span(&request_id, "read_body"))
                .await
                .map_err(transport)
        }
        .instrument(span)
        .await
    }

    /// Seller writes may answer 204; an empty ack carries `seller_id == 0`.
    async fn send_seller<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<ApiSellerAck, ClientError>
    where
        B: Serialize + ?Sized,
    {
        let text = self.send_raw(method.clone(), path, body).await?;
        if is_empty_body(&text) {
            return Ok(ApiSellerAck::default());
        }
        decode_envelope(method, path, &text)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.send::<(), T>(Method::GET, path, None).await
    }

    // -- Pipeline --

    pub async fn fetch_deals(&self) -> Result<Vec<Deal>, ClientError> {
        let deals: Vec<ApiDeal> = self.get("/api/deals").await?;
        Ok(deals.into_iter().map(Deal::from).collect())
    }

    pub async fn fetch_stages(&self) -> Result<Vec<Stage>, ClientError> {
        let stages: Vec<ApiStage> = self.get("/api/deals/stages").await?;
        Ok(stages.into_iter().map(Stage::from).collect())
    }

    pub async fn fetch_kpis(&self) -> Result<KpiSnapshot, ClientError> {
        let kpi: ApiKpi = self.get("/api/deals/kpis").await?;
        Ok(kpi.into())
    }

    /// Stages and deals fetched concurrently into a fresh board.
    pub async fn load_board(&self) -> Result<PipelineBoard, ClientError> {
        let (stages, deals) = tokio::try_join!(self.fetch_stages(), self.fetch_deals())?;
        tracing::info!(stages = stages.len(), deals = deals.len(), "board loaded");
        Ok(PipelineBoard::new(stages, deals))
    }

    pub async fn create_deal(&self, request: &CreateDealRequest) -> Result<Deal, ClientError> {
        let deal: ApiDeal = self
            .send(Method::POST, "/api/deals", Some(request))
            .await?;
        Ok(deal.into())
    }

    // -- Pickers and reference data --

    pub async fn fetch_buyers(&self) -> Result<Vec<PickerOption>, ClientError> {
        let buyers: Vec<ApiPartySummary> = self.get("/api/buyer").await?;
        Ok(buyers.into_iter().map(PickerOption::from).collect())
    }

    pub async fn fetch_sellers(&self) -> Result<Vec<PickerOption>, ClientError> {
        let sellers: Vec<ApiPartySummary> = self.get("/api/seller").await?;
        Ok(sellers.into_iter().map(PickerOption::from).collect())
    }

    pub async fn fetch_employees(&self) -> Result<Vec<PickerOption>, ClientError> {
        let employees: Vec<ApiEmployee> = self.get("/api/employees").await?;
        Ok(employees.into_iter().map(PickerOption::from).collect())
    }

    async fn fetch_reference(&self, path: &str) -> Result<Vec<ReferenceItem>, ClientError> {
        let items: Vec<ApiReferenceItem> = self.get(path).await?;
        Ok(items.into_iter().map(ReferenceItem::from).collect())
    }

    pub async fn fetch_industries(&self) -> Result<Vec<ReferenceItem>, ClientError> {
        self.fetch_reference("/api/industries").await
    }

    pub async fn fetch_countries(&self) -> Result<Vec<ReferenceItem>, ClientError> {
        self.fetch_reference("/api/countries").await
    }

    pub async fn fetch_currencies(&self) -> Result<Vec<ReferenceItem>, ClientError> {
        self.fetch_reference("/api/currencies").await
    }

    // -- Seller onboarding --

    pub async fn fetch_seller(&self, id: i64) -> Result<SellerProfile, ClientError> {
        let profile: ApiSellerProfile = self.get(&format!("/api/seller/{id}")).await?;
        Ok(profile.into())
    }

    pub async fn submit_company_overview(
        &self,
        body: &CompanyOverviewSubmission,
    ) -> Result<ApiSellerAck, ClientError> {
        self.send_seller(Method::POST, "/api/seller/company-overviews", Some(body))
            .await
    }

    pub async fn submit_financial_details(
        &self,
        body: &FinancialDetailsSubmission,
    ) -> Result<ApiSellerAck, ClientError> {
        self.send_seller(Method::POST, "/api/seller/financial-details", Some(body))
            .await
    }

    pub async fn submit_teaser_center(
        &self,
        body: &TeaserCenterSubmission,
    ) -> Result<ApiSellerAck, ClientError> {
        self.send_seller(Method::POST, "/api/seller/teaser-center", Some(body))
            .await
    }
}

fn is_empty_body(text: &str) -> bool {
    let text = text.trim();
    text.is_empty() || text == "null"
}

fn decode_envelope<T: DeserializeOwned>(method: Method, path: &str, text: &str) -> Result<T, ClientError> {
    // Some write endpoints answer 204 or an empty body.
    let text = if text.trim().is_empty() { "null" } else { text };
    serde_json::from_str::<ApiEnvelope<T>>(text)
        .map(ApiEnvelope::into_inner)
        .map_err(|e| ClientError::Decode {
            method,
            path: path.to_string(),
            message: e.to_string(),
        })
}

#[async_trait]
impl StageWriter for ApiClient {
    async fn update_deal_stage(&self, id: DealId, stage: &StageCode) -> Result<(), ClientError> {
        let body = UpdateDealStageRequest {
            stage_code: stage.as_str().to_string(),
        };
        self.send_raw(Method::PATCH, &format!("/api/deals/{id}/stage"), Some(&body))
            .await
            .map(|_| ())
    }
}
