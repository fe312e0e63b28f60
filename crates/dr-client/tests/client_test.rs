use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use dr_api_types::{
    CompanyOverviewSubmission, CreateDealRequest, FinancialDetailsSubmission, TeaserCenterSubmission,
};
use dr_client::{ApiClient, ClientError};
use dr_core::types::{DealId, StageCode};
use serde_json::{json, Value};

async fn serve(app: Router) -> ApiClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub server");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub server");
    });
    ApiClient::new(&format!("http://{addr}/"), Duration::from_secs(5))
}

fn stages_json() -> Value {
    json!([
        {"code": "LOI", "label": "Letter of Intent", "position": 2},
        {"code": "NDA", "label": "NDA Signed", "position": 1}
    ])
}

fn deals_json() -> Value {
    json!({"data": [
        {
            "id": 1,
            "name": "Acme Co \u{2013} Globex Inc",
            "buyer": {"id": 10, "name": "Acme Co"},
            "seller": {"id": 20, "name": "Globex Inc"},
            "estimated_ev_value": 85000000.0,
            "estimated_ev_currency": "USD",
            "priority": "high",
            "progress_percent": 40,
            "target_close_date": "2025-12-31T00:00:00Z",
            "stage_code": "NDA"
        },
        {"id": 2, "name": "Second", "stage_code": "LOI", "estimated_ev_value": null}
    ]})
}

#[tokio::test]
async fn load_board_accepts_wrapped_and_bare_lists() {
    let app = Router::new()
        .route("/api/deals/stages", get(|| async { Json(stages_json()) }))
        .route("/api/deals", get(|| async { Json(deals_json()) }));
    let client = serve(app).await;

    let board = client.load_board().await.expect("board loads");
    let codes: Vec<&str> = board.stages().iter().map(|s| s.code.as_str()).collect();
    assert_eq!(codes, vec!["NDA", "LOI"]);
    assert_eq!(board.deals().len(), 2);

    let first = board.deal(DealId(1)).expect("deal 1");
    assert_eq!(first.buyer.name, "Acme Co");
    assert_eq!(first.estimate.value, Some(85_000_000.0));
    assert_eq!(first.progress, 40);
    assert!(first.target_close_date.is_some());
    assert_eq!(board.deal(DealId(2)).and_then(|d| d.estimate.value), None);
}

#[tokio::test]
async fn kpis_decode() {
    let app = Router::new().route(
        "/api/deals/kpis",
        get(|| async {
            Json(json!({
                "expected_transaction_value": 1500000000.0,
                "active_deals": 12,
                "late_stage_deals": 4,
                "average_progress": 57.5,
                "velocity_score": 1.25
            }))
        }),
    );
    let client = serve(app).await;
    let kpi = client.fetch_kpis().await.expect("kpis");
    assert_eq!(kpi.active_deals, 12);
    assert_eq!(kpi.velocity_score, 1.25);
}

#[tokio::test]
async fn every_request_carries_a_request_id() {
    let seen: Arc<Mutex<Vec<String>>> = Arc::default();
    let app = Router::new()
        .route(
            "/api/buyer",
            get(
                |State(seen): State<Arc<Mutex<Vec<String>>>>, headers: HeaderMap| async move {
                    if let Some(id) = headers.get("x-request-id").and_then(|v| v.to_str().ok()) {
                        seen.lock().expect("lock").push(id.to_string());
                    }
                    Json(json!([{"id": 1, "company_name": "Acme Co"}]))
                },
            ),
        )
        .with_state(Arc::clone(&seen));
    let client = serve(app).await;

    client.fetch_buyers().await.expect("first call");
    client.fetch_buyers().await.expect("second call");

    let ids = seen.lock().expect("lock").clone();
    assert_eq!(ids.len(), 2);
    assert!(ids.iter().all(|id| id.len() == 32));
    assert_ne!(ids[0], ids[1]);
}

#[tokio::test]
async fn picker_labels_fall_back_to_registered_name() {
    let app = Router::new().route(
        "/api/seller",
        get(|| async {
            Json(json!([
                {"id": 1, "company_name": "Globex Inc"},
                {"id": 2, "company_overview": {"registered_name": "Initech Pte Ltd"}},
                {"id": 3}
            ]))
        }),
    );
    let client = serve(app).await;
    let labels: Vec<String> = client
        .fetch_sellers()
        .await
        .expect("sellers")
        .into_iter()
        .map(|o| o.label)
        .collect();
    assert_eq!(labels, vec!["Globex Inc", "Initech Pte Ltd", "#3"]);
}

#[tokio::test]
async fn server_error_maps_to_status() {
    let app = Router::new().route(
        "/api/employees",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let client = serve(app).await;
    let err = client.fetch_employees().await.expect_err("should fail");
    assert_eq!(err.status(), Some(500));
    assert!(err.to_string().contains("/api/employees"));
}

#[tokio::test]
async fn garbage_body_maps_to_decode() {
    let app = Router::new().route("/api/industries", get(|| async { "<html>oops</html>" }));
    let client = serve(app).await;
    let err = client.fetch_industries().await.expect_err("should fail");
    assert!(matches!(err, ClientError::Decode { .. }));
}

#[tokio::test]
async fn unreachable_server_is_a_connect_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let client = ApiClient::new(&format!("http://{addr}"), Duration::from_secs(2));
    let err = client.fetch_stages().await.expect_err("nothing listening");
    assert!(err.is_connect());
}

#[tokio::test]
async fn create_deal_posts_request_body() {
    let body: Arc<Mutex<Option<Value>>> = Arc::default();
    let app = Router::new()
        .route(
            "/api/deals",
            post(
                |State(body): State<Arc<Mutex<Option<Value>>>>, Json(payload): Json<Value>| async move {
                    *body.lock().expect("lock") = Some(payload);
                    (
                        StatusCode::CREATED,
                        Json(json!({"data": {"id": 77, "name": "Acme Co \u{2013} Globex Inc", "stage_code": "SOURCING"}})),
                    )
                },
            ),
        )
        .with_state(Arc::clone(&body));
    let client = serve(app).await;

    let request = CreateDealRequest {
        buyer_id: 10,
        seller_id: 20,
        name: "Acme Co \u{2013} Globex Inc".into(),
        industry: "Logistics".into(),
        estimated_ev_value: None,
        estimated_ev_currency: "USD".into(),
        priority: "medium".into(),
        pic_user_id: None,
        target_close_date: None,
    };
    let deal = client.create_deal(&request).await.expect("created");
    assert_eq!(deal.id, DealId(77));
    assert_eq!(deal.stage, StageCode::from("SOURCING"));

    let sent = body.lock().expect("lock").clone().expect("body captured");
    assert_eq!(sent["buyer_id"], 10);
    assert_eq!(sent["estimated_ev_value"], Value::Null);
    assert_eq!(sent["pic_user_id"], Value::Null);
}

#[tokio::test]
async fn seller_profile_and_overview_submission() {
    let app = Router::new()
        .route(
            "/api/seller/{id}",
            get(|Path(id): Path<i64>| async move {
                Json(json!({"data": {
                    "id": id,
                    "company_overview": {
                        "registered_name": "Globex Inc",
                        "shareholders": "[{\"name\":\"Founder\",\"percentage\":\"60\"}]"
                    },
                    "teaser_center": {"headline": "Regional freight leader", "highlights": ["Asset light"]}
                }}))
            }),
        )
        .route(
            "/api/seller/company-overviews",
            post(|Json(payload): Json<Value>| async move {
                let draft = payload["is_draft"].as_bool().unwrap_or(false);
                Json(json!({"seller_id": 41, "is_draft": draft}))
            }),
        );
    let client = serve(app).await;

    let profile = client.fetch_seller(41).await.expect("profile");
    assert_eq!(profile.display_name(), "Globex Inc");
    assert_eq!(profile.company_overview.shareholders.len(), 1);
    assert!(profile.financial_details.is_none());
    assert_eq!(
        profile.teaser_center.and_then(|t| t.headline).as_deref(),
        Some("Regional freight leader")
    );

    let submission = CompanyOverviewSubmission {
        seller_id: None,
        is_draft: true,
        registered_name: "Globex Inc".into(),
        industry: String::new(),
        country: String::new(),
        rank: String::new(),
        website: String::new(),
        year_founded: None,
        employee_count: None,
        description: String::new(),
        contacts: Vec::new(),
        shareholders: "[]".into(),
    };
    let ack = client
        .submit_company_overview(&submission)
        .await
        .expect("ack");
    assert_eq!(ack.seller_id, 41);
    assert!(ack.is_draft);
}

#[tokio::test]
async fn empty_seller_acks_are_accepted() {
    let app = Router::new()
        .route(
            "/api/seller/financial-details",
            post(|| async { StatusCode::NO_CONTENT }),
        )
        .route(
            "/api/seller/teaser-center",
            post(|| async { (StatusCode::OK, "null") }),
        );
    let client = serve(app).await;

    let financial = FinancialDetailsSubmission {
        seller_id: 41,
        is_draft: false,
        currency: "USD".into(),
        annual_revenue: Some(1_200_000.0),
        ebitda: None,
        net_profit: None,
        total_assets: None,
        total_liabilities: None,
        asking_price: None,
    };
    let ack = client
        .submit_financial_details(&financial)
        .await
        .expect("204 is a successful save");
    assert_eq!(ack.seller_id, 0);

    let teaser = TeaserCenterSubmission {
        seller_id: 41,
        is_draft: true,
        headline: "Regional freight leader".into(),
        highlights: Vec::new(),
        investment_thesis: String::new(),
        is_public: false,
    };
    let ack = client
        .submit_teaser_center(&teaser)
        .await
        .expect("null body is a successful save");
    assert_eq!(ack.seller_id, 0);
    assert!(!ack.is_draft);
}

#[tokio::test]
async fn configured_timeout_is_enforced() {
    let app = Router::new().route(
        "/api/deals/stages",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!([]))
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub server");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub server");
    });

    let client = ApiClient::new(&format!("http://{addr}"), Duration::from_millis(200));
    let err = client.fetch_stages().await.expect_err("slow server");
    assert!(err.is_timeout());
}

/// Records `(operation, trace_id)` for every `operation` span opened.
#[derive(Clone, Default)]
struct SpanCapture(Arc<Mutex<Vec<(String, String)>>>);

#[derive(Default)]
struct SpanFields {
    operation: String,
    trace_id: String,
}

impl tracing::field::Visit for SpanFields {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        match field.name() {
            "operation" => self.operation = format!("{value:?}"),
            "trace_id" => self.trace_id = format!("{value:?}"),
            _ => {}
        }
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for SpanCapture {
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        if attrs.metadata().name() != "operation" {
            return;
        }
        let mut fields = SpanFields::default();
        attrs.record(&mut fields);
        self.0
            .lock()
            .expect("lock")
            .push((fields.operation, fields.trace_id));
    }
}

#[tokio::test]
async fn body_read_shares_the_request_trace_id() {
    use tracing_subscriber::layer::SubscriberExt;

    let capture = SpanCapture::default();
    let _guard =
        tracing::subscriber::set_default(tracing_subscriber::registry().with(capture.clone()));

    let app = Router::new().route(
        "/api/industries",
        get(|| async { Json(json!([{"id": 1, "name": "Logistics"}])) }),
    );
    let client = serve(app).await;
    client.fetch_industries().await.expect("industries");

    let spans = capture.0.lock().expect("lock").clone();
    let request = spans
        .iter()
        .find(|(op, _)| op == "/api/industries")
        .expect("request span");
    let body = spans
        .iter()
        .find(|(op, _)| op == "read_body")
        .expect("body span");
    assert_eq!(request.1.len(), 32);
    assert_eq!(body.1, request.1);
}
