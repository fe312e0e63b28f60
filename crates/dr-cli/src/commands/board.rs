use std::future::Future;
use std::time::Duration;

use chrono::Utc;
use dr_client::ApiClient;
use dr_core::format::{format_close_date, format_deal_value, format_updated};
use dr_core::pipeline::PipelineBoard;
use dr_core::types::Deal;

use super::friendly_error;

/// Run the `board` subcommand: fetch stages and deals and print each column.
/// With `refresh` set the board is reprinted on that interval until Ctrl-C.
pub async fn run(client: &ApiClient, refresh: Option<Duration>) -> anyhow::Result<()> {
    let board = client.load_board().await.map_err(friendly_error)?;
    print!("{}", render(&board));
    let Some(every) = refresh else {
        return Ok(());
    };

    watch(client, every, tokio::signal::ctrl_c()).await
}

/// Reprint the board every `every` until `shutdown` resolves. The shutdown
/// future is polled across ticks and in-progress reloads alike.
async fn watch<F: Future>(client: &ApiClient, every: Duration, shutdown: F) -> anyhow::Result<()> {
    tokio::pin!(shutdown);
    let mut ticker = tokio::time::interval(every);
    ticker.tick().await;
    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = &mut shutdown => return Ok(()),
        }
        tokio::select! {
            loaded = client.load_board() => match loaded {
                Ok(board) => print!("\n{}", render(&board)),
                // Keep watching through transient failures.
                Err(e) => tracing::warn!(error = %e, "board refresh failed"),
            },
            _ = &mut shutdown => return Ok(()),
        }
    }
}

fn card_line(deal: &Deal) -> String {
    let mut line = format!(
        "  #{:<5} {}  {}  {}  {}%  {}",
        deal.id.0,
        deal.name,
        format_deal_value(&deal.estimate),
        deal.priority,
        deal.progress,
        format_close_date(deal.target_close_date),
    );
    if let Some(pic) = &deal.pic {
        line.push_str(&format!("  PIC: {}", pic.name));
    }
    let updated = format_updated(deal.updated_at, Utc::now());
    if !updated.is_empty() {
        line.push_str(&format!("  ({updated})"));
    }
    line
}

pub fn render(board: &PipelineBoard) -> String {
    let mut out = String::new();
    for column in board.columns() {
        out.push_str(&format!(
            "{} [{}] ({})\n",
            column.stage.label,
            column.stage.code,
            column.deals.len()
        ));
        out.push_str(&format!("{}\n", "-".repeat(40)));
        if column.deals.is_empty() {
            out.push_str("  (empty)\n");
        }
        for deal in column.deals {
            out.push_str(&card_line(deal));
            out.push('\n');
        }
        out.push('\n');
    }
    let unassigned = board.unassigned();
    if !unassigned.is_empty() {
        out.push_str(&format!("Unknown stage ({})\n", unassigned.len()));
        for deal in unassigned {
            out.push_str(&format!("{}  [{}]\n", card_line(deal), deal.stage));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use axum::{routing::get, Json, Router};
    use serde_json::json;

    use super::super::test_support::serve;
    use super::*;

    fn app() -> Router {
        Router::new()
            .route(
                "/api/deals/stages",
                get(|| async {
                    Json(json!([
                        {"code": "NDA", "label": "NDA Signed", "position": 1},
                        {"code": "LOI", "label": "Letter of Intent", "position": 2}
                    ]))
                }),
            )
            .route(
                "/api/deals",
                get(|| async {
                    Json(json!([
                        {
                            "id": 1,
                            "name": "Acme Co \u{2013} Globex Inc",
                            "estimated_ev_value": 85000000.0,
                            "estimated_ev_currency": "USD",
                            "priority": "high",
                            "progress_percent": 40,
                            "stage_code": "LOI"
                        },
                        {"id": 2, "name": "Orphan", "stage_code": "GONE"}
                    ]))
                }),
            )
    }

    #[tokio::test]
    async fn board_renders_columns_in_order() {
        let client = serve(app()).await;
        let board = client.load_board().await.unwrap();
        let text = render(&board);

        let nda = text.find("NDA Signed [NDA] (0)").unwrap();
        let loi = text.find("Letter of Intent [LOI] (1)").unwrap();
        assert!(nda < loi);
        assert!(text.contains("~$85M  High  40%  No target date"));
        assert!(text.contains("Unknown stage (1)"));
        assert!(text.contains("[GONE]"));
    }

    #[tokio::test]
    async fn board_command_succeeds() {
        let client = serve(app()).await;
        assert!(run(&client, None).await.is_ok());
    }

    #[tokio::test]
    async fn watch_reprints_until_shutdown() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let app = Router::new()
            .route(
                "/api/deals/stages",
                get(move || {
                    let counter = counter.clone();
                    async move {
                        counter.fetch_add(1, Ordering::SeqCst);
                        Json(json!([{"code": "NDA", "label": "NDA Signed", "position": 1}]))
                    }
                }),
            )
            .route("/api/deals", get(|| async { Json(json!([])) }));
        let client = serve(app).await;

        watch(&client, Duration::from_millis(5), tokio::time::sleep(Duration::from_millis(60)))
            .await
            .unwrap();
        assert!(hits.load(Ordering::SeqCst) >= 2);
    }

    #[tokio::test]
    async fn shutdown_interrupts_a_slow_reload() {
        let app = Router::new().route(
            "/api/deals/stages",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Json(json!([]))
            }),
        );
        let client = serve(app).await;

        let stopped = tokio::time::timeout(
            Duration::from_secs(5),
            watch(&client, Duration::from_millis(1), tokio::time::sleep(Duration::from_millis(50))),
        )
        .await;
        assert!(stopped.expect("watch ends while the reload is pending").is_ok());
    }

    #[tokio::test]
    async fn board_fails_on_api_error() {
        let app = Router::new().route(
            "/api/deals/stages",
            get(|| async { (axum::http::StatusCode::INTERNAL_SERVER_ERROR, "") }),
        );
        let client = serve(app).await;
        let err = run(&client, None).await.unwrap_err();
        assert!(err.to_string().contains("API request failed"));
    }
}
