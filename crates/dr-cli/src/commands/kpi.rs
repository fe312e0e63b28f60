use dr_client::ApiClient;
use dr_core::format::{kpi_cards, KpiCard};

use super::friendly_error;

/// Run the `kpi` subcommand: fetch the snapshot and print the dashboard cards.
pub async fn run(client: &ApiClient) -> anyhow::Result<()> {
    let snapshot = client.fetch_kpis().await.map_err(friendly_error)?;
    print!("{}", render(&kpi_cards(Some(&snapshot), false)));
    Ok(())
}

pub fn render(cards: &[KpiCard]) -> String {
    let width = cards.iter().map(|c| c.label.len()).max().unwrap_or(0);
    cards
        .iter()
        .map(|c| format!("{:<width$}  {:>8}   {}\n", c.label, c.value, c.hint))
        .collect()
}

#[cfg(test)]
mod tests {
    use axum::{routing::get, Json, Router};
    use dr_core::format::PLACEHOLDER;
    use serde_json::json;

    use super::super::test_support::serve;
    use super::*;

    #[test]
    fn renders_one_line_per_card() {
        let text = render(&kpi_cards(None, true));
        assert_eq!(text.lines().count(), 5);
        assert!(text.lines().all(|l| l.contains(PLACEHOLDER)));
    }

    #[tokio::test]
    async fn kpi_command_prints_snapshot() {
        let app = Router::new().route(
            "/api/deals/kpis",
            get(|| async {
                Json(json!({"data": {
                    "expected_transaction_value": 1500000000.0,
                    "active_deals": 3
                }}))
            }),
        );
        let client = serve(app).await;
        let snapshot = client.fetch_kpis().await.unwrap();
        let text = render(&kpi_cards(Some(&snapshot), false));
        assert!(text.starts_with("Expected Transaction Value"));
        assert!(text.contains("$1.5B"));
        assert!(run(&client).await.is_ok());
    }
}
