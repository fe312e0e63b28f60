pub mod board;
pub mod create_deal;
pub mod kpi;
pub mod move_deal;
pub mod seller;

use dr_client::ClientError;

/// Map common client errors to user-friendly messages.
pub fn friendly_error(err: ClientError) -> anyhow::Error {
    if err.is_connect() {
        anyhow::anyhow!(
            "Could not connect to the deal room API. Is it running?\n  \
             (hint: check --api-url or DEALROOM_API_URL)"
        )
    } else if err.is_timeout() {
        anyhow::anyhow!("Request timed out. The API may be overloaded.")
    } else {
        anyhow::anyhow!("API request failed: {err}")
    }
}


#[cfg(test)]
mod tests {
    use std::time::Duration;

    use dr_client::ApiClient;

    use super::*;

    #[tokio::test]
    async fn connect_failures_get_a_hint() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ApiClient::new(&format!("http://{addr}"), Duration::from_secs(2));
        let err = client.fetch_kpis().await.unwrap_err();
        let message = friendly_error(err).to_string();
        assert!(message.contains("Could not connect"));
        assert!(message.contains("--api-url"));
    }
}
