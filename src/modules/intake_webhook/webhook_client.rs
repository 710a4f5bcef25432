use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::features::reports::dtos::ReportResponseDto;

const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("Intake request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Intake endpoint returned status {0}")]
    Status(reqwest::StatusCode),
}

/// HTTP client for the external report-intake endpoint
pub struct IntakeWebhookClient {
    client: Client,
    url: String,
}

impl IntakeWebhookClient {
    pub fn new(url: impl Into<String>) -> Result<Self, WebhookError> {
        let client = Client::builder()
            .user_agent("HazardWatchCore/1.0 (ocean-hazard-reporting)")
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// POST one report as JSON; any non-2xx status is an error
    pub async fn forward(&self, report: &ReportResponseDto) -> Result<(), WebhookError> {
        let response = self.client.post(&self.url).json(report).send().await?;

        if !response.status().is_success() {
            return Err(WebhookError::Status(response.status()));
        }

        debug!("Forwarded report {} to {}", report.id, self.url);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::sample_report;
    use axum::{http::StatusCode, routing::post, Router};

    async fn endpoint_answering(status: StatusCode) -> String {
        let app = Router::new().route("/reports", post(move || async move { status }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/reports", addr)
    }

    #[tokio::test]
    async fn test_forward_accepts_success_status() {
        let url = endpoint_answering(StatusCode::CREATED).await;
        let client = IntakeWebhookClient::new(url).unwrap();
        let report = ReportResponseDto::from(&sample_report("Asha", 13.0827, 80.2707));

        tokio_test::assert_ok!(client.forward(&report).await);
    }

    #[tokio::test]
    async fn test_forward_rejects_error_status() {
        let url = endpoint_answering(StatusCode::SERVICE_UNAVAILABLE).await;
        let client = IntakeWebhookClient::new(url).unwrap();
        let report = ReportResponseDto::from(&sample_report("Asha", 13.0827, 80.2707));

        let err = client.forward(&report).await.unwrap_err();
        assert!(matches!(
            err,
            WebhookError::Status(status) if status == reqwest::StatusCode::SERVICE_UNAVAILABLE
        ));
    }
}
