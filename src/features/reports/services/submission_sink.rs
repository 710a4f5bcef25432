use async_trait::async_trait;
use std::sync::Arc;

use crate::features::reports::dtos::ReportResponseDto;
use crate::features::reports::models::HazardReport;
use crate::features::reports::services::ReportSession;
use crate::modules::intake_webhook::IntakeWebhookClient;

/// Receives finished reports. Fire-and-forget: delivery problems are the
/// sink's to log, never the submitter's to handle.
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    async fn deliver(&self, report: HazardReport);
}

/// Appends reports to the application's report collection
pub struct CollectionSink {
    session: Arc<ReportSession>,
}

impl CollectionSink {
    pub fn new(session: Arc<ReportSession>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl SubmissionSink for CollectionSink {
    async fn deliver(&self, report: HazardReport) {
        let id = report.id();
        let mut reports = self.session.write().await;
        match reports.append(report) {
            Ok(()) => {
                tracing::debug!("Report {} added to collection ({} total)", id, reports.len())
            }
            Err(e) => tracing::error!("Dropping report: {}", e),
        }
    }
}

/// Forwards a copy of every report to an external intake endpoint, then
/// hands the report to the wrapped sink
pub struct ForwardingSink<S> {
    inner: S,
    webhook: Arc<IntakeWebhookClient>,
}

impl<S: SubmissionSink> ForwardingSink<S> {
    pub fn new(inner: S, webhook: Arc<IntakeWebhookClient>) -> Self {
        Self { inner, webhook }
    }
}

#[async_trait]
impl<S: SubmissionSink> SubmissionSink for ForwardingSink<S> {
    async fn deliver(&self, report: HazardReport) {
        let payload = ReportResponseDto::from(&report);
        let webhook = Arc::clone(&self.webhook);

        tokio::spawn(async move {
            if let Err(e) = webhook.forward(&payload).await {
                tracing::warn!("Failed to forward report {}: {}", payload.id, e);
            }
        });

        self.inner.deliver(report).await;
    }
}
