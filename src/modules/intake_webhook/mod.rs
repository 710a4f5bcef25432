//! Outbound delivery of submitted reports
//!
//! Forwards report payloads to an external report-intake endpoint
//! configured with `REPORT_SINK_URL`.

mod webhook_client;

pub use webhook_client::IntakeWebhookClient;
