use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::core::config::IntakeConfig;
use crate::features::reports::handlers::{self, ReportState};
use crate::features::reports::services::{IntakeService, ModerationService, ReportService};

/// Create routes for report intake, browsing and moderation
pub fn routes(
    intake: Arc<IntakeService>,
    report_service: Arc<ReportService>,
    moderation_service: Arc<ModerationService>,
    config: IntakeConfig,
) -> Router {
    // Media limit plus a buffer for the form fields and multipart overhead
    let body_limit = config.max_media_size + 1024 * 1024;

    let state = ReportState {
        intake,
        report_service,
        moderation_service,
        config,
    };

    Router::new()
        .route(
            "/api/reports",
            post(handlers::submit_report)
                .layer(DefaultBodyLimit::max(body_limit))
                .get(handlers::list_reports),
        )
        .route("/api/reports/{id}", get(handlers::get_report))
        .route(
            "/api/moderation/reports/{id}/verify",
            post(handlers::verify_report),
        )
        .route(
            "/api/moderation/reports/{id}/resolve",
            post(handlers::resolve_report),
        )
        .with_state(state)
}
