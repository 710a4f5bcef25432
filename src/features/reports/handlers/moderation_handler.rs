use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::reports::dtos::ModerationOutcomeDto;
use crate::features::reports::handlers::ReportState;
use crate::shared::types::ApiResponse;

/// Mark a report as verified (one-way)
#[utoipa::path(
    post,
    path = "/api/moderation/reports/{id}/verify",
    tag = "moderation",
    params(
        ("id" = Uuid, Path, description = "Report ID")
    ),
    responses(
        (status = 200, description = "Report verified", body = ApiResponse<ModerationOutcomeDto>),
        (status = 404, description = "Report not found")
    )
)]
pub async fn verify_report(
    State(state): State<ReportState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ModerationOutcomeDto>>> {
    let outcome = state.moderation_service.verify(id).await?;
    Ok(Json(ApiResponse::success(Some(outcome), None, None)))
}

/// Mark a report's hazard as resolved so it no longer counts as active
#[utoipa::path(
    post,
    path = "/api/moderation/reports/{id}/resolve",
    tag = "moderation",
    params(
        ("id" = Uuid, Path, description = "Report ID")
    ),
    responses(
        (status = 200, description = "Report resolved", body = ApiResponse<ModerationOutcomeDto>),
        (status = 404, description = "Report not found")
    )
)]
pub async fn resolve_report(
    State(state): State<ReportState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ModerationOutcomeDto>>> {
    let outcome = state.moderation_service.resolve(id).await?;
    Ok(Json(ApiResponse::success(Some(outcome), None, None)))
}
