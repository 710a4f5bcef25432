use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::core::error::AppError;
use crate::features::dashboard::dtos::*;
use crate::features::dashboard::services::DashboardService;
use crate::shared::types::{ApiResponse, Meta};

/// Get dashboard counters
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Dashboard counters", body = ApiResponse<DashboardStats>)
    )
)]
pub async fn get_summary(
    State(service): State<Arc<DashboardService>>,
) -> Result<Json<ApiResponse<DashboardStats>>, AppError> {
    let stats = service.get_summary().await?;
    Ok(Json(ApiResponse::success(Some(stats), None, None)))
}

/// Get report markers and the heat layer
#[utoipa::path(
    get,
    path = "/api/dashboard/map",
    tag = "Dashboard",
    params(MapQueryParams),
    responses(
        (status = 200, description = "Markers and heat layer", body = ApiResponse<MapDataDto>),
        (status = 400, description = "Invalid heat layer options")
    )
)]
pub async fn get_map(
    State(service): State<Arc<DashboardService>>,
    Query(params): Query<MapQueryParams>,
) -> Result<Json<ApiResponse<MapDataDto>>, AppError> {
    let data = service.get_map(&params).await?;
    Ok(Json(ApiResponse::success(Some(data), None, None)))
}

/// Get grid cells with concentrated or urgent reports
#[utoipa::path(
    get,
    path = "/api/dashboard/hotspots",
    tag = "Dashboard",
    responses(
        (
            status = 200,
            description = "Hotspot cells, heaviest first",
            body = ApiResponse<Vec<HotspotDto>>
        )
    )
)]
pub async fn get_hotspots(
    State(service): State<Arc<DashboardService>>,
) -> Result<Json<ApiResponse<Vec<HotspotDto>>>, AppError> {
    let hotspots = service.get_hotspots().await?;
    let total = hotspots.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(hotspots),
        None,
        Some(Meta { total }),
    )))
}
