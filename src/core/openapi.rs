use utoipa::{Modify, OpenApi};

use crate::features::dashboard::{dtos as dashboard_dtos, handlers as dashboard_handlers};
use crate::features::dashboard::services::{HeatPoint, Marker};
use crate::features::reports::{
    dtos as reports_dtos, handlers as reports_handlers, models as reports_models,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Reports
        reports_handlers::submit_report,
        reports_handlers::list_reports,
        reports_handlers::get_report,
        // Moderation
        reports_handlers::verify_report,
        reports_handlers::resolve_report,
        // Dashboard (public)
        dashboard_handlers::get_summary,
        dashboard_handlers::get_map,
        dashboard_handlers::get_hotspots,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Reports
            reports_models::HazardType,
            reports_models::GeoPoint,
            reports_dtos::ReportResponseDto,
            reports_dtos::MediaInfoDto,
            reports_dtos::SubmitReportDto,
            ApiResponse<reports_dtos::ReportResponseDto>,
            ApiResponse<Vec<reports_dtos::ReportResponseDto>>,
            // Moderation
            reports_dtos::ModerationOutcomeDto,
            ApiResponse<reports_dtos::ModerationOutcomeDto>,
            // Dashboard
            dashboard_dtos::DashboardStats,
            dashboard_dtos::MapDataDto,
            dashboard_dtos::HeatLayerDto,
            dashboard_dtos::HotspotDto,
            Marker,
            HeatPoint,
            ApiResponse<dashboard_dtos::DashboardStats>,
            ApiResponse<dashboard_dtos::MapDataDto>,
            ApiResponse<Vec<dashboard_dtos::HotspotDto>>,
        )
    ),
    tags(
        (name = "reports", description = "Citizen ocean hazard reports"),
        (name = "moderation", description = "Report verification and resolution"),
        (name = "Dashboard", description = "Public dashboard: counters, map and hotspots"),
    ),
    info(
        title = "HazardWatch API",
        version = "0.1.0",
        description = "API documentation for HazardWatch",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
