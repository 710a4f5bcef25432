use axum::{
    extract::{Multipart, Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::core::config::IntakeConfig;
use crate::core::error::{AppError, Result};
use crate::features::reports::dtos::{ListReportsQuery, ReportResponseDto, SubmitReportDto};
use crate::features::reports::models::{
    is_media_type_allowed, MediaAttachment, ALLOWED_MEDIA_TYPES,
};
use crate::features::reports::services::{
    DevicePositionHint, DraftSession, IntakeService, ModerationService, ReportService,
};
use crate::shared::types::{ApiResponse, Meta};

/// State for report handlers
#[derive(Clone)]
pub struct ReportState {
    pub intake: Arc<IntakeService>,
    pub report_service: Arc<ReportService>,
    pub moderation_service: Arc<ModerationService>,
    pub config: IntakeConfig,
}

/// Submit a hazard report
///
/// Accepts multipart/form-data with:
/// - `name`, `hazard_type`, `description`, `latitude`, `longitude`: form fields
/// - `file`: optional photo or video
///
/// Blank coordinates are filled from the `x-device-position` header when it is sent.
#[utoipa::path(
    post,
    path = "/api/reports",
    tag = "reports",
    params(
        (
            "x-device-position" = Option<String>,
            Header,
            description = "Device position as `<lat>,<lon>`"
        )
    ),
    request_body(
        content = SubmitReportDto,
        content_type = "multipart/form-data",
        description = "Report form with an optional photo or video",
    ),
    responses(
        (status = 201, description = "Report submitted", body = ApiResponse<ReportResponseDto>),
        (status = 400, description = "Validation failed or media rejected"),
        (status = 413, description = "Request too large")
    )
)]
pub async fn submit_report(
    State(state): State<ReportState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<ReportResponseDto>>)> {
    let mut session = DraftSession::mount(Arc::new(DevicePositionHint::from_headers(&headers)));

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        if field_name == "file" {
            let content_type = field
                .content_type()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "application/octet-stream".to_string());
            let file_name = field
                .file_name()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "unnamed".to_string());

            let data = field.bytes().await.map_err(|e| {
                debug!("Failed to read file bytes: {}", e);
                AppError::BadRequest(format!("Failed to read file data: {}", e))
            })?;

            // Browsers send an empty part when no file was picked
            if data.is_empty() {
                continue;
            }

            if data.len() > state.config.max_media_size {
                return Err(AppError::BadRequest(format!(
                    "File too large. Maximum size is {} bytes ({} MB)",
                    state.config.max_media_size,
                    state.config.max_media_size / 1024 / 1024
                )));
            }

            if !is_media_type_allowed(&content_type) {
                return Err(AppError::BadRequest(format!(
                    "File type '{}' is not allowed. Allowed types: {}",
                    content_type,
                    ALLOWED_MEDIA_TYPES.join(", ")
                )));
            }

            session.attach_media(MediaAttachment::new(file_name, content_type, data.to_vec()));
            continue;
        }

        let text = field.text().await.map_err(|e| {
            AppError::BadRequest(format!("Failed to read {} field: {}", field_name, e))
        })?;

        // Untouched inputs arrive blank and must not clear a captured position
        if text.trim().is_empty() {
            continue;
        }

        if let Err(e) = session.update_field(&field_name, text) {
            debug!("Ignoring form field: {}", e);
        }
    }

    if session.coordinates_missing()
        && !session
            .wait_for_location(state.config.positioning_timeout)
            .await
    {
        debug!("Device position did not arrive in time");
    }

    let report = session.submit(&state.intake).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(report), None, None)),
    ))
}

/// List submitted reports
#[utoipa::path(
    get,
    path = "/api/reports",
    tag = "reports",
    params(ListReportsQuery),
    responses(
        (
            status = 200,
            description = "Paginated reports in arrival order",
            body = ApiResponse<Vec<ReportResponseDto>>
        )
    )
)]
pub async fn list_reports(
    State(state): State<ReportState>,
    Query(query): Query<ListReportsQuery>,
) -> Result<Json<ApiResponse<Vec<ReportResponseDto>>>> {
    let (reports, total) = state.report_service.list(&query).await?;
    Ok(Json(ApiResponse::success(
        Some(reports),
        None,
        Some(Meta { total }),
    )))
}

/// Get report by ID
#[utoipa::path(
    get,
    path = "/api/reports/{id}",
    tag = "reports",
    params(
        ("id" = Uuid, Path, description = "Report ID")
    ),
    responses(
        (status = 200, description = "Report found", body = ApiResponse<ReportResponseDto>),
        (status = 404, description = "Report not found")
    )
)]
pub async fn get_report(
    State(state): State<ReportState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    let report = state.report_service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(report), None, None)))
}

#[cfg(test)]
mod tests {
    use crate::features::reports::services::ReportSession;
    use crate::shared::constants::DEVICE_POSITION_HEADER;
    use crate::shared::test_helpers::create_test_app;
    use axum::http::{HeaderName, HeaderValue, StatusCode};
    use axum_test::multipart::{MultipartForm, Part};
    use axum_test::TestServer;
    use serde_json::Value;
    use std::sync::Arc;

    fn server() -> (TestServer, Arc<ReportSession>) {
        let session = Arc::new(ReportSession::new());
        let server = TestServer::new(create_test_app(Arc::clone(&session))).unwrap();
        (server, session)
    }

    fn asha_form() -> MultipartForm {
        MultipartForm::new()
            .add_text("name", "Asha")
            .add_text("hazard_type", "High Waves")
            .add_text("description", "Swell surge")
    }

    #[tokio::test]
    async fn test_submit_report_returns_created_report() {
        let (server, session) = server();

        let response = server
            .post("/api/reports")
            .multipart(
                asha_form()
                    .add_text("latitude", "13.0827")
                    .add_text("longitude", "80.2707"),
            )
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["hazard_type"], "high_waves");
        assert_eq!(body["data"]["hazard_label"], "High Waves");
        assert_eq!(body["data"]["verified"], false);
        assert_eq!(session.read().await.len(), 1);
    }

    #[tokio::test]
    async fn test_submit_out_of_range_latitude_is_rejected() {
        let (server, session) = server();

        let response = server
            .post("/api/reports")
            .multipart(
                asha_form()
                    .add_text("latitude", "120")
                    .add_text("longitude", "80.2707"),
            )
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(
            body["errors"],
            serde_json::json!(["latitude: latitude must be between -90 and 90"])
        );
        assert!(session.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_device_position_fills_blank_coordinates() {
        let (server, _) = server();

        let response = server
            .post("/api/reports")
            .add_header(
                HeaderName::from_static(DEVICE_POSITION_HEADER),
                HeaderValue::from_static("9.9312,76.2673"),
            )
            .multipart(asha_form().add_text("latitude", "").add_text("longitude", ""))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["data"]["latitude"], 9.9312);
        assert_eq!(body["data"]["longitude"], 76.2673);
    }

    #[tokio::test]
    async fn test_device_position_does_not_complete_half_typed_pair() {
        let (server, session) = server();

        let response = server
            .post("/api/reports")
            .add_header(
                HeaderName::from_static(DEVICE_POSITION_HEADER),
                HeaderValue::from_static("-33.9,151.2"),
            )
            .multipart(asha_form().add_text("latitude", "13.0827").add_text("longitude", ""))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(
            body["errors"],
            serde_json::json!(["longitude: longitude is required"])
        );
        assert!(session.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_photo_stands_in_for_description() {
        let (server, _) = server();
        let form = MultipartForm::new()
            .add_text("name", "Ravi")
            .add_text("hazard_type", "coastal_flooding")
            .add_text("latitude", "19.076")
            .add_text("longitude", "72.8777")
            .add_part(
                "file",
                Part::bytes(vec![0xFF, 0xD8, 0xFF, 0xE0])
                    .file_name("flood.jpg")
                    .mime_type("image/jpeg"),
            );

        let response = server.post("/api/reports").multipart(form).await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["data"]["media"]["file_name"], "flood.jpg");
        assert_eq!(body["data"]["media"]["size_bytes"], 4);
    }

    #[tokio::test]
    async fn test_disallowed_media_type_is_rejected() {
        let (server, session) = server();
        let form = asha_form()
            .add_text("latitude", "13.0827")
            .add_text("longitude", "80.2707")
            .add_part(
                "file",
                Part::bytes(b"MZ".to_vec())
                    .file_name("payload.exe")
                    .mime_type("application/x-msdownload"),
            );

        let response = server.post("/api/reports").multipart(form).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(session.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_list_and_get_reports() {
        let (server, _) = server();
        for name in ["Asha", "Ravi"] {
            let form = MultipartForm::new()
                .add_text("name", name)
                .add_text("hazard_type", "tsunami")
                .add_text("description", "Receding sea")
                .add_text("latitude", "13.0827")
                .add_text("longitude", "80.2707");
            server
                .post("/api/reports")
                .multipart(form)
                .await
                .assert_status(StatusCode::CREATED);
        }

        let list = server
            .get("/api/reports")
            .add_query_param("reporter", "ravi")
            .await;
        list.assert_status_ok();
        let body: Value = list.json();
        assert_eq!(body["meta"]["total"], 1);
        let id = body["data"][0]["id"].as_str().unwrap().to_string();

        let detail = server.get(&format!("/api/reports/{}", id)).await;
        detail.assert_status_ok();
        let body: Value = detail.json();
        assert_eq!(body["data"]["reporter_name"], "Ravi");

        server
            .get(&format!("/api/reports/{}", uuid::Uuid::now_v7()))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_with_huge_page_number_is_empty() {
        let (server, _) = server();
        server
            .post("/api/reports")
            .multipart(
                asha_form()
                    .add_text("latitude", "13.0827")
                    .add_text("longitude", "80.2707"),
            )
            .await
            .assert_status(StatusCode::CREATED);

        let response = server
            .get("/api/reports")
            .add_query_param("page", i64::MAX)
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["meta"]["total"], 1);
        assert_eq!(body["data"], serde_json::json!([]));
    }
}
