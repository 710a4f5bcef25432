use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::features::reports::models::{HazardReport, HazardType, MediaAttachment};
use crate::shared::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Response DTO for a hazard report
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportResponseDto {
    pub id: Uuid,
    pub reporter_name: String,
    pub hazard_type: HazardType,
    /// Human label of the hazard type, e.g. "High Waves"
    pub hazard_label: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub media: Option<MediaInfoDto>,
    pub submitted_at: DateTime<Utc>,
    pub verified: bool,
}

impl From<&HazardReport> for ReportResponseDto {
    fn from(r: &HazardReport) -> Self {
        let location = r.location();
        Self {
            id: r.id(),
            reporter_name: r.reporter_name().to_string(),
            hazard_type: r.hazard_type(),
            hazard_label: r.hazard_type().label().to_string(),
            description: r.description().to_string(),
            latitude: location.latitude,
            longitude: location.longitude,
            media: r.media().map(MediaInfoDto::from),
            submitted_at: r.submitted_at(),
            verified: r.is_verified(),
        }
    }
}

/// Metadata of an attached photo or video (the bytes are never echoed back)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MediaInfoDto {
    pub id: Uuid,
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: u64,
}

impl From<&MediaAttachment> for MediaInfoDto {
    fn from(m: &MediaAttachment) -> Self {
        Self {
            id: m.id(),
            file_name: m.file_name().to_string(),
            content_type: m.content_type().to_string(),
            size_bytes: m.size() as u64,
        }
    }
}

/// Submit report form DTO for OpenAPI documentation
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler reads the multipart fields into a draft session.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct SubmitReportDto {
    #[schema(example = "Asha")]
    pub name: String,
    /// Hazard type key or label
    #[schema(example = "High Waves")]
    pub hazard_type: String,
    /// May be empty when a file is attached
    #[schema(example = "Swell surge over the sea wall")]
    pub description: Option<String>,
    /// Defaults to the device position from `x-device-position` when omitted
    #[schema(example = 13.0827)]
    pub latitude: Option<f64>,
    #[schema(example = 80.2707)]
    pub longitude: Option<f64>,
    /// Optional photo or video
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: Option<String>,
}

/// Result of a moderation action
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ModerationOutcomeDto {
    pub report_id: Uuid,
    pub verified: bool,
    pub resolved: bool,
    /// False when the report was already in the requested state
    pub changed: bool,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

/// Query params for listing reports
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ListReportsQuery {
    /// Only reports filed under this reporter name
    pub reporter: Option<String>,
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,
    /// Number of items per page
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,
}

impl ListReportsQuery {
    /// Saturates for page numbers past the end; such pages are simply empty
    pub fn offset(&self) -> usize {
        let offset = (self.page.max(1) - 1).saturating_mul(self.limit());
        usize::try_from(offset).unwrap_or(usize::MAX)
    }

    pub fn limit(&self) -> i64 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }
}

impl Default for ListReportsQuery {
    fn default() -> Self {
        Self {
            reporter: None,
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: i64, page_size: i64) -> ListReportsQuery {
        ListReportsQuery {
            reporter: None,
            page,
            page_size,
        }
    }

    #[test]
    fn test_offset_and_limit() {
        assert_eq!(query(1, 20).offset(), 0);
        assert_eq!(query(3, 20).offset(), 40);
        assert_eq!(query(0, 20).offset(), 0);
        assert_eq!(query(-5, 20).offset(), 0);
        assert_eq!(query(2, 0).limit(), 1);
        assert_eq!(query(2, 10_000).limit(), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_huge_page_saturates_instead_of_overflowing() {
        let q = query(i64::MAX, MAX_PAGE_SIZE);
        assert_eq!(q.offset(), usize::try_from(i64::MAX).unwrap_or(usize::MAX));
    }
}
