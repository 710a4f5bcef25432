use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::dashboard::services::{HeatPoint, Marker};

// ============================================================================
// Summary
// ============================================================================

/// Counters shown in the dashboard header. Derived on every request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DashboardStats {
    /// Reports submitted on the current calendar day (dashboard time zone)
    pub reports_today: u64,
    /// Reports not yet resolved by moderation
    pub active_hazards: u64,
    pub verified_reports: u64,
}

// ============================================================================
// Map
// ============================================================================

/// Heat layer presentation overrides; omitted values use the configured defaults
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct MapQueryParams {
    /// Visual spread of each point in pixels
    #[param(minimum = 1, maximum = 200)]
    pub radius: Option<u32>,
    /// Visual softness in pixels
    #[param(minimum = 0, maximum = 200)]
    pub blur: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HeatLayerDto {
    pub layer_id: u64,
    pub radius: u32,
    pub blur: u32,
    pub points: Vec<HeatPoint>,
}

/// Everything currently drawn on the map
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MapDataDto {
    pub markers: Vec<Marker>,
    pub heat_layers: Vec<HeatLayerDto>,
}

// ============================================================================
// Hotspots
// ============================================================================

/// A grid cell whose reports add up to more than a single low-urgency report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HotspotDto {
    /// Cell center latitude
    pub latitude: f64,
    /// Cell center longitude
    pub longitude: f64,
    /// Sum of urgency weights (high 3, medium 2, low 1)
    pub weight: u32,
    pub report_count: u32,
}
