use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::reports::models::MediaAttachment;

pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

/// Kind of ocean hazard a citizen observed
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum HazardType {
    HighWaves,
    StormSurge,
    AbnormalTide,
    CoastalFlooding,
    Tsunami,
    Other,
}

impl HazardType {
    pub const ALL: [HazardType; 6] = [
        HazardType::HighWaves,
        HazardType::StormSurge,
        HazardType::AbnormalTide,
        HazardType::CoastalFlooding,
        HazardType::Tsunami,
        HazardType::Other,
    ];

    /// Stable key used on the wire
    pub fn key(&self) -> &'static str {
        match self {
            HazardType::HighWaves => "high_waves",
            HazardType::StormSurge => "storm_surge",
            HazardType::AbnormalTide => "abnormal_tide",
            HazardType::CoastalFlooding => "coastal_flooding",
            HazardType::Tsunami => "tsunami",
            HazardType::Other => "other",
        }
    }

    /// Human label shown on map markers and in the report form
    pub fn label(&self) -> &'static str {
        match self {
            HazardType::HighWaves => "High Waves",
            HazardType::StormSurge => "Storm Surge",
            HazardType::AbnormalTide => "Abnormal Tide",
            HazardType::CoastalFlooding => "Coastal Flooding",
            HazardType::Tsunami => "Tsunami",
            HazardType::Other => "Other",
        }
    }
}

impl std::fmt::Display for HazardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown hazard type: {0}")]
pub struct UnknownHazardType(pub String);

impl FromStr for HazardType {
    type Err = UnknownHazardType;

    /// Accepts the wire key ("storm_surge") or the label ("Storm Surge"), ignoring case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");

        HazardType::ALL
            .into_iter()
            .find(|t| t.key() == normalized)
            .ok_or_else(|| UnknownHazardType(s.to_string()))
    }
}

/// WGS84 coordinate pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Finite and within the latitude/longitude ranges
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (MIN_LATITUDE..=MAX_LATITUDE).contains(&self.latitude)
            && (MIN_LONGITUDE..=MAX_LONGITUDE).contains(&self.longitude)
    }
}

/// A single citizen-submitted hazard observation.
///
/// Everything is fixed at construction except `verified`, which only a
/// moderation collaborator can raise and which never goes back to false.
#[derive(Debug)]
pub struct HazardReport {
    id: Uuid,
    reporter_name: String,
    hazard_type: HazardType,
    description: String,
    location: GeoPoint,
    media: Option<MediaAttachment>,
    submitted_at: DateTime<Utc>,
    verified: bool,
}

impl HazardReport {
    pub(crate) fn new(
        id: Uuid,
        reporter_name: String,
        hazard_type: HazardType,
        description: String,
        location: GeoPoint,
        media: Option<MediaAttachment>,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            reporter_name,
            hazard_type,
            description,
            location,
            media,
            submitted_at,
            verified: false,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn reporter_name(&self) -> &str {
        &self.reporter_name
    }

    pub fn hazard_type(&self) -> HazardType {
        self.hazard_type
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn location(&self) -> GeoPoint {
        self.location
    }

    pub fn media(&self) -> Option<&MediaAttachment> {
        self.media.as_ref()
    }

    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    pub fn is_verified(&self) -> bool {
        self.verified
    }

    /// Returns true when this call changed the flag
    pub(crate) fn mark_verified(&mut self) -> bool {
        let changed = !self.verified;
        self.verified = true;
        changed
    }
}
