use serde::Serialize;
use thiserror::Error;

use crate::features::reports::models::{GeoPoint, MediaAttachment};

/// Form fields of a report draft, in the order the form shows them
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftField {
    ReporterName,
    HazardType,
    Description,
    Latitude,
    Longitude,
}

impl DraftField {
    pub fn key(&self) -> &'static str {
        match self {
            DraftField::ReporterName => "reporter_name",
            DraftField::HazardType => "hazard_type",
            DraftField::Description => "description",
            DraftField::Latitude => "latitude",
            DraftField::Longitude => "longitude",
        }
    }

    /// Resolves a form or API field name; the short and camelCase spellings
    /// used by the web form are accepted too
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "reporter_name" | "reporterName" | "name" => Some(DraftField::ReporterName),
            "hazard_type" | "hazardType" => Some(DraftField::HazardType),
            "description" => Some(DraftField::Description),
            "latitude" | "lat" => Some(DraftField::Latitude),
            "longitude" | "lon" | "lng" => Some(DraftField::Longitude),
            _ => None,
        }
    }
}

impl std::fmt::Display for DraftField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown form field: {0}")]
pub struct UnknownField(pub String);

/// Values typed into the report form, kept as entered until submission
#[derive(Debug, Default)]
pub struct ReportDraft {
    pub reporter_name: String,
    pub hazard_type: String,
    pub description: String,
    pub latitude: String,
    pub longitude: String,
    pub media: Option<MediaAttachment>,
}

impl ReportDraft {
    pub fn update_field(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), UnknownField> {
        let field = DraftField::from_name(name).ok_or_else(|| UnknownField(name.to_string()))?;
        let value = value.into();
        match field {
            DraftField::ReporterName => self.reporter_name = value,
            DraftField::HazardType => self.hazard_type = value,
            DraftField::Description => self.description = value,
            DraftField::Latitude => self.latitude = value,
            DraftField::Longitude => self.longitude = value,
        }
        Ok(())
    }

    /// Returns the attachment it replaced, if any
    pub fn attach_media(&mut self, media: MediaAttachment) -> Option<MediaAttachment> {
        self.media.replace(media)
    }

    /// Fills the coordinates from a captured position, but only when both
    /// are blank. A half-typed pair is left for the user to finish.
    pub fn prefill_location(&mut self, position: GeoPoint) -> bool {
        if !self.latitude.trim().is_empty() || !self.longitude.trim().is_empty() {
            return false;
        }
        self.latitude = position.latitude.to_string();
        self.longitude = position.longitude.to_string();
        true
    }

    pub fn coordinates_missing(&self) -> bool {
        self.latitude.trim().is_empty() || self.longitude.trim().is_empty()
    }
}
