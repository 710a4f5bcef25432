use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

use crate::features::reports::dtos::ReportResponseDto;
use crate::features::reports::models::{
    DraftField, GeoPoint, HazardReport, HazardType, MediaAttachment, ReportDraft, MAX_LATITUDE,
    MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE,
};
use crate::features::reports::services::SubmissionSink;
use crate::shared::clock::Clock;

/// One rejected form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: DraftField,
    pub message: String,
}

/// A draft was refused; holds one entry per offending field, in form order
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("report failed validation on: {}", join_fields(.errors))]
pub struct ValidationError {
    errors: Vec<FieldError>,
}

impl ValidationError {
    #[cfg(test)]
    pub fn fields(&self) -> Vec<DraftField> {
        self.errors.iter().map(|e| e.field).collect()
    }

    /// `"field: message"` lines for API responses
    pub fn messages(&self) -> Vec<String> {
        self.errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect()
    }
}

fn join_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.field.key())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Validate)]
struct SubmissionCandidate {
    #[validate(length(min = 1, message = "reporter name is required"))]
    reporter_name: String,
    #[validate(required(message = "hazard type is required"))]
    hazard_type: Option<HazardType>,
    #[validate(
        required(message = "latitude is required"),
        range(
            min = MIN_LATITUDE,
            max = MAX_LATITUDE,
            message = "latitude must be between -90 and 90"
        )
    )]
    latitude: Option<f64>,
    #[validate(
        required(message = "longitude is required"),
        range(
            min = MIN_LONGITUDE,
            max = MAX_LONGITUDE,
            message = "longitude must be between -180 and 180"
        )
    )]
    longitude: Option<f64>,
}

/// Fields of a draft that passed validation, ready to become a report
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedFields {
    pub reporter_name: String,
    pub hazard_type: HazardType,
    pub description: String,
    pub location: GeoPoint,
}

fn parse_coordinate(
    raw: &str,
    field: DraftField,
    errors: &mut BTreeMap<DraftField, String>,
) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            errors.insert(field, format!("{} must be a number", field));
            None
        }
    }
}

/// Checks a draft without touching it.
///
/// Parse failures are reported first so a malformed number is not also
/// reported as missing.
pub fn validate_draft(draft: &ReportDraft) -> Result<ValidatedFields, ValidationError> {
    let mut errors: BTreeMap<DraftField, String> = BTreeMap::new();

    let hazard_type = if draft.hazard_type.trim().is_empty() {
        None
    } else {
        match draft.hazard_type.parse::<HazardType>() {
            Ok(t) => Some(t),
            Err(e) => {
                errors.insert(DraftField::HazardType, e.to_string());
                None
            }
        }
    };

    let candidate = SubmissionCandidate {
        reporter_name: draft.reporter_name.trim().to_string(),
        hazard_type,
        latitude: parse_coordinate(&draft.latitude, DraftField::Latitude, &mut errors),
        longitude: parse_coordinate(&draft.longitude, DraftField::Longitude, &mut errors),
    };

    if let Err(validation) = candidate.validate() {
        for (name, field_errors) in validation.field_errors() {
            let Some(field) = DraftField::from_name(&name) else {
                continue;
            };
            let message = field_errors
                .first()
                .and_then(|e| e.message.as_ref())
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{} is invalid", field));
            errors.entry(field).or_insert(message);
        }
    }

    let description = draft.description.trim().to_string();
    if description.is_empty() && draft.media.is_none() {
        errors.insert(
            DraftField::Description,
            "description is required unless a photo or video is attached".to_string(),
        );
    }

    match (candidate.hazard_type, candidate.latitude, candidate.longitude) {
        (Some(hazard_type), Some(latitude), Some(longitude)) if errors.is_empty() => {
            Ok(ValidatedFields {
                reporter_name: candidate.reporter_name,
                hazard_type,
                description,
                location: GeoPoint::new(latitude, longitude),
            })
        }
        _ => Err(ValidationError {
            errors: errors
                .into_iter()
                .map(|(field, message)| FieldError { field, message })
                .collect(),
        }),
    }
}

/// Turns validated drafts into reports and hands them to the submission sink
pub struct IntakeService {
    sink: Arc<dyn SubmissionSink>,
    clock: Arc<dyn Clock>,
}

impl IntakeService {
    pub fn new(sink: Arc<dyn SubmissionSink>, clock: Arc<dyn Clock>) -> Self {
        Self { sink, clock }
    }

    /// Validate and submit a draft. Nothing reaches the sink on failure.
    pub async fn submit(&self, draft: ReportDraft) -> Result<ReportResponseDto, ValidationError> {
        let fields = validate_draft(&draft)?;
        Ok(self.dispatch(fields, draft.media).await)
    }

    /// Build the report (fresh id, submitted now, unverified) and deliver it
    async fn dispatch(
        &self,
        fields: ValidatedFields,
        media: Option<MediaAttachment>,
    ) -> ReportResponseDto {
        let report = HazardReport::new(
            Uuid::now_v7(),
            fields.reporter_name,
            fields.hazard_type,
            fields.description,
            fields.location,
            media,
            self.clock.now(),
        );
        let receipt = ReportResponseDto::from(&report);

        tracing::info!(
            "Report submitted: {} ({}) at ({}, {})",
            receipt.id,
            receipt.hazard_label,
            receipt.latitude,
            receipt.longitude
        );

        self.sink.deliver(report).await;
        receipt
    }
}
