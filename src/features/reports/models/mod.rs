mod hazard_report;
mod media;
mod report_collection;
mod report_draft;

pub use hazard_report::{
    GeoPoint, HazardReport, HazardType, MAX_LATITUDE, MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE,
};
pub use media::{is_media_type_allowed, MediaAttachment, ALLOWED_MEDIA_TYPES};
pub use report_collection::ReportCollection;
pub use report_draft::{DraftField, ReportDraft, UnknownField};
