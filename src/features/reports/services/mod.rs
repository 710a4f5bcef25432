mod draft_session;
mod intake_service;
mod moderation_service;
mod positioning;
mod report_service;
mod report_session;
mod submission_sink;

pub use draft_session::DraftSession;
pub use intake_service::{validate_draft, IntakeService, ValidationError};
pub use moderation_service::ModerationService;
pub use positioning::{DevicePositionHint, PositionProvider};
#[cfg(test)]
pub use positioning::PositioningUnavailable;
pub use report_service::ReportService;
pub use report_session::ReportSession;
pub use submission_sink::{CollectionSink, ForwardingSink, SubmissionSink};
