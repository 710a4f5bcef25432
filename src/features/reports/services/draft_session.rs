use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::features::reports::dtos::ReportResponseDto;
use crate::features::reports::models::{MediaAttachment, ReportDraft, UnknownField};
use crate::features::reports::services::{
    validate_draft, IntakeService, PositionProvider, ValidationError,
};

fn lock(draft: &Mutex<ReportDraft>) -> MutexGuard<'_, ReportDraft> {
    draft.lock().unwrap_or_else(PoisonError::into_inner)
}

/// One mounted report form: the draft being edited plus its pending
/// location capture.
///
/// The capture task only holds a weak handle to the draft and is aborted
/// when the session is dropped, so a position that arrives after unmount is
/// discarded.
pub struct DraftSession {
    draft: Arc<Mutex<ReportDraft>>,
    capture: Option<JoinHandle<()>>,
    location_settled: Option<oneshot::Receiver<()>>,
}

impl DraftSession {
    /// Mount an empty form and start capturing the device location
    pub fn mount(provider: Arc<dyn PositionProvider>) -> Self {
        let mut session = Self {
            draft: Arc::new(Mutex::new(ReportDraft::default())),
            capture: None,
            location_settled: None,
        };
        session.capture_location(provider);
        session
    }

    /// One-shot, no retry. Never blocks editing or submission.
    fn capture_location(&mut self, provider: Arc<dyn PositionProvider>) {
        let draft = Arc::downgrade(&self.draft);
        let (settled_tx, settled_rx) = oneshot::channel();

        let handle = tokio::spawn(async move {
            match provider.current_position().await {
                Ok(position) => match draft.upgrade() {
                    Some(draft) => {
                        if lock(&draft).prefill_location(position) {
                            tracing::debug!(
                                "Prefilled draft location with ({}, {})",
                                position.latitude,
                                position.longitude
                            );
                        }
                    }
                    None => tracing::debug!("Draft unmounted before position arrived"),
                },
                Err(e) => tracing::debug!("{}; coordinates left for manual entry", e),
            }
            let _ = settled_tx.send(());
        });

        self.capture = Some(handle);
        self.location_settled = Some(settled_rx);
    }

    pub fn update_field(&self, name: &str, value: impl Into<String>) -> Result<(), UnknownField> {
        lock(&self.draft).update_field(name, value)
    }

    /// Replaces (and releases) any earlier attachment
    pub fn attach_media(&self, media: MediaAttachment) {
        if let Some(previous) = lock(&self.draft).attach_media(media) {
            tracing::debug!("Replaced attachment {}", previous.file_name());
        }
    }

    pub fn coordinates_missing(&self) -> bool {
        lock(&self.draft).coordinates_missing()
    }

    /// Wait (bounded) for the location capture to finish; returns whether it did
    pub async fn wait_for_location(&mut self, timeout: Duration) -> bool {
        match self.location_settled.take() {
            Some(settled) => tokio::time::timeout(timeout, settled).await.is_ok(),
            None => true,
        }
    }

    /// Validate the draft and hand the report to intake.
    ///
    /// On success the form resets to empty defaults; the location capture
    /// is not started again. On failure the draft is left as typed.
    pub async fn submit(
        &self,
        intake: &IntakeService,
    ) -> Result<ReportResponseDto, ValidationError> {
        let submitted = {
            let mut draft = lock(&self.draft);
            validate_draft(&draft)?;
            std::mem::take(&mut *draft)
        };

        intake.submit(submitted).await
    }
}

impl Drop for DraftSession {
    fn drop(&mut self) {
        if let Some(capture) = self.capture.take() {
            capture.abort();
        }
    }
}
