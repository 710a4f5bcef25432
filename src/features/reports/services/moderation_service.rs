use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::reports::dtos::ModerationOutcomeDto;
use crate::features::reports::services::ReportSession;

/// The moderation collaborator: the only writer of a report's verified and
/// resolved state. Both transitions are one-way.
pub struct ModerationService {
    session: Arc<ReportSession>,
}

impl ModerationService {
    pub fn new(session: Arc<ReportSession>) -> Self {
        Self { session }
    }

    pub async fn verify(&self, id: Uuid) -> Result<ModerationOutcomeDto> {
        let mut reports = self.session.write().await;
        let changed = reports.mark_verified(id).ok_or_else(|| not_found(id))?;

        if changed {
            tracing::info!("Report {} verified", id);
        }

        Ok(ModerationOutcomeDto {
            report_id: id,
            verified: true,
            resolved: reports.is_resolved(id),
            changed,
        })
    }

    /// Mark the hazard as no longer active
    pub async fn resolve(&self, id: Uuid) -> Result<ModerationOutcomeDto> {
        let mut reports = self.session.write().await;
        let changed = reports.mark_resolved(id).ok_or_else(|| not_found(id))?;

        if changed {
            tracing::info!("Report {} resolved", id);
        }

        let verified = reports.get(id).is_some_and(|r| r.is_verified());
        Ok(ModerationOutcomeDto {
            report_id: id,
            verified,
            resolved: true,
            changed,
        })
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Report {} not found", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reports::models::ReportCollection;
    use crate::shared::test_helpers::sample_report;

    fn session_with_one() -> (Arc<ReportSession>, Uuid) {
        let report = sample_report("Asha", 13.0827, 80.2707);
        let id = report.id();
        let mut reports = ReportCollection::new();
        reports.append(report).unwrap();
        (Arc::new(ReportSession::with_reports(reports)), id)
    }

    #[tokio::test]
    async fn test_verify_is_one_way() {
        let (session, id) = session_with_one();
        let service = ModerationService::new(Arc::clone(&session));

        let first = service.verify(id).await.unwrap();
        let second = service.verify(id).await.unwrap();

        assert!(first.changed);
        assert!(!second.changed);
        assert!(second.verified);
        assert!(session.read().await.get(id).unwrap().is_verified());
    }

    #[tokio::test]
    async fn test_resolve_keeps_verification() {
        let (session, id) = session_with_one();
        let service = ModerationService::new(Arc::clone(&session));

        service.verify(id).await.unwrap();
        let outcome = service.resolve(id).await.unwrap();

        assert!(outcome.changed);
        assert!(outcome.verified);
        assert!(session.read().await.is_resolved(id));
    }

    #[tokio::test]
    async fn test_unknown_report_is_not_found() {
        let (session, _) = session_with_one();
        let service = ModerationService::new(session);

        assert!(matches!(
            service.verify(Uuid::now_v7()).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.resolve(Uuid::now_v7()).await,
            Err(AppError::NotFound(_))
        ));
    }
}
