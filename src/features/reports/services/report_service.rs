use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::reports::dtos::{ListReportsQuery, ReportResponseDto};
use crate::features::reports::services::ReportSession;

/// Read access to submitted reports
pub struct ReportService {
    session: Arc<ReportSession>,
}

impl ReportService {
    pub fn new(session: Arc<ReportSession>) -> Self {
        Self { session }
    }

    /// List reports in arrival order, optionally filtered by reporter.
    /// Returns the page plus the total number of matching reports.
    pub async fn list(&self, query: &ListReportsQuery) -> Result<(Vec<ReportResponseDto>, i64)> {
        let reports = self.session.read().await;

        let matching: Vec<_> = match query.reporter.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => reports.by_reporter(name).collect(),
            _ => reports.iter().collect(),
        };

        let total = matching.len() as i64;
        let page = matching
            .into_iter()
            .skip(query.offset())
            .take(query.limit() as usize)
            .map(ReportResponseDto::from)
            .collect();

        Ok((page, total))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<ReportResponseDto> {
        let reports = self.session.read().await;
        reports
            .get(id)
            .map(ReportResponseDto::from)
            .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))
    }
}
