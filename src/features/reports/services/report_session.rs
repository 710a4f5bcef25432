use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::features::reports::models::ReportCollection;

/// Owner of the report collection for the lifetime of one running application.
///
/// Created empty at startup (and per test); every service that touches
/// reports shares this one instance through an `Arc`.
#[derive(Debug, Default)]
pub struct ReportSession {
    reports: RwLock<ReportCollection>,
}

impl ReportSession {
    pub fn new() -> Self {
        Self {
            reports: RwLock::new(ReportCollection::new()),
        }
    }

    #[cfg(test)]
    pub fn with_reports(reports: ReportCollection) -> Self {
        Self {
            reports: RwLock::new(reports),
        }
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, ReportCollection> {
        self.reports.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, ReportCollection> {
        self.reports.write().await
    }
}
