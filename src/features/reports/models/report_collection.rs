use std::collections::HashSet;
use thiserror::Error;
use uuid::Uuid;

use crate::features::reports::models::HazardReport;

#[derive(Debug, Error)]
#[error("report {0} already exists")]
pub struct DuplicateReportId(pub Uuid);

/// Reports in arrival order, unique by id.
///
/// Resolution is tracked beside the reports rather than on them so a report
/// stays immutable apart from its verification flag.
#[derive(Debug, Default)]
pub struct ReportCollection {
    reports: Vec<HazardReport>,
    ids: HashSet<Uuid>,
    resolved: HashSet<Uuid>,
}

impl ReportCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, report: HazardReport) -> Result<(), DuplicateReportId> {
        if !self.ids.insert(report.id()) {
            return Err(DuplicateReportId(report.id()));
        }
        self.reports.push(report);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HazardReport> {
        self.reports.iter()
    }

    pub fn as_slice(&self) -> &[HazardReport] {
        &self.reports
    }

    pub fn get(&self, id: Uuid) -> Option<&HazardReport> {
        if !self.ids.contains(&id) {
            return None;
        }
        self.reports.iter().find(|r| r.id() == id)
    }

    /// Reports filed under a reporter name, compared case-insensitively
    pub fn by_reporter<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a HazardReport> {
        let name = name.trim();
        self.reports
            .iter()
            .filter(move |r| r.reporter_name().eq_ignore_ascii_case(name))
    }

    /// Moderation hook. `None` for an unknown id, otherwise whether the flag changed.
    pub fn mark_verified(&mut self, id: Uuid) -> Option<bool> {
        self.reports
            .iter_mut()
            .find(|r| r.id() == id)
            .map(|r| r.mark_verified())
    }

    /// Moderation hook. `None` for an unknown id, otherwise whether the state changed.
    pub fn mark_resolved(&mut self, id: Uuid) -> Option<bool> {
        if !self.ids.contains(&id) {
            return None;
        }
        Some(self.resolved.insert(id))
    }

    pub fn is_resolved(&self, id: Uuid) -> bool {
        self.resolved.contains(&id)
    }
}

impl<'a> IntoIterator for &'a ReportCollection {
    type Item = &'a HazardReport;
    type IntoIter = std::slice::Iter<'a, HazardReport>;

    fn into_iter(self) -> Self::IntoIter {
        self.reports.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::sample_report;

    #[test]
    fn test_append_keeps_arrival_order() {
        let mut collection = ReportCollection::new();
        let first = sample_report("Asha", 13.0827, 80.2707);
        let second = sample_report("Ravi", 9.9312, 76.2673);
        let (first_id, second_id) = (first.id(), second.id());

        collection.append(first).unwrap();
        collection.append(second).unwrap();

        let ids: Vec<Uuid> = collection.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec![first_id, second_id]);
        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn test_append_rejects_duplicate_id() {
        let mut collection = ReportCollection::new();
        let report = sample_report("Asha", 13.0827, 80.2707);
        let id = report.id();
        collection.append(report).unwrap();

        let clash = crate::shared::test_helpers::sample_report_with_id(id, "Ravi", 9.93, 76.26);
        let err = collection.append(clash).unwrap_err();
        assert_eq!(err.0, id);
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.get(id).unwrap().reporter_name(), "Asha");
    }

    #[test]
    fn test_moderation_hooks_are_monotonic() {
        let mut collection = ReportCollection::new();
        let report = sample_report("Asha", 13.0827, 80.2707);
        let id = report.id();
        collection.append(report).unwrap();

        assert_eq!(collection.mark_verified(id), Some(true));
        assert_eq!(collection.mark_verified(id), Some(false));
        assert!(collection.get(id).unwrap().is_verified());

        assert!(!collection.is_resolved(id));
        assert_eq!(collection.mark_resolved(id), Some(true));
        assert_eq!(collection.mark_resolved(id), Some(false));
        assert!(collection.is_resolved(id));

        let unknown = Uuid::now_v7();
        assert_eq!(collection.mark_verified(unknown), None);
        assert_eq!(collection.mark_resolved(unknown), None);
    }

    #[test]
    fn test_by_reporter_ignores_case() {
        let mut collection = ReportCollection::new();
        collection.append(sample_report("Asha", 13.08, 80.27)).unwrap();
        collection.append(sample_report("Ravi", 9.93, 76.26)).unwrap();
        collection.append(sample_report("asha", 19.07, 72.87)).unwrap();

        assert_eq!(collection.by_reporter("ASHA").count(), 2);
        assert_eq!(collection.by_reporter("Meera").count(), 0);
    }
}
