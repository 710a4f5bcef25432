use chrono::{DateTime, FixedOffset};

use crate::features::dashboard::dtos::DashboardStats;
use crate::features::reports::models::ReportCollection;

/// Pure reduction over the collection. `now` carries the dashboard's offset,
/// which decides where "today" starts.
pub fn compute_stats(reports: &ReportCollection, now: DateTime<FixedOffset>) -> DashboardStats {
    let offset = now.offset();
    let today = now.date_naive();

    reports
        .iter()
        .fold(DashboardStats::default(), |mut stats, report| {
            if report.submitted_at().with_timezone(offset).date_naive() == today {
                stats.reports_today += 1;
            }
            if !reports.is_resolved(report.id()) {
                stats.active_hazards += 1;
            }
            if report.is_verified() {
                stats.verified_reports += 1;
            }
            stats
        })
}
