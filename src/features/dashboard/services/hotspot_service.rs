use std::collections::BTreeMap;

use crate::features::dashboard::dtos::HotspotDto;
use crate::features::reports::models::ReportCollection;
use crate::shared::constants::HOTSPOT_CELL_DEGREES;
use crate::shared::validation::{HIGH_URGENCY_REGEX, MEDIUM_URGENCY_REGEX};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl Urgency {
    /// Keyword classification of a report description
    pub fn classify(description: &str) -> Self {
        if HIGH_URGENCY_REGEX.is_match(description) {
            Urgency::High
        } else if MEDIUM_URGENCY_REGEX.is_match(description) {
            Urgency::Medium
        } else {
            Urgency::Low
        }
    }

    pub fn weight(&self) -> u32 {
        match self {
            Urgency::High => 3,
            Urgency::Medium => 2,
            Urgency::Low => 1,
        }
    }
}

fn cell_index(degrees: f64) -> i64 {
    (degrees / HOTSPOT_CELL_DEGREES).round() as i64
}

/// Sum urgency weights per grid cell and keep the cells heavier than one
/// low-urgency report, heaviest first
pub fn compute_hotspots(reports: &ReportCollection) -> Vec<HotspotDto> {
    if reports.is_empty() {
        return Vec::new();
    }

    let mut cells: BTreeMap<(i64, i64), (u32, u32)> = BTreeMap::new();

    for report in reports {
        let location = report.location();
        if !location.is_valid() {
            continue;
        }
        let cell = cells
            .entry((cell_index(location.latitude), cell_index(location.longitude)))
            .or_default();
        cell.0 += Urgency::classify(report.description()).weight();
        cell.1 += 1;
    }

    let mut hotspots: Vec<_> = cells
        .into_iter()
        .filter(|(_, (weight, _))| *weight > 1)
        .collect();
    // Stable sort keeps the BTreeMap's cell order among equal weights
    hotspots.sort_by(|(_, (a, _)), (_, (b, _))| b.cmp(a));

    hotspots
        .into_iter()
        .map(|((lat, lon), (weight, report_count))| HotspotDto {
            latitude: lat as f64 * HOTSPOT_CELL_DEGREES,
            longitude: lon as f64 * HOTSPOT_CELL_DEGREES,
            weight,
            report_count,
        })
        .collect()
}
