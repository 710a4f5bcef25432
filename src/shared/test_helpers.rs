use async_trait::async_trait;
use axum::Router;
use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;
use tokio::sync::{Mutex, Notify};
use uuid::Uuid;

use crate::core::config::{DashboardConfig, IntakeConfig};
use crate::features::dashboard::{routes as dashboard_routes, DashboardService};
use crate::features::reports::models::{GeoPoint, HazardReport, HazardType, ReportDraft};
use crate::features::reports::routes as reports_routes;
use crate::features::reports::services::{
    CollectionSink, IntakeService, ModerationService, PositionProvider, PositioningUnavailable,
    ReportService, ReportSession, SubmissionSink,
};
use crate::shared::clock::Clock;

/// Clock pinned to 2025-01-15 06:30 UTC
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Default for FixedClock {
    fn default() -> Self {
        Self(Utc.with_ymd_and_hms(2025, 1, 15, 6, 30, 0).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Sink that only remembers which report ids it received
#[derive(Debug, Default)]
pub struct RecordingSink {
    received: Mutex<Vec<Uuid>>,
}

impl RecordingSink {
    pub async fn reports(&self) -> Vec<Uuid> {
        self.received.lock().await.clone()
    }
}

#[async_trait]
impl SubmissionSink for RecordingSink {
    async fn deliver(&self, report: HazardReport) {
        self.received.lock().await.push(report.id());
    }
}

/// Device without any positioning capability
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPositioning;

#[async_trait]
impl PositionProvider for NoPositioning {
    async fn current_position(&self) -> Result<GeoPoint, PositioningUnavailable> {
        Err(PositioningUnavailable("no positioning capability".to_string()))
    }
}

/// Position provider that answers immediately or once a gate is opened
pub struct DelayedPosition {
    position: GeoPoint,
    gate: Option<Arc<Notify>>,
}

impl DelayedPosition {
    pub fn immediate(position: GeoPoint) -> Self {
        Self {
            position,
            gate: None,
        }
    }

    pub fn gated(position: GeoPoint, gate: Arc<Notify>) -> Self {
        Self {
            position,
            gate: Some(gate),
        }
    }
}

#[async_trait]
impl PositionProvider for DelayedPosition {
    async fn current_position(&self) -> Result<GeoPoint, PositioningUnavailable> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        Ok(self.position)
    }
}

pub fn filled_draft(
    name: &str,
    hazard_type: &str,
    description: &str,
    latitude: &str,
    longitude: &str,
) -> ReportDraft {
    ReportDraft {
        reporter_name: name.to_string(),
        hazard_type: hazard_type.to_string(),
        description: description.to_string(),
        latitude: latitude.to_string(),
        longitude: longitude.to_string(),
        media: None,
    }
}

pub fn report_at(
    hazard_type: HazardType,
    description: &str,
    latitude: f64,
    longitude: f64,
    submitted_at: DateTime<Utc>,
) -> HazardReport {
    HazardReport::new(
        Uuid::now_v7(),
        "Asha".to_string(),
        hazard_type,
        description.to_string(),
        GeoPoint::new(latitude, longitude),
        None,
        submitted_at,
    )
}

pub fn sample_report_with_id(id: Uuid, name: &str, latitude: f64, longitude: f64) -> HazardReport {
    HazardReport::new(
        id,
        name.to_string(),
        HazardType::HighWaves,
        "Swell surge".to_string(),
        GeoPoint::new(latitude, longitude),
        None,
        FixedClock::default().now(),
    )
}

pub fn sample_report(name: &str, latitude: f64, longitude: f64) -> HazardReport {
    sample_report_with_id(Uuid::now_v7(), name, latitude, longitude)
}

/// Report and dashboard routes over one shared session, wired the way
/// `main` wires them but with a fixed clock and no forwarding
pub fn create_test_app(session: Arc<ReportSession>) -> Router {
    let clock: Arc<dyn Clock> = Arc::new(FixedClock::default());
    let sink: Arc<dyn SubmissionSink> = Arc::new(CollectionSink::new(Arc::clone(&session)));

    let intake = Arc::new(IntakeService::new(sink, Arc::clone(&clock)));
    let report_service = Arc::new(ReportService::new(Arc::clone(&session)));
    let moderation_service = Arc::new(ModerationService::new(Arc::clone(&session)));
    let dashboard_service = Arc::new(DashboardService::new(
        session,
        clock,
        DashboardConfig::default(),
    ));

    Router::new()
        .merge(reports_routes::routes(
            intake,
            report_service,
            moderation_service,
            IntakeConfig::default(),
        ))
        .merge(dashboard_routes::routes(dashboard_service))
}
