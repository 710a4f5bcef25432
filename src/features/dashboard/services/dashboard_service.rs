use std::sync::{Arc, Mutex};

use crate::core::config::DashboardConfig;
use crate::core::error::{AppError, Result};
use crate::features::dashboard::dtos::{DashboardStats, HotspotDto, MapDataDto, MapQueryParams};
use crate::features::dashboard::services::{
    compute_hotspots, compute_stats, HazardMapView, HeatLayerConfig, MapCanvas,
};
use crate::features::reports::services::ReportSession;
use crate::shared::clock::Clock;

/// Service for public dashboard queries
pub struct DashboardService {
    session: Arc<ReportSession>,
    clock: Arc<dyn Clock>,
    config: DashboardConfig,
}

impl DashboardService {
    pub fn new(
        session: Arc<ReportSession>,
        clock: Arc<dyn Clock>,
        config: DashboardConfig,
    ) -> Self {
        Self {
            session,
            clock,
            config,
        }
    }

    // ========================================================================
    // Summary
    // ========================================================================

    pub async fn get_summary(&self) -> Result<DashboardStats> {
        let now = self.clock.now().with_timezone(&self.config.utc_offset);
        let reports = self.session.read().await;
        Ok(compute_stats(&reports, now))
    }

    // ========================================================================
    // Map
    // ========================================================================

    /// Mount a view on a fresh canvas, capture what it drew, then unmount
    pub async fn get_map(&self, params: &MapQueryParams) -> Result<MapDataDto> {
        let config = HeatLayerConfig {
            radius: params.radius.unwrap_or(self.config.heat_radius_px),
            blur: params.blur.unwrap_or(self.config.heat_blur_px),
        };
        if config.radius == 0 {
            return Err(AppError::BadRequest("radius must be at least 1".to_string()));
        }

        let canvas = Arc::new(Mutex::new(MapCanvas::new()));
        let reports = self.session.read().await;

        let view = HazardMapView::mount(Arc::clone(&canvas), config, reports.as_slice());
        let snapshot = canvas
            .lock()
            .map_err(|_| AppError::Internal("map canvas lock poisoned".to_string()))?
            .snapshot();
        view.unmount();

        Ok(snapshot)
    }

    // ========================================================================
    // Hotspots
    // ========================================================================

    pub async fn get_hotspots(&self) -> Result<Vec<HotspotDto>> {
        let reports = self.session.read().await;
        Ok(compute_hotspots(&reports))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reports::models::ReportCollection;
    use crate::shared::test_helpers::{sample_report, FixedClock};
    use tokio_test::assert_ok;

    fn service(reports: ReportCollection) -> DashboardService {
        DashboardService::new(
            Arc::new(ReportSession::with_reports(reports)),
            Arc::new(FixedClock::default()),
            DashboardConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_empty_dashboard() {
        let service = service(ReportCollection::new());

        assert_eq!(assert_ok!(service.get_summary().await), DashboardStats::default());
        let map = assert_ok!(service.get_map(&MapQueryParams::default()).await);
        assert!(map.markers.is_empty());
        assert_eq!(map.heat_layers.len(), 1);
        assert!(map.heat_layers[0].points.is_empty());
        assert!(assert_ok!(service.get_hotspots().await).is_empty());
    }

    #[tokio::test]
    async fn test_map_uses_configured_and_requested_heat_options() {
        let mut reports = ReportCollection::new();
        reports.append(sample_report("Asha", 13.0827, 80.2707)).unwrap();
        reports.append(sample_report("Ravi", 9.9312, 76.2673)).unwrap();
        let service = service(reports);

        let map = assert_ok!(service.get_map(&MapQueryParams::default()).await);
        assert_eq!(map.markers.len(), 2);
        assert_eq!((map.heat_layers[0].radius, map.heat_layers[0].blur), (25, 15));
        assert_eq!(map.heat_layers[0].points.len(), 2);

        let params = MapQueryParams {
            radius: Some(40),
            blur: None,
        };
        let map = assert_ok!(service.get_map(&params).await);
        assert_eq!((map.heat_layers[0].radius, map.heat_layers[0].blur), (40, 15));
    }

    #[tokio::test]
    async fn test_zero_radius_is_rejected() {
        let service = service(ReportCollection::new());
        let params = MapQueryParams {
            radius: Some(0),
            blur: None,
        };
        assert!(matches!(
            service.get_map(&params).await,
            Err(AppError::BadRequest(_))
        ));
    }
}
