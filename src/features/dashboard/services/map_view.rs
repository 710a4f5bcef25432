use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::dashboard::services::{HeatLayer, LayerId, MapRenderer};
use crate::features::reports::models::HazardReport;

/// One map pin per report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Marker {
    pub report_id: Uuid,
    pub latitude: f64,
    pub longitude: f64,
    /// Hazard type label, e.g. "Storm Surge"
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HeatPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub weight: f64,
}

/// Heat layer presentation options (pixels). They never change the point set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeatLayerConfig {
    pub radius: u32,
    pub blur: u32,
}

impl Default for HeatLayerConfig {
    fn default() -> Self {
        Self {
            radius: 25,
            blur: 15,
        }
    }
}

/// A single point that cannot be drawn. Skipped, never fatal.
#[derive(Debug, Error)]
#[error("report {report_id} has unrenderable coordinates ({latitude}, {longitude})")]
pub struct RenderingAnomaly {
    pub report_id: Uuid,
    pub latitude: f64,
    pub longitude: f64,
}

pub fn render_markers(reports: &[HazardReport]) -> Vec<Marker> {
    reports
        .iter()
        .map(|r| {
            let location = r.location();
            Marker {
                report_id: r.id(),
                latitude: location.latitude,
                longitude: location.longitude,
                label: r.hazard_type().label().to_string(),
            }
        })
        .collect()
}

/// Lazy heat point sequence over a report slice
pub struct HeatSurface<'a> {
    reports: std::slice::Iter<'a, HazardReport>,
    config: HeatLayerConfig,
}

impl HeatSurface<'_> {
    pub fn config(&self) -> HeatLayerConfig {
        self.config
    }
}

impl Iterator for HeatSurface<'_> {
    type Item = HeatPoint;

    fn next(&mut self) -> Option<HeatPoint> {
        for report in self.reports.by_ref() {
            let location = report.location();
            if !location.is_valid() {
                let anomaly = RenderingAnomaly {
                    report_id: report.id(),
                    latitude: location.latitude,
                    longitude: location.longitude,
                };
                tracing::warn!("Skipping heat point: {}", anomaly);
                continue;
            }
            return Some(HeatPoint {
                latitude: location.latitude,
                longitude: location.longitude,
                weight: 1.0,
            });
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.reports.len()))
    }
}

/// One point of weight 1.0 per drawable report. Nothing is computed until iterated.
pub fn compute_heat_surface(
    reports: &[HazardReport],
    config: HeatLayerConfig,
) -> HeatSurface<'_> {
    HeatSurface {
        reports: reports.iter(),
        config,
    }
}

fn lock<R>(renderer: &Mutex<R>) -> MutexGuard<'_, R> {
    renderer.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Owns one heat layer on a renderer and removes it when dropped
pub struct HeatLayerGuard<R: MapRenderer> {
    renderer: Arc<Mutex<R>>,
    layer: LayerId,
}

impl<R: MapRenderer> HeatLayerGuard<R> {
    pub fn acquire(renderer: &Arc<Mutex<R>>, layer: HeatLayer) -> Self {
        let id = lock(renderer).add_layer(layer);
        tracing::debug!("Heat layer {} added", id.value());
        Self {
            renderer: Arc::clone(renderer),
            layer: id,
        }
    }
}

impl<R: MapRenderer> Drop for HeatLayerGuard<R> {
    fn drop(&mut self) {
        if lock(&self.renderer).remove_layer(self.layer) {
            tracing::debug!("Heat layer {} removed", self.layer.value());
        } else {
            tracing::warn!("Heat layer {} was already gone", self.layer.value());
        }
    }
}

/// A mounted dashboard map. Holds at most one heat layer at a time; the
/// layer goes away with the view.
pub struct HazardMapView<R: MapRenderer> {
    renderer: Arc<Mutex<R>>,
    config: HeatLayerConfig,
    heat_layer: Option<HeatLayerGuard<R>>,
}

impl<R: MapRenderer> HazardMapView<R> {
    pub fn mount(
        renderer: Arc<Mutex<R>>,
        config: HeatLayerConfig,
        reports: &[HazardReport],
    ) -> Self {
        let mut view = Self {
            renderer,
            config,
            heat_layer: None,
        };
        view.render(reports);
        view
    }

    /// Redraw for a new report set. The previous heat layer is released
    /// before the replacement is added.
    pub fn render(&mut self, reports: &[HazardReport]) {
        lock(&self.renderer).set_markers(render_markers(reports));

        let surface = compute_heat_surface(reports, self.config);
        let config = surface.config();
        let points: Vec<HeatPoint> = surface.collect();

        self.heat_layer = None;
        self.heat_layer = Some(HeatLayerGuard::acquire(
            &self.renderer,
            HeatLayer { points, config },
        ));
    }

    pub fn unmount(self) {}
}
