mod dashboard_service;
mod hotspot_service;
mod map_canvas;
mod map_view;
mod stats_service;

pub use dashboard_service::DashboardService;
pub use hotspot_service::compute_hotspots;
pub use map_canvas::{HeatLayer, LayerId, MapCanvas, MapRenderer};
pub use map_view::{HazardMapView, HeatLayerConfig, HeatPoint, Marker};
pub use stats_service::compute_stats;
