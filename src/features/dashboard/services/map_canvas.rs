use std::collections::BTreeMap;

use crate::features::dashboard::dtos::{HeatLayerDto, MapDataDto};
use crate::features::dashboard::services::{HeatLayerConfig, HeatPoint, Marker};

/// Handle to a layer added to a map renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerId(u64);

impl LayerId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// A heat overlay as handed to the renderer
#[derive(Debug, Clone)]
pub struct HeatLayer {
    pub points: Vec<HeatPoint>,
    pub config: HeatLayerConfig,
}

/// The map rendering collaborator.
///
/// Every `add_layer` must be paired with exactly one `remove_layer`;
/// `HeatLayerGuard` does the pairing.
pub trait MapRenderer: Send {
    fn set_markers(&mut self, markers: Vec<Marker>);

    fn add_layer(&mut self, layer: HeatLayer) -> LayerId;

    /// Returns false when the layer was not present
    fn remove_layer(&mut self, id: LayerId) -> bool;
}

/// In-process renderer backing the map endpoint
#[derive(Debug, Default)]
pub struct MapCanvas {
    markers: Vec<Marker>,
    layers: BTreeMap<LayerId, HeatLayer>,
    next_layer: u64,
}

impl MapCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> MapDataDto {
        MapDataDto {
            markers: self.markers.clone(),
            heat_layers: self
                .layers
                .iter()
                .map(|(id, layer)| HeatLayerDto {
                    layer_id: id.value(),
                    radius: layer.config.radius,
                    blur: layer.config.blur,
                    points: layer.points.clone(),
                })
                .collect(),
        }
    }
}

impl MapRenderer for MapCanvas {
    fn set_markers(&mut self, markers: Vec<Marker>) {
        self.markers = markers;
    }

    fn add_layer(&mut self, layer: HeatLayer) -> LayerId {
        self.next_layer += 1;
        let id = LayerId(self.next_layer);
        self.layers.insert(id, layer);
        id
    }

    fn remove_layer(&mut self, id: LayerId) -> bool {
        self.layers.remove(&id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layers_get_distinct_ids() {
        let mut canvas = MapCanvas::new();
        let layer = HeatLayer {
            points: vec![],
            config: HeatLayerConfig::default(),
        };

        let first = canvas.add_layer(layer.clone());
        let second = canvas.add_layer(layer);
        assert_ne!(first, second);
        assert_eq!(canvas.snapshot().heat_layers.len(), 2);

        assert!(canvas.remove_layer(first));
        assert!(!canvas.remove_layer(first));
        assert_eq!(canvas.snapshot().heat_layers[0].layer_id, second.value());
    }
}
