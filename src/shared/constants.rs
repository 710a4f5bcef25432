/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

/// Header carrying the device position reported by the client, as `<lat>,<lon>`
pub const DEVICE_POSITION_HEADER: &str = "x-device-position";

/// Edge length (degrees) of the grid cells hotspots are aggregated into
pub const HOTSPOT_CELL_DEGREES: f64 = 0.02;
