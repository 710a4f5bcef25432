use async_trait::async_trait;
use axum::http::HeaderMap;
use thiserror::Error;

use crate::features::reports::models::GeoPoint;
use crate::shared::constants::DEVICE_POSITION_HEADER;

/// The device position could not be obtained; the form falls back to manual entry
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("positioning unavailable: {0}")]
pub struct PositioningUnavailable(pub String);

/// Source of the device's current coordinates
#[async_trait]
pub trait PositionProvider: Send + Sync {
    async fn current_position(&self) -> Result<GeoPoint, PositioningUnavailable>;
}

/// Device position the client reported alongside its request
#[derive(Debug, Clone)]
pub struct DevicePositionHint {
    position: Result<GeoPoint, PositioningUnavailable>,
}

impl DevicePositionHint {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let position = match headers.get(DEVICE_POSITION_HEADER).map(|v| v.to_str()) {
            None => Err(PositioningUnavailable(format!(
                "{} header not sent",
                DEVICE_POSITION_HEADER
            ))),
            Some(Err(_)) => Err(PositioningUnavailable(format!(
                "{} header is not valid text",
                DEVICE_POSITION_HEADER
            ))),
            Some(Ok(raw)) => Self::parse(raw),
        };

        Self { position }
    }

    /// Parses `<lat>,<lon>`
    pub fn parse(raw: &str) -> Result<GeoPoint, PositioningUnavailable> {
        let malformed = || PositioningUnavailable(format!("malformed device position: {}", raw));

        let (lat, lon) = raw.split_once(',').ok_or_else(malformed)?;
        let latitude = lat.trim().parse::<f64>().map_err(|_| malformed())?;
        let longitude = lon.trim().parse::<f64>().map_err(|_| malformed())?;

        let point = GeoPoint::new(latitude, longitude);
        if !point.is_valid() {
            return Err(malformed());
        }
        Ok(point)
    }
}

#[async_trait]
impl PositionProvider for DevicePositionHint {
    async fn current_position(&self) -> Result<GeoPoint, PositioningUnavailable> {
        self.position.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_parse_device_position() {
        let point = DevicePositionHint::parse("13.0827, 80.2707").unwrap();
        assert_eq!(point, GeoPoint::new(13.0827, 80.2707));

        assert!(DevicePositionHint::parse("13.0827").is_err());
        assert!(DevicePositionHint::parse("north,east").is_err());
        assert!(DevicePositionHint::parse("120,80").is_err());
        assert!(DevicePositionHint::parse("NaN,80").is_err());
    }

    #[tokio::test]
    async fn test_hint_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(
            DEVICE_POSITION_HEADER,
            HeaderValue::from_static("9.9312,76.2673"),
        );

        let hint = DevicePositionHint::from_headers(&headers);
        assert_eq!(
            hint.current_position().await,
            Ok(GeoPoint::new(9.9312, 76.2673))
        );

        let missing = DevicePositionHint::from_headers(&HeaderMap::new());
        assert!(missing.current_position().await.is_err());
    }
}
