//! Map defaults and the tunable [`MapParams`] resource.
//!
//! The constants mirror the values the locator shipped with (Nairobi CBD,
//! street-level zoom, OSM raster tiles). `MapParams` carries the same values
//! at runtime so a host can override them from JSON without recompiling.

use std::fmt;
use std::time::Duration;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::geo::LatLng;

/// Initial map center: Moi Avenue, Nairobi.
pub const DEFAULT_CENTER: LatLng = LatLng::new(-1.284722, 36.824444);
/// Initial zoom level.
pub const DEFAULT_ZOOM: u8 = 15;
/// Zoom used when recentering on the user's position.
pub const LOCATE_ZOOM: u8 = 17;
/// Highest zoom the tile provider serves.
pub const MAX_ZOOM: u8 = 19;
/// Raster tile template. `{s}` rotates through [`TILE_SUBDOMAINS`].
pub const TILE_URL_TEMPLATE: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const TILE_SUBDOMAINS: &[&str] = &["a", "b", "c"];
pub const TILE_ATTRIBUTION: &str = "© OpenStreetMap contributors";
/// Give up on a locate request the device never answers.
pub const LOCATE_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_LOCATE_TIMEOUT_SECS: f64 = 3600.0;

/// Runtime map parameters. Defaults match the constants above.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapParams {
    pub center: LatLng,
    pub zoom: u8,
    pub locate_zoom: u8,
    pub tile_url_template: String,
    pub tile_subdomains: Vec<String>,
    pub attribution: String,
    /// Seconds before an unanswered locate request fails with a timeout.
    pub locate_timeout_secs: f64,
}

impl Default for MapParams {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            locate_zoom: LOCATE_ZOOM,
            tile_url_template: TILE_URL_TEMPLATE.to_string(),
            tile_subdomains: TILE_SUBDOMAINS.iter().map(|s| s.to_string()).collect(),
            attribution: TILE_ATTRIBUTION.to_string(),
            locate_timeout_secs: LOCATE_TIMEOUT.as_secs_f64(),
        }
    }
}

impl MapParams {
    /// Parse overrides from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ParamsError> {
        let params: MapParams =
            serde_json::from_str(json).map_err(|e| ParamsError::Parse(e.to_string()))?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), ParamsError> {
        if !self.center.is_valid() {
            return Err(ParamsError::Invalid(format!(
                "center {} is not a valid position",
                self.center
            )));
        }
        if self.zoom > MAX_ZOOM || self.locate_zoom > MAX_ZOOM {
            return Err(ParamsError::Invalid(format!(
                "zoom levels must be <= {MAX_ZOOM}"
            )));
        }
        if !(self.locate_timeout_secs > 0.0 && self.locate_timeout_secs <= MAX_LOCATE_TIMEOUT_SECS)
        {
            return Err(ParamsError::Invalid(format!(
                "locate_timeout_secs must be in (0, {MAX_LOCATE_TIMEOUT_SECS}]"
            )));
        }
        Ok(())
    }

    /// Falls back to [`LOCATE_TIMEOUT`] for values `validate` would reject.
    pub fn locate_timeout(&self) -> Duration {
        match Duration::try_from_secs_f64(self.locate_timeout_secs) {
            Ok(timeout) if !timeout.is_zero() => timeout,
            _ => LOCATE_TIMEOUT,
        }
    }
}

/// Errors from loading [`MapParams`].
#[derive(Debug, Clone, PartialEq)]
pub enum ParamsError {
    /// The JSON could not be parsed.
    Parse(String),
    /// The JSON parsed but a value is out of range.
    Invalid(String),
}

impl fmt::Display for ParamsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamsError::Parse(msg) => write!(f, "Map params parse error: {msg}"),
            ParamsError::Invalid(msg) => write!(f, "Invalid map params: {msg}"),
        }
    }
}

impl std::error::Error for ParamsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let params = MapParams::default();
        assert_eq!(params.center, DEFAULT_CENTER);
        assert_eq!(params.zoom, 15);
        assert_eq!(params.locate_zoom, 17);
        assert_eq!(params.locate_timeout(), LOCATE_TIMEOUT);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let params = MapParams::from_json(r#"{ "zoom": 13 }"#).expect("valid json");
        assert_eq!(params.zoom, 13);
        assert_eq!(params.locate_zoom, LOCATE_ZOOM);
        assert_eq!(params.tile_url_template, TILE_URL_TEMPLATE);
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = MapParams::from_json("{ zoom: ").unwrap_err();
        assert!(matches!(err, ParamsError::Parse(_)));
    }

    #[test]
    fn test_out_of_range_zoom_rejected() {
        let err = MapParams::from_json(r#"{ "locate_zoom": 25 }"#).unwrap_err();
        assert!(matches!(err, ParamsError::Invalid(_)));
        assert!(format!("{err}").contains("zoom"), "got: {err}");
    }

    #[test]
    fn test_non_positive_timeout_rejected() {
        let err = MapParams::from_json(r#"{ "locate_timeout_secs": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ParamsError::Invalid(_)));
    }

    #[test]
    fn test_unvalidated_timeout_falls_back() {
        let params = MapParams {
            locate_timeout_secs: f64::NAN,
            ..MapParams::default()
        };
        assert!(params.validate().is_err());
        assert_eq!(params.locate_timeout(), LOCATE_TIMEOUT);

        let params = MapParams {
            locate_timeout_secs: 2.5,
            ..MapParams::default()
        };
        assert_eq!(params.locate_timeout(), Duration::from_millis(2500));
    }

    #[test]
    fn test_center_override() {
        let params =
            MapParams::from_json(r#"{ "center": { "lat": 51.5, "lng": -0.12 } }"#).expect("json");
        assert_eq!(params.center, LatLng::new(51.5, -0.12));
    }
}
