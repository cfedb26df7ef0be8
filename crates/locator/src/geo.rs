//! Geographic primitives shared by the registry, the map and geolocation.
//!
//! Positions are WGS84 degrees. Distances use the haversine formula on a
//! spherical earth, which is well within a metre at city scale.

use serde::{Deserialize, Serialize};

/// Mean earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Web-mercator latitude limit; tiles do not exist beyond it.
pub const MAX_MERCATOR_LAT: f64 = 85.051_128_78;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// True when both components are finite and inside the valid degree range.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// Great-circle distance to `other` in kilometres.
    pub fn distance_km(&self, other: &LatLng) -> f64 {
        let phi1 = self.lat.to_radians();
        let phi2 = other.lat.to_radians();
        let d_phi = (other.lat - self.lat).to_radians();
        let d_lambda = (other.lng - self.lng).to_radians();

        let a = (d_phi / 2.0).sin().powi(2)
            + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_KM * c
    }

    /// Offset this position by a number of metres north and east.
    ///
    /// Flat-earth approximation, only meant for small offsets (jitter, tests).
    pub fn offset_m(&self, north_m: f64, east_m: f64) -> LatLng {
        let d_lat = north_m / 1000.0 / EARTH_RADIUS_KM;
        let d_lng = east_m / 1000.0 / (EARTH_RADIUS_KM * self.lat.to_radians().cos());
        LatLng {
            lat: self.lat + d_lat.to_degrees(),
            lng: self.lng + d_lng.to_degrees(),
        }
    }
}

impl std::fmt::Display for LatLng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}

/// Slippy-map tile address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    pub z: u8,
    pub x: u32,
    pub y: u32,
}

impl TileCoord {
    /// Tile containing `position` at zoom `z` (standard OSM tiling scheme).
    pub fn containing(position: LatLng, z: u8) -> TileCoord {
        let n = f64::from(1u32 << u32::from(z.min(31)));
        let lat = position.lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT);
        let lat_rad = lat.to_radians();

        let x = ((position.lng + 180.0) / 360.0 * n).floor();
        let y = ((1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / std::f64::consts::PI) / 2.0
            * n)
            .floor();

        let max = n - 1.0;
        TileCoord {
            z,
            x: x.clamp(0.0, max) as u32,
            y: y.clamp(0.0, max) as u32,
        }
    }
}
