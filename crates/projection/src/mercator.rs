//! Spherical Web Mercator projection (Esri wkid 102100).
//!
//! Geographic longitude/latitude in degrees is mapped onto a sphere of
//! radius 6378137 m and then onto the plane:
//!
//! - x = lon * R
//! - y = R/2 * ln((1 + sin(lat)) / (1 - sin(lat)))
//!
//! The y formula diverges at the poles, so latitude is clamped to
//! ±89.99999° before projecting.

use std::f64::consts::PI;

use fs_common::{Point, SpatialReference};

/// Semi-major axis of WGS84, used as the sphere radius (meters).
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Largest absolute latitude (degrees) fed into the y formula.
pub const MAX_LATITUDE: f64 = 89.99999;

/// Spherical Web Mercator projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WebMercator {
    /// Sphere radius (meters)
    pub earth_radius: f64,
    /// Latitude clamp (degrees)
    pub max_latitude: f64,
}

impl Default for WebMercator {
    fn default() -> Self {
        Self {
            earth_radius: EARTH_RADIUS,
            max_latitude: MAX_LATITUDE,
        }
    }
}

impl WebMercator {
    /// Convert geographic degrees to projected meters.
    ///
    /// Returns (x, y). Never returns infinity or NaN for finite input.
    pub fn forward(&self, lon_deg: f64, lat_deg: f64) -> (f64, f64) {
        let to_rad = PI / 180.0;

        // max/min rather than clamp: the bound is a public field and may be
        // negative or NaN.
        let lat = lat_deg.max(-self.max_latitude).min(self.max_latitude) * to_rad;
        let sin_lat = lat.sin();

        let x = lon_deg * to_rad * self.earth_radius;
        let y = self.earth_radius / 2.0 * ((1.0 + sin_lat) / (1.0 - sin_lat)).ln();

        (x, y)
    }

    /// Convert projected meters back to geographic degrees.
    ///
    /// Returns (lon, lat).
    pub fn inverse(&self, x: f64, y: f64) -> (f64, f64) {
        let to_deg = 180.0 / PI;

        let lon = x / self.earth_radius * to_deg;
        let lat = (2.0 * (y / self.earth_radius).exp().atan() - PI / 2.0) * to_deg;

        (lon, lat)
    }

    /// Project a point geometry, tagging the result with wkid 102100.
    pub fn project_point(&self, point: &Point) -> Point {
        let (x, y) = self.forward(point.x, point.y);
        Point::new(x, y).with_spatial_reference(SpatialReference::web_mercator())
    }
}

/// Project a point with the standard Web Mercator parameters.
pub fn project(point: &Point) -> Point {
    WebMercator::default().project_point(point)
}
