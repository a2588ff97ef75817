//! Geographic coordinates on the WGS-84 ellipsoid.

pub mod geodesic;

pub use geodesic::{destination, distance};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Latitude / longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Checks that latitude and longitude are finite and within range.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prec = f.precision().unwrap_or(6);
        write!(f, "GeoPoint({:.prec$}, {:.prec$})", self.lat, self.lon, prec = prec)
    }
}

/// Closed polygon of geographic points (the closing point is implicit).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPolygon {
    pub points: Vec<GeoPoint>,
}

impl GeoPolygon {
    pub fn new(points: Vec<GeoPoint>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid() {
        assert!(GeoPoint::new(52.277, 4.749).is_valid());
        assert!(!GeoPoint::new(91., 0.).is_valid());
        assert!(!GeoPoint::new(0., f64::NAN).is_valid());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{:.2}", GeoPoint::new(1.234, 5.678)), "GeoPoint(1.23, 5.68)");
    }
}
