//! Map features returned by the map view.

use crate::geo::{GeoPoint, GeoPolygon};
use crate::scene::Color;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    pub lat: f64,
    pub lon: f64,
}

impl MapPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl From<GeoPoint> for MapPoint {
    fn from(p: GeoPoint) -> Self {
        Self::new(p.lat, p.lon)
    }
}

impl From<MapPoint> for GeoPoint {
    fn from(p: MapPoint) -> Self {
        GeoPoint::new(p.lat, p.lon)
    }
}

/// Open ring of map points; the first point is not repeated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapPolygon {
    pub points: Vec<MapPoint>,
    pub color: Option<Color>,
}

impl MapPolygon {
    pub fn new(points: Vec<MapPoint>) -> Self {
        Self { points, color: None }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn from_geo_polygon(polygon: &GeoPolygon) -> Self {
        Self::new(polygon.points.iter().map(|&p| p.into()).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MapFeature {
    Polygon(MapPolygon),
    Point(MapPoint),
}

impl From<MapPolygon> for MapFeature {
    fn from(value: MapPolygon) -> Self {
        Self::Polygon(value)
    }
}

impl From<MapPoint> for MapFeature {
    fn from(value: MapPoint) -> Self {
        Self::Point(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapResult {
    pub features: Vec<MapFeature>,
}

impl MapResult {
    pub fn new(features: Vec<MapFeature>) -> Self {
        Self { features }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_geo_polygon() {
        let poly = GeoPolygon::new(vec![
            GeoPoint::new(1., 2.),
            GeoPoint::new(3., 4.),
            GeoPoint::new(5., 6.),
        ]);
        let map_poly = MapPolygon::from_geo_polygon(&poly);
        assert_eq!(map_poly.points.len(), 3);
        assert_eq!(map_poly.points[1], MapPoint::new(3., 4.));
        assert!(map_poly.color.is_none());
    }

    #[test]
    fn test_feature_json_tag() -> anyhow::Result<()> {
        let feature: MapFeature = MapPoint::new(52., 4.).into();
        let json = serde_json::to_string(&feature)?;
        assert_eq!(json, r#"{"type":"point","lat":52.0,"lon":4.0}"#);
        Ok(())
    }
}
