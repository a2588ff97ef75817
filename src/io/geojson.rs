//! GeoJSON export of map results.
//!
//! Coordinates are written `[lon, lat]` and polygon rings are closed, as
//! RFC 7946 requires.

use crate::views::{MapFeature, MapPoint, MapResult};
use anyhow::{Context, Result};
use serde_json::{Value, json};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

fn position(p: &MapPoint) -> Value {
    json!([p.lon, p.lat])
}

fn feature(f: &MapFeature) -> Value {
    match f {
        MapFeature::Polygon(poly) => {
            let mut ring: Vec<Value> = poly.points.iter().map(position).collect();
            if let Some(first) = poly.points.first() {
                if poly.points.last() != Some(first) {
                    ring.push(position(first));
                }
            }
            let properties = match poly.color {
                Some(c) => json!({ "color": c.to_hex() }),
                None => json!({}),
            };
            json!({
                "type": "Feature",
                "geometry": { "type": "Polygon", "coordinates": [ring] },
                "properties": properties,
            })
        }
        MapFeature::Point(p) => json!({
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": position(p) },
            "properties": {},
        }),
    }
}

pub fn to_geojson(result: &MapResult) -> Value {
    json!({
        "type": "FeatureCollection",
        "features": result.features.iter().map(feature).collect::<Vec<_>>(),
    })
}

pub fn to_geojson_string(result: &MapResult) -> Result<String> {
    serde_json::to_string_pretty(&to_geojson(result))
        .context("Failed to serialize GeoJSON to string")
}

pub fn write_geojson(path: &Path, result: &MapResult) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, &to_geojson(result))
        .with_context(|| format!("Failed to serialize GeoJSON to: {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Color;
    use crate::views::MapPolygon;
    use tempfile::tempdir;

    fn result() -> MapResult {
        let poly = MapPolygon::new(vec![
            MapPoint::new(52.0, 4.0),
            MapPoint::new(52.1, 4.0),
            MapPoint::new(52.1, 4.1),
        ])
        .with_color(Color::new(0, 0, 255));
        MapResult::new(vec![poly.into(), MapPoint::new(52.05, 4.05).into()])
    }

    #[test]
    fn test_feature_collection() {
        let value = to_geojson(&result());
        assert_eq!(value["type"], "FeatureCollection");
        let features = value["features"].as_array().unwrap();
        assert_eq!(features.len(), 2);

        let ring = features[0]["geometry"]["coordinates"][0].as_array().unwrap();
        assert_eq!(ring.len(), 4);
        assert_eq!(ring[0], ring[3]);
        assert_eq!(ring[1], json!([4.0, 52.1]));
        assert_eq!(features[0]["properties"]["color"], "#0000ff");

        assert_eq!(features[1]["geometry"]["type"], "Point");
        assert_eq!(features[1]["geometry"]["coordinates"], json!([4.05, 52.05]));
    }

    #[test]
    fn test_write_geojson() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("map.geojson");
        write_geojson(&path, &result())?;
        let value: Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
        assert_eq!(value["features"].as_array().map(|f| f.len()), Some(2));
        Ok(())
    }

    #[test]
    fn test_empty_result() -> Result<()> {
        let json = to_geojson_string(&MapResult::default())?;
        assert!(json.contains("\"features\": []"));
        Ok(())
    }
}
