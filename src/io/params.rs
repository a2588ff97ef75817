//! Parameter files: JSON with every field optional.

use crate::params::WarehouseParams;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::debug;

/// Reads parameters from a JSON file. Missing fields take their defaults.
pub fn read_params(path: &Path) -> Result<WarehouseParams> {
    let file =
        File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    let reader = BufReader::new(file);

    let params: WarehouseParams = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse parameters from: {}", path.display()))?;
    debug!("Read parameters from {}", path.display());

    Ok(params)
}

pub fn params_from_str(json: &str) -> Result<WarehouseParams> {
    serde_json::from_str(json).context("Failed to parse parameters from string")
}

/// Writes a complete parameter file, e.g. the defaults as a template.
pub fn write_params(path: &Path, params: &WarehouseParams) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, params)
        .with_context(|| format!("Failed to serialize parameters to: {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_round_trip() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("params.json");
        let defaults = WarehouseParams::default();
        write_params(&path, &defaults)?;
        let loaded = read_params(&path)?;
        assert_eq!(loaded.structure, defaults.structure);
        let (a, b) = (
            loaded.location_and_building.start.unwrap(),
            defaults.location_and_building.start.unwrap(),
        );
        assert!((a.lat - b.lat).abs() < 1e-12 && (a.lon - b.lon).abs() < 1e-12);
        assert_eq!(loaded.location_and_building.poly.map(|p| p.len()), Some(4));
        Ok(())
    }

    #[test]
    fn test_partial_string() -> Result<()> {
        let params = params_from_str(r#"{"location_and_building": {"rotate": 90}}"#)?;
        assert_eq!(params.location_and_building.rotate, 90.);
        assert_eq!(params.location_and_building.num_office_floors, 3);
        Ok(())
    }

    #[test]
    fn test_invalid_json() {
        let err = params_from_str("{ not json").unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_wrong_type_names_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"location_and_building": {"rotate": "north"}}"#)?;
        let err = read_params(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("bad.json"));
        Ok(())
    }
}
