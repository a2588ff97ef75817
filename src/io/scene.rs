//! Scene JSON: the full group hierarchy with names, UIDs and materials.

use crate::views::GeometryResult;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Writes a geometry result as pretty-printed JSON.
pub fn write_scene(path: &Path, result: &GeometryResult) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, result)
        .with_context(|| format!("Failed to serialize scene to: {}", path.display()))?;

    Ok(())
}

pub fn read_scene(path: &Path) -> Result<GeometryResult> {
    let file =
        File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    let reader = BufReader::new(file);

    let result: GeometryResult = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to deserialize scene from: {}", path.display()))?;

    Ok(result)
}

pub fn to_scene_string(result: &GeometryResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("Failed to serialize scene to string")
}

pub fn from_scene_string(json: &str) -> Result<GeometryResult> {
    serde_json::from_str(json).context("Failed to deserialize scene from string")
}
