//! User-adjustable inputs of the configurator.
//!
//! The tree mirrors the steps, tabs and sections of the configurator form.
//! Every struct is `#[serde(default)]`, so a parameter file only needs the
//! values that differ from the defaults.

use crate::geo::{GeoPoint, GeoPolygon};
use crate::profiles::ProfileLibrary;
use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

/// Allowed values of purlins per truss panel.
pub const PURLIN_SPACING_OPTIONS: [(&str, f64); 3] = [("1/2", 2.0), ("1", 1.0), ("2", 0.5)];

pub fn default_corner_location() -> GeoPoint {
    GeoPoint::new(52.27708034013321, 4.749773456312529)
}

pub fn default_terrain() -> GeoPolygon {
    GeoPolygon::new(vec![
        GeoPoint::new(52.277114025504986, 4.748731333270152),
        GeoPoint::new(52.27664483409234, 4.7496200872609435),
        GeoPoint::new(52.27695522281373, 4.7500998571143676),
        GeoPoint::new(52.27740516229457, 4.749163912646231),
    ])
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WarehouseParams {
    pub location_and_building: LocationAndBuilding,
    pub structure: Structure,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationAndBuilding {
    /// Terrain polygon
    pub poly: Option<GeoPolygon>,
    /// Building corner
    pub start: Option<GeoPoint>,
    /// Building rotation [deg], counter-clockwise
    pub rotate: f64,
    /// Office/warehouse length [m]
    pub building_y_dimension: f64,
    /// Office width [m]
    pub office_x_dimension: f64,
    pub num_office_floors: u32,
    /// Warehouse width [m]
    pub warehouse_x_dimension: f64,
    /// Free height of the warehouse expressed in floors
    pub num_warehouse_floors: u32,
}

impl Default for LocationAndBuilding {
    fn default() -> Self {
        Self {
            poly: Some(default_terrain()),
            start: Some(default_corner_location()),
            rotate: 230.,
            building_y_dimension: 20.,
            office_x_dimension: 20.,
            num_office_floors: 3,
            warehouse_x_dimension: 20.,
            num_warehouse_floors: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Structure {
    pub general: General,
    pub advanced_settings: AdvancedSettings,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct General {
    pub office_col: OfficeColumns,
    pub truss: TrussSettings,
    pub column: WarehouseColumns,
    pub purlin: Purlins,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OfficeColumns {
    /// Max column spacing along the building length [m]
    pub dist_length: f64,
    /// Max column spacing along the office width [m]
    pub dist_width: f64,
    pub col_profile: String,
}

impl Default for OfficeColumns {
    fn default() -> Self {
        Self {
            dist_length: 7.,
            dist_width: 7.,
            col_profile: "SHS 300x300 x 10".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrussSettings {
    /// Maximum distance between two trusses [m]
    pub max_truss_spacing: f64,
    /// [m]
    pub truss_height: f64,
    pub profile_chord: String,
    pub profile_web: String,
    pub profile_vertical: String,
    pub custom_panels: bool,
    /// Panels per truss, only read when `custom_panels` is set
    pub truss_panels: u32,
}

impl Default for TrussSettings {
    fn default() -> Self {
        Self {
            max_truss_spacing: 15.,
            truss_height: 1.0,
            profile_chord: "SHS 100x100 x 4".to_string(),
            profile_web: "SHS 50x50 x 4".to_string(),
            profile_vertical: "SHS 50x50 x 4".to_string(),
            custom_panels: false,
            truss_panels: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarehouseColumns {
    /// Additional columns between the facade columns
    pub num_columns: u32,
    pub profile: String,
}

impl Default for WarehouseColumns {
    fn default() -> Self {
        Self {
            num_columns: 0,
            profile: "SHS 50x50 x 4".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Purlins {
    pub profile: String,
    /// Divisor of purlins per truss panel, one of [`PURLIN_SPACING_OPTIONS`]
    pub purlin_spacing: f64,
}

impl Default for Purlins {
    fn default() -> Self {
        Self {
            profile: "SHS 50x50 x 4".to_string(),
            purlin_spacing: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvancedSettings {
    pub visual_settings: VisualSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualSettings {
    pub office_visible: bool,
    pub warehouse_visible: bool,
}

impl Default for VisualSettings {
    fn default() -> Self {
        Self {
            office_visible: true,
            warehouse_visible: true,
        }
    }
}

fn check_min(field: &str, value: f64, min: f64) -> Result<()> {
    if !value.is_finite() || value < min {
        return Err(anyhow!("{} must be at least {}, got {}", field, min, value));
    }
    Ok(())
}

impl WarehouseParams {
    /// Enforces the field constraints of the configurator form.
    pub fn validate(&self, library: &ProfileLibrary) -> Result<()> {
        let lb = &self.location_and_building;
        if let Some(poly) = &lb.poly {
            if poly.len() < 3 {
                return Err(anyhow!(
                    "location_and_building.poly needs at least 3 points, got {}",
                    poly.len()
                ));
            }
            if let Some(p) = poly.points.iter().find(|p| !p.is_valid()) {
                return Err(anyhow!("location_and_building.poly has an invalid point: {}", p));
            }
        }
        if let Some(start) = &lb.start {
            if !start.is_valid() {
                return Err(anyhow!("location_and_building.start is invalid: {}", start));
            }
        }
        if !lb.rotate.is_finite() {
            return Err(anyhow!("location_and_building.rotate must be finite"));
        }
        check_min("location_and_building.building_y_dimension", lb.building_y_dimension, 20.)?;
        check_min("location_and_building.office_x_dimension", lb.office_x_dimension, 10.)?;
        check_min("location_and_building.num_office_floors", lb.num_office_floors as f64, 3.)?;
        check_min("location_and_building.warehouse_x_dimension", lb.warehouse_x_dimension, 20.)?;
        check_min(
            "location_and_building.num_warehouse_floors",
            lb.num_warehouse_floors as f64,
            2.,
        )?;

        let general = &self.structure.general;
        check_min("structure.general.office_col.dist_length", general.office_col.dist_length, 1.)?;
        check_min("structure.general.office_col.dist_width", general.office_col.dist_width, 1.)?;
        if general.office_col.dist_width > lb.office_x_dimension {
            return Err(anyhow!(
                "structure.general.office_col.dist_width ({}) exceeds the office width ({})",
                general.office_col.dist_width,
                lb.office_x_dimension
            ));
        }
        if general.office_col.dist_length > lb.building_y_dimension {
            return Err(anyhow!(
                "structure.general.office_col.dist_length ({}) exceeds the building length ({})",
                general.office_col.dist_length,
                lb.building_y_dimension
            ));
        }
        check_min(
            "structure.general.truss.max_truss_spacing",
            general.truss.max_truss_spacing,
            5.,
        )?;
        check_min("structure.general.truss.truss_height", general.truss.truss_height, 1.)?;
        if general.truss.custom_panels {
            check_min(
                "structure.general.truss.truss_panels",
                general.truss.truss_panels as f64,
                2.,
            )?;
            if general.truss.truss_panels % 2 != 0 {
                return Err(anyhow!(
                    "structure.general.truss.truss_panels must be even, got {}",
                    general.truss.truss_panels
                ));
            }
        }
        if !PURLIN_SPACING_OPTIONS
            .iter()
            .any(|(_, v)| *v == general.purlin.purlin_spacing)
        {
            return Err(anyhow!(
                "structure.general.purlin.purlin_spacing must be one of 2.0, 1.0, 0.5, got {}",
                general.purlin.purlin_spacing
            ));
        }

        for (field, name) in [
            ("structure.general.office_col.col_profile", &general.office_col.col_profile),
            ("structure.general.truss.profile_chord", &general.truss.profile_chord),
            ("structure.general.truss.profile_web", &general.truss.profile_web),
            ("structure.general.truss.profile_vertical", &general.truss.profile_vertical),
            ("structure.general.column.profile", &general.column.profile),
            ("structure.general.purlin.profile", &general.purlin.profile),
        ] {
            if !library.contains(name) {
                return Err(anyhow!("{}: unknown beam profile \"{}\"", field, name));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() -> Result<()> {
        let params = WarehouseParams::default();
        params.validate(&ProfileLibrary::standard())?;
        assert_eq!(params.location_and_building.rotate, 230.);
        assert_eq!(params.structure.general.truss.max_truss_spacing, 15.);
        assert!(params.structure.advanced_settings.visual_settings.warehouse_visible);
        Ok(())
    }

    #[test]
    fn test_empty_json_uses_defaults() -> Result<()> {
        let params: WarehouseParams = serde_json::from_str("{}")?;
        assert_eq!(params, WarehouseParams::default());
        Ok(())
    }

    #[test]
    fn test_partial_json() -> Result<()> {
        let json = r#"{
            "location_and_building": {"office_x_dimension": 30, "start": null},
            "structure": {"general": {"column": {"num_columns": 2}}}
        }"#;
        let params: WarehouseParams = serde_json::from_str(json)?;
        assert_eq!(params.location_and_building.office_x_dimension, 30.);
        assert!(params.location_and_building.start.is_none());
        assert!(params.location_and_building.poly.is_some());
        assert_eq!(params.structure.general.column.num_columns, 2);
        assert_eq!(params.structure.general.column.profile, "SHS 50x50 x 4");
        Ok(())
    }

    #[test]
    fn test_validate_minimum() {
        let mut params = WarehouseParams::default();
        params.location_and_building.building_y_dimension = 15.;
        let err = params.validate(&ProfileLibrary::standard()).unwrap_err();
        assert!(err.to_string().contains("building_y_dimension"));
    }

    #[test]
    fn test_validate_odd_panels() {
        let mut params = WarehouseParams::default();
        params.structure.general.truss.custom_panels = true;
        params.structure.general.truss.truss_panels = 3;
        assert!(params.validate(&ProfileLibrary::standard()).is_err());
        // Ignored while custom panels are off
        params.structure.general.truss.custom_panels = false;
        assert!(params.validate(&ProfileLibrary::standard()).is_ok());
    }

    #[test]
    fn test_validate_purlin_spacing() {
        let mut params = WarehouseParams::default();
        params.structure.general.purlin.purlin_spacing = 3.0;
        assert!(params.validate(&ProfileLibrary::standard()).is_err());
    }

    #[test]
    fn test_validate_profile() {
        let mut params = WarehouseParams::default();
        params.structure.general.truss.profile_web = "SHS 1x1 x 1".to_string();
        let err = params.validate(&ProfileLibrary::standard()).unwrap_err();
        assert!(err.to_string().contains("profile_web"));
    }

    #[test]
    fn test_validate_office_column_spacing() {
        let lib = ProfileLibrary::standard();
        let mut params = WarehouseParams::default();
        params.location_and_building.office_x_dimension = 10.;
        params.structure.general.office_col.dist_width = 12.;
        let err = params.validate(&lib).unwrap_err();
        assert!(err.to_string().contains("office_col.dist_width"));

        let mut params = WarehouseParams::default();
        params.structure.general.office_col.dist_length = 25.;
        let err = params.validate(&lib).unwrap_err();
        assert!(err.to_string().contains("office_col.dist_length"));

        // Equal to the office size is one bay
        let mut params = WarehouseParams::default();
        let office_width = params.location_and_building.office_x_dimension;
        params.structure.general.office_col.dist_width = office_width;
        assert!(params.validate(&lib).is_ok());
    }

    #[test]
    fn test_validate_short_terrain() {
        let mut params = WarehouseParams::default();
        params.location_and_building.poly = Some(GeoPolygon::new(vec![GeoPoint::new(52., 4.)]));
        assert!(params.validate(&ProfileLibrary::standard()).is_err());
    }
}
