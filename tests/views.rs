use anyhow::Result;
use tempfile::tempdir;
use warehouse3d::io::{self, StlFormat};
use warehouse3d::{HasMesh, WarehouseController, WarehouseParams};

#[test]
fn test_map_view_to_geojson() -> Result<()> {
    let controller = WarehouseController::new();
    let result = controller.map_view(&WarehouseParams::default())?;
    assert_eq!(result.len(), 3);

    let dir = tempdir()?;
    let path = dir.path().join("map.geojson");
    io::write_geojson(&path, &result)?;

    let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    let features = value["features"].as_array().map(|f| f.len());
    assert_eq!(features, Some(3));
    Ok(())
}

#[test]
fn test_building_view_to_stl() -> Result<()> {
    let controller = WarehouseController::new();
    let result = controller.building_view(&WarehouseParams::default())?;
    let mesh = result.copy_mesh();
    assert!(mesh.face_count() > 0);

    let dir = tempdir()?;
    let path = dir.path().join("building.stl");
    io::write_stl(&path, &mesh, "building", StlFormat::Binary)?;
    let back = io::read_stl(&path)?;
    assert_eq!(back.face_count(), mesh.face_count());
    Ok(())
}

#[test]
fn test_structure_view_scene_file() -> Result<()> {
    let controller = WarehouseController::new();
    let result = controller.structure_view(&WarehouseParams::default())?;

    let dir = tempdir()?;
    let path = dir.path().join("structure.json");
    io::write_scene(&path, &result)?;
    let back = io::read_scene(&path)?;
    assert_eq!(back.primitive_count(), result.primitive_count());
    assert!(back.geometry.find("warehouse_structure").is_some());
    assert!(back.geometry.find("office_structure").is_some());
    Ok(())
}

#[test]
fn test_hidden_parts_keep_floors() -> Result<()> {
    let controller = WarehouseController::new();
    let mut params = WarehouseParams::default();
    let full = controller.structure_view(&params)?.primitive_count();

    let visual = &mut params.structure.advanced_settings.visual_settings;
    visual.office_visible = false;
    visual.warehouse_visible = false;
    let hidden = controller.structure_view(&params)?;
    assert_eq!(hidden.primitive_count(), 2);
    assert!(hidden.primitive_count() < full);
    Ok(())
}

#[test]
fn test_params_file_drives_report() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("params.json");
    std::fs::write(
        &path,
        r#"{"location_and_building": {"warehouse_x_dimension": 60.0}}"#,
    )?;
    let params = io::read_params(&path)?;
    assert!((params.location_and_building.warehouse_x_dimension - 60.).abs() < 1e-9);

    let controller = WarehouseController::new();
    let wide = controller.report(&params)?;
    let base = controller.report(&WarehouseParams::default())?;
    assert!(wide.warehouse.num_frames >= base.warehouse.num_frames);
    assert!(wide.warehouse.total_weight > base.warehouse.total_weight);
    assert!(wide.office.total_weight > 0.);
    Ok(())
}

#[test]
fn test_invalid_params_rejected() -> Result<()> {
    let controller = WarehouseController::new();
    let mut params = WarehouseParams::default();
    params.structure.general.truss.profile_chord = "HEA 9999".to_string();
    assert!(controller.structure_view(&params).is_err());
    assert!(controller.report(&params).is_err());

    let mut params = WarehouseParams::default();
    params.location_and_building.office_x_dimension = 10.;
    params.structure.general.office_col.dist_width = 12.;
    assert!(controller.map_view(&params).is_err());
    assert!(controller.structure_view(&params).is_err());

    let mut params = WarehouseParams::default();
    params.location_and_building.poly = None;
    assert_eq!(controller.map_view(&params)?.len(), 2);
    assert!(controller.building_view(&params).is_err());
    Ok(())
}

#[test]
fn test_sample_truss_view() -> Result<()> {
    let controller = WarehouseController::new();
    let result = controller.sample_truss_view()?;
    assert_eq!(result.primitive_count(), 81);
    Ok(())
}
