use crate::model::{
    BRACING_THICKNESS, BRACING_WIDTH, Beam, FACADE_HEIGHT, FLOOR_HEIGHT, Truss, floor_material,
    steel_material,
};
use crate::params::WarehouseParams;
use crate::profiles::{BeamProfile, ProfileLibrary};
use crate::scene::{
    Group, Line, Material, RectangularExtrusion, Transform, bidirectional_pattern, linear_pattern,
};
use crate::{Point, Vector};
use anyhow::{Context, Result};
use serde::Serialize;
use std::f64::consts::FRAC_PI_2;
use tracing::{debug, info};

/// Portal frames of trusses on columns carrying purlins.
///
/// Frames repeat along x across the warehouse width. Each frame runs along y
/// over the building length, split into `num_truss_per_frame` trusses by the
/// intermediate columns.
#[derive(Debug, Clone)]
pub struct WarehouseSteelFrame {
    pub material: Material,
    /// Frame spacing direction [m]
    pub width_warehouse: f64,
    /// Truss direction [m]
    pub width_building: f64,
    pub warehouse_height: f64,
    /// Columns per frame, facade columns included
    pub num_columns: usize,
    pub column_profile: BeamProfile,
    pub num_frames: usize,
    pub frame_spacing: f64,
    pub num_truss_per_frame: usize,
    pub truss_length: f64,
    pub truss_height: f64,
    pub truss_panels: usize,
    pub truss_chord: BeamProfile,
    pub truss_web: BeamProfile,
    pub truss_vertical: BeamProfile,
    /// Divisor of purlins per truss panel
    pub purlin_spacing: f64,
    pub purlin_profile: BeamProfile,
}

/// Steel quantities of the warehouse structure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameReport {
    pub num_frames: usize,
    pub frame_spacing: f64,
    pub columns_per_frame: usize,
    pub trusses_per_frame: usize,
    pub truss_length: f64,
    pub truss_panels: usize,
    /// Mass of one truss [kg]
    pub truss_weight: f64,
    pub total_truss_weight: f64,
    pub column_length: f64,
    pub total_column_weight: f64,
    pub num_purlins: usize,
    pub total_purlin_weight: f64,
    pub total_weight: f64,
}

impl WarehouseSteelFrame {
    pub fn from_params(params: &WarehouseParams, library: &ProfileLibrary) -> Result<Self> {
        let lb = &params.location_and_building;
        let general = &params.structure.general;
        let profile = |name: &str, field: &str| {
            library
                .get(name)
                .cloned()
                .with_context(|| format!("Invalid structure.general.{}", field))
        };
        let custom_panels = general
            .truss
            .custom_panels
            .then_some(general.truss.truss_panels as usize);
        Ok(Self::new(
            lb.building_y_dimension,
            lb.warehouse_x_dimension,
            lb.num_warehouse_floors,
            general.column.num_columns as usize,
            profile(&general.column.profile, "column.profile")?,
            general.truss.max_truss_spacing,
            general.truss.truss_height,
            profile(&general.truss.profile_chord, "truss.profile_chord")?,
            profile(&general.truss.profile_web, "truss.profile_web")?,
            profile(&general.truss.profile_vertical, "truss.profile_vertical")?,
            general.purlin.purlin_spacing,
            profile(&general.purlin.profile, "purlin.profile")?,
            custom_panels,
        ))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn new(
        y_dimension: f64,
        x_dimension: f64,
        num_warehouse_floors: u32,
        num_columns: usize,
        column_profile: BeamProfile,
        truss_max_spacing: f64,
        truss_height: f64,
        truss_chord: BeamProfile,
        truss_web: BeamProfile,
        truss_vertical: BeamProfile,
        purlin_spacing: f64,
        purlin_profile: BeamProfile,
        num_truss_panels: Option<usize>,
    ) -> Self {
        let num_columns = num_columns + 2;
        let num_frames = (x_dimension / truss_max_spacing).ceil() as usize + 1;
        let frame_spacing = x_dimension / (num_frames - 1) as f64;
        let num_truss_per_frame = num_columns - 1;
        let truss_length = y_dimension / num_truss_per_frame as f64;

        let truss_panels = match num_truss_panels {
            Some(panels) => 2 * (panels / 2),
            None => {
                let panel_pairs = y_dimension / (2. * truss_height * num_truss_per_frame as f64);
                2 * panel_pairs.floor() as usize
            }
        }
        .max(2);

        let frame = Self {
            material: steel_material(),
            width_warehouse: x_dimension,
            width_building: y_dimension,
            warehouse_height: num_warehouse_floors as f64 * FLOOR_HEIGHT + FACADE_HEIGHT / 2.,
            num_columns,
            column_profile,
            num_frames,
            frame_spacing,
            num_truss_per_frame,
            truss_length,
            truss_height,
            truss_panels,
            truss_chord,
            truss_web,
            truss_vertical,
            purlin_spacing,
            purlin_profile,
        };
        debug!(
            "Warehouse frame: {} frames at {:.2} m, {} trusses per frame, {} panels",
            frame.num_frames, frame.frame_spacing, frame.num_truss_per_frame, frame.truss_panels
        );
        frame
    }

    pub fn visualise(&self) -> Result<Group> {
        Ok(Group::named(
            "warehouse_structure",
            vec![
                self.draw_trusses()?.into(),
                self.draw_columns().into(),
                self.draw_purlin().into(),
                self.draw_floor().into(),
                self.draw_bracing()?.into(),
            ],
        ))
    }

    pub fn get_truss(&self) -> Result<Truss> {
        Truss::new(
            self.truss_length,
            self.truss_height,
            self.truss_panels,
            &self.truss_chord,
            &self.truss_web,
            &self.truss_vertical,
            self.material.clone(),
        )
    }

    /// Trusses of all frames, spanning along y.
    pub fn draw_trusses(&self) -> Result<Group> {
        let mut truss = self.get_truss()?.visualise();
        let z_bottom = self.warehouse_height - self.truss_height - self.purlin_profile.width / 2.;
        truss
            .rotate(FRAC_PI_2, Vector::unit_z())
            .translate(Vector::new(0., 0., z_bottom));
        Ok(bidirectional_pattern(
            truss,
            Vector::unit_x(),
            Vector::unit_y(),
            self.num_frames,
            self.num_truss_per_frame,
            self.frame_spacing,
            self.truss_length,
        ))
    }

    /// Column at the origin, stopping below the purlins.
    pub fn get_column(&self) -> Beam {
        Beam::new(
            Point::origin(),
            Point::new(0., 0., self.warehouse_height - self.purlin_profile.width),
            self.column_profile.clone(),
        )
    }

    pub fn draw_columns(&self) -> Group {
        let column = self.get_column().to_extrusion().with_material(self.material.clone());
        bidirectional_pattern(
            column,
            Vector::unit_x(),
            Vector::unit_y(),
            self.num_frames,
            self.num_columns,
            self.frame_spacing,
            self.truss_length,
        )
    }

    /// First purlin, along x on top of the trusses.
    pub fn get_purlin(&self) -> Beam {
        let z = self.warehouse_height - self.purlin_profile.width / 2.;
        Beam::new(
            Point::new(0., 0., z),
            Point::new(self.width_warehouse, 0., z),
            self.purlin_profile.clone(),
        )
    }

    /// Number of purlin intervals along the building length.
    pub fn purlin_count(&self) -> usize {
        let panels = (self.num_truss_per_frame * self.truss_panels) as f64;
        (panels / self.purlin_spacing).floor() as usize
    }

    pub fn draw_purlin(&self) -> Group {
        let count = self.purlin_count().max(1);
        let spacing = self.width_building / count as f64;
        let purlin = self.get_purlin().to_extrusion().with_material(self.material.clone());
        linear_pattern(purlin, Vector::unit_y(), count + 1, spacing)
    }

    fn flat(&self, width: f64, height: f64, start: Point, end: Point) -> RectangularExtrusion {
        RectangularExtrusion::new(width, height, Line::new(start, end))
            .with_material(self.material.clone())
    }

    /// Cross bracing in the end bays of the walls and over the roof.
    pub fn draw_bracing(&self) -> Result<Group> {
        let fs = self.frame_spacing;
        let h = self.warehouse_height;

        let num_height = ((h / fs).round() as usize).max(1);
        let size_height = h / num_height as f64;
        let num_roof = ((self.width_building / fs).round() as usize).max(1);
        let size_roof = self.width_building / num_roof as f64;

        // Wall crosses
        let mut wall = Group::new(vec![
            self.flat(
                BRACING_WIDTH,
                BRACING_THICKNESS,
                Point::origin(),
                Point::new(fs, 0., size_height),
            )
            .into(),
            self.flat(
                BRACING_WIDTH,
                BRACING_THICKNESS,
                Point::new(fs, 0., 0.),
                Point::new(0., 0., size_height),
            )
            .into(),
        ]);
        wall.add_mirrored(Point::new(self.width_warehouse / 2., 0., 0.), Vector::unit_x())?;
        wall.add_mirrored(Point::new(0., self.width_building / 2., 0.), Vector::unit_y())?;
        let walls = if num_height > 1 {
            linear_pattern(wall, Vector::unit_z(), num_height, size_height)
        } else {
            wall
        };

        // Roof crosses
        let mut roof = Group::new(vec![
            self.flat(
                BRACING_THICKNESS,
                BRACING_WIDTH,
                Point::new(0., 0., h),
                Point::new(fs, size_roof, h),
            )
            .into(),
            self.flat(
                BRACING_THICKNESS,
                BRACING_WIDTH,
                Point::new(fs, 0., h),
                Point::new(0., size_roof, h),
            )
            .into(),
        ]);
        roof.add_mirrored(Point::new(self.width_warehouse / 2., 0., 0.), Vector::unit_x())?;
        let roofs = linear_pattern(roof, Vector::unit_y(), num_roof, size_roof);

        Ok(Group::named("bracing", vec![walls.into(), roofs.into()]))
    }

    pub fn draw_floor(&self) -> RectangularExtrusion {
        let cx = self.width_warehouse / 2.;
        let cy = self.width_building / 2.;
        RectangularExtrusion::new(
            self.width_warehouse,
            self.width_building,
            Line::new(Point::new(cx, cy, -0.1), Point::new(cx, cy, 0.1)),
        )
        .with_material(floor_material())
    }

    pub fn report(&self) -> Result<FrameReport> {
        let truss = self.get_truss()?;
        let num_trusses = self.num_frames * self.num_truss_per_frame;
        let column = self.get_column();
        let total_columns = self.num_frames * self.num_columns;
        let purlin = self.get_purlin();
        let num_purlins = self.purlin_count().max(1) + 1;

        let total_truss_weight = truss.weight() * num_trusses as f64;
        let total_column_weight = column.weight() * total_columns as f64;
        let total_purlin_weight = purlin.weight() * num_purlins as f64;
        let report = FrameReport {
            num_frames: self.num_frames,
            frame_spacing: self.frame_spacing,
            columns_per_frame: self.num_columns,
            trusses_per_frame: self.num_truss_per_frame,
            truss_length: self.truss_length,
            truss_panels: self.truss_panels,
            truss_weight: truss.weight(),
            total_truss_weight,
            column_length: column.length(),
            total_column_weight,
            num_purlins,
            total_purlin_weight,
            total_weight: total_truss_weight + total_column_weight + total_purlin_weight,
        };
        info!("Warehouse steel: {:.0} kg", report.total_weight);
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HasMesh;

    fn frame(params: &WarehouseParams) -> Result<WarehouseSteelFrame> {
        WarehouseSteelFrame::from_params(params, &ProfileLibrary::standard())
    }

    #[test]
    fn test_default_counts() -> Result<()> {
        let f = frame(&WarehouseParams::default())?;
        // 20 m wide, 15 m max spacing
        assert_eq!(f.num_frames, 3);
        assert!((f.frame_spacing - 10.).abs() < 1e-12);
        assert_eq!(f.num_columns, 2);
        assert_eq!(f.num_truss_per_frame, 1);
        assert!((f.truss_length - 20.).abs() < 1e-12);
        // 2 * floor(20 / (2 * 1 * 1))
        assert_eq!(f.truss_panels, 20);
        assert_eq!(f.warehouse_height, 9.);
        assert_eq!(f.purlin_count(), 20);
        Ok(())
    }

    #[test]
    fn test_intermediate_columns_and_custom_panels() -> Result<()> {
        let mut params = WarehouseParams::default();
        params.location_and_building.building_y_dimension = 30.;
        params.structure.general.column.num_columns = 1;
        params.structure.general.truss.custom_panels = true;
        params.structure.general.truss.truss_panels = 7;
        params.structure.general.purlin.purlin_spacing = 2.0;
        let f = frame(&params)?;
        assert_eq!(f.num_columns, 3);
        assert_eq!(f.num_truss_per_frame, 2);
        assert!((f.truss_length - 15.).abs() < 1e-12);
        assert_eq!(f.truss_panels, 6);
        assert_eq!(f.purlin_count(), 6);
        assert_eq!(f.draw_purlin().len(), 7);
        assert_eq!(f.draw_columns().len(), 9);
        assert_eq!(f.draw_trusses()?.len(), 6);
        Ok(())
    }

    #[test]
    fn test_panels_never_below_two() {
        let lib = ProfileLibrary::standard();
        let p = lib.get("SHS 50x50 x 4").unwrap().clone();
        let f = WarehouseSteelFrame::new(
            20.,
            20.,
            2,
            0,
            p.clone(),
            15.,
            15.,
            p.clone(),
            p.clone(),
            p.clone(),
            1.,
            p,
            None,
        );
        assert_eq!(f.truss_panels, 2);
    }

    #[test]
    fn test_truss_placement() -> Result<()> {
        let f = frame(&WarehouseParams::default())?;
        let (pmin, pmax) = f.draw_trusses()?.copy_mesh().bbox().unwrap();
        let z_bottom = 9. - 1. - 0.025;
        assert!((pmin.z - (z_bottom - 0.05)).abs() < 1e-9);
        assert!((pmax.y - 20.).abs() < 0.1);
        assert!(pmax.x > 20. - 0.1);
        Ok(())
    }

    #[test]
    fn test_visualise() -> Result<()> {
        let f = frame(&WarehouseParams::default())?;
        let group = f.visualise()?;
        assert_eq!(group.len(), 5);
        let (pmin, pmax) = group.copy_mesh().bbox().unwrap();
        assert!((pmin.z + 0.1).abs() < 1e-9);
        assert!(pmax.z <= 9.1);
        // Wall crosses: 4 corners x 2 diagonals, one level; roof: 2 bays x 4 diagonals
        let bracing = group.find("bracing").unwrap();
        assert_eq!(bracing.primitive_count(), 8 + 2 * 4);
        Ok(())
    }

    #[test]
    fn test_report() -> Result<()> {
        let f = frame(&WarehouseParams::default())?;
        let report = f.report()?;
        assert_eq!(report.num_purlins, 21);
        assert!((report.total_truss_weight - 3. * report.truss_weight).abs() < 1e-9);
        let sum =
            report.total_truss_weight + report.total_column_weight + report.total_purlin_weight;
        assert!((report.total_weight - sum).abs() < 1e-9);
        assert!(report.total_weight > 0.);
        Ok(())
    }
}
