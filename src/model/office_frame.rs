use crate::model::{
    BRACING_THICKNESS, BRACING_WIDTH, FLOOR_HEIGHT, floor_material, steel_material,
};
use crate::params::WarehouseParams;
use crate::profiles::{BeamProfile, ProfileLibrary};
use crate::scene::{
    Group, Line, Material, RectangularExtrusion, bidirectional_pattern, linear_pattern,
};
use crate::{Point, Vector};
use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use tracing::debug;

/// Column and beam grid of the office.
///
/// The office lies at negative x, between `x = -x_dimension` and the
/// warehouse at `x = 0`, and spans `0 <= y <= y_dimension`.
#[derive(Debug, Clone)]
pub struct OfficeFrame {
    pub material: Material,
    pub col_profile: BeamProfile,
    pub y_dimension: f64,
    pub x_dimension: f64,
    pub num_office_floors: u32,
    /// Maximum column spacing along x [m]
    pub col_spacing_x: f64,
    /// Maximum column spacing along y [m]
    pub col_spacing_y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OfficeReport {
    pub column_num_x: usize,
    pub column_num_y: usize,
    pub grid_size_x: f64,
    pub grid_size_y: f64,
    pub total_column_length: f64,
    pub total_beam_length: f64,
    pub total_weight: f64,
}

impl OfficeFrame {
    pub fn from_params(params: &WarehouseParams, library: &ProfileLibrary) -> Result<Self> {
        let lb = &params.location_and_building;
        let office_col = &params.structure.general.office_col;
        let col_profile = library
            .get(&office_col.col_profile)
            .context("Invalid structure.general.office_col.col_profile")?;
        Self::new(
            lb.building_y_dimension,
            lb.office_x_dimension,
            lb.num_office_floors,
            office_col.dist_width,
            office_col.dist_length,
            col_profile.clone(),
        )
    }

    pub fn new(
        y_dimension: f64,
        x_dimension: f64,
        num_office_floors: u32,
        col_spacing_x: f64,
        col_spacing_y: f64,
        col_profile: BeamProfile,
    ) -> Result<Self> {
        if col_spacing_x > x_dimension || col_spacing_y > y_dimension {
            return Err(anyhow!(
                "Column spacing ({}, {}) exceeds the office size ({}, {})",
                col_spacing_x,
                col_spacing_y,
                x_dimension,
                y_dimension
            ));
        }
        let frame = Self {
            material: steel_material(),
            col_profile,
            y_dimension,
            x_dimension,
            num_office_floors,
            col_spacing_x,
            col_spacing_y,
        };
        debug!(
            "Office frame: {} x {} columns, {} floors",
            frame.column_num_x(),
            frame.column_num_y(),
            num_office_floors
        );
        Ok(frame)
    }

    /// Height of the top floor beams [m]
    pub fn height(&self) -> f64 {
        self.num_office_floors as f64 * FLOOR_HEIGHT
    }

    fn size(&self) -> f64 {
        self.col_profile.width
    }

    fn bays_x(&self) -> usize {
        (self.x_dimension / self.col_spacing_x).floor() as usize
    }

    fn bays_y(&self) -> usize {
        (self.y_dimension / self.col_spacing_y).floor() as usize
    }

    pub fn column_num_x(&self) -> usize {
        self.bays_x() + 1
    }

    pub fn column_num_y(&self) -> usize {
        self.bays_y() + 1
    }

    pub fn grid_size_x_direction(&self) -> f64 {
        self.x_dimension / self.bays_x() as f64
    }

    pub fn grid_size_y_direction(&self) -> f64 {
        self.y_dimension / self.bays_y() as f64
    }

    fn member(&self, start: Point, end: Point) -> RectangularExtrusion {
        RectangularExtrusion::new(self.size(), self.size(), Line::new(start, end))
            .with_material(self.material.clone())
    }

    fn flat(&self, width: f64, height: f64, start: Point, end: Point) -> RectangularExtrusion {
        RectangularExtrusion::new(width, height, Line::new(start, end))
            .with_material(self.material.clone())
    }

    pub fn visualise(&self) -> Result<Group> {
        Ok(Group::named(
            "office_structure",
            vec![
                self.draw_beams_x_orientation().into(),
                self.draw_beams_y_orientation().into(),
                self.draw_office_columns().into(),
                self.draw_bracing()?.into(),
                self.draw_floor().into(),
            ],
        ))
    }

    pub fn draw_office_columns(&self) -> Group {
        let x0 = -self.x_dimension;
        let column = self.member(Point::new(x0, 0., 0.), Point::new(x0, 0., self.height()));
        bidirectional_pattern(
            column,
            Vector::unit_x(),
            Vector::unit_y(),
            self.column_num_x(),
            self.column_num_y(),
            self.grid_size_x_direction(),
            self.grid_size_y_direction(),
        )
    }

    /// Beams along y on every grid line in x, one level per floor.
    pub fn draw_beams_y_orientation(&self) -> Group {
        let x0 = -self.x_dimension;
        let beam = self.member(
            Point::new(x0, 0., FLOOR_HEIGHT),
            Point::new(x0, self.y_dimension, FLOOR_HEIGHT),
        );
        bidirectional_pattern(
            beam,
            Vector::unit_x(),
            Vector::unit_z(),
            self.column_num_x(),
            self.num_office_floors as usize,
            self.grid_size_x_direction(),
            FLOOR_HEIGHT,
        )
    }

    /// Beams along x on every grid line in y, one level per floor.
    pub fn draw_beams_x_orientation(&self) -> Group {
        let beam = self.member(
            Point::new(0., 0., FLOOR_HEIGHT),
            Point::new(-self.x_dimension, 0., FLOOR_HEIGHT),
        );
        bidirectional_pattern(
            beam,
            Vector::unit_y(),
            Vector::unit_z(),
            self.column_num_y(),
            self.num_office_floors as usize,
            self.grid_size_y_direction(),
            FLOOR_HEIGHT,
        )
    }

    /// Crosses in the first front and side bays, mirrored to the far end, on every floor.
    pub fn draw_bracing(&self) -> Result<Group> {
        let x0 = -self.x_dimension;
        let gx = self.grid_size_x_direction();
        let gy = self.grid_size_y_direction();

        let mut diagonals = Group::new(vec![
            // Front
            self.flat(
                BRACING_THICKNESS,
                BRACING_WIDTH,
                Point::new(x0, 0., 0.),
                Point::new(x0, gy, FLOOR_HEIGHT),
            )
            .into(),
            self.flat(
                BRACING_THICKNESS,
                BRACING_WIDTH,
                Point::new(x0, gy, 0.),
                Point::new(x0, 0., FLOOR_HEIGHT),
            )
            .into(),
            // Side
            self.flat(
                BRACING_WIDTH,
                BRACING_THICKNESS,
                Point::origin(),
                Point::new(-gx, 0., FLOOR_HEIGHT),
            )
            .into(),
            self.flat(
                BRACING_WIDTH,
                BRACING_THICKNESS,
                Point::new(-gx, 0., 0.),
                Point::new(0., 0., FLOOR_HEIGHT),
            )
            .into(),
        ]);
        diagonals.add_mirrored(Point::new(0., self.y_dimension / 2., 0.), Vector::unit_y())?;

        Ok(linear_pattern(
            diagonals,
            Vector::unit_z(),
            self.num_office_floors as usize,
            FLOOR_HEIGHT,
        ))
    }

    pub fn draw_floor(&self) -> RectangularExtrusion {
        let cx = -self.x_dimension / 2.;
        let cy = self.y_dimension / 2.;
        RectangularExtrusion::new(
            self.x_dimension,
            self.y_dimension,
            Line::new(Point::new(cx, cy, -0.1), Point::new(cx, cy, 0.1)),
        )
        .with_material(floor_material())
    }

    pub fn report(&self) -> OfficeReport {
        let floors = self.num_office_floors as f64;
        let num_columns = self.column_num_x() * self.column_num_y();
        let total_column_length = num_columns as f64 * self.height();
        let beams_per_floor = self.column_num_x() as f64 * self.y_dimension
            + self.column_num_y() as f64 * self.x_dimension;
        let total_beam_length = floors * beams_per_floor;
        OfficeReport {
            column_num_x: self.column_num_x(),
            column_num_y: self.column_num_y(),
            grid_size_x: self.grid_size_x_direction(),
            grid_size_y: self.grid_size_y_direction(),
            total_column_length,
            total_beam_length,
            total_weight: (total_column_length + total_beam_length) * self.col_profile.mass,
        }
    }
}
