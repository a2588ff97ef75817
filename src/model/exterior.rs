use crate::model::{FACADE_HEIGHT, FLOOR_HEIGHT, WINDOWS_HEIGHT};
use crate::params::WarehouseParams;
use crate::scene::{Color, Group, Line, Material, RectangularExtrusion, Transform, linear_pattern};
use crate::{Point, Vector};
use tracing::debug;

/// Roof slab thickness [m]
const ROOF_THICKNESS: f64 = 0.5;

/// Massing model of the office and warehouse volumes.
///
/// The office occupies `0 <= x <= width_office`, the warehouse continues to
/// `width_office + width_warehouse`. Both span `0 <= y <= width_building`.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildingExterior {
    /// Shared length of office and warehouse, along y [m]
    pub width_building: f64,
    pub width_office: f64,
    pub num_office_floors: u32,
    pub width_warehouse: f64,
    pub num_warehouse_floors: u32,
}

impl BuildingExterior {
    pub fn from_params(params: &WarehouseParams) -> Self {
        let lb = &params.location_and_building;
        Self {
            width_building: lb.building_y_dimension,
            width_office: lb.office_x_dimension,
            num_office_floors: lb.num_office_floors,
            width_warehouse: lb.warehouse_x_dimension,
            num_warehouse_floors: lb.num_warehouse_floors,
        }
    }

    pub fn height_office(&self) -> f64 {
        self.num_office_floors as f64 * FLOOR_HEIGHT + FACADE_HEIGHT
    }

    pub fn height_warehouse(&self) -> f64 {
        self.num_warehouse_floors as f64 * FLOOR_HEIGHT + FACADE_HEIGHT / 2.
    }

    pub fn facade_material() -> Material {
        Material::new("Facade", Color::new(200, 200, 255))
            .with_opacity(1.)
            .with_metalness(0.5)
    }

    pub fn windows_material() -> Material {
        Material::new("Windows", Color::new(180, 180, 210))
            .with_opacity(0.9)
            .with_metalness(1.)
    }

    pub fn roof_material() -> Material {
        Material::new("Facade", Color::new(74, 80, 84))
            .with_opacity(1.)
            .with_metalness(0.5)
    }

    /// Slab of the given footprint between two heights, centred on the z axis.
    fn slab(width: f64, length: f64, z0: f64, z1: f64, material: Material) -> RectangularExtrusion {
        let line = Line::new(Point::new(0., 0., z0), Point::new(0., 0., z1));
        RectangularExtrusion::new(width, length, line).with_material(material)
    }

    /// Group of `[office, warehouse]`, placed in the positive quadrant.
    pub fn visualize(&self) -> Group {
        debug!(
            "Building exterior: office {:.1} m high, warehouse {:.1} m high",
            self.height_office(),
            self.height_warehouse()
        );
        let mut office = Group::named(
            "office",
            vec![
                self.draw_office_first_floor().into(),
                self.draw_office_facades().into(),
                self.draw_office_windows().into(),
                self.draw_office_roof().into(),
            ],
        );
        office.translate(Vector::new(self.width_office / 2., self.width_building / 2., 0.));

        let mut warehouse = Group::named(
            "warehouse",
            vec![
                self.draw_warehouse_facades().into(),
                self.draw_warehouse_windows().into(),
                self.draw_warehouse_roof().into(),
            ],
        );
        warehouse.translate(Vector::new(
            self.width_office + self.width_warehouse / 2.,
            self.width_building / 2.,
            0.,
        ));

        Group::named("exterior", vec![office.into(), warehouse.into()])
    }

    /// Glazed ground floor.
    pub fn draw_office_first_floor(&self) -> RectangularExtrusion {
        Self::slab(
            self.width_office,
            self.width_building,
            0.,
            FLOOR_HEIGHT,
            Self::windows_material(),
        )
    }

    /// One facade band per floor, starting on top of the ground floor.
    pub fn draw_office_facades(&self) -> Group {
        let facade = Self::slab(
            self.width_office,
            self.width_building,
            FLOOR_HEIGHT,
            FLOOR_HEIGHT + FACADE_HEIGHT,
            Self::facade_material(),
        );
        linear_pattern(facade, Vector::unit_z(), self.num_office_floors as usize, FLOOR_HEIGHT)
    }

    /// Window bands between the facade bands.
    pub fn draw_office_windows(&self) -> Group {
        let z = FLOOR_HEIGHT + FACADE_HEIGHT;
        let window = Self::slab(
            self.width_office,
            self.width_building,
            z,
            z + WINDOWS_HEIGHT,
            Self::windows_material(),
        );
        let count = self.num_office_floors.saturating_sub(1) as usize;
        linear_pattern(window, Vector::unit_z(), count, FLOOR_HEIGHT)
    }

    pub fn draw_office_roof(&self) -> RectangularExtrusion {
        let h = self.height_office();
        Self::slab(
            self.width_office,
            self.width_building,
            h,
            h + ROOF_THICKNESS,
            Self::roof_material(),
        )
    }

    /// Bottom of the warehouse window band.
    fn warehouse_window_z(&self) -> f64 {
        self.height_warehouse() - WINDOWS_HEIGHT - FACADE_HEIGHT / 2.
    }

    /// Closed walls below and above the window band.
    pub fn draw_warehouse_facades(&self) -> Group {
        let z = self.warehouse_window_z();
        let lower = Self::slab(
            self.width_warehouse,
            self.width_building,
            0.,
            z,
            Self::facade_material(),
        );
        let upper = Self::slab(
            self.width_warehouse,
            self.width_building,
            z + WINDOWS_HEIGHT,
            self.height_warehouse(),
            Self::facade_material(),
        );
        Group::new(vec![lower.into(), upper.into()])
    }

    pub fn draw_warehouse_windows(&self) -> RectangularExtrusion {
        let z = self.warehouse_window_z();
        Self::slab(
            self.width_warehouse,
            self.width_building,
            z,
            z + WINDOWS_HEIGHT,
            Self::windows_material(),
        )
    }

    pub fn draw_warehouse_roof(&self) -> RectangularExtrusion {
        let h = self.height_warehouse();
        Self::slab(
            self.width_warehouse,
            self.width_building,
            h,
            h + ROOF_THICKNESS,
            Self::roof_material(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HasMesh;

    fn exterior() -> BuildingExterior {
        BuildingExterior::from_params(&WarehouseParams::default())
    }

    #[test]
    fn test_heights() {
        let e = exterior();
        assert_eq!(e.height_office(), 3. * 4. + 2.);
        assert_eq!(e.height_warehouse(), 2. * 4. + 1.);
    }

    #[test]
    fn test_office_bands() {
        let e = exterior();
        assert_eq!(e.draw_office_facades().len(), 3);
        assert_eq!(e.draw_office_windows().len(), 2);
        let (pmin, pmax) = e.draw_office_facades().copy_mesh().bbox().unwrap();
        assert!((pmin.z - 4.).abs() < 1e-12);
        assert!((pmax.z - 14.).abs() < 1e-12);
    }

    #[test]
    fn test_warehouse_window_band() {
        let e = exterior();
        let (pmin, pmax) = e.draw_warehouse_windows().copy_mesh().bbox().unwrap();
        assert!((pmin.z - 6.).abs() < 1e-12);
        assert!((pmax.z - 8.).abs() < 1e-12);
    }

    #[test]
    fn test_visualize_placement() {
        let e = exterior();
        let group = e.visualize();
        assert_eq!(group.len(), 2);
        let (pmin, pmax) = group.copy_mesh().bbox().unwrap();
        assert!(pmin.is_close(&Point::new(0., 0., 0.)));
        assert!(pmax.is_close(&Point::new(40., 20., 14.5)));

        let office = group.find("office").unwrap();
        let (_, omax) = office.copy_mesh().bbox().unwrap();
        assert!((omax.x - 20.).abs() < 1e-12);
    }

    #[test]
    fn test_materials() {
        let e = exterior();
        assert_eq!(e.draw_office_roof().material, Some(BuildingExterior::roof_material()));
        let windows = BuildingExterior::windows_material();
        assert_eq!(windows.opacity, 0.9);
        assert_eq!(windows.metalness, 1.);
    }
}
