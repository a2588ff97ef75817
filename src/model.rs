//! Parametric building models.
//!
//! Each model is built from [`WarehouseParams`](crate::params::WarehouseParams)
//! and turned into scene groups or map polygons by the views.

pub mod beam;
pub mod exterior;
pub mod office_frame;
pub mod site;
pub mod truss;
pub mod warehouse_frame;

pub use beam::Beam;
pub use exterior::BuildingExterior;
pub use office_frame::{OfficeFrame, OfficeReport};
pub use site::Map;
pub use truss::Truss;
pub use warehouse_frame::{FrameReport, WarehouseSteelFrame};

use crate::scene::{Color, Material};

/// Storey height [m]
pub const FLOOR_HEIGHT: f64 = 4.;
/// Height of a window band [m]
pub const WINDOWS_HEIGHT: f64 = 2.;
/// Height of a facade band [m]
pub const FACADE_HEIGHT: f64 = FLOOR_HEIGHT - WINDOWS_HEIGHT;

/// Cross-section of the bracing flats [m]
pub(crate) const BRACING_WIDTH: f64 = 0.150;
pub(crate) const BRACING_THICKNESS: f64 = 0.010;

/// Material of all structural steel members.
pub fn steel_material() -> Material {
    Material::new("blue", Color::new(100, 100, 255))
}

pub fn floor_material() -> Material {
    Material::new("Floor", Color::new(180, 180, 180))
}
