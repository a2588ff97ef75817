//! Parametric warehouse configurator.
//!
//! A building of an office and a warehouse is described by
//! [`WarehouseParams`]. The [`WarehouseController`] turns the parameters into
//! a map of the plot, a 3D massing model of the exterior or the steel
//! structure.

pub mod geo;
pub mod geom;
pub mod io;
pub mod model;
pub mod params;
pub mod profiles;
pub mod scene;
pub mod sim;
mod uid;
pub mod vecutils;
pub mod views;

// Prelude
pub use geom::mesh::{HasMesh, Mesh};
pub use geom::point::Point;
pub use geom::triangles::TriangleIndex;
pub use geom::vector::Vector;
pub use geom::IsClose;
pub use params::WarehouseParams;
pub use uid::UID;
pub use views::{GeometryResult, MapResult, WarehouseController};
