//! File I/O: parameter files in, scenes, GeoJSON and STL out.

pub mod geojson;
pub mod params;
pub mod scene;
pub mod stl;

pub use geojson::{to_geojson_string, write_geojson};
pub use params::{params_from_str, read_params, write_params};
pub use scene::{read_scene, to_scene_string, write_scene};
pub use stl::{StlFormat, read_stl, write_stl};
