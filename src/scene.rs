//! Scene objects: the 3D primitives the views are assembled from.
//!
//! Hierarchy: Group → SceneObject (RectangularExtrusion | Extrusion | Group)

pub mod axes;
pub mod extrusion;
pub mod group;
pub mod line;
pub mod material;
pub mod pattern;

pub use axes::CartesianAxes;
pub use extrusion::{Extrusion, RectangularExtrusion, is_clockwise};
pub use group::{Group, SceneObject};
pub use line::Line;
pub use material::{Color, Material};
pub use pattern::{bidirectional_pattern, linear_pattern};

use crate::{Point, Vector};
use anyhow::Result;

/// Rigid transforms shared by all scene objects.
///
/// Rotations are about an axis through the global origin.
pub trait Transform: Sized {
    fn translate(&mut self, v: Vector) -> &mut Self;

    /// Rotates counter-clockwise by `angle` (radians) around `axis` (right-hand rule).
    fn rotate(&mut self, angle: f64, axis: Vector) -> &mut Self;

    /// Returns a copy reflected about the plane through `point` with normal `normal`.
    fn mirror(&self, point: Point, normal: Vector) -> Result<Self>;
}

/// Reflects a free vector about a plane with unit normal `n`.
pub(crate) fn reflect_vector(v: Vector, n: Vector) -> Vector {
    v - n * (2. * v.dot(n))
}
