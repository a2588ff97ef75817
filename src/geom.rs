pub mod bboxes;
pub mod mesh;
pub mod point;
pub mod rotation;
pub mod triangles;
pub mod vector;

/// Geometric precision
pub const EPS: f64 = 1e-9;

/// Tolerance comparison for scalars.
pub trait IsClose {
    fn is_close(&self, other: f64) -> bool;
}

impl IsClose for f64 {
    fn is_close(&self, other: f64) -> bool {
        (self - other).abs() < EPS
    }
}
