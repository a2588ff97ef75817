use crate::Vector;
use crate::geom::EPS;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn origin() -> Self {
        Self::new(0., 0., 0.)
    }

    /// Returns true if both points are very close to each other.
    pub fn is_close(&self, other: &Self) -> bool {
        (self.x - other.x).abs() < EPS
            && (self.y - other.y).abs() < EPS
            && (self.z - other.z).abs() < EPS
    }

    /// Distance between two points.
    pub fn distance(&self, other: &Self) -> f64 {
        (*other - *self).length()
    }

    /// Reflects the point about the plane through `plane_pt` with normal `normal`.
    ///
    /// Returns `None` if the normal has zero length.
    pub fn mirror(&self, plane_pt: Point, normal: Vector) -> Option<Self> {
        let n = normal.normalize()?;
        let dist = (*self - plane_pt).dot(n);
        Some(*self + n * (-2. * dist))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prec = f.precision().unwrap_or(2); // Default 2 decimals
        write!(
            f,
            "Point({:.prec$}, {:.prec$}, {:.prec$})",
            self.x,
            self.y,
            self.z,
            prec = prec
        )
    }
}

impl Add<Vector> for Point {
    type Output = Point;
    fn add(self, other: Vector) -> Self {
        Self {
            x: self.x + other.dx,
            y: self.y + other.dy,
            z: self.z + other.dz,
        }
    }
}

// Point - Point gives the vector from `other` to `self`
impl Sub for Point {
    type Output = Vector;
    fn sub(self, other: Self) -> Vector {
        Vector::from_points(other, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_close() {
        let pa = Point::new(5., 5., 5.);
        let pb = Point::new(5.00000000001, 5., 5.);
        let pc = Point::new(5.0001, 5., 5.);
        assert!(pa.is_close(&pb));
        assert!(!pa.is_close(&pc));
    }

    #[test]
    fn test_sub_and_distance() {
        let p0 = Point::new(1., 1., 1.);
        let p1 = Point::new(4., 5., 1.);
        assert!((p1 - p0).is_close(&Vector::new(3., 4., 0.)));
        assert!((p0.distance(&p1) - 5.).abs() < 1e-12);
    }

    #[test]
    fn test_mirror() {
        let p = Point::new(1., 2., 3.);
        let m = p
            .mirror(Point::new(5., 0., 0.), Vector::new(1., 0., 0.))
            .unwrap();
        assert!(m.is_close(&Point::new(9., 2., 3.)));
        assert!(p.mirror(Point::origin(), Vector::new(0., 0., 0.)).is_none());
    }
}
