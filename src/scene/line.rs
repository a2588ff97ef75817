use crate::{Point, Vector};
use serde::{Deserialize, Serialize};

/// Straight segment between two points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub start: Point,
    pub end: Point,
}

impl Line {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }

    /// Vector from start to end.
    pub fn vector(&self) -> Vector {
        self.end - self.start
    }

    /// Unit direction, `None` for a zero-length line.
    pub fn direction(&self) -> Option<Vector> {
        self.vector().normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_and_direction() {
        let line = Line::new(Point::new(0., 0., 1.), Point::new(0., 0., 4.));
        assert!((line.length() - 3.).abs() < 1e-12);
        assert!(line.direction().unwrap().is_close(&Vector::unit_z()));
        let degenerate = Line::new(Point::origin(), Point::origin());
        assert!(degenerate.direction().is_none());
    }
}
