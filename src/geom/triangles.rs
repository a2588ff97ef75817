use crate::Point;
use crate::geom::EPS;
use crate::geom::IsClose;
use crate::geom::vector::Vector;
use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

/// Type for holding vertex indices for a triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriangleIndex(pub usize, pub usize, pub usize);

/// Triangulates the planar polygon `pts` with the ear-clipping algorithm.
///
/// `vn` is the polygon normal. Vertices must be ordered counter-clockwise
/// when looking against `vn`. The returned triangles index into `pts` and
/// keep the same orientation.
pub fn triangulate(pts: &[Point], vn: Vector) -> Result<Vec<TriangleIndex>> {
    let vn = vn
        .normalize()
        .ok_or_else(|| anyhow!("Normal vector cannot have zero length"))?;
    if pts.len() < 3 {
        return Err(anyhow!("Polygon needs at least 3 points, got {}", pts.len()));
    }

    let mut vertices: Vec<usize> = (0..pts.len()).collect();
    let mut triangles: Vec<TriangleIndex> = Vec::with_capacity(pts.len() - 2);
    let mut pos: usize = 0;
    let mut num_fail: usize = 0;

    while vertices.len() > 2 {
        if num_fail > vertices.len() {
            return Err(anyhow!(
                "Ear-clipping algorithm failed ({} vertices left)",
                vertices.len()
            ));
        }

        // If last vertex, start from the beginning
        if pos >= vertices.len() {
            pos = 0;
        }

        let prev_pos = if pos > 0 { pos - 1 } else { vertices.len() - 1 };
        let next_pos = if pos < vertices.len() - 1 { pos + 1 } else { 0 };

        let prev_id = vertices[prev_pos];
        let curr_id = vertices[pos];
        let next_id = vertices[next_pos];

        if is_corner_convex(&pts[prev_id], &pts[curr_id], &pts[next_id], &vn) {
            // Needed for non-convex polygons
            let any_point_inside = vertices.iter().any(|&test_id| {
                ![prev_id, curr_id, next_id].contains(&test_id)
                    && is_point_inside_triangle(
                        pts[test_id],
                        pts[prev_id],
                        pts[curr_id],
                        pts[next_id],
                        &vn,
                    )
            });
            if !any_point_inside {
                triangles.push(TriangleIndex(prev_id, curr_id, next_id));
                vertices.remove(pos);
                num_fail = 0;
                continue;
            }
        } else if vertices.len() == 3
            && (pts[curr_id] - pts[prev_id])
                .cross(pts[next_id] - pts[curr_id])
                .length()
                < EPS
        {
            // Remaining collinear sliver
            break;
        }
        num_fail += 1;
        pos += 1;
    }

    Ok(triangles)
}

/// Checks if the corner p1->p2->p3 turns counter-clockwise around `vn`.
pub fn is_corner_convex(p1: &Point, p2: &Point, p3: &Point, vn: &Vector) -> bool {
    let v1 = *p2 - *p1;
    let v2 = *p3 - *p2;
    v1.cross(v2).dot(*vn) > EPS
}

/// Tests if point `ptest` is inside (or on the edge of) the triangle `(p1, p2, p3)`.
///
/// Uses the "same side technique" with the polygon normal `vn`.
/// The test does not check whether the point is coplanar with the triangle.
pub fn is_point_inside_triangle(
    ptest: Point,
    p1: Point,
    p2: Point,
    p3: Point,
    vn: &Vector,
) -> bool {
    let side = |a: Point, b: Point| (b - a).cross(ptest - a).dot(*vn);
    let s1 = side(p1, p2);
    let s2 = side(p2, p3);
    let s3 = side(p3, p1);
    s1 >= -EPS && s2 >= -EPS && s3 >= -EPS
}

/// Area of a triangle.
pub fn triangle_area(p1: Point, p2: Point, p3: Point) -> f64 {
    let area = (p2 - p1).cross(p3 - p1).length() / 2.;
    if area.is_close(0.) { 0. } else { area }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total_area(pts: &[Point], tri: &[TriangleIndex]) -> f64 {
        tri.iter()
            .map(|t| triangle_area(pts[t.0], pts[t.1], pts[t.2]))
            .sum()
    }

    #[test]
    fn test_triangulate_square() -> Result<()> {
        let pts = vec![
            Point::new(0., 0., 0.),
            Point::new(1., 0., 0.),
            Point::new(1., 1., 0.),
            Point::new(0., 1., 0.),
        ];
        let tri = triangulate(&pts, Vector::unit_z())?;
        assert_eq!(tri.len(), 2);
        assert!((total_area(&pts, &tri) - 1.).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_triangulate_u_shape() -> Result<()> {
        let mut pts = vec![
            Point::new(0., 0., 0.),
            Point::new(1., 0., 0.),
            Point::new(1., 1., 0.),
            Point::new(2., 1., 0.),
            Point::new(2., 0., 0.),
            Point::new(3., 0., 0.),
            Point::new(3., 2., 0.),
            Point::new(0., 2., 0.),
        ];
        let vn = Vector::unit_z();

        // Test at different starting points
        for _ in 0..pts.len() {
            pts.rotate_right(1);
            let tri = triangulate(&pts, vn)?;
            assert_eq!(tri.len(), 6);
            assert!((total_area(&pts, &tri) - 5.).abs() < 1e-12);
            for ix in tri.iter() {
                let tri_vn = Vector::normal(pts[ix.0], pts[ix.1], pts[ix.2]).unwrap();
                assert!(tri_vn.is_close(&vn));
            }
        }
        Ok(())
    }

    #[test]
    fn test_triangulate_wrong_orientation_fails() {
        let pts = vec![
            Point::new(0., 0., 0.),
            Point::new(0., 1., 0.),
            Point::new(1., 1., 0.),
            Point::new(1., 0., 0.),
        ];
        assert!(triangulate(&pts, Vector::unit_z()).is_err());
        assert!(triangulate(&pts, -Vector::unit_z()).is_ok());
    }

    #[test]
    fn test_is_point_inside_triangle() {
        let p1 = Point::new(0., 0., 0.);
        let p2 = Point::new(1., 0., 0.);
        let p3 = Point::new(0., 1., 0.);
        let vn = Vector::unit_z();

        assert!(is_point_inside_triangle(Point::new(0.1, 0.1, 0.), p1, p2, p3, &vn));
        assert!(is_point_inside_triangle(Point::new(0.5, 0.5, 0.), p1, p2, p3, &vn));
        assert!(!is_point_inside_triangle(Point::new(0.51, 0.51, 0.), p1, p2, p3, &vn));
    }
}
