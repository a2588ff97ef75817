use crate::Point;
use crate::Vector;
use crate::geom::IsClose;
use ndarray as nd;

/// Calculate rotation matrix for a unit vector `u` and angle `phi`.
///
/// Uses Rodrigues' formula, which is numerically more stable than
/// expanding the full axis-angle matrix:
/// https://en.wikipedia.org/wiki/Rodrigues%27_rotation_formula
///
/// The rotation is counter-clockwise when looking against `u`
/// (right-hand rule).
pub fn rotation_matrix(u: &Vector, phi: f64) -> nd::Array2<f64> {
    debug_assert!(u.length().is_close(1.), "rotation axis must be a unit vector");

    let w: nd::Array2<f64> = nd::arr2(&[[0., -u.dz, u.dy], [u.dz, 0., -u.dx], [-u.dy, u.dx, 0.]]);

    nd::Array::eye(3) + phi.sin() * &w + (2. * (phi / 2.).sin().powi(2)) * w.dot(&w)
}

/// Rotate points using the rotation matrix `rot`
pub fn rotate_points(pts: &[Point], rot: &nd::ArrayView2<f64>) -> Vec<Point> {
    // One point per row
    let arr = nd::Array2::from_shape_fn((pts.len(), 3), |(i, j)| match j {
        0 => pts[i].x,
        1 => pts[i].y,
        _ => pts[i].z,
    });

    arr.dot(rot)
        .rows()
        .into_iter()
        .map(|row| Point::new(row[0], row[1], row[2]))
        .collect()
}

/// Rotate points around the axis `u` (through the origin) with the angle `phi` (radians).
///
/// `u` does not need to be normalized. A zero-length axis or a zero angle
/// returns the points unchanged.
pub fn rotate_points_around_vector(pts: &[Point], u: &Vector, phi: f64) -> Vec<Point> {
    let u = match u.normalize() {
        Some(u) => u,
        None => return pts.to_vec(),
    };
    if phi.abs().is_close(0.) || pts.is_empty() {
        return pts.to_vec();
    }
    let rot = rotation_matrix(&u, phi);

    rotate_points(pts, &rot.t())
}

/// Rotate a free vector around the axis `u` with the angle `phi` (radians).
pub fn rotate_vector_around_vector(v: &Vector, u: &Vector, phi: f64) -> Vector {
    let pt = rotate_points_around_vector(&[Point::origin() + *v], u, phi)[0];
    Vector::from_a_point(pt)
}

/// Rotate a 2D point counter-clockwise by `angle` (radians) around `origin`.
pub fn rotate_2d(origin: (f64, f64), point: (f64, f64), angle: f64) -> (f64, f64) {
    let (ox, oy) = origin;
    let (px, py) = point;

    let qx = ox + angle.cos() * (px - ox) - angle.sin() * (py - oy);
    let qy = oy + angle.sin() * (px - ox) + angle.cos() * (py - oy);
    (qx, qy)
}
