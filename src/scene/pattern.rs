use crate::Vector;
use crate::scene::{Group, SceneObject, Transform};

/// Repeats `base` `number_of_elements` times along `direction` at `spacing`.
///
/// The first element is `base` in place. `direction` is normalized; a zero
/// vector puts every copy on top of the base.
pub fn linear_pattern(
    base: impl Into<SceneObject>,
    direction: Vector,
    number_of_elements: usize,
    spacing: f64,
) -> Group {
    let base: SceneObject = base.into();
    let dir = direction.normalize().unwrap_or(direction);
    let objects = (0..number_of_elements)
        .map(|i| {
            let mut copy = base.clone();
            copy.translate(dir * (spacing * i as f64));
            copy
        })
        .collect();
    Group::new(objects)
}

/// Repeats `base` on a grid spanned by two directions.
///
/// Element `(i, j)` is translated by `i * spacing_1` along `direction_1`
/// and `j * spacing_2` along `direction_2`; element `(0, 0)` is `base` in place.
pub fn bidirectional_pattern(
    base: impl Into<SceneObject>,
    direction_1: Vector,
    direction_2: Vector,
    number_of_elements_1: usize,
    number_of_elements_2: usize,
    spacing_1: f64,
    spacing_2: f64,
) -> Group {
    let row = linear_pattern(base, direction_1, number_of_elements_1, spacing_1);
    let dir_2 = direction_2.normalize().unwrap_or(direction_2);
    let mut objects: Vec<SceneObject> =
        Vec::with_capacity(number_of_elements_1 * number_of_elements_2);
    for j in 0..number_of_elements_2 {
        for o in row.objects() {
            let mut copy = o.clone();
            copy.translate(dir_2 * (spacing_2 * j as f64));
            objects.push(copy);
        }
    }
    Group::new(objects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Line, RectangularExtrusion};
    use crate::{HasMesh, Point};

    fn column() -> RectangularExtrusion {
        RectangularExtrusion::new(0.2, 0.2, Line::new(Point::origin(), Point::new(0., 0., 3.)))
    }

    #[test]
    fn test_linear_pattern() {
        let pattern = linear_pattern(column(), Vector::new(0., 0., 2.), 4, 4.);
        assert_eq!(pattern.len(), 4);
        let (_, pmax) = pattern.copy_mesh().bbox().unwrap();
        assert!((pmax.z - 15.).abs() < 1e-12);
    }

    #[test]
    fn test_linear_pattern_zero_elements() {
        assert!(linear_pattern(column(), Vector::unit_x(), 0, 1.).is_empty());
    }

    #[test]
    fn test_bidirectional_pattern() {
        let pattern =
            bidirectional_pattern(column(), Vector::unit_x(), Vector::unit_y(), 3, 2, 5., 10.);
        assert_eq!(pattern.len(), 6);
        let (pmin, pmax) = pattern.copy_mesh().bbox().unwrap();
        assert!((pmin.x + 0.1).abs() < 1e-12);
        assert!((pmax.x - 10.1).abs() < 1e-12);
        assert!((pmax.y - 10.1).abs() < 1e-12);
    }
}
