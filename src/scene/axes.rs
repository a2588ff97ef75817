use crate::scene::{Color, Group, Line, Material, RectangularExtrusion};
use crate::{Point, Vector};

/// Marker for the global coordinate system: red x, green y and blue z bars.
pub struct CartesianAxes;

impl CartesianAxes {
    pub fn new(origin: Point, axis_length: f64, axis_diameter: f64) -> Group {
        let axes = [
            (Vector::unit_x(), Color::red(), "x"),
            (Vector::unit_y(), Color::green(), "y"),
            (Vector::unit_z(), Color::blue(), "z"),
        ];
        let objects = axes
            .into_iter()
            .map(|(dir, color, name)| {
                let line = Line::new(origin, origin + dir * axis_length);
                RectangularExtrusion::new(axis_diameter, axis_diameter, line)
                    .with_material(Material::new(name, color))
                    .into()
            })
            .collect();
        Group::named("axes", objects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneObject;

    #[test]
    fn test_axes() {
        let axes = CartesianAxes::new(Point::origin(), 10., 0.1);
        assert_eq!(axes.len(), 3);
        match &axes.objects()[2] {
            SceneObject::RectangularExtrusion(e) => {
                assert!(e.line.end.is_close(&Point::new(0., 0., 10.)));
                assert_eq!(e.material.as_ref().map(|m| m.color), Some(Color::blue()));
            }
            _ => panic!("expected an extrusion"),
        }
    }
}
