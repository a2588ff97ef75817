use crate::Point;
use crate::profiles::BeamProfile;
use crate::scene::{Color, Line, Material, RectangularExtrusion};
use ndarray as nd;
use std::f64::consts::PI;

pub const SAFETY_FACTOR: f64 = 1.5;
/// [Pa]
pub const YIELD_STRESS: f64 = 235e6;
/// [Pa]
pub const YOUNG_MODULUS: f64 = 210e9;

/// Unity check thresholds and their colours, from idle to overloaded.
pub const RAINBOW_SCALE: [(f64, Color); 6] = [
    (0.0, Color::new(72, 21, 170)),
    (0.2, Color::new(55, 131, 255)),
    (0.4, Color::new(77, 233, 76)),
    (0.6, Color::new(255, 238, 0)),
    (0.8, Color::new(255, 140, 0)),
    (1.0, Color::new(246, 0, 0)),
];

/// Colour of a unity check value on the rainbow scale.
pub fn rainbow_color(uc: f64) -> Color {
    let mut color = RAINBOW_SCALE[0].1;
    for (lim, c) in RAINBOW_SCALE {
        if uc >= lim {
            color = c;
        }
    }
    color
}

/// Straight steel member between two points.
///
/// The stiffness matrix and the element orientation (`dx`, `dy`, `theta`)
/// refer to the xy plane. Axial forces are positive in tension.
#[derive(Debug, Clone, PartialEq)]
pub struct Beam {
    pub start: Point,
    pub end: Point,
    pub profile: BeamProfile,
}

impl Beam {
    pub fn new(start: Point, end: Point, profile: BeamProfile) -> Self {
        Self { start, end, profile }
    }

    pub fn allowed_stress(&self) -> f64 {
        YIELD_STRESS / SAFETY_FACTOR
    }

    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }

    pub fn width(&self) -> f64 {
        self.profile.width
    }

    pub fn area(&self) -> f64 {
        self.profile.area
    }

    pub fn inertia(&self) -> f64 {
        self.profile.inertia
    }

    pub fn section_modulus(&self) -> f64 {
        self.profile.section_modulus
    }

    /// [kg]
    pub fn weight(&self) -> f64 {
        self.length() * self.profile.mass
    }

    pub fn ea(&self) -> f64 {
        YOUNG_MODULUS * self.area()
    }

    pub fn ei(&self) -> f64 {
        YOUNG_MODULUS * self.inertia()
    }

    pub fn dx(&self) -> f64 {
        self.end.x - self.start.x
    }

    pub fn dy(&self) -> f64 {
        self.end.y - self.start.y
    }

    pub fn theta(&self) -> f64 {
        self.dy().atan2(self.dx())
    }

    /// Element stiffness matrix in global coordinates, dofs `[x1, y1, x2, y2]`.
    pub fn stiffness_matrix(&self) -> nd::Array2<f64> {
        let l = self.length();
        let c = self.dx() / l;
        let s = self.dy() / l;
        let k = nd::arr2(&[
            [c * c, c * s, -c * c, -c * s],
            [c * s, s * s, -c * s, -s * s],
            [-c * c, -c * s, c * c, c * s],
            [-c * s, -s * s, c * s, s * s],
        ]);
        k * (self.ea() / l)
    }

    /// Axial stress [Pa] under `force` [N].
    pub fn stress(&self, force: f64) -> f64 {
        force / self.area()
    }

    pub fn uc_stress(&self, force: f64) -> f64 {
        self.stress(force).abs() / self.allowed_stress()
    }

    /// Euler buckling check, zero for members in tension.
    pub fn uc_buckling(&self, force: f64) -> f64 {
        if force >= 0. {
            return 0.;
        }
        let p_critical = self.ei() * (PI / self.length()).powi(2);
        -SAFETY_FACTOR * force / p_critical
    }

    /// Governing unity check.
    pub fn uc(&self, force: f64) -> f64 {
        self.uc_stress(force).max(self.uc_buckling(force))
    }

    pub fn utilisation_material(&self, force: f64) -> Material {
        Material::new("fem_scale", rainbow_color(self.uc(force)))
    }

    /// Square box of the profile width along the member axis.
    pub fn to_extrusion(&self) -> RectangularExtrusion {
        let w = self.width();
        RectangularExtrusion::new(w, w, Line::new(self.start, self.end))
    }
}
