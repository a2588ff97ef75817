use crate::geom::EPS;
use crate::geom::rotation::{rotate_points_around_vector, rotate_vector_around_vector};
use crate::geom::triangles::{TriangleIndex, triangulate};
use crate::scene::{Line, Material, Transform, reflect_vector};
use crate::{HasMesh, Mesh, Point, Vector};
use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Box with a `width × height` cross-section swept along a line.
///
/// The width is measured along `width_dir`, the height along
/// `line direction × width_dir`. For a horizontal line the width lies in the
/// horizontal plane and the height is vertical. For a vertical line the width
/// runs along x and the height along y.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectangularExtrusion {
    pub width: f64,
    pub height: f64,
    pub line: Line,
    pub width_dir: Vector,
    pub material: Option<Material>,
}

impl RectangularExtrusion {
    pub fn new(width: f64, height: f64, line: Line) -> Self {
        let width_dir = default_width_dir(&line);
        Self {
            width,
            height,
            line,
            width_dir,
            material: None,
        }
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = Some(material);
        self
    }

    /// Unit frame `(width axis, height axis)` perpendicular to the line.
    fn cross_section_axes(&self) -> Option<(Vector, Vector)> {
        let d = self.line.direction()?;
        let w = (self.width_dir - d * self.width_dir.dot(d))
            .normalize()
            .or_else(|| default_width_dir(&self.line).normalize())?;
        let h = d.cross(w);
        Some((w, h))
    }

    /// The 8 corners: 4 at the line start followed by 4 at the line end.
    pub fn corners(&self) -> Option<[Point; 8]> {
        let (w, h) = self.cross_section_axes()?;
        let hw = w * (self.width / 2.);
        let hh = h * (self.height / 2.);
        let offsets = [-hw - hh, hw - hh, hw + hh, -hw + hh];
        let s = self.line.start;
        let e = self.line.end;
        Some([
            s + offsets[0],
            s + offsets[1],
            s + offsets[2],
            s + offsets[3],
            e + offsets[0],
            e + offsets[1],
            e + offsets[2],
            e + offsets[3],
        ])
    }

    pub fn volume(&self) -> f64 {
        self.width * self.height * self.line.length()
    }
}

fn default_width_dir(line: &Line) -> Vector {
    match line.direction() {
        Some(d) => Vector::unit_z()
            .cross(d)
            .normalize()
            .unwrap_or(Vector::unit_x()),
        None => Vector::unit_x(),
    }
}

impl HasMesh for RectangularExtrusion {
    fn copy_mesh(&self) -> Mesh {
        let corners = match self.corners() {
            Some(c) => c,
            None => return Mesh::default(),
        };
        let mut faces = vec![
            // Start cap faces against the line direction
            TriangleIndex(0, 3, 2),
            TriangleIndex(0, 2, 1),
            TriangleIndex(4, 5, 6),
            TriangleIndex(4, 6, 7),
        ];
        for i in 0..4 {
            let j = (i + 1) % 4;
            faces.push(TriangleIndex(i, j, j + 4));
            faces.push(TriangleIndex(i, j + 4, i + 4));
        }
        Mesh::new(corners.to_vec(), faces)
    }
}

impl Transform for RectangularExtrusion {
    fn translate(&mut self, v: Vector) -> &mut Self {
        self.line.start = self.line.start + v;
        self.line.end = self.line.end + v;
        self
    }

    fn rotate(&mut self, angle: f64, axis: Vector) -> &mut Self {
        let pts = rotate_points_around_vector(&[self.line.start, self.line.end], &axis, angle);
        self.line = Line::new(pts[0], pts[1]);
        self.width_dir = rotate_vector_around_vector(&self.width_dir, &axis, angle);
        self
    }

    fn mirror(&self, point: Point, normal: Vector) -> Result<Self> {
        let n = normal.normalize().ok_or_else(zero_normal)?;
        let mut copy = self.clone();
        copy.line = Line::new(
            self.line.start.mirror(point, n).ok_or_else(zero_normal)?,
            self.line.end.mirror(point, n).ok_or_else(zero_normal)?,
        );
        copy.width_dir = reflect_vector(self.width_dir, n);
        Ok(copy)
    }
}

/// Closed planar profile swept along a vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extrusion {
    /// Profile vertices in 3D, without a repeated closing point.
    pub profile: Vec<Point>,
    pub direction: Vector,
    pub material: Option<Material>,
}

impl Extrusion {
    /// Places `profile` (x, y coordinates) in the plane perpendicular to `line`
    /// at its start and sweeps it to the line end.
    ///
    /// For a vertical line the profile keeps its global x and y coordinates.
    /// A closing point equal to the first one is dropped.
    pub fn new(profile: &[Point], line: Line) -> Result<Self> {
        let d = line
            .direction()
            .ok_or_else(|| anyhow!("Extrusion line cannot have zero length"))?;
        let u = if d.cross(Vector::unit_z()).length() < EPS {
            Vector::unit_x()
        } else {
            Vector::unit_z()
                .cross(d)
                .normalize()
                .context("Cannot build the extrusion frame")?
        };
        let v = d.cross(u);

        let mut pts: Vec<Point> = profile
            .iter()
            .map(|p| line.start + u * p.x + v * p.y)
            .collect();
        if pts.len() > 1 && pts[0].is_close(&pts[pts.len() - 1]) {
            pts.pop();
        }
        if pts.len() < 3 {
            return Err(anyhow!(
                "Extrusion profile needs at least 3 distinct points, got {}",
                pts.len()
            ));
        }

        Ok(Self {
            profile: pts,
            direction: line.vector(),
            material: None,
        })
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = Some(material);
        self
    }

    /// Extruded profile at the far end.
    pub fn top_profile(&self) -> Vec<Point> {
        self.profile.iter().map(|p| *p + self.direction).collect()
    }
}

impl HasMesh for Extrusion {
    fn copy_mesh(&self) -> Mesh {
        let n = match Vector::newell_normal(&self.profile) {
            Some(n) => n,
            None => return Mesh::default(),
        };
        let caps = match triangulate(&self.profile, n) {
            Ok(tri) => tri,
            Err(_) => return Mesh::default(),
        };
        let num = self.profile.len();
        let along = n.dot(self.direction) > 0.;

        let mut vertices = self.profile.clone();
        vertices.extend(self.top_profile());

        let mut faces: Vec<TriangleIndex> = Vec::with_capacity(2 * caps.len() + 2 * num);
        for t in caps.iter() {
            // Bottom cap faces against the direction, top cap along it
            if along {
                faces.push(TriangleIndex(t.0, t.2, t.1));
                faces.push(TriangleIndex(t.0 + num, t.1 + num, t.2 + num));
            } else {
                faces.push(TriangleIndex(t.0, t.1, t.2));
                faces.push(TriangleIndex(t.0 + num, t.2 + num, t.1 + num));
            }
        }
        for i in 0..num {
            let j = (i + 1) % num;
            if along {
                faces.push(TriangleIndex(i, j, j + num));
                faces.push(TriangleIndex(i, j + num, i + num));
            } else {
                faces.push(TriangleIndex(i, j + num, j));
                faces.push(TriangleIndex(i, i + num, j + num));
            }
        }

        Mesh::new(vertices, faces)
    }
}

impl Transform for Extrusion {
    fn translate(&mut self, v: Vector) -> &mut Self {
        for p in self.profile.iter_mut() {
            *p = *p + v;
        }
        self
    }

    fn rotate(&mut self, angle: f64, axis: Vector) -> &mut Self {
        self.profile = rotate_points_around_vector(&self.profile, &axis, angle);
        self.direction = rotate_vector_around_vector(&self.direction, &axis, angle);
        self
    }

    fn mirror(&self, point: Point, normal: Vector) -> Result<Self> {
        let n = normal.normalize().ok_or_else(zero_normal)?;
        Ok(Self {
            profile: self
                .profile
                .iter()
                .map(|p| p.mirror(point, n).ok_or_else(zero_normal))
                .collect::<Result<Vec<_>>>()?,
            direction: reflect_vector(self.direction, n),
            material: self.material.clone(),
        })
    }
}

fn zero_normal() -> anyhow::Error {
    anyhow!("Mirror plane normal cannot have zero length")
}

/// Checks if a planar profile runs clockwise when seen from +z.
///
/// A repeated closing point is allowed.
pub fn is_clockwise(profile: &[Point]) -> bool {
    let mut area2 = 0.;
    for (i, p) in profile.iter().enumerate() {
        let q = profile[(i + 1) % profile.len()];
        area2 += p.x * q.y - q.x * p.y;
    }
    area2 < 0.
}
