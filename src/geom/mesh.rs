//! Triangle meshes produced by scene objects.

use crate::Point;
use crate::geom::bboxes::bounding_box;
use crate::geom::triangles::{TriangleIndex, triangle_area};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A triangle mesh defined by vertices and face indices.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Mesh {
    pub vertices: Vec<Point>,
    pub faces: Vec<TriangleIndex>,
}

impl Mesh {
    pub fn new(vertices: Vec<Point>, faces: Vec<TriangleIndex>) -> Self {
        Self { vertices, faces }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Appends another mesh, shifting its face indices.
    pub fn extend(&mut self, other: Mesh) {
        let offset = self.vertices.len();
        self.vertices.extend(other.vertices);
        self.faces.extend(
            other
                .faces
                .into_iter()
                .map(|t| TriangleIndex(t.0 + offset, t.1 + offset, t.2 + offset)),
        );
    }

    /// Total area of all triangles.
    pub fn area(&self) -> f64 {
        self.faces
            .iter()
            .map(|t| triangle_area(self.vertices[t.0], self.vertices[t.1], self.vertices[t.2]))
            .sum()
    }

    /// Returns the `(min, max)` corners of the mesh, `None` if it has no vertices.
    pub fn bbox(&self) -> Option<(Point, Point)> {
        bounding_box(&self.vertices)
    }

    /// Returns a new mesh with duplicate vertices merged.
    ///
    /// Vertices are considered identical when they quantize to the same
    /// `(i64, i64, i64)` key at 1e9 scale (≈ 1 nm precision). Face indices
    /// are remapped accordingly.
    pub fn deduplicate_vertices(self) -> Self {
        const SCALE: f64 = 1e9;

        let mut key_map: HashMap<(i64, i64, i64), usize> = HashMap::new();
        let mut new_vertices: Vec<Point> = Vec::new();
        let mut old_to_new: Vec<usize> = Vec::with_capacity(self.vertices.len());

        for p in &self.vertices {
            let key = (
                (p.x * SCALE).round() as i64,
                (p.y * SCALE).round() as i64,
                (p.z * SCALE).round() as i64,
            );
            let new_idx = *key_map.entry(key).or_insert_with(|| {
                new_vertices.push(*p);
                new_vertices.len() - 1
            });
            old_to_new.push(new_idx);
        }

        let faces = self
            .faces
            .iter()
            .map(|t| TriangleIndex(old_to_new[t.0], old_to_new[t.1], old_to_new[t.2]))
            .collect();

        Self {
            vertices: new_vertices,
            faces,
        }
    }
}

/// Trait for types that can produce a triangulated [`Mesh`].
///
/// Implemented by every scene object so that exporters can work polymorphically.
pub trait HasMesh {
    /// Returns a fresh mesh for this entity.
    fn copy_mesh(&self) -> Mesh;
}
