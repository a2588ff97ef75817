//! 3D geometry returned by the building and structure views.

use crate::scene::Group;
use crate::{HasMesh, Mesh};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryResult {
    pub geometry: Group,
}

impl GeometryResult {
    pub fn new(geometry: Group) -> Self {
        Self { geometry }
    }

    pub fn primitive_count(&self) -> usize {
        self.geometry.primitive_count()
    }
}

impl HasMesh for GeometryResult {
    fn copy_mesh(&self) -> Mesh {
        self.geometry.copy_mesh()
    }
}
