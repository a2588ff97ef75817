use crate::scene::{Extrusion, Material, RectangularExtrusion, Transform};
use crate::{HasMesh, Mesh, Point, UID, Vector};
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Any object that can be placed in a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SceneObject {
    RectangularExtrusion(RectangularExtrusion),
    Extrusion(Extrusion),
    Group(Group),
}

impl From<RectangularExtrusion> for SceneObject {
    fn from(value: RectangularExtrusion) -> Self {
        Self::RectangularExtrusion(value)
    }
}

impl From<Extrusion> for SceneObject {
    fn from(value: Extrusion) -> Self {
        Self::Extrusion(value)
    }
}

impl From<Group> for SceneObject {
    fn from(value: Group) -> Self {
        Self::Group(value)
    }
}

impl SceneObject {
    /// Number of leaf primitives (extrusions) under this object.
    pub fn primitive_count(&self) -> usize {
        match self {
            Self::Group(g) => g.primitive_count(),
            _ => 1,
        }
    }

    /// Overrides the material of every primitive under this object.
    pub fn set_material(&mut self, material: &Material) {
        match self {
            Self::RectangularExtrusion(e) => e.material = Some(material.clone()),
            Self::Extrusion(e) => e.material = Some(material.clone()),
            Self::Group(g) => g.set_material(material),
        }
    }
}

impl HasMesh for SceneObject {
    fn copy_mesh(&self) -> Mesh {
        match self {
            Self::RectangularExtrusion(e) => e.copy_mesh(),
            Self::Extrusion(e) => e.copy_mesh(),
            Self::Group(g) => g.copy_mesh(),
        }
    }
}

impl Transform for SceneObject {
    fn translate(&mut self, v: Vector) -> &mut Self {
        match self {
            Self::RectangularExtrusion(e) => {
                e.translate(v);
            }
            Self::Extrusion(e) => {
                e.translate(v);
            }
            Self::Group(g) => {
                g.translate(v);
            }
        }
        self
    }

    fn rotate(&mut self, angle: f64, axis: Vector) -> &mut Self {
        match self {
            Self::RectangularExtrusion(e) => {
                e.rotate(angle, axis);
            }
            Self::Extrusion(e) => {
                e.rotate(angle, axis);
            }
            Self::Group(g) => {
                g.rotate(angle, axis);
            }
        }
        self
    }

    fn mirror(&self, point: Point, normal: Vector) -> Result<Self> {
        Ok(match self {
            Self::RectangularExtrusion(e) => Self::RectangularExtrusion(e.mirror(point, normal)?),
            Self::Extrusion(e) => Self::Extrusion(e.mirror(point, normal)?),
            Self::Group(g) => Self::Group(g.mirror(point, normal)?),
        })
    }
}

/// Ordered collection of scene objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub name: Option<String>,
    pub uid: UID,
    objects: Vec<SceneObject>,
}

impl Group {
    pub fn new(objects: Vec<SceneObject>) -> Self {
        Self {
            name: None,
            uid: UID::new(),
            objects,
        }
    }

    pub fn named(name: &str, objects: Vec<SceneObject>) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Self::new(objects)
        }
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn add(&mut self, object: impl Into<SceneObject>) {
        self.objects.push(object.into());
    }

    /// Number of leaf primitives in the whole tree.
    pub fn primitive_count(&self) -> usize {
        self.objects.iter().map(|o| o.primitive_count()).sum()
    }

    /// Depth-first lookup of a sub-group by name (including `self`).
    pub fn find(&self, name: &str) -> Option<&Group> {
        if self.name.as_deref() == Some(name) {
            return Some(self);
        }
        self.objects.iter().find_map(|o| match o {
            SceneObject::Group(g) => g.find(name),
            _ => None,
        })
    }

    /// All primitives in depth-first order.
    pub fn primitives(&self) -> Vec<&SceneObject> {
        let mut out = Vec::new();
        for o in self.objects.iter() {
            match o {
                SceneObject::Group(g) => out.extend(g.primitives()),
                _ => out.push(o),
            }
        }
        out
    }

    pub fn set_material(&mut self, material: &Material) {
        for o in self.objects.iter_mut() {
            o.set_material(material);
        }
    }

    /// Appends a copy of the current content mirrored about a plane.
    pub fn add_mirrored(&mut self, point: Point, normal: Vector) -> Result<()> {
        let mirrored = self.mirror(point, normal)?;
        self.add(mirrored);
        Ok(())
    }
}

impl HasMesh for Group {
    fn copy_mesh(&self) -> Mesh {
        let mut mesh = Mesh::default();
        for o in self.objects.iter() {
            mesh.extend(o.copy_mesh());
        }
        mesh
    }
}

impl Transform for Group {
    fn translate(&mut self, v: Vector) -> &mut Self {
        for o in self.objects.iter_mut() {
            o.translate(v);
        }
        self
    }

    fn rotate(&mut self, angle: f64, axis: Vector) -> &mut Self {
        for o in self.objects.iter_mut() {
            o.rotate(angle, axis);
        }
        self
    }

    fn mirror(&self, point: Point, normal: Vector) -> Result<Self> {
        let objects = self
            .objects
            .iter()
            .map(|o| o.mirror(point, normal))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            name: self.name.clone(),
            uid: UID::new(),
            objects,
        })
    }
}
