//! Host mesh snapshot
//!
//! A [`MeshSnapshot`] is the only view of the host's mesh the pipeline ever
//! sees. It is filled once by the host adapter and never written back.

use super::mesh::Vertex;
use nalgebra::Matrix4;

/// A material bound to a slot of the host object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialSlot {
    /// Name of the bound material, `None` for an empty slot
    pub material: Option<String>,
    /// Whether the bound material is flagged for export
    pub exported: bool,
}

impl MaterialSlot {
    /// A slot bound to an exported material
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            material: Some(name.into()),
            exported: true,
        }
    }

    /// A slot with no material
    pub fn empty() -> Self {
        Self {
            material: None,
            exported: false,
        }
    }

    /// Set the export flag
    pub fn exported(mut self, exported: bool) -> Self {
        self.exported = exported;
        self
    }
}

/// A polygonal face: ordered vertex indices plus a material slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    /// Vertex indices in winding order (at least 3)
    pub vertices: Vec<usize>,
    /// Index into [`MeshSnapshot::material_slots`]
    pub material_slot: usize,
}

impl Face {
    /// Create a face using material slot 0
    pub fn new(vertices: impl Into<Vec<usize>>) -> Self {
        Self {
            vertices: vertices.into(),
            material_slot: 0,
        }
    }

    /// Set the material slot
    pub fn with_material_slot(mut self, slot: usize) -> Self {
        self.material_slot = slot;
        self
    }
}

/// Snapshot of a host mesh object
#[derive(Debug, Clone, PartialEq)]
pub struct MeshSnapshot {
    /// Host object name, used in messages
    pub name: String,
    /// Vertex positions in object-local coordinates
    pub vertices: Vec<Vertex>,
    /// Polygonal faces
    pub faces: Vec<Face>,
    /// Material slots of the object
    pub material_slots: Vec<MaterialSlot>,
    /// Object-to-world transform
    ///
    /// Identity when the host already applied the transform to `vertices`.
    pub matrix_world: Matrix4<f64>,
}

impl MeshSnapshot {
    /// Create an empty snapshot with an identity world transform
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vertices: Vec::new(),
            faces: Vec::new(),
            material_slots: Vec::new(),
            matrix_world: Matrix4::identity(),
        }
    }

    /// Set the vertices
    pub fn with_vertices(mut self, vertices: Vec<Vertex>) -> Self {
        self.vertices = vertices;
        self
    }

    /// Set the faces
    pub fn with_faces(mut self, faces: Vec<Face>) -> Self {
        self.faces = faces;
        self
    }

    /// Append a material slot
    pub fn with_material(mut self, slot: MaterialSlot) -> Self {
        self.material_slots.push(slot);
        self
    }

    /// Set the object-to-world transform
    pub fn with_matrix_world(mut self, matrix: Matrix4<f64>) -> Self {
        self.matrix_world = matrix;
        self
    }
}
