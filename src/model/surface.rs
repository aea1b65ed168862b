//! Exported triangulated surface

use super::mesh::TriMesh;
use crate::error::{Error, Result};

/// Triangulated boundary surface ready for the namelist serializer
///
/// Face indices follow the 1-based convention of the output format: vertex
/// indices are in `1..=vertices.len()` and material indices in
/// `1..=materials.len()`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedSurface {
    /// Deduplicated material names, in slot order
    pub materials: Vec<String>,
    /// Vertex coordinates after transform and unit scaling
    pub vertices: Vec<(f64, f64, f64)>,
    /// Triangles as `(v1, v2, v3, material)`, all 1-based
    pub faces: Vec<(u32, u32, u32, u32)>,
}

impl ExportedSurface {
    /// Flatten a mesh and its material list into the output convention
    ///
    /// # Errors
    /// Returns [`Error::IndexOverflow`] if an index does not fit in `u32`,
    /// and [`Error::InvalidSnapshot`] if a triangle references a material
    /// outside `materials`.
    pub fn from_mesh(mesh: &TriMesh, materials: &[String]) -> Result<Self> {
        let vertices = mesh.vertices.iter().map(|v| (v.x, v.y, v.z)).collect();

        let mut faces = Vec::with_capacity(mesh.triangles.len());
        for (t, tri) in mesh.triangles.iter().enumerate() {
            if tri.material >= materials.len() {
                return Err(Error::InvalidSnapshot(format!(
                    "triangle {} references material {} but only {} material(s) exist",
                    t,
                    tri.material,
                    materials.len()
                )));
            }
            faces.push((
                one_based(tri.v1, "vertex")?,
                one_based(tri.v2, "vertex")?,
                one_based(tri.v3, "vertex")?,
                one_based(tri.material, "material")?,
            ));
        }

        Ok(Self {
            materials: materials.to_vec(),
            vertices,
            faces,
        })
    }

    /// Vertex coordinates as one flat sequence (`VERTS`)
    pub fn flat_vertices(&self) -> Vec<f64> {
        self.vertices
            .iter()
            .flat_map(|&(x, y, z)| [x, y, z])
            .collect()
    }

    /// Face records as one flat sequence (`FACES`)
    pub fn flat_faces(&self) -> Vec<u32> {
        self.faces
            .iter()
            .flat_map(|&(a, b, c, m)| [a, b, c, m])
            .collect()
    }
}

fn one_based(index: usize, what: &str) -> Result<u32> {
    index
        .checked_add(1)
        .and_then(|i| u32::try_from(i).ok())
        .ok_or_else(|| Error::IndexOverflow(format!("{} index {} exceeds u32 range", what, index)))
}
