//! Geometry extraction
//!
//! Flattens a [`MeshSnapshot`] into a [`TriMesh`]: material preconditions are
//! checked first, then every face is triangulated, every vertex is mapped
//! through the world transform and multiplied by the unit scale.

use crate::config::Triangulation;
use crate::error::{Error, Result};
use crate::mesh_ops;
use crate::model::{MeshSnapshot, TriMesh, Triangle};
use crate::polygon_triangulation::{self, TriangulationError};
use nalgebra::Matrix4;
use tracing::debug;

/// Result of extracting a snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// Triangulated mesh in world coordinates, unit-scaled
    pub mesh: TriMesh,
    /// Deduplicated material names, in slot order
    pub materials: Vec<String>,
}

/// Extract a snapshot with fan triangulation
///
/// # Errors
/// Fails with a precondition error (`NoMaterial`, `EmptyMaterialSlot`,
/// `MaterialNotExported`) before any geometry work, and with
/// `InvalidSnapshot` for malformed faces or coordinates.
pub fn extract(snapshot: &MeshSnapshot, unit_scale: f64) -> Result<Extraction> {
    extract_with(snapshot, unit_scale, Triangulation::Fan)
}

/// Extract a snapshot with an explicit triangulation policy
pub fn extract_with(
    snapshot: &MeshSnapshot,
    unit_scale: f64,
    triangulation: Triangulation,
) -> Result<Extraction> {
    debug!(
        object = %snapshot.name,
        vertices = snapshot.vertices.len(),
        faces = snapshot.faces.len(),
        unit_scale,
        "extracting surface"
    );
    let (materials, slot_map) = collect_materials(snapshot)?;
    let mesh = build_mesh(
        snapshot,
        &snapshot.matrix_world,
        unit_scale,
        triangulation,
        Some(&slot_map),
    )?;
    if let Ok(bounds) = mesh_ops::compute_mesh_aabb(&mesh) {
        debug!(
            object = %snapshot.name,
            triangles = mesh.triangles.len(),
            materials = materials.len(),
            volume = mesh_ops::compute_mesh_signed_volume(&mesh),
            min = ?bounds.mins,
            max = ?bounds.maxs,
            "surface extracted"
        );
    }
    Ok(Extraction { mesh, materials })
}

/// Check the material slots and deduplicate the bound material names
///
/// Returns the names in slot order plus, for every slot, the index of its
/// material in that list.
pub(crate) fn collect_materials(snapshot: &MeshSnapshot) -> Result<(Vec<String>, Vec<usize>)> {
    if snapshot.material_slots.is_empty() {
        return Err(Error::no_material(&snapshot.name));
    }

    let mut names: Vec<String> = Vec::new();
    let mut slot_map = Vec::with_capacity(snapshot.material_slots.len());
    for (slot, material_slot) in snapshot.material_slots.iter().enumerate() {
        let Some(name) = material_slot.material.as_deref() else {
            return Err(Error::empty_material_slot(&snapshot.name, slot));
        };
        if !material_slot.exported {
            return Err(Error::material_not_exported(&snapshot.name, name));
        }
        let index = match names.iter().position(|n| n == name) {
            Some(index) => index,
            None => {
                names.push(name.to_string());
                names.len() - 1
            }
        };
        slot_map.push(index);
    }
    Ok((names, slot_map))
}

/// Triangulate a snapshot into a mesh
///
/// With `slot_map`, face material slots are translated through it and must be
/// in range; without it the slot index is kept as the material index.
pub(crate) fn build_mesh(
    snapshot: &MeshSnapshot,
    transform: &Matrix4<f64>,
    unit_scale: f64,
    triangulation: Triangulation,
    slot_map: Option<&[usize]>,
) -> Result<TriMesh> {
    let vertex_count = snapshot.vertices.len();
    let mut mesh = TriMesh::with_capacity(vertex_count, snapshot.faces.len() * 2);

    for (i, vertex) in snapshot.vertices.iter().enumerate() {
        if !vertex.is_finite() {
            return Err(Error::invalid_snapshot(
                &snapshot.name,
                &format!("vertex {} has a non-finite coordinate", i),
            ));
        }
        mesh.vertices
            .push(mesh_ops::apply_transform(vertex, transform).scaled(unit_scale));
    }

    for (f, face) in snapshot.faces.iter().enumerate() {
        if let Some(&bad) = face.vertices.iter().find(|&&v| v >= vertex_count) {
            return Err(Error::invalid_snapshot(
                &snapshot.name,
                &format!(
                    "face {} references vertex {} but the mesh has {} vertices",
                    f, bad, vertex_count
                ),
            ));
        }

        let material = match slot_map {
            Some(map) => *map.get(face.material_slot).ok_or_else(|| {
                Error::invalid_snapshot(
                    &snapshot.name,
                    &format!(
                        "face {} uses material slot {} but the object has {} slot(s)",
                        f,
                        face.material_slot,
                        map.len()
                    ),
                )
            })?,
            None => face.material_slot,
        };

        let corners = triangulate_face(&mesh, &face.vertices, triangulation)
            .map_err(|e| face_error(&snapshot.name, f, e))?;
        for [a, b, c] in corners {
            mesh.triangles.push(Triangle::with_material(
                face.vertices[a],
                face.vertices[b],
                face.vertices[c],
                material,
            ));
        }
    }

    Ok(mesh)
}

#[cfg_attr(not(feature = "polygon-ops"), allow(unused_variables))]
fn triangulate_face(
    mesh: &TriMesh,
    face: &[usize],
    triangulation: Triangulation,
) -> std::result::Result<Vec<[usize; 3]>, TriangulationError> {
    match triangulation {
        Triangulation::Fan => polygon_triangulation::triangulate_fan(face.len()),
        #[cfg(feature = "polygon-ops")]
        Triangulation::EarClip => {
            let points: Vec<_> = face.iter().map(|&v| mesh.vertices[v].to_point()).collect();
            polygon_triangulation::triangulate_ear_clip(&points)
        }
    }
}

fn face_error(object: &str, face: usize, error: TriangulationError) -> Error {
    match error {
        TriangulationError::TooFewVertices(_) => {
            Error::invalid_snapshot(object, &format!("face {}: {}", face, error))
        }
        TriangulationError::TriangulationFailed(_) => {
            Error::Triangulation(format!("{}: face {}: {}", object, face, error))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Face, MaterialSlot, Vertex};
    use nalgebra::Vector3;

    fn quad_snapshot() -> MeshSnapshot {
        MeshSnapshot::new("Quad")
            .with_vertices(vec![
                Vertex::new(0.0, 0.0, 0.0),
                Vertex::new(1.0, 0.0, 0.0),
                Vertex::new(1.0, 1.0, 0.0),
                Vertex::new(0.0, 1.0, 0.0),
            ])
            .with_faces(vec![Face::new([0, 1, 2, 3])])
            .with_material(MaterialSlot::new("INERT"))
    }

    #[test]
    fn test_quad_is_fan_triangulated() {
        let extraction = extract(&quad_snapshot(), 1.0).unwrap();
        assert_eq!(
            extraction.mesh.triangles,
            vec![Triangle::new(0, 1, 2), Triangle::new(0, 2, 3)]
        );
        assert_eq!(extraction.materials, vec!["INERT".to_string()]);
    }

    #[test]
    fn test_no_material() {
        let mut snapshot = quad_snapshot();
        snapshot.material_slots.clear();
        assert!(matches!(
            extract(&snapshot, 1.0),
            Err(Error::NoMaterial { .. })
        ));
    }

    #[test]
    fn test_empty_slot_is_checked_before_geometry() {
        // Out-of-range face would be an InvalidSnapshot; the empty slot wins
        let snapshot = quad_snapshot()
            .with_material(MaterialSlot::empty())
            .with_faces(vec![Face::new([0, 1, 9])]);
        assert_eq!(
            extract(&snapshot, 1.0),
            Err(Error::EmptyMaterialSlot {
                object: "Quad".to_string(),
                slot: 1
            })
        );
    }

    #[test]
    fn test_material_not_exported() {
        let snapshot =
            quad_snapshot().with_material(MaterialSlot::new("HIDDEN").exported(false));
        assert!(matches!(
            extract(&snapshot, 1.0),
            Err(Error::MaterialNotExported { material, .. }) if material == "HIDDEN"
        ));
    }

    #[test]
    fn test_materials_are_deduplicated_in_slot_order() {
        let snapshot = quad_snapshot()
            .with_material(MaterialSlot::new("FIRE"))
            .with_material(MaterialSlot::new("INERT"))
            .with_faces(vec![
                Face::new([0, 1, 2]).with_material_slot(2),
                Face::new([0, 2, 3]).with_material_slot(1),
            ]);
        let extraction = extract(&snapshot, 1.0).unwrap();
        assert_eq!(extraction.materials, vec!["INERT", "FIRE"]);
        assert_eq!(extraction.mesh.triangles[0].material, 0);
        assert_eq!(extraction.mesh.triangles[1].material, 1);
    }

    #[test]
    fn test_transform_then_scale() {
        let snapshot = quad_snapshot()
            .with_matrix_world(Matrix4::new_translation(&Vector3::new(1.0, 0.0, 0.0)));
        let extraction = extract(&snapshot, 2.0).unwrap();
        assert_eq!(extraction.mesh.vertices[0], Vertex::new(2.0, 0.0, 0.0));
        assert_eq!(extraction.mesh.vertices[2], Vertex::new(4.0, 2.0, 0.0));
    }

    #[test]
    fn test_invalid_faces() {
        let snapshot = quad_snapshot().with_faces(vec![Face::new([0, 1])]);
        assert!(matches!(
            extract(&snapshot, 1.0),
            Err(Error::InvalidSnapshot(_))
        ));

        let snapshot = quad_snapshot().with_faces(vec![Face::new([0, 1, 4])]);
        assert!(matches!(
            extract(&snapshot, 1.0),
            Err(Error::InvalidSnapshot(_))
        ));

        let snapshot =
            quad_snapshot().with_faces(vec![Face::new([0, 1, 2]).with_material_slot(3)]);
        assert!(matches!(
            extract(&snapshot, 1.0),
            Err(Error::InvalidSnapshot(_))
        ));
    }

    #[test]
    fn test_non_finite_vertex() {
        let mut snapshot = quad_snapshot();
        snapshot.vertices[1].y = f64::NAN;
        assert!(matches!(
            extract(&snapshot, 1.0),
            Err(Error::InvalidSnapshot(_))
        ));
    }

    #[cfg(feature = "polygon-ops")]
    #[test]
    fn test_ear_clip_policy() {
        let extraction = extract_with(&quad_snapshot(), 1.0, Triangulation::EarClip).unwrap();
        assert_eq!(extraction.mesh.triangles.len(), 2);
        let area: f64 = (0..2)
            .map(|t| {
                let [a, b, c] = extraction.mesh.triangle_points(t);
                mesh_ops::triangle_area(&a, &b, &c)
            })
            .sum();
        assert!((area - 1.0).abs() < 1e-12);
    }
}
