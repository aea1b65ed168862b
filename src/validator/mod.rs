//! Geometry quality validation
//!
//! This module runs the seven quality checks on a triangulated mesh and stops
//! at the first one that fails:
//! 1. Manifold vertices
//! 2. Manifold edges (watertight surface)
//! 3. Consistent normals
//! 4. Degenerate edges (length at or below the minimum edge length)
//! 5. Degenerate faces (area at or below the minimum face area)
//! 6. Loose vertices
//! 7. Duplicate vertices (within the minimum edge length)
//!
//! The edge map is built once per run and shared by the checks that need it.

mod duplicates;
mod metric;
mod topology;

pub use duplicates::find_duplicates;
pub use metric::{degenerate_edges, degenerate_faces, loose_vertices};
pub use topology::{inconsistent_normal_edges, non_manifold_edges, non_manifold_vertices};

use crate::config::Tolerances;
use crate::diagnostic::{FailureKind, GeometryFailure, Offending};
use crate::error::{Error, Result};
use crate::model::TriMesh;
use tracing::{debug, warn};

/// Validate `mesh` against the seven quality checks, in order
///
/// A failing check is returned as [`Error::Geometry`] carrying no object
/// name; callers attach it with [`GeometryFailure::for_object`].
///
/// # Errors
/// Returns [`Error::InvalidSnapshot`] if a triangle references a vertex out
/// of range, otherwise the first failing check with its offending elements,
/// sorted ascending.
pub fn validate(mesh: &TriMesh, tolerances: &Tolerances) -> Result<()> {
    mesh.check_indices()?;
    debug!(
        vertices = mesh.vertices.len(),
        triangles = mesh.triangles.len(),
        min_edge_length = tolerances.min_edge_length,
        min_face_area = tolerances.min_face_area,
        "validating mesh"
    );

    let edges = mesh.edge_map();

    check(
        FailureKind::NonManifoldVertex,
        Offending::Vertices(non_manifold_vertices(mesh, &edges)),
    )?;
    check(
        FailureKind::NonManifoldEdge,
        Offending::Edges(non_manifold_edges(&edges)),
    )?;
    check(
        FailureKind::InconsistentNormals,
        Offending::Edges(inconsistent_normal_edges(mesh, &edges)),
    )?;
    check(
        FailureKind::DegenerateEdge,
        Offending::Edges(degenerate_edges(mesh, &edges, tolerances.min_edge_length)),
    )?;
    check(
        FailureKind::DegenerateFace,
        Offending::Triangles(degenerate_faces(mesh, tolerances.min_face_area)),
    )?;
    check(
        FailureKind::LooseVertex,
        Offending::Vertices(loose_vertices(mesh)),
    )?;
    check(
        FailureKind::DuplicateVertex,
        Offending::Vertices(
            find_duplicates(&mesh.vertices, tolerances.min_edge_length)
                .into_iter()
                .collect(),
        ),
    )?;

    debug!("mesh passed all quality checks");
    Ok(())
}

fn check(kind: FailureKind, offending: Offending) -> Result<()> {
    if offending.is_empty() {
        debug!(check = kind.code(), "check passed");
        return Ok(());
    }
    warn!(
        check = kind.code(),
        offending = offending.len(),
        "quality check failed"
    );
    Err(Error::Geometry(GeometryFailure::new(kind, "", offending)))
}
