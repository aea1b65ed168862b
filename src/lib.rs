//! # trisurf
//!
//! Validation and triangulated-surface extraction of polygon meshes for
//! fire-simulation geometry export.
//!
//! A host application hands over a [`MeshSnapshot`] (vertices, polygonal
//! faces, material slots and world transform). The library triangulates it,
//! maps it to world space and the output unit, checks that it is a closed,
//! consistently wound, non-degenerate surface, optionally checks it for self
//! and cross-object intersections, and flattens it into an
//! [`ExportedSurface`] with 1-based indices.
//!
//! ## Features
//!
//! - Pure Rust implementation with no unsafe code
//! - Seven fail-fast quality checks with the offending vertices, edges or
//!   triangles of the first failure
//! - Duplicate vertex detection on a bulk-loaded R*-tree
//! - Self and cross intersection detection on a bounding volume hierarchy,
//!   confirmed with parry3d triangle distances
//! - Fan or ear-clipping triangulation of n-gons (`polygon-ops` feature)
//!
//! ## Example
//!
//! ```
//! use trisurf::{export_surface, ExportConfig, Face, MaterialSlot, MeshSnapshot, Vertex};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let vertices = vec![
//!     Vertex::new(0.0, 0.0, 0.0),
//!     Vertex::new(1.0, 0.0, 0.0),
//!     Vertex::new(1.0, 1.0, 0.0),
//!     Vertex::new(0.0, 1.0, 0.0),
//!     Vertex::new(0.0, 0.0, 1.0),
//!     Vertex::new(1.0, 0.0, 1.0),
//!     Vertex::new(1.0, 1.0, 1.0),
//!     Vertex::new(0.0, 1.0, 1.0),
//! ];
//! let faces = vec![
//!     Face::new([0, 3, 2, 1]),
//!     Face::new([4, 5, 6, 7]),
//!     Face::new([0, 1, 5, 4]),
//!     Face::new([3, 7, 6, 2]),
//!     Face::new([0, 4, 7, 3]),
//!     Face::new([1, 2, 6, 5]),
//! ];
//! let cube = MeshSnapshot::new("Cube")
//!     .with_vertices(vertices)
//!     .with_faces(faces)
//!     .with_material(MaterialSlot::new("INERT"));
//!
//! let surface = export_surface(&cube, &[], &ExportConfig::default())?;
//! assert_eq!(surface.materials, vec!["INERT"]);
//! assert_eq!(surface.vertices.len(), 8);
//! assert_eq!(surface.faces.len(), 12);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod diagnostic;
pub mod error;
pub mod extract;
pub mod intersect;
pub mod mesh_ops;
pub mod model;
pub mod polygon_triangulation;
pub mod validator;

pub use config::{ExportConfig, Tolerances, Triangulation};
pub use diagnostic::{Diagnostic, FailureKind, GeometryFailure, Offending, SelectMode, report};
pub use error::{Error, Result};
pub use model::{
    EdgeKey, ExportedSurface, Face, MaterialSlot, MeshSnapshot, TriMesh, Triangle, Vertex,
};

use nalgebra::Matrix4;
use tracing::{debug, info, warn};

/// Run the export pipeline and return its diagnostic
///
/// Steps, in order: configuration check, material preconditions and
/// extraction, the seven quality checks (if enabled), the intersection checks
/// against `others` (if enabled), then conversion to the 1-based output.
/// All checks run on the world-space, unit-scaled mesh.
///
/// # Errors
///
/// Precondition, snapshot and configuration problems are returned as `Err`.
/// Geometry findings are returned as `Ok(Diagnostic::Fail(_))`.
pub fn diagnose(
    snapshot: &MeshSnapshot,
    others: &[MeshSnapshot],
    config: &ExportConfig,
) -> Result<Diagnostic> {
    config.validate()?;
    debug!(object = %snapshot.name, others = others.len(), "export requested");

    let extraction = extract::extract_with(snapshot, config.unit_scale, config.triangulation)?;

    if config.check_quality {
        match validator::validate(&extraction.mesh, &config.tolerances) {
            Ok(()) => {}
            Err(Error::Geometry(failure)) => {
                return Ok(Diagnostic::Fail(failure.for_object(&snapshot.name)));
            }
            Err(err) => return Err(err),
        }
    }

    if config.check_intersections {
        let other_meshes = others
            .iter()
            .map(|other| {
                extract::build_mesh(
                    other,
                    &other.matrix_world,
                    config.unit_scale,
                    config.triangulation,
                    None,
                )
            })
            .collect::<Result<Vec<_>>>()?;
        if let Some(failure) = intersection_failure(
            &snapshot.name,
            &extraction.mesh,
            &other_meshes,
            config.tolerances.min_edge_length,
        ) {
            return Ok(Diagnostic::Fail(failure));
        }
    }

    let surface = ExportedSurface::from_mesh(&extraction.mesh, &extraction.materials)?;
    info!(
        object = %snapshot.name,
        vertices = surface.vertices.len(),
        faces = surface.faces.len(),
        materials = surface.materials.len(),
        "surface exported"
    );
    Ok(Diagnostic::Ok(surface))
}

/// Run the export pipeline and hand its result to the caller
///
/// Same as [`diagnose`] followed by [`report`]: a geometry finding becomes
/// [`Error::Geometry`].
pub fn export_surface(
    snapshot: &MeshSnapshot,
    others: &[MeshSnapshot],
    config: &ExportConfig,
) -> Result<ExportedSurface> {
    report(diagnose(snapshot, others, config)?)
}

/// Run the seven quality checks without exporting
///
/// The snapshot is checked in its own local coordinates: no world transform,
/// no unit scale and no material precondition.
///
/// # Errors
///
/// Returns [`Error::Geometry`] with the first failing check, or an input
/// error for a malformed snapshot or invalid tolerances.
pub fn check_quality(snapshot: &MeshSnapshot, tolerances: &Tolerances) -> Result<()> {
    tolerances.validate()?;
    let mesh = local_mesh(snapshot, &Matrix4::identity())?;
    validator::validate(&mesh, tolerances).map_err(|err| match err {
        Error::Geometry(failure) => Error::Geometry(failure.for_object(&snapshot.name)),
        other => other,
    })
}

/// Check a snapshot for self-intersection and intersection with `others`
///
/// Every other snapshot is brought into the local frame of `snapshot` with
/// `inverse(snapshot.matrix_world) * other.matrix_world`. Triangle bounds are
/// inflated by `epsilon`.
///
/// # Errors
///
/// Returns [`Error::Geometry`] listing the intersecting triangles of
/// `snapshot`, [`Error::SingularTransform`] if its world matrix cannot be
/// inverted, or an input error for malformed snapshots.
pub fn check_intersections(
    snapshot: &MeshSnapshot,
    others: &[MeshSnapshot],
    epsilon: f64,
) -> Result<()> {
    if !epsilon.is_finite() || epsilon < 0.0 {
        return Err(Error::InvalidConfig(format!(
            "epsilon must be finite and non-negative, got {}",
            epsilon
        )));
    }
    let mesh = local_mesh(snapshot, &Matrix4::identity())?;
    let other_meshes = others
        .iter()
        .map(|other| {
            let transform = mesh_ops::relative_transform(&snapshot.matrix_world, &other.matrix_world)?;
            local_mesh(other, &transform)
        })
        .collect::<Result<Vec<_>>>()?;

    match intersection_failure(&snapshot.name, &mesh, &other_meshes, epsilon) {
        Some(failure) => Err(Error::Geometry(failure)),
        None => Ok(()),
    }
}

fn local_mesh(snapshot: &MeshSnapshot, transform: &Matrix4<f64>) -> Result<TriMesh> {
    extract::build_mesh(snapshot, transform, 1.0, Triangulation::default(), None)
}

fn intersection_failure(
    object: &str,
    mesh: &TriMesh,
    others: &[TriMesh],
    epsilon: f64,
) -> Option<GeometryFailure> {
    let mut hits = intersect::find_self_intersections(mesh, epsilon);
    let cross = intersect::find_cross_intersections(mesh, others, epsilon);

    let kind = if cross.is_empty() {
        FailureKind::SelfIntersection
    } else {
        FailureKind::CrossIntersection
    };
    hits.extend(cross);
    if hits.is_empty() {
        debug!(object, "no intersection found");
        return None;
    }

    warn!(object, kind = kind.code(), triangles = hits.len(), "intersection found");
    Some(GeometryFailure::new(
        kind,
        object,
        Offending::Triangles(hits.into_iter().collect()),
    ))
}
