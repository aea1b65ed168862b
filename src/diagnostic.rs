//! Diagnostics produced by the quality and intersection checks
//!
//! A failing check yields a [`GeometryFailure`]: the failure kind, a message
//! and the offending elements. Exactly one kind of element is reported per
//! failure, so a host UI can switch to the matching selection mode
//! ([`SelectMode`]) and highlight the indices. Nothing in this module touches
//! the host mesh.

use crate::error::{Error, Result};
use crate::model::{EdgeKey, ExportedSurface};
use std::fmt;

/// Kind of geometry failure, in check order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// A vertex whose triangles do not form a single fan
    NonManifoldVertex,
    /// An edge not shared by exactly two triangles
    NonManifoldEdge,
    /// Two triangles traverse their shared edge in the same direction
    InconsistentNormals,
    /// An edge not longer than the minimum edge length
    DegenerateEdge,
    /// A triangle not larger than the minimum face area
    DegenerateFace,
    /// A vertex used by no triangle
    LooseVertex,
    /// Vertices within the minimum edge length of each other
    DuplicateVertex,
    /// Triangles of the mesh intersect each other
    SelfIntersection,
    /// Triangles of the mesh intersect another mesh
    CrossIntersection,
}

impl FailureKind {
    /// Error code of this kind
    pub fn code(&self) -> &'static str {
        match self {
            FailureKind::NonManifoldVertex => "E2001",
            FailureKind::NonManifoldEdge => "E2002",
            FailureKind::InconsistentNormals => "E2003",
            FailureKind::DegenerateEdge => "E2004",
            FailureKind::DegenerateFace => "E2005",
            FailureKind::LooseVertex => "E2006",
            FailureKind::DuplicateVertex => "E2007",
            FailureKind::SelfIntersection => "E3001",
            FailureKind::CrossIntersection => "E3002",
        }
    }

    fn describe(&self, count: usize) -> String {
        match self {
            FailureKind::NonManifoldVertex => {
                format!("Non manifold vertices detected ({} vertices).", count)
            }
            FailureKind::NonManifoldEdge => {
                format!("Non manifold or open geometry detected ({} edges).", count)
            }
            FailureKind::InconsistentNormals => {
                format!("Inconsistent face normals detected ({} edges).", count)
            }
            FailureKind::DegenerateEdge => format!("Too short edges detected ({} edges).", count),
            FailureKind::DegenerateFace => {
                format!("Too small area faces detected ({} faces).", count)
            }
            FailureKind::LooseVertex => format!("Loose vertices detected ({} vertices).", count),
            FailureKind::DuplicateVertex => {
                format!("Duplicate vertices detected ({} vertices).", count)
            }
            FailureKind::SelfIntersection => {
                format!("Self intersection detected ({} faces).", count)
            }
            FailureKind::CrossIntersection => {
                format!("Intersection with other objects detected ({} faces).", count)
            }
        }
    }
}

/// Element type a host editor should select to show a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectMode {
    /// Vertex selection
    Vertex,
    /// Edge selection
    Edge,
    /// Face selection
    Face,
}

/// Offending elements of a failure, sorted ascending and distinct
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Offending {
    /// Vertex indices
    Vertices(Vec<usize>),
    /// Undirected edges
    Edges(Vec<EdgeKey>),
    /// Triangle indices
    Triangles(Vec<usize>),
}

impl Offending {
    /// Number of offending elements
    pub fn len(&self) -> usize {
        match self {
            Offending::Vertices(v) => v.len(),
            Offending::Edges(e) => e.len(),
            Offending::Triangles(t) => t.len(),
        }
    }

    /// Whether there are no offending elements
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Selection mode matching the element type
    pub fn select_mode(&self) -> SelectMode {
        match self {
            Offending::Vertices(_) => SelectMode::Vertex,
            Offending::Edges(_) => SelectMode::Edge,
            Offending::Triangles(_) => SelectMode::Face,
        }
    }

    /// Offending vertex indices, if this failure reports vertices
    pub fn vertices(&self) -> Option<&[usize]> {
        match self {
            Offending::Vertices(v) => Some(v),
            _ => None,
        }
    }

    /// Offending edges, if this failure reports edges
    pub fn edges(&self) -> Option<&[EdgeKey]> {
        match self {
            Offending::Edges(e) => Some(e),
            _ => None,
        }
    }

    /// Offending triangle indices, if this failure reports triangles
    pub fn triangles(&self) -> Option<&[usize]> {
        match self {
            Offending::Triangles(t) => Some(t),
            _ => None,
        }
    }
}

/// A failed geometry check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeometryFailure {
    /// Failure kind
    pub kind: FailureKind,
    /// Host object name, empty when unknown
    pub object: String,
    /// Human-readable message
    pub message: String,
    /// Offending elements
    pub offending: Offending,
}

impl GeometryFailure {
    /// Build a failure whose message counts the offending elements
    pub fn new(kind: FailureKind, object: &str, offending: Offending) -> Self {
        Self {
            kind,
            object: object.to_string(),
            message: kind.describe(offending.len()),
            offending,
        }
    }

    /// Attach the host object name
    pub fn for_object(mut self, object: &str) -> Self {
        self.object = object.to_string();
        self
    }

    /// Selection mode a host editor should use to highlight the failure
    pub fn select_mode(&self) -> SelectMode {
        self.offending.select_mode()
    }
}

impl fmt::Display for GeometryFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.object.is_empty() {
            write!(f, "[{}] {}", self.kind.code(), self.message)
        } else {
            write!(f, "[{}] {}: {}", self.kind.code(), self.object, self.message)
        }
    }
}

impl std::error::Error for GeometryFailure {}

/// Outcome of a validation run
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// The mesh passed every requested check
    Ok(ExportedSurface),
    /// The first failing check
    Fail(GeometryFailure),
}

impl Diagnostic {
    /// Whether the run succeeded
    pub fn is_ok(&self) -> bool {
        matches!(self, Diagnostic::Ok(_))
    }

    /// The failure, if the run failed
    pub fn failure(&self) -> Option<&GeometryFailure> {
        match self {
            Diagnostic::Fail(failure) => Some(failure),
            Diagnostic::Ok(_) => None,
        }
    }
}

/// Hand a diagnostic to the caller
///
/// A success yields the exported surface; a failure is returned as
/// [`Error::Geometry`] with its offending indices intact for the caller's UI.
pub fn report(diagnostic: Diagnostic) -> Result<ExportedSurface> {
    match diagnostic {
        Diagnostic::Ok(surface) => Ok(surface),
        Diagnostic::Fail(failure) => Err(Error::Geometry(failure)),
    }
}
