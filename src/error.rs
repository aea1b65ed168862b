//! Error types for surface extraction and validation
//!
//! This module provides the error taxonomy for the extraction pipeline.
//! Every error carries a code for categorization and names the host object
//! it was raised for.
//!
//! # Error Codes
//!
//! Error codes follow the pattern: `E<category><number>`
//!
//! Categories:
//! - **E1xxx**: Precondition and input errors (materials, snapshot, configuration)
//! - **E2xxx**: Geometry quality failures, in check order
//! - **E3xxx**: Intersection failures
//! - **E4xxx**: Output conversion errors
//!
//! ## Common Error Codes
//!
//! - `E1001`: Object has no material slot
//! - `E1002`: Material slot is empty
//! - `E1003`: Referenced material is not exported
//! - `E1004`: Malformed mesh snapshot
//! - `E1005`: World transform cannot be inverted
//! - `E1006`: Invalid configuration value
//! - `E2001`..`E2007`: Geometry quality failures (see [`FailureKind`])
//! - `E3001`/`E3002`: Self and cross intersection
//! - `E4001`: Index does not fit the output format
//! - `E4002`: Face triangulation failed
//!
//! [`FailureKind`]: crate::diagnostic::FailureKind

use crate::diagnostic::GeometryFailure;
use thiserror::Error;

/// Result type for surface operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while extracting or validating a surface
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The object has no material slot at all
    ///
    /// **Error Code**: E1001
    ///
    /// **Suggestions**:
    /// - Add at least one material referencing a boundary condition
    #[error("[E1001] {object}: No referenced SURF, add at least one material")]
    NoMaterial {
        /// Name of the host object
        object: String,
    },

    /// A material slot is not bound to any material
    ///
    /// **Error Code**: E1002
    ///
    /// **Suggestions**:
    /// - Fill the empty slot or remove it
    #[error("[E1002] {object}: Material slot {slot} is empty, fill it with a material")]
    EmptyMaterialSlot {
        /// Name of the host object
        object: String,
        /// Index of the empty slot
        slot: usize,
    },

    /// A bound material is flagged as not exportable
    ///
    /// **Error Code**: E1003
    ///
    /// **Suggestions**:
    /// - Enable export of the referenced material
    #[error("[E1003] {object}: Referenced SURF <{material}> is not exported")]
    MaterialNotExported {
        /// Name of the host object
        object: String,
        /// Name of the material
        material: String,
    },

    /// The mesh snapshot is malformed
    ///
    /// **Error Code**: E1004
    ///
    /// **Common Causes**:
    /// - Face with fewer than 3 vertices
    /// - Vertex index out of range
    /// - Face material slot out of range
    /// - Non-finite vertex coordinate
    #[error("[E1004] Invalid mesh snapshot: {0}")]
    InvalidSnapshot(String),

    /// A world transform could not be inverted
    ///
    /// **Error Code**: E1005
    #[error("[E1005] Singular transform: {0}")]
    SingularTransform(String),

    /// A configuration value is out of range
    ///
    /// **Error Code**: E1006
    #[error("[E1006] Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Geometry quality or intersection failure
    ///
    /// **Error Codes**: E2001..E2007, E3001, E3002
    ///
    /// The wrapped failure names the offending vertices, edges or triangles.
    #[error("{0}")]
    Geometry(GeometryFailure),

    /// An index does not fit the 32-bit output convention
    ///
    /// **Error Code**: E4001
    #[error("[E4001] Index overflow: {0}")]
    IndexOverflow(String),

    /// Triangulation of a polygonal face failed
    ///
    /// **Error Code**: E4002
    #[error("[E4002] Triangulation failed: {0}")]
    Triangulation(String),
}

impl From<GeometryFailure> for Error {
    fn from(failure: GeometryFailure) -> Self {
        Error::Geometry(failure)
    }
}

impl Error {
    pub(crate) fn no_material(object: &str) -> Self {
        Error::NoMaterial {
            object: object.to_string(),
        }
    }

    pub(crate) fn empty_material_slot(object: &str, slot: usize) -> Self {
        Error::EmptyMaterialSlot {
            object: object.to_string(),
            slot,
        }
    }

    pub(crate) fn material_not_exported(object: &str, material: &str) -> Self {
        Error::MaterialNotExported {
            object: object.to_string(),
            material: material.to_string(),
        }
    }

    pub(crate) fn invalid_snapshot(object: &str, message: &str) -> Self {
        Error::InvalidSnapshot(format!("{}: {}", object, message))
    }

    /// Returns the geometry failure wrapped by this error, if any
    pub fn geometry_failure(&self) -> Option<&GeometryFailure> {
        match self {
            Error::Geometry(failure) => Some(failure),
            _ => None,
        }
    }

    /// Whether this error is a precondition failure rather than a geometry finding
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Error::NoMaterial { .. }
                | Error::EmptyMaterialSlot { .. }
                | Error::MaterialNotExported { .. }
        )
    }
}
