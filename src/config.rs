//! Configuration for extraction, validation and intersection checks

use crate::error::{Error, Result};

/// Default minimum admissible edge length
pub const DEFAULT_MIN_EDGE_LENGTH: f64 = 1e-5;

/// Default minimum admissible triangle area
pub const DEFAULT_MIN_FACE_AREA: f64 = 1e-5;

/// Geometric tolerances, in the same units as the vertex coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    /// Edges at or below this length are degenerate; also the duplicate-vertex
    /// radius and the intersection bound inflation
    pub min_edge_length: f64,
    /// Triangles at or below this area are degenerate
    pub min_face_area: f64,
}

impl Tolerances {
    /// Create tolerances from explicit values
    pub fn new(min_edge_length: f64, min_face_area: f64) -> Self {
        Self {
            min_edge_length,
            min_face_area,
        }
    }

    /// Set the minimum edge length
    pub fn with_min_edge_length(mut self, value: f64) -> Self {
        self.min_edge_length = value;
        self
    }

    /// Set the minimum face area
    pub fn with_min_face_area(mut self, value: f64) -> Self {
        self.min_face_area = value;
        self
    }

    /// Check that both tolerances are finite and non-negative
    pub fn validate(&self) -> Result<()> {
        check_non_negative("min_edge_length", self.min_edge_length)?;
        check_non_negative("min_face_area", self.min_face_area)
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_EDGE_LENGTH, DEFAULT_MIN_FACE_AREA)
    }
}

/// How polygonal faces with more than three vertices are split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Triangulation {
    /// Fan from the first vertex of the face
    ///
    /// Correct for convex planar faces only.
    #[default]
    Fan,
    /// Ear clipping of the face projected onto its dominant plane
    #[cfg(feature = "polygon-ops")]
    EarClip,
}

/// Configuration of a surface export run
///
/// # Example
///
/// ```
/// use trisurf::{ExportConfig, Tolerances};
///
/// let config = ExportConfig::new()
///     .with_unit_scale(0.001)
///     .with_tolerances(Tolerances::default().with_min_face_area(1e-8))
///     .with_intersection_check(true);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ExportConfig {
    /// Scalar applied to x, y and z after the world transform
    pub unit_scale: f64,
    /// Geometric tolerances
    pub tolerances: Tolerances,
    /// Run the seven quality checks before export
    pub check_quality: bool,
    /// Run self and cross intersection checks before export
    pub check_intersections: bool,
    /// Triangulation policy for n-gons
    pub triangulation: Triangulation,
}

impl ExportConfig {
    /// Create the default configuration: unit scale, default tolerances,
    /// quality check on, intersection check off, fan triangulation
    pub fn new() -> Self {
        Self {
            unit_scale: 1.0,
            tolerances: Tolerances::default(),
            check_quality: true,
            check_intersections: false,
            triangulation: Triangulation::Fan,
        }
    }

    /// Set the unit scale
    pub fn with_unit_scale(mut self, unit_scale: f64) -> Self {
        self.unit_scale = unit_scale;
        self
    }

    /// Set the tolerances
    pub fn with_tolerances(mut self, tolerances: Tolerances) -> Self {
        self.tolerances = tolerances;
        self
    }

    /// Enable or disable the quality check
    pub fn with_quality_check(mut self, enabled: bool) -> Self {
        self.check_quality = enabled;
        self
    }

    /// Enable or disable the intersection check
    pub fn with_intersection_check(mut self, enabled: bool) -> Self {
        self.check_intersections = enabled;
        self
    }

    /// Set the triangulation policy
    pub fn with_triangulation(mut self, triangulation: Triangulation) -> Self {
        self.triangulation = triangulation;
        self
    }

    /// Check that the unit scale is finite and positive and the tolerances are valid
    pub fn validate(&self) -> Result<()> {
        if !self.unit_scale.is_finite() || self.unit_scale <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "unit_scale must be finite and positive, got {}",
                self.unit_scale
            )));
        }
        self.tolerances.validate()
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn check_non_negative(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!(
            "{} must be finite and non-negative, got {}",
            name, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ExportConfig::default();
        assert_eq!(config.unit_scale, 1.0);
        assert_eq!(config.tolerances.min_edge_length, 1e-5);
        assert_eq!(config.tolerances.min_face_area, 1e-5);
        assert!(config.check_quality);
        assert!(!config.check_intersections);
        assert_eq!(config.triangulation, Triangulation::Fan);
    }

    #[test]
    fn test_builder_chain() {
        let config = ExportConfig::new()
            .with_unit_scale(2.0)
            .with_quality_check(false)
            .with_tolerances(Tolerances::new(0.1, 0.2));
        assert_eq!(config.unit_scale, 2.0);
        assert!(!config.check_quality);
        assert_eq!(config.tolerances, Tolerances::new(0.1, 0.2));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(ExportConfig::new().with_unit_scale(0.0).validate().is_err());
        assert!(ExportConfig::new().with_unit_scale(f64::NAN).validate().is_err());
        assert!(Tolerances::new(-1.0, 0.0).validate().is_err());
        assert!(Tolerances::new(0.0, f64::INFINITY).validate().is_err());
        assert!(Tolerances::new(0.0, 0.0).validate().is_ok());
    }
}
