//! Polygon triangulation for n-gon faces
//!
//! Faces of the host mesh may have any number of vertices. This module splits
//! them into triangles that keep the face's winding:
//! - [`triangulate_fan`]: fan from the first vertex, deterministic and order
//!   preserving, correct for convex planar faces
//! - [`triangulate_ear_clip`]: ear clipping with the `earcutr` library after
//!   projecting the face onto its dominant plane, for non-convex faces
//!   (requires the `polygon-ops` feature)
//!
//! Both return triangles as local corner indices into the face.

#[cfg(feature = "polygon-ops")]
use nalgebra::{Point3, Vector3};

/// Error type for polygon triangulation operations
#[derive(Debug, thiserror::Error)]
pub enum TriangulationError {
    /// Polygon has too few vertices to triangulate
    #[error("Polygon has too few vertices: {0} (minimum 3 required)")]
    TooFewVertices(usize),

    /// Triangulation failed
    #[error("Triangulation failed: {0}")]
    TriangulationFailed(String),
}

/// Triangulate a face of `corners` vertices as a fan from corner 0
///
/// # Example
///
/// ```
/// use trisurf::polygon_triangulation::triangulate_fan;
///
/// let triangles = triangulate_fan(5).unwrap();
/// assert_eq!(triangles, vec![[0, 1, 2], [0, 2, 3], [0, 3, 4]]);
/// ```
pub fn triangulate_fan(corners: usize) -> Result<Vec<[usize; 3]>, TriangulationError> {
    if corners < 3 {
        return Err(TriangulationError::TooFewVertices(corners));
    }
    Ok((1..corners - 1).map(|i| [0, i, i + 1]).collect())
}

/// Triangulate a planar (or nearly planar) 3D polygon by ear clipping
///
/// The polygon is projected onto the coordinate plane most perpendicular to
/// its Newell normal. Output triangles are re-oriented to follow the face
/// winding.
///
/// # Errors
///
/// Returns an error if:
/// - The polygon has fewer than 3 vertices
/// - The triangulation algorithm fails or covers no area
#[cfg(feature = "polygon-ops")]
pub fn triangulate_ear_clip(
    polygon: &[Point3<f64>],
) -> Result<Vec<[usize; 3]>, TriangulationError> {
    if polygon.len() < 3 {
        return Err(TriangulationError::TooFewVertices(polygon.len()));
    }
    if polygon.len() == 3 {
        return Ok(vec![[0, 1, 2]]);
    }

    let normal = newell_normal(polygon);
    let (u, v) = projection_axes(&normal);

    // Flat coordinate array [x0, y0, x1, y1, ...]
    let mut coords = Vec::with_capacity(polygon.len() * 2);
    for p in polygon {
        coords.push(p[u]);
        coords.push(p[v]);
    }

    let hole_indices: Vec<usize> = Vec::new();
    let result = earcutr::earcut(&coords, &hole_indices, 2)
        .map_err(|e| TriangulationError::TriangulationFailed(format!("Earcut error: {}", e)))?;

    if result.is_empty() {
        return Err(TriangulationError::TriangulationFailed(
            "Earcut returned no triangles".to_string(),
        ));
    }

    let triangles = result
        .chunks_exact(3)
        .map(|c| {
            let (a, b, d) = (polygon[c[0]], polygon[c[1]], polygon[c[2]]);
            if (b - a).cross(&(d - a)).dot(&normal) < 0.0 {
                [c[0], c[2], c[1]]
            } else {
                [c[0], c[1], c[2]]
            }
        })
        .collect();
    Ok(triangles)
}

/// Newell's method: robust polygon normal, length is twice the polygon area
#[cfg(feature = "polygon-ops")]
fn newell_normal(polygon: &[Point3<f64>]) -> Vector3<f64> {
    let mut normal = Vector3::zeros();
    for (i, current) in polygon.iter().enumerate() {
        let next = polygon[(i + 1) % polygon.len()];
        normal.x += (current.y - next.y) * (current.z + next.z);
        normal.y += (current.z - next.z) * (current.x + next.x);
        normal.z += (current.x - next.x) * (current.y + next.y);
    }
    normal
}

/// Coordinate axes of the plane that drops the normal's dominant component
#[cfg(feature = "polygon-ops")]
fn projection_axes(normal: &Vector3<f64>) -> (usize, usize) {
    let abs = normal.abs();
    if abs.x >= abs.y && abs.x >= abs.z {
        (1, 2)
    } else if abs.y >= abs.z {
        (2, 0)
    } else {
        (0, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fan_triangle() {
        assert_eq!(triangulate_fan(3).unwrap(), vec![[0, 1, 2]]);
    }

    #[test]
    fn test_fan_quad() {
        assert_eq!(triangulate_fan(4).unwrap(), vec![[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn test_fan_too_few_vertices() {
        assert!(matches!(
            triangulate_fan(2),
            Err(TriangulationError::TooFewVertices(2))
        ));
    }

    #[cfg(feature = "polygon-ops")]
    #[test]
    fn test_ear_clip_concave_keeps_winding() {
        // Concave L-shaped hexagon in the XZ plane
        let polygon = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 2.0),
            Point3::new(0.0, 0.0, 2.0),
        ];
        let normal = newell_normal(&polygon);
        let triangles = triangulate_ear_clip(&polygon).unwrap();
        assert_eq!(triangles.len(), 4);

        let mut area = 0.0;
        for t in &triangles {
            let (a, b, c) = (polygon[t[0]], polygon[t[1]], polygon[t[2]]);
            let cross = (b - a).cross(&(c - a));
            assert!(cross.dot(&normal) > 0.0, "triangle {:?} is flipped", t);
            area += cross.norm() * 0.5;
        }
        assert!((area - 3.0).abs() < 1e-9, "Area: {}", area);
    }

    #[cfg(feature = "polygon-ops")]
    #[test]
    fn test_ear_clip_too_few_vertices() {
        let polygon = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)];
        assert!(triangulate_ear_clip(&polygon).is_err());
    }
}
