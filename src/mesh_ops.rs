//! Triangle mesh operations using nalgebra and parry3d
//!
//! This module provides geometric operations on triangle meshes including:
//! - Edge length and triangle area
//! - Signed volume
//! - Bounding box calculation
//! - Conversion of mesh triangles to parry3d shapes
//! - Affine transformations between object frames
//!
//! These operations back the metric quality checks, the extraction log, the
//! intersection detector and the placement of other objects for the
//! intersection check.

use crate::error::{Error, Result};
use crate::model::{EdgeKey, TriMesh, Vertex};
use nalgebra::{Matrix4, Point3};
use parry3d_f64::bounding_volume::{Aabb, BoundingVolume};
use parry3d_f64::math::{Point, Real};
use parry3d_f64::shape::Triangle as TriangleShape;

/// Euclidean length of an edge of `mesh`
///
/// # Panics
/// Panics if an endpoint index is out of range.
pub fn edge_length(mesh: &TriMesh, edge: EdgeKey) -> f64 {
    let a = mesh.vertices[edge.0].to_point();
    let b = mesh.vertices[edge.1].to_point();
    nalgebra::distance(&a, &b)
}

/// Area of the triangle `(a, b, c)`
///
/// Half the magnitude of the cross product of two edges.
#[inline]
pub fn triangle_area(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> f64 {
    (b - a).cross(&(c - a)).norm() * 0.5
}

/// Compute the signed volume of a mesh using the divergence theorem
///
/// For a closed mesh with outward winding the volume is positive; a
/// negative value indicates an inside-out surface. Triangles with an
/// out-of-range vertex index are skipped.
pub fn compute_mesh_signed_volume(mesh: &TriMesh) -> f64 {
    let n = mesh.vertices.len();
    let mut volume = 0.0_f64;
    for triangle in &mesh.triangles {
        if triangle.v1 >= n || triangle.v2 >= n || triangle.v3 >= n {
            continue;
        }
        let a = mesh.vertices[triangle.v1].to_point().coords;
        let b = mesh.vertices[triangle.v2].to_point().coords;
        let c = mesh.vertices[triangle.v3].to_point().coords;
        volume += a.dot(&b.cross(&c));
    }
    volume / 6.0
}

/// Compute the axis-aligned bounding box (AABB) of a mesh's vertices
///
/// Loose vertices are included.
///
/// # Errors
/// Returns [`Error::InvalidSnapshot`] for a mesh without vertices.
pub fn compute_mesh_aabb(mesh: &TriMesh) -> Result<Aabb> {
    let mut points = mesh.vertices.iter().map(parry_point);
    let Some(first) = points.next() else {
        return Err(Error::InvalidSnapshot(
            "Cannot compute bounding box of empty mesh".to_string(),
        ));
    };

    Ok(points.fold(Aabb::new(first, first), |aabb, p| {
        aabb.merged(&Aabb::new(p, p))
    }))
}

/// Triangle `index` of `mesh` as a parry3d shape
///
/// # Panics
/// Panics if the triangle or one of its vertex indices is out of range.
pub fn triangle_shape(mesh: &TriMesh, index: usize) -> TriangleShape {
    let [a, b, c] = mesh.triangles[index]
        .indices()
        .map(|v| parry_point(&mesh.vertices[v]));
    TriangleShape::new(a, b, c)
}

/// Every triangle of `mesh` as a parry3d shape, in triangle order
///
/// # Panics
/// Panics if a triangle references a vertex index out of range.
pub fn triangle_shapes(mesh: &TriMesh) -> Vec<TriangleShape> {
    (0..mesh.triangles.len())
        .map(|t| triangle_shape(mesh, t))
        .collect()
}

fn parry_point(vertex: &Vertex) -> Point<Real> {
    Point::new(vertex.x, vertex.y, vertex.z)
}

/// Apply a 4x4 affine transformation matrix to a vertex
pub fn apply_transform(vertex: &Vertex, transform: &Matrix4<f64>) -> Vertex {
    Vertex::from_point(&transform.transform_point(&vertex.to_point()))
}

/// Transform mapping coordinates in `other`'s frame into `primary`'s frame
///
/// Computed as `inverse(primary) * other`, both being object-to-world
/// matrices.
///
/// # Errors
/// Returns [`Error::SingularTransform`] if `primary` is not invertible.
pub fn relative_transform(primary: &Matrix4<f64>, other: &Matrix4<f64>) -> Result<Matrix4<f64>> {
    let inverse = primary.try_inverse().ok_or_else(|| {
        Error::SingularTransform(format!(
            "world matrix with determinant {} has no inverse",
            primary.determinant()
        ))
    })?;
    Ok(inverse * other)
}
