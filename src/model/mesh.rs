//! Indexed triangle mesh with derived edge adjacency

use crate::error::{Error, Result};
use nalgebra::Point3;
use std::collections::BTreeMap;

/// A 3D vertex with x, y, z coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Z coordinate
    pub z: f64,
}

impl Vertex {
    /// Create a new vertex
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Convert to an nalgebra point
    pub fn to_point(&self) -> Point3<f64> {
        Point3::new(self.x, self.y, self.z)
    }

    /// Build a vertex from an nalgebra point
    pub fn from_point(point: &Point3<f64>) -> Self {
        Self::new(point.x, point.y, point.z)
    }

    /// Multiply every component by `factor`
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor, self.z * factor)
    }

    /// Whether all three coordinates are finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// A triangle defined by three vertex indices and a material index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Triangle {
    /// Index of first vertex
    pub v1: usize,
    /// Index of second vertex
    pub v2: usize,
    /// Index of third vertex
    pub v3: usize,
    /// Index into the deduplicated material list (0-based)
    pub material: usize,
}

impl Triangle {
    /// Create a new triangle using material 0
    pub fn new(v1: usize, v2: usize, v3: usize) -> Self {
        Self::with_material(v1, v2, v3, 0)
    }

    /// Create a new triangle with an explicit material index
    pub fn with_material(v1: usize, v2: usize, v3: usize, material: usize) -> Self {
        Self {
            v1,
            v2,
            v3,
            material,
        }
    }

    /// Vertex indices in winding order
    pub fn indices(&self) -> [usize; 3] {
        [self.v1, self.v2, self.v3]
    }

    /// Directed edge at local slot `slot` (0, 1 or 2)
    ///
    /// Slot 0 is `v1 -> v2`, slot 1 is `v2 -> v3`, slot 2 is `v3 -> v1`.
    pub fn directed_edge(&self, slot: usize) -> (usize, usize) {
        let idx = self.indices();
        (idx[slot % 3], idx[(slot + 1) % 3])
    }

    /// Whether the triangle references `vertex`
    pub fn contains(&self, vertex: usize) -> bool {
        self.v1 == vertex || self.v2 == vertex || self.v3 == vertex
    }

    /// Whether the two triangles reference at least one common vertex
    pub fn shares_vertex(&self, other: &Triangle) -> bool {
        other.indices().iter().any(|&v| self.contains(v))
    }
}

/// Undirected edge key: vertex index pair stored as (min, max)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeKey(pub usize, pub usize);

impl EdgeKey {
    /// Create a normalized edge key
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b { Self(a, b) } else { Self(b, a) }
    }
}

/// One use of an edge by a triangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeUse {
    /// Triangle index
    pub triangle: usize,
    /// Local edge slot within the triangle (0, 1 or 2)
    pub slot: usize,
}

/// Edge adjacency map: every undirected edge with the triangles that use it
///
/// Keyed by [`EdgeKey`] in a `BTreeMap` so iteration order only depends on
/// the vertex indices.
pub type EdgeMap = BTreeMap<EdgeKey, Vec<EdgeUse>>;

/// Indexed triangle mesh
///
/// Vertices and triangles are flat arrays; adjacency is derived on demand
/// with [`TriMesh::edge_map`] and never stored alongside them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TriMesh {
    /// List of vertices
    pub vertices: Vec<Vertex>,
    /// List of triangles
    pub triangles: Vec<Triangle>,
}

impl TriMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            triangles: Vec::new(),
        }
    }

    /// Create a new mesh with pre-allocated capacity
    pub fn with_capacity(vertices: usize, triangles: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            triangles: Vec::with_capacity(triangles),
        }
    }

    /// Check that every triangle references existing vertices
    ///
    /// # Errors
    /// Returns [`Error::InvalidSnapshot`] naming the first triangle with an
    /// out-of-range vertex index.
    pub fn check_indices(&self) -> Result<()> {
        let count = self.vertices.len();
        for (t, tri) in self.triangles.iter().enumerate() {
            if let Some(&bad) = tri.indices().iter().find(|&&v| v >= count) {
                return Err(Error::InvalidSnapshot(format!(
                    "triangle {} references vertex {} but the mesh has {} vertices",
                    t, bad, count
                )));
            }
        }
        Ok(())
    }

    /// The three corner positions of triangle `index`
    ///
    /// # Panics
    /// Panics if the triangle or one of its vertex indices is out of range.
    /// Meshes produced by extraction always have valid indices.
    pub fn triangle_points(&self, index: usize) -> [Point3<f64>; 3] {
        let tri = &self.triangles[index];
        [
            self.vertices[tri.v1].to_point(),
            self.vertices[tri.v2].to_point(),
            self.vertices[tri.v3].to_point(),
        ]
    }

    /// Build the edge adjacency map
    ///
    /// Every triangle contributes its three edges, so each triangle appears
    /// exactly three times across all entries.
    pub fn edge_map(&self) -> EdgeMap {
        let mut edges = EdgeMap::new();
        for (triangle, tri) in self.triangles.iter().enumerate() {
            for slot in 0..3 {
                let (a, b) = tri.directed_edge(slot);
                edges
                    .entry(EdgeKey::new(a, b))
                    .or_default()
                    .push(EdgeUse { triangle, slot });
            }
        }
        edges
    }

    /// For every vertex, the triangles that reference it (ascending order)
    pub fn vertex_triangles(&self) -> Vec<Vec<usize>> {
        let mut incident = vec![Vec::new(); self.vertices.len()];
        for (t, tri) in self.triangles.iter().enumerate() {
            for v in tri.indices() {
                if let Some(list) = incident.get_mut(v) {
                    if list.last() != Some(&t) {
                        list.push(t);
                    }
                }
            }
        }
        incident
    }
}
