//! Metric checks: short edges, small faces and unused vertices

use crate::mesh_ops;
use crate::model::{EdgeKey, EdgeMap, TriMesh};

/// Edges whose length is at or below `min_length`
pub fn degenerate_edges(mesh: &TriMesh, edges: &EdgeMap, min_length: f64) -> Vec<EdgeKey> {
    edges
        .keys()
        .filter(|&&key| mesh_ops::edge_length(mesh, key) <= min_length)
        .copied()
        .collect()
}

/// Triangles whose area is at or below `min_area`
pub fn degenerate_faces(mesh: &TriMesh, min_area: f64) -> Vec<usize> {
    (0..mesh.triangles.len())
        .filter(|&t| {
            let [a, b, c] = mesh.triangle_points(t);
            mesh_ops::triangle_area(&a, &b, &c) <= min_area
        })
        .collect()
}

/// Vertices referenced by no triangle
pub fn loose_vertices(mesh: &TriMesh) -> Vec<usize> {
    let mut used = vec![false; mesh.vertices.len()];
    for tri in &mesh.triangles {
        for v in tri.indices() {
            if let Some(flag) = used.get_mut(v) {
                *flag = true;
            }
        }
    }
    used.iter()
        .enumerate()
        .filter(|(_, used)| !**used)
        .map(|(v, _)| v)
        .collect()
}
