//! Topological checks: manifold vertices, manifold edges and winding

use crate::model::{EdgeKey, EdgeMap, TriMesh};
use std::collections::HashMap;

/// Vertices whose incident triangles do not form a single edge-connected fan
///
/// A vertex passes when every incident edge is used by at most two
/// triangles, no incident triangle references it twice, and the triangles
/// around it are connected through shared edges. Both a closed disk and a
/// boundary half-disk pass. Vertices without triangles are left to the
/// loose-vertex check.
pub fn non_manifold_vertices(mesh: &TriMesh, edges: &EdgeMap) -> Vec<usize> {
    mesh.vertex_triangles()
        .iter()
        .enumerate()
        .filter(|(vertex, incident)| !is_manifold_vertex(mesh, edges, *vertex, incident))
        .map(|(vertex, _)| vertex)
        .collect()
}

fn is_manifold_vertex(mesh: &TriMesh, edges: &EdgeMap, vertex: usize, incident: &[usize]) -> bool {
    if incident.is_empty() {
        return true;
    }

    // Link vertex -> positions in `incident` of the triangles holding the spoke
    let mut spokes: HashMap<usize, Vec<usize>> = HashMap::with_capacity(incident.len() * 2);
    for (position, &t) in incident.iter().enumerate() {
        let tri = mesh.triangles[t];
        let idx = tri.indices();
        if idx.iter().filter(|&&v| v == vertex).count() != 1 {
            return false;
        }
        let mut others = idx.into_iter().filter(|&v| v != vertex);
        let (Some(a), Some(b)) = (others.next(), others.next()) else {
            return false;
        };
        if a == b {
            return false;
        }
        for x in [a, b] {
            let uses = edges.get(&EdgeKey::new(vertex, x)).map_or(0, Vec::len);
            if uses > 2 {
                return false;
            }
            spokes.entry(x).or_default().push(position);
        }
    }

    // Flood fill across triangles sharing a spoke
    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); incident.len()];
    for holders in spokes.values() {
        for &p in holders {
            for &q in holders {
                if p != q {
                    adjacency[p].push(q);
                }
            }
        }
    }

    let mut visited = vec![false; incident.len()];
    let mut stack = vec![0];
    visited[0] = true;
    let mut reached = 1;
    while let Some(p) = stack.pop() {
        for &q in &adjacency[p] {
            if !visited[q] {
                visited[q] = true;
                reached += 1;
                stack.push(q);
            }
        }
    }
    reached == incident.len()
}

/// Edges not used by exactly two triangles
///
/// Boundary edges (one triangle) and fins (three or more) both fail.
pub fn non_manifold_edges(edges: &EdgeMap) -> Vec<EdgeKey> {
    edges
        .iter()
        .filter(|(_, uses)| uses.len() != 2)
        .map(|(key, _)| *key)
        .collect()
}

/// Shared edges traversed in the same direction by both triangles
///
/// Only edges with exactly two uses are considered. A consistently wound
/// pair runs the edge as `a -> b` in one triangle and `b -> a` in the other.
pub fn inconsistent_normal_edges(mesh: &TriMesh, edges: &EdgeMap) -> Vec<EdgeKey> {
    edges
        .iter()
        .filter(|(key, uses)| {
            if uses.len() != 2 || key.0 == key.1 {
                return false;
            }
            let first = mesh.triangles[uses[0].triangle].directed_edge(uses[0].slot);
            let second = mesh.triangles[uses[1].triangle].directed_edge(uses[1].slot);
            first != (second.1, second.0)
        })
        .map(|(key, _)| *key)
        .collect()
}
