//! Self and cross-mesh intersection detection
//!
//! A [`Bvh`] over each mesh finds the triangle pairs whose epsilon-inflated
//! boxes overlap; each candidate pair is then confirmed with an exact
//! triangle/triangle distance. Triangles within epsilon of each other
//! intersect. For self-intersection, pairs of triangles sharing a vertex
//! index are skipped, so neighbours in a closed surface are never reported.

mod bvh;
mod tri_tri;

pub use bvh::Bvh;
pub use tri_tri::triangles_intersect;

use crate::mesh_ops;
use crate::model::TriMesh;
use std::collections::BTreeSet;
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Triangles of `mesh_a` intersecting a triangle of `mesh_b`
///
/// Both meshes must be in the same coordinate frame. This is always a cross
/// query: passing the same mesh twice pairs every triangle with its own
/// copy. Use [`find_self_intersections`] for a single mesh.
///
/// # Panics
/// Panics if a triangle of either mesh references a vertex index out of
/// range.
pub fn find_intersections(mesh_a: &TriMesh, mesh_b: &TriMesh, epsilon: f64) -> BTreeSet<usize> {
    let shapes_a = mesh_ops::triangle_shapes(mesh_a);
    let shapes_b = mesh_ops::triangle_shapes(mesh_b);
    let pairs = Bvh::build(&shapes_a, epsilon).overlapping_pairs(&Bvh::build(&shapes_b, epsilon));
    let candidates = pairs.len();

    let mut hits = BTreeSet::new();
    for (i, j) in pairs {
        if !hits.contains(&i) && triangles_intersect(&shapes_a[i], &shapes_b[j], epsilon) {
            hits.insert(i);
        }
    }

    debug!(
        candidates,
        intersecting = hits.len(),
        "cross intersection query finished"
    );
    hits
}

/// Triangles of `mesh` intersecting another triangle of `mesh`
///
/// Both triangles of every intersecting pair are reported.
///
/// # Panics
/// Panics if a triangle references a vertex index out of range.
pub fn find_self_intersections(mesh: &TriMesh, epsilon: f64) -> BTreeSet<usize> {
    let shapes = mesh_ops::triangle_shapes(mesh);
    let bvh = Bvh::build(&shapes, epsilon);
    let pairs = bvh.overlapping_pairs(&bvh);
    let candidates = pairs.len();

    let mut hits = BTreeSet::new();
    for (i, j) in pairs {
        if i >= j || mesh.triangles[i].shares_vertex(&mesh.triangles[j]) {
            continue;
        }
        if hits.contains(&i) && hits.contains(&j) {
            continue;
        }
        if triangles_intersect(&shapes[i], &shapes[j], epsilon) {
            hits.insert(i);
            hits.insert(j);
        }
    }

    debug!(
        candidates,
        intersecting = hits.len(),
        "self intersection query finished"
    );
    hits
}

/// Triangles of `mesh` intersecting any of `others`
///
/// Every pairwise check is independent; with the `parallel` feature they run
/// on the rayon thread pool and the results are unioned.
pub fn find_cross_intersections(mesh: &TriMesh, others: &[TriMesh], epsilon: f64) -> BTreeSet<usize> {
    #[cfg(feature = "parallel")]
    {
        others
            .par_iter()
            .map(|other| find_intersections(mesh, other, epsilon))
            .reduce(BTreeSet::new, |mut acc, hits| {
                acc.extend(hits);
                acc
            })
    }

    #[cfg(not(feature = "parallel"))]
    {
        others
            .iter()
            .flat_map(|other| find_intersections(mesh, other, epsilon))
            .collect()
    }
}
