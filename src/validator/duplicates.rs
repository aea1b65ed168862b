//! Duplicate vertex detection with a bulk-loaded R*-tree

use crate::model::Vertex;
use rstar::RTree;
use rstar::primitives::GeomWithData;
use std::collections::BTreeSet;

type IndexedPoint = GeomWithData<[f64; 3], usize>;

/// Indices of every vertex lying within `radius` of at least one other vertex
///
/// The index is bulk loaded, so the tree is balanced independently of the
/// input order, and the query is symmetric: when `a` is near `b` both are
/// reported. Distances equal to `radius` count as duplicates.
pub fn find_duplicates(vertices: &[Vertex], radius: f64) -> BTreeSet<usize> {
    let points: Vec<IndexedPoint> = vertices
        .iter()
        .enumerate()
        .map(|(i, v)| GeomWithData::new([v.x, v.y, v.z], i))
        .collect();
    let tree = RTree::bulk_load(points);
    let radius_2 = radius * radius;

    let mut duplicates = BTreeSet::new();
    for (i, v) in vertices.iter().enumerate() {
        if duplicates.contains(&i) {
            continue;
        }
        let neighbours: Vec<usize> = tree
            .locate_within_distance([v.x, v.y, v.z], radius_2)
            .map(|p| p.data)
            .filter(|&j| j != i)
            .collect();
        if !neighbours.is_empty() {
            duplicates.insert(i);
            duplicates.extend(neighbours);
        }
    }
    duplicates
}
