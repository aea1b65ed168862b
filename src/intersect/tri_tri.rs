//! Narrow phase: exact distance between a candidate triangle pair
//!
//! The distance comes from parry3d's GJK on the two triangle support maps.
//! Triangles closer than the tolerance intersect, so touching triangles do.

use parry3d_f64::math::Isometry;
use parry3d_f64::query;
use parry3d_f64::shape::Triangle;

/// Whether two triangles come within `tolerance` of each other
///
/// Zero-area triangles never intersect; the quality check reports them.
pub fn triangles_intersect(t1: &Triangle, t2: &Triangle, tolerance: f64) -> bool {
    if t1.normal().is_none() || t2.normal().is_none() {
        return false;
    }
    let identity = Isometry::identity();
    match query::distance(&identity, t1, &identity, t2) {
        Ok(distance) => distance <= tolerance,
        // Support-map pairs are always handled by the default dispatcher
        Err(_) => false,
    }
}
