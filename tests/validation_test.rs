//! Integration tests for the quality checks

mod common;

use common::{cube, subdivided_cube, tetrahedron_faces, tetrahedron_vertices, triangles};
use trisurf::{
    EdgeKey, Error, Face, FailureKind, GeometryFailure, MeshSnapshot, Offending, SelectMode,
    Tolerances, Vertex, check_quality,
};

fn quality_failure(snapshot: &MeshSnapshot) -> GeometryFailure {
    match check_quality(snapshot, &Tolerances::default()) {
        Err(Error::Geometry(failure)) => failure,
        other => panic!("expected a geometry failure, got {:?}", other),
    }
}

#[test]
fn test_closed_surfaces_pass() {
    assert!(check_quality(&cube("Cube"), &Tolerances::default()).is_ok());
    assert!(check_quality(&subdivided_cube("Fine", 8), &Tolerances::default()).is_ok());
}

#[test]
fn test_bowtie_vertex() {
    // Two tetrahedra glued at vertex 1 of the first
    let mut vertices = tetrahedron_vertices(0.0);
    vertices.extend_from_slice(&tetrahedron_vertices(1.0)[1..]);
    let mut faces = tetrahedron_faces(0);
    for f in tetrahedron_faces(3) {
        faces.push(f.map(|v| if v == 3 { 1 } else { v }));
    }

    let failure = quality_failure(&triangles("Bowtie", vertices, &faces));
    assert_eq!(failure.kind, FailureKind::NonManifoldVertex);
    assert_eq!(failure.offending, Offending::Vertices(vec![1]));
    assert_eq!(failure.select_mode(), SelectMode::Vertex);
}

#[test]
fn test_open_box() {
    let mut snapshot = cube("Open");
    snapshot.faces.remove(1);

    let failure = quality_failure(&snapshot);
    assert_eq!(failure.kind, FailureKind::NonManifoldEdge);
    assert_eq!(
        failure.offending,
        Offending::Edges(vec![
            EdgeKey(4, 5),
            EdgeKey(4, 7),
            EdgeKey(5, 6),
            EdgeKey(6, 7)
        ])
    );
}

#[test]
fn test_flipped_face() {
    let mut snapshot = cube("Flipped");
    snapshot.faces[1] = Face::new([7, 6, 5, 4]);

    let failure = quality_failure(&snapshot);
    assert_eq!(failure.kind, FailureKind::InconsistentNormals);
    // The four border edges of the top; its own diagonal stays consistent
    assert_eq!(failure.offending.len(), 4);
    assert_eq!(failure.select_mode(), SelectMode::Edge);
}

#[test]
fn test_degenerate_face() {
    // Vertex 3 on the edge (0, 1): triangle 1 has no area
    let vertices = vec![
        Vertex::new(0.0, 0.0, 0.0),
        Vertex::new(2.0, 0.0, 0.0),
        Vertex::new(0.0, 2.0, 0.0),
        Vertex::new(1.0, 0.0, 0.0),
    ];
    let failure = quality_failure(&triangles("Flat", vertices, &tetrahedron_faces(0)));
    assert_eq!(failure.kind, FailureKind::DegenerateFace);
    assert_eq!(failure.offending, Offending::Triangles(vec![1]));
    assert_eq!(failure.select_mode(), SelectMode::Face);
}

#[test]
fn test_short_edge() {
    let mut vertices = tetrahedron_vertices(0.0);
    vertices[3] = Vertex::new(0.0, 0.0, 1e-6);
    let snapshot = triangles("Short", vertices, &tetrahedron_faces(0));

    // Edges are checked before faces, so the thin triangles are not reported
    match check_quality(&snapshot, &Tolerances::default()) {
        Err(Error::Geometry(failure)) => {
            assert_eq!(failure.kind, FailureKind::DegenerateEdge);
            assert_eq!(failure.offending, Offending::Edges(vec![EdgeKey(0, 3)]));
        }
        other => panic!("expected a short edge, got {:?}", other),
    }
}

#[test]
fn test_loose_vertex() {
    let mut snapshot = cube("Loose");
    snapshot.vertices.push(Vertex::new(4.0, 4.0, 4.0));

    let failure = quality_failure(&snapshot);
    assert_eq!(failure.kind, FailureKind::LooseVertex);
    assert_eq!(failure.offending, Offending::Vertices(vec![8]));
    assert!(failure.message.contains("1 vertices"));
}

#[test]
fn test_duplicate_vertices_with_group_closure() {
    // Three separate tetrahedra meeting at (1, 0, 0) through distinct vertices
    let mut vertices = tetrahedron_vertices(0.0);
    vertices.extend(tetrahedron_vertices(1.0));
    vertices.extend(
        tetrahedron_vertices(0.0)
            .into_iter()
            .map(|v| Vertex::new(1.0 - 0.5 * v.x, -2.0e-6 - 0.5 * v.y, -0.5 * v.z)),
    );
    let mut faces = tetrahedron_faces(0);
    faces.extend(tetrahedron_faces(4));
    // Point-reflected, so the winding is reversed to stay outward
    faces.extend(tetrahedron_faces(8).into_iter().map(|[a, b, c]| [a, c, b]));

    let failure = quality_failure(&triangles("Touching", vertices, &faces));
    assert_eq!(failure.kind, FailureKind::DuplicateVertex);
    assert_eq!(failure.offending, Offending::Vertices(vec![1, 4, 8]));
}

#[test]
fn test_quality_check_uses_local_coordinates() {
    // No material and a degenerate world transform: both are ignored
    let mut snapshot = cube("Local").with_matrix_world(nalgebra::Matrix4::zeros());
    snapshot.material_slots.clear();
    assert!(check_quality(&snapshot, &Tolerances::default()).is_ok());
}

#[test]
fn test_failure_message_names_object() {
    let mut snapshot = cube("Crate");
    snapshot.faces.remove(0);
    let err = check_quality(&snapshot, &Tolerances::default()).unwrap_err();
    let message = err.to_string();
    assert!(message.starts_with("[E2002] Crate:"), "{}", message);
    assert!(message.contains("(4 edges)"), "{}", message);
}

#[test]
fn test_invalid_tolerances() {
    assert!(matches!(
        check_quality(&cube("Cube"), &Tolerances::new(-1.0, 0.0)),
        Err(Error::InvalidConfig(_))
    ));
}
