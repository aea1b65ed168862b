//! Shared mesh fixtures for the integration tests
//!
//! Every fixture is a closed, outward-wound surface unless its name says
//! otherwise, so a test only has to introduce the one defect it checks.

#![allow(dead_code)]

use nalgebra::{Matrix4, Vector3};
use std::collections::HashMap;
use trisurf::{Face, MaterialSlot, MeshSnapshot, Vertex};

/// Corners of the unit cube
pub fn cube_vertices() -> Vec<Vertex> {
    vec![
        Vertex::new(0.0, 0.0, 0.0),
        Vertex::new(1.0, 0.0, 0.0),
        Vertex::new(1.0, 1.0, 0.0),
        Vertex::new(0.0, 1.0, 0.0),
        Vertex::new(0.0, 0.0, 1.0),
        Vertex::new(1.0, 0.0, 1.0),
        Vertex::new(1.0, 1.0, 1.0),
        Vertex::new(0.0, 1.0, 1.0),
    ]
}

/// Quad faces of the unit cube: bottom, top, front, back, left, right
///
/// Fan triangulation yields triangles 0-1 (bottom), 2-3 (top), 4-5 (front),
/// 6-7 (back), 8-9 (left, x = 0) and 10-11 (right, x = 1).
pub fn cube_faces() -> Vec<Face> {
    vec![
        Face::new([0, 3, 2, 1]),
        Face::new([4, 5, 6, 7]),
        Face::new([0, 1, 5, 4]),
        Face::new([3, 7, 6, 2]),
        Face::new([0, 4, 7, 3]),
        Face::new([1, 2, 6, 5]),
    ]
}

/// Unit cube bound to the `INERT` material
pub fn cube(name: &str) -> MeshSnapshot {
    MeshSnapshot::new(name)
        .with_vertices(cube_vertices())
        .with_faces(cube_faces())
        .with_material(MaterialSlot::new("INERT"))
}

/// Unit cube moved by `dx` along X through its world transform
pub fn cube_at(name: &str, dx: f64) -> MeshSnapshot {
    cube(name).with_matrix_world(translation(dx, 0.0, 0.0))
}

/// Translation matrix
pub fn translation(x: f64, y: f64, z: f64) -> Matrix4<f64> {
    Matrix4::new_translation(&Vector3::new(x, y, z))
}

/// Snapshot built from explicit triangles, bound to `INERT`
pub fn triangles(name: &str, vertices: Vec<Vertex>, faces: &[[usize; 3]]) -> MeshSnapshot {
    MeshSnapshot::new(name)
        .with_vertices(vertices)
        .with_faces(faces.iter().map(|&f| Face::new(f)).collect())
        .with_material(MaterialSlot::new("INERT"))
}

/// Outward-wound tetrahedron faces for vertices `base..base + 4`
pub fn tetrahedron_faces(base: usize) -> Vec<[usize; 3]> {
    vec![
        [base, base + 2, base + 1],
        [base, base + 1, base + 3],
        [base + 1, base + 2, base + 3],
        [base, base + 3, base + 2],
    ]
}

/// Corner tetrahedron with its right-angle corner at `(x, 0, 0)`
pub fn tetrahedron_vertices(x: f64) -> Vec<Vertex> {
    vec![
        Vertex::new(x, 0.0, 0.0),
        Vertex::new(x + 1.0, 0.0, 0.0),
        Vertex::new(x, 1.0, 0.0),
        Vertex::new(x, 0.0, 1.0),
    ]
}

/// Unit cube with every side split into `n * n` quads
pub fn subdivided_cube(name: &str, n: usize) -> MeshSnapshot {
    let step = 1.0 / n as f64;
    let mut index: HashMap<[usize; 3], usize> = HashMap::new();
    let mut vertices = Vec::new();
    let mut faces = Vec::new();

    let mut vertex = |c: [usize; 3]| -> usize {
        *index.entry(c).or_insert_with(|| {
            vertices.push(Vertex::new(
                c[0] as f64 * step,
                c[1] as f64 * step,
                c[2] as f64 * step,
            ));
            vertices.len() - 1
        })
    };

    for axis in 0..3 {
        let (u, v) = ((axis + 1) % 3, (axis + 2) % 3);
        for side in [0, n] {
            for i in 0..n {
                for j in 0..n {
                    let corner = |di: usize, dj: usize| {
                        let mut c = [0; 3];
                        c[axis] = side;
                        c[u] = i + di;
                        c[v] = j + dj;
                        c
                    };
                    let mut quad = vec![
                        vertex(corner(0, 0)),
                        vertex(corner(1, 0)),
                        vertex(corner(1, 1)),
                        vertex(corner(0, 1)),
                    ];
                    if side == 0 {
                        quad.reverse();
                    }
                    faces.push(Face::new(quad));
                }
            }
        }
    }

    MeshSnapshot::new(name)
        .with_vertices(vertices)
        .with_faces(faces)
        .with_material(MaterialSlot::new("INERT"))
}
