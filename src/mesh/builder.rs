//! Mesh construction utilities.
//!
//! This module provides functions for building meshes from face-vertex lists,
//! the programmatic counterpart of reading a Wavefront file. All triangles
//! land in the implicit `"default"` group.

use nalgebra::Point3;

use super::group::Group;
use super::index::{GroupId, VertexId};
use super::model::{Mesh, Triangle};
use crate::error::{MeshError, Result};

/// Corner triples produced by fan-triangulating a polygon with `len` corners.
///
/// A polygon `(c0, c1, ..., ck-1)` yields `(c0, c1, c2), (c0, c2, c3), ...`,
/// i.e. `len - 2` triangles sharing the first corner.
pub(crate) fn fan(len: usize) -> impl Iterator<Item = [usize; 3]> {
    (1..len.saturating_sub(1)).map(|i| [0, i, i + 1])
}

/// Build a mesh from vertices and polygon faces.
///
/// # Arguments
/// * `vertices` - List of vertex positions
/// * `faces` - Polygons as 0-based vertex indices, counter-clockwise
///
/// Polygons with more than three corners are fan-triangulated.
///
/// # Example
/// ```
/// use tessel::mesh::build_from_polygons;
/// use nalgebra::Point3;
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(1.0, 1.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ];
/// let faces = vec![vec![0, 1, 2, 3]];
///
/// let mesh = build_from_polygons(&vertices, &faces).unwrap();
/// assert_eq!(mesh.num_vertices(), 4);
/// assert_eq!(mesh.num_triangles(), 2);
/// ```
pub fn build_from_polygons<F: AsRef<[usize]>>(
    vertices: &[Point3<f32>],
    faces: &[F],
) -> Result<Mesh> {
    for (fi, face) in faces.iter().enumerate() {
        let face = face.as_ref();
        if face.len() < 3 {
            return Err(MeshError::InvalidFace {
                face: fi,
                len: face.len(),
            });
        }
        if let Some(&vi) = face.iter().find(|&&vi| vi >= vertices.len()) {
            return Err(MeshError::InvalidVertexIndex { face: fi, vertex: vi });
        }
    }

    let num_triangles: usize = faces.iter().map(|f| f.as_ref().len() - 2).sum();

    let mut mesh = Mesh::new();
    mesh.vertices = vertices.to_vec();
    mesh.triangles.reserve_exact(num_triangles);
    mesh.groups
        .push(Group::with_capacity(Group::DEFAULT_NAME, num_triangles));
    let group = GroupId::new(0);

    for face in faces {
        let face = face.as_ref();
        for [a, b, c] in fan(face.len()) {
            let corners = [face[a], face[b], face[c]].map(VertexId::from_offset);
            mesh.add_triangle(group, Triangle::new(corners));
        }
    }

    Ok(mesh)
}

/// Build a mesh from vertices and triangle faces.
///
/// Shorthand for [`build_from_polygons`] with fixed-size faces.
pub fn build_from_triangles(vertices: &[Point3<f32>], faces: &[[usize; 3]]) -> Result<Mesh> {
    build_from_polygons(vertices, faces)
}

/// Convert a mesh back to a face-vertex representation.
///
/// Returns (vertices, faces) with 0-based indices.
pub fn to_face_vertex(mesh: &Mesh) -> (Vec<Point3<f32>>, Vec<[usize; 3]>) {
    let faces = mesh
        .triangles()
        .iter()
        .map(|t| t.vertices.map(|v| v.offset()))
        .collect();
    (mesh.vertices().to_vec(), faces)
}

/// An axis-aligned unit cube of 8 vertices and 12 outward-facing triangles.
#[cfg(test)]
pub(crate) fn unit_cube() -> Mesh {
    let vertices = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.0, 0.0, 1.0),
        Point3::new(1.0, 0.0, 1.0),
        Point3::new(1.0, 1.0, 1.0),
        Point3::new(0.0, 1.0, 1.0),
    ];
    let faces = vec![
        vec![0, 3, 2, 1], // -z
        vec![4, 5, 6, 7], // +z
        vec![0, 1, 5, 4], // -y
        vec![3, 7, 6, 2], // +y
        vec![0, 4, 7, 3], // -x
        vec![1, 2, 6, 5], // +x
    ];
    build_from_polygons(&vertices, &faces).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_triangle() -> (Vec<Point3<f32>>, Vec<[usize; 3]>) {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
        ];
        (vertices, vec![[0, 1, 2]])
    }

    #[test]
    fn test_fan_indices() {
        assert_eq!(fan(3).collect::<Vec<_>>(), vec![[0, 1, 2]]);
        assert_eq!(
            fan(5).collect::<Vec<_>>(),
            vec![[0, 1, 2], [0, 2, 3], [0, 3, 4]]
        );
        assert_eq!(fan(2).count(), 0);
    }

    #[test]
    fn test_single_triangle() {
        let (vertices, faces) = single_triangle();
        let mesh = build_from_triangles(&vertices, &faces).unwrap();

        assert_eq!(mesh.num_vertices(), 3);
        assert_eq!(mesh.num_triangles(), 1);
        assert_eq!(mesh.num_groups(), 1);
        assert_eq!(mesh.groups()[0].name(), "default");
        assert_eq!(
            mesh.triangles()[0].vertices,
            [VertexId::new(1), VertexId::new(2), VertexId::new(3)]
        );
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_roundtrip() {
        let (vertices, faces) = single_triangle();
        let mesh = build_from_triangles(&vertices, &faces).unwrap();
        let (v2, f2) = to_face_vertex(&mesh);
        assert_eq!(v2, vertices);
        assert_eq!(f2, faces);
    }

    #[test]
    fn test_invalid_vertex_index() {
        let (vertices, _) = single_triangle();
        let result = build_from_triangles(&vertices, &[[0, 1, 5]]);
        assert!(matches!(
            result,
            Err(MeshError::InvalidVertexIndex { face: 0, vertex: 5 })
        ));
    }

    #[test]
    fn test_too_few_corners() {
        let (vertices, _) = single_triangle();
        let result = build_from_polygons(&vertices, &[vec![0, 1]]);
        assert!(matches!(result, Err(MeshError::InvalidFace { face: 0, len: 2 })));
    }

    #[test]
    fn test_cube_counts() {
        let cube = unit_cube();
        assert_eq!(cube.num_vertices(), 8);
        assert_eq!(cube.num_triangles(), 12);
        assert!(cube.is_valid());
    }
}
