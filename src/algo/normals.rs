//! Facet and vertex normal generation.
//!
//! [`facet_normals`] gives every triangle its flat normal. [`vertex_normals`]
//! then derives per-corner normals, smoothing across edges whose facets meet
//! at less than a crease angle and keeping hard edges elsewhere.
//!
//! # Example
//!
//! ```
//! use tessel::algo::normals::{facet_normals, vertex_normals};
//! use tessel::mesh::build_from_polygons;
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ];
//! let mut mesh = build_from_polygons(&vertices, &[vec![0, 1, 2, 3]]).unwrap();
//!
//! facet_normals(&mut mesh);
//! vertex_normals(&mut mesh, 90.0).unwrap();
//!
//! // coplanar triangles share one normal per vertex
//! assert_eq!(mesh.num_normals(), 4);
//! ```

use nalgebra::Vector3;
use tracing::{debug, warn};

use crate::error::{MeshError, Result};
use crate::math::triangle_normal;
use crate::mesh::{FacetId, Mesh, NormalId};

/// Compute the flat normal of every triangle.
///
/// Replaces the facet normal array; facet normal `i + 1` belongs to triangle
/// `i`. Triangles are assumed counter-clockwise and non-degenerate: a
/// zero-area triangle yields a non-finite normal.
pub fn facet_normals(mesh: &mut Mesh) {
    let normals: Vec<Vector3<f32>> = mesh
        .triangle_ids()
        .map(|t| {
            let [p0, p1, p2] = mesh.triangle_positions(t);
            triangle_normal(&p0, &p1, &p2)
        })
        .collect();

    for (i, triangle) in mesh.triangles.iter_mut().enumerate() {
        triangle.facet = FacetId::from_offset(i);
    }
    mesh.facet_normals = normals;

    debug!("computed {} facet normals", mesh.facet_normals.len());
}

/// Compute per-corner vertex normals with a crease angle in degrees.
///
/// Each vertex walks the triangles around it newest first and compares them
/// with the *last* triangle that references it. A triangle whose facet normal
/// makes an angle below `angle` with that reference facet normal is averaged
/// into one shared normal; any other triangle keeps a private copy of its own
/// facet normal at that corner.
///
/// Per vertex, the shared normal is stored first, followed by the private
/// normals in walk order.
///
/// Comparisons are strict, so at `0` degrees nothing is averaged and at `90`
/// degrees perpendicular facets stay separate. Near `180` degrees every
/// vertex gets a single normal unless a facet exactly opposes the reference.
///
/// Replaces the vertex normal array and every triangle's normal indices.
///
/// # Errors
///
/// [`MeshError::MissingAttribute`] if facet normals have not been computed,
/// [`MeshError::InvalidParameter`] if `angle` is not finite.
pub fn vertex_normals(mesh: &mut Mesh, angle: f32) -> Result<()> {
    if !mesh.has_facet_normals() {
        return Err(MeshError::MissingAttribute {
            attribute: "facet normals",
            operation: "vertex normal generation",
        });
    }
    if !angle.is_finite() {
        return Err(MeshError::invalid_param("angle", angle, "must be finite"));
    }
    let threshold = f64::from(angle).to_radians().cos();

    // (triangle, corner) pairs per vertex, newest triangle first
    let mut incident: Vec<Vec<(usize, usize)>> = vec![Vec::new(); mesh.num_vertices()];
    for (t, triangle) in mesh.triangles.iter().enumerate() {
        for (c, v) in triangle.vertices.iter().enumerate() {
            incident[v.offset()].push((t, c));
        }
    }
    for corners in &mut incident {
        corners.reverse();
    }

    let mut normals = Vec::with_capacity(3 * mesh.num_triangles());
    let mut averaged = Vec::with_capacity(8);
    let mut isolated = 0;

    for corners in &incident {
        let Some(&(reference_triangle, _)) = corners.first() else {
            isolated += 1;
            continue;
        };
        let reference = facet(mesh, reference_triangle);

        averaged.clear();
        averaged.extend(
            corners
                .iter()
                .map(|&(t, _)| f64::from(facet(mesh, t).dot(&reference)) > threshold),
        );

        if averaged.contains(&true) {
            let sum: Vector3<f32> = corners
                .iter()
                .zip(&averaged)
                .filter(|&(_, &on)| on)
                .map(|(&(t, _), _)| facet(mesh, t))
                .sum();
            let norm = sum.norm();
            normals.push(if norm > 0.0 { sum / norm } else { reference });
            let shared = NormalId::new(normals.len());
            for (&(t, c), _) in corners.iter().zip(&averaged).filter(|&(_, &on)| on) {
                mesh.triangles[t].normals[c] = shared;
            }
        }

        for (&(t, c), _) in corners.iter().zip(&averaged).filter(|&(_, &on)| !on) {
            normals.push(facet(mesh, t));
            mesh.triangles[t].normals[c] = NormalId::new(normals.len());
        }
    }

    if isolated > 0 {
        warn!("{} vertices are not referenced by any triangle", isolated);
    }

    normals.shrink_to_fit();
    debug!(
        "computed {} vertex normals for {} vertices at {} degrees",
        normals.len(),
        mesh.num_vertices(),
        angle
    );
    mesh.normals = normals;
    Ok(())
}

fn facet(mesh: &Mesh, t: usize) -> Vector3<f32> {
    *mesh.facet_normal(mesh.triangles[t].facet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{build_from_triangles, unit_cube, VertexId};
    use nalgebra::Point3;

    const EPS: f32 = 1e-6;

    fn smoothed_cube(angle: f32) -> Mesh {
        let mut mesh = unit_cube();
        facet_normals(&mut mesh);
        vertex_normals(&mut mesh, angle).unwrap();
        mesh
    }

    /// Distinct normal ids used at the corners of vertex `v`.
    fn normals_at(mesh: &Mesh, v: VertexId) -> Vec<NormalId> {
        let mut ids: Vec<NormalId> = mesh
            .triangles()
            .iter()
            .flat_map(|t| {
                (0..3)
                    .filter(move |&c| t.vertices[c] == v)
                    .map(move |c| t.normals[c])
            })
            .collect();
        ids.sort();
        ids.dedup();
        ids
    }

    #[test]
    fn test_cube_facet_normals_are_axes() {
        let mut mesh = unit_cube();
        facet_normals(&mut mesh);
        assert_eq!(mesh.num_facet_normals(), 12);

        for (i, t) in mesh.triangles().iter().enumerate() {
            assert_eq!(t.facet, FacetId::from_offset(i));
            let n = mesh.facet_normal(t.facet);
            assert!((n.norm() - 1.0).abs() < EPS);
            let ones = n.iter().filter(|c| (c.abs() - 1.0).abs() < EPS).count();
            let zeros = n.iter().filter(|c| c.abs() < EPS).count();
            assert_eq!((ones, zeros), (1, 2), "not an axis: {:?}", n);
        }
    }

    #[test]
    fn test_cube_right_angle_keeps_three_normals() {
        let mesh = smoothed_cube(90.0);
        for v in 1..=8 {
            let ids = normals_at(&mesh, VertexId::new(v));
            let mut distinct: Vec<Vector3<f32>> = Vec::new();
            for id in ids {
                let n = *mesh.normal(id);
                if !distinct.iter().any(|d| (d - n).norm() < EPS) {
                    distinct.push(n);
                }
            }
            assert_eq!(distinct.len(), 3, "vertex {}", v);
        }
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_zero_angle_gives_private_normals() {
        let mesh = smoothed_cube(0.0);
        // one record per corner
        assert_eq!(mesh.num_normals(), 36);
        for t in mesh.triangles() {
            for c in 0..3 {
                assert_eq!(mesh.normal(t.normals[c]), mesh.facet_normal(t.facet));
            }
        }
    }

    #[test]
    fn test_straight_angle_gives_one_normal_per_vertex() {
        let mesh = smoothed_cube(180.0);
        assert_eq!(mesh.num_normals(), 8);
        for v in 1..=8 {
            assert_eq!(normals_at(&mesh, VertexId::new(v)).len(), 1);
        }
        // corner normals point away from the cube centre
        let centre = Point3::new(0.5, 0.5, 0.5);
        for t in mesh.triangles() {
            for c in 0..3 {
                let outward = mesh.vertex(t.vertices[c]) - centre;
                assert!(mesh.normal(t.normals[c]).dot(&outward) > 0.0);
            }
        }
    }

    /// Three triangles sharing the edge (0, 1), tilted about the x axis by
    /// the given angles in degrees, in that triangle order.
    fn hinge(tilts: [f32; 3]) -> Mesh {
        let mut vertices = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)];
        for t in tilts {
            let (s, c) = t.to_radians().sin_cos();
            // triangle (origin, +x, this point) has normal (0, -s, c)
            vertices.push(Point3::new(0.0, c, s));
        }
        let faces = [[0, 1, 2], [0, 1, 3], [0, 1, 4]];
        let mut mesh = build_from_triangles(&vertices, &faces).unwrap();
        facet_normals(&mut mesh);
        mesh
    }

    #[test]
    fn test_comparison_is_against_last_triangle() {
        // the -50 degree triangle is the reference: the flat one is 50
        // degrees from it and averages, the +50 one is 100 degrees away
        let mut mesh = hinge([0.0, 50.0, -50.0]);
        vertex_normals(&mut mesh, 60.0).unwrap();

        let ids = normals_at(&mesh, VertexId::new(1));
        assert_eq!(ids.len(), 2);
        let shared = mesh.normal(mesh.triangles()[0].normals[0]);
        let (s, c) = (-25.0f32).to_radians().sin_cos();
        assert!((shared - Vector3::new(0.0, -s, c)).norm() < 1e-5, "{:?}", shared);
        assert_eq!(mesh.triangles()[2].normals[0], mesh.triangles()[0].normals[0]);
        assert_eq!(mesh.num_normals(), 7);
    }

    #[test]
    fn test_reference_triangle_order_matters() {
        // same facets, but the flat triangle comes last: both outer ones are
        // within 50 degrees of it and everything averages
        let mut mesh = hinge([50.0, -50.0, 0.0]);
        vertex_normals(&mut mesh, 60.0).unwrap();

        let ids = normals_at(&mesh, VertexId::new(1));
        assert_eq!(ids.len(), 1);
        let n = mesh.normal(ids[0]);
        assert!((n - Vector3::z()).norm() < EPS, "{:?}", n);
        assert_eq!(mesh.num_normals(), 5);
    }

    #[test]
    fn test_shared_normal_precedes_private_ones() {
        let mut mesh = hinge([0.0, 50.0, -50.0]);
        vertex_normals(&mut mesh, 60.0).unwrap();

        let t = mesh.triangles();
        // vertex 1: shared, then the +50 triangle's private copy
        assert_eq!(t[0].normals[0], NormalId::new(1));
        assert_eq!(t[2].normals[0], NormalId::new(1));
        assert_eq!(t[1].normals[0], NormalId::new(2));
        // vertex 2 follows the same layout
        assert_eq!(t[0].normals[1], NormalId::new(3));
        assert_eq!(t[1].normals[1], NormalId::new(4));
        // single-triangle vertices in vertex order
        assert_eq!(
            [t[0].normals[2], t[1].normals[2], t[2].normals[2]],
            [NormalId::new(5), NormalId::new(6), NormalId::new(7)]
        );
        assert_eq!(mesh.normal(NormalId::new(2)), mesh.facet_normal(t[1].facet));
    }

    #[test]
    fn test_requires_facet_on_every_triangle() {
        let mut mesh = hinge([0.0, 50.0, -50.0]);
        mesh.triangles[1].facet = FacetId::NONE;
        assert!(matches!(
            vertex_normals(&mut mesh, 60.0),
            Err(MeshError::MissingAttribute { .. })
        ));
    }

    #[test]
    fn test_tight_angle_splits_hinge() {
        let mut mesh = hinge([0.0, 50.0, -50.0]);
        vertex_normals(&mut mesh, 40.0).unwrap();
        assert_eq!(normals_at(&mesh, VertexId::new(1)).len(), 3);
    }

    #[test]
    fn test_requires_facet_normals() {
        let mut mesh = unit_cube();
        assert!(matches!(
            vertex_normals(&mut mesh, 45.0),
            Err(MeshError::MissingAttribute { .. })
        ));
    }

    #[test]
    fn test_rejects_non_finite_angle() {
        let mut mesh = unit_cube();
        facet_normals(&mut mesh);
        assert!(matches!(
            vertex_normals(&mut mesh, f32::NAN),
            Err(MeshError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_isolated_vertex_gets_no_normal() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(5.0, 5.0, 5.0),
        ];
        let mut mesh = build_from_triangles(&vertices, &[[0, 1, 2]]).unwrap();
        facet_normals(&mut mesh);
        vertex_normals(&mut mesh, 30.0).unwrap();
        assert_eq!(mesh.num_normals(), 3);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_regeneration_replaces_normals() {
        let mut mesh = smoothed_cube(0.0);
        vertex_normals(&mut mesh, 180.0).unwrap();
        assert_eq!(mesh.num_normals(), 8);
    }
}
