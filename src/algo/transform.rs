//! Whole-mesh geometric transforms.

use nalgebra::{Point3, Vector3};
use tracing::debug;

use crate::error::{MeshError, Result};
use crate::math::bounds;
use crate::mesh::Mesh;

/// Extent of the axis-aligned bounding box; zero for an empty mesh.
pub fn dimensions(mesh: &Mesh) -> Vector3<f32> {
    match mesh.bounding_box() {
        Some((min, max)) => max - min,
        None => Vector3::zeros(),
    }
}

/// Centre the mesh on the origin and scale it to fit in `[-1, 1]` on every axis.
///
/// Returns the scale factor applied, so the transform can be undone. Empty
/// meshes are left alone and a mesh of zero extent is only translated; both
/// return `1.0`.
pub fn unitize(mesh: &mut Mesh) -> f32 {
    let Some((min, max)) = bounds(mesh.vertices()) else {
        return 1.0;
    };
    let centre = Point3::from((min.coords + max.coords) / 2.0);
    let extent = (max - min).max();
    let scale = if extent > 0.0 { 2.0 / extent } else { 1.0 };

    for v in &mut mesh.vertices {
        *v = Point3::from((*v - centre) * scale);
    }

    debug!(
        "unitized: centre ({}, {}, {}), scale {}",
        centre.x, centre.y, centre.z, scale
    );
    scale
}

/// Multiply every vertex position by `factor`.
///
/// # Errors
///
/// [`MeshError::InvalidParameter`] if `factor` is not finite.
pub fn scale(mesh: &mut Mesh, factor: f32) -> Result<()> {
    if !factor.is_finite() {
        return Err(MeshError::invalid_param("scale", factor, "must be finite"));
    }
    for v in &mut mesh.vertices {
        *v *= factor;
    }
    Ok(())
}

/// Flip the orientation of every triangle.
///
/// Swaps the first and last corner of each triangle's vertex, normal and
/// texture indices, and negates all vertex and facet normals.
pub fn reverse_winding(mesh: &mut Mesh) {
    for t in &mut mesh.triangles {
        t.vertices.swap(0, 2);
        t.normals.swap(0, 2);
        t.texcoords.swap(0, 2);
    }
    for n in mesh.normals.iter_mut().chain(mesh.facet_normals.iter_mut()) {
        *n = -*n;
    }
}
