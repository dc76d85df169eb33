//! Vertex welding.
//!
//! Merges vertices whose positions lie within a per-axis tolerance of an
//! earlier vertex, then rewrites every triangle through the resulting remap.
//! Each vertex is compared against every vertex kept so far, so the cost is
//! quadratic in the vertex count.

use tracing::debug;

use super::progress::Progress;
use crate::error::{MeshError, Result};
use crate::math::within_box;
use crate::mesh::{Mesh, VertexId};

/// Merge near-duplicate vertices.
///
/// Two positions match when they differ by less than `epsilon` on each axis
/// independently (a box, not a sphere), or are exactly equal on that axis. The
/// earliest vertex of a matching set survives and later ones are folded into
/// it, so `epsilon == 0` merges exact duplicates only.
///
/// Returns the number of vertices removed.
///
/// # Errors
///
/// [`MeshError::InvalidParameter`] if `epsilon` is negative or NaN.
///
/// # Example
///
/// ```
/// use tessel::algo::weld::weld;
/// use tessel::mesh::build_from_triangles;
/// use nalgebra::Point3;
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
///     Point3::new(0.0, 0.0, 0.0),
/// ];
/// let faces = vec![[0, 1, 2], [3, 2, 1]];
/// let mut mesh = build_from_triangles(&vertices, &faces).unwrap();
///
/// assert_eq!(weld(&mut mesh, 1e-4).unwrap(), 1);
/// assert_eq!(mesh.num_vertices(), 3);
/// ```
pub fn weld(mesh: &mut Mesh, epsilon: f32) -> Result<usize> {
    weld_with_progress(mesh, epsilon, &Progress::none())
}

/// [`weld`] with progress reported once per vertex block.
pub fn weld_with_progress(mesh: &mut Mesh, epsilon: f32, progress: &Progress) -> Result<usize> {
    if !(epsilon >= 0.0) {
        return Err(MeshError::invalid_param(
            "epsilon",
            epsilon,
            "must be a non-negative number",
        ));
    }

    const BLOCK: usize = 1024;
    let total = mesh.vertices.len();
    let mut kept = Vec::with_capacity(total);
    let mut remap = Vec::with_capacity(total);

    for (i, p) in mesh.vertices.iter().enumerate() {
        if i % BLOCK == 0 {
            progress.report(i, total, "welding vertices");
        }
        let id = match kept.iter().position(|k| within_box(p, k, epsilon)) {
            Some(j) => VertexId::from_offset(j),
            None => {
                kept.push(*p);
                VertexId::from_offset(kept.len() - 1)
            }
        };
        remap.push(id);
    }
    progress.report(total, total, "welding vertices");

    for triangle in &mut mesh.triangles {
        triangle.vertices = triangle.vertices.map(|v| remap[v.offset()]);
    }

    let removed = total - kept.len();
    kept.shrink_to_fit();
    mesh.vertices = kept;

    debug!(
        "welded {} of {} vertices (epsilon {})",
        removed, total, epsilon
    );
    Ok(removed)
}
