//! Procedural texture coordinates.
//!
//! - [`planar_texcoords`] projects positions onto the xz plane
//! - [`spherical_texcoords`] maps vertex normal directions onto a sphere

use std::f32::consts::{FRAC_PI_2, PI};
use std::fmt;
use std::str::FromStr;

use nalgebra::Point2;
use tracing::debug;

use crate::error::{MeshError, Result};
use crate::math::bounds;
use crate::mesh::{Mesh, TexcoordId};

/// Texture coordinate projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureProjection {
    /// See [`planar_texcoords`].
    Planar,
    /// See [`spherical_texcoords`].
    Spherical,
}

impl TextureProjection {
    /// Generate texture coordinates for `mesh` with this projection.
    pub fn apply(self, mesh: &mut Mesh) -> Result<()> {
        match self {
            TextureProjection::Planar => {
                planar_texcoords(mesh);
                Ok(())
            }
            TextureProjection::Spherical => spherical_texcoords(mesh),
        }
    }
}

impl fmt::Display for TextureProjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TextureProjection::Planar => "planar",
            TextureProjection::Spherical => "spherical",
        })
    }
}

impl FromStr for TextureProjection {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "planar" => Ok(TextureProjection::Planar),
            "spherical" => Ok(TextureProjection::Spherical),
            other => Err(format!(
                "unknown projection `{}` (expected planar or spherical)",
                other
            )),
        }
    }
}

/// Generate planar texture coordinates from vertex positions.
///
/// With `scale = 2 / max(dx, dy, dz)` over the bounding-box extent, vertex
/// `(x, y, z)` maps to `((x * scale + 1) / 2, (z * scale + 1) / 2)`. The
/// result lies in `[0, 1]` when the mesh is centred on the origin, e.g. after
/// [`unitize`](super::transform::unitize). A mesh with zero extent maps every
/// vertex to `(0.5, 0.5)`.
///
/// One texture coordinate is produced per vertex and every corner's texture
/// index is set to its vertex index.
pub fn planar_texcoords(mesh: &mut Mesh) {
    let extent = match bounds(mesh.vertices()) {
        Some((min, max)) => (max - min).max(),
        None => 0.0,
    };
    let scale = if extent > 0.0 { 2.0 / extent } else { 0.0 };

    mesh.texcoords = mesh
        .vertices
        .iter()
        .map(|p| Point2::new((p.x * scale + 1.0) / 2.0, (p.z * scale + 1.0) / 2.0))
        .collect();

    for triangle in &mut mesh.triangles {
        triangle.texcoords = triangle.vertices.map(|v| TexcoordId::new(v.get()));
    }

    debug!("generated {} planar texcoords", mesh.texcoords.len());
}

/// Generate spherical texture coordinates from vertex normals.
///
/// Each normal `(nx, ny, nz)` is read as the point `(x, y, z) = (nz, ny, nx)`,
/// which places the projection poles on the x axis. With `r = |(x, y)|` and
/// `rho = |(x, y, z)|` the coordinate is `(theta / pi, phi / pi)` where
///
/// - `phi = acos(z / rho)`, or `pi / 2` when `z == 0`
/// - `theta = asin(y / r) + pi / 2`, or `pi / 2` when `y == 0`
/// - both are `0` when `r == 0`
///
/// One texture coordinate is produced per normal and every corner's texture
/// index is set to its normal index.
///
/// # Errors
///
/// [`MeshError::MissingAttribute`] if the mesh has no vertex normals.
pub fn spherical_texcoords(mesh: &mut Mesh) -> Result<()> {
    if !mesh.has_normals() {
        return Err(MeshError::MissingAttribute {
            attribute: "vertex normals",
            operation: "spherical texture coordinates",
        });
    }

    mesh.texcoords = mesh
        .normals
        .iter()
        .map(|n| {
            let (x, y, z) = (n.z, n.y, n.x);
            let r = (x * x + y * y).sqrt();
            let rho = (r * r + z * z).sqrt();

            let (theta, phi) = if r == 0.0 {
                (0.0, 0.0)
            } else {
                let phi = if z == 0.0 { FRAC_PI_2 } else { (z / rho).acos() };
                let theta = if y == 0.0 {
                    FRAC_PI_2
                } else {
                    (y / r).asin() + FRAC_PI_2
                };
                (theta, phi)
            };
            Point2::new(theta / PI, phi / PI)
        })
        .collect();

    for triangle in &mut mesh.triangles {
        triangle.texcoords = triangle.normals.map(|n| TexcoordId::new(n.get()));
    }

    debug!("generated {} spherical texcoords", mesh.texcoords.len());
    Ok(())
}
