//! Core mesh data structures.
//!
//! This module provides the [`Mesh`] aggregate and related types for
//! representing triangulated Wavefront models.
//!
//! # Overview
//!
//! A [`Mesh`] keeps positions, vertex normals, texture coordinates and facet
//! normals in separate arrays. Each [`Triangle`] references those arrays per
//! corner, so one position can be paired with different normals on different
//! triangles (hard edges) or share one normal across all of them (smooth
//! shading).
//!
//! Triangles are partitioned into named [`Group`]s, each pointing at a
//! [`Material`]. Material 0 always exists and holds default coefficients.
//!
//! # Index Types
//!
//! Mesh elements are identified by type-safe index wrappers:
//! - [`VertexId`], [`NormalId`], [`TexcoordId`], [`FacetId`] - 1-based, with
//!   0 reserved as the "none" sentinel
//! - [`TriangleId`], [`GroupId`], [`MaterialId`] - 0-based arena slots
//!
//! # Construction
//!
//! Meshes are typically read from a Wavefront file with [`crate::io::load`],
//! or built from face-vertex lists:
//!
//! ```
//! use tessel::mesh::{Mesh, build_from_triangles};
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//! ];
//! let faces = vec![[0, 1, 2]];
//!
//! let mesh: Mesh = build_from_triangles(&vertices, &faces).unwrap();
//! ```

mod builder;
mod group;
mod index;
mod material;
mod model;

pub use builder::{build_from_polygons, build_from_triangles, to_face_vertex};
pub use group::Group;
pub use index::{FacetId, GroupId, MaterialId, NormalId, TexcoordId, TriangleId, VertexId};
pub use material::{Material, Rgba};
pub use model::{Mesh, Triangle};

pub(crate) use builder::fan;
#[cfg(test)]
pub(crate) use builder::unit_cube;
