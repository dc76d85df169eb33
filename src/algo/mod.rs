//! Derived geometry and mesh processing.
//!
//! Every generator rewrites part of a [`Mesh`](crate::mesh::Mesh) in place:
//!
//! - **Normals**: flat facet normals, crease-aware vertex normals
//! - **Texture coordinates**: planar and spherical projections
//! - **Welding**: merging near-duplicate vertices
//! - **Transforms**: unitize, scale, reverse winding
//!
//! Vertex normals need facet normals first, and spherical texture coordinates
//! need vertex normals. [`pipeline::process`] runs any combination in a
//! valid order.

pub mod normals;
pub mod pipeline;
pub mod progress;
pub mod texcoord;
pub mod transform;
pub mod weld;

pub use pipeline::{process, ProcessOptions, ProcessSummary};
pub use progress::Progress;
pub use texcoord::TextureProjection;
