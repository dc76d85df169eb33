//! # Tessel
//!
//! Wavefront OBJ meshes: loading, derived geometry and writing.
//!
//! Tessel reads an OBJ file (and the MTL libraries it references) into a
//! triangulated [`Mesh`](mesh::Mesh), generates the attributes a renderer
//! needs, and writes the result back out in a chosen output mode.
//!
//! ## Features
//!
//! - **Two-pass parser**: exact preallocation, polygon fan triangulation,
//!   relative (negative) indices, named groups and materials
//! - **Normals**: flat facet normals and crease-aware vertex normals
//! - **Texture coordinates**: planar and spherical projections
//! - **Welding**: merging vertices closer than a per-axis tolerance
//! - **Output modes**: [`RenderMode`](render::RenderMode) drives both the
//!   OBJ writer and the [`draw`](render::draw) walk for renderers
//!
//! ## Quick Start
//!
//! ```no_run
//! use tessel::prelude::*;
//!
//! let mut mesh = tessel::io::load("model.obj").unwrap();
//! println!("Vertices: {}", mesh.num_vertices());
//! println!("Triangles: {}", mesh.num_triangles());
//!
//! let options = ProcessOptions::default().with_unitize().with_smoothing(90.0);
//! options.apply(&mut mesh).unwrap();
//!
//! tessel::io::save(&mesh, "smooth.obj", RenderMode::none().with_smooth()).unwrap();
//! ```
//!
//! ## Building Meshes Programmatically
//!
//! ```
//! use tessel::prelude::*;
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ];
//! let quad = vec![vec![0, 1, 2, 3]];
//!
//! let mut mesh = build_from_polygons(&vertices, &quad).unwrap();
//! assert_eq!(mesh.num_triangles(), 2);
//!
//! tessel::algo::normals::facet_normals(&mut mesh);
//! assert_eq!(mesh.num_facet_normals(), 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod io;
pub mod math;
pub mod mesh;
pub mod render;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use tessel::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::{ProcessOptions, ProcessSummary, Progress, TextureProjection};
    pub use crate::error::{MeshError, Result};
    pub use crate::mesh::{
        build_from_polygons, build_from_triangles, to_face_vertex, FacetId, Group, GroupId,
        Material, MaterialId, Mesh, NormalId, TexcoordId, Triangle, TriangleId, VertexId,
    };
    pub use crate::render::{DrawSink, RenderMode, RenderOption};
}

pub use nalgebra;
