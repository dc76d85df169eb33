//! Mesh file I/O.
//!
//! Two text formats are supported:
//!
//! | Format | Extension | Load | Save | Notes |
//! |--------|-----------|------|------|-------|
//! | Wavefront OBJ | `.obj` | ✓ | ✓ | Triangulated on load |
//! | Wavefront MTL | `.mtl` | ✓ | ✓ | Loaded through `mtllib` |
//!
//! # Usage
//!
//! ```no_run
//! use tessel::io::{load, save};
//! use tessel::render::RenderMode;
//!
//! let mesh = load("model.obj").unwrap();
//! save(&mesh, "output.obj", RenderMode::none()).unwrap();
//! ```
//!
//! The format modules can also be used directly, e.g. [`obj::read`] parses
//! from any seekable buffered source.

mod lex;
pub mod mtl;
pub mod obj;

use std::path::Path;

use crate::error::Result;
use crate::mesh::Mesh;
use crate::render::RenderMode;

/// Load a mesh from an OBJ file.
///
/// See [`obj::load`].
pub fn load<P: AsRef<Path>>(path: P) -> Result<Mesh> {
    obj::load(path)
}

/// Save a mesh to an OBJ file in the requested mode.
///
/// Returns the mode actually written; see [`obj::save`].
pub fn save<P: AsRef<Path>>(mesh: &Mesh, path: P, mode: RenderMode) -> Result<RenderMode> {
    obj::save(mesh, path, mode)
}
