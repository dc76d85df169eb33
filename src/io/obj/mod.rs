//! Wavefront OBJ meshes.
//!
//! The reader accepts `v`, `vn`, `vt`, `f`, `g`, `usemtl` and `mtllib`
//! statements, with faces of any size (fan-triangulated) and relative
//! indices. `o`, `s`, `l`, `p`, `mg` and `lod` are skipped; any other
//! directive is an error.

mod reader;
mod statement;
mod writer;

pub use reader::{load, read};
pub use writer::{save, write};
