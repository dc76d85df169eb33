//! Output modes and the draw walk used by rendering front ends.
//!
//! Windowing and GPU submission live outside this crate. A renderer
//! implements [`DrawSink`] and receives triangles batched by material; the
//! OBJ writer uses the same [`RenderMode`] to decide what to serialize.

mod draw;
mod mode;

pub use draw::{draw, DrawSink};
pub use mode::{DropReason, Dropped, RenderMode, RenderOption, ResolvedMode};
