//! Named triangle groups.

use super::index::{MaterialId, TriangleId};

/// A named, ordered subset of a mesh's triangles sharing one material.
///
/// Groups partition the triangles of a [`Mesh`](super::Mesh): every triangle
/// belongs to exactly one group.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub(crate) name: String,
    pub(crate) triangles: Vec<TriangleId>,
    pub(crate) material: MaterialId,
}

impl Group {
    /// Name of the implicit group active before any `g` statement.
    pub const DEFAULT_NAME: &'static str = "default";

    /// Create an empty group using the default material.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_capacity(name, 0)
    }

    /// Create an empty group with room for `capacity` triangles.
    pub fn with_capacity(name: impl Into<String>, capacity: usize) -> Self {
        Self {
            name: name.into(),
            triangles: Vec::with_capacity(capacity),
            material: MaterialId::DEFAULT,
        }
    }

    /// The group name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Triangles in this group, in the order they were read.
    pub fn triangles(&self) -> &[TriangleId] {
        &self.triangles
    }

    /// Number of triangles in this group.
    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// Material used to shade this group.
    pub fn material(&self) -> MaterialId {
        self.material
    }
}
