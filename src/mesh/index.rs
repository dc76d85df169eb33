//! Index types for mesh elements.
//!
//! Two families of type-safe index wrappers live here:
//!
//! - **Element ids** ([`VertexId`], [`NormalId`], [`TexcoordId`], [`FacetId`])
//!   follow the Wavefront convention of counting from 1. The value 0 is the
//!   [`NONE`](VertexId::NONE) sentinel, used for corners that carry no normal
//!   or texture coordinate. Id `n` is stored at vector offset `n - 1`.
//! - **Slot ids** ([`TriangleId`], [`GroupId`], [`MaterialId`]) are plain
//!   0-based positions in the mesh's arenas.

use std::fmt::{self, Debug};

/// A 1-based vertex index into [`Mesh::vertices`](super::Mesh::vertices).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
#[repr(transparent)]
pub struct VertexId(u32);

/// A 1-based vertex-normal index into [`Mesh::normals`](super::Mesh::normals).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
#[repr(transparent)]
pub struct NormalId(u32);

/// A 1-based texture-coordinate index into [`Mesh::texcoords`](super::Mesh::texcoords).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
#[repr(transparent)]
pub struct TexcoordId(u32);

/// A 1-based facet-normal index into [`Mesh::facet_normals`](super::Mesh::facet_normals).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
#[repr(transparent)]
pub struct FacetId(u32);

macro_rules! impl_element_id {
    ($name:ident, $display:literal) => {
        impl $name {
            /// The "no element" sentinel.
            pub const NONE: Self = Self(0);

            /// Create an id from its 1-based value.
            ///
            /// # Panics
            /// Panics in debug builds if the value does not fit in 32 bits.
            #[inline]
            pub fn new(value: usize) -> Self {
                debug_assert!(value <= u32::MAX as usize, "index {} too large", value);
                Self(value as u32)
            }

            /// Create the id of the element stored at vector offset `offset`.
            #[inline]
            pub fn from_offset(offset: usize) -> Self {
                Self::new(offset + 1)
            }

            /// The 1-based value, as written in a Wavefront file.
            #[inline]
            pub fn get(self) -> usize {
                self.0 as usize
            }

            /// Vector offset of the element. Must not be called on [`Self::NONE`].
            #[inline]
            pub fn offset(self) -> usize {
                debug_assert!(self.is_some(), "offset of a NONE id");
                self.0 as usize - 1
            }

            /// Check whether this id refers to an element.
            #[inline]
            pub fn is_some(self) -> bool {
                self.0 != 0
            }

            /// Convert to `Option`, mapping the sentinel to `None`.
            #[inline]
            pub fn to_option(self) -> Option<Self> {
                self.is_some().then_some(self)
            }
        }

        impl Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_some() {
                    write!(f, "{}({})", $display, self.0)
                } else {
                    write!(f, "{}(NONE)", $display)
                }
            }
        }
    };
}

impl_element_id!(VertexId, "V");
impl_element_id!(NormalId, "N");
impl_element_id!(TexcoordId, "T");
impl_element_id!(FacetId, "F");

/// A 0-based triangle index.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct TriangleId(u32);

/// A 0-based group index.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct GroupId(u32);

/// A 0-based material index. Material 0 is the synthesized default.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
#[repr(transparent)]
pub struct MaterialId(u32);

macro_rules! impl_slot_id {
    ($name:ident, $display:literal) => {
        impl $name {
            /// Create a new index from a raw value.
            #[inline]
            pub fn new(index: usize) -> Self {
                debug_assert!(index <= u32::MAX as usize, "index {} too large", index);
                Self(index as u32)
            }

            /// Get the raw index value.
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", $display, self.0)
            }
        }

        impl From<usize> for $name {
            fn from(v: usize) -> Self {
                Self::new(v)
            }
        }
    };
}

impl_slot_id!(TriangleId, "Tri");
impl_slot_id!(GroupId, "G");
impl_slot_id!(MaterialId, "M");

impl MaterialId {
    /// The synthesized default material, always present.
    pub const DEFAULT: Self = Self(0);
}
