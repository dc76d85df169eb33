//! Output mode selection for the writer and draw walk.
//!
//! A [`RenderMode`] names the components a consumer would like to emit. Not
//! every mesh can supply all of them, so [`RenderMode::resolve`] narrows the
//! request against what the mesh actually holds and reports each option it
//! had to drop.

use std::fmt;
use std::str::FromStr;

use tracing::warn;

use crate::mesh::Mesh;

/// One selectable output component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderOption {
    /// Facet normals, one per triangle.
    Flat,
    /// Vertex normals, one per corner.
    Smooth,
    /// Texture coordinates.
    Texture,
    /// Diffuse colour only, taken from the group's material.
    Color,
    /// Full material coefficients.
    Material,
}

impl RenderOption {
    /// Every option, in resolution order.
    pub const ALL: [RenderOption; 5] = [
        RenderOption::Flat,
        RenderOption::Smooth,
        RenderOption::Texture,
        RenderOption::Color,
        RenderOption::Material,
    ];

    /// Lower-case name as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            RenderOption::Flat => "flat",
            RenderOption::Smooth => "smooth",
            RenderOption::Texture => "texture",
            RenderOption::Color => "color",
            RenderOption::Material => "material",
        }
    }
}

impl fmt::Display for RenderOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RenderOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RenderOption::ALL
            .into_iter()
            .find(|o| o.name() == s)
            .ok_or_else(|| {
                format!(
                    "unknown render option `{}` (expected flat, smooth, texture, color or material)",
                    s
                )
            })
    }
}

/// Why a requested option was removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// Flat output needs facet normals.
    MissingFacetNormals,
    /// Smooth output needs vertex normals.
    MissingNormals,
    /// Texture output needs texture coordinates.
    MissingTexcoords,
    /// Colour and material output need a loaded material library.
    NoMaterialLibrary,
    /// Another requested option takes precedence.
    OverriddenBy(RenderOption),
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropReason::MissingFacetNormals => f.write_str("no facet normals defined"),
            DropReason::MissingNormals => f.write_str("no vertex normals defined"),
            DropReason::MissingTexcoords => f.write_str("no texture coordinates defined"),
            DropReason::NoMaterialLibrary => f.write_str("no material library loaded"),
            DropReason::OverriddenBy(o) => write!(f, "{} output takes precedence", o),
        }
    }
}

/// A requested option that [`RenderMode::resolve`] removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dropped {
    /// The option removed.
    pub option: RenderOption,
    /// Why it was removed.
    pub reason: DropReason,
}

impl fmt::Display for Dropped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} output requested but {}", self.option, self.reason)
    }
}

/// The outcome of [`RenderMode::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMode {
    /// The mode that can actually be honoured.
    pub mode: RenderMode,
    /// Options removed from the request, in resolution order.
    pub dropped: Vec<Dropped>,
}

/// Set of requested output components.
///
/// # Example
///
/// ```
/// use tessel::render::{RenderMode, RenderOption};
///
/// let mode = RenderMode::none().with_smooth().with_texture();
/// assert!(mode.contains(RenderOption::Smooth));
/// assert!(!mode.contains(RenderOption::Flat));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderMode {
    /// Facet normals.
    pub flat: bool,
    /// Vertex normals.
    pub smooth: bool,
    /// Texture coordinates.
    pub texture: bool,
    /// Diffuse colour from the group's material.
    pub color: bool,
    /// Full material.
    pub material: bool,
}

impl RenderMode {
    /// Positions only.
    pub fn none() -> Self {
        Self::default()
    }

    /// Everything; resolution keeps whatever the mesh supports.
    pub fn all() -> Self {
        Self {
            flat: true,
            smooth: true,
            texture: true,
            color: true,
            material: true,
        }
    }

    /// Request facet normals.
    pub fn with_flat(mut self) -> Self {
        self.flat = true;
        self
    }

    /// Request vertex normals.
    pub fn with_smooth(mut self) -> Self {
        self.smooth = true;
        self
    }

    /// Request texture coordinates.
    pub fn with_texture(mut self) -> Self {
        self.texture = true;
        self
    }

    /// Request diffuse colours.
    pub fn with_color(mut self) -> Self {
        self.color = true;
        self
    }

    /// Request materials.
    pub fn with_material(mut self) -> Self {
        self.material = true;
        self
    }

    /// Add an option by value.
    pub fn with(self, option: RenderOption) -> Self {
        self.set(option, true)
    }

    /// Whether `option` is requested.
    pub fn contains(&self, option: RenderOption) -> bool {
        match option {
            RenderOption::Flat => self.flat,
            RenderOption::Smooth => self.smooth,
            RenderOption::Texture => self.texture,
            RenderOption::Color => self.color,
            RenderOption::Material => self.material,
        }
    }

    fn set(mut self, option: RenderOption, on: bool) -> Self {
        match option {
            RenderOption::Flat => self.flat = on,
            RenderOption::Smooth => self.smooth = on,
            RenderOption::Texture => self.texture = on,
            RenderOption::Color => self.color = on,
            RenderOption::Material => self.material = on,
        }
        self
    }

    /// Requested options, in resolution order.
    pub fn options(&self) -> impl Iterator<Item = RenderOption> + '_ {
        RenderOption::ALL.into_iter().filter(|o| self.contains(*o))
    }

    /// Narrow the request to what `mesh` can supply.
    ///
    /// Rules are applied in a fixed order, so the result depends only on the
    /// request and the mesh:
    ///
    /// 1. flat without facet normals is dropped
    /// 2. smooth without vertex normals is dropped
    /// 3. texture without texture coordinates is dropped
    /// 4. smooth overrides flat
    /// 5. colour and material without a material library are dropped
    /// 6. material overrides colour
    ///
    /// Each drop is logged at `warn` level and listed in the result.
    pub fn resolve(self, mesh: &Mesh) -> ResolvedMode {
        let mut mode = self;
        let mut dropped = Vec::new();
        let mut remove = |mode: &mut RenderMode, option: RenderOption, reason: DropReason| {
            if mode.contains(option) {
                *mode = mode.set(option, false);
                dropped.push(Dropped { option, reason });
            }
        };

        if !mesh.has_facet_normals() {
            remove(&mut mode, RenderOption::Flat, DropReason::MissingFacetNormals);
        }
        if !mesh.has_normals() {
            remove(&mut mode, RenderOption::Smooth, DropReason::MissingNormals);
        }
        if !mesh.has_texcoords() {
            remove(&mut mode, RenderOption::Texture, DropReason::MissingTexcoords);
        }
        if mode.smooth {
            let reason = DropReason::OverriddenBy(RenderOption::Smooth);
            remove(&mut mode, RenderOption::Flat, reason);
        }
        if mesh.material_library().is_none() {
            remove(&mut mode, RenderOption::Color, DropReason::NoMaterialLibrary);
            remove(&mut mode, RenderOption::Material, DropReason::NoMaterialLibrary);
        }
        if mode.material {
            let reason = DropReason::OverriddenBy(RenderOption::Material);
            remove(&mut mode, RenderOption::Color, reason);
        }

        for d in &dropped {
            warn!("{}", d);
        }
        ResolvedMode { mode, dropped }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.options().map(RenderOption::name).collect();
        if names.is_empty() {
            f.write_str("none")
        } else {
            f.write_str(&names.join("+"))
        }
    }
}

impl FromIterator<RenderOption> for RenderMode {
    fn from_iter<I: IntoIterator<Item = RenderOption>>(iter: I) -> Self {
        iter.into_iter().fold(RenderMode::none(), RenderMode::with)
    }
}
