//! Running several generators over one mesh in a fixed order.

use tracing::debug;

use super::normals::{facet_normals, vertex_normals};
use super::progress::Progress;
use super::texcoord::TextureProjection;
use super::transform::{reverse_winding, scale, unitize};
use super::weld::weld_with_progress;
use crate::error::Result;
use crate::mesh::Mesh;

/// Which processing stages to run.
///
/// Stages always run in this order: unitize, scale, reverse winding, facet
/// normals, vertex normals, texture coordinates, weld. Requesting vertex
/// normals turns facet normals on as well.
///
/// # Example
///
/// ```
/// use tessel::algo::pipeline::ProcessOptions;
/// use tessel::algo::texcoord::TextureProjection;
///
/// let options = ProcessOptions::default()
///     .with_unitize()
///     .with_smoothing(60.0)
///     .with_texture(TextureProjection::Spherical);
/// assert!(options.facet_normals);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessOptions {
    /// Centre on the origin and fit into `[-1, 1]`.
    pub unitize: bool,
    /// Uniform scale factor.
    pub scale: Option<f32>,
    /// Flip every triangle.
    pub reverse_winding: bool,
    /// Compute facet normals.
    pub facet_normals: bool,
    /// Crease angle in degrees for vertex normals.
    pub smoothing_angle: Option<f32>,
    /// Texture coordinate projection.
    pub texture: Option<TextureProjection>,
    /// Weld tolerance.
    pub weld_epsilon: Option<f32>,
}

impl ProcessOptions {
    /// Centre and fit the mesh to the unit cube.
    pub fn with_unitize(mut self) -> Self {
        self.unitize = true;
        self
    }

    /// Scale positions by `factor`.
    pub fn with_scale(mut self, factor: f32) -> Self {
        self.scale = Some(factor);
        self
    }

    /// Reverse triangle winding.
    pub fn with_reversed_winding(mut self) -> Self {
        self.reverse_winding = true;
        self
    }

    /// Compute facet normals.
    pub fn with_facet_normals(mut self) -> Self {
        self.facet_normals = true;
        self
    }

    /// Compute vertex normals with the given crease angle; implies facet normals.
    pub fn with_smoothing(mut self, angle: f32) -> Self {
        self.facet_normals = true;
        self.smoothing_angle = Some(angle);
        self
    }

    /// Generate texture coordinates.
    pub fn with_texture(mut self, projection: TextureProjection) -> Self {
        self.texture = Some(projection);
        self
    }

    /// Weld vertices closer than `epsilon` per axis.
    pub fn with_weld(mut self, epsilon: f32) -> Self {
        self.weld_epsilon = Some(epsilon);
        self
    }

    /// Run these stages on `mesh`; see [`process`].
    pub fn apply(&self, mesh: &mut Mesh) -> Result<ProcessSummary> {
        process(mesh, self)
    }

    fn stages(&self) -> usize {
        [
            self.unitize,
            self.scale.is_some(),
            self.reverse_winding,
            self.facet_normals || self.smoothing_angle.is_some(),
            self.smoothing_angle.is_some(),
            self.texture.is_some(),
            self.weld_epsilon.is_some(),
        ]
        .into_iter()
        .filter(|&on| on)
        .count()
    }
}

/// What [`process`] did beyond updating the mesh.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProcessSummary {
    /// Scale factor applied by unitizing.
    pub unitize_scale: Option<f32>,
    /// Vertices removed by welding.
    pub welded: usize,
}

/// Run the requested stages on `mesh`.
///
/// Stops at the first failing stage; earlier stages have already been
/// applied at that point.
pub fn process(mesh: &mut Mesh, options: &ProcessOptions) -> Result<ProcessSummary> {
    process_with_progress(mesh, options, &Progress::none())
}

/// [`process`] with progress reporting.
pub fn process_with_progress(
    mesh: &mut Mesh,
    options: &ProcessOptions,
    progress: &Progress<'_>,
) -> Result<ProcessSummary> {
    let count = options.stages();
    let mut index = 0;
    let mut next = |message: &str| {
        progress.report_within(0, 1, index, count, message);
        index += 1;
        index - 1
    };
    let mut summary = ProcessSummary::default();

    if options.unitize {
        next("unitizing");
        summary.unitize_scale = Some(unitize(mesh));
    }
    if let Some(factor) = options.scale {
        next("scaling");
        scale(mesh, factor)?;
    }
    if options.reverse_winding {
        next("reversing winding");
        reverse_winding(mesh);
    }
    if options.facet_normals || options.smoothing_angle.is_some() {
        next("computing facet normals");
        facet_normals(mesh);
    }
    if let Some(angle) = options.smoothing_angle {
        next("computing vertex normals");
        vertex_normals(mesh, angle)?;
    }
    if let Some(projection) = options.texture {
        next("generating texture coordinates");
        projection.apply(mesh)?;
    }
    if let Some(epsilon) = options.weld_epsilon {
        let stage = next("welding");
        summary.welded = weld_with_progress(mesh, epsilon, &progress.stage(stage, count))?;
    }

    if count > 0 {
        progress.report(count, count, "done");
    }
    debug!("ran {} processing stages: {:?}", count, summary);
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MeshError;
    use crate::mesh::unit_cube;
    use std::sync::Mutex;

    #[test]
    fn test_smoothing_implies_facet_normals() {
        let options = ProcessOptions::default().with_smoothing(30.0);
        assert!(options.facet_normals);

        let mut mesh = unit_cube();
        process(&mut mesh, &options).unwrap();
        assert!(mesh.has_facet_normals());
        // per vertex: one shared normal for the reference face's corners, a
        // private one for every other corner
        assert_eq!(mesh.num_normals(), 32);
    }

    #[test]
    fn test_full_pipeline() {
        let options = ProcessOptions::default()
            .with_unitize()
            .with_smoothing(90.0)
            .with_texture(TextureProjection::Spherical)
            .with_weld(1e-5);
        let mut mesh = unit_cube();
        let summary = options.apply(&mut mesh).unwrap();

        assert_eq!(summary.unitize_scale, Some(2.0));
        assert_eq!(summary.welded, 0);
        assert_eq!(mesh.num_texcoords(), mesh.num_normals());
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_spherical_without_normals_fails() {
        let options = ProcessOptions::default().with_texture(TextureProjection::Spherical);
        let err = process(&mut unit_cube(), &options).unwrap_err();
        assert!(matches!(err, MeshError::MissingAttribute { .. }));
    }

    #[test]
    fn test_empty_options_do_nothing() {
        let mut mesh = unit_cube();
        let summary = process(&mut mesh, &ProcessOptions::default()).unwrap();
        assert_eq!(summary, ProcessSummary::default());
        assert!(!mesh.has_facet_normals());
    }

    #[test]
    fn test_progress_is_monotonic() {
        let seen = Mutex::new(Vec::new());
        let progress = Progress::new(|current, total, _: &str| {
            seen.lock().unwrap().push(current as f64 / total as f64);
        });
        let options = ProcessOptions::default()
            .with_reversed_winding()
            .with_facet_normals()
            .with_weld(0.0);
        process_with_progress(&mut unit_cube(), &options, &progress).unwrap();
        drop(progress);

        let seen = seen.into_inner().unwrap();
        assert!(seen.windows(2).all(|w| w[0] <= w[1]), "{:?}", seen);
        assert_eq!(seen.last(), Some(&1.0));
    }
}
