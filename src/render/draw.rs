//! Walking a mesh the way an immediate-mode renderer would.
//!
//! [`draw`] resolves the requested mode, then streams triangles corner by
//! corner to a [`DrawSink`]. With colour or material output the triangles are
//! batched by material so the sink switches shading state once per material.

use nalgebra::{Point2, Point3, Vector3};

use super::mode::RenderMode;
use crate::mesh::{GroupId, Material, Mesh};

/// Receiver of a draw walk.
pub trait DrawSink {
    /// Start a batch of triangles. `material` is set in colour and material
    /// mode and `None` otherwise.
    fn begin_batch(&mut self, material: Option<&Material>);

    /// One triangle corner. Three consecutive calls form a triangle.
    fn vertex(
        &mut self,
        position: &Point3<f32>,
        normal: Option<&Vector3<f32>>,
        texcoord: Option<&Point2<f32>>,
    );

    /// End the current batch.
    fn end_batch(&mut self) {}
}

/// Stream `mesh` to `sink` in as much of `mode` as the mesh supports.
///
/// In flat mode every corner carries its triangle's facet normal, in smooth
/// mode its own vertex normal. Returns the mode actually used.
pub fn draw<S: DrawSink + ?Sized>(mesh: &Mesh, mode: RenderMode, sink: &mut S) -> RenderMode {
    let mode = mode.resolve(mesh).mode;

    if mode.color || mode.material {
        for (material, groups) in mesh.material_batches() {
            sink.begin_batch(Some(mesh.material(material)));
            emit(mesh, &groups, mode, sink);
            sink.end_batch();
        }
    } else {
        let groups: Vec<GroupId> = mesh.group_ids().collect();
        sink.begin_batch(None);
        emit(mesh, &groups, mode, sink);
        sink.end_batch();
    }
    mode
}

fn emit<S: DrawSink + ?Sized>(mesh: &Mesh, groups: &[GroupId], mode: RenderMode, sink: &mut S) {
    for &g in groups {
        for &t in mesh.group(g).triangles() {
            let triangle = mesh.triangle(t);
            for c in 0..3 {
                let normal = if mode.smooth {
                    triangle.normals[c].to_option().map(|n| mesh.normal(n))
                } else if mode.flat {
                    triangle.facet.to_option().map(|f| mesh.facet_normal(f))
                } else {
                    None
                };
                let texcoord = mode
                    .texture
                    .then(|| triangle.texcoords[c].to_option())
                    .flatten()
                    .map(|i| mesh.texcoord(i));
                sink.vertex(mesh.vertex(triangle.vertices[c]), normal, texcoord);
            }
        }
    }
}
