//! Wavefront OBJ writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::error::{MeshError, Result};
use crate::io::mtl;
use crate::mesh::{Mesh, Triangle};
use crate::render::RenderMode;

/// Write `mesh` in OBJ format, honouring as much of `mode` as the mesh supports.
///
/// The mode is first narrowed with [`RenderMode::resolve`]; options that
/// cannot be honoured are logged and skipped. Output holds positions, then
/// either vertex normals (smooth) or facet normals (flat), then texture
/// coordinates, then each group with its faces. In material mode every group
/// is preceded by `usemtl` and the file names its material library; writing
/// the library itself is left to [`save`].
///
/// Returns the mode actually written.
pub fn write<W: Write>(mesh: &Mesh, mut w: W, mode: RenderMode) -> Result<RenderMode> {
    let mode = mode.resolve(mesh).mode;

    writeln!(w, "#")?;
    writeln!(w, "# Wavefront OBJ generated by tessel")?;
    writeln!(w, "#")?;

    if mode.material {
        if let Some(library) = mesh.material_library() {
            writeln!(w)?;
            writeln!(w, "mtllib {}", library)?;
        }
    }

    writeln!(w)?;
    writeln!(w, "# {} vertices", mesh.num_vertices())?;
    for v in mesh.vertices() {
        writeln!(w, "v {:.6} {:.6} {:.6}", v.x, v.y, v.z)?;
    }

    let normals = if mode.smooth {
        mesh.normals()
    } else if mode.flat {
        mesh.facet_normals()
    } else {
        &[]
    };
    if !normals.is_empty() {
        writeln!(w)?;
        writeln!(w, "# {} normals", normals.len())?;
        for n in normals {
            writeln!(w, "vn {:.6} {:.6} {:.6}", n.x, n.y, n.z)?;
        }
    }

    if mode.texture {
        writeln!(w)?;
        writeln!(w, "# {} texcoords", mesh.num_texcoords())?;
        for t in mesh.texcoords() {
            writeln!(w, "vt {:.6} {:.6}", t.x, t.y)?;
        }
    }

    writeln!(w)?;
    writeln!(w, "# {} groups", mesh.num_groups())?;
    writeln!(w, "# {} faces (triangles)", mesh.num_triangles())?;

    for group in mesh.groups() {
        writeln!(w)?;
        writeln!(w, "g {}", group.name())?;
        if mode.material {
            writeln!(w, "usemtl {}", mesh.material(group.material()).name)?;
        }
        for &t in group.triangles() {
            write_face(&mut w, mesh.triangle(t), mode)?;
        }
    }

    w.flush()?;
    Ok(mode)
}

/// One `f` line. Each corner uses the richest of `v`, `v/t`, `v//n` and
/// `v/t/n` its indices allow; in flat mode the normal is the facet normal.
fn write_face<W: Write>(w: &mut W, triangle: &Triangle, mode: RenderMode) -> std::io::Result<()> {
    write!(w, "f")?;
    for c in 0..3 {
        let v = triangle.vertices[c].get();
        let t = mode
            .texture
            .then(|| triangle.texcoords[c].to_option())
            .flatten();
        let n = if mode.smooth {
            triangle.normals[c].to_option().map(|n| n.get())
        } else if mode.flat {
            triangle.facet.to_option().map(|f| f.get())
        } else {
            None
        };
        match (t, n) {
            (None, None) => write!(w, " {}", v)?,
            (Some(t), None) => write!(w, " {}/{}", v, t.get())?,
            (None, Some(n)) => write!(w, " {}//{}", v, n)?,
            (Some(t), Some(n)) => write!(w, " {}/{}/{}", v, t.get(), n)?,
        }
    }
    writeln!(w)
}

/// Save `mesh` to an OBJ file.
///
/// In material mode the material library named by the mesh is written next
/// to `path` as well. Returns the mode actually written.
///
/// # Example
///
/// ```no_run
/// use tessel::io::obj;
/// use tessel::render::RenderMode;
///
/// let mesh = obj::load("in.obj").unwrap();
/// obj::save(&mesh, "out.obj", RenderMode::none().with_smooth()).unwrap();
/// ```
pub fn save<P: AsRef<Path>>(mesh: &Mesh, path: P, mode: RenderMode) -> Result<RenderMode> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| MeshError::open(path, e))?;
    let written = write(mesh, BufWriter::new(file), mode)?;

    if written.material {
        if let Some(library) = mesh.material_library() {
            let dir = path.parent().unwrap_or_else(|| Path::new(""));
            mtl::save(&mesh.materials()[1..], dir.join(library))?;
        }
    }

    info!(
        "wrote {} ({} vertices, {} triangles, mode {})",
        path.display(),
        mesh.num_vertices(),
        mesh.num_triangles(),
        written
    );
    Ok(written)
}
