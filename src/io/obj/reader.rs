//! Two-pass Wavefront OBJ reader.
//!
//! The first pass counts vertices, normals, texture coordinates and the
//! triangles of every group, and loads material libraries as soon as they are
//! referenced. The second pass rewinds and fills arrays allocated to exactly
//! those sizes.
//!
//! Relative (negative) face indices are resolved against the number of
//! elements read *so far* in the pass doing the resolving, never against the
//! final totals.

use std::fs::File;
use std::io::{BufRead, BufReader, Seek};
use std::path::Path;

use tracing::{debug, info, warn};

use super::statement::{parse_line, resolve, FaceRef, Statement};
use crate::error::{MeshError, Result};
use crate::io::mtl;
use crate::mesh::{
    fan, Group, GroupId, Material, MaterialId, Mesh, NormalId, TexcoordId, Triangle, VertexId,
};

/// Running or final element counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Counts {
    vertices: usize,
    normals: usize,
    texcoords: usize,
}

/// Everything the first pass learns about a file.
#[derive(Debug)]
struct Census {
    counts: Counts,
    /// Group names in order of first appearance, with their triangle counts.
    groups: Vec<(String, usize)>,
    materials: Vec<Material>,
    material_library: Option<String>,
    skipped: usize,
}

impl Census {
    fn new() -> Self {
        Self {
            counts: Counts::default(),
            groups: vec![(Group::DEFAULT_NAME.to_string(), 0)],
            materials: vec![Material::default()],
            material_library: None,
            skipped: 0,
        }
    }

    fn num_triangles(&self) -> usize {
        self.groups.iter().map(|(_, n)| n).sum()
    }

    /// Index of the group called `name`, created if absent.
    fn group(&mut self, name: &str) -> usize {
        match self.groups.iter().position(|(g, _)| g == name) {
            Some(i) => i,
            None => {
                self.groups.push((name.to_string(), 0));
                self.groups.len() - 1
            }
        }
    }
}

/// Failure inside a statement handler: either a grammar problem on the
/// current line, or an error from a nested operation.
enum Fault {
    Line(String),
    Mesh(MeshError),
}

impl From<String> for Fault {
    fn from(message: String) -> Self {
        Fault::Line(message)
    }
}

impl From<MeshError> for Fault {
    fn from(err: MeshError) -> Self {
        Fault::Mesh(err)
    }
}

/// Load a mesh from an OBJ file.
///
/// Material libraries named by `mtllib` are resolved relative to the
/// directory containing `path`.
///
/// # Errors
///
/// Returns [`MeshError::FileOpen`] if the file or a referenced material
/// library cannot be opened, and [`MeshError::Malformed`] for any line that
/// does not match the grammar. No partial mesh is returned.
///
/// # Example
///
/// ```no_run
/// use tessel::io::obj;
///
/// let mesh = obj::load("model.obj").unwrap();
/// println!("{} triangles", mesh.num_triangles());
/// ```
pub fn load<P: AsRef<Path>>(path: P) -> Result<Mesh> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| MeshError::open(path, e))?;
    read(BufReader::new(file), path)
}

/// Read a mesh from a seekable source.
///
/// `path` names the source in error messages and anchors relative
/// `mtllib` references.
pub fn read<R: BufRead + Seek>(mut reader: R, path: &Path) -> Result<Mesh> {
    let census = count(&mut reader, path)?;
    debug!(
        "{}: first pass found {} vertices, {} normals, {} texcoords, {} triangles in {} groups",
        path.display(),
        census.counts.vertices,
        census.counts.normals,
        census.counts.texcoords,
        census.num_triangles(),
        census.groups.len()
    );

    reader.rewind()?;
    let mesh = fill(&mut reader, path, census)?;

    info!(
        "read {}: {} vertices, {} triangles, {} groups, {} materials",
        path.display(),
        mesh.num_vertices(),
        mesh.num_triangles(),
        mesh.num_groups(),
        mesh.num_materials()
    );
    Ok(mesh)
}

/// Feed every statement of the source to `visit`, attaching line numbers to
/// grammar errors.
fn scan<R, F>(reader: &mut R, path: &Path, mut visit: F) -> Result<()>
where
    R: BufRead,
    F: FnMut(Statement<'_>, &[FaceRef]) -> std::result::Result<(), Fault>,
{
    let mut line = String::new();
    let mut refs = Vec::new();
    let mut number = 0;

    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Ok(());
        }
        number += 1;

        let at = |message: String| MeshError::Malformed {
            path: path.to_path_buf(),
            line: number,
            message,
        };

        let Some(statement) = parse_line(&line, &mut refs).map_err(at)? else {
            continue;
        };
        visit(statement, &refs).map_err(|fault| match fault {
            Fault::Line(message) => at(message),
            Fault::Mesh(err) => err,
        })?;
    }
}

/// Resolve the three indices of one face corner.
///
/// `totals` is `None` during the first pass, when forward references cannot
/// be range-checked yet.
fn corner(
    r: &FaceRef,
    running: Counts,
    totals: Option<Counts>,
) -> std::result::Result<(VertexId, TexcoordId, NormalId), String> {
    let v = resolve(r.v, running.vertices, totals.map(|t| t.vertices), "vertex")?;
    let t = match r.t {
        Some(raw) => resolve(raw, running.texcoords, totals.map(|t| t.texcoords), "texcoord")?,
        None => 0,
    };
    let n = match r.n {
        Some(raw) => resolve(raw, running.normals, totals.map(|t| t.normals), "normal")?,
        None => 0,
    };
    Ok((VertexId::new(v), TexcoordId::new(t), NormalId::new(n)))
}

/// First pass: count elements and per-group triangles, load material libraries.
fn count<R: BufRead>(reader: &mut R, path: &Path) -> Result<Census> {
    let dir = path.parent().unwrap_or_else(|| Path::new(""));
    let mut census = Census::new();
    let mut current = 0;

    scan(reader, path, |statement, refs| {
        match statement {
            Statement::Vertex(_) => census.counts.vertices += 1,
            Statement::Normal(_) => census.counts.normals += 1,
            Statement::Texcoord(_) => census.counts.texcoords += 1,
            Statement::Face => {
                for r in refs {
                    corner(r, census.counts, None)?;
                }
                census.groups[current].1 += refs.len() - 2;
            }
            Statement::Group(name) => current = census.group(group_name(name)),
            Statement::MaterialLibrary(names) => {
                for name in names {
                    let loaded = mtl::load(dir.join(name))?;
                    census.materials.extend(loaded.into_iter().skip(1));
                    census
                        .material_library
                        .get_or_insert_with(|| name.to_string());
                }
            }
            Statement::UseMaterial(_) => {}
            Statement::Skipped(_) => census.skipped += 1,
        }
        Ok(())
    })?;

    Ok(census)
}

/// Second pass: fill exactly-sized arrays and materialize triangles.
fn fill<R: BufRead>(reader: &mut R, path: &Path, census: Census) -> Result<Mesh> {
    let totals = census.counts;
    if census.skipped > 0 {
        debug!("{}: skipped {} unsupported statements", path.display(), census.skipped);
    }

    let expected_triangles = census.num_triangles();
    let mut mesh = Mesh::new();
    mesh.path = Some(path.to_path_buf());
    mesh.material_library = census.material_library;
    mesh.materials = census.materials;
    mesh.vertices = Vec::with_capacity(totals.vertices);
    mesh.normals = Vec::with_capacity(totals.normals);
    mesh.texcoords = Vec::with_capacity(totals.texcoords);
    mesh.triangles = Vec::with_capacity(expected_triangles);
    mesh.groups = census
        .groups
        .iter()
        .map(|(name, n)| Group::with_capacity(name.as_str(), *n))
        .collect();

    let mut current = GroupId::new(0);
    let mut material = MaterialId::DEFAULT;
    let mut corners = Vec::new();

    scan(reader, path, |statement, refs| {
        match statement {
            Statement::Vertex(p) => mesh.vertices.push(p),
            Statement::Normal(n) => mesh.normals.push(n),
            Statement::Texcoord(t) => mesh.texcoords.push(t),
            Statement::Face => {
                let running = Counts {
                    vertices: mesh.vertices.len(),
                    normals: mesh.normals.len(),
                    texcoords: mesh.texcoords.len(),
                };
                corners.clear();
                for r in refs {
                    corners.push(corner(r, running, Some(totals))?);
                }
                for abc in fan(corners.len()) {
                    let pick = |i: usize| corners[abc[i]];
                    let (v0, t0, n0) = pick(0);
                    let (v1, t1, n1) = pick(1);
                    let (v2, t2, n2) = pick(2);
                    let triangle = Triangle {
                        vertices: [v0, v1, v2],
                        texcoords: [t0, t1, t2],
                        normals: [n0, n1, n2],
                        ..Default::default()
                    };
                    mesh.add_triangle(current, triangle);
                }
            }
            Statement::Group(name) => {
                let name = group_name(name);
                current = mesh.find_group(name).ok_or_else(|| {
                    format!("group `{}` was not seen by the first pass", name)
                })?;
                mesh.groups[current.index()].material = material;
            }
            Statement::UseMaterial(name) => {
                material = mesh.find_material(name).unwrap_or_else(|| {
                    warn!(
                        "{}: can't find material `{}`, using default",
                        path.display(),
                        name
                    );
                    MaterialId::DEFAULT
                });
                mesh.groups[current.index()].material = material;
            }
            Statement::MaterialLibrary(_) | Statement::Skipped(_) => {}
        }
        Ok(())
    })?;

    let read = Counts {
        vertices: mesh.vertices.len(),
        normals: mesh.normals.len(),
        texcoords: mesh.texcoords.len(),
    };
    if read != totals || mesh.triangles.len() != expected_triangles {
        return Err(MeshError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("{} changed between passes", path.display()),
        )));
    }

    Ok(mesh)
}

/// `g` without a name returns to the default group.
fn group_name(name: &str) -> &str {
    if name.is_empty() {
        Group::DEFAULT_NAME
    } else {
        name
    }
}
