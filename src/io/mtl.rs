//! Wavefront MTL material libraries.
//!
//! Recognized statements are `newmtl`, `Ka`, `Kd`, `Ks`, `Ke`, `Ns`, `d` and
//! `map_Kd`. Anything else (illumination models, refraction indices, other
//! texture maps) is ignored.
//!
//! Shininess is stored in `[0, 1000]` on disk and in `[0, 128]` in memory.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Seek, Write};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{MeshError, Result};
use crate::io::lex::{floats, split_line};
use crate::mesh::{Material, Rgba};

const SHININESS_FILE_MAX: f32 = 1000.0;
const SHININESS_MAX: f32 = 128.0;

/// Load a material library.
///
/// The returned list always starts with the synthesized default material,
/// followed by the library's materials in file order.
///
/// # Errors
///
/// Returns [`MeshError::FileOpen`] if the file cannot be opened and
/// [`MeshError::Malformed`] for a recognized statement with bad arguments.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<Material>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| MeshError::open(path, e))?;
    read(BufReader::new(file), path)
}

/// Read a material library from a seekable source.
pub fn read<R: BufRead + Seek>(mut reader: R, path: &Path) -> Result<Vec<Material>> {
    let mut count = 0;
    each_line(&mut reader, path, |keyword, _| {
        if keyword == "newmtl" {
            count += 1;
        }
        Ok(())
    })?;

    reader.rewind()?;

    let mut materials = Vec::with_capacity(count + 1);
    materials.push(Material::default());
    let mut orphans = 0;

    each_line(&mut reader, path, |keyword, args| {
        if keyword == "newmtl" {
            if args.is_empty() {
                return Err("newmtl without a material name".to_string());
            }
            materials.push(Material::named(args));
            return Ok(());
        }

        // index 0 is the synthesized default and never receives file data
        if materials.len() == 1 {
            if is_attribute(keyword) {
                orphans += 1;
            }
            return Ok(());
        }
        let last = materials.len() - 1;
        let material = &mut materials[last];

        match keyword {
            "Ka" => set_rgb(&mut material.ambient, floats::<3>(args, 0, "ambient colour")?),
            "Kd" => set_rgb(&mut material.diffuse, floats::<3>(args, 0, "diffuse colour")?),
            "Ks" => set_rgb(&mut material.specular, floats::<3>(args, 0, "specular colour")?),
            "Ke" => set_rgb(&mut material.emissive, floats::<3>(args, 0, "emissive colour")?),
            "Ns" => {
                let [ns] = floats::<1>(args, 0, "shininess")?;
                material.shininess = ns / SHININESS_FILE_MAX * SHININESS_MAX;
            }
            "d" => {
                let [alpha] = floats::<1>(args, 0, "dissolve")?;
                material.set_alpha(alpha);
            }
            "map_Kd" => {
                // options such as `-s 1 1 1` precede the file name
                if let Some(name) = args.split_whitespace().last() {
                    material.diffuse_map = Some(name.to_string());
                }
            }
            other => debug!("{}: ignoring `{}`", path.display(), other),
        }
        Ok(())
    })?;

    if orphans > 0 {
        warn!(
            "{}: ignored {} material attributes before the first newmtl",
            path.display(),
            orphans
        );
    }
    debug!("{}: loaded {} materials", path.display(), materials.len() - 1);
    Ok(materials)
}

fn is_attribute(keyword: &str) -> bool {
    matches!(keyword, "Ka" | "Kd" | "Ks" | "Ke" | "Ns" | "d" | "map_Kd")
}

fn set_rgb(target: &mut Rgba, [r, g, b]: [f32; 3]) {
    target[0] = r;
    target[1] = g;
    target[2] = b;
}

/// Call `visit` with the keyword and arguments of every non-blank line.
fn each_line<R, F>(reader: &mut R, path: &Path, mut visit: F) -> Result<()>
where
    R: BufRead,
    F: FnMut(&str, &str) -> std::result::Result<(), String>,
{
    let mut line = String::new();
    let mut number = 0;
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Ok(());
        }
        number += 1;
        if let Some((keyword, args)) = split_line(&line) {
            visit(keyword, args).map_err(|message| MeshError::Malformed {
                path: path.to_path_buf(),
                line: number,
                message,
            })?;
        }
    }
}

/// Write materials in MTL format.
pub fn write<W: Write>(materials: &[Material], mut w: W) -> Result<()> {
    writeln!(w, "# Wavefront MTL generated by tessel")?;
    writeln!(w, "# {} materials", materials.len())?;

    for m in materials {
        let rgb = |c: &Rgba| format!("{:.6} {:.6} {:.6}", c[0], c[1], c[2]);

        writeln!(w)?;
        writeln!(w, "newmtl {}", m.name)?;
        writeln!(w, "Ka {}", rgb(&m.ambient))?;
        writeln!(w, "Kd {}", rgb(&m.diffuse))?;
        writeln!(w, "Ks {}", rgb(&m.specular))?;
        if m.emissive[..3].iter().any(|&c| c != 0.0) {
            writeln!(w, "Ke {}", rgb(&m.emissive))?;
        }
        writeln!(w, "Ns {:.6}", m.shininess / SHININESS_MAX * SHININESS_FILE_MAX)?;
        if m.alpha() != 1.0 {
            writeln!(w, "d {:.6}", m.alpha())?;
        }
        if let Some(map) = &m.diffuse_map {
            writeln!(w, "map_Kd {}", map)?;
        }
    }
    w.flush()?;
    Ok(())
}

/// Save materials to an MTL file.
pub fn save<P: AsRef<Path>>(materials: &[Material], path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| MeshError::open(path, e))?;
    write(materials, BufWriter::new(file))?;
    info!("wrote {} materials to {}", materials.len(), path.display());
    Ok(())
}
