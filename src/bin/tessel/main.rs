//! Tessel CLI - inspect and process Wavefront OBJ meshes.
//!
//! Usage: tessel <COMMAND> [OPTIONS] <INPUT>...
//!
//! Run `tessel --help` for available commands.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use clap::{Parser, Subcommand};
use rayon::prelude::*;
use tracing::{error, info};

use tessel::algo::{pipeline, transform, ProcessOptions, Progress, TextureProjection};
use tessel::error::MeshError;
use tessel::io;
use tessel::mesh::Mesh;
use tessel::render::{RenderMode, RenderOption};

#[derive(Parser)]
#[command(name = "tessel")]
#[command(author, version, about = "Wavefront OBJ mesh tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display mesh information
    Info {
        /// Input OBJ file
        input: PathBuf,
    },

    /// Generate attributes and write the meshes to a directory
    Process {
        /// Input OBJ files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Directory receiving the output files
        #[arg(short, long)]
        out_dir: PathBuf,

        /// Centre on the origin and fit into [-1, 1]
        #[arg(long)]
        unitize: bool,

        /// Uniform scale factor
        #[arg(long)]
        scale: Option<f32>,

        /// Reverse triangle winding
        #[arg(long)]
        reverse: bool,

        /// Compute facet normals
        #[arg(long)]
        facet: bool,

        /// Compute vertex normals with this crease angle in degrees
        #[arg(long, value_name = "ANGLE")]
        smooth: Option<f32>,

        /// Texture coordinate projection (planar or spherical)
        #[arg(long)]
        texture: Option<TextureProjection>,

        /// Weld vertices closer than EPS on every axis
        #[arg(long, value_name = "EPS")]
        weld: Option<f32>,

        /// Output components (flat, smooth, texture, color, material)
        #[arg(short, long, value_delimiter = ',')]
        mode: Vec<RenderOption>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Info { input } => {
            cmd_info(&input)?;
        }

        Commands::Process {
            inputs,
            out_dir,
            unitize,
            scale,
            reverse,
            facet,
            smooth,
            texture,
            weld,
            mode,
        } => {
            let mut options = ProcessOptions::default();
            if unitize {
                options = options.with_unitize();
            }
            if let Some(factor) = scale {
                options = options.with_scale(factor);
            }
            if reverse {
                options = options.with_reversed_winding();
            }
            if facet {
                options = options.with_facet_normals();
            }
            if let Some(angle) = smooth {
                options = options.with_smoothing(angle);
            }
            if let Some(projection) = texture {
                options = options.with_texture(projection);
            }
            if let Some(epsilon) = weld {
                options = options.with_weld(epsilon);
            }
            let mode: RenderMode = mode.into_iter().collect();

            cmd_process(&inputs, &out_dir, &options, mode)?;
        }
    }

    Ok(())
}

/// Create a progress reporter that displays a progress bar on the terminal.
fn create_progress() -> Progress<'static> {
    let max_percent = AtomicUsize::new(0);

    Progress::new(move |current, total, message| {
        if total == 0 {
            return;
        }

        let raw_percent = if current >= total {
            100
        } else {
            ((current * 100) + (total / 2)) / total
        };

        // Never move backwards when a stage hands over to the next one.
        let previous = max_percent.fetch_max(raw_percent, Ordering::Relaxed);
        let percent = previous.max(raw_percent);
        if percent == previous && percent != 100 {
            return;
        }

        let bar_width = 30;
        let filled = (percent * bar_width) / 100;
        let bar = "=".repeat(filled);
        let space = " ".repeat(bar_width - filled);

        eprint!("\r[{}{}] {:3}% {:<32}", bar, space, percent, message);
        let _ = std::io::stderr().flush();

        if current >= total {
            eprintln!();
        }
    })
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mesh = io::load(input)?;

    println!("File: {}", input.display());
    println!("Vertices: {}", mesh.num_vertices());
    println!("Normals: {}", mesh.num_normals());
    println!("Texture coordinates: {}", mesh.num_texcoords());
    println!("Facet normals: {}", mesh.num_facet_normals());
    println!("Triangles: {}", mesh.num_triangles());

    if let Some((min, max)) = mesh.bounding_box() {
        println!(
            "Bounding box: ({:.3}, {:.3}, {:.3}) to ({:.3}, {:.3}, {:.3})",
            min.x, min.y, min.z, max.x, max.y, max.z
        );
        let size = transform::dimensions(&mesh);
        println!("Dimensions: {:.3} x {:.3} x {:.3}", size.x, size.y, size.z);
    }

    println!("\nGroups: {}", mesh.num_groups());
    for g in mesh.groups() {
        println!(
            "  {:<24} {:>8} triangles  material {}",
            g.name(),
            g.num_triangles(),
            mesh.material(g.material()).name
        );
    }

    match mesh.material_library() {
        Some(library) => println!("\nMaterial library: {}", library),
        None => println!("\nMaterial library: none"),
    }
    for m in mesh.materials() {
        println!(
            "  {:<24} Kd ({:.3}, {:.3}, {:.3})  alpha {:.3}",
            m.name,
            m.diffuse[0],
            m.diffuse[1],
            m.diffuse[2],
            m.alpha()
        );
    }

    Ok(())
}

fn cmd_process(
    inputs: &[PathBuf],
    out_dir: &Path,
    options: &ProcessOptions,
    mode: RenderMode,
) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(out_dir)?;
    info!(
        "processing {} file(s) into {}",
        inputs.len(),
        out_dir.display()
    );

    // One bar is readable; several workers sharing the line are not.
    let show_progress = inputs.len() == 1;

    let start = Instant::now();
    let failures: Vec<(&PathBuf, MeshError)> = inputs
        .par_iter()
        .filter_map(|input| {
            let progress = if show_progress {
                create_progress()
            } else {
                Progress::none()
            };
            process_file(input, out_dir, options, mode, &progress)
                .err()
                .map(|e| (input, e))
        })
        .collect();
    let elapsed = start.elapsed();

    for (input, e) in &failures {
        error!("{}: {}", input.display(), e);
    }
    println!(
        "Processed {} of {} file(s) ({:.2?})",
        inputs.len() - failures.len(),
        inputs.len(),
        elapsed
    );

    if failures.is_empty() {
        Ok(())
    } else {
        Err(format!("{} file(s) failed", failures.len()).into())
    }
}

fn process_file(
    input: &Path,
    out_dir: &Path,
    options: &ProcessOptions,
    mode: RenderMode,
    progress: &Progress<'_>,
) -> Result<(), MeshError> {
    let name = input
        .file_name()
        .ok_or_else(|| MeshError::invalid_param("input", input.display(), "not a file"))?;
    let output = out_dir.join(name);
    if same_file(input, &output) {
        return Err(MeshError::invalid_param(
            "out-dir",
            out_dir.display(),
            "would overwrite the input",
        ));
    }

    let mut mesh: Mesh = io::load(input)?;
    info!(
        "{}: {} vertices, {} triangles",
        input.display(),
        mesh.num_vertices(),
        mesh.num_triangles()
    );

    let summary = pipeline::process_with_progress(&mut mesh, options, progress)?;
    if let Some(factor) = summary.unitize_scale {
        info!("{}: unitized with scale {}", input.display(), factor);
    }
    if summary.welded > 0 {
        info!("{}: welded {} vertices", input.display(), summary.welded);
    }

    let written = io::save(&mesh, &output, mode)?;
    info!("{} -> {} ({})", input.display(), output.display(), written);
    Ok(())
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
