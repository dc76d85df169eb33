//! End-to-end tests over files on disk.

use std::fs;
use std::path::Path;

use nalgebra::Vector3;
use tempfile::TempDir;
use tessel::algo::{normals, weld, ProcessOptions, TextureProjection};
use tessel::error::MeshError;
use tessel::io;
use tessel::render::RenderMode;

const CUBE: &str = "\
# unit cube, one quad per side
mtllib cube.mtl
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
v 0 0 1
v 1 0 1
v 1 1 1
v 0 1 1
g sides
usemtl grey
f 1 4 3 2
f 5 6 7 8
f 1 2 6 5
f 4 8 7 3
f 1 5 8 4
g lid
usemtl red
f 2 3 7 6
";

const CUBE_MTL: &str = "\
newmtl grey
Kd 0.5 0.5 0.5
newmtl red
Kd 1 0 0
Ns 500
d 0.5
";

fn write_fixture(dir: &Path) -> std::path::PathBuf {
    fs::write(dir.join("cube.mtl"), CUBE_MTL).unwrap();
    let path = dir.join("cube.obj");
    fs::write(&path, CUBE).unwrap();
    path
}

#[test]
fn test_load_with_material_library() {
    let dir = TempDir::new().unwrap();
    let mesh = io::load(write_fixture(dir.path())).unwrap();

    assert_eq!(mesh.num_vertices(), 8);
    assert_eq!(mesh.num_triangles(), 12);
    assert_eq!(mesh.material_library(), Some("cube.mtl"));
    assert_eq!(mesh.num_materials(), 3);

    let lid = mesh.find_group("lid").unwrap();
    assert_eq!(mesh.group(lid).num_triangles(), 2);
    let red = mesh.material(mesh.group(lid).material());
    assert_eq!(red.name, "red");
    assert_eq!(red.diffuse, [1.0, 0.0, 0.0, 0.5]);
    assert!((red.shininess - 64.0).abs() < 1e-4);

    let sides = mesh.find_group("sides").unwrap();
    assert_eq!(mesh.material(mesh.group(sides).material()).name, "grey");
    assert!(mesh.is_valid());
}

#[test]
fn test_missing_library_fails_to_open() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cube.obj");
    fs::write(&path, CUBE).unwrap();

    let err = io::load(&path).unwrap_err();
    assert!(matches!(err, MeshError::FileOpen { .. }), "{:?}", err);
}

#[test]
fn test_cube_smoothed_at_right_angle_keeps_hard_edges() {
    let dir = TempDir::new().unwrap();
    let mut mesh = io::load(write_fixture(dir.path())).unwrap();

    ProcessOptions::default()
        .with_smoothing(90.0)
        .apply(&mut mesh)
        .unwrap();

    // no vertex normal bends across an edge of the cube
    for n in mesh.normals() {
        let axis_aligned = (0..3).filter(|&i| n[i].abs() > 1e-6).count() == 1;
        assert!(axis_aligned, "{:?}", n);
        assert!((n.norm() - 1.0).abs() < 1e-6);
    }
    // a corner's normal always agrees with the facet it belongs to
    for t in mesh.triangles() {
        let facet = mesh.facet_normal(t.facet);
        for c in 0..3 {
            assert_eq!(mesh.normal(t.normals[c]), facet);
        }
    }
    assert_eq!(mesh.num_normals(), 32);
}

#[test]
fn test_round_trip_in_material_mode() {
    let src = TempDir::new().unwrap();
    let mut mesh = io::load(write_fixture(src.path())).unwrap();
    ProcessOptions::default()
        .with_smoothing(45.0)
        .with_texture(TextureProjection::Planar)
        .apply(&mut mesh)
        .unwrap();

    let out = TempDir::new().unwrap();
    let path = out.path().join("cube.obj");
    let written = io::save(&mesh, &path, RenderMode::all()).unwrap();
    assert_eq!(
        written,
        RenderMode::none().with_smooth().with_texture().with_material()
    );
    assert!(out.path().join("cube.mtl").exists());

    let again = io::load(&path).unwrap();
    assert_eq!(again.num_vertices(), mesh.num_vertices());
    assert_eq!(again.num_normals(), mesh.num_normals());
    assert_eq!(again.num_texcoords(), mesh.num_texcoords());
    assert_eq!(again.num_triangles(), mesh.num_triangles());
    assert_eq!(again.vertices(), mesh.vertices());

    let names: Vec<&str> = again.materials().iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["default", "grey", "red"]);
    let lid = again.find_group("lid").unwrap();
    assert_eq!(again.material(again.group(lid).material()).name, "red");
    assert_eq!(again.material(again.group(lid).material()).alpha(), 0.5);

    for (a, b) in mesh.triangles().iter().zip(again.triangles()) {
        assert_eq!(a.vertices, b.vertices);
        assert_eq!(a.normals, b.normals);
        assert_eq!(a.texcoords, b.texcoords);
    }
}

#[test]
fn test_flat_output_references_facet_normals() {
    let dir = TempDir::new().unwrap();
    let mut mesh = io::load(write_fixture(dir.path())).unwrap();
    normals::facet_normals(&mut mesh);

    let path = dir.path().join("flat.obj");
    let written = io::save(&mesh, &path, RenderMode::none().with_flat().with_color()).unwrap();
    assert_eq!(written, RenderMode::none().with_flat().with_color());

    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().filter(|l| l.starts_with("vn ")).count(), 12);
    assert!(text.contains("\nf 1//1 4//1 3//1\n"), "{}", text);
    // colour mode carries no material statements
    assert!(!text.contains("mtllib"));
    assert!(!text.contains("usemtl"));

    let again = io::load(&path).unwrap();
    assert_eq!(again.num_normals(), 12);
    assert_eq!(*again.normal(again.triangles()[0].normals[0]), Vector3::new(0.0, 0.0, -1.0));
}

#[test]
fn test_unsupported_output_is_dropped() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plain.obj");
    fs::write(&path, "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
    let mesh = io::load(&path).unwrap();

    let out = dir.path().join("out.obj");
    let written = io::save(&mesh, &out, RenderMode::all()).unwrap();
    assert_eq!(written, RenderMode::none());

    let text = fs::read_to_string(&out).unwrap();
    assert!(text.contains("\nf 1 2 3\n"));
    assert!(!text.contains("vn "));
}

#[test]
fn test_weld_nearly_coincident_vertices() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("split.obj");
    fs::write(
        &path,
        "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0.00005 0 0
v 1 1 0.00005
v 0 1 0
f 1 2 3
f 4 5 6
",
    )
    .unwrap();
    let mut mesh = io::load(&path).unwrap();

    assert_eq!(weld::weld(&mut mesh, 1e-4).unwrap(), 2);
    assert_eq!(mesh.num_vertices(), 4);
    assert_eq!(mesh.triangles()[1].vertices[0], mesh.triangles()[0].vertices[0]);
    assert_eq!(mesh.triangles()[1].vertices[1], mesh.triangles()[0].vertices[2]);
    assert!(mesh.is_valid());
}

#[test]
fn test_malformed_file_reports_line() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.obj");
    fs::write(&path, "v 0 0 0\nv 1 0 0\nv 0 1 zero\n").unwrap();

    match io::load(&path).unwrap_err() {
        MeshError::Malformed { line, .. } => assert_eq!(line, 3),
        other => panic!("unexpected error: {:?}", other),
    }
}
