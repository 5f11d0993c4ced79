use std::fs;

use autoframe::error::LoadError;
use autoframe::gfx::framing::{compute_mesh_bounding_box, frame, FramingConfig};
use autoframe::gfx::scene::Pivot;
use autoframe::loader::{ModelLoader, ObjLoader};

const TABLE_OBJ: &str = "\
mtllib table.mtl
o top
usemtl wood
v -10 9 -5
v 10 9 -5
v 10 10 -5
v -10 10 -5
v -10 9 5
v 10 9 5
v 10 10 5
v -10 10 5
f 1 2 3 4
f 5 6 7 8
f 1 2 6 5
f 4 3 7 8
o leg
usemtl steel
v 0 0 0
v 1 0 0
v 1 9 0
v 0 9 0
f 9 10 11 12
";

const TABLE_MTL: &str = "\
newmtl wood
Kd 0.6 0.4 0.2
Ns 64
newmtl steel
Kd 0.5 0.5 0.5
d 0.5
";

#[test]
fn loads_objects_and_materials_from_disk() {
    let site = tempfile::tempdir().unwrap();
    let models = site.path().join("models");
    fs::create_dir_all(&models).unwrap();
    fs::write(models.join("table.obj"), TABLE_OBJ).unwrap();
    fs::write(models.join("table.mtl"), TABLE_MTL).unwrap();

    let loader = ObjLoader::new(site.path());
    let mut root = pollster::block_on(loader.load("models/table.obj")).unwrap();

    assert_eq!(root.name, "table.obj");
    assert_eq!(root.mesh_count(), 2);

    let top = root.children()[0].as_mesh().unwrap();
    assert_eq!(top.material.name, "wood");
    assert_eq!(top.material.base_color, [0.6, 0.4, 0.2, 1.0]);
    assert_eq!(top.material.roughness, 0.5);

    let leg = root.children()[1].as_mesh().unwrap();
    assert_eq!(leg.material.base_color[3], 0.5);

    let bounds = compute_mesh_bounding_box(&mut root).unwrap();
    assert_eq!(bounds.min.x, -10.0);
    assert_eq!(bounds.max.y, 10.0);
    assert_eq!(bounds.size().z, 10.0);
}

#[test]
fn missing_material_library_is_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("table.obj");
    fs::write(&path, TABLE_OBJ).unwrap();

    let root = ObjLoader::load_path(&path).unwrap();
    assert_eq!(root.mesh_count(), 2);
    assert_eq!(root.children()[0].as_mesh().unwrap().material.name, "Default");
}

#[test]
fn missing_file_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let loader = ObjLoader::new(dir.path());

    let err = pollster::block_on(loader.load("models/nothing.obj")).unwrap_err();
    assert!(matches!(err, LoadError::Obj(_)));
}

#[test]
fn loaded_model_frames_to_target_size() {
    let root = ObjLoader::parse("table.obj", TABLE_OBJ.as_bytes()).unwrap();
    let mut pivot = Pivot::wrap(root);

    let report = frame(pivot.node_mut(), &FramingConfig::default());

    // 20 units wide, scaled to 100
    assert!((report.applied_scale - 5.0).abs() < 1e-12);
    assert!((report.final_bounds.max_dimension() - 100.0).abs() < 1e-9);
    // The tabletop is the largest part and ends up centered
    let center = report.final_bounds.center();
    assert!(center.x.abs() < 1e-9);
    assert!(center.z.abs() < 1e-9);
}
