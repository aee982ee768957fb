use glam::{Mat4, Vec3};
use lib3ds::{
    node::NO_PARENT, Camera, Face, File, Key, KeyValue, Light, Material, Mesh, Node, NodeData,
    NodeType,
};
use std::io::Cursor;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn cube(name: &str) -> Mesh {
    let mut mesh = Mesh::new(name);
    mesh.vertices = vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(10.0, 0.0, 0.0),
        Vec3::new(10.0, 10.0, 0.0),
        Vec3::new(0.0, 10.0, 0.0),
        Vec3::new(0.0, 0.0, 10.0),
        Vec3::new(10.0, 0.0, 10.0),
        Vec3::new(10.0, 10.0, 10.0),
        Vec3::new(0.0, 10.0, 10.0),
    ];
    let faces = [
        [0, 2, 1],
        [0, 3, 2],
        [4, 5, 6],
        [4, 6, 7],
        [0, 1, 5],
        [0, 5, 4],
        [1, 2, 6],
        [1, 6, 5],
        [2, 3, 7],
        [2, 7, 6],
        [3, 0, 4],
        [3, 4, 7],
    ];
    mesh.faces = faces
        .iter()
        .enumerate()
        .map(|(i, f)| Face {
            material: if i < 6 { 0 } else { -1 },
            smoothing_group: 1 << (i / 2),
            ..Face::new(f[0], f[1], f[2])
        })
        .collect();
    mesh
}

/// A cube with one material, a camera flying around it and an omni light.
fn cube_with_camera_path() -> File {
    let mut file = File::new();
    file.name = "CUBE".to_string();
    file.frames = 30;
    file.segment_to = 30;
    file.ambient = Vec3::new(0.5, 0.5, 0.5);

    let mut red = Material::new("red");
    red.diffuse = Vec3::new(1.0, 0.0, 0.0);
    file.insert_material(red, None);

    file.insert_mesh(cube("cube"), None);

    let mut camera = Camera::new("camera");
    camera.position = Vec3::new(0.0, -50.0, 5.0);
    camera.target = Vec3::new(5.0, 5.0, 5.0);
    camera.fov = 48.0;
    file.insert_camera(camera, None);

    let mut light = Light::new("sun");
    light.position = Vec3::new(20.0, 20.0, 40.0);
    light.color = Vec3::ONE;
    file.insert_light(light, None);

    let mut cube_node = Node::new_object("cube");
    cube_node.node_id = 0;
    file.insert_node(cube_node);

    let mut camera_node = Node::new("camera", NodeType::Camera);
    camera_node.node_id = 1;
    if let NodeData::Camera(n) = &mut camera_node.data {
        let path = [
            (0, Vec3::new(0.0, -50.0, 5.0)),
            (10, Vec3::new(50.0, 0.0, 5.0)),
            (20, Vec3::new(0.0, 50.0, 5.0)),
            (30, Vec3::new(-50.0, 0.0, 5.0)),
        ];
        for (frame, position) in path.iter() {
            n.pos_track
                .keys
                .push(Key::new(*frame, KeyValue::Vector(*position)));
        }
        n.pos_track.setup();
        n.fov_track.keys.push(Key::new(0, KeyValue::Float(48.0)));
        n.fov_track.setup();
    }
    file.insert_node(camera_node);

    let mut target_node = Node::new("camera", NodeType::Target);
    target_node.node_id = 2;
    if let NodeData::Target(n) = &mut target_node.data {
        n.pos_track
            .keys
            .push(Key::new(0, KeyValue::Vector(Vec3::new(5.0, 5.0, 5.0))));
        n.pos_track.setup();
    }
    file.insert_node(target_node);

    file
}

#[test]
fn test_round_trip_in_memory() {
    init_logger();
    let file = cube_with_camera_path();

    let mut out = Cursor::new(Vec::new());
    file.to_writer(&mut out).unwrap();
    let data = out.into_inner();
    let read = File::from_data(&data[..]).unwrap();

    assert_eq!(read, file);
    assert_eq!(read.to_bytes().unwrap(), data);
}

#[test]
fn test_round_trip_through_disk() {
    init_logger();
    let file = cube_with_camera_path();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cube.3ds");
    file.save(&path).unwrap();
    let read = File::load(&path).unwrap();

    assert_eq!(read, file);
}

#[test]
fn test_camera_follows_its_path() {
    init_logger();
    let mut file = File::from_data(&cube_with_camera_path().to_bytes().unwrap()[..]).unwrap();

    file.eval(10.0);
    let camera = file.node_by_name("camera", NodeType::Camera).unwrap();
    assert!((camera.matrix.w_axis.truncate() - Vec3::new(50.0, 0.0, 5.0)).length() < 1e-4);
    match &camera.data {
        NodeData::Camera(n) => assert_eq!(n.fov, 48.0),
        other => panic!("expected a camera node, got {:?}", other),
    }

    // past the last key the camera stays put
    file.eval(100.0);
    let camera = file.node_by_name("camera", NodeType::Camera).unwrap();
    assert!((camera.matrix.w_axis.truncate() - Vec3::new(-50.0, 0.0, 5.0)).length() < 1e-4);
}

#[test]
fn test_negative_determinant_cube() {
    init_logger();
    let mut file = File::new();
    let mut mesh = cube("mirror");
    mesh.matrix = Mat4::from_scale(Vec3::new(-1.0, 1.0, 1.0));
    file.insert_mesh(mesh.clone(), None);

    let read = File::from_data(&file.to_bytes().unwrap()[..]).unwrap();
    let read_mesh = read.mesh_by_name("mirror").unwrap();
    assert_eq!(read_mesh.matrix, mesh.matrix);
    assert_eq!(read_mesh.vertices, mesh.vertices);
}

#[test]
fn test_nodes_survive_out_of_order() {
    init_logger();
    let mut file = File::new();
    let mut child = Node::new_object("wheel");
    child.node_id = 0;
    child.parent_id = 1;
    let mut parent = Node::new_object("car");
    parent.node_id = 1;
    parent.parent_id = NO_PARENT;
    file.insert_node(child);
    file.insert_node(parent);

    let read = File::from_data(&file.to_bytes().unwrap()[..]).unwrap();
    assert_eq!(read.nodes.len(), 1);
    assert_eq!(read.nodes[0].name, "car");
    assert_eq!(read.nodes[0].children[0].name, "wheel");
}

#[test]
fn test_truncated_file_is_an_error() {
    init_logger();
    let data = cube_with_camera_path().to_bytes().unwrap();
    assert!(File::from_data(&data[..data.len() / 2]).is_err());
}
