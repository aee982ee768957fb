use lib3ds::{File, NodeData};
use std::env;

/// Prints the objects of a .3ds file and where the scene graph puts them at the current frame
fn main() -> Result<(), lib3ds::ChunkParseError> {
    env_logger::init();

    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "demos/scene.3ds".to_string());
    let mut file = File::from_path(&path)?;
    file.eval(file.current_frame as f32);

    println!("\"{}\" frames {}..{}", file.name, file.segment_from, file.segment_to);

    for material in &file.materials {
        println!("material \"{}\" diffuse {:?}", material.name, material.diffuse);
    }
    for mesh in &file.meshes {
        println!(
            "mesh \"{}\" {} vertices {} faces",
            mesh.name,
            mesh.vertices.len(),
            mesh.faces.len()
        );
    }
    for camera in &file.cameras {
        println!("camera \"{}\" at {:?} fov {}", camera.name, camera.position, camera.fov);
    }
    for light in &file.lights {
        println!("light \"{}\" at {:?}", light.name, light.position);
    }

    let mut stack: Vec<(usize, &lib3ds::Node)> = file.nodes.iter().rev().map(|n| (0, n)).collect();
    while let Some((depth, node)) = stack.pop() {
        let kind = match &node.data {
            NodeData::Ambient(_) => "ambient",
            NodeData::Object(_) => "object",
            NodeData::Camera(_) => "camera",
            NodeData::Target(_) => "target",
            NodeData::Light(_) => "light",
            NodeData::Spot(_) => "spot",
        };
        println!(
            "{:indent$}{} \"{}\" at {:?}",
            "",
            kind,
            node.name,
            node.matrix.w_axis.truncate(),
            indent = depth * 2
        );
        stack.extend(node.children.iter().rev().map(|n| (depth + 1, n)));
    }

    Ok(())
}
