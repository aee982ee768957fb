use crate::{
    atmosphere::Atmosphere,
    background::Background,
    camera::Camera,
    light::Light,
    material::Material,
    math::{extend_bounds, EPSILON},
    mesh::Mesh,
    node::{Node, NodeData, NodeType, NO_PARENT},
    parsers::{
        chunk::{ChunkReader, ChunkWriter},
        ids, primitive, ChunkParseError,
    },
    shadow::Shadow,
    viewport::Viewport,
};
use glam::{Mat4, Vec3};
use log::debug;
use std::{
    fs,
    io::{BufWriter, Cursor, Read, Seek, Write},
    mem,
    path::Path,
};

/// Flags of a named object, stored as switch chunks next to the mesh, camera or light.
pub mod object_flags {
    pub const HIDDEN: u32 = 0x01;
    pub const VIS_LOFTER: u32 = 0x02;
    pub const DOESNT_CAST: u32 = 0x04;
    pub const MATTE: u32 = 0x08;
    pub const DONT_RCVSHADOW: u32 = 0x10;
    pub const FAST: u32 = 0x20;
    pub const FROZEN: u32 = 0x40;
}

const OBJECT_FLAG_CHUNKS: [(u32, u16); 7] = [
    (object_flags::HIDDEN, ids::OBJ_HIDDEN),
    (object_flags::VIS_LOFTER, ids::OBJ_VIS_LOFTER),
    (object_flags::DOESNT_CAST, ids::OBJ_DOESNT_CAST),
    (object_flags::MATTE, ids::OBJ_MATTE),
    (object_flags::DONT_RCVSHADOW, ids::OBJ_DONT_RCVSHADOW),
    (object_flags::FAST, ids::OBJ_FAST),
    (object_flags::FROZEN, ids::OBJ_FROZEN),
];

/// The keyframer name is a 12 character field.
const KEYF_NAME_LEN: usize = 13;

/// A whole .3ds scene: the editor objects (`materials`, `cameras`, `lights`, `meshes`), the
/// global settings and the keyframer scene graph rooted at `nodes`.
#[derive(Debug, Clone, PartialEq)]
pub struct File {
    pub mesh_version: u32,
    pub keyf_revision: u16,
    /// Keyframer name, at most 12 characters.
    pub name: String,
    pub master_scale: f32,
    pub construction_plane: Vec3,
    pub ambient: Vec3,
    pub shadow: Shadow,
    pub background: Background,
    pub atmosphere: Atmosphere,
    pub viewport: Viewport,
    pub viewport_keyf: Viewport,
    pub frames: i32,
    pub segment_from: i32,
    pub segment_to: i32,
    pub current_frame: i32,
    pub materials: Vec<Material>,
    pub cameras: Vec<Camera>,
    pub lights: Vec<Light>,
    pub meshes: Vec<Mesh>,
    /// Top-level nodes, sorted by name.
    pub nodes: Vec<Node>,
}

impl Default for File {
    fn default() -> Self {
        File::new()
    }
}

macro_rules! named_collection (
    ($field:ident, $ty:ty, $insert:ident, $remove:ident, $index:ident, $by_name:ident, $by_name_mut:ident) => {
        impl File {
            /// Inserts at `index`, or appends with `None`. An element with the same name is
            /// replaced in place and returned instead.
            pub fn $insert(&mut self, item: $ty, index: Option<usize>) -> Option<$ty> {
                if let Some(i) = self.$index(&item.name) {
                    return Some(mem::replace(&mut self.$field[i], item));
                }
                let len = self.$field.len();
                let i = index.map_or(len, |i| i.min(len));
                self.$field.insert(i, item);
                None
            }

            pub fn $remove(&mut self, index: usize) -> Option<$ty> {
                if index < self.$field.len() {
                    Some(self.$field.remove(index))
                } else {
                    None
                }
            }

            pub fn $index(&self, name: &str) -> Option<usize> {
                self.$field.iter().position(|item| item.name == name)
            }

            pub fn $by_name(&self, name: &str) -> Option<&$ty> {
                self.$field.iter().find(|item| item.name == name)
            }

            pub fn $by_name_mut(&mut self, name: &str) -> Option<&mut $ty> {
                self.$field.iter_mut().find(|item| item.name == name)
            }
        }
    }
);

named_collection!(
    materials,
    Material,
    insert_material,
    remove_material,
    material_index,
    material_by_name,
    material_by_name_mut
);
named_collection!(
    cameras,
    Camera,
    insert_camera,
    remove_camera,
    camera_index,
    camera_by_name,
    camera_by_name_mut
);
named_collection!(
    lights,
    Light,
    insert_light,
    remove_light,
    light_index,
    light_by_name,
    light_by_name_mut
);
named_collection!(
    meshes,
    Mesh,
    insert_mesh,
    remove_mesh,
    mesh_index,
    mesh_by_name,
    mesh_by_name_mut
);

/// Inserts `node` among `siblings` before the first sibling whose name sorts after it.
fn insert_sorted(siblings: &mut Vec<Node>, node: Node) {
    let i = siblings
        .iter()
        .position(|n| n.name > node.name)
        .unwrap_or(siblings.len());
    siblings.insert(i, node);
}

/// Inserts `node` under the first node with id `parent_id`, depth-first. Gives the node back
/// when there is no such node.
fn insert_under(nodes: &mut Vec<Node>, parent_id: u16, mut node: Node) -> Option<Node> {
    for n in nodes.iter_mut() {
        if n.node_id == parent_id {
            insert_sorted(&mut n.children, node);
            return None;
        }
        match insert_under(&mut n.children, parent_id, node) {
            None => return None,
            Some(back) => node = back,
        }
    }
    Some(node)
}

fn take_node(nodes: &mut Vec<Node>, name: &str, kind: NodeType) -> Option<Node> {
    for i in 0..nodes.len() {
        if nodes[i].node_type() == kind && nodes[i].name == name {
            return Some(nodes.remove(i));
        }
        if let Some(found) = take_node(&mut nodes[i].children, name, kind) {
            return Some(found);
        }
    }
    None
}

fn write_object_flags<W: Write + Seek>(
    writer: &mut ChunkWriter<W>,
    flags: u32,
) -> Result<(), ChunkParseError> {
    for (flag, id) in OBJECT_FLAG_CHUNKS.iter() {
        if flags & flag != 0 {
            writer.write_switch(*id)?;
        }
    }
    Ok(())
}

fn is_zero(v: Vec3) -> bool {
    v.to_array().iter().all(|c| c.abs() <= EPSILON)
}

impl File {
    pub fn new() -> File {
        File {
            mesh_version: 3,
            keyf_revision: 5,
            name: "LIB3DS".to_string(),
            master_scale: 1.0,
            construction_plane: Vec3::ZERO,
            ambient: Vec3::ZERO,
            shadow: Shadow::default(),
            background: Background::default(),
            atmosphere: Atmosphere::default(),
            viewport: Viewport::default(),
            viewport_keyf: Viewport::default(),
            frames: 100,
            segment_from: 0,
            segment_to: 100,
            current_frame: 0,
            materials: Vec::new(),
            cameras: Vec::new(),
            lights: Vec::new(),
            meshes: Vec::new(),
            nodes: Vec::new(),
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<File, ChunkParseError> {
        let data = fs::read(path)?;
        File::from_data(Cursor::new(data))
    }

    /// Same as `from_path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<File, ChunkParseError> {
        File::from_path(path)
    }

    /// Reads a whole .3ds file. The root chunk is either one of the magic chunks or a bare
    /// `MDATA` chunk.
    pub fn from_data<R: Read>(mut data: R) -> Result<File, ChunkParseError> {
        let mut buffer = Vec::new();
        data.read_to_end(&mut buffer)?;

        let mut reader = ChunkReader::new(&buffer);
        let mut file = File::new();
        let mut chunk = reader.begin_read(None)?;

        match chunk.id {
            ids::MDATA => {
                reader.reset_to_header();
                file.read_mdata(&mut reader)?;
            }
            ids::M3DMAGIC | ids::MLIBMAGIC | ids::CMAGIC => {
                while let Some((id, _)) = reader.next_child(&mut chunk)? {
                    match id {
                        ids::M3D_VERSION => file.mesh_version = reader.read::<u32>()?,
                        ids::MDATA => {
                            reader.reset_to_header();
                            file.read_mdata(&mut reader)?;
                        }
                        ids::KFDATA => {
                            reader.reset_to_header();
                            file.read_kfdata(&mut reader)?;
                        }
                        _ => reader.unknown(id),
                    }
                }
            }
            id => return Err(ChunkParseError::UnknownRootChunk(id)),
        }

        reader.end_read(&chunk);
        Ok(file)
    }

    fn read_mdata(&mut self, reader: &mut ChunkReader) -> Result<(), ChunkParseError> {
        let mut chunk = reader.begin_read(Some(ids::MDATA))?;

        while let Some((id, _)) = reader.next_child(&mut chunk)? {
            match id {
                ids::MESH_VERSION => self.mesh_version = reader.read::<u32>()?,
                ids::MASTER_SCALE => self.master_scale = reader.read::<f32>()?,
                ids::O_CONSTS => self.construction_plane = reader.read_vector()?,
                ids::AMBIENT_LIGHT => {
                    reader.reset_to_header();
                    self.ambient = reader.read_color_block()?;
                }
                ids::SHADOW_MAP_SIZE
                | ids::LO_SHADOW_BIAS
                | ids::HI_SHADOW_BIAS
                | ids::SHADOW_SAMPLES
                | ids::SHADOW_RANGE
                | ids::SHADOW_FILTER
                | ids::RAY_BIAS => {
                    reader.reset_to_header();
                    self.shadow.read(reader)?;
                }
                ids::VIEWPORT_LAYOUT | ids::DEFAULT_VIEW => {
                    reader.reset_to_header();
                    self.viewport.read(reader)?;
                }
                ids::BIT_MAP
                | ids::SOLID_BGND
                | ids::V_GRADIENT
                | ids::USE_BIT_MAP
                | ids::USE_SOLID_BGND
                | ids::USE_V_GRADIENT => {
                    reader.reset_to_header();
                    self.background.read(reader)?;
                }
                ids::FOG
                | ids::LAYER_FOG
                | ids::DISTANCE_CUE
                | ids::USE_FOG
                | ids::USE_LAYER_FOG
                | ids::USE_DISTANCE_CUE => {
                    reader.reset_to_header();
                    self.atmosphere.read(reader)?;
                }
                ids::MAT_ENTRY => {
                    reader.reset_to_header();
                    let material = Material::read(reader)?;
                    self.insert_material(material, None);
                }
                ids::NAMED_OBJECT => {
                    reader.reset_to_header();
                    self.read_named_object(reader)?;
                }
                _ => reader.unknown(id),
            }
        }

        reader.end_read(&chunk);
        Ok(())
    }

    fn read_named_object(&mut self, reader: &mut ChunkReader) -> Result<(), ChunkParseError> {
        let mut chunk = reader.begin_read(Some(ids::NAMED_OBJECT))?;
        let name = reader.read_name()?;
        reader.read_tell(&mut chunk);

        let mut mesh = None;
        let mut camera = None;
        let mut light = None;
        let mut flags = 0;

        while let Some((id, _)) = reader.next_child(&mut chunk)? {
            match id {
                ids::N_TRI_OBJECT => {
                    reader.reset_to_header();
                    mesh = Some(Mesh::read(reader, &name, &self.materials)?);
                }
                ids::N_CAMERA => {
                    reader.reset_to_header();
                    camera = Some(Camera::read(reader, &name)?);
                }
                ids::N_DIRECT_LIGHT => {
                    reader.reset_to_header();
                    light = Some(Light::read(reader, &name)?);
                }
                _ => match OBJECT_FLAG_CHUNKS.iter().find(|(_, chunk_id)| *chunk_id == id) {
                    Some((flag, _)) => flags |= flag,
                    None => reader.unknown(id),
                },
            }
        }
        reader.end_read(&chunk);

        if let Some(mut mesh) = mesh {
            mesh.object_flags = flags;
            self.insert_mesh(mesh, None);
        }
        if let Some(mut camera) = camera {
            camera.object_flags = flags;
            self.insert_camera(camera, None);
        }
        if let Some(mut light) = light {
            light.object_flags = flags;
            self.insert_light(light, None);
        }
        Ok(())
    }

    fn read_kfdata(&mut self, reader: &mut ChunkReader) -> Result<(), ChunkParseError> {
        let mut chunk = reader.begin_read(Some(ids::KFDATA))?;
        let mut node_number = 0u16;

        while let Some((id, _)) = reader.next_child(&mut chunk)? {
            match id {
                ids::KFHDR => {
                    self.keyf_revision = reader.read::<u16>()?;
                    self.name = reader.read_string(KEYF_NAME_LEN)?;
                    self.frames = reader.read::<i32>()?;
                }
                ids::KFSEG => {
                    self.segment_from = reader.read::<i32>()?;
                    self.segment_to = reader.read::<i32>()?;
                }
                ids::KFCURTIME => self.current_frame = reader.read::<i32>()?,
                ids::VIEWPORT_LAYOUT | ids::DEFAULT_VIEW => {
                    reader.reset_to_header();
                    self.viewport_keyf.read(reader)?;
                }
                ids::AMBIENT_NODE_TAG
                | ids::OBJECT_NODE_TAG
                | ids::CAMERA_NODE_TAG
                | ids::TARGET_NODE_TAG
                | ids::LIGHT_NODE_TAG
                | ids::SPOTLIGHT_NODE_TAG
                | ids::L_TARGET_NODE_TAG => {
                    reader.reset_to_header();
                    let node = Node::read(reader, node_number)?;
                    node_number = node_number.wrapping_add(1);
                    self.insert_node(node);
                }
                _ => reader.unknown(id),
            }
        }

        reader.end_read(&chunk);
        Ok(())
    }

    /// Writes the file to `out`, starting at its current position.
    pub fn to_writer<W: Write + Seek>(&self, out: W) -> Result<(), ChunkParseError> {
        let mut writer = ChunkWriter::new(out);
        let mark = writer.begin_write(ids::M3DMAGIC)?;

        writer.write_header(ids::M3D_VERSION, 10)?;
        writer.write(self.mesh_version)?;

        self.write_mdata(&mut writer)?;
        self.write_kfdata(&mut writer)?;

        writer.end_write(mark)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, ChunkParseError> {
        let mut out = Cursor::new(Vec::new());
        self.to_writer(&mut out)?;
        Ok(out.into_inner())
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ChunkParseError> {
        let mut out = BufWriter::new(fs::File::create(path)?);
        self.to_writer(&mut out)?;
        out.flush()?;
        Ok(())
    }

    fn write_mdata<W: Write + Seek>(
        &self,
        writer: &mut ChunkWriter<W>,
    ) -> Result<(), ChunkParseError> {
        let mark = writer.begin_write(ids::MDATA)?;

        writer.write_header(ids::MESH_VERSION, 10)?;
        writer.write(self.mesh_version)?;
        writer.write_header(ids::MASTER_SCALE, 10)?;
        writer.write(self.master_scale)?;

        if !is_zero(self.construction_plane) {
            writer.write_header(ids::O_CONSTS, 18)?;
            writer.write_vector(self.construction_plane)?;
        }
        if !is_zero(self.ambient) {
            writer.write_header(ids::AMBIENT_LIGHT, 42)?;
            writer.write_float_colors(self.ambient)?;
        }

        self.background.write(writer)?;
        self.atmosphere.write(writer)?;
        self.shadow.write(writer)?;
        self.viewport.write(writer)?;

        for material in &self.materials {
            material.write(writer)?;
        }

        for camera in &self.cameras {
            let object = writer.begin_write(ids::NAMED_OBJECT)?;
            writer.write_name(&camera.name)?;
            camera.write(writer)?;
            write_object_flags(writer, camera.object_flags)?;
            writer.end_write(object)?;
        }
        for light in &self.lights {
            let object = writer.begin_write(ids::NAMED_OBJECT)?;
            writer.write_name(&light.name)?;
            light.write(writer)?;
            write_object_flags(writer, light.object_flags)?;
            writer.end_write(object)?;
        }
        for mesh in &self.meshes {
            let object = writer.begin_write(ids::NAMED_OBJECT)?;
            writer.write_name(&mesh.name)?;
            mesh.write(writer, &self.materials)?;
            write_object_flags(writer, mesh.object_flags)?;
            writer.end_write(object)?;
        }

        writer.end_write(mark)
    }

    fn write_kfdata<W: Write + Seek>(
        &self,
        writer: &mut ChunkWriter<W>,
    ) -> Result<(), ChunkParseError> {
        if self.nodes.is_empty() {
            return Ok(());
        }

        let mark = writer.begin_write(ids::KFDATA)?;

        let hdr = writer.begin_write(ids::KFHDR)?;
        writer.write(self.keyf_revision)?;
        if primitive::string_len(&self.name) > KEYF_NAME_LEN {
            return Err(ChunkParseError::StringTooLong {
                offset: writer.tell()?,
                max: KEYF_NAME_LEN,
            });
        }
        writer.write_string(&self.name)?;
        writer.write(self.frames)?;
        writer.end_write(hdr)?;

        writer.write_header(ids::KFSEG, 14)?;
        writer.write(self.segment_from)?;
        writer.write(self.segment_to)?;
        writer.write_header(ids::KFCURTIME, 10)?;
        writer.write(self.current_frame)?;

        self.viewport_keyf.write(writer)?;
        self.write_nodes(writer, &self.nodes)?;

        writer.end_write(mark)
    }

    /// Writes `nodes` depth-first, every node followed by its children.
    fn write_nodes<W: Write + Seek>(
        &self,
        writer: &mut ChunkWriter<W>,
        nodes: &[Node],
    ) -> Result<(), ChunkParseError> {
        for node in nodes {
            let spotlight = node.node_type() == NodeType::Light
                && self.node_by_name(&node.name, NodeType::Spot).is_some();
            node.write(writer, spotlight)?;
            self.write_nodes(writer, &node.children)?;
        }
        Ok(())
    }

    /// Evaluates every node at frame `t`.
    pub fn eval(&mut self, t: f32) {
        for node in self.nodes.iter_mut() {
            node.eval(t, &Mat4::IDENTITY);
        }
    }

    pub fn node_by_name(&self, name: &str, kind: NodeType) -> Option<&Node> {
        for node in &self.nodes {
            if node.node_type() == kind && node.name == name {
                return Some(node);
            }
            if let Some(found) = node.node_by_name(name, kind) {
                return Some(found);
            }
        }
        None
    }

    pub fn node_by_id(&self, node_id: u16) -> Option<&Node> {
        for node in &self.nodes {
            if node.node_id == node_id {
                return Some(node);
            }
            if let Some(found) = node.node_by_id(node_id) {
                return Some(found);
            }
        }
        None
    }

    /// Inserts a node into the scene graph.
    ///
    /// The node goes under the node whose `node_id` equals its `parent_id`, or at the top level
    /// when there is none, before the first sibling whose name sorts after its own. Top-level
    /// nodes that name the new node as their parent are then moved under it, so children may be
    /// inserted before their parent.
    pub fn insert_node(&mut self, node: Node) {
        let node_id = node.node_id;
        debug!(
            "insert node \"{}\" id={} parent={}",
            node.name, node.node_id, node.parent_id
        );

        let node = if node.parent_id != NO_PARENT {
            insert_under(&mut self.nodes, node.parent_id, node)
        } else {
            Some(node)
        };
        if let Some(node) = node {
            insert_sorted(&mut self.nodes, node);
        }

        if node_id != NO_PARENT {
            let roots = mem::take(&mut self.nodes);
            let (orphans, roots): (Vec<Node>, Vec<Node>) = roots
                .into_iter()
                .partition(|n| n.parent_id == node_id && n.node_id != node_id);
            self.nodes = roots;
            for orphan in orphans {
                self.insert_node(orphan);
            }
        }
    }

    /// Removes the first node of type `kind` named `name`, together with its children.
    pub fn remove_node(&mut self, name: &str, kind: NodeType) -> Option<Node> {
        take_node(&mut self.nodes, name, kind)
    }

    /// Bounding box of the editor objects, as `(min, max)`. Nothing included gives an inverted
    /// box.
    pub fn bounding_box_of_objects(
        &self,
        include_meshes: bool,
        include_cameras: bool,
        include_lights: bool,
    ) -> (Vec3, Vec3) {
        let mut bmin = Vec3::splat(f32::MAX);
        let mut bmax = Vec3::splat(-f32::MAX);

        if include_meshes {
            for mesh in &self.meshes {
                let (lmin, lmax) = mesh.bounding_box();
                bmin = bmin.min(lmin);
                bmax = bmax.max(lmax);
            }
        }
        if include_cameras {
            for camera in &self.cameras {
                extend_bounds(&mut bmin, &mut bmax, camera.position);
                extend_bounds(&mut bmin, &mut bmax, camera.target);
            }
        }
        if include_lights {
            for light in &self.lights {
                extend_bounds(&mut bmin, &mut bmax, light.position);
                if light.spot_light {
                    extend_bounds(&mut bmin, &mut bmax, light.target);
                }
            }
        }
        (bmin, bmax)
    }

    /// Bounding box of the scene graph at the last `eval`, as `(min, max)`. Object nodes
    /// contribute the vertices of their mesh, found by instance name first and node name
    /// second; camera and light nodes contribute their position.
    pub fn bounding_box_of_nodes(
        &self,
        include_meshes: bool,
        include_cameras: bool,
        include_lights: bool,
    ) -> (Vec3, Vec3) {
        let mut bmin = Vec3::splat(f32::MAX);
        let mut bmax = Vec3::splat(-f32::MAX);

        let mut stack: Vec<&Node> = self.nodes.iter().rev().collect();
        while let Some(node) = stack.pop() {
            match (&node.data, node.node_type()) {
                (NodeData::Object(n), _) if include_meshes => {
                    let mesh = self
                        .mesh_by_name(&n.instance_name)
                        .or_else(|| self.mesh_by_name(&node.name));
                    if let Some(mesh) = mesh {
                        let m = node.matrix
                            * Mat4::from_translation(-n.pivot)
                            * mesh.matrix.inverse();
                        for v in &mesh.vertices {
                            extend_bounds(&mut bmin, &mut bmax, m.transform_point3(*v));
                        }
                    }
                }
                (_, NodeType::Camera) | (_, NodeType::Target) if include_cameras => {
                    extend_bounds(&mut bmin, &mut bmax, node.matrix.transform_point3(Vec3::ZERO));
                }
                (_, NodeType::Light) | (_, NodeType::Spot) if include_lights => {
                    extend_bounds(&mut bmin, &mut bmax, node.matrix.transform_point3(Vec3::ZERO));
                }
                _ => {}
            }
            stack.extend(node.children.iter().rev());
        }
        (bmin, bmax)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        mesh::Face,
        track::{Key, KeyValue},
    };

    fn named(name: &str, node_id: u16, parent_id: u16) -> Node {
        let mut node = Node::new(name, NodeType::Object);
        node.node_id = node_id;
        node.parent_id = parent_id;
        node
    }

    fn names(nodes: &[Node]) -> Vec<&str> {
        nodes.iter().map(|n| n.name.as_str()).collect()
    }

    #[test]
    fn test_defaults() {
        let file = File::new();
        assert_eq!(file.mesh_version, 3);
        assert_eq!(file.keyf_revision, 5);
        assert_eq!(file.name, "LIB3DS");
        assert_eq!(file.master_scale, 1.0);
        assert_eq!((file.frames, file.segment_from, file.segment_to), (100, 0, 100));
        assert_eq!(file.current_frame, 0);
    }

    #[test]
    fn test_nodes_sorted_by_name() {
        let mut file = File::new();
        for name in &["zeta", "alpha", "mu"] {
            file.insert_node(Node::new(name, NodeType::Object));
        }
        assert_eq!(names(&file.nodes), vec!["alpha", "mu", "zeta"]);
    }

    #[test]
    fn test_child_inserted_before_parent_is_moved() {
        let mut file = File::new();
        file.insert_node(named("wheel", 2, 1));
        file.insert_node(named("axle", 3, 1));
        file.insert_node(named("zcar", 1, NO_PARENT));

        assert_eq!(names(&file.nodes), vec!["zcar"]);
        assert_eq!(names(&file.nodes[0].children), vec!["axle", "wheel"]);

        file.insert_node(named("hub", 4, 2));
        let wheel = file.node_by_id(2).unwrap();
        assert_eq!(names(&wheel.children), vec!["hub"]);
    }

    #[test]
    fn test_dangling_parent_stays_at_top_level() {
        let mut file = File::new();
        file.insert_node(named("orphan", 2, 40));
        file.insert_node(named("root", 1, NO_PARENT));
        assert_eq!(names(&file.nodes), vec!["orphan", "root"]);
        assert_eq!(file.node_by_id(2).unwrap().parent_id, 40);
    }

    #[test]
    fn test_remove_node_takes_children() {
        let mut file = File::new();
        file.insert_node(named("a", 1, NO_PARENT));
        file.insert_node(named("b", 2, 1));
        let removed = file.remove_node("a", NodeType::Object).unwrap();
        assert_eq!(names(&removed.children), vec!["b"]);
        assert!(file.nodes.is_empty());
        assert!(file.remove_node("a", NodeType::Object).is_none());
    }

    #[test]
    fn test_collections_keep_names_unique() {
        let mut file = File::new();
        assert!(file.insert_material(Material::new("red"), None).is_none());
        assert!(file.insert_material(Material::new("blue"), Some(0)).is_none());
        assert_eq!(file.material_index("red"), Some(1));

        let mut red = Material::new("red");
        red.shininess = 0.5;
        let old = file.insert_material(red, Some(0)).unwrap();
        assert_eq!(old.shininess, Material::new("red").shininess);
        assert_eq!(file.materials.len(), 2);
        assert_eq!(file.material_by_name("red").unwrap().shininess, 0.5);

        assert_eq!(file.remove_material(0).unwrap().name, "blue");
        assert!(file.remove_material(5).is_none());
        assert_eq!(file.material_index("red"), Some(0));
    }

    #[test]
    fn test_unknown_root_chunk() {
        let data = [0x34u8, 0x12, 6, 0, 0, 0];
        assert!(matches!(
            File::from_data(&data[..]),
            Err(ChunkParseError::UnknownRootChunk(0x1234))
        ));
    }

    #[test]
    fn test_bare_mdata_root() {
        let mut w = ChunkWriter::new(Cursor::new(Vec::new()));
        let mark = w.begin_write(ids::MDATA).unwrap();
        w.write_header(ids::MASTER_SCALE, 10).unwrap();
        w.write(2.5f32).unwrap();
        w.end_write(mark).unwrap();
        let data = w.into_inner().into_inner();

        let file = File::from_data(&data[..]).unwrap();
        assert_eq!(file.master_scale, 2.5);
    }

    #[test]
    fn test_object_flags_round_trip() {
        let mut file = File::new();
        let mut camera = Camera::new("cam");
        camera.object_flags = object_flags::HIDDEN | object_flags::DONT_RCVSHADOW;
        file.insert_camera(camera, None);

        let read = File::from_data(&file.to_bytes().unwrap()[..]).unwrap();
        assert_eq!(
            read.cameras[0].object_flags,
            object_flags::HIDDEN | object_flags::DONT_RCVSHADOW
        );
    }

    #[test]
    fn test_settings_round_trip() {
        let mut file = File::new();
        file.ambient = Vec3::new(0.1, 0.2, 0.3);
        file.construction_plane = Vec3::new(0.0, 0.0, 1.0);
        file.shadow.map_size = 1024;
        file.background.use_solid = true;
        file.background.solid_color = Vec3::new(0.0, 0.0, 1.0);
        file.atmosphere.use_fog = true;
        file.atmosphere.fog_far_plane = 1000.0;
        file.viewport.default_view.kind = crate::viewport::view_type::TOP;
        file.viewport.default_view.width = 100.0;

        let read = File::from_data(&file.to_bytes().unwrap()[..]).unwrap();
        assert_eq!(read, file);
    }

    #[test]
    fn test_spotlight_node_tag() {
        let mut file = File::new();
        let mut light = named("lamp", 0, NO_PARENT);
        light.data = Node::new("lamp", NodeType::Light).data;
        if let NodeData::Light(n) = &mut light.data {
            n.falloff_track.keys.push(Key::new(0, KeyValue::Float(40.0)));
        }
        let mut target = Node::new("lamp", NodeType::Spot);
        target.node_id = 1;
        file.insert_node(light);
        file.insert_node(target);

        let bytes = file.to_bytes().unwrap();
        let read = File::from_data(&bytes[..]).unwrap();
        assert_eq!(read.nodes, file.nodes);

        file.remove_node("lamp", NodeType::Spot);
        let read = File::from_data(&file.to_bytes().unwrap()[..]).unwrap();
        match &read.node_by_name("lamp", NodeType::Light).unwrap().data {
            NodeData::Light(n) => assert!(n.falloff_track.is_empty()),
            other => panic!("expected a light node, got {:?}", other),
        }
    }

    #[test]
    fn test_keyframer_name_too_long() {
        let mut file = File::new();
        file.name = "ThirteenChars".to_string();
        file.insert_node(Node::new("n", NodeType::Object));
        assert!(matches!(
            file.to_bytes(),
            Err(ChunkParseError::StringTooLong { max: 13, .. })
        ));
    }

    #[test]
    fn test_bounding_boxes() {
        let mut file = File::new();
        let mut mesh = Mesh::new("tri");
        mesh.vertices = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
        ];
        mesh.faces.push(Face::new(0, 1, 2));
        file.insert_mesh(mesh, None);

        let mut light = Light::new("omni");
        light.position = Vec3::new(-5.0, 0.0, 0.0);
        file.insert_light(light, None);

        let (bmin, bmax) = file.bounding_box_of_objects(true, false, true);
        assert_eq!(bmin, Vec3::new(-5.0, 0.0, 0.0));
        assert_eq!(bmax, Vec3::new(1.0, 2.0, 0.0));

        let mut node = Node::new_object("tri");
        if let NodeData::Object(n) = &mut node.data {
            n.pos_track.keys[0].value = KeyValue::Vector(Vec3::new(0.0, 0.0, 3.0));
            n.pos_track.setup();
        }
        file.insert_node(node);
        file.eval(0.0);

        let (bmin, bmax) = file.bounding_box_of_nodes(true, true, true);
        assert_eq!(bmin, Vec3::new(0.0, 0.0, 3.0));
        assert_eq!(bmax, Vec3::new(1.0, 2.0, 3.0));
    }
}
