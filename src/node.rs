//! The keyframer scene graph.
//!
//! Every node places one editor object (or the global ambient colour) in the animated scene and
//! owns the tracks that animate it. Nodes own their children directly, the `parent_id` of a node
//! is only used when it is inserted into a `File` to find the node it belongs under.

use crate::{
    math::{rotation_matrix, EPSILON},
    parsers::{
        chunk::{ChunkReader, ChunkWriter},
        ids, ChunkParseError,
    },
    track::{Key, KeyValue, Track, TrackType},
};
use glam::{Mat4, Quat, Vec3};
use log::debug;
use std::io::{Seek, Write};

/// `parent_id` of a top-level node.
pub const NO_PARENT: u16 = 65535;

pub mod flags1 {
    pub const HIDDEN: u16 = 0x0800;
}

pub mod flags2 {
    pub const SHOW_PATH: u16 = 0x0001;
    pub const SMOOTHING: u16 = 0x0002;
    pub const MOTION_BLUR: u16 = 0x0010;
    pub const MORPH_MATERIALS: u16 = 0x0040;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Ambient,
    Object,
    Camera,
    Target,
    Light,
    /// Target of a spotlight.
    Spot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AmbientNode {
    pub color: Vec3,
    pub color_track: Track,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectNode {
    pub pivot: Vec3,
    /// Name of the instanced mesh when it differs from the node name.
    pub instance_name: String,
    pub bbox_min: Vec3,
    pub bbox_max: Vec3,
    pub morph_smooth: f32,
    pub pos: Vec3,
    pub rot: Quat,
    pub scl: Vec3,
    pub hide: bool,
    pub pos_track: Track,
    pub rot_track: Track,
    pub scl_track: Track,
    pub hide_track: Option<Track>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CameraNode {
    pub pos: Vec3,
    pub fov: f32,
    pub roll: f32,
    pub pos_track: Track,
    pub fov_track: Track,
    pub roll_track: Track,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TargetNode {
    pub pos: Vec3,
    pub pos_track: Track,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LightNode {
    pub pos: Vec3,
    pub color: Vec3,
    pub hotspot: f32,
    pub falloff: f32,
    pub roll: f32,
    pub pos_track: Track,
    pub color_track: Track,
    pub hotspot_track: Track,
    pub falloff_track: Track,
    pub roll_track: Track,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpotNode {
    pub pos: Vec3,
    pub pos_track: Track,
}

/// The animated channels of a node, by node type. The non-track fields hold the values of the
/// last `Node::eval`.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    Ambient(AmbientNode),
    Object(ObjectNode),
    Camera(CameraNode),
    Target(TargetNode),
    Light(LightNode),
    Spot(SpotNode),
}

impl NodeData {
    fn new(kind: NodeType) -> NodeData {
        let vector = || Track::new(TrackType::Vector);
        let float = || Track::new(TrackType::Float);

        match kind {
            NodeType::Ambient => NodeData::Ambient(AmbientNode {
                color: Vec3::ZERO,
                color_track: vector(),
            }),
            NodeType::Object => NodeData::Object(ObjectNode {
                pivot: Vec3::ZERO,
                instance_name: String::new(),
                bbox_min: Vec3::ZERO,
                bbox_max: Vec3::ZERO,
                morph_smooth: 0.0,
                pos: Vec3::ZERO,
                rot: Quat::IDENTITY,
                scl: Vec3::ONE,
                hide: false,
                pos_track: vector(),
                rot_track: Track::new(TrackType::Quat),
                scl_track: vector(),
                hide_track: None,
            }),
            NodeType::Camera => NodeData::Camera(CameraNode {
                pos: Vec3::ZERO,
                fov: 0.0,
                roll: 0.0,
                pos_track: vector(),
                fov_track: float(),
                roll_track: float(),
            }),
            NodeType::Target => NodeData::Target(TargetNode {
                pos: Vec3::ZERO,
                pos_track: vector(),
            }),
            NodeType::Light => NodeData::Light(LightNode {
                pos: Vec3::ZERO,
                color: Vec3::ZERO,
                hotspot: 0.0,
                falloff: 0.0,
                roll: 0.0,
                pos_track: vector(),
                color_track: vector(),
                hotspot_track: float(),
                falloff_track: float(),
                roll_track: float(),
            }),
            NodeType::Spot => NodeData::Spot(SpotNode {
                pos: Vec3::ZERO,
                pos_track: vector(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: String,
    pub node_id: u16,
    pub parent_id: u16,
    pub flags1: u16,
    pub flags2: u16,
    /// World matrix computed by the last `eval`.
    pub matrix: Mat4,
    pub data: NodeData,
    pub children: Vec<Node>,
}

fn write_track<W: Write + Seek>(
    writer: &mut ChunkWriter<W>,
    id: u16,
    track: &Track,
) -> Result<(), ChunkParseError> {
    let mark = writer.begin_write(id)?;
    track.write(writer)?;
    writer.end_write(mark)
}

impl Node {
    /// A node without keys or children. Both `node_id` and `parent_id` are `NO_PARENT`.
    pub fn new(name: &str, kind: NodeType) -> Node {
        Node {
            name: name.to_string(),
            node_id: NO_PARENT,
            parent_id: NO_PARENT,
            flags1: 0,
            flags2: 0,
            matrix: Mat4::IDENTITY,
            data: NodeData::new(kind),
            children: Vec::new(),
        }
    }

    /// An object node placed at the origin: one key each for position, rotation and a unit
    /// scale.
    pub fn new_object(name: &str) -> Node {
        let mut node = Node::new(name, NodeType::Object);
        if let NodeData::Object(n) = &mut node.data {
            n.pos_track.keys.push(Key::new(0, KeyValue::Vector(Vec3::ZERO)));
            n.rot_track.keys.push(Key::new(
                0,
                KeyValue::Quat {
                    axis: Vec3::ZERO,
                    angle: 0.0,
                },
            ));
            n.scl_track.keys.push(Key::new(0, KeyValue::Vector(Vec3::ONE)));
            n.pos_track.setup();
            n.rot_track.setup();
            n.scl_track.setup();
        }
        node
    }

    pub fn node_type(&self) -> NodeType {
        match self.data {
            NodeData::Ambient(_) => NodeType::Ambient,
            NodeData::Object(_) => NodeType::Object,
            NodeData::Camera(_) => NodeType::Camera,
            NodeData::Target(_) => NodeType::Target,
            NodeData::Light(_) => NodeType::Light,
            NodeData::Spot(_) => NodeType::Spot,
        }
    }

    /// Depth-first search of the descendants of this node, the node itself excluded.
    pub fn node_by_name(&self, name: &str, kind: NodeType) -> Option<&Node> {
        for child in &self.children {
            if child.node_type() == kind && child.name == name {
                return Some(child);
            }
            if let Some(found) = child.node_by_name(name, kind) {
                return Some(found);
            }
        }
        None
    }

    pub fn node_by_id(&self, node_id: u16) -> Option<&Node> {
        for child in &self.children {
            if child.node_id == node_id {
                return Some(child);
            }
            if let Some(found) = child.node_by_id(node_id) {
                return Some(found);
            }
        }
        None
    }

    pub fn node_by_id_mut(&mut self, node_id: u16) -> Option<&mut Node> {
        for child in self.children.iter_mut() {
            if child.node_id == node_id {
                return Some(child);
            }
            if let Some(found) = child.node_by_id_mut(node_id) {
                return Some(found);
            }
        }
        None
    }

    /// Evaluates every track at frame `t`, then the world matrix, then the children. `parent` is
    /// the world matrix of the parent node, identity for a top-level node.
    pub fn eval(&mut self, t: f32, parent: &Mat4) {
        let local = match &mut self.data {
            NodeData::Ambient(n) => {
                n.color = n.color_track.eval_vector(t);
                Mat4::IDENTITY
            }
            NodeData::Object(n) => {
                n.pos = n.pos_track.eval_vector(t);
                n.rot = n.rot_track.eval_quat(t);
                n.scl = if n.scl_track.is_empty() {
                    Vec3::ONE
                } else {
                    n.scl_track.eval_vector(t)
                };
                n.hide = n.hide_track.as_ref().map_or(false, |h| h.eval_bool(t));

                Mat4::from_translation(n.pos) * rotation_matrix(n.rot) * Mat4::from_scale(n.scl)
            }
            NodeData::Camera(n) => {
                n.pos = n.pos_track.eval_vector(t);
                n.fov = n.fov_track.eval_float(t);
                n.roll = n.roll_track.eval_float(t);
                Mat4::from_translation(n.pos)
            }
            NodeData::Target(n) => {
                n.pos = n.pos_track.eval_vector(t);
                Mat4::from_translation(n.pos)
            }
            NodeData::Light(n) => {
                n.pos = n.pos_track.eval_vector(t);
                n.color = n.color_track.eval_vector(t);
                n.hotspot = n.hotspot_track.eval_float(t);
                n.falloff = n.falloff_track.eval_float(t);
                n.roll = n.roll_track.eval_float(t);
                Mat4::from_translation(n.pos)
            }
            NodeData::Spot(n) => {
                n.pos = n.pos_track.eval_vector(t);
                Mat4::from_translation(n.pos)
            }
        };

        self.matrix = *parent * local;

        let matrix = self.matrix;
        for child in self.children.iter_mut() {
            child.eval(t, &matrix);
        }
    }

    /// Reads a node chunk, starting at its header. `node_id` is kept when the chunk carries no
    /// `NODE_ID`.
    pub(crate) fn read(reader: &mut ChunkReader, node_id: u16) -> Result<Node, ChunkParseError> {
        let mut chunk = reader.begin_read(None)?;
        let kind = match chunk.id {
            ids::AMBIENT_NODE_TAG => NodeType::Ambient,
            ids::OBJECT_NODE_TAG => NodeType::Object,
            ids::CAMERA_NODE_TAG => NodeType::Camera,
            ids::TARGET_NODE_TAG => NodeType::Target,
            ids::LIGHT_NODE_TAG | ids::SPOTLIGHT_NODE_TAG => NodeType::Light,
            ids::L_TARGET_NODE_TAG => NodeType::Spot,
            found => {
                return Err(ChunkParseError::UnexpectedChunk {
                    expected: ids::OBJECT_NODE_TAG,
                    found,
                    offset: chunk.start,
                })
            }
        };

        let mut node = Node::new("", kind);
        node.node_id = node_id;

        while let Some((id, _)) = reader.next_child(&mut chunk)? {
            match (id, &mut node.data) {
                (ids::NODE_ID, _) => node.node_id = reader.read::<u16>()?,
                (ids::NODE_HDR, _) => {
                    node.name = reader.read_name()?;
                    node.flags1 = reader.read::<u16>()?;
                    node.flags2 = reader.read::<u16>()?;
                    node.parent_id = reader.read::<u16>()?;
                }
                (ids::PIVOT, NodeData::Object(n)) => n.pivot = reader.read_vector()?,
                (ids::INSTANCE_NAME, NodeData::Object(n)) => n.instance_name = reader.read_name()?,
                (ids::BOUNDBOX, NodeData::Object(n)) => {
                    n.bbox_min = reader.read_vector()?;
                    n.bbox_max = reader.read_vector()?;
                }
                (ids::MORPH_SMOOTH, NodeData::Object(n)) => n.morph_smooth = reader.read::<f32>()?,
                (ids::COL_TRACK_TAG, NodeData::Ambient(n)) => n.color_track.read(reader)?,
                (ids::COL_TRACK_TAG, NodeData::Light(n)) => n.color_track.read(reader)?,
                (ids::POS_TRACK_TAG, NodeData::Object(n)) => n.pos_track.read(reader)?,
                (ids::POS_TRACK_TAG, NodeData::Camera(n)) => n.pos_track.read(reader)?,
                (ids::POS_TRACK_TAG, NodeData::Target(n)) => n.pos_track.read(reader)?,
                (ids::POS_TRACK_TAG, NodeData::Light(n)) => n.pos_track.read(reader)?,
                (ids::POS_TRACK_TAG, NodeData::Spot(n)) => n.pos_track.read(reader)?,
                (ids::ROT_TRACK_TAG, NodeData::Object(n)) => n.rot_track.read(reader)?,
                (ids::SCL_TRACK_TAG, NodeData::Object(n)) => n.scl_track.read(reader)?,
                (ids::HIDE_TRACK_TAG, NodeData::Object(n)) => {
                    let mut track = Track::new(TrackType::Bool);
                    track.read(reader)?;
                    n.hide_track = Some(track);
                }
                (ids::FOV_TRACK_TAG, NodeData::Camera(n)) => n.fov_track.read(reader)?,
                (ids::ROLL_TRACK_TAG, NodeData::Camera(n)) => n.roll_track.read(reader)?,
                (ids::ROLL_TRACK_TAG, NodeData::Light(n)) => n.roll_track.read(reader)?,
                (ids::HOT_TRACK_TAG, NodeData::Light(n)) => n.hotspot_track.read(reader)?,
                (ids::FALL_TRACK_TAG, NodeData::Light(n)) => n.falloff_track.read(reader)?,
                _ => reader.unknown(id),
            }
        }

        reader.end_read(&chunk);
        debug!(
            "read {:?} node \"{}\" id={} parent={}",
            kind, node.name, node.node_id, node.parent_id
        );
        Ok(node)
    }

    /// Writes this node, without its children. A light node is stored as a spotlight when
    /// `spotlight` is set, which the file decides from the presence of a same-named spot node.
    pub(crate) fn write<W: Write + Seek>(
        &self,
        writer: &mut ChunkWriter<W>,
        spotlight: bool,
    ) -> Result<(), ChunkParseError> {
        let tag = match self.data {
            NodeData::Ambient(_) => ids::AMBIENT_NODE_TAG,
            NodeData::Object(_) => ids::OBJECT_NODE_TAG,
            NodeData::Camera(_) => ids::CAMERA_NODE_TAG,
            NodeData::Target(_) => ids::TARGET_NODE_TAG,
            NodeData::Light(_) if spotlight => ids::SPOTLIGHT_NODE_TAG,
            NodeData::Light(_) => ids::LIGHT_NODE_TAG,
            NodeData::Spot(_) => ids::L_TARGET_NODE_TAG,
        };
        let mark = writer.begin_write(tag)?;

        writer.write_header(ids::NODE_ID, 8)?;
        writer.write(self.node_id)?;

        let hdr = writer.begin_write(ids::NODE_HDR)?;
        writer.write_name(&self.name)?;
        writer.write(self.flags1)?;
        writer.write(self.flags2)?;
        writer.write(self.parent_id)?;
        writer.end_write(hdr)?;

        match &self.data {
            NodeData::Ambient(n) => write_track(writer, ids::COL_TRACK_TAG, &n.color_track)?,
            NodeData::Object(n) => {
                writer.write_header(ids::PIVOT, 18)?;
                writer.write_vector(n.pivot)?;

                if !n.instance_name.is_empty() {
                    let name = writer.begin_write(ids::INSTANCE_NAME)?;
                    writer.write_name(&n.instance_name)?;
                    writer.end_write(name)?;
                }

                let bbox_set = n
                    .bbox_min
                    .to_array()
                    .iter()
                    .chain(n.bbox_max.to_array().iter())
                    .any(|v| v.abs() > EPSILON);
                if bbox_set {
                    writer.write_header(ids::BOUNDBOX, 30)?;
                    writer.write_vector(n.bbox_min)?;
                    writer.write_vector(n.bbox_max)?;
                }

                write_track(writer, ids::POS_TRACK_TAG, &n.pos_track)?;
                write_track(writer, ids::ROT_TRACK_TAG, &n.rot_track)?;
                write_track(writer, ids::SCL_TRACK_TAG, &n.scl_track)?;
                if let Some(hide) = &n.hide_track {
                    write_track(writer, ids::HIDE_TRACK_TAG, hide)?;
                }
                if n.morph_smooth.abs() > EPSILON {
                    writer.write_header(ids::MORPH_SMOOTH, 10)?;
                    writer.write(n.morph_smooth)?;
                }
            }
            NodeData::Camera(n) => {
                write_track(writer, ids::POS_TRACK_TAG, &n.pos_track)?;
                write_track(writer, ids::FOV_TRACK_TAG, &n.fov_track)?;
                write_track(writer, ids::ROLL_TRACK_TAG, &n.roll_track)?;
            }
            NodeData::Target(n) => write_track(writer, ids::POS_TRACK_TAG, &n.pos_track)?,
            NodeData::Light(n) => {
                write_track(writer, ids::POS_TRACK_TAG, &n.pos_track)?;
                write_track(writer, ids::COL_TRACK_TAG, &n.color_track)?;
                if spotlight {
                    write_track(writer, ids::HOT_TRACK_TAG, &n.hotspot_track)?;
                    write_track(writer, ids::FALL_TRACK_TAG, &n.falloff_track)?;
                    write_track(writer, ids::ROLL_TRACK_TAG, &n.roll_track)?;
                }
            }
            NodeData::Spot(n) => write_track(writer, ids::POS_TRACK_TAG, &n.pos_track)?,
        }

        writer.end_write(mark)
    }
}
