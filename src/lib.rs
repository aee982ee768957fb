//! # lib3ds - A crate for reading and writing Autodesk 3D Studio (.3ds) files
//!
//! ## Example
//!
//! ```no_run
//! use lib3ds::{File, NodeType};
//!
//! /// Prints every mesh and where its node ends up at the current frame
//! fn main() -> Result<(), lib3ds::ChunkParseError> {
//!     let mut file = File::from_path("scene.3ds")?;
//!     file.eval(file.current_frame as f32);
//!
//!     for mesh in &file.meshes {
//!         let position = file
//!             .node_by_name(&mesh.name, NodeType::Object)
//!             .map(|node| node.matrix.w_axis.truncate());
//!
//!         println!("\"{}\" ({} faces) at {:?}", mesh.name, mesh.faces.len(), position);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## The .3ds file
//!
//! A .3ds file is a tree of chunks. Every chunk starts with a six byte header, a little-endian
//! `u16` id followed by a `u32` size that counts the header itself, the chunk's own fields and
//! all of its children. A reader that doesn't know an id can skip the chunk by its size, which is
//! how files written by newer tools stay readable.
//!
//! The root chunk (`M3DMAGIC`) holds two subtrees:
//!
//! * `MDATA`, the editor data: materials, named objects (meshes, cameras and lights) and the
//!   global settings (ambient light, background, atmosphere, shadows and viewports).
//! * `KFDATA`, the keyframer: a flat list of node chunks, each one naming its parent by id, with
//!   animation tracks for position, rotation, scale, colours and so on.
//!
//! ## This crate
//!
//! [`File`] is the whole scene in memory. [`File::from_data`] and [`File::from_path`] read it,
//! [`File::to_writer`] and [`File::save`] write it back. Keyframer nodes are rebuilt into a tree
//! ([`File::nodes`]) that [`File::eval`] evaluates at a given frame, filling in every node's
//! world matrix and animated properties.
//!
//! Reading is strict about structure and lenient about content. A malformed header or a file that
//! ends inside a chunk fails the whole read with a [`ChunkParseError`], while an unknown chunk is
//! logged through the `log` crate and skipped.
//!
//! ### Limitations
//!
//! Morph tracks of object nodes are logged and skipped on read. Procedural texture data is not
//! supported.

pub mod atmosphere;
pub mod background;
pub mod camera;
pub mod file;
pub mod light;
pub mod material;
pub mod math;
pub mod mesh;
pub mod node;
pub mod parsers;
pub mod shadow;
pub mod track;
pub mod viewport;

pub use atmosphere::Atmosphere;
pub use background::Background;
pub use camera::Camera;
pub use file::File;
pub use light::Light;
pub use material::{Material, TextureMap};
pub use mesh::{Face, Mesh};
pub use node::{Node, NodeData, NodeType};
pub use parsers::ChunkParseError;
pub use shadow::Shadow;
pub use track::{Key, KeyValue, Tcb, Track, TrackType};
pub use viewport::Viewport;
