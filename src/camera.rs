use crate::{
    math::EPSILON,
    parsers::{
        chunk::{ChunkReader, ChunkWriter},
        ids, ChunkParseError,
    },
};
use glam::Vec3;
use log::debug;
use std::io::{Seek, Write};

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub name: String,
    /// `OBJ_*` flags of the named object, see `file::object_flags`.
    pub object_flags: u32,
    pub position: Vec3,
    pub target: Vec3,
    pub roll: f32,
    /// Field of view in degrees. Stored in the file as a lens size.
    pub fov: f32,
    pub see_cone: bool,
    pub near_range: f32,
    pub far_range: f32,
}

impl Camera {
    pub fn new(name: &str) -> Camera {
        Camera {
            name: name.to_string(),
            object_flags: 0,
            position: Vec3::ZERO,
            target: Vec3::ZERO,
            roll: 0.0,
            fov: 45.0,
            see_cone: false,
            near_range: 0.0,
            far_range: 0.0,
        }
    }

    /// Reads an `N_CAMERA` chunk starting at its header.
    pub(crate) fn read(reader: &mut ChunkReader, name: &str) -> Result<Camera, ChunkParseError> {
        let mut chunk = reader.begin_read(Some(ids::N_CAMERA))?;
        let mut camera = Camera::new(name);
        debug!("camera: {}", name);

        camera.position = reader.read_vector()?;
        camera.target = reader.read_vector()?;
        camera.roll = reader.read::<f32>()?;
        let lens = reader.read::<f32>()?;
        camera.fov = if lens.abs() < EPSILON { 45.0 } else { 2400.0 / lens };
        reader.read_tell(&mut chunk);

        while let Some((id, _)) = reader.next_child(&mut chunk)? {
            match id {
                ids::CAM_SEE_CONE => camera.see_cone = true,
                ids::CAM_RANGES => {
                    camera.near_range = reader.read::<f32>()?;
                    camera.far_range = reader.read::<f32>()?;
                }
                _ => reader.unknown(id),
            }
        }

        reader.end_read(&chunk);
        Ok(camera)
    }

    pub(crate) fn write<W: Write + Seek>(
        &self,
        writer: &mut ChunkWriter<W>,
    ) -> Result<(), ChunkParseError> {
        let mark = writer.begin_write(ids::N_CAMERA)?;
        writer.write_vector(self.position)?;
        writer.write_vector(self.target)?;
        writer.write(self.roll)?;
        let fov = if self.fov.abs() < EPSILON { 45.0 } else { self.fov };
        writer.write(2400.0 / fov)?;

        if self.see_cone {
            writer.write_switch(ids::CAM_SEE_CONE)?;
        }
        writer.write_header(ids::CAM_RANGES, 14)?;
        writer.write(self.near_range)?;
        writer.write(self.far_range)?;

        writer.end_write(mark)
    }
}
