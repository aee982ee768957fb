use crate::parsers::{
    chunk::{Chunk, ChunkReader, ChunkWriter},
    ids, ChunkParseError,
};
use glam::Vec3;
use std::io::{Seek, Write};

/// Fog, layered fog and distance cueing. A block is only stored when its `use_*` switch is set.
#[derive(Debug, Clone, PartialEq)]
pub struct Atmosphere {
    pub use_fog: bool,
    pub fog_color: Vec3,
    pub fog_background: bool,
    pub fog_near_plane: f32,
    pub fog_near_density: f32,
    pub fog_far_plane: f32,
    pub fog_far_density: f32,
    pub use_layer_fog: bool,
    pub layer_fog_flags: u32,
    pub layer_fog_color: Vec3,
    pub layer_fog_near_y: f32,
    pub layer_fog_far_y: f32,
    pub layer_fog_density: f32,
    pub use_dist_cue: bool,
    pub dist_cue_background: bool,
    pub dist_cue_near_plane: f32,
    pub dist_cue_near_dimming: f32,
    pub dist_cue_far_plane: f32,
    pub dist_cue_far_dimming: f32,
}

impl Default for Atmosphere {
    fn default() -> Self {
        Atmosphere {
            use_fog: false,
            fog_color: Vec3::ZERO,
            fog_background: false,
            fog_near_plane: 0.0,
            fog_near_density: 0.0,
            fog_far_plane: 0.0,
            fog_far_density: 0.0,
            use_layer_fog: false,
            layer_fog_flags: 0,
            layer_fog_color: Vec3::ZERO,
            layer_fog_near_y: 0.0,
            layer_fog_far_y: 0.0,
            layer_fog_density: 0.0,
            use_dist_cue: false,
            dist_cue_background: false,
            dist_cue_near_plane: 0.0,
            dist_cue_near_dimming: 0.0,
            dist_cue_far_plane: 0.0,
            dist_cue_far_dimming: 0.0,
        }
    }
}

/// Reads the colour children of a fog chunk, returning whether `flag` was seen.
fn read_fog_children(
    reader: &mut ChunkReader,
    chunk: &mut Chunk,
    color: &mut Vec3,
    flag: Option<u16>,
) -> Result<bool, ChunkParseError> {
    let mut have_lin = false;
    let mut seen = false;

    while let Some((id, _)) = reader.next_child(chunk)? {
        match id {
            ids::LIN_COLOR_F => {
                *color = reader.read_vector()?;
                have_lin = true;
            }
            ids::COLOR_F if !have_lin => *color = reader.read_vector()?,
            ids::COLOR_F => {}
            id if Some(id) == flag => seen = true,
            _ => reader.unknown(id),
        }
    }
    Ok(seen)
}

impl Atmosphere {
    /// Reads one of the atmosphere chunks of `MDATA`, starting at its header.
    pub(crate) fn read(&mut self, reader: &mut ChunkReader) -> Result<(), ChunkParseError> {
        let mut chunk = reader.begin_read(None)?;

        match chunk.id {
            ids::FOG => {
                self.fog_near_plane = reader.read::<f32>()?;
                self.fog_near_density = reader.read::<f32>()?;
                self.fog_far_plane = reader.read::<f32>()?;
                self.fog_far_density = reader.read::<f32>()?;
                reader.read_tell(&mut chunk);
                self.fog_background =
                    read_fog_children(reader, &mut chunk, &mut self.fog_color, Some(ids::FOG_BGND))?;
            }
            ids::LAYER_FOG => {
                self.layer_fog_near_y = reader.read::<f32>()?;
                self.layer_fog_far_y = reader.read::<f32>()?;
                self.layer_fog_density = reader.read::<f32>()?;
                self.layer_fog_flags = reader.read::<u32>()?;
                reader.read_tell(&mut chunk);
                read_fog_children(reader, &mut chunk, &mut self.layer_fog_color, None)?;
            }
            ids::DISTANCE_CUE => {
                self.dist_cue_near_plane = reader.read::<f32>()?;
                self.dist_cue_near_dimming = reader.read::<f32>()?;
                self.dist_cue_far_plane = reader.read::<f32>()?;
                self.dist_cue_far_dimming = reader.read::<f32>()?;
                reader.read_tell(&mut chunk);
                while let Some((id, _)) = reader.next_child(&mut chunk)? {
                    match id {
                        ids::DCUE_BGND => self.dist_cue_background = true,
                        _ => reader.unknown(id),
                    }
                }
            }
            ids::USE_FOG => self.use_fog = true,
            ids::USE_LAYER_FOG => self.use_layer_fog = true,
            ids::USE_DISTANCE_CUE => self.use_dist_cue = true,
            id => reader.unknown(id),
        }

        reader.end_read(&chunk);
        Ok(())
    }

    pub(crate) fn write<W: Write + Seek>(
        &self,
        writer: &mut ChunkWriter<W>,
    ) -> Result<(), ChunkParseError> {
        if self.use_fog {
            let mark = writer.begin_write(ids::FOG)?;
            writer.write(self.fog_near_plane)?;
            writer.write(self.fog_near_density)?;
            writer.write(self.fog_far_plane)?;
            writer.write(self.fog_far_density)?;
            writer.write_header(ids::COLOR_F, 18)?;
            writer.write_vector(self.fog_color)?;
            if self.fog_background {
                writer.write_switch(ids::FOG_BGND)?;
            }
            writer.end_write(mark)?;
        }

        if self.use_layer_fog {
            let mark = writer.begin_write(ids::LAYER_FOG)?;
            writer.write(self.layer_fog_near_y)?;
            writer.write(self.layer_fog_far_y)?;
            writer.write(self.layer_fog_density)?;
            writer.write(self.layer_fog_flags)?;
            writer.write_header(ids::COLOR_F, 18)?;
            writer.write_vector(self.layer_fog_color)?;
            writer.end_write(mark)?;
        }

        if self.use_dist_cue {
            let mark = writer.begin_write(ids::DISTANCE_CUE)?;
            writer.write(self.dist_cue_near_plane)?;
            writer.write(self.dist_cue_near_dimming)?;
            writer.write(self.dist_cue_far_plane)?;
            writer.write(self.dist_cue_far_dimming)?;
            if self.dist_cue_background {
                writer.write_switch(ids::DCUE_BGND)?;
            }
            writer.end_write(mark)?;
        }

        if self.use_fog {
            writer.write_switch(ids::USE_FOG)?;
        }
        if self.use_layer_fog {
            writer.write_switch(ids::USE_LAYER_FOG)?;
        }
        if self.use_dist_cue {
            writer.write_switch(ids::USE_DISTANCE_CUE)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_fog_and_distance_cue() {
        let atmosphere = Atmosphere {
            use_fog: true,
            fog_color: Vec3::new(0.5, 0.5, 0.6),
            fog_background: true,
            fog_near_plane: 1.0,
            fog_far_plane: 100.0,
            fog_far_density: 1.0,
            use_dist_cue: true,
            dist_cue_far_plane: 250.0,
            dist_cue_far_dimming: 0.75,
            // not stored without its switch
            layer_fog_density: 0.0,
            ..Atmosphere::default()
        };

        let mut w = ChunkWriter::new(Cursor::new(Vec::new()));
        atmosphere.write(&mut w).unwrap();
        let data = w.into_inner().into_inner();

        let mut r = ChunkReader::new(&data);
        let mut read = Atmosphere::default();
        while (r.tell() as usize) < data.len() {
            read.read(&mut r).unwrap();
        }
        assert_eq!(read, atmosphere);
    }
}
