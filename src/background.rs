use crate::parsers::{
    chunk::{ChunkReader, ChunkWriter},
    ids, ChunkParseError,
};
use glam::Vec3;
use std::io::{Seek, Write};

/// Rendering background: a bitmap, a solid colour or a vertical gradient. Only the one whose
/// `use_*` switch is set is active, but all three are kept.
#[derive(Debug, Clone, PartialEq)]
pub struct Background {
    pub use_bitmap: bool,
    pub bitmap_name: String,
    pub use_solid: bool,
    pub solid_color: Vec3,
    pub use_gradient: bool,
    /// Position of the middle colour, from the top.
    pub gradient_percent: f32,
    pub gradient_top: Vec3,
    pub gradient_middle: Vec3,
    pub gradient_bottom: Vec3,
}

impl Default for Background {
    fn default() -> Self {
        Background {
            use_bitmap: false,
            bitmap_name: String::new(),
            use_solid: false,
            solid_color: Vec3::ZERO,
            use_gradient: false,
            gradient_percent: 0.0,
            gradient_top: Vec3::ZERO,
            gradient_middle: Vec3::ZERO,
            gradient_bottom: Vec3::ZERO,
        }
    }
}

fn is_defined(c: Vec3) -> bool {
    c != Vec3::ZERO
}

impl Background {
    /// Reads one of the background chunks of `MDATA`, starting at its header.
    pub(crate) fn read(&mut self, reader: &mut ChunkReader) -> Result<(), ChunkParseError> {
        let mut chunk = reader.begin_read(None)?;

        match chunk.id {
            ids::BIT_MAP => self.bitmap_name = reader.read_name()?,
            ids::SOLID_BGND => {
                let mut have_lin = false;
                while let Some((id, _)) = reader.next_child(&mut chunk)? {
                    match id {
                        ids::LIN_COLOR_F => {
                            self.solid_color = reader.read_vector()?;
                            have_lin = true;
                        }
                        ids::COLOR_F if !have_lin => self.solid_color = reader.read_vector()?,
                        ids::COLOR_F => {}
                        _ => reader.unknown(id),
                    }
                }
            }
            ids::V_GRADIENT => {
                self.gradient_percent = reader.read::<f32>()?;
                reader.read_tell(&mut chunk);

                // top, middle and bottom in order, once as COLOR_F and once as LIN_COLOR_F
                let mut colors = [[Vec3::ZERO; 3]; 2];
                let mut count = [0usize; 2];
                while let Some((id, _)) = reader.next_child(&mut chunk)? {
                    let set = match id {
                        ids::COLOR_F => 0,
                        ids::LIN_COLOR_F => 1,
                        _ => {
                            reader.unknown(id);
                            continue;
                        }
                    };
                    let color = reader.read_vector()?;
                    if count[set] < 3 {
                        colors[set][count[set]] = color;
                        count[set] += 1;
                    }
                }

                let chosen = if count[1] > 0 { colors[1] } else { colors[0] };
                self.gradient_top = chosen[0];
                self.gradient_middle = chosen[1];
                self.gradient_bottom = chosen[2];
            }
            ids::USE_BIT_MAP => self.use_bitmap = true,
            ids::USE_SOLID_BGND => self.use_solid = true,
            ids::USE_V_GRADIENT => self.use_gradient = true,
            id => reader.unknown(id),
        }

        reader.end_read(&chunk);
        Ok(())
    }

    pub(crate) fn write<W: Write + Seek>(
        &self,
        writer: &mut ChunkWriter<W>,
    ) -> Result<(), ChunkParseError> {
        if !self.bitmap_name.is_empty() {
            let mark = writer.begin_write(ids::BIT_MAP)?;
            writer.write_name(&self.bitmap_name)?;
            writer.end_write(mark)?;
        }

        if is_defined(self.solid_color) {
            writer.write_header(ids::SOLID_BGND, 42)?;
            writer.write_float_colors(self.solid_color)?;
        }

        if is_defined(self.gradient_top)
            || is_defined(self.gradient_middle)
            || is_defined(self.gradient_bottom)
        {
            writer.write_header(ids::V_GRADIENT, 118)?;
            writer.write(self.gradient_percent)?;
            writer.write_float_colors(self.gradient_top)?;
            writer.write_float_colors(self.gradient_middle)?;
            writer.write_float_colors(self.gradient_bottom)?;
        }

        if self.use_bitmap {
            writer.write_switch(ids::USE_BIT_MAP)?;
        }
        if self.use_solid {
            writer.write_switch(ids::USE_SOLID_BGND)?;
        }
        if self.use_gradient {
            writer.write_switch(ids::USE_V_GRADIENT)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_only_defined_parts_are_written() {
        let mut w = ChunkWriter::new(Cursor::new(Vec::new()));
        Background::default().write(&mut w).unwrap();
        assert!(w.into_inner().into_inner().is_empty());
    }

    #[test]
    fn test_gradient_order() {
        let background = Background {
            use_gradient: true,
            gradient_percent: 0.4,
            gradient_top: Vec3::X,
            gradient_middle: Vec3::Y,
            gradient_bottom: Vec3::Z,
            solid_color: Vec3::splat(0.5),
            ..Background::default()
        };

        let mut w = ChunkWriter::new(Cursor::new(Vec::new()));
        background.write(&mut w).unwrap();
        let data = w.into_inner().into_inner();

        let mut r = ChunkReader::new(&data);
        let mut read = Background::default();
        while (r.tell() as usize) < data.len() {
            read.read(&mut r).unwrap();
        }
        assert_eq!(read, background);
    }
}
