use crate::{
    math::EPSILON,
    parsers::{
        chunk::{ChunkReader, ChunkWriter},
        ids, ChunkParseError,
    },
};
use std::io::{Seek, Write};

/// Global shadow map settings.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Shadow {
    pub map_size: i16,
    pub low_bias: f32,
    pub hi_bias: f32,
    pub samples: i16,
    pub range: i32,
    pub filter: f32,
    pub ray_bias: f32,
}

impl Shadow {
    /// Reads one of the shadow chunks of `MDATA`, starting at its header.
    pub(crate) fn read(&mut self, reader: &mut ChunkReader) -> Result<(), ChunkParseError> {
        let chunk = reader.begin_read(None)?;

        match chunk.id {
            ids::SHADOW_MAP_SIZE => self.map_size = reader.read::<i16>()?,
            ids::LO_SHADOW_BIAS => self.low_bias = reader.read::<f32>()?,
            ids::HI_SHADOW_BIAS => self.hi_bias = reader.read::<f32>()?,
            ids::SHADOW_SAMPLES => self.samples = reader.read::<i16>()?,
            ids::SHADOW_RANGE => self.range = reader.read::<i32>()?,
            ids::SHADOW_FILTER => self.filter = reader.read::<f32>()?,
            ids::RAY_BIAS => self.ray_bias = reader.read::<f32>()?,
            id => reader.unknown(id),
        }

        reader.end_read(&chunk);
        Ok(())
    }

    pub(crate) fn write<W: Write + Seek>(
        &self,
        writer: &mut ChunkWriter<W>,
    ) -> Result<(), ChunkParseError> {
        if self.low_bias.abs() > EPSILON {
            writer.write_header(ids::LO_SHADOW_BIAS, 10)?;
            writer.write(self.low_bias)?;
        }
        if self.hi_bias.abs() > EPSILON {
            writer.write_header(ids::HI_SHADOW_BIAS, 10)?;
            writer.write(self.hi_bias)?;
        }
        if self.map_size != 0 {
            writer.write_header(ids::SHADOW_MAP_SIZE, 8)?;
            writer.write(self.map_size)?;
        }
        if self.samples != 0 {
            writer.write_header(ids::SHADOW_SAMPLES, 8)?;
            writer.write(self.samples)?;
        }
        if self.range != 0 {
            writer.write_header(ids::SHADOW_RANGE, 10)?;
            writer.write(self.range)?;
        }
        if self.filter.abs() > EPSILON {
            writer.write_header(ids::SHADOW_FILTER, 10)?;
            writer.write(self.filter)?;
        }
        if self.ray_bias.abs() > EPSILON {
            writer.write_header(ids::RAY_BIAS, 10)?;
            writer.write(self.ray_bias)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_zero_fields_are_skipped() {
        let shadow = Shadow {
            map_size: 512,
            filter: 3.0,
            ..Shadow::default()
        };
        let mut w = ChunkWriter::new(Cursor::new(Vec::new()));
        shadow.write(&mut w).unwrap();
        let data = w.into_inner().into_inner();
        assert_eq!(data.len(), 8 + 10);

        let mut r = ChunkReader::new(&data);
        let mut read = Shadow::default();
        read.read(&mut r).unwrap();
        read.read(&mut r).unwrap();
        assert_eq!(read, shadow);
    }
}
