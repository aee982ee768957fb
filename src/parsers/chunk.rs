use super::{
    from_nom, ids,
    primitive::{self, Primitive},
    ChunkParseError, MAX_ARRAY_LEN, MAX_NAME_LEN,
};
use glam::Vec3;
use log::{trace, warn};
use nom::bytes::complete::take;
use std::{
    io::{Seek, SeekFrom, Write},
    result::Result as StdResult,
};

/// Size of the header every chunk starts with: a `u16` id followed by a `u32` size.
pub const HEADER_LEN: u32 = 6;

/// An open chunk. `start` is the offset of the header, `end` is `start + size`. The cursor points
/// at the next child header and is only moved by `ChunkReader::next_child` and
/// `ChunkReader::read_tell`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    pub id: u16,
    pub size: u32,
    pub start: u64,
    pub end: u64,
    cursor: u64,
}

impl Chunk {
    /// Number of payload bytes after the header.
    pub fn payload_len(&self) -> u32 {
        self.size - HEADER_LEN
    }
}

/// Read side of the chunk framer. Works on the whole file loaded in memory, seeking is just
/// moving `pos` around.
pub struct ChunkReader<'a> {
    data: &'a [u8],
    pos: u64,
}

impl<'a> ChunkReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        ChunkReader { data, pos: 0 }
    }

    pub fn tell(&self) -> u64 {
        self.pos
    }

    pub fn seek(&mut self, pos: u64) {
        self.pos = pos;
    }

    fn remaining(&self) -> &'a [u8] {
        let start = (self.pos as usize).min(self.data.len());
        &self.data[start..]
    }

    pub(crate) fn read<T: Primitive>(&mut self) -> StdResult<T, ChunkParseError> {
        let input = self.remaining();
        let (rest, value) = T::parse(input).map_err(from_nom)?;
        self.pos += (input.len() - rest.len()) as u64;
        Ok(value)
    }

    pub fn read_vector(&mut self) -> StdResult<Vec3, ChunkParseError> {
        let input = self.remaining();
        let (rest, v) = primitive::parse_vector(input).map_err(from_nom)?;
        self.pos += (input.len() - rest.len()) as u64;
        Ok(v)
    }

    /// Reads a NUL terminated string of at most `max` bytes, terminator included.
    pub fn read_string(&mut self, max: usize) -> StdResult<String, ChunkParseError> {
        let input = self.remaining();
        let (rest, s) = primitive::parse_string(input, max, self.pos).map_err(from_nom)?;
        self.pos += (input.len() - rest.len()) as u64;
        Ok(s)
    }

    /// Reads an object, material or node name.
    pub fn read_name(&mut self) -> StdResult<String, ChunkParseError> {
        self.read_string(MAX_NAME_LEN)
    }

    pub fn read_bytes(&mut self, len: usize) -> StdResult<&'a [u8], ChunkParseError> {
        let input = self.remaining();
        let (_, bytes) = take::<_, _, ChunkParseError>(len)(input).map_err(from_nom)?;
        self.pos += len as u64;
        Ok(bytes)
    }

    fn read_header(&mut self) -> StdResult<Chunk, ChunkParseError> {
        let start = self.pos;
        let id = self.read::<u16>()?;
        let size = self.read::<u32>()?;
        if size < HEADER_LEN {
            return Err(ChunkParseError::MalformedChunk {
                id,
                size,
                offset: start,
            });
        }

        Ok(Chunk {
            id,
            size,
            start,
            end: start + u64::from(size),
            cursor: start + u64::from(HEADER_LEN),
        })
    }

    /// Opens the chunk at the current position. With `Some(id)` the chunk must have that id.
    pub fn begin_read(&mut self, expected: Option<u16>) -> StdResult<Chunk, ChunkParseError> {
        let chunk = self.read_header()?;
        if let Some(expected) = expected {
            if chunk.id != expected {
                return Err(ChunkParseError::UnexpectedChunk {
                    expected,
                    found: chunk.id,
                    offset: chunk.start,
                });
            }
        }
        Ok(chunk)
    }

    /// Moves the child cursor of `chunk` to the current position. Used by chunks that carry
    /// data before their children.
    pub fn read_tell(&self, chunk: &mut Chunk) {
        chunk.cursor = self.pos;
    }

    /// Peeks the header of the next child of `chunk` and leaves the stream right after it, so the
    /// caller can read the child's payload directly. The cursor jumps over the whole child,
    /// whatever the caller ends up reading.
    pub fn next_child(&mut self, chunk: &mut Chunk) -> StdResult<Option<(u16, u32)>, ChunkParseError> {
        if chunk.cursor >= chunk.end {
            return Ok(None);
        }

        self.seek(chunk.cursor);
        let offset = self.pos;
        let id = self.read::<u16>()?;
        let size = self.read::<u32>()?;
        if size < HEADER_LEN {
            return Err(ChunkParseError::MalformedChunk { id, size, offset });
        }
        chunk.cursor += u64::from(size);

        trace!("{} (0x{:04X}) size={}", ids::chunk_name(id), id, size);
        Ok(Some((id, size)))
    }

    /// Rewinds over the header just returned by `next_child` so a sub-reader can `begin_read` it.
    pub fn reset_to_header(&mut self) {
        self.pos = self.pos.saturating_sub(u64::from(HEADER_LEN));
    }

    /// Closes `chunk`, always leaving the stream at its declared end.
    pub fn end_read(&mut self, chunk: &Chunk) {
        self.pos = chunk.end;
    }

    pub fn unknown(&self, id: u16) {
        warn!("Unknown chunk: {} (0x{:04X})", ids::chunk_name(id), id);
    }

    /// Reads a 24 bit colour, each channel scaled to `0.0..=1.0`.
    pub fn read_color_24(&mut self) -> StdResult<Vec3, ChunkParseError> {
        let r = self.read::<u8>()?;
        let g = self.read::<u8>()?;
        let b = self.read::<u8>()?;
        Ok(Vec3::new(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
        ))
    }

    /// Reads a chunk holding colour sub-chunks, either 24 bit or float. The gamma corrected
    /// (`LIN_`) variant wins when both are present.
    pub fn read_color_block(&mut self) -> StdResult<Vec3, ChunkParseError> {
        let mut chunk = self.begin_read(None)?;
        let mut color = Vec3::ZERO;
        let mut have_lin = false;

        while let Some((id, _)) = self.next_child(&mut chunk)? {
            match id {
                ids::LIN_COLOR_24 => {
                    color = self.read_color_24()?;
                    have_lin = true;
                }
                ids::COLOR_24 if !have_lin => color = self.read_color_24()?,
                ids::LIN_COLOR_F => {
                    color = self.read_vector()?;
                    have_lin = true;
                }
                ids::COLOR_F if !have_lin => color = self.read_vector()?,
                ids::COLOR_24 | ids::COLOR_F => {}
                _ => self.unknown(id),
            }
        }

        self.end_read(&chunk);
        Ok(color)
    }

    /// Reads a chunk holding a percentage sub-chunk, returned as a fraction.
    pub fn read_percentage_block(&mut self) -> StdResult<f32, ChunkParseError> {
        let mut chunk = self.begin_read(None)?;
        let mut value = 0.0;

        while let Some((id, _)) = self.next_child(&mut chunk)? {
            match id {
                ids::INT_PERCENTAGE => value = f32::from(self.read::<i16>()?) / 100.0,
                ids::FLOAT_PERCENTAGE => value = self.read::<f32>()?,
                _ => self.unknown(id),
            }
        }

        self.end_read(&chunk);
        Ok(value)
    }
}

/// A chunk whose size will be back-patched by `ChunkWriter::end_write`.
#[derive(Debug)]
#[must_use]
pub struct ChunkMark {
    id: u16,
    start: u64,
}

/// Write side of the chunk framer.
pub struct ChunkWriter<W: Write + Seek> {
    out: W,
}

impl<W: Write + Seek> ChunkWriter<W> {
    pub fn new(out: W) -> Self {
        ChunkWriter { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn tell(&mut self) -> StdResult<u64, ChunkParseError> {
        Ok(self.out.stream_position()?)
    }

    pub(crate) fn write<T: Primitive>(&mut self, value: T) -> StdResult<(), ChunkParseError> {
        let mut buf = Vec::with_capacity(4);
        value.to_le(&mut buf);
        self.out.write_all(&buf)?;
        Ok(())
    }

    pub fn write_vector(&mut self, v: Vec3) -> StdResult<(), ChunkParseError> {
        let mut buf = Vec::with_capacity(12);
        primitive::write_vector(v, &mut buf);
        self.out.write_all(&buf)?;
        Ok(())
    }

    pub fn write_string(&mut self, s: &str) -> StdResult<(), ChunkParseError> {
        let mut buf = Vec::with_capacity(s.len() + 1);
        primitive::write_string(s, &mut buf);
        self.out.write_all(&buf)?;
        Ok(())
    }

    /// Writes a name, refusing anything that would not fit the 64 byte limit of the readers.
    pub fn write_name(&mut self, s: &str) -> StdResult<(), ChunkParseError> {
        if primitive::string_len(s) > MAX_NAME_LEN {
            return Err(ChunkParseError::StringTooLong {
                offset: self.tell()?,
                max: MAX_NAME_LEN,
            });
        }
        self.write_string(s)
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> StdResult<(), ChunkParseError> {
        self.out.write_all(bytes)?;
        Ok(())
    }

    /// Writes the `u16` element count of an array.
    pub fn write_count(&mut self, len: usize) -> StdResult<(), ChunkParseError> {
        if len > MAX_ARRAY_LEN {
            return Err(ChunkParseError::ArrayTooLarge { len });
        }
        self.write(len as u16)
    }

    /// Writes the header of a chunk whose size is known upfront.
    pub fn write_header(&mut self, id: u16, size: u32) -> StdResult<(), ChunkParseError> {
        self.write(id)?;
        self.write(size)
    }

    /// Writes an empty chunk, used for boolean switches.
    pub fn write_switch(&mut self, id: u16) -> StdResult<(), ChunkParseError> {
        self.write_header(id, HEADER_LEN)
    }

    /// Writes a header with a placeholder size.
    pub fn begin_write(&mut self, id: u16) -> StdResult<ChunkMark, ChunkParseError> {
        let start = self.tell()?;
        self.write_header(id, 0)?;
        Ok(ChunkMark { id, start })
    }

    /// Patches the size of `mark` to cover everything written since `begin_write`.
    pub fn end_write(&mut self, mark: ChunkMark) -> StdResult<(), ChunkParseError> {
        let end = self.tell()?;
        let size = end - mark.start;
        trace!(
            "wrote {} (0x{:04X}) size={}",
            ids::chunk_name(mark.id),
            mark.id,
            size
        );

        self.out.seek(SeekFrom::Start(mark.start + 2))?;
        self.write(size as u32)?;
        self.out.seek(SeekFrom::Start(end))?;
        Ok(())
    }

    pub fn write_color_24(&mut self, c: Vec3) -> StdResult<(), ChunkParseError> {
        for v in c.to_array().iter() {
            self.write((255.0 * v + 0.5).floor() as u8)?;
        }
        Ok(())
    }

    /// Writes `id` holding the colour as `COLOR_24` and `LIN_COLOR_24`.
    pub fn write_color_block(&mut self, id: u16, c: Vec3) -> StdResult<(), ChunkParseError> {
        self.write_header(id, 24)?;
        self.write_header(ids::COLOR_24, 9)?;
        self.write_color_24(c)?;
        self.write_header(ids::LIN_COLOR_24, 9)?;
        self.write_color_24(c)
    }

    /// Writes the colour as `COLOR_F` and `LIN_COLOR_F`.
    pub fn write_float_colors(&mut self, c: Vec3) -> StdResult<(), ChunkParseError> {
        self.write_header(ids::COLOR_F, 18)?;
        self.write_vector(c)?;
        self.write_header(ids::LIN_COLOR_F, 18)?;
        self.write_vector(c)
    }

    /// Writes `id` holding the fraction `p` as an `INT_PERCENTAGE`.
    pub fn write_percentage_block(&mut self, id: u16, p: f32) -> StdResult<(), ChunkParseError> {
        self.write_header(id, 14)?;
        self.write_header(ids::INT_PERCENTAGE, 8)?;
        self.write((100.0 * p + 0.5).floor() as i16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn writer() -> ChunkWriter<Cursor<Vec<u8>>> {
        ChunkWriter::new(Cursor::new(Vec::new()))
    }

    #[test]
    fn test_back_patched_size() {
        let mut w = writer();
        let outer = w.begin_write(0x4D4D).unwrap();
        let inner = w.begin_write(0x3D3D).unwrap();
        w.write(7u32).unwrap();
        w.end_write(inner).unwrap();
        w.end_write(outer).unwrap();

        let data = w.into_inner().into_inner();
        assert_eq!(data.len(), 16);
        assert_eq!(&data[0..6], &[0x4D, 0x4D, 16, 0, 0, 0]);
        assert_eq!(&data[6..12], &[0x3D, 0x3D, 10, 0, 0, 0]);
    }

    #[test]
    fn test_malformed_header() {
        let data = [0x4D, 0x4D, 5, 0, 0, 0];
        let mut r = ChunkReader::new(&data);
        match r.begin_read(None) {
            Err(ChunkParseError::MalformedChunk { id, size, offset }) => {
                assert_eq!(id, 0x4D4D);
                assert_eq!(size, 5);
                assert_eq!(offset, 0);
            }
            other => panic!("expected MalformedChunk, got {:?}", other),
        }
    }

    #[test]
    fn test_unexpected_chunk() {
        let data = [0x3D, 0x3D, 6, 0, 0, 0];
        let mut r = ChunkReader::new(&data);
        match r.begin_read(Some(0x4D4D)) {
            Err(ChunkParseError::UnexpectedChunk { expected, found, .. }) => {
                assert_eq!(expected, 0x4D4D);
                assert_eq!(found, 0x3D3D);
            }
            other => panic!("expected UnexpectedChunk, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_sized_child_is_fatal() {
        let mut w = writer();
        let parent = w.begin_write(0x1000).unwrap();
        w.write_header(0x2000, 0).unwrap();
        w.end_write(parent).unwrap();
        let data = w.into_inner().into_inner();

        let mut r = ChunkReader::new(&data);
        let mut c = r.begin_read(None).unwrap();
        assert!(matches!(
            r.next_child(&mut c),
            Err(ChunkParseError::MalformedChunk { id: 0x2000, .. })
        ));
    }

    #[test]
    fn test_end_read_lands_on_declared_end() {
        // parent { a: 4 bytes, b: 4 bytes, c: switch }
        let mut w = writer();
        let parent = w.begin_write(0x1000).unwrap();
        w.write_header(0x2001, 10).unwrap();
        w.write(0xAAAA_AAAAu32).unwrap();
        w.write_header(0x2002, 10).unwrap();
        w.write(0xBBBB_BBBBu32).unwrap();
        w.write_switch(0x2003).unwrap();
        w.end_write(parent).unwrap();
        w.write_switch(0x3000).unwrap();
        let data = w.into_inner().into_inner();

        let mut r = ChunkReader::new(&data);
        let mut c = r.begin_read(Some(0x1000)).unwrap();
        let mut seen = Vec::new();
        while let Some((id, _)) = r.next_child(&mut c).unwrap() {
            seen.push(id);
            match id {
                // under-read
                0x2001 => {
                    r.read::<u8>().unwrap();
                }
                // over-read into the next sibling
                0x2002 => {
                    r.read::<u32>().unwrap();
                    r.read::<u32>().unwrap();
                }
                _ => {}
            }
        }
        r.end_read(&c);

        assert_eq!(seen, vec![0x2001, 0x2002, 0x2003]);
        assert_eq!(r.tell(), c.end);
        assert_eq!(r.begin_read(None).unwrap().id, 0x3000);
    }

    #[test]
    fn test_reset_to_header_reenters_child() {
        let mut w = writer();
        let parent = w.begin_write(0x1000).unwrap();
        let child = w.begin_write(0x2000).unwrap();
        w.write(1.0f32).unwrap();
        w.end_write(child).unwrap();
        w.end_write(parent).unwrap();
        let data = w.into_inner().into_inner();

        let mut r = ChunkReader::new(&data);
        let mut c = r.begin_read(None).unwrap();
        let (id, size) = r.next_child(&mut c).unwrap().unwrap();
        assert_eq!((id, size), (0x2000, 10));
        r.reset_to_header();
        let inner = r.begin_read(Some(0x2000)).unwrap();
        assert_eq!(inner.payload_len(), 4);
        assert_eq!(r.read::<f32>().unwrap(), 1.0);
        r.end_read(&inner);
        assert!(r.next_child(&mut c).unwrap().is_none());
    }

    #[test]
    fn test_array_ceiling() {
        let mut w = writer();
        assert!(w.write_count(65535).is_ok());
        assert!(matches!(
            w.write_count(65536),
            Err(ChunkParseError::ArrayTooLarge { len: 65536 })
        ));
    }

    #[test]
    fn test_name_too_long_on_write() {
        let mut w = writer();
        let name: String = std::iter::repeat('x').take(64).collect();
        assert!(matches!(
            w.write_name(&name),
            Err(ChunkParseError::StringTooLong { max: 64, .. })
        ));
    }
}
