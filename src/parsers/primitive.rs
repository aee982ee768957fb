use super::{ChunkParseError, Result};
use glam::Vec3;
use nom::number::complete::{le_f32, le_i16, le_i32, le_i8, le_u16, le_u32, le_u8};

/// A fixed width value as it is stored in a .3ds file. Every multi-byte value is little endian
/// regardless of the host.
pub(crate) trait Primitive: Sized + Copy {
    fn parse(data: &[u8]) -> Result<Self>;
    fn to_le(self, out: &mut Vec<u8>);
}

impl Primitive for u8 {
    fn parse(data: &[u8]) -> Result<Self> {
        le_u8(data)
    }
    fn to_le(self, out: &mut Vec<u8>) {
        out.push(self);
    }
}

impl Primitive for i8 {
    fn parse(data: &[u8]) -> Result<Self> {
        le_i8(data)
    }
    fn to_le(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }
}

impl Primitive for u16 {
    fn parse(data: &[u8]) -> Result<Self> {
        le_u16(data)
    }
    fn to_le(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }
}

impl Primitive for i16 {
    fn parse(data: &[u8]) -> Result<Self> {
        le_i16(data)
    }
    fn to_le(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }
}

impl Primitive for u32 {
    fn parse(data: &[u8]) -> Result<Self> {
        le_u32(data)
    }
    fn to_le(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }
}

impl Primitive for i32 {
    fn parse(data: &[u8]) -> Result<Self> {
        le_i32(data)
    }
    fn to_le(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }
}

impl Primitive for f32 {
    fn parse(data: &[u8]) -> Result<Self> {
        le_f32(data)
    }
    fn to_le(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }
}

pub fn parse_vector(input: &[u8]) -> Result<Vec3> {
    let (input, x) = le_f32(input)?;
    let (input, y) = le_f32(input)?;
    let (input, z) = le_f32(input)?;
    Ok((input, Vec3::new(x, y, z)))
}

pub fn write_vector(v: Vec3, out: &mut Vec<u8>) {
    v.x.to_le(out);
    v.y.to_le(out);
    v.z.to_le(out);
}

/// Parses a NUL terminated string. The terminator must be found within the first `max` bytes,
/// otherwise `StringTooLong` is returned with `offset` pointing at the start of the string.
/// Bytes are decoded as Latin-1 so that any name survives a round trip.
pub fn parse_string(input: &[u8], max: usize, offset: u64) -> Result<String> {
    let window = &input[..input.len().min(max)];

    match window.iter().position(|&b| b == 0) {
        Some(nul) => {
            let s = window[..nul].iter().map(|&b| b as char).collect();
            Ok((&input[nul + 1..], s))
        }
        None if window.len() < max => Err(nom::Err::Error(ChunkParseError::NotEnoughData)),
        None => Err(nom::Err::Failure(ChunkParseError::StringTooLong {
            offset,
            max,
        })),
    }
}

/// Encodes `s` as Latin-1 followed by a NUL terminator. Characters outside of Latin-1 are
/// replaced by `?`.
pub fn write_string(s: &str, out: &mut Vec<u8>) {
    out.extend(s.chars().map(|c| if (c as u32) < 256 { c as u8 } else { b'?' }));
    out.push(0);
}

/// Number of bytes `write_string` produces for `s`, terminator included.
pub fn string_len(s: &str) -> usize {
    s.chars().count() + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_le_assembly() {
        let data = [0x34, 0x12, 0x78, 0x56, 0x34, 0x12];
        let (rest, w) = u16::parse(&data).unwrap();
        assert_eq!(w, 0x1234);
        let (_, d) = u32::parse(rest).unwrap();
        assert_eq!(d, 0x1234_5678);

        let (_, i) = i16::parse(&[0xFE, 0xFF]).unwrap();
        assert_eq!(i, -2);
    }

    #[test]
    fn test_float_bytes() {
        let mut out = Vec::new();
        1.5f32.to_le(&mut out);
        assert_eq!(out, vec![0x00, 0x00, 0xC0, 0x3F]);
        let (_, f) = f32::parse(&out).unwrap();
        assert_eq!(f, 1.5);
    }

    #[test]
    fn test_short_read() {
        match u32::parse(&[1, 2]) {
            Err(e) => match super::super::from_nom(e) {
                ChunkParseError::NotEnoughData => {}
                other => panic!("unexpected error {:?}", other),
            },
            Ok(_) => panic!("parsed a dword out of two bytes"),
        }
    }

    #[test]
    fn test_string() {
        let data = b"cube\0rest";
        let (rest, s) = parse_string(data, 64, 0).unwrap();
        assert_eq!(s, "cube");
        assert_eq!(rest, b"rest");
    }

    #[test]
    fn test_string_at_bound() {
        let mut data = vec![b'a'; 63];
        data.push(0);
        let (_, s) = parse_string(&data, 64, 0).unwrap();
        assert_eq!(s.len(), 63);

        let mut data = vec![b'a'; 64];
        data.push(0);
        match parse_string(&data, 64, 10) {
            Err(nom::Err::Failure(ChunkParseError::StringTooLong { offset, max })) => {
                assert_eq!(offset, 10);
                assert_eq!(max, 64);
            }
            other => panic!("expected StringTooLong, got {:?}", other),
        }
    }

    #[test]
    fn test_latin1_string() {
        let mut out = Vec::new();
        write_string("caf\u{e9}", &mut out);
        assert_eq!(out, vec![b'c', b'a', b'f', 0xE9, 0]);
        assert_eq!(string_len("caf\u{e9}"), 5);
        let (_, s) = parse_string(&out, 64, 0).unwrap();
        assert_eq!(s, "caf\u{e9}");
    }
}
