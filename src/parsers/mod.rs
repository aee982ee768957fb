pub mod chunk;
pub mod ids;
pub mod primitive;

use nom::{
    error::{ErrorKind, ParseError},
    IResult,
};
use std::io;
use thiserror::Error;

pub(crate) type Result<'a, T> = IResult<&'a [u8], T, ChunkParseError>;

/// Names in a .3ds file are limited to 64 bytes including the terminator.
pub const MAX_NAME_LEN: usize = 64;

/// Every array in the format is prefixed by a `u16` count.
pub const MAX_ARRAY_LEN: usize = u16::MAX as usize;

/// Errors that can happen while reading or writing a .3ds file. Any of these aborts the whole
/// operation: the chunk framer has no way to resynchronize after a bad header, so there is no
/// partial result. Unknown chunks are not errors, they are logged and skipped.
#[derive(Debug, Error)]
pub enum ChunkParseError {
    #[error("primitive decode failed: {kind:?}")]
    NomError {
        kind: ErrorKind,
        other: Option<Box<ChunkParseError>>,
    },
    #[error("i/o failure: {0}")]
    IoError(#[from] io::Error),
    /// Returned when the data ends in the middle of a primitive value.
    #[error("unexpected end of data")]
    NotEnoughData,
    /// The declared size of a chunk is smaller than its 6 byte header.
    #[error("malformed chunk 0x{id:04X} at offset {offset}: declared size {size}")]
    MalformedChunk { id: u16, size: u32, offset: u64 },
    /// A reader asked for a specific chunk and found another one.
    #[error("expected chunk 0x{expected:04X} at offset {offset}, found 0x{found:04X}")]
    UnexpectedChunk { expected: u16, found: u16, offset: u64 },
    /// No NUL terminator within `max` bytes. Strings are never truncated.
    #[error("string at offset {offset} is longer than {max} bytes")]
    StringTooLong { offset: u64, max: usize },
    /// An array doesn't fit the `u16` count field of the format.
    #[error("array of {len} elements exceeds the format limit of 65535")]
    ArrayTooLarge { len: usize },
    /// The first chunk of the data is neither a magic chunk nor a bare `MDATA` chunk.
    #[error("unknown root chunk 0x{0:04X}")]
    UnknownRootChunk(u16),
}

impl ParseError<&[u8]> for ChunkParseError {
    fn from_error_kind(_input: &[u8], kind: ErrorKind) -> Self {
        ChunkParseError::NomError { kind, other: None }
    }

    fn append(_input: &[u8], kind: ErrorKind, other: Self) -> Self {
        ChunkParseError::NomError {
            kind,
            other: Some(Box::new(other)),
        }
    }
}

/// Converts the error side of a `nom` result into a `ChunkParseError`.
pub(crate) fn from_nom(err: nom::Err<ChunkParseError>) -> ChunkParseError {
    match err {
        nom::Err::Incomplete(_) => ChunkParseError::NotEnoughData,
        nom::Err::Error(e) | nom::Err::Failure(e) => match e {
            ChunkParseError::NomError {
                kind: ErrorKind::Eof,
                ..
            } => ChunkParseError::NotEnoughData,
            e => e,
        },
    }
}
