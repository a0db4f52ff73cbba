use std::result;

use thiserror::Error;

pub type Result<T, E = Error> = result::Result<T, E>;

/// Error types for rawbuf operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Read of {len} bytes at offset {offset} is beyond buffer length {buffer_len}")]
    OutOfBounds {
        offset: usize,
        len: usize,
        buffer_len: usize,
    },

    #[error("Offset arithmetic overflowed")]
    Overflow,

    #[error("Negative block length {length} at offset {offset}")]
    NegativeLength { offset: usize, length: i32 },

    #[error("Block of {len} bytes cannot be length-prefixed with an i32")]
    LengthTooLarge { len: usize },
}
