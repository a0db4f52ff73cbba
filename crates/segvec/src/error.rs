use std::{result, string::FromUtf8Error};

use thiserror::Error;

pub type Result<T, E = Error> = result::Result<T, E>;

/// Error types for segvec operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Index out of range: index: {index}, len: {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Destination too small: {required} elements from index {start}, destination len {available}")]
    DestinationTooSmall {
        start: usize,
        required: usize,
        available: usize,
    },
    #[error("Malformed buffer: {0}")]
    MalformedBuffer(#[from] rawbuf::Error),
    #[error("Malformed buffer: negative element count {count} at offset {offset}")]
    NegativeCount { offset: usize, count: i32 },
    #[error("Malformed buffer: element {index} has invalid offset {offset}")]
    InvalidOffset { index: usize, offset: i32 },
    #[error("Wrong length: received {received} bytes, expected {expected}")]
    WrongLength { received: usize, expected: usize },
    #[error(transparent)]
    Utf8(#[from] FromUtf8Error),
    #[error("Length {len} does not fit the i32 wire format")]
    LengthTooLarge { len: usize },
}

impl Error {
    /// True for every variant caused by inconsistent bytes rather than by the caller.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Self::MalformedBuffer(_)
                | Self::NegativeCount { .. }
                | Self::InvalidOffset { .. }
                | Self::WrongLength { .. }
                | Self::Utf8(_)
        )
    }
}

#[inline]
pub(crate) fn check_index(index: usize, len: usize) -> Result<()> {
    if index >= len {
        return Err(Error::IndexOutOfRange { index, len });
    }
    Ok(())
}

#[inline]
pub(crate) fn check_destination(start: usize, required: usize, available: usize) -> Result<()> {
    match start.checked_add(required) {
        Some(end) if end <= available => Ok(()),
        _ => Err(Error::DestinationTooSmall {
            start,
            required,
            available,
        }),
    }
}
