use crate::{Error, Result, SIZE_OF_I32};

/// Returns `buf[offset..offset + len]`, or an error if the range leaves the buffer.
#[inline]
pub fn read_slice(buf: &[u8], offset: usize, len: usize) -> Result<&[u8]> {
    let end = offset.checked_add(len).ok_or(Error::Overflow)?;
    buf.get(offset..end).ok_or(Error::OutOfBounds {
        offset,
        len,
        buffer_len: buf.len(),
    })
}

/// Reads a little-endian `i32` at `offset`.
#[inline]
pub fn read_i32(buf: &[u8], offset: usize) -> Result<i32> {
    let bytes = read_slice(buf, offset, SIZE_OF_I32)?;
    let mut arr = [0; SIZE_OF_I32];
    arr.copy_from_slice(bytes);
    Ok(i32::from_le_bytes(arr))
}

/// Reads an `i32` length prefix at `offset` and returns the block that follows it.
///
/// The returned slice borrows from `buf`; nothing is copied.
pub fn read_block(buf: &[u8], offset: usize) -> Result<&[u8]> {
    let length = read_i32(buf, offset)?;
    let len = usize::try_from(length).map_err(|_| Error::NegativeLength { offset, length })?;
    read_slice(buf, offset + SIZE_OF_I32, len)
}

/// Total bytes occupied by the length-prefixed block at `offset`, prefix included.
///
/// Only the prefix is read, so this succeeds even if the payload itself is truncated.
pub fn block_len(buf: &[u8], offset: usize) -> Result<usize> {
    let length = read_i32(buf, offset)?;
    let len = usize::try_from(length).map_err(|_| Error::NegativeLength { offset, length })?;
    Ok(SIZE_OF_I32 + len)
}
