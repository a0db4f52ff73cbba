use log::trace;

use crate::{Error, Result, SIZE_OF_I32};

/// Grows `buf` with zeroes until it is at least `len` bytes long. Never shrinks.
#[inline]
pub fn ensure_len(buf: &mut Vec<u8>, len: usize) {
    if buf.len() < len {
        trace!("Extending buffer from {} to {len} bytes.", buf.len());
        buf.resize(len, 0);
    }
}

/// Writes `bytes` at `offset`, growing `buf` if needed. Returns the number of bytes written.
pub fn write_slice(buf: &mut Vec<u8>, offset: usize, bytes: &[u8]) -> usize {
    let end = offset + bytes.len();
    ensure_len(buf, end);
    buf[offset..end].copy_from_slice(bytes);
    bytes.len()
}

/// Writes `value` as a little-endian `i32` at `offset`. Returns the number of bytes written.
#[inline]
pub fn write_i32(buf: &mut Vec<u8>, offset: usize, value: i32) -> usize {
    write_slice(buf, offset, &value.to_le_bytes())
}

/// Writes an `i32` length prefix followed by `bytes`. Returns the number of bytes written.
pub fn write_block(buf: &mut Vec<u8>, offset: usize, bytes: &[u8]) -> Result<usize> {
    let length =
        i32::try_from(bytes.len()).map_err(|_| Error::LengthTooLarge { len: bytes.len() })?;
    let prefix = write_i32(buf, offset, length);
    Ok(prefix + write_slice(buf, offset + SIZE_OF_I32, bytes))
}
