use rawbuf::{SIZE_OF_I32, write_i32, write_slice};

use crate::{Bytes, Error, Result};

/// Encodes `values` as a fixed segment at `offset`: an `i32` count followed by
/// `values.len() * T::SIZE` densely packed bytes. Returns bytes written.
pub fn write_fixed_list<T>(buf: &mut Vec<u8>, offset: usize, values: &[T]) -> Result<usize>
where
    T: Bytes,
{
    let count =
        i32::try_from(values.len()).map_err(|_| Error::LengthTooLarge { len: values.len() })?;
    let mut pos = offset + write_i32(buf, offset, count);
    for value in values {
        let bytes = value.to_bytes();
        if bytes.len() != T::SIZE {
            return Err(Error::WrongLength {
                received: bytes.len(),
                expected: T::SIZE,
            });
        }
        pos += write_slice(buf, pos, &bytes);
    }
    debug_assert_eq!(pos - offset, SIZE_OF_I32 + values.len() * T::SIZE);
    Ok(pos - offset)
}
