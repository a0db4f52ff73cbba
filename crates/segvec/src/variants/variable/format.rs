use rawbuf::{SIZE_OF_I32, ensure_len, write_block, write_i32};

use crate::{Error, Result, VarBytes};

use super::NULL_OFFSET;

/// Encodes `values` as a variable segment at `offset`. Returns bytes written.
///
/// Payloads follow the offset table in index order; `None` entries get
/// [`NULL_OFFSET`] and no payload.
pub fn write_variable_list<T>(
    buf: &mut Vec<u8>,
    offset: usize,
    values: &[Option<T>],
) -> Result<usize>
where
    T: VarBytes,
{
    let too_large = || Error::LengthTooLarge { len: values.len() };
    let count = i32::try_from(values.len()).map_err(|_| too_large())?;

    let table = offset + SIZE_OF_I32;
    let mut pos = table + values.len() * SIZE_OF_I32;
    ensure_len(buf, pos);
    write_i32(buf, offset, count);

    for (index, value) in values.iter().enumerate() {
        let entry = match value {
            None => NULL_OFFSET,
            Some(value) => {
                let relative = i32::try_from(pos - offset).map_err(|_| too_large())?;
                let bytes = value.to_bytes();
                pos += write_block(buf, pos, &bytes)
                    .map_err(|_| Error::LengthTooLarge { len: bytes.len() })?;
                relative
            }
        };
        write_i32(buf, table + index * SIZE_OF_I32, entry);
    }

    Ok(pos - offset)
}
