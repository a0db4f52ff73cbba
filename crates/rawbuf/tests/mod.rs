use proptest::prelude::*;
use rawbuf::{
    Error, Result, SIZE_OF_I32, block_len, read_block, read_i32, read_slice, write_block,
    write_i32, write_slice,
};

#[test]
fn test_sequential_i32_layout() -> Result<()> {
    let mut buf = Vec::new();

    let values = [6, 99, 55, 3, 9423423, -432423, 2423];
    let mut offset = 0;
    for v in values {
        offset += write_i32(&mut buf, offset, v);
    }

    assert_eq!(buf.len(), values.len() * SIZE_OF_I32);
    for (i, v) in values.iter().enumerate() {
        assert_eq!(read_i32(&buf, i * SIZE_OF_I32)?, *v);
    }

    Ok(())
}

#[test]
fn test_block_roundtrip_at_offset() -> Result<()> {
    let mut buf = vec![0xaa; 3];

    let written = write_block(&mut buf, 3, "あああ".as_bytes())?;

    assert_eq!(written, SIZE_OF_I32 + 9);
    assert_eq!(buf.len(), 3 + written);
    assert_eq!(&buf[..3], &[0xaa; 3]);
    assert_eq!(read_block(&buf, 3)?, "あああ".as_bytes());
    assert_eq!(block_len(&buf, 3)?, written);

    Ok(())
}

#[test]
fn test_empty_block() -> Result<()> {
    let mut buf = Vec::new();
    assert_eq!(write_block(&mut buf, 0, &[])?, SIZE_OF_I32);
    assert!(read_block(&buf, 0)?.is_empty());
    Ok(())
}

#[test]
fn test_truncated_block_payload() -> Result<()> {
    let mut buf = Vec::new();
    write_block(&mut buf, 0, b"takotako")?;
    buf.truncate(SIZE_OF_I32 + 3);

    assert_eq!(
        read_block(&buf, 0),
        Err(Error::OutOfBounds {
            offset: SIZE_OF_I32,
            len: 8,
            buffer_len: SIZE_OF_I32 + 3,
        })
    );
    // The prefix alone is still readable.
    assert_eq!(block_len(&buf, 0)?, SIZE_OF_I32 + 8);

    Ok(())
}

#[test]
fn test_overwrite_slice() -> Result<()> {
    let mut buf = b"hoge huga".to_vec();
    write_slice(&mut buf, 5, b"chop");
    assert_eq!(buf, b"hoge chop");
    assert_eq!(read_slice(&buf, 5, 4)?, b"chop");
    Ok(())
}

proptest! {
    #[test]
    fn prop_i32_roundtrip(prefix in 0usize..64, value in any::<i32>()) {
        let mut buf = Vec::new();
        write_i32(&mut buf, prefix, value);
        prop_assert_eq!(buf.len(), prefix + SIZE_OF_I32);
        prop_assert_eq!(read_i32(&buf, prefix), Ok(value));
    }

    #[test]
    fn prop_block_roundtrip(prefix in 0usize..64, bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
        let mut buf = Vec::new();
        let written = write_block(&mut buf, prefix, &bytes).unwrap();
        prop_assert_eq!(written, SIZE_OF_I32 + bytes.len());
        prop_assert_eq!(read_block(&buf, prefix).unwrap(), &bytes[..]);
    }
}
