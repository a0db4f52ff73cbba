use std::fmt::Debug;

use crate::Result;

/// Variable-width element codec.
///
/// The encoded length is stored by the list itself as a prefix, so
/// `from_bytes` always receives exactly what `to_bytes` produced.
pub trait VarBytes: Sized + Debug + Clone + 'static {
    fn to_bytes(&self) -> Vec<u8>;

    fn from_bytes(bytes: &[u8]) -> Result<Self>;
}

impl VarBytes for String {
    #[inline]
    fn to_bytes(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }

    /// UTF-8 decode; invalid sequences are an error, never replaced.
    #[inline]
    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(String::from_utf8(bytes.to_vec())?)
    }
}

impl VarBytes for Vec<u8> {
    #[inline]
    fn to_bytes(&self) -> Vec<u8> {
        self.clone()
    }

    #[inline]
    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bytes.to_vec())
    }
}
