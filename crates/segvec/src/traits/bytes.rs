use std::fmt::Debug;

use crate::{Error, Result};

/// Fixed-width element codec.
///
/// Every value of the type serializes to exactly `SIZE` bytes, which is what
/// lets a [`FixedListSegment`](crate::FixedListSegment) locate element `i` by
/// arithmetic alone.
pub trait Bytes: Sized + Debug + Clone + 'static {
    /// The fixed size in bytes of this type when serialized.
    const SIZE: usize;

    /// Serialize this value to bytes.
    /// The returned vec must be exactly `SIZE` bytes.
    fn to_bytes(&self) -> Vec<u8>;

    /// Deserialize a value from bytes.
    /// The input slice must be exactly `SIZE` bytes.
    fn from_bytes(bytes: &[u8]) -> Result<Self>;
}

#[inline]
fn fixed_array<const N: usize>(bytes: &[u8]) -> Result<[u8; N]> {
    bytes.try_into().map_err(|_| Error::WrongLength {
        received: bytes.len(),
        expected: N,
    })
}

macro_rules! impl_bytes_for_numeric {
    ($($t:ty),*) => {
        $(
            impl Bytes for $t {
                const SIZE: usize = size_of::<$t>();

                #[inline]
                fn to_bytes(&self) -> Vec<u8> {
                    self.to_le_bytes().to_vec()
                }

                #[inline]
                fn from_bytes(bytes: &[u8]) -> Result<Self> {
                    Ok(<$t>::from_le_bytes(fixed_array(bytes)?))
                }
            }
        )*
    };
}

impl_bytes_for_numeric!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128, f32, f64);

impl Bytes for bool {
    const SIZE: usize = 1;

    #[inline]
    fn to_bytes(&self) -> Vec<u8> {
        vec![u8::from(*self)]
    }

    #[inline]
    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let [b] = fixed_array::<1>(bytes)?;
        Ok(b != 0)
    }
}
