//! List segment over elements that all serialize to the same width.
//!
//! ```text
//! +-------------+-------------------+-------------------+-----+
//! | count: i32  | element 0         | element 1         | ... |
//! |             | [u8; T::SIZE]     | [u8; T::SIZE]     |     |
//! +-------------+-------------------+-------------------+-----+
//! ```
//!
//! Elements are densely packed with no per-element marker; fixed-width
//! elements cannot be null.

mod format;
mod iterator;

pub use format::*;
pub use iterator::*;

use log::debug;
use rawbuf::{SIZE_OF_I32, read_i32, read_slice};

use crate::{Backing, Bytes, DirtyTracker, Error, Result, check_destination, check_index};

/// Borrowed state of a fixed segment: where its elements sit in the parent buffer.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FixedSource<'a> {
    buf: &'a [u8],
    start: usize,
    len: usize,
    consumed: usize,
}

impl<'a> FixedSource<'a> {
    fn parse<T: Bytes>(buf: &'a [u8], start: usize) -> Result<Self> {
        let count = read_i32(buf, start)?;
        let len =
            usize::try_from(count).map_err(|_| Error::NegativeCount { offset: start, count })?;
        let consumed = len
            .checked_mul(T::SIZE)
            .and_then(|body| body.checked_add(SIZE_OF_I32))
            .filter(|consumed| start.checked_add(*consumed).is_some())
            .ok_or(rawbuf::Error::Overflow)?;
        Ok(Self {
            buf,
            start,
            len,
            consumed,
        })
    }

    #[inline]
    fn get<T: Bytes>(&self, index: usize) -> Result<T> {
        let offset = self.start + SIZE_OF_I32 + index * T::SIZE;
        T::from_bytes(read_slice(self.buf, offset, T::SIZE)?)
    }

    fn collect<T: Bytes>(&self) -> Result<Vec<T>> {
        (0..self.len).map(|i| self.get(i)).collect()
    }

    #[inline]
    fn raw(&self) -> Result<&'a [u8]> {
        Ok(read_slice(self.buf, self.start, self.consumed)?)
    }
}

/// List view over a region of fixed-width elements.
///
/// Reads go straight to the buffer until the first mutating call, which copies
/// every element into an owned `Vec<T>`, marks the tracker dirty, and drops the
/// buffer reference. From then on the segment behaves like a plain vec.
#[derive(Debug)]
pub struct FixedListSegment<'a, T> {
    tracker: DirtyTracker,
    backing: Backing<FixedSource<'a>, T>,
}

impl<'a, T> FixedListSegment<'a, T>
where
    T: Bytes,
{
    /// Opens the segment whose header sits at `start` in `buf`.
    ///
    /// Returns the segment and the number of bytes it occupies, so the caller can
    /// lay out whatever follows. Only the header is read here; element bytes are
    /// checked when first accessed.
    ///
    /// A negative count, including `-1`, is [`Error::NegativeCount`]: there is no
    /// encoding for an absent list.
    pub fn create(tracker: &DirtyTracker, buf: &'a [u8], start: usize) -> Result<(Self, usize)> {
        let source = FixedSource::parse::<T>(buf, start)?;
        let consumed = source.consumed;
        debug!(
            "Opened fixed segment at {start}: {} elements of {} bytes, {consumed} bytes total.",
            source.len,
            T::SIZE
        );
        Ok((
            Self {
                tracker: tracker.clone(),
                backing: Backing::Borrowed(source),
            },
            consumed,
        ))
    }

    #[inline]
    pub fn len(&self) -> usize {
        match &self.backing {
            Backing::Borrowed(source) => source.len,
            Backing::Owned(list) => list.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the first mutation has happened.
    #[inline(always)]
    pub fn is_promoted(&self) -> bool {
        self.backing.is_owned()
    }

    #[inline(always)]
    pub fn tracker(&self) -> &DirtyTracker {
        &self.tracker
    }

    pub fn get(&self, index: usize) -> Result<T> {
        check_index(index, self.len())?;
        match &self.backing {
            Backing::Borrowed(source) => source.get(index),
            Backing::Owned(list) => Ok(list[index].clone()),
        }
    }

    /// Position of the first element equal to `value`, `None` if absent.
    pub fn index_of(&self, value: &T) -> Result<Option<usize>>
    where
        T: PartialEq,
    {
        match &self.backing {
            Backing::Borrowed(source) => {
                for index in 0..source.len {
                    if source.get::<T>(index)? == *value {
                        return Ok(Some(index));
                    }
                }
                Ok(None)
            }
            Backing::Owned(list) => Ok(list.iter().position(|v| v == value)),
        }
    }

    #[inline]
    pub fn contains(&self, value: &T) -> Result<bool>
    where
        T: PartialEq,
    {
        Ok(self.index_of(value)?.is_some())
    }

    /// Copies every element into `dest[start..start + len]`.
    ///
    /// Slots outside that range are untouched. On error `dest` is left unmodified.
    pub fn copy_to(&self, dest: &mut [T], start: usize) -> Result<()> {
        let len = self.len();
        check_destination(start, len, dest.len())?;
        let target = &mut dest[start..start + len];
        match &self.backing {
            Backing::Borrowed(source) => {
                let values = source.collect::<T>()?;
                target.clone_from_slice(&values);
            }
            Backing::Owned(list) => target.clone_from_slice(list),
        }
        Ok(())
    }

    pub fn to_vec(&self) -> Result<Vec<T>> {
        match &self.backing {
            Backing::Borrowed(source) => source.collect(),
            Backing::Owned(list) => Ok(list.clone()),
        }
    }

    /// Iterates from index 0 over the current contents.
    #[inline]
    pub fn iter(&self) -> FixedListIter<'_, 'a, T> {
        FixedListIter::new(self)
    }

    pub fn set(&mut self, index: usize, value: T) -> Result<()> {
        check_index(index, self.len())?;
        self.owned_mut()?[index] = value;
        Ok(())
    }

    pub fn push(&mut self, value: T) -> Result<()> {
        self.owned_mut()?.push(value);
        Ok(())
    }

    /// Inserts at `index`, shifting later elements right. `index == len` appends.
    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        let len = self.len();
        if index > len {
            return Err(Error::IndexOutOfRange { index, len });
        }
        self.owned_mut()?.insert(index, value);
        Ok(())
    }

    /// Removes the first element equal to `value`. Returns whether one was found.
    pub fn remove(&mut self, value: &T) -> Result<bool>
    where
        T: PartialEq,
    {
        let list = self.owned_mut()?;
        Ok(match list.iter().position(|v| v == value) {
            Some(index) => {
                list.remove(index);
                true
            }
            None => false,
        })
    }

    /// Removes and returns the element at `index`, shifting later elements left.
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        check_index(index, self.len())?;
        Ok(self.owned_mut()?.remove(index))
    }

    pub fn clear(&mut self) {
        self.backing.replace_with(&self.tracker, Vec::new());
    }

    /// Serializes the current contents at `offset` in `buf`. Returns bytes written.
    ///
    /// An unpromoted segment copies its original bytes verbatim.
    pub fn write_to(&self, buf: &mut Vec<u8>, offset: usize) -> Result<usize> {
        match &self.backing {
            Backing::Borrowed(source) => Ok(rawbuf::write_slice(buf, offset, source.raw()?)),
            Backing::Owned(list) => write_fixed_list(buf, offset, list),
        }
    }

    fn owned_mut(&mut self) -> Result<&mut Vec<T>> {
        self.backing.promote(&self.tracker, |source| source.collect())
    }
}

impl<'s, 'a, T> IntoIterator for &'s FixedListSegment<'a, T>
where
    T: Bytes,
{
    type Item = Result<T>;
    type IntoIter = FixedListIter<'s, 'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
