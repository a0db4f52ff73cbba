//! List segment over elements of varying width, nulls included.
//!
//! ```text
//! +------------+---------------------------+---------------------------------+
//! | count: i32 | offset table [i32; count] | payloads                        |
//! |            | NULL_OFFSET or rel. start | (len: i32, [u8; len]) per value |
//! +------------+---------------------------+---------------------------------+
//! ```
//!
//! Offsets are relative to the segment's own start, so a segment's bytes can
//! be copied elsewhere unchanged. Null entries have no payload.

mod cache;
mod format;
mod iterator;

use cache::*;
pub use format::*;
pub use iterator::*;

use log::debug;
use rawbuf::{SIZE_OF_I32, block_len, read_block, read_i32, read_slice};

use crate::{Backing, DirtyTracker, Error, Result, VarBytes, check_destination, check_index};

/// Offset table entry marking a null element. Every valid offset is non-negative.
pub const NULL_OFFSET: i32 = -1;

/// Borrowed state of a variable segment, with its decode cache.
#[derive(Debug)]
pub(crate) struct VariableSource<'a, T> {
    buf: &'a [u8],
    start: usize,
    len: usize,
    consumed: usize,
    cache: DecodeCache<T>,
}

impl<'a, T> VariableSource<'a, T>
where
    T: VarBytes,
{
    fn parse(buf: &'a [u8], start: usize) -> Result<Self> {
        let count = read_i32(buf, start)?;
        let len =
            usize::try_from(count).map_err(|_| Error::NegativeCount { offset: start, count })?;
        let table_end = len
            .checked_mul(SIZE_OF_I32)
            .and_then(|table| table.checked_add(SIZE_OF_I32))
            .filter(|table_end| start.checked_add(*table_end).is_some())
            .ok_or(rawbuf::Error::Overflow)?;

        let mut this = Self {
            buf,
            start,
            len,
            consumed: table_end,
            cache: DecodeCache::new(len),
        };

        // Entries that are not valid offsets cannot extend the footprint; they are
        // reported by `decode` when that element is first read.
        let mut furthest = None;
        for index in 0..len {
            match this.entry(index) {
                Ok(Some(offset)) => furthest = furthest.max(Some(offset)),
                Ok(None) | Err(Error::InvalidOffset { .. }) => {}
                Err(e) => return Err(e),
            }
        }
        if let Some(offset) = furthest {
            let payload_end = offset + block_len(buf, this.payload_pos(offset)?)?;
            this.consumed = this.consumed.max(payload_end);
        }

        Ok(this)
    }

    /// Reads the offset table entry for `index`: `None` for null, else the
    /// payload offset relative to `start`.
    fn entry(&self, index: usize) -> Result<Option<usize>> {
        let raw = read_i32(self.buf, self.start + SIZE_OF_I32 * (index + 1))?;
        if raw == NULL_OFFSET {
            return Ok(None);
        }
        let table_end = SIZE_OF_I32 * (self.len + 1);
        match usize::try_from(raw) {
            Ok(offset) if offset >= table_end => Ok(Some(offset)),
            _ => Err(Error::InvalidOffset { index, offset: raw }),
        }
    }

    #[inline]
    fn payload_pos(&self, offset: usize) -> Result<usize> {
        Ok(self.start.checked_add(offset).ok_or(rawbuf::Error::Overflow)?)
    }

    fn decode(&self, index: usize) -> Result<Option<T>> {
        match self.entry(index)? {
            None => Ok(None),
            Some(offset) => {
                let bytes = read_block(self.buf, self.payload_pos(offset)?)?;
                Ok(Some(T::from_bytes(bytes)?))
            }
        }
    }

    #[inline]
    fn get(&self, index: usize) -> Result<Option<&T>> {
        self.cache.get_or_try_insert(index, || self.decode(index))
    }

    /// Clones every element out, reusing whatever is already cached.
    fn collect(&self) -> Result<Vec<Option<T>>> {
        (0..self.len)
            .map(|index| Ok(self.get(index)?.cloned()))
            .collect()
    }

    #[inline]
    fn raw(&self) -> Result<&'a [u8]> {
        Ok(read_slice(self.buf, self.start, self.consumed)?)
    }
}

/// List view over a region of variable-width, nullable elements.
///
/// Before the first mutation, `get` decodes on demand and memoizes the result per
/// index, so repeated reads return the same instance. The first mutating call
/// materializes every element into an owned `Vec<Option<T>>`, drops the cache and
/// the buffer reference, and marks the tracker dirty.
#[derive(Debug)]
pub struct VariableListSegment<'a, T> {
    tracker: DirtyTracker,
    backing: Backing<VariableSource<'a, T>, Option<T>>,
}

impl<'a, T> VariableListSegment<'a, T>
where
    T: VarBytes,
{
    /// Opens the segment whose header sits at `start` in `buf`.
    ///
    /// Reads the count and the offset table, plus the length prefix of the furthest
    /// payload, to report how many bytes the segment occupies. Payloads and invalid
    /// offset entries are only reported when that element is first read.
    ///
    /// A negative count, including `-1`, is [`Error::NegativeCount`]: there is no
    /// encoding for an absent list.
    pub fn create(tracker: &DirtyTracker, buf: &'a [u8], start: usize) -> Result<(Self, usize)> {
        let source = VariableSource::parse(buf, start)?;
        let consumed = source.consumed;
        debug!(
            "Opened variable segment at {start}: {} elements, {consumed} bytes total.",
            source.len
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

    /// Number of elements decoded and cached so far. Always 0 once promoted.
    pub fn decoded_len(&self) -> usize {
        match &self.backing {
            Backing::Borrowed(source) => source.cache.filled(),
            Backing::Owned(_) => 0,
        }
    }

    /// Returns element `index`, `None` for a null element.
    pub fn get(&self, index: usize) -> Result<Option<&T>> {
        check_index(index, self.len())?;
        match &self.backing {
            Backing::Borrowed(source) => source.get(index),
            Backing::Owned(list) => Ok(list[index].as_ref()),
        }
    }

    /// Position of the first element equal to `value` (`None` matches a null element).
    pub fn index_of(&self, value: Option<&T>) -> Result<Option<usize>>
    where
        T: PartialEq,
    {
        match &self.backing {
            Backing::Borrowed(source) => {
                for index in 0..source.len {
                    if source.get(index)? == value {
                        return Ok(Some(index));
                    }
                }
                Ok(None)
            }
            Backing::Owned(list) => Ok(list.iter().position(|v| v.as_ref() == value)),
        }
    }

    #[inline]
    pub fn contains(&self, value: Option<&T>) -> Result<bool>
    where
        T: PartialEq,
    {
        Ok(self.index_of(value)?.is_some())
    }

    /// Copies every element into `dest[start..start + len]`, nulls as `None`.
    ///
    /// Slots outside that range are untouched. On error `dest` is left unmodified.
    pub fn copy_to(&self, dest: &mut [Option<T>], start: usize) -> Result<()> {
        let len = self.len();
        check_destination(start, len, dest.len())?;
        let target = &mut dest[start..start + len];
        match &self.backing {
            Backing::Borrowed(source) => {
                let values = source.collect()?;
                target.clone_from_slice(&values);
            }
            Backing::Owned(list) => target.clone_from_slice(list),
        }
        Ok(())
    }

    pub fn to_vec(&self) -> Result<Vec<Option<T>>> {
        match &self.backing {
            Backing::Borrowed(source) => source.collect(),
            Backing::Owned(list) => Ok(list.clone()),
        }
    }

    /// Iterates from index 0 over the current contents.
    #[inline]
    pub fn iter(&self) -> VariableListIter<'_, 'a, T> {
        VariableListIter::new(self)
    }

    pub fn set(&mut self, index: usize, value: Option<T>) -> Result<()> {
        check_index(index, self.len())?;
        self.owned_mut()?[index] = value;
        Ok(())
    }

    pub fn push(&mut self, value: Option<T>) -> Result<()> {
        self.owned_mut()?.push(value);
        Ok(())
    }

    /// Inserts at `index`, shifting later elements right. `index == len` appends.
    pub fn insert(&mut self, index: usize, value: Option<T>) -> Result<()> {
        let len = self.len();
        if index > len {
            return Err(Error::IndexOutOfRange { index, len });
        }
        self.owned_mut()?.insert(index, value);
        Ok(())
    }

    /// Removes the first element equal to `value`. Returns whether one was found.
    pub fn remove(&mut self, value: Option<&T>) -> Result<bool>
    where
        T: PartialEq,
    {
        let list = self.owned_mut()?;
        Ok(match list.iter().position(|v| v.as_ref() == value) {
            Some(index) => {
                list.remove(index);
                true
            }
            None => false,
        })
    }

    /// Removes and returns the element at `index`, shifting later elements left.
    pub fn remove_at(&mut self, index: usize) -> Result<Option<T>> {
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
            Backing::Owned(list) => write_variable_list(buf, offset, list),
        }
    }

    fn owned_mut(&mut self) -> Result<&mut Vec<Option<T>>> {
        self.backing.promote(&self.tracker, |source| source.collect())
    }
}

impl<'s, 'a, T> IntoIterator for &'s VariableListSegment<'a, T>
where
    T: VarBytes,
{
    type Item = Result<Option<&'s T>>;
    type IntoIter = VariableListIter<'s, 'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
