use std::cell::OnceCell;

use log::trace;

use crate::Result;

/// Per-index memo of decoded elements for an unpromoted variable segment.
///
/// Slots are allocated on the first read and filled one index at a time. The
/// bytes behind an unpromoted segment never change, so a filled slot is never
/// invalidated; the whole cache is dropped on promotion.
///
/// One slot per index rather than a map: `OnceCell` slots hand out references that
/// stay valid while other indices are filled. Memory is bounded by the table size.
#[derive(Debug)]
pub(crate) struct DecodeCache<T> {
    len: usize,
    slots: OnceCell<Box<[OnceCell<Option<T>>]>>,
}

impl<T> DecodeCache<T> {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            slots: OnceCell::new(),
        }
    }

    /// Returns the cached value at `index`, running `decode` once if the slot is empty.
    ///
    /// A failed decode leaves the slot empty, so the next read retries and fails the
    /// same way.
    pub fn get_or_try_insert(
        &self,
        index: usize,
        decode: impl FnOnce() -> Result<Option<T>>,
    ) -> Result<Option<&T>> {
        let slots = self
            .slots
            .get_or_init(|| (0..self.len).map(|_| OnceCell::new()).collect());
        let slot = &slots[index];
        if let Some(value) = slot.get() {
            return Ok(value.as_ref());
        }
        let value = decode()?;
        trace!("Cached decode of element {index}.");
        Ok(slot.get_or_init(|| value).as_ref())
    }

    /// Number of indices decoded so far.
    pub fn filled(&self) -> usize {
        self.slots
            .get()
            .map_or(0, |slots| slots.iter().filter(|slot| slot.get().is_some()).count())
    }
}
