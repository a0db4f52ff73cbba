use log::debug;

use crate::{DirtyTracker, Result};

/// Where a segment's elements currently live.
///
/// Starts as `Borrowed` (answering reads from the serialized bytes) and switches
/// to `Owned` exactly once, on the first mutating call. There is no way back.
#[derive(Debug)]
pub(crate) enum Backing<B, T> {
    Borrowed(B),
    Owned(Vec<T>),
}

impl<B, T> Backing<B, T> {
    #[inline(always)]
    pub fn is_owned(&self) -> bool {
        matches!(self, Self::Owned(_))
    }

    /// Returns the owned list, materializing it from the borrowed source first if needed.
    ///
    /// On the borrowed-to-owned transition the source is dropped, so no reference into
    /// the original buffer survives, and `tracker` is marked dirty. If `materialize`
    /// fails the segment stays borrowed and the tracker is left alone.
    pub fn promote(
        &mut self,
        tracker: &DirtyTracker,
        materialize: impl FnOnce(&B) -> Result<Vec<T>>,
    ) -> Result<&mut Vec<T>> {
        if let Self::Borrowed(source) = self {
            let list = materialize(source)?;
            self.replace_with(tracker, list);
        }
        match self {
            Self::Owned(list) => Ok(list),
            Self::Borrowed(_) => unreachable!("segment promoted above"),
        }
    }

    /// Switches to (or overwrites) the owned list without reading the source.
    pub fn replace_with(&mut self, tracker: &DirtyTracker, list: Vec<T>) {
        if !self.is_owned() {
            debug!("Promoting segment to an owned list of {} elements.", list.len());
        }
        *self = Self::Owned(list);
        tracker.mark_dirty();
    }
}
