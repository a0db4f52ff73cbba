use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use log::trace;

/// Dirty flag shared by every segment carved out of one parent buffer.
///
/// Wraps `Arc<AtomicBool>` so clones observe the same flag: a segment keeps a
/// clone of its parent's tracker and marks it on promotion, telling the parent
/// that its original bytes no longer describe the current contents.
///
/// The flag is monotonic. Once dirty, it stays dirty for the lifetime of the
/// tracker; a parent that re-serializes everything starts over with a new one.
#[derive(Debug, Clone, Default)]
pub struct DirtyTracker(Arc<TrackerInner>);

#[derive(Debug, Default)]
struct TrackerInner {
    dirty: AtomicBool,
    parent: Option<DirtyTracker>,
}

impl DirtyTracker {
    /// Creates a new clean tracker with no parent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a clean tracker for a nested structure.
    ///
    /// Marking the child dirty also marks `self` (and its ancestors). Marking
    /// `self` leaves the child untouched.
    pub fn child(&self) -> Self {
        Self(Arc::new(TrackerInner {
            dirty: AtomicBool::new(false),
            parent: Some(self.clone()),
        }))
    }

    /// Marks this tracker, and every ancestor, dirty. Idempotent.
    #[inline]
    pub fn mark_dirty(&self) {
        let mut current = Some(self);
        while let Some(tracker) = current {
            if tracker.0.dirty.swap(true, Ordering::SeqCst) {
                // Ancestors were marked when this one was.
                return;
            }
            trace!("Tracker marked dirty.");
            current = tracker.0.parent.as_ref();
        }
    }

    #[inline(always)]
    pub fn is_dirty(&self) -> bool {
        self.0.dirty.load(Ordering::SeqCst)
    }

    /// True if both handles point at the same flag.
    #[inline]
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_flag() {
        let tracker = DirtyTracker::new();
        let alias = tracker.clone();
        assert!(!tracker.is_dirty());
        alias.mark_dirty();
        assert!(tracker.is_dirty());
        assert!(tracker.same_as(&alias));
    }

    #[test]
    fn test_child_propagates_up_only() {
        let root = DirtyTracker::new();
        let child = root.child();
        let grandchild = child.child();

        root.mark_dirty();
        assert!(!child.is_dirty());

        let root = DirtyTracker::new();
        let child = root.child();
        let grandchild_of_clean = child.child();
        grandchild_of_clean.mark_dirty();
        assert!(child.is_dirty());
        assert!(root.is_dirty());
        assert!(!grandchild.is_dirty());
    }
}
