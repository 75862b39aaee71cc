use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

use tracing::{trace, warn};

use super::{PlaybackHandle, StreamIndex};

type Slot = Option<Weak<dyn PlaybackHandle>>;

/// Sparse mapping from stream index to a non-owning playback handle.
///
/// Controllers fill their slot on mount and clear it on unmount. A slot
/// whose weak reference no longer upgrades is treated exactly like an empty
/// one. Cloning shares the same slots.
#[derive(Clone)]
pub struct HandleSlots {
    slots: Arc<RwLock<Vec<Slot>>>,
}

impl HandleSlots {
    /// Create `len` empty slots, one per configured stream.
    pub fn with_len(len: usize) -> Self {
        Self {
            slots: Arc::new(RwLock::new(vec![None; len])),
        }
    }

    /// Number of slots, equal to the number of configured streams.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether the wall has no streams at all.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Store a weak reference to `handle` in slot `index`.
    ///
    /// Out-of-range indices are logged and ignored; the slot count is fixed.
    pub fn attach<H: PlaybackHandle + 'static>(&self, index: StreamIndex, handle: &Arc<H>) {
        let weak: Weak<H> = Arc::downgrade(handle);
        let weak: Weak<dyn PlaybackHandle> = weak;
        let mut slots = self.write();

        match slots.get_mut(index.get()) {
            Some(slot) => {
                *slot = Some(weak);
                trace!(%index, "handle attached");
            }
            None => warn!(%index, len = slots.len(), "attach to unknown slot ignored"),
        }
    }

    /// Empty slot `index`.
    pub fn detach(&self, index: StreamIndex) {
        if let Some(slot) = self.write().get_mut(index.get()) {
            *slot = None;
            trace!(%index, "handle detached");
        }
    }

    /// Upgrade slot `index`, if it holds a live handle.
    pub fn get(&self, index: StreamIndex) -> Option<Arc<dyn PlaybackHandle>> {
        self.read()
            .get(index.get())
            .and_then(|slot| slot.as_ref())
            .and_then(Weak::upgrade)
    }

    /// Upgrade every slot in index order. Absent handles are `None`.
    pub fn snapshot(&self) -> Vec<Option<Arc<dyn PlaybackHandle>>> {
        self.read()
            .iter()
            .map(|slot| slot.as_ref().and_then(Weak::upgrade))
            .collect()
    }

    /// Number of slots currently holding a live handle.
    pub fn present_count(&self) -> usize {
        self.snapshot().iter().filter(|h| h.is_some()).count()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Slot>> {
        self.slots.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Slot>> {
        self.slots.write().unwrap_or_else(PoisonError::into_inner)
    }
}
