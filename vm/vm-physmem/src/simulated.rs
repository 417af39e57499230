use crate::{BackingStore, DeviceEvent, DeviceStats, PhysicalMemory};
use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::cell::Cell;
use core::marker::PhantomData;
use core::ops::Range;
use log::{trace, warn};
use vm_addresses::{FrameIndex, Geometry, PageNumber, PhysicalAddress, Word};

/// Errors reported by the inspection API of [`SimulatedMemory`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeviceError {
    #[error("{frame} is outside of physical memory ({frames} frames)")]
    FrameOutOfRange { frame: FrameIndex, frames: u64 },
}

/// In-memory [`PhysicalMemory`] for geometry `G`.
///
/// RAM starts zeroed. Out-of-range addresses passed through the device
/// interface panic like an out-of-bounds slice index.
pub struct SimulatedMemory<G: Geometry> {
    ram: Vec<Word>,
    store: BackingStore,
    stats: Cell<DeviceStats>,
    journal: Option<Vec<DeviceEvent>>,
    _phantom: PhantomData<G>,
}

impl<G: Geometry> SimulatedMemory<G> {
    /// Zeroed RAM, empty backing store, journaling disabled.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn new() -> Self {
        Self {
            ram: vec![0; G::RAM_SIZE as usize],
            store: BackingStore::new(),
            stats: Cell::new(DeviceStats::default()),
            journal: None,
            _phantom: PhantomData,
        }
    }

    /// Record every eviction and restore as a [`DeviceEvent`].
    #[must_use]
    pub fn with_journal(mut self) -> Self {
        self.journal = Some(Vec::new());
        self
    }

    /// Borrow the words of `frame`.
    ///
    /// # Errors
    /// [`DeviceError::FrameOutOfRange`] if `frame >= NUM_FRAMES`.
    pub fn frame(&self, frame: FrameIndex) -> Result<&[Word], DeviceError> {
        if !frame.is_valid::<G>() {
            return Err(DeviceError::FrameOutOfRange {
                frame,
                frames: G::NUM_FRAMES,
            });
        }
        Ok(&self.ram[Self::frame_range(frame)])
    }

    /// The whole of RAM.
    #[must_use]
    pub fn ram(&self) -> &[Word] {
        &self.ram
    }

    #[must_use]
    pub const fn backing_store(&self) -> &BackingStore {
        &self.store
    }

    /// The swapped-out image of `page`, if it is currently in the store.
    #[must_use]
    pub fn swapped(&self, page: PageNumber) -> Option<&[Word]> {
        self.store.get(page)
    }

    /// Pages currently held in the backing store, ascending.
    pub fn swapped_pages(&self) -> impl Iterator<Item = PageNumber> + '_ {
        self.store.pages()
    }

    #[must_use]
    pub const fn stats(&self) -> DeviceStats {
        self.stats.get()
    }

    pub fn reset_stats(&self) {
        self.stats.set(DeviceStats::default());
    }

    /// Journaled events so far; empty when journaling is disabled.
    #[must_use]
    pub fn events(&self) -> &[DeviceEvent] {
        self.journal.as_deref().unwrap_or_default()
    }

    /// Drain the journal.
    pub fn take_events(&mut self) -> Vec<DeviceEvent> {
        self.journal.as_mut().map(core::mem::take).unwrap_or_default()
    }

    #[allow(clippy::cast_possible_truncation)]
    const fn frame_range(frame: FrameIndex) -> Range<usize> {
        let start = frame.base::<G>().as_usize();
        start..start + G::PAGE_SIZE as usize
    }

    fn bump(&self, update: impl FnOnce(&mut DeviceStats)) {
        let mut stats = self.stats.get();
        update(&mut stats);
        self.stats.set(stats);
    }

    fn record(&mut self, event: DeviceEvent) {
        if let Some(journal) = self.journal.as_mut() {
            journal.push(event);
        }
    }
}

impl<G: Geometry> Default for SimulatedMemory<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Geometry> PhysicalMemory for SimulatedMemory<G> {
    type Geometry = G;

    #[inline]
    fn read(&self, address: PhysicalAddress) -> Word {
        self.bump(|s| s.reads += 1);
        self.ram[address.as_usize()]
    }

    #[inline]
    fn write(&mut self, address: PhysicalAddress, value: Word) {
        self.bump(|s| s.writes += 1);
        self.ram[address.as_usize()] = value;
    }

    fn evict(&mut self, frame: FrameIndex, page: PageNumber) {
        debug_assert!(page.is_valid::<G>(), "{page} outside of virtual memory");
        trace!("evict {page} from {frame}");
        self.bump(|s| s.evictions += 1);

        let image: Box<[Word]> = self.ram[Self::frame_range(frame)].into();
        if self.store.store(page, image).is_some() {
            warn!("{page} was evicted again without being restored");
        }
        self.record(DeviceEvent::Evicted { frame, page });
    }

    fn restore(&mut self, frame: FrameIndex, page: PageNumber) {
        debug_assert!(page.is_valid::<G>(), "{page} outside of virtual memory");
        self.bump(|s| s.restores += 1);

        let range = Self::frame_range(frame);
        let from_store = if let Some(image) = self.store.take(page) {
            self.ram[range].copy_from_slice(&image);
            true
        } else {
            self.ram[range].fill(0);
            false
        };
        trace!("restore {page} into {frame} (from store: {from_store})");
        self.record(DeviceEvent::Restored {
            frame,
            page,
            from_store,
        });
    }
}
