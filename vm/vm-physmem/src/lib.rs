//! # Physical Memory Device
//!
//! The word-addressable "hardware" underneath the pager, and a simulated
//! implementation of it.
//!
//! ## Device interface
//!
//! The pager only ever talks to physical memory through [`PhysicalMemory`]:
//!
//! | Method | Effect |
//! |:-------|:-------|
//! | [`read`](PhysicalMemory::read) | read one word of RAM |
//! | [`write`](PhysicalMemory::write) | write one word of RAM |
//! | [`evict`](PhysicalMemory::evict) | copy a frame to the backing store under a page number |
//! | [`restore`](PhysicalMemory::restore) | copy a page from the backing store into a frame, zero-filling pages that were never evicted |
//!
//! The device carries its [`Geometry`] as an associated type so a pager and
//! a device built for different address-space layouts cannot be combined.
//!
//! ## Simulation
//!
//! [`SimulatedMemory`] keeps RAM in a heap vector and swapped-out pages in a
//! [`BackingStore`]. It counts every device operation ([`DeviceStats`]) and
//! can optionally journal evictions and restores ([`DeviceEvent`]) so tests
//! can check which pages the replacement policy picked.
//!
//! ```rust
//! use vm_addresses::{CompactGeometry, FrameIndex, PageNumber};
//! use vm_physmem::{PhysicalMemory, SimulatedMemory};
//!
//! let mut pm = SimulatedMemory::<CompactGeometry>::new();
//! let frame = FrameIndex::new(2);
//! pm.write(frame.entry::<CompactGeometry>(3), 42);
//!
//! pm.evict(frame, PageNumber::new(7));
//! pm.clear_frame(frame);
//! pm.restore(FrameIndex::new(4), PageNumber::new(7));
//!
//! assert_eq!(pm.read(FrameIndex::new(4).entry::<CompactGeometry>(3)), 42);
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]

extern crate alloc;

mod backing_store;
mod simulated;
mod stats;

pub use crate::backing_store::BackingStore;
pub use crate::simulated::{DeviceError, SimulatedMemory};
pub use crate::stats::{DeviceEvent, DeviceStats};

use vm_addresses::{FrameIndex, Geometry, PageNumber, PhysicalAddress, Word};

/// Word-addressable physical memory with a page-granular backing store.
///
/// Addresses passed to the device are always inside
/// `[0, NUM_FRAMES * PAGE_SIZE)` and frames inside `[0, NUM_FRAMES)`;
/// implementations may panic otherwise.
pub trait PhysicalMemory {
    /// Address-space layout this device was built for.
    type Geometry: Geometry;

    /// Read one word.
    fn read(&self, address: PhysicalAddress) -> Word;

    /// Write one word.
    fn write(&mut self, address: PhysicalAddress, value: Word);

    /// Copy the contents of `frame` to the backing store under `page`.
    fn evict(&mut self, frame: FrameIndex, page: PageNumber);

    /// Copy the backing-store contents of `page` into `frame`.
    ///
    /// A page that was never evicted restores as all zeros.
    fn restore(&mut self, frame: FrameIndex, page: PageNumber);

    /// Zero every word of `frame`.
    fn clear_frame(&mut self, frame: FrameIndex) {
        for offset in 0..<Self::Geometry as Geometry>::PAGE_SIZE {
            self.write(frame.entry::<Self::Geometry>(offset), 0);
        }
    }
}
