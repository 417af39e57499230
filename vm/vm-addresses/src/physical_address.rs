use crate::{FrameIndex, Geometry};
use core::fmt;

/// Physical word address: `frame * PAGE_SIZE + offset`.
///
/// Built from a [`FrameIndex`] via [`FrameIndex::entry`]; split back with
/// [`frame`](Self::frame) and [`offset`](Self::offset).
#[repr(transparent)]
#[derive(Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct PhysicalAddress(u64);

impl PhysicalAddress {
    #[inline]
    #[must_use]
    pub const fn new(v: u64) -> Self {
        Self(v)
    }

    #[inline]
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// The address as an index into a word slice.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }

    #[inline]
    #[must_use]
    pub const fn is_valid<G: Geometry>(self) -> bool {
        self.0 < G::RAM_SIZE
    }

    #[inline]
    #[must_use]
    pub const fn frame<G: Geometry>(self) -> FrameIndex {
        FrameIndex::new(self.0 >> G::OFFSET_WIDTH)
    }

    #[inline]
    #[must_use]
    pub const fn offset<G: Geometry>(self) -> u64 {
        self.0 & G::OFFSET_MASK
    }
}

impl fmt::Debug for PhysicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PA(0x{:X})", self.0)
    }
}

impl fmt::Display for PhysicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X}", self.0)
    }
}
