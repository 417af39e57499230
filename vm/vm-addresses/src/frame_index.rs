use crate::{Geometry, PhysicalAddress, Word};
use core::fmt;

/// Index of a physical frame.
///
/// Frame `0` is the permanent root table. Because nothing can point *to* the
/// root, a page-table entry of `0` unambiguously means "no child"; see
/// [`from_entry`](Self::from_entry).
#[repr(transparent)]
#[derive(Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct FrameIndex(u64);

impl FrameIndex {
    /// The root table.
    pub const ROOT: Self = Self(0);

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

    #[inline]
    #[must_use]
    pub const fn is_root(self) -> bool {
        self.0 == 0
    }

    #[inline]
    #[must_use]
    pub const fn is_valid<G: Geometry>(self) -> bool {
        self.0 < G::NUM_FRAMES
    }

    /// The frame after this one.
    #[inline]
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Physical address of the first word of this frame.
    #[inline]
    #[must_use]
    pub const fn base<G: Geometry>(self) -> PhysicalAddress {
        PhysicalAddress::new(self.0 * G::PAGE_SIZE)
    }

    /// Physical address of word `offset` of this frame.
    #[inline]
    #[must_use]
    pub const fn entry<G: Geometry>(self, offset: u64) -> PhysicalAddress {
        debug_assert!(offset < G::PAGE_SIZE, "offset exceeds page size");
        PhysicalAddress::new(self.0 * G::PAGE_SIZE + offset)
    }

    /// Decode a page-table entry: `0` is the sentinel for "no child".
    ///
    /// Negative words never name a frame and decode to `None` as well.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub const fn from_entry(word: Word) -> Option<Self> {
        if word > 0 {
            Some(Self(word as u64))
        } else {
            None
        }
    }

    /// Encode as a page-table entry.
    ///
    /// Well-dimensioned geometries guarantee every frame index fits a [`Word`].
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub const fn to_entry(self) -> Word {
        self.0 as Word
    }
}

impl fmt::Debug for FrameIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame({})", self.0)
    }
}

impl fmt::Display for FrameIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frame {}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CompactGeometry;

    #[test]
    fn zero_entry_is_no_child() {
        assert_eq!(FrameIndex::from_entry(0), None);
        assert_eq!(FrameIndex::from_entry(-3), None);
        assert_eq!(FrameIndex::from_entry(5), Some(FrameIndex::new(5)));
    }

    #[test]
    fn entry_encoding_round_trips() {
        let f = FrameIndex::new(4);
        assert_eq!(FrameIndex::from_entry(f.to_entry()), Some(f));
    }

    #[test]
    fn entry_addresses() {
        let f = FrameIndex::new(3);
        assert_eq!(f.base::<CompactGeometry>(), PhysicalAddress::new(48));
        assert_eq!(f.entry::<CompactGeometry>(13), PhysicalAddress::new(61));
        assert!(f.is_valid::<CompactGeometry>());
        assert!(!FrameIndex::new(6).is_valid::<CompactGeometry>());
    }

    #[test]
    fn root_is_frame_zero() {
        assert!(FrameIndex::ROOT.is_root());
        assert!(!FrameIndex::ROOT.next().is_root());
    }
}
