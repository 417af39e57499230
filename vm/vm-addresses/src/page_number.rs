use crate::{Geometry, VirtualAddress};
use core::fmt;

/// Number of a virtual page: a virtual address without its in-page offset.
///
/// In the page-table tree the page number doubles as the *path* from the root
/// to the leaf, one `OFFSET_WIDTH`-bit index per level.
#[repr(transparent)]
#[derive(Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct PageNumber(u64);

impl PageNumber {
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
    pub const fn is_valid<G: Geometry>(self) -> bool {
        self.0 < G::NUM_PAGES
    }

    /// Extend a path prefix by one table index.
    #[inline]
    #[must_use]
    pub const fn child<G: Geometry>(self, index: u64) -> Self {
        debug_assert!(index < G::PAGE_SIZE, "index exceeds table size");
        Self((self.0 << G::OFFSET_WIDTH) | index)
    }

    /// First virtual address of this page.
    #[inline]
    #[must_use]
    pub const fn base<G: Geometry>(self) -> VirtualAddress {
        VirtualAddress::from_parts::<G>(self, 0)
    }

    /// Shorter arc between two pages on the circular page space of size
    /// `NUM_PAGES`.
    ///
    /// ```rust
    /// # use vm_addresses::{CompactGeometry, PageNumber};
    /// let a = PageNumber::new(1);
    /// let b = PageNumber::new(255);
    /// assert_eq!(a.cyclic_distance::<CompactGeometry>(b), 2);
    /// assert_eq!(b.cyclic_distance::<CompactGeometry>(a), 2);
    /// ```
    #[inline]
    #[must_use]
    pub const fn cyclic_distance<G: Geometry>(self, other: Self) -> u64 {
        let d = self.0.abs_diff(other.0);
        let wrapped = G::NUM_PAGES - d;
        if d < wrapped { d } else { wrapped }
    }
}

impl fmt::Debug for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Page(0x{:X})", self.0)
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page 0x{:X}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CompactGeometry;

    fn distance(a: u64, b: u64) -> u64 {
        PageNumber::new(a).cyclic_distance::<CompactGeometry>(PageNumber::new(b))
    }

    #[test]
    fn distance_to_self_is_zero() {
        assert_eq!(distance(0, 0), 0);
        assert_eq!(distance(200, 200), 0);
    }

    #[test]
    fn short_arc_is_chosen() {
        assert_eq!(distance(4, 0), 4);
        assert_eq!(distance(0, 250), 6);
        assert_eq!(distance(10, 200), 66);
    }

    #[test]
    fn antipodal_pages_are_farthest() {
        assert_eq!(distance(0, 128), 128);
        assert_eq!(distance(64, 192), 128);
        for b in 0..256 {
            assert!(distance(0, b) <= 128);
        }
    }

    #[test]
    fn distance_is_symmetric() {
        for (a, b) in [(3, 190), (0, 255), (17, 18), (100, 7)] {
            assert_eq!(distance(a, b), distance(b, a));
        }
    }

    #[test]
    fn child_appends_an_index() {
        let root = PageNumber::new(0);
        let p = root.child::<CompactGeometry>(3).child::<CompactGeometry>(7);
        assert_eq!(p, PageNumber::new(0x37));
        assert_eq!(p.base::<CompactGeometry>(), VirtualAddress::new(0x370));
    }
}
