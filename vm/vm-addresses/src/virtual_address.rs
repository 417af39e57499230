use crate::{AddressIndices, Geometry, PageNumber};
use core::fmt;

/// Virtual word address.
///
/// Carries the *kind* of address at the type level; it does not validate the
/// range on construction. Use [`is_valid`](Self::is_valid) to check it
/// against a geometry.
///
/// ### Semantics
/// - [`page_number`](Self::page_number) drops the in-page offset.
/// - [`offset`](Self::offset) keeps only the in-page offset.
/// - [`indices`](Self::indices) slices the address into per-level table
///   indices, most-significant first.
/// - [`from_parts`](Self::from_parts) is the inverse of the first two.
#[repr(transparent)]
#[derive(Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct VirtualAddress(u64);

impl VirtualAddress {
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

    /// Whether this address lies inside the virtual address space of `G`.
    #[inline]
    #[must_use]
    pub const fn is_valid<G: Geometry>(self) -> bool {
        self.0 < G::VIRTUAL_MEMORY_SIZE
    }

    /// The page containing this address.
    #[inline]
    #[must_use]
    pub const fn page_number<G: Geometry>(self) -> PageNumber {
        PageNumber::new(self.0 >> G::OFFSET_WIDTH)
    }

    /// The word offset within the page.
    #[inline]
    #[must_use]
    pub const fn offset<G: Geometry>(self) -> u64 {
        self.0 & G::OFFSET_MASK
    }

    #[inline]
    #[must_use]
    pub const fn indices<G: Geometry>(self) -> AddressIndices<G> {
        AddressIndices::new(self)
    }

    /// Join a page number and an in-page offset.
    #[inline]
    #[must_use]
    pub const fn from_parts<G: Geometry>(page: PageNumber, offset: u64) -> Self {
        debug_assert!(offset < G::PAGE_SIZE, "offset exceeds page size");
        Self((page.as_u64() << G::OFFSET_WIDTH) | (offset & G::OFFSET_MASK))
    }
}

impl fmt::Debug for VirtualAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VA(0x{:X})", self.0)
    }
}

impl fmt::Display for VirtualAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X}", self.0)
    }
}
