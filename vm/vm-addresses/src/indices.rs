use crate::{Geometry, PageNumber, VirtualAddress};
use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;

/// A virtual address sliced into `TABLES_DEPTH + 1` fields of `OFFSET_WIDTH`
/// bits each, most-significant first.
///
/// ```text
/// | table_index(0) | table_index(1) | ... | table_index(D-1) | offset |
/// ```
///
/// Fields are computed from the raw address on demand, so the value is just
/// the address plus a geometry marker.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct AddressIndices<G: Geometry> {
    address: VirtualAddress,
    _phantom: PhantomData<G>,
}

impl<G: Geometry> AddressIndices<G> {
    #[inline]
    #[must_use]
    pub const fn new(address: VirtualAddress) -> Self {
        Self {
            address,
            _phantom: PhantomData,
        }
    }

    /// Number of table levels, i.e. `TABLES_DEPTH`.
    #[inline]
    #[must_use]
    pub const fn levels(&self) -> u32 {
        G::TABLES_DEPTH
    }

    /// Index into the table at `level` (`0` is the root).
    #[inline]
    #[must_use]
    pub const fn table_index(&self, level: u32) -> u64 {
        debug_assert!(level < G::TABLES_DEPTH, "level out of range");
        let shift = G::OFFSET_WIDTH * (G::TABLES_DEPTH - level);
        (self.address.as_u64() >> shift) & G::OFFSET_MASK
    }

    /// Word offset within the data page.
    #[inline]
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.address.offset::<G>()
    }

    /// The concatenation of all table indices.
    #[inline]
    #[must_use]
    pub const fn page_number(&self) -> PageNumber {
        self.address.page_number::<G>()
    }

    /// Iterate the table indices from the root down.
    #[inline]
    #[must_use]
    pub const fn iter(&self) -> TableIndices<G> {
        TableIndices {
            indices: *self,
            level: 0,
        }
    }
}

impl<G: Geometry> fmt::Debug for AddressIndices<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        list.entries(self.iter());
        list.entry(&self.offset());
        list.finish()
    }
}

impl<G: Geometry> IntoIterator for AddressIndices<G> {
    type Item = u64;
    type IntoIter = TableIndices<G>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<G: Geometry> IntoIterator for &AddressIndices<G> {
    type Item = u64;
    type IntoIter = TableIndices<G>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the table indices of an [`AddressIndices`].
#[derive(Clone)]
pub struct TableIndices<G: Geometry> {
    indices: AddressIndices<G>,
    level: u32,
}

impl<G: Geometry> Iterator for TableIndices<G> {
    type Item = u64;

    fn next(&mut self) -> Option<Self::Item> {
        if self.level >= G::TABLES_DEPTH {
            return None;
        }
        let index = self.indices.table_index(self.level);
        self.level += 1;
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (G::TABLES_DEPTH - self.level) as usize;
        (remaining, Some(remaining))
    }
}

impl<G: Geometry> ExactSizeIterator for TableIndices<G> {}

impl<G: Geometry> FusedIterator for TableIndices<G> {}
