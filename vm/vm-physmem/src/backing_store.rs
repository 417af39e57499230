use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use vm_addresses::{PageNumber, Word};

/// Swap area: page images keyed by the page number they were evicted under.
///
/// Each image is exactly one page long. Restoring a page *takes* its image
/// out of the store, so a page lives either in a frame or in the store, never
/// in both.
#[derive(Debug, Default, Clone)]
pub struct BackingStore {
    pages: BTreeMap<PageNumber, Box<[Word]>>,
}

impl BackingStore {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pages: BTreeMap::new(),
        }
    }

    /// Store `image` under `page`, returning the image it replaced, if any.
    pub fn store(&mut self, page: PageNumber, image: Box<[Word]>) -> Option<Box<[Word]>> {
        self.pages.insert(page, image)
    }

    /// Remove and return the image of `page`.
    pub fn take(&mut self, page: PageNumber) -> Option<Box<[Word]>> {
        self.pages.remove(&page)
    }

    #[must_use]
    pub fn get(&self, page: PageNumber) -> Option<&[Word]> {
        self.pages.get(&page).map(AsRef::as_ref)
    }

    #[must_use]
    pub fn contains(&self, page: PageNumber) -> bool {
        self.pages.contains_key(&page)
    }

    /// Swapped-out pages in ascending order.
    pub fn pages(&self) -> impl Iterator<Item = PageNumber> + '_ {
        self.pages.keys().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
