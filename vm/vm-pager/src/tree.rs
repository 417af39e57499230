use alloc::vec::Vec;
use vm_addresses::{FrameIndex, Geometry, PageNumber};
use vm_physmem::PhysicalMemory;

/// Every resident page with the frame that holds it, in ascending page order.
#[must_use]
pub fn resident_pages<G, M>(memory: &M) -> Vec<(PageNumber, FrameIndex)>
where
    G: Geometry,
    M: PhysicalMemory<Geometry = G>,
{
    let mut pages = Vec::new();
    collect(memory, FrameIndex::ROOT, 0, PageNumber::new(0), &mut pages);
    pages
}

fn collect<G, M>(
    memory: &M,
    frame: FrameIndex,
    depth: u32,
    path: PageNumber,
    pages: &mut Vec<(PageNumber, FrameIndex)>,
) where
    G: Geometry,
    M: PhysicalMemory<Geometry = G>,
{
    if depth == G::TABLES_DEPTH {
        pages.push((path, frame));
        return;
    }
    for offset in 0..G::PAGE_SIZE {
        if let Some(child) = FrameIndex::from_entry(memory.read(frame.entry::<G>(offset))) {
            collect(memory, child, depth + 1, path.child::<G>(offset), pages);
        }
    }
}
