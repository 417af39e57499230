//! # Address Resolution
//!
//! Walks the table tree from the root towards the word a virtual address
//! names. [`resolve`] fills in missing tables and pages on the way,
//! [`lookup`] only follows what is already there.

use crate::allocator::{Allocation, allocate_frame};
use crate::error::FaultError;
use crate::scan::scan;
use crate::stats::FaultStats;
use log::{debug, trace};
use vm_addresses::{FrameIndex, Geometry, PageNumber, PhysicalAddress, VirtualAddress};
use vm_physmem::PhysicalMemory;

/// Physical address of the word named by `address`, faulting in every
/// missing table and the data page itself.
///
/// `address` must be inside the virtual address space.
///
/// # Errors
/// Propagates [`FaultError`] from the frame allocator.
pub fn resolve<G, M>(
    memory: &mut M,
    address: VirtualAddress,
    stats: &mut FaultStats,
) -> Result<PhysicalAddress, FaultError>
where
    G: Geometry,
    M: PhysicalMemory<Geometry = G>,
{
    debug_assert!(address.is_valid::<G>(), "{address} outside of virtual memory");
    let indices = address.indices::<G>();
    let page = indices.page_number();

    let mut current = FrameIndex::ROOT;
    for (level, index) in (0_u32..).zip(indices.iter()) {
        let edge = current.entry::<G>(index);
        current = if let Some(child) = FrameIndex::from_entry(memory.read(edge)) {
            child
        } else {
            let child = handle_fault(memory, current, level, page, stats)?;
            memory.write(edge, child.to_entry());
            child
        };
        debug_assert!(current.is_valid::<G>(), "{edge:?} decodes to {current}");
    }

    Ok(current.entry::<G>(indices.offset()))
}

/// Physical address of the word named by `address` if its page is resident.
///
/// Never faults and never writes to the device.
#[must_use]
pub fn lookup<G, M>(memory: &M, address: VirtualAddress) -> Option<PhysicalAddress>
where
    G: Geometry,
    M: PhysicalMemory<Geometry = G>,
{
    if !address.is_valid::<G>() {
        return None;
    }
    let indices = address.indices::<G>();
    let mut current = FrameIndex::ROOT;
    for index in &indices {
        current = FrameIndex::from_entry(memory.read(current.entry::<G>(index)))?;
    }
    Some(current.entry::<G>(indices.offset()))
}

/// Supply the missing child of `parent` at `level` and prepare it for its
/// role: a zeroed table above the last level, the restored `page` at it.
fn handle_fault<G, M>(
    memory: &mut M,
    parent: FrameIndex,
    level: u32,
    page: PageNumber,
    stats: &mut FaultStats,
) -> Result<FrameIndex, FaultError>
where
    G: Geometry,
    M: PhysicalMemory<Geometry = G>,
{
    let summary = scan(memory, page, parent);
    trace!("fault on {page} at level {level}: {summary:?}");

    let allocation = allocate_frame(memory, &summary, parent, page)?;
    stats.record(&allocation);

    let frame = allocation.frame();
    if level + 1 < G::TABLES_DEPTH {
        memory.clear_frame(frame);
    } else {
        memory.restore(frame, page);
    }

    match allocation {
        Allocation::Evicted { page: victim, .. } => {
            debug!("fault on {page} at level {level}: evicted {victim} from {frame}");
        }
        Allocation::ReusedTable { .. } => {
            debug!("fault on {page} at level {level}: reused empty table {frame}");
        }
        Allocation::Unused { .. } => {
            debug!("fault on {page} at level {level}: took unused {frame}");
        }
    }
    Ok(frame)
}
