//! # Frame Allocator
//!
//! Picks the frame that serves a page fault from a [`ScanSummary`], in order
//! of preference:
//!
//! 1. an empty table, which is unlinked from its parent;
//! 2. the frame right after the largest one in use, if it exists;
//! 3. the resident page farthest from the faulting page, which is evicted
//!    and unlinked.
//!
//! The root and the protected frame are never handed out.

use crate::error::FaultError;
use crate::scan::ScanSummary;
use log::trace;
use vm_addresses::{FrameIndex, Geometry, PageNumber};
use vm_physmem::PhysicalMemory;

/// How a fault was served.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Allocation {
    /// An empty table was unlinked and handed out.
    ReusedTable { frame: FrameIndex },
    /// A frame above every frame in use.
    Unused { frame: FrameIndex },
    /// `page` was written to the backing store and its frame handed out.
    Evicted { frame: FrameIndex, page: PageNumber },
}

impl Allocation {
    #[inline]
    #[must_use]
    pub const fn frame(&self) -> FrameIndex {
        match *self {
            Self::ReusedTable { frame } | Self::Unused { frame } | Self::Evicted { frame, .. } => {
                frame
            }
        }
    }
}

/// Supply a frame for a fault on `target`.
///
/// On return the frame has no parent edge. Its contents are whatever was
/// left in it; the caller initializes it for its new role.
///
/// # Errors
/// [`FaultError::FramesExhausted`] if no priority applies. This cannot
/// happen for a well-dimensioned geometry.
pub fn allocate_frame<G, M>(
    memory: &mut M,
    summary: &ScanSummary,
    protected: FrameIndex,
    target: PageNumber,
) -> Result<Allocation, FaultError>
where
    G: Geometry,
    M: PhysicalMemory<Geometry = G>,
{
    let allocation = if let Some(slot) = summary.empty_table {
        memory.write(slot.edge.address::<G>(), 0);
        Allocation::ReusedTable { frame: slot.frame }
    } else if summary.max_used_frame.next().is_valid::<G>() {
        Allocation::Unused {
            frame: summary.max_used_frame.next(),
        }
    } else if let Some(victim) = summary.victim {
        let edge = victim.edge.address::<G>();
        debug_assert_eq!(
            FrameIndex::from_entry(memory.read(edge)),
            Some(victim.frame),
            "victim edge does not point at the victim"
        );
        memory.evict(victim.frame, victim.page);
        memory.write(edge, 0);
        Allocation::Evicted {
            frame: victim.frame,
            page: victim.page,
        }
    } else {
        return Err(FaultError::FramesExhausted { page: target });
    };

    debug_assert!(!allocation.frame().is_root(), "allocated the root table");
    debug_assert_ne!(allocation.frame(), protected, "allocated the protected frame");
    trace!("{target}: {allocation:?}");
    Ok(allocation)
}
