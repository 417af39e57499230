//! # Demand Pager
//!
//! Hierarchical page tables and a page-fault handler on top of a small,
//! word-addressable [`PhysicalMemory`](vm_physmem::PhysicalMemory).
//!
//! ## Address walk
//!
//! A virtual address is split into `TABLES_DEPTH` table indices followed by
//! the in-page offset, each `OFFSET_WIDTH` bits wide. Frame 0 permanently
//! holds the root table; every other frame is either an intermediate table or
//! a data page (a *leaf*). A table entry holds the index of its child frame,
//! `0` meaning "not present".
//!
//! ```text
//!  frame 0 (root)
//!   │ [i₀]
//!   └──► table ──► … ──► table
//!                         │ [iₙ₋₁]
//!                         └──► leaf ──► word at [offset]
//! ```
//!
//! ## Page faults
//!
//! A zero entry on the way down is a page fault. The handler
//!
//! 1. [`scan`]s the whole tree once, collecting the largest frame in use,
//!    the first empty table and the resident page farthest from the faulting
//!    one (cyclic distance on the page-number ring);
//! 2. asks the [allocator](allocate_frame) for a frame, preferring an
//!    empty table, then a never-used frame, then evicting that farthest page;
//! 3. zeroes the frame if it becomes a table, or restores the faulting page
//!    into it if it becomes a leaf, and links it into the parent table.
//!
//! The parent table of the missing entry is *protected* for the duration of
//! the fault so building a chain of tables never eats its own tail.
//!
//! ## Usage
//!
//! ```rust
//! use vm_addresses::{CompactGeometry, VirtualAddress};
//! use vm_pager::VirtualMemory;
//! use vm_physmem::SimulatedMemory;
//!
//! let mut pm = SimulatedMemory::<CompactGeometry>::new();
//! let mut vm = VirtualMemory::initialize(&mut pm);
//!
//! // six frames are not enough for five pages: the first one gets evicted
//! for page in 0..5 {
//!     vm.write(VirtualAddress::new(page * 16), page as i32 + 1).unwrap();
//! }
//! assert_eq!(vm.stats().evictions, 1);
//! assert_eq!(vm.read(VirtualAddress::new(0)), Ok(1));
//! ```
//!
//! For callers that want plain status codes, [`vm_initialize`], [`vm_read`]
//! and [`vm_write`] return `1` on success and `0` on failure.

#![cfg_attr(not(any(test, doctest)), no_std)]

extern crate alloc;

mod allocator;
mod error;
mod resolver;
mod scan;
mod stats;
mod status;
mod tree;
mod virtual_memory;

pub use crate::allocator::{Allocation, allocate_frame};
pub use crate::error::{FaultError, VmError};
pub use crate::resolver::{lookup, resolve};
pub use crate::scan::{ParentEdge, ScanSummary, TableSlot, Victim, scan};
pub use crate::stats::FaultStats;
pub use crate::status::{vm_initialize, vm_read, vm_write};
pub use crate::tree::resident_pages;
pub use crate::virtual_memory::VirtualMemory;
