//! # Virtual and Physical Word Addresses
//!
//! Strongly typed wrappers for the integers the pager juggles, so that a
//! virtual address is never used as a physical one and a frame index is never
//! confused with a page number.
//!
//! ## Overview
//!
//! | Type | Space | Description |
//! |------|-------|-------------|
//! | [`VirtualAddress`] | virtual | a word address in `[0, VIRTUAL_MEMORY_SIZE)` |
//! | [`PageNumber`] | virtual | a virtual address without its in-page offset |
//! | [`PhysicalAddress`] | physical | a word address in `[0, RAM_SIZE)` |
//! | [`FrameIndex`] | physical | a physical frame, `0` being the root table |
//! | [`AddressIndices`] | virtual | the per-level table indices plus the offset |
//!
//! All types are `#[repr(transparent)]` over `u64` and `Copy`. Conversions
//! that depend on the address-space layout take the [`Geometry`] as a type
//! parameter, e.g. [`VirtualAddress::page_number::<G>()`](VirtualAddress::page_number).
//!
//! ## Typical Usage
//!
//! ```rust
//! # use vm_addresses::*;
//! // 16-word pages, two table levels
//! let va = VirtualAddress::new(0x3_7_5);
//! let indices = va.indices::<CompactGeometry>();
//! assert_eq!(indices.table_index(0), 3);
//! assert_eq!(indices.table_index(1), 7);
//! assert_eq!(indices.offset(), 5);
//! assert_eq!(va.page_number::<CompactGeometry>(), PageNumber::new(0x37));
//!
//! // the word lives at offset 5 of whatever frame holds page 0x37
//! let pa = FrameIndex::new(4).entry::<CompactGeometry>(indices.offset());
//! assert_eq!(pa.as_u64(), 4 * 16 + 5);
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]

mod frame_index;
mod indices;
mod page_number;
mod physical_address;
mod virtual_address;

pub use crate::frame_index::FrameIndex;
pub use crate::indices::{AddressIndices, TableIndices};
pub use crate::page_number::PageNumber;
pub use crate::physical_address::PhysicalAddress;
pub use crate::virtual_address::VirtualAddress;
pub use vm_info::{CompactGeometry, Geometry, StandardGeometry, Word};
