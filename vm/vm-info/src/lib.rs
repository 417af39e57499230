//! # Virtual Memory Geometry
//!
//! Build-time configuration shared by every crate of the simulator: the
//! [`Word`] type stored in physical memory and the [`Geometry`] describing how
//! virtual addresses are sliced into page-table indices.
//!
//! ## Overview
//!
//! A geometry is a zero-sized marker type implementing [`Geometry`]. Only three
//! constants are chosen per geometry; everything else is derived:
//!
//! | Constant | Meaning |
//! |:---------|:--------|
//! | [`OFFSET_WIDTH`](Geometry::OFFSET_WIDTH) | bits per table index and per in-page offset |
//! | [`TABLES_DEPTH`](Geometry::TABLES_DEPTH) | number of table levels above the data page |
//! | [`NUM_FRAMES`](Geometry::NUM_FRAMES) | physical frames backing the simulation |
//! | [`PAGE_SIZE`](Geometry::PAGE_SIZE) | `1 << OFFSET_WIDTH` words per frame |
//! | [`NUM_PAGES`](Geometry::NUM_PAGES) | `1 << (OFFSET_WIDTH * TABLES_DEPTH)` virtual pages |
//! | [`VIRTUAL_MEMORY_SIZE`](Geometry::VIRTUAL_MEMORY_SIZE) | `NUM_PAGES * PAGE_SIZE` words |
//! | [`RAM_SIZE`](Geometry::RAM_SIZE) | `NUM_FRAMES * PAGE_SIZE` words |
//!
//! A virtual address is split most-significant first:
//!
//! ```text
//! | index[0] | index[1] | ... | index[TABLES_DEPTH-1] | offset |
//! |<------------- page number ------------------->|
//! ```
//!
//! ## Presets
//!
//! - [`StandardGeometry`]: 16-word pages, four table levels, 64 frames
//!   (20-bit virtual, 10-bit physical word addresses).
//! - [`CompactGeometry`]: 16-word pages, two table levels, 6 frames. Small
//!   enough that every eviction can be traced by hand.
//!
//! Geometries are validated at compile time through
//! [`WELL_DIMENSIONED`](Geometry::WELL_DIMENSIONED); the pager refuses to
//! instantiate for a geometry that fails the check.

#![cfg_attr(not(any(test, doctest)), no_std)]

mod geometry;
mod presets;

pub use crate::geometry::{Geometry, GeometryInfo, is_well_dimensioned};
pub use crate::presets::{CompactGeometry, StandardGeometry};

/// The unit of physical memory.
///
/// Wide enough to hold any frame index; `0` doubles as the "no child"
/// sentinel in page-table entries.
pub type Word = i32;
