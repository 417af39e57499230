use crate::Word;
use core::fmt;

/// Address-space geometry of a simulated machine.
///
/// Implementors only provide [`OFFSET_WIDTH`](Self::OFFSET_WIDTH),
/// [`TABLES_DEPTH`](Self::TABLES_DEPTH) and [`NUM_FRAMES`](Self::NUM_FRAMES);
/// the remaining constants are derived and should not be overridden.
///
/// ### Example
/// ```rust
/// # use vm_info::Geometry;
/// #[derive(Copy, Clone, Debug, Eq, PartialEq)]
/// struct Tiny;
///
/// impl Geometry for Tiny {
///     const OFFSET_WIDTH: u32 = 2;
///     const TABLES_DEPTH: u32 = 3;
///     const NUM_FRAMES: u64 = 8;
///
///     fn name() -> &'static str {
///         "tiny"
///     }
/// }
///
/// assert_eq!(Tiny::PAGE_SIZE, 4);
/// assert_eq!(Tiny::NUM_PAGES, 64);
/// assert_eq!(Tiny::VIRTUAL_MEMORY_SIZE, 256);
/// assert!(Tiny::WELL_DIMENSIONED);
/// ```
pub trait Geometry: Copy + Clone + Eq + PartialEq + fmt::Debug + 'static {
    /// Bits per table index and per in-page offset.
    const OFFSET_WIDTH: u32;
    /// Number of table levels above the data page.
    const TABLES_DEPTH: u32;
    /// Number of physical frames.
    const NUM_FRAMES: u64;

    /// Words per frame (and entries per table).
    const PAGE_SIZE: u64 = 1 << Self::OFFSET_WIDTH;
    /// Mask selecting one index or offset field.
    const OFFSET_MASK: u64 = Self::PAGE_SIZE - 1;
    /// Number of virtual pages.
    const NUM_PAGES: u64 = 1 << (Self::OFFSET_WIDTH * Self::TABLES_DEPTH);
    /// Total width of a virtual address in bits.
    const VIRTUAL_ADDRESS_WIDTH: u32 = Self::OFFSET_WIDTH * (Self::TABLES_DEPTH + 1);
    /// Size of the virtual address space in words.
    const VIRTUAL_MEMORY_SIZE: u64 = Self::NUM_PAGES * Self::PAGE_SIZE;
    /// Size of physical memory in words.
    const RAM_SIZE: u64 = Self::NUM_FRAMES * Self::PAGE_SIZE;
    /// Whether the constants can drive the pager; see [`is_well_dimensioned`].
    const WELL_DIMENSIONED: bool =
        is_well_dimensioned(Self::OFFSET_WIDTH, Self::TABLES_DEPTH, Self::NUM_FRAMES);

    /// Short human-readable name used in logs.
    fn name() -> &'static str;
}

/// Checks that a geometry is usable by the pager.
///
/// - both widths are non-zero and a virtual address fits in 63 bits,
/// - `num_frames > tables_depth + 1`, so a full root-to-leaf chain plus one
///   spare frame always exists and the allocator cannot run dry,
/// - the largest frame index is representable as a positive [`Word`].
#[must_use]
#[allow(clippy::cast_lossless, clippy::cast_sign_loss)]
pub const fn is_well_dimensioned(offset_width: u32, tables_depth: u32, num_frames: u64) -> bool {
    if offset_width == 0 || tables_depth == 0 {
        return false;
    }
    let address_width = offset_width as u64 * (tables_depth as u64 + 1);
    if address_width >= 64 {
        return false;
    }
    num_frames > tables_depth as u64 + 1 && num_frames - 1 <= Word::MAX as u64
}

/// Runtime snapshot of a geometry's constants, mostly for logging.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct GeometryInfo {
    pub name: &'static str,
    pub offset_width: u32,
    pub tables_depth: u32,
    pub num_frames: u64,
    pub page_size: u64,
    pub num_pages: u64,
    pub virtual_memory_size: u64,
}

impl GeometryInfo {
    #[must_use]
    pub fn of<G: Geometry>() -> Self {
        Self {
            name: G::name(),
            offset_width: G::OFFSET_WIDTH,
            tables_depth: G::TABLES_DEPTH,
            num_frames: G::NUM_FRAMES,
            page_size: G::PAGE_SIZE,
            num_pages: G::NUM_PAGES,
            virtual_memory_size: G::VIRTUAL_MEMORY_SIZE,
        }
    }
}

impl fmt::Display for GeometryInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (offset width {}, depth {}, {} frames of {} words, {} pages)",
            self.name,
            self.offset_width,
            self.tables_depth,
            self.num_frames,
            self.page_size,
            self.num_pages
        )
    }
}
