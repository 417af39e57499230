use crate::Geometry;

/// Reference machine: 20-bit virtual and 10-bit physical word addresses.
///
/// 16-word pages, four table levels, 64 frames.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct StandardGeometry;

impl Geometry for StandardGeometry {
    const OFFSET_WIDTH: u32 = 4;
    const TABLES_DEPTH: u32 = 4;
    const NUM_FRAMES: u64 = 64;

    fn name() -> &'static str {
        "standard"
    }
}

/// A deliberately tiny machine: 16-word pages, two table levels, 6 frames.
///
/// A root, one table and one leaf already use half of the frames, so
/// evictions start after a handful of pages.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct CompactGeometry;

impl Geometry for CompactGeometry {
    const OFFSET_WIDTH: u32 = 4;
    const TABLES_DEPTH: u32 = 2;
    const NUM_FRAMES: u64 = 6;

    fn name() -> &'static str {
        "compact"
    }
}

const _: () = {
    assert!(StandardGeometry::WELL_DIMENSIONED);
    assert!(StandardGeometry::VIRTUAL_ADDRESS_WIDTH == 20);
    assert!(StandardGeometry::RAM_SIZE == 1 << 10);
    assert!(CompactGeometry::WELL_DIMENSIONED);
    assert!(CompactGeometry::VIRTUAL_MEMORY_SIZE == 4096);
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GeometryInfo;

    #[test]
    fn compact_constants() {
        assert_eq!(CompactGeometry::PAGE_SIZE, 16);
        assert_eq!(CompactGeometry::NUM_PAGES, 256);
        assert_eq!(CompactGeometry::OFFSET_MASK, 0xF);
        assert_eq!(CompactGeometry::RAM_SIZE, 96);
    }

    #[test]
    fn standard_constants() {
        assert_eq!(StandardGeometry::PAGE_SIZE, 16);
        assert_eq!(StandardGeometry::NUM_PAGES, 65536);
        assert_eq!(StandardGeometry::VIRTUAL_MEMORY_SIZE, 1 << 20);
    }

    #[test]
    fn info_display_names_the_geometry() {
        let info = GeometryInfo::of::<CompactGeometry>();
        assert_eq!(info.num_frames, 6);
        let text = info.to_string();
        assert!(text.starts_with("compact"));
        assert!(text.contains("6 frames of 16 words"));
    }
}
