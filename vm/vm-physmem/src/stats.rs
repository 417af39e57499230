use vm_addresses::{FrameIndex, PageNumber};

/// Operation counters of a simulated device.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct DeviceStats {
    pub reads: u64,
    pub writes: u64,
    pub evictions: u64,
    pub restores: u64,
}

impl DeviceStats {
    /// Total number of device operations.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.reads + self.writes + self.evictions + self.restores
    }
}

/// Page movements between RAM and the backing store, in program order.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DeviceEvent {
    /// `page` was copied out of `frame`.
    Evicted { frame: FrameIndex, page: PageNumber },
    /// `page` was copied into `frame`; `from_store` is `false` when the page
    /// had never been evicted and the frame was zero-filled instead.
    Restored {
        frame: FrameIndex,
        page: PageNumber,
        from_store: bool,
    },
}

impl DeviceEvent {
    #[must_use]
    pub const fn page(&self) -> PageNumber {
        match self {
            Self::Evicted { page, .. } | Self::Restored { page, .. } => *page,
        }
    }

    #[must_use]
    pub const fn frame(&self) -> FrameIndex {
        match self {
            Self::Evicted { frame, .. } | Self::Restored { frame, .. } => *frame,
        }
    }
}
