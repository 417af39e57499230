use crate::allocator::Allocation;

/// Page-fault counters of one [`VirtualMemory`](crate::VirtualMemory) handle.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct FaultStats {
    /// Missing table entries encountered while resolving addresses.
    pub faults: u64,
    /// Faults served by unlinking an empty table.
    pub tables_reused: u64,
    /// Faults served by a frame that was never used before.
    pub unused_frames: u64,
    /// Faults served by evicting a resident page.
    pub evictions: u64,
}

impl FaultStats {
    pub(crate) const fn record(&mut self, allocation: &Allocation) {
        self.faults += 1;
        match allocation {
            Allocation::ReusedTable { .. } => self.tables_reused += 1,
            Allocation::Unused { .. } => self.unused_frames += 1,
            Allocation::Evicted { .. } => self.evictions += 1,
        }
    }
}
