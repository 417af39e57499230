use vm_addresses::{PageNumber, VirtualAddress};

/// Errors returned by [`VirtualMemory`](crate::VirtualMemory).
///
/// Rejected calls never touch the device.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VmError {
    #[error("virtual address {address} is outside of the {size}-word address space")]
    AddressOutOfRange { address: VirtualAddress, size: u64 },
    #[error("no output location given for read")]
    MissingOutput,
    #[error("no frame could be supplied for {page}")]
    FramesExhausted { page: PageNumber },
}

/// Failure inside the page-fault path.
///
/// Unreachable for well-dimensioned geometries; kept as a value rather than a
/// panic so a broken device cannot take the host down.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FaultError {
    #[error("no empty table, unused frame or eviction victim for {page}")]
    FramesExhausted { page: PageNumber },
}

impl From<FaultError> for VmError {
    fn from(value: FaultError) -> Self {
        match value {
            FaultError::FramesExhausted { page } => Self::FramesExhausted { page },
        }
    }
}
