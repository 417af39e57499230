//! Status-code entry points: `1` on success, `0` on failure.

use crate::{VirtualMemory, VmError};
use log::debug;
use vm_addresses::{Geometry, VirtualAddress, Word};
use vm_physmem::PhysicalMemory;

const SUCCESS: i32 = 1;
const FAILURE: i32 = 0;

/// Zero the root table of `memory`.
pub fn vm_initialize<G, M>(memory: &mut M)
where
    G: Geometry,
    M: PhysicalMemory<Geometry = G>,
{
    VirtualMemory::initialize(memory);
}

/// Read the word at `address` into `value`.
///
/// Returns `0` without touching `memory` if `address` is out of range or
/// `value` is `None`.
pub fn vm_read<G, M>(memory: &mut M, address: u64, value: Option<&mut Word>) -> i32
where
    G: Geometry,
    M: PhysicalMemory<Geometry = G>,
{
    status(VirtualMemory::attach(memory).read_into(VirtualAddress::new(address), value))
}

/// Write `value` to the word at `address`.
///
/// Returns `0` without touching `memory` if `address` is out of range.
pub fn vm_write<G, M>(memory: &mut M, address: u64, value: Word) -> i32
where
    G: Geometry,
    M: PhysicalMemory<Geometry = G>,
{
    status(VirtualMemory::attach(memory).write(VirtualAddress::new(address), value))
}

fn status(result: Result<(), VmError>) -> i32 {
    match result {
        Ok(()) => SUCCESS,
        Err(e) => {
            debug!("rejected: {e}");
            FAILURE
        }
    }
}
