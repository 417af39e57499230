use crate::error::VmError;
use crate::resolver::{lookup, resolve};
use crate::stats::FaultStats;
use crate::tree::resident_pages;
use alloc::vec::Vec;
use log::debug;
use vm_addresses::{FrameIndex, Geometry, PageNumber, PhysicalAddress, VirtualAddress, Word};
use vm_info::GeometryInfo;
use vm_physmem::PhysicalMemory;

/// Paged virtual memory on top of a [`PhysicalMemory`] device.
///
/// The handle borrows the device exclusively; every piece of pager state
/// besides the fault counters lives in the device itself, so a device can be
/// dropped by one handle and picked up by another with [`attach`](Self::attach).
pub struct VirtualMemory<'m, M> {
    memory: &'m mut M,
    stats: FaultStats,
}

impl<'m, G, M> VirtualMemory<'m, M>
where
    G: Geometry,
    M: PhysicalMemory<Geometry = G>,
{
    /// Zero the root table, dropping every mapping, and take over the device.
    pub fn initialize(memory: &'m mut M) -> Self {
        let vm = Self::attach(memory);
        debug!("initializing {}", GeometryInfo::of::<G>());
        vm.memory.clear_frame(FrameIndex::ROOT);
        vm
    }

    /// Take over a device whose root table is already set up.
    ///
    /// # Panics
    /// Never at run time; a geometry that is not well dimensioned fails to
    /// compile instead.
    pub fn attach(memory: &'m mut M) -> Self {
        const {
            assert!(
                G::WELL_DIMENSIONED,
                "geometry cannot serve a page fault at every level"
            );
        };
        Self {
            memory,
            stats: FaultStats::default(),
        }
    }

    /// Read the word at `address`.
    ///
    /// # Errors
    /// [`VmError::AddressOutOfRange`] if `address` is outside the address space.
    pub fn read(&mut self, address: VirtualAddress) -> Result<Word, VmError> {
        let pa = self.translate(address)?;
        Ok(self.memory.read(pa))
    }

    /// Read the word at `address` into `out`.
    ///
    /// # Errors
    /// [`VmError::AddressOutOfRange`] if `address` is outside the address
    /// space, [`VmError::MissingOutput`] if there is nowhere to put the word.
    /// In both cases the device is not touched.
    pub fn read_into(
        &mut self,
        address: VirtualAddress,
        out: Option<&mut Word>,
    ) -> Result<(), VmError> {
        Self::check(address)?;
        let out = out.ok_or(VmError::MissingOutput)?;
        *out = self.read(address)?;
        Ok(())
    }

    /// Write `value` to `address`.
    ///
    /// # Errors
    /// [`VmError::AddressOutOfRange`] if `address` is outside the address space.
    pub fn write(&mut self, address: VirtualAddress, value: Word) -> Result<(), VmError> {
        let pa = self.translate(address)?;
        self.memory.write(pa, value);
        Ok(())
    }

    /// Physical address backing `address`, faulting its page in if needed.
    ///
    /// # Errors
    /// [`VmError::AddressOutOfRange`] if `address` is outside the address space.
    pub fn translate(&mut self, address: VirtualAddress) -> Result<PhysicalAddress, VmError> {
        Self::check(address)?;
        resolve(&mut *self.memory, address, &mut self.stats).map_err(VmError::from)
    }

    /// Physical address backing `address` if its page is resident.
    ///
    /// Unlike [`translate`](Self::translate) this never changes the device.
    #[must_use]
    pub fn query(&self, address: VirtualAddress) -> Option<PhysicalAddress> {
        lookup(&*self.memory, address)
    }

    /// Resident pages and their frames in ascending page order.
    #[must_use]
    pub fn resident_pages(&self) -> Vec<(PageNumber, FrameIndex)> {
        resident_pages(&*self.memory)
    }

    /// Faults served since this handle was created.
    #[must_use]
    pub const fn stats(&self) -> FaultStats {
        self.stats
    }

    /// The underlying device.
    #[must_use]
    pub const fn memory(&self) -> &M {
        &*self.memory
    }

    fn check(address: VirtualAddress) -> Result<(), VmError> {
        if address.is_valid::<G>() {
            Ok(())
        } else {
            Err(VmError::AddressOutOfRange {
                address,
                size: G::VIRTUAL_MEMORY_SIZE,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vm_addresses::{CompactGeometry, StandardGeometry};
    use vm_physmem::SimulatedMemory;

    type Pm = SimulatedMemory<CompactGeometry>;

    fn va(v: u64) -> VirtualAddress {
        VirtualAddress::new(v)
    }

    #[test]
    fn initialize_zeroes_the_root() {
        let mut pm = Pm::new();
        pm.write(PhysicalAddress::new(3), 5);

        let vm = VirtualMemory::initialize(&mut pm);
        assert!(vm.resident_pages().is_empty());
        assert!(pm.frame(FrameIndex::ROOT).unwrap().iter().all(|&w| w == 0));
    }

    #[test]
    fn write_then_read() {
        let mut pm = Pm::new();
        let mut vm = VirtualMemory::initialize(&mut pm);

        vm.write(va(13), 3).unwrap();
        assert_eq!(vm.read(va(13)), Ok(3));

        let mut out = 0;
        vm.read_into(va(13), Some(&mut out)).unwrap();
        assert_eq!(out, 3);
    }

    #[test]
    fn out_of_range_is_rejected_before_the_device() {
        let mut pm = Pm::new();
        let mut vm = VirtualMemory::initialize(&mut pm);
        let before = vm.memory().stats();

        assert_eq!(
            vm.write(va(4096), 1),
            Err(VmError::AddressOutOfRange {
                address: va(4096),
                size: 4096
            })
        );
        assert!(matches!(vm.read(va(5000)), Err(VmError::AddressOutOfRange { .. })));
        assert!(matches!(
            vm.read_into(va(4096), None),
            Err(VmError::AddressOutOfRange { .. })
        ));
        assert_eq!(vm.read_into(va(0), None), Err(VmError::MissingOutput));
        assert_eq!(vm.memory().stats(), before);
    }

    #[test]
    fn query_does_not_fault() {
        let mut pm = Pm::new();
        let mut vm = VirtualMemory::initialize(&mut pm);

        assert_eq!(vm.query(va(100)), None);
        let pa = vm.translate(va(100)).unwrap();
        assert_eq!(vm.query(va(100)), Some(pa));
        assert_eq!(vm.stats().faults, 2);
    }

    fn attach_and_touch_last_word<G: Geometry>() -> FaultStats {
        // a fresh device already has a zeroed root
        let mut pm = SimulatedMemory::<G>::new();
        let mut vm = VirtualMemory::attach(&mut pm);
        assert_eq!(vm.stats(), FaultStats::default());
        vm.write(va(G::VIRTUAL_MEMORY_SIZE - 1), -7).unwrap();
        assert_eq!(vm.read(va(G::VIRTUAL_MEMORY_SIZE - 1)), Ok(-7));
        vm.stats()
    }

    #[test]
    fn attach_starts_counting_from_zero_on_every_preset() {
        let compact = attach_and_touch_last_word::<CompactGeometry>();
        assert_eq!(compact.faults, u64::from(CompactGeometry::TABLES_DEPTH));
        let standard = attach_and_touch_last_word::<StandardGeometry>();
        assert_eq!(standard.faults, u64::from(StandardGeometry::TABLES_DEPTH));
        assert_eq!(standard.evictions, 0);
    }

    #[test]
    fn attach_picks_up_existing_mappings() {
        let mut pm = Pm::new();
        VirtualMemory::initialize(&mut pm).write(va(77), 9).unwrap();

        let mut vm = VirtualMemory::attach(&mut pm);
        assert_eq!(vm.read(va(77)), Ok(9));
        assert_eq!(vm.stats(), FaultStats::default());
    }
}
