use vm_addresses::{
    CompactGeometry, FrameIndex, Geometry, PageNumber, StandardGeometry, VirtualAddress, Word,
};
use vm_pager::{FaultStats, VirtualMemory, VmError, vm_initialize, vm_read, vm_write};
use vm_physmem::{DeviceEvent, SimulatedMemory};

type G = CompactGeometry;
type Pm = SimulatedMemory<G>;

const PAGE: u64 = G::PAGE_SIZE;

fn va(v: u64) -> VirtualAddress {
    VirtualAddress::new(v)
}

fn initialized() -> Pm {
    let mut pm = Pm::new().with_journal();
    vm_initialize(&mut pm);
    pm
}

fn read(pm: &mut Pm, address: u64) -> Word {
    let mut value = Word::MIN;
    assert_eq!(vm_read(pm, address, Some(&mut value)), 1, "read {address}");
    value
}

fn frame(pm: &Pm, index: u64) -> &[Word] {
    pm.frame(FrameIndex::new(index)).unwrap()
}

#[test]
fn cold_write_then_read() {
    let mut pm = initialized();

    assert_eq!(vm_write(&mut pm, 13, 3), 1);
    assert_eq!(read(&mut pm, 13), 3);

    // root → table in frame 1 → leaf in frame 2
    assert_eq!(frame(&pm, 0)[0], 1);
    assert!(frame(&pm, 0)[1..].iter().all(|&w| w == 0));
    assert_eq!(frame(&pm, 1)[0], 2);
    assert_eq!(frame(&pm, 2)[13], 3);
}

#[test]
fn neighbouring_words_share_a_leaf() {
    let mut pm = initialized();
    let mut vm = VirtualMemory::attach(&mut pm);

    vm.write(va(13), 3).unwrap();
    vm.write(va(14), 4).unwrap();
    assert_eq!(vm.read(va(13)), Ok(3));
    assert_eq!(vm.read(va(14)), Ok(4));

    assert_eq!(
        vm.resident_pages(),
        vec![(PageNumber::new(0), FrameIndex::new(2))]
    );
    assert_eq!(vm.stats().faults, 2);
}

#[test]
fn full_ram_evicts_the_farthest_page() {
    let mut pm = initialized();
    for (i, value) in (0..5).zip(1..) {
        assert_eq!(vm_write(&mut pm, PAGE * i, value), 1);
    }

    // page 0 is four pages away from page 4, the others are closer
    let evictions: Vec<_> = pm
        .events()
        .iter()
        .filter(|e| matches!(e, DeviceEvent::Evicted { .. }))
        .copied()
        .collect();
    assert_eq!(
        evictions,
        vec![DeviceEvent::Evicted {
            frame: FrameIndex::new(2),
            page: PageNumber::new(0),
        }]
    );
    assert_eq!(frame(&pm, 1)[0], 0);
    assert_eq!(frame(&pm, 1)[4], 2);
    assert_eq!(pm.swapped(PageNumber::new(0)).map(|p| p[0]), Some(1));

    // bringing page 0 back pushes out page 4, its farthest neighbour now
    pm.take_events();
    assert_eq!(read(&mut pm, 0), 1);
    assert_eq!(
        pm.take_events(),
        vec![
            DeviceEvent::Evicted {
                frame: FrameIndex::new(2),
                page: PageNumber::new(4),
            },
            DeviceEvent::Restored {
                frame: FrameIndex::new(2),
                page: PageNumber::new(0),
                from_store: true,
            },
        ]
    );
    assert_eq!(read(&mut pm, PAGE * 4), 5);
}

#[test]
fn emptied_table_is_reused_before_evicting() {
    let mut pm = initialized();
    let mut vm = VirtualMemory::attach(&mut pm);

    vm.write(va(0), 10).unwrap(); // page 0x00: table 1, leaf 2
    vm.write(va(256), 11).unwrap(); // page 0x10: table 3, leaf 4
    vm.write(va(512), 12).unwrap(); // page 0x20: table 5, evicts page 0x00
    vm.write(va(768), 13).unwrap(); // page 0x30: reuses table 1, evicts page 0x10

    assert_eq!(
        vm.stats(),
        FaultStats {
            faults: 8,
            tables_reused: 1,
            unused_frames: 5,
            evictions: 2,
        }
    );
    assert_eq!(
        vm.resident_pages(),
        vec![
            (PageNumber::new(0x20), FrameIndex::new(2)),
            (PageNumber::new(0x30), FrameIndex::new(4)),
        ]
    );

    assert_eq!(&frame(&pm, 0)[..4], &[0, 3, 5, 1]);
    assert!(frame(&pm, 3).iter().all(|&w| w == 0));

    assert_eq!(read(&mut pm, 0), 10);
    assert_eq!(read(&mut pm, 256), 11);
    assert_eq!(read(&mut pm, 512), 12);
    assert_eq!(read(&mut pm, 768), 13);
}

#[test]
fn out_of_range_write_changes_nothing() {
    let mut pm = initialized();
    assert_eq!(vm_write(&mut pm, 7, 1), 1);
    let ram = pm.ram().to_vec();
    let stats = pm.stats();

    assert_eq!(vm_write(&mut pm, 4096, 1), 0);
    assert_eq!(vm_write(&mut pm, u64::MAX, 1), 0);
    let mut value = 0;
    assert_eq!(vm_read(&mut pm, 4096, Some(&mut value)), 0);

    assert_eq!(pm.ram(), &ram[..]);
    assert_eq!(pm.stats(), stats);
    assert_eq!(value, 0);
}

#[test]
fn overwrite_keeps_the_last_value() {
    let mut pm = initialized();
    assert_eq!(vm_write(&mut pm, 100, 7), 1);
    assert_eq!(vm_write(&mut pm, 100, 8), 1);
    assert_eq!(read(&mut pm, 100), 8);
}

#[test]
fn last_address_is_usable() {
    let mut pm = initialized();
    let last = G::VIRTUAL_MEMORY_SIZE - 1;
    assert_eq!(last, 4095);

    assert_eq!(vm_write(&mut pm, last, -1), 1);
    assert_eq!(read(&mut pm, last), -1);
    assert_eq!(vm_write(&mut pm, last + 1, -1), 0);
}

#[test]
fn read_without_output_touches_nothing() {
    let mut pm = initialized();
    assert_eq!(vm_write(&mut pm, 0, 1), 1);
    pm.reset_stats();

    assert_eq!(vm_read(&mut pm, 0, None), 0);
    assert_eq!(vm_read(&mut pm, 50, None), 0);

    let mut vm = VirtualMemory::attach(&mut pm);
    assert_eq!(vm.read_into(va(0), None), Err(VmError::MissingOutput));
    assert_eq!(pm.stats().total(), 0);
}

#[test]
fn standard_geometry_boundaries() {
    type S = StandardGeometry;
    let mut pm = SimulatedMemory::<S>::new();
    let mut vm = VirtualMemory::initialize(&mut pm);
    let size = S::VIRTUAL_MEMORY_SIZE;

    vm.write(va(size - 1), 42).unwrap();
    assert_eq!(vm.read(va(size - 1)), Ok(42));
    assert_eq!(
        vm.write(va(size), 1),
        Err(VmError::AddressOutOfRange {
            address: va(size),
            size
        })
    );
    // three tables and the leaf
    assert_eq!(vm.stats().faults, u64::from(S::TABLES_DEPTH));
}

#[test]
fn reinitializing_forgets_every_mapping() {
    let mut pm = initialized();
    assert_eq!(vm_write(&mut pm, 33, 5), 1);
    vm_initialize(&mut pm);

    let vm = VirtualMemory::attach(&mut pm);
    assert!(vm.resident_pages().is_empty());
    assert_eq!(vm.query(va(33)), None);
}
