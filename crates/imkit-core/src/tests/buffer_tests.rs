use super::*;
use crate::allocator::{heap_allocator, BudgetAllocator};
use std::rc::Rc;

#[test]
fn front_and_back_respect_alignment() {
    let mut buffer = ArenaBuffer::fixed(256);
    let a = buffer.alloc(BufferSide::Front, 3, 1).expect("front");
    let b = buffer.alloc(BufferSide::Front, 8, 8).expect("aligned front");
    assert_eq!(a.start(256), 0);
    assert_eq!(b.start(256), 8);
    assert_eq!(buffer.allocated(), 16);

    let c = buffer.alloc(BufferSide::Back, 5, 4).expect("back");
    assert_eq!(c.start(256) % 4, 0);
    assert!(c.start(256) + 5 <= 256);
    assert!(buffer.allocated() <= buffer.size());
    assert!(buffer.size() <= buffer.capacity());
}

#[test]
fn fixed_buffer_fails_when_sides_meet() {
    let mut buffer = ArenaBuffer::fixed(32);
    buffer.alloc(BufferSide::Front, 20, 1).expect("front");
    let err = buffer.alloc(BufferSide::Back, 16, 1).unwrap_err();
    assert!(matches!(err, AllocError::OutOfMemory { .. }));
    assert_eq!(buffer.size(), 32);
    assert_eq!(buffer.allocated(), 20);
    buffer.alloc(BufferSide::Back, 12, 1).expect("exact fit");
    assert_eq!(buffer.size(), buffer.allocated());
}

#[test]
fn growth_keeps_front_and_back_contents() {
    let mut buffer = ArenaBuffer::new(heap_allocator(), 16, 2.0);
    let front = buffer.push(BufferSide::Front, b"front", 1).expect("front");
    let back = buffer.push(BufferSide::Back, b"back", 1).expect("back");
    let big = buffer.alloc(BufferSide::Front, 100, 4).expect("grows");

    assert!(buffer.capacity() >= 109);
    assert!(buffer.capacity().is_power_of_two());
    assert_eq!(buffer.bytes(front), b"front");
    assert_eq!(buffer.bytes(back), b"back");
    assert_eq!(big.len, 100);
    assert!(buffer.allocated() <= buffer.size());
}

#[test]
fn scaled_growth_rounds_up_to_a_power_of_two() {
    let mut buffer = ArenaBuffer::new(heap_allocator(), 64, 3.0);
    buffer.alloc(BufferSide::Front, 60, 1).expect("fits");
    buffer.alloc(BufferSide::Front, 16, 1).expect("grows");
    assert_eq!(buffer.capacity(), 256);
}

#[test]
fn reset_returns_to_marker_or_empty() {
    let mut buffer = ArenaBuffer::fixed(128);
    buffer.alloc(BufferSide::Front, 10, 1).expect("front");
    buffer.mark(BufferSide::Front);
    buffer.alloc(BufferSide::Front, 30, 1).expect("front");
    buffer.reset(BufferSide::Front);
    assert_eq!(buffer.allocated(), 10);
    assert_eq!(buffer.needed(), 10);

    buffer.reset(BufferSide::Front);
    assert_eq!(buffer.allocated(), 0);

    buffer.alloc(BufferSide::Back, 8, 1).expect("back");
    buffer.mark(BufferSide::Back);
    buffer.alloc(BufferSide::Back, 8, 1).expect("back");
    buffer.reset(BufferSide::Back);
    assert_eq!(buffer.back_used(), 8);
}

#[test]
fn refused_growth_is_reported() {
    let budget = Rc::new(BudgetAllocator::new(64));
    let mut buffer = ArenaBuffer::new(budget.clone(), 32, 2.0);
    assert_eq!(budget.used(), 32);
    buffer.alloc(BufferSide::Front, 24, 1).expect("fits");
    let err = buffer.alloc(BufferSide::Front, 200, 1).unwrap_err();
    assert!(matches!(err, AllocError::AllocatorRefused(_)));
    assert_eq!(buffer.capacity(), 32);

    buffer.free();
    assert_eq!(budget.used(), 0);
    assert_eq!(buffer.capacity(), 0);
}

#[test]
fn invalid_requests_are_rejected() {
    let mut buffer = ArenaBuffer::fixed(16);
    assert_eq!(buffer.alloc(BufferSide::Front, 0, 1), Err(AllocError::ZeroSize));
    assert_eq!(
        buffer.alloc(BufferSide::Front, 4, 3),
        Err(AllocError::InvalidAlignment(3))
    );
}

#[test]
fn pod_read_write_round_trip_in_place() {
    let mut buffer = ArenaBuffer::fixed(64);
    let span = buffer.alloc(BufferSide::Front, 8, 4).expect("front");
    let at = span.start(buffer.capacity());
    assert!(buffer.write(at, &0xdead_beef_u32));
    assert_eq!(buffer.read::<u32>(at), Some(0xdead_beef));
    assert_eq!(buffer.read::<u64>(62), None);
}

#[test]
fn info_reports_usage() {
    let mut buffer = ArenaBuffer::fixed(64);
    buffer.alloc(BufferSide::Front, 10, 1).expect("front");
    buffer.alloc(BufferSide::Back, 6, 1).expect("back");
    let info = buffer.info();
    assert_eq!(info.size, 64);
    assert_eq!(info.allocated, 16);
    assert_eq!(info.calls, 2);
    assert_eq!(info.kind, BufferKind::Fixed);

    buffer.clear();
    assert_eq!(buffer.info().allocated, 0);
}
