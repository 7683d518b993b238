use std::cell::Cell;
use std::rc::Rc;

/// Gatekeeper for heap growth.
///
/// Storage itself comes from the global allocator; an implementor decides
/// whether a request for `size` more bytes may proceed and is told when those
/// bytes are given back. This is how hosts cap the toolkit's footprint.
pub trait Allocator {
    fn alloc(&self, size: usize) -> bool;
    fn free(&self, size: usize);
}

pub type SharedAllocator = Rc<dyn Allocator>;

/// Unlimited allocator backed by the process heap.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeapAllocator;

impl Allocator for HeapAllocator {
    fn alloc(&self, _size: usize) -> bool {
        true
    }

    fn free(&self, _size: usize) {}
}

/// Allocator that refuses requests once `limit` bytes are outstanding.
#[derive(Debug)]
pub struct BudgetAllocator {
    limit: usize,
    used: Cell<usize>,
}

impl BudgetAllocator {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            used: Cell::new(0),
        }
    }

    pub fn used(&self) -> usize {
        self.used.get()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl Allocator for BudgetAllocator {
    fn alloc(&self, size: usize) -> bool {
        let used = self.used.get();
        match used.checked_add(size) {
            Some(total) if total <= self.limit => {
                self.used.set(total);
                true
            }
            _ => false,
        }
    }

    fn free(&self, size: usize) {
        self.used.set(self.used.get().saturating_sub(size));
    }
}

pub fn heap_allocator() -> SharedAllocator {
    Rc::new(HeapAllocator)
}
