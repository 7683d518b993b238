//! Page-based slot allocator with a free list.
//!
//! Slots are addressed by [`PoolId`]; a sequence number in every id makes a
//! stale handle to a recycled slot fail lookup instead of aliasing the new
//! occupant.

use crate::allocator::SharedAllocator;
use crate::error::AllocError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PoolId {
    page: u32,
    index: u32,
    seqno: u32,
}

impl PoolId {
    pub fn page(&self) -> usize {
        self.page as usize
    }

    pub fn index(&self) -> usize {
        self.index as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoolKind {
    /// All slots are sized up front; allocation fails once they are used.
    Fixed,
    /// Pages are requested lazily from the allocator.
    Dynamic,
}

struct Slot<T> {
    seqno: u32,
    value: Option<T>,
}

pub struct MemoryPool<T> {
    kind: PoolKind,
    allocator: Option<SharedAllocator>,
    capacity: usize,
    pages: Vec<Vec<Slot<T>>>,
    free: Vec<(u32, u32)>,
    live: usize,
}

impl<T> MemoryPool<T> {
    /// Dynamic pool handing out pages of `capacity` slots.
    pub fn new(allocator: SharedAllocator, capacity: usize) -> Self {
        Self {
            kind: PoolKind::Dynamic,
            allocator: Some(allocator),
            capacity: capacity.max(1),
            pages: Vec::new(),
            free: Vec::new(),
            live: 0,
        }
    }

    /// Fixed pool sized to hold as many slots as fit in `size` bytes.
    pub fn fixed(size: usize) -> Self {
        let capacity = size / Self::slot_size();
        Self {
            kind: PoolKind::Fixed,
            allocator: None,
            capacity,
            pages: vec![Vec::with_capacity(capacity)],
            free: Vec::new(),
            live: 0,
        }
    }

    /// Bytes one slot occupies.
    pub fn slot_size() -> usize {
        std::mem::size_of::<Slot<T>>().max(1)
    }

    pub fn slot_align() -> usize {
        std::mem::align_of::<Slot<T>>()
    }

    pub fn kind(&self) -> PoolKind {
        self.kind
    }

    pub fn page_capacity(&self) -> usize {
        self.capacity
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn has_free(&self) -> bool {
        !self.free.is_empty()
    }

    /// Stores `value`, reusing a freed slot before touching fresh memory.
    pub fn alloc(&mut self, value: T) -> Result<PoolId, AllocError> {
        if let Some((page, index)) = self.free.pop() {
            let slot = &mut self.pages[page as usize][index as usize];
            slot.value = Some(value);
            self.live += 1;
            return Ok(PoolId {
                page,
                index,
                seqno: slot.seqno,
            });
        }

        let needs_page = self
            .pages
            .last()
            .map_or(true, |page| page.len() >= self.capacity);
        if needs_page {
            self.add_page()?;
        }

        let page = self.pages.len() - 1;
        let slots = &mut self.pages[page];
        slots.push(Slot {
            seqno: 0,
            value: Some(value),
        });
        self.live += 1;
        Ok(PoolId {
            page: page as u32,
            index: (slots.len() - 1) as u32,
            seqno: 0,
        })
    }

    fn add_page(&mut self) -> Result<(), AllocError> {
        let page_bytes = self.capacity * Self::slot_size();
        match (&self.allocator, self.kind) {
            (Some(allocator), PoolKind::Dynamic) => {
                if !allocator.alloc(page_bytes) {
                    log::warn!("allocator refused a pool page of {page_bytes} bytes");
                    return Err(AllocError::AllocatorRefused(page_bytes));
                }
                self.pages.push(Vec::with_capacity(self.capacity));
                log::trace!("pool page {} allocated", self.pages.len() - 1);
                Ok(())
            }
            _ => {
                log::warn!("fixed pool exhausted at {} elements", self.capacity);
                Err(AllocError::PoolExhausted(self.capacity))
            }
        }
    }

    /// Releases the slot behind `id` and returns its value. Stale ids are ignored.
    pub fn free(&mut self, id: PoolId) -> Option<T> {
        let slot = self.slot_mut(id)?;
        let value = slot.value.take()?;
        slot.seqno = slot.seqno.wrapping_add(1);
        self.free.push((id.page, id.index));
        self.live -= 1;
        Some(value)
    }

    /// Drops every element. Dynamic pools hand their pages back to the allocator.
    pub fn free_all(&mut self) {
        match self.kind {
            PoolKind::Dynamic => {
                let page_bytes = self.capacity * Self::slot_size();
                if let Some(allocator) = &self.allocator {
                    for _ in 0..self.pages.len() {
                        allocator.free(page_bytes);
                    }
                }
                self.pages.clear();
            }
            PoolKind::Fixed => {
                for page in &mut self.pages {
                    page.clear();
                }
            }
        }
        self.free.clear();
        self.live = 0;
    }

    fn slot_mut(&mut self, id: PoolId) -> Option<&mut Slot<T>> {
        self.pages
            .get_mut(id.page as usize)?
            .get_mut(id.index as usize)
            .filter(|slot| slot.seqno == id.seqno)
    }

    pub fn get(&self, id: PoolId) -> Option<&T> {
        self.pages
            .get(id.page as usize)?
            .get(id.index as usize)
            .filter(|slot| slot.seqno == id.seqno)?
            .value
            .as_ref()
    }

    pub fn get_mut(&mut self, id: PoolId) -> Option<&mut T> {
        self.slot_mut(id)?.value.as_mut()
    }

    pub fn contains(&self, id: PoolId) -> bool {
        self.get(id).is_some()
    }

    /// Mutable access to two distinct elements at once.
    pub fn pair_mut(&mut self, a: PoolId, b: PoolId) -> Option<(&mut T, &mut T)> {
        if a.page == b.page && a.index == b.index {
            return None;
        }
        let (first, second) = if (a.page, a.index) < (b.page, b.index) {
            (a, b)
        } else {
            (b, a)
        };

        let (slot_first, slot_second) = if first.page == second.page {
            let page = self.pages.get_mut(first.page as usize)?;
            if second.index as usize >= page.len() {
                return None;
            }
            let (low, high) = page.split_at_mut(second.index as usize);
            (low.get_mut(first.index as usize)?, high.get_mut(0)?)
        } else {
            let (low, high) = self.pages.split_at_mut(second.page as usize);
            (
                low.get_mut(first.page as usize)?.get_mut(first.index as usize)?,
                high.get_mut(0)?.get_mut(second.index as usize)?,
            )
        };

        if slot_first.seqno != first.seqno || slot_second.seqno != second.seqno {
            return None;
        }
        let first_value = slot_first.value.as_mut()?;
        let second_value = slot_second.value.as_mut()?;
        if (a.page, a.index) < (b.page, b.index) {
            Some((first_value, second_value))
        } else {
            Some((second_value, first_value))
        }
    }

    /// Iterates live elements in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (PoolId, &T)> + '_ {
        self.pages.iter().enumerate().flat_map(|(page, slots)| {
            slots.iter().enumerate().filter_map(move |(index, slot)| {
                slot.value.as_ref().map(|value| {
                    (
                        PoolId {
                            page: page as u32,
                            index: index as u32,
                            seqno: slot.seqno,
                        },
                        value,
                    )
                })
            })
        })
    }
}

impl<T> Drop for MemoryPool<T> {
    fn drop(&mut self) {
        if self.kind == PoolKind::Dynamic {
            self.free_all();
        }
    }
}

#[cfg(test)]
#[path = "tests/pool_tests.rs"]
mod tests;
