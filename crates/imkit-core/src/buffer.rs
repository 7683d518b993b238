//! Double-ended linear allocator over a single byte block.
//!
//! The front side grows upward from offset zero and holds per-frame data
//! (draw commands). The back side grows downward from the end of the block
//! and holds data that must survive a front reset. A [`Span`] addresses an
//! allocation by offset so it stays valid when a dynamic buffer reallocates.

use crate::allocator::SharedAllocator;
use crate::error::AllocError;
use bytemuck::Pod;

const DEFAULT_GROW_FACTOR: f32 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BufferSide {
    Front,
    Back,
}

impl BufferSide {
    fn index(self) -> usize {
        match self {
            BufferSide::Front => 0,
            BufferSide::Back => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufferKind {
    Fixed,
    Dynamic,
}

/// Location of one allocation.
///
/// Front spans store their absolute start; back spans store the distance from
/// the end of the block, which is preserved when the back region moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    pub side: BufferSide,
    offset: usize,
    pub len: usize,
}

impl Span {
    /// Absolute offset of the allocation inside a block of `capacity` bytes.
    pub fn start(&self, capacity: usize) -> usize {
        match self.side {
            BufferSide::Front => self.offset,
            BufferSide::Back => capacity - self.offset,
        }
    }
}

/// Snapshot returned by [`ArenaBuffer::info`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemoryStatus {
    pub size: usize,
    pub allocated: usize,
    pub needed: usize,
    pub calls: usize,
    pub kind: BufferKind,
}

pub struct ArenaBuffer {
    memory: Vec<u8>,
    kind: BufferKind,
    allocator: Option<SharedAllocator>,
    grow_factor: f32,
    allocated: usize,
    back: usize,
    needed: usize,
    calls: usize,
    markers: [Option<usize>; 2],
}

impl ArenaBuffer {
    /// Growable buffer drawing its memory through `allocator`.
    pub fn new(allocator: SharedAllocator, initial_size: usize, grow_factor: f32) -> Self {
        let grow_factor = if grow_factor > 1.0 {
            grow_factor
        } else {
            DEFAULT_GROW_FACTOR
        };
        let memory = if allocator.alloc(initial_size) {
            vec![0; initial_size]
        } else {
            log::warn!("allocator refused initial arena of {initial_size} bytes");
            Vec::new()
        };
        Self {
            memory,
            kind: BufferKind::Dynamic,
            allocator: Some(allocator),
            grow_factor,
            allocated: 0,
            back: 0,
            needed: 0,
            calls: 0,
            markers: [None; 2],
        }
    }

    /// Fixed buffer of `size` bytes that never grows.
    pub fn fixed(size: usize) -> Self {
        Self::from_block(vec![0; size])
    }

    /// Fixed buffer over a caller-provided block.
    pub fn from_block(block: Vec<u8>) -> Self {
        Self {
            memory: block,
            kind: BufferKind::Fixed,
            allocator: None,
            grow_factor: DEFAULT_GROW_FACTOR,
            allocated: 0,
            back: 0,
            needed: 0,
            calls: 0,
            markers: [None; 2],
        }
    }

    pub fn kind(&self) -> BufferKind {
        self.kind
    }

    pub fn capacity(&self) -> usize {
        self.memory.len()
    }

    /// Current end of the front region.
    pub fn allocated(&self) -> usize {
        self.allocated
    }

    /// Current start of the back region.
    pub fn size(&self) -> usize {
        self.memory.len() - self.back
    }

    pub fn back_used(&self) -> usize {
        self.back
    }

    pub fn needed(&self) -> usize {
        self.needed
    }

    pub fn calls(&self) -> usize {
        self.calls
    }

    /// Allocates `size` bytes aligned to `align` on `side`.
    pub fn alloc(&mut self, side: BufferSide, size: usize, align: usize) -> Result<Span, AllocError> {
        if size == 0 {
            return Err(AllocError::ZeroSize);
        }
        if !align.is_power_of_two() {
            return Err(AllocError::InvalidAlignment(align));
        }
        self.needed += size;

        let mut start = self.aligned_start(side, size, align);
        if start.is_none() {
            self.grow(size + align)?;
            start = self.aligned_start(side, size, align);
        }
        let Some(start) = start else {
            return Err(AllocError::OutOfMemory {
                requested: size,
                available: self.size() - self.allocated,
            });
        };

        self.calls += 1;
        match side {
            BufferSide::Front => {
                self.allocated = start + size;
                Ok(Span {
                    side,
                    offset: start,
                    len: size,
                })
            }
            BufferSide::Back => {
                self.back = self.memory.len() - start;
                Ok(Span {
                    side,
                    offset: self.back,
                    len: size,
                })
            }
        }
    }

    /// Allocates and copies `bytes` in one step.
    pub fn push(&mut self, side: BufferSide, bytes: &[u8], align: usize) -> Result<Span, AllocError> {
        let span = self.alloc(side, bytes.len(), align)?;
        self.bytes_mut(span).copy_from_slice(bytes);
        Ok(span)
    }

    fn aligned_start(&self, side: BufferSide, size: usize, align: usize) -> Option<usize> {
        let boundary = self.size();
        match side {
            BufferSide::Front => {
                let start = (self.allocated + align - 1) & !(align - 1);
                (start.checked_add(size)? <= boundary).then_some(start)
            }
            BufferSide::Back => {
                let start = boundary.checked_sub(size)? & !(align - 1);
                (start >= self.allocated).then_some(start)
            }
        }
    }

    fn grow(&mut self, extra: usize) -> Result<(), AllocError> {
        let capacity = self.memory.len();
        let available = self.size() - self.allocated;
        let Some(allocator) = self.allocator.as_ref().filter(|_| self.kind == BufferKind::Dynamic) else {
            log::warn!("fixed arena of {capacity} bytes exhausted ({available} free, {extra} needed)");
            return Err(AllocError::OutOfMemory {
                requested: extra,
                available,
            });
        };

        let required = self.allocated + self.back + extra;
        let scaled = (capacity as f32 * self.grow_factor) as usize;
        let new_capacity = scaled.max(required).next_power_of_two();
        if !allocator.alloc(new_capacity - capacity) {
            log::warn!("allocator refused arena growth to {new_capacity} bytes");
            return Err(AllocError::AllocatorRefused(new_capacity - capacity));
        }

        self.memory.resize(new_capacity, 0);
        if self.back > 0 {
            self.memory
                .copy_within(capacity - self.back..capacity, new_capacity - self.back);
        }
        log::trace!("arena grew from {capacity} to {new_capacity} bytes");
        Ok(())
    }

    /// Remembers the current fill level of `side` for a later [`reset`](Self::reset).
    pub fn mark(&mut self, side: BufferSide) {
        self.markers[side.index()] = Some(match side {
            BufferSide::Front => self.allocated,
            BufferSide::Back => self.back,
        });
    }

    /// Rolls `side` back to its marker, or empties it when no marker is set.
    pub fn reset(&mut self, side: BufferSide) {
        let marker = self.markers[side.index()].take().unwrap_or(0);
        match side {
            BufferSide::Front => {
                let marker = marker.min(self.allocated);
                self.needed = self.needed.saturating_sub(self.allocated - marker);
                self.allocated = marker;
            }
            BufferSide::Back => {
                let marker = marker.min(self.back);
                self.needed = self.needed.saturating_sub(self.back - marker);
                self.back = marker;
            }
        }
    }

    /// Discards front allocations past `offset`.
    pub fn truncate_front(&mut self, offset: usize) {
        if offset < self.allocated {
            self.needed = self.needed.saturating_sub(self.allocated - offset);
            self.allocated = offset;
        }
    }

    /// Empties both sides; the block itself is kept.
    pub fn clear(&mut self) {
        self.allocated = 0;
        self.back = 0;
        self.needed = 0;
        self.calls = 0;
        self.markers = [None; 2];
    }

    /// Returns a dynamic buffer's block to its allocator. Fixed blocks are
    /// caller-owned and only emptied.
    pub fn free(&mut self) {
        if self.kind == BufferKind::Dynamic {
            let released = std::mem::take(&mut self.memory);
            if let Some(allocator) = &self.allocator {
                allocator.free(released.len());
            }
        }
        self.clear();
    }

    pub fn info(&self) -> MemoryStatus {
        MemoryStatus {
            size: self.memory.len(),
            allocated: self.allocated + self.back,
            needed: self.needed,
            calls: self.calls,
            kind: self.kind,
        }
    }

    pub fn bytes(&self, span: Span) -> &[u8] {
        let start = span.start(self.memory.len());
        &self.memory[start..start + span.len]
    }

    pub fn bytes_mut(&mut self, span: Span) -> &mut [u8] {
        let start = span.start(self.memory.len());
        &mut self.memory[start..start + span.len]
    }

    /// Everything allocated on the front side so far.
    pub fn front(&self) -> &[u8] {
        &self.memory[..self.allocated]
    }

    /// Reads a value stored at an absolute front offset.
    pub fn read<T: Pod>(&self, offset: usize) -> Option<T> {
        let end = offset.checked_add(std::mem::size_of::<T>())?;
        let bytes = self.memory.get(offset..end)?;
        Some(bytemuck::pod_read_unaligned(bytes))
    }

    /// Overwrites a value stored at an absolute front offset.
    pub fn write<T: Pod>(&mut self, offset: usize, value: &T) -> bool {
        let Some(end) = offset.checked_add(std::mem::size_of::<T>()) else {
            return false;
        };
        match self.memory.get_mut(offset..end) {
            Some(bytes) => {
                bytes.copy_from_slice(bytemuck::bytes_of(value));
                true
            }
            None => false,
        }
    }

    /// Borrows `len` bytes at an absolute offset.
    pub fn slice(&self, offset: usize, len: usize) -> Option<&[u8]> {
        self.memory.get(offset..offset.checked_add(len)?)
    }
}

impl Drop for ArenaBuffer {
    fn drop(&mut self) {
        self.free();
    }
}

impl std::fmt::Debug for ArenaBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArenaBuffer")
            .field("kind", &self.kind)
            .field("capacity", &self.memory.len())
            .field("allocated", &self.allocated)
            .field("back", &self.back)
            .field("needed", &self.needed)
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/buffer_tests.rs"]
mod tests;
