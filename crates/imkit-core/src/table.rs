use crate::hash::Hash;
use crate::pool::PoolId;

/// Entries per state table page.
pub const VALUE_PAGE_CAPACITY: usize = 32;

/// One page of a window's persistent key/value store.
///
/// Pages form a doubly linked chain per window; the newest page is the head
/// and takes insertions until it is full.
#[derive(Clone, Debug)]
pub struct StateTable {
    pub seq: u32,
    size: usize,
    keys: [Hash; VALUE_PAGE_CAPACITY],
    values: [u32; VALUE_PAGE_CAPACITY],
    pub next: Option<PoolId>,
    pub prev: Option<PoolId>,
}

impl StateTable {
    pub fn new(seq: u32) -> Self {
        Self {
            seq,
            size: 0,
            keys: [0; VALUE_PAGE_CAPACITY],
            values: [0; VALUE_PAGE_CAPACITY],
            next: None,
            prev: None,
        }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn is_full(&self) -> bool {
        self.size >= VALUE_PAGE_CAPACITY
    }

    pub fn find(&self, key: Hash) -> Option<usize> {
        self.keys[..self.size].iter().position(|k| *k == key)
    }

    /// Appends an entry, returning its index, or `None` when the page is full.
    pub fn insert(&mut self, key: Hash, value: u32) -> Option<usize> {
        if self.is_full() {
            return None;
        }
        let index = self.size;
        self.keys[index] = key;
        self.values[index] = value;
        self.size += 1;
        Some(index)
    }

    pub fn value(&self, index: usize) -> Option<u32> {
        (index < self.size).then(|| self.values[index])
    }

    pub fn set_value(&mut self, index: usize, value: u32) -> bool {
        if index < self.size {
            self.values[index] = value;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_until_full() {
        let mut table = StateTable::new(1);
        for key in 0..VALUE_PAGE_CAPACITY as u32 {
            assert_eq!(table.insert(key + 100, key), Some(key as usize));
        }
        assert!(table.is_full());
        assert_eq!(table.insert(7, 7), None);
        assert_eq!(table.find(105).and_then(|i| table.value(i)), Some(5));
        assert_eq!(table.find(7), None);
    }

    #[test]
    fn values_outside_size_are_hidden() {
        let mut table = StateTable::new(0);
        assert_eq!(table.value(0), None);
        assert!(!table.set_value(0, 1));
        let index = table.insert(9, 1).expect("insert");
        assert!(table.set_value(index, 4));
        assert_eq!(table.value(index), Some(4));
    }
}
