//! # Position Indices
//!
//! Owner → positions and pool → positions lookup. Each key maps to a dense
//! array of ids plus an id → slot map; removal swaps the last id into the
//! freed slot and truncates. Enumeration order is therefore NOT stable
//! across removals and carries no meaning; only membership and count do.

use std::collections::HashMap;
use std::hash::Hash;

use crate::types::PositionId;

/// Set of position ids with O(1) insert, remove and membership
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PositionSet {
    ids: Vec<PositionId>,
    slots: HashMap<PositionId, usize>,
}

impl PositionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an id. Returns false if it was already present.
    pub fn insert(&mut self, id: PositionId) -> bool {
        if self.slots.contains_key(&id) {
            return false;
        }
        self.slots.insert(id, self.ids.len());
        self.ids.push(id);
        true
    }

    /// Remove an id by swapping the last entry into its slot. Returns false
    /// if it was not present.
    pub fn remove(&mut self, id: PositionId) -> bool {
        let Some(slot) = self.slots.remove(&id) else {
            return false;
        };
        let last = self.ids.len() - 1;
        if slot != last {
            let moved = self.ids[last];
            self.ids[slot] = moved;
            self.slots.insert(moved, slot);
        }
        self.ids.truncate(last);
        true
    }

    pub fn contains(&self, id: PositionId) -> bool {
        self.slots.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn as_slice(&self) -> &[PositionId] {
        &self.ids
    }

    /// Bounded window: empty when `offset >= len`, otherwise at most `limit`
    /// ids starting at `offset`
    pub fn page(&self, offset: usize, limit: usize) -> &[PositionId] {
        if offset >= self.ids.len() {
            return &[];
        }
        let end = offset.saturating_add(limit).min(self.ids.len());
        &self.ids[offset..end]
    }
}

/// Keyed collection of position sets. Keys whose set becomes empty are
/// dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionIndex<K: Eq + Hash> {
    sets: HashMap<K, PositionSet>,
}

impl<K: Eq + Hash> Default for PositionIndex<K> {
    fn default() -> Self {
        Self {
            sets: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Copy> PositionIndex<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: K, id: PositionId) -> bool {
        self.sets.entry(key).or_default().insert(id)
    }

    pub fn remove(&mut self, key: K, id: PositionId) -> bool {
        let Some(set) = self.sets.get_mut(&key) else {
            return false;
        };
        let removed = set.remove(id);
        if set.is_empty() {
            self.sets.remove(&key);
        }
        removed
    }

    pub fn get(&self, key: &K) -> Option<&PositionSet> {
        self.sets.get(key)
    }

    /// Ids held under `key`, empty when the key is unknown
    pub fn ids(&self, key: &K) -> &[PositionId] {
        self.sets.get(key).map(PositionSet::as_slice).unwrap_or(&[])
    }

    pub fn page(&self, key: &K, offset: usize, limit: usize) -> &[PositionId] {
        self.sets
            .get(key)
            .map(|set| set.page(offset, limit))
            .unwrap_or(&[])
    }

    pub fn count(&self, key: &K) -> usize {
        self.sets.get(key).map(PositionSet::len).unwrap_or(0)
    }

    pub fn contains(&self, key: &K, id: PositionId) -> bool {
        self.sets.get(key).map(|set| set.contains(id)).unwrap_or(false)
    }

    /// Number of keys currently holding at least one position
    pub fn key_count(&self) -> usize {
        self.sets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap_remove_keeps_membership() {
        let mut set = PositionSet::new();
        for id in 1..=5 {
            assert!(set.insert(id));
        }
        assert!(!set.insert(3));

        assert!(set.remove(2));
        assert!(!set.remove(2));
        // Last element moved into the freed slot
        assert_eq!(set.as_slice(), &[1, 5, 3, 4]);
        assert!(set.contains(5));
        assert!(!set.contains(2));

        assert!(set.remove(4));
        assert_eq!(set.as_slice(), &[1, 5, 3]);
        assert!(set.remove(1));
        assert!(set.remove(5));
        assert!(set.remove(3));
        assert!(set.is_empty());
    }

    #[test]
    fn test_page_bounds() {
        let mut set = PositionSet::new();
        for id in 10..15 {
            set.insert(id);
        }
        assert_eq!(set.page(0, 2), &[10, 11]);
        assert_eq!(set.page(3, 10), &[13, 14]);
        assert_eq!(set.page(5, 1), &[] as &[PositionId]);
        assert_eq!(set.page(99, 1), &[] as &[PositionId]);
        assert_eq!(set.page(1, usize::MAX), &[11, 12, 13, 14]);
        assert_eq!(set.page(0, 0), &[] as &[PositionId]);
    }

    #[test]
    fn test_index_drops_empty_keys() {
        let mut index: PositionIndex<u64> = PositionIndex::new();
        index.insert(7, 1);
        index.insert(7, 2);
        index.insert(8, 3);
        assert_eq!(index.key_count(), 2);
        assert_eq!(index.count(&7), 2);

        assert!(index.remove(8, 3));
        assert_eq!(index.key_count(), 1);
        assert!(index.get(&8).is_none());
        assert!(!index.remove(8, 3));
        assert!(index.ids(&8).is_empty());
        assert!(index.contains(&7, 2));
    }
}
