//! A bidirectional map

use std::collections::HashMap;
use std::hash::Hash;

/// A map queryable from both sides
///
/// Every left key maps to exactly one right key and vice versa.
/// Inserting a pair evicts any pair that shares either side, so the
/// one-to-one property always holds.
///
/// ```
/// use sundry::mappings::BiMap;
///
/// let mut codes = BiMap::new();
/// codes.insert("EUR", '€');
/// assert_eq!(codes.get_by_left(&"EUR"), Some(&'€'));
/// assert_eq!(codes.get_by_right(&'€'), Some(&"EUR"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct BiMap<L, R> {
    fwd: HashMap<L, R>,
    rev: HashMap<R, L>,
}

impl<L, R> BiMap<L, R>
where
    L: Eq + Hash + Clone,
    R: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            fwd: HashMap::new(),
            rev: HashMap::new(),
        }
    }

    /// Insert a pair, evicting any pair sharing either side
    pub fn insert(&mut self, left: L, right: R) {
        if let Some(old_right) = self.fwd.remove(&left) {
            self.rev.remove(&old_right);
        }
        if let Some(old_left) = self.rev.remove(&right) {
            self.fwd.remove(&old_left);
        }
        self.fwd.insert(left.clone(), right.clone());
        self.rev.insert(right, left);
    }

    pub fn get_by_left(&self, left: &L) -> Option<&R> {
        self.fwd.get(left)
    }

    pub fn get_by_right(&self, right: &R) -> Option<&L> {
        self.rev.get(right)
    }

    pub fn contains_left(&self, left: &L) -> bool {
        self.fwd.contains_key(left)
    }

    pub fn contains_right(&self, right: &R) -> bool {
        self.rev.contains_key(right)
    }

    /// Remove the pair holding `left`, returning its right side
    pub fn remove_by_left(&mut self, left: &L) -> Option<R> {
        let right = self.fwd.remove(left)?;
        self.rev.remove(&right);
        Some(right)
    }

    /// Remove the pair holding `right`, returning its left side
    pub fn remove_by_right(&mut self, right: &R) -> Option<L> {
        let left = self.rev.remove(right)?;
        self.fwd.remove(&left);
        Some(left)
    }

    pub fn len(&self) -> usize {
        self.fwd.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fwd.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&L, &R)> {
        self.fwd.iter()
    }
}

impl<L, R> FromIterator<(L, R)> for BiMap<L, R>
where
    L: Eq + Hash + Clone,
    R: Eq + Hash + Clone,
{
    fn from_iter<I: IntoIterator<Item = (L, R)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (left, right) in iter {
            map.insert(left, right);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_bimap_both_directions() {
        let mut map = BiMap::new();
        map.insert(1, "one");
        map.insert(2, "two");
        assert_eq!(map.get_by_left(&1), Some(&"one"));
        assert_eq!(map.get_by_right(&"two"), Some(&2));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_bimap_insert_evicts_shared_left() {
        let mut map = BiMap::new();
        map.insert(1, "one");
        map.insert(1, "uno");
        assert_eq!(map.len(), 1);
        assert_eq!(map.get_by_left(&1), Some(&"uno"));
        assert_eq!(map.get_by_right(&"one"), None);
    }

    #[test]
    fn test_bimap_insert_evicts_shared_right() {
        let mut map = BiMap::new();
        map.insert(1, "one");
        map.insert(2, "one");
        assert_eq!(map.len(), 1);
        assert_eq!(map.get_by_left(&1), None);
        assert_eq!(map.get_by_right(&"one"), Some(&2));
    }

    #[test]
    fn test_bimap_remove() {
        let mut map = BiMap::new();
        map.insert('a', 1);
        map.insert('b', 2);
        assert_eq!(map.remove_by_left(&'a'), Some(1));
        assert_eq!(map.get_by_right(&1), None);
        assert_eq!(map.remove_by_right(&2), Some('b'));
        assert!(map.is_empty());
    }

    proptest! {
        #[test]
        fn prop_bimap_sides_stay_consistent(pairs in proptest::collection::vec((0u8..20, 0u8..20), 0..50)) {
            let map: BiMap<u8, u8> = pairs.into_iter().collect();
            for (left, right) in map.iter() {
                prop_assert_eq!(map.get_by_right(right), Some(left));
            }
            prop_assert_eq!(map.len(), map.iter().count());
        }
    }
}
