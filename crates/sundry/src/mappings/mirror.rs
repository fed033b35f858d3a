//! Maps with a computed answer for unknown keys

use std::borrow::Borrow;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// A map that answers every lookup with the key itself, unless an
/// override was stored explicitly
///
/// ```
/// use sundry::mappings::Mirror;
///
/// let mut mirror = Mirror::new();
/// mirror.insert("one".to_string(), "two".to_string());
/// assert_eq!(mirror.resolve("zero"), "zero");
/// assert_eq!(mirror.resolve("one"), "two");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Mirror<K> {
    overrides: HashMap<K, K>,
}

impl<K: Eq + Hash> Mirror<K> {
    pub fn new() -> Self {
        Self {
            overrides: HashMap::new(),
        }
    }

    /// Store an explicit override
    pub fn insert(&mut self, key: K, value: K) {
        self.overrides.insert(key, value);
    }

    /// The override for `key`, or `key` itself
    pub fn resolve<'a, Q>(&'a self, key: &'a Q) -> &'a Q
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.overrides.get(key).map(Borrow::borrow).unwrap_or(key)
    }

    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}

impl<K: Eq + Hash> FromIterator<(K, K)> for Mirror<K> {
    fn from_iter<I: IntoIterator<Item = (K, K)>>(iter: I) -> Self {
        Self {
            overrides: iter.into_iter().collect(),
        }
    }
}

/// Answers `true` for the first sighting of a key, `false` afterwards
///
/// ```
/// use sundry::mappings::Once;
///
/// let mut once = Once::new();
/// assert!(once.first("test"));
/// assert!(!once.first("test"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Once<K> {
    seen: HashSet<K>,
}

impl<K: Eq + Hash> Once<K> {
    pub fn new() -> Self {
        Self {
            seen: HashSet::new(),
        }
    }

    pub fn first(&mut self, key: K) -> bool {
        self.seen.insert(key)
    }
}

/// A map whose values may themselves be keys
///
/// `resolve` follows the chain of values until a value has no further
/// mapping, and returns that last value. Cycles resolve to `None`;
/// a key mapped to itself resolves to itself.
///
/// ```
/// use sundry::mappings::RecursiveMap;
///
/// let mut map = RecursiveMap::new();
/// map.insert("one", "two");
/// map.insert("two", "three");
/// assert_eq!(map.resolve(&"one"), Some(&"three"));
/// ```
#[derive(Debug, Clone)]
pub struct RecursiveMap<K> {
    map: HashMap<K, K>,
    limit: usize,
}

impl<K: Eq + Hash + Clone> Default for RecursiveMap<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash + Clone> RecursiveMap<K> {
    pub fn new() -> Self {
        Self::with_limit(5)
    }

    /// Limit the number of hops `resolve` will follow
    pub fn with_limit(limit: usize) -> Self {
        Self {
            map: HashMap::new(),
            limit,
        }
    }

    pub fn insert(&mut self, key: K, value: K) {
        self.map.insert(key, value);
    }

    /// Follow the chain of values starting at `key`
    pub fn resolve(&self, key: &K) -> Option<&K> {
        let mut seen = HashSet::new();
        let mut current = key;
        let mut result = None;
        for _ in 0..self.limit {
            match self.map.get(current) {
                None => return result,
                Some(value) => {
                    if value == current {
                        return Some(value);
                    }
                    if seen.contains(value) {
                        // endless loop
                        return None;
                    }
                    seen.insert(current.clone());
                    result = Some(value);
                    current = value;
                }
            }
        }
        None
    }
}
