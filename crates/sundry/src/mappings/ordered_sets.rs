//! Named sets with a significant key order
//!
//! Built for workflow bookkeeping: items are filed under status keys,
//! and the key registered first wins when an item appears under several.

use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};

/// A map of named sets whose key order is significant
///
/// ```
/// use sundry::mappings::OrderedSets;
///
/// let mut done = OrderedSets::new();
/// done.add("abc123", "published");
/// done.add("abc123", "visible");
/// assert_eq!(done.first_hit(&"abc123"), Some("published"));
/// assert_eq!(done.total_len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct OrderedSets<T> {
    sets: IndexMap<String, IndexSet<T>>,
}

impl<T: Eq + Hash> OrderedSets<T> {
    pub fn new() -> Self {
        Self {
            sets: IndexMap::new(),
        }
    }

    /// Pre-register keys to fix their ranking
    pub fn with_keys(keys: &[&str]) -> Self {
        let mut res = Self::new();
        for key in keys {
            res.add_set(key);
        }
        res
    }

    /// Register a key, creating an empty set if it is new
    ///
    /// Registering early pins the key's rank even while its set is
    /// still empty.
    pub fn add_set(&mut self, key: &str) {
        self.sets.entry(key.to_string()).or_default();
    }

    /// File `item` under `key`, creating the set on demand
    pub fn add(&mut self, item: T, key: &str) {
        self.sets.entry(key.to_string()).or_default().insert(item);
    }

    pub fn get(&self, key: &str) -> Option<&IndexSet<T>> {
        self.sets.get(key)
    }

    /// The keys in registration order
    pub fn ordered_keys(&self) -> Vec<&str> {
        self.sets.keys().map(String::as_str).collect()
    }

    /// The first registered key whose set contains `item`
    pub fn first_hit(&self, item: &T) -> Option<&str> {
        self.first_hit_until(item, None)
    }

    /// Like [`first_hit`](Self::first_hit), but stop looking after
    /// `last_key`
    pub fn first_hit_until(&self, item: &T, last_key: Option<&str>) -> Option<&str> {
        for (key, set) in &self.sets {
            if set.contains(item) {
                return Some(key);
            }
            if Some(key.as_str()) == last_key {
                break;
            }
        }
        None
    }

    /// The cumulated size of all named sets
    pub fn total_len(&self) -> usize {
        self.sets.values().map(IndexSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_len() == 0
    }
}

/// Named sets of filesystem roots, for inherited properties
///
/// Paths are normalized on insertion and lookup. A lookup matches when
/// a stored root is a segment-wise prefix of the queried path; the
/// longest matching root wins, and among equally long roots the
/// earliest registered key.
///
/// ```
/// use sundry::mappings::RootsMap;
///
/// let mut roots = RootsMap::new();
/// roots.add("/path/without/slash", "published");
/// roots.add("/path/elsewhere", "visible");
/// assert_eq!(roots.first_hit("/path/without/slash/and/below"), Some("published"));
/// assert_eq!(roots.first_hit("/unknown/path"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RootsMap {
    sets: IndexMap<String, IndexSet<Vec<String>>>,
}

impl RootsMap {
    pub fn new() -> Self {
        Self {
            sets: IndexMap::new(),
        }
    }

    pub fn with_keys(keys: &[&str]) -> Self {
        let mut res = Self::new();
        for key in keys {
            res.add_set(key);
        }
        res
    }

    pub fn add_set(&mut self, key: &str) {
        self.sets.entry(key.to_string()).or_default();
    }

    /// File a root path under `key`
    pub fn add(&mut self, root: &str, key: &str) {
        self.sets
            .entry(key.to_string())
            .or_default()
            .insert(normalize_segments(root));
    }

    pub fn ordered_keys(&self) -> Vec<&str> {
        self.sets.keys().map(String::as_str).collect()
    }

    /// The key owning the longest root that is a prefix of `path`
    pub fn first_hit(&self, path: &str) -> Option<&str> {
        self.first_hit_until(path, None)
    }

    /// Like [`first_hit`](Self::first_hit), restricted to the keys up
    /// to and including `last_key`
    pub fn first_hit_until(&self, path: &str, last_key: Option<&str>) -> Option<&str> {
        let wanted = normalize_segments(path);
        let mut best: Option<(usize, usize, &str)> = None;
        for (rank, (key, roots)) in self.sets.iter().enumerate() {
            for root in roots {
                if root.len() <= wanted.len() && wanted[..root.len()] == root[..] {
                    let better = match best {
                        None => true,
                        // longer roots win; rank breaks ties
                        Some((len, brank, _)) => {
                            root.len() > len || (root.len() == len && rank < brank)
                        }
                    };
                    if better {
                        best = Some((root.len(), rank, key));
                    }
                }
            }
            if Some(key.as_str()) == last_key {
                break;
            }
        }
        best.map(|(_, _, key)| key)
    }
}

/// Normalize a POSIX path into its segments
///
/// Absolute paths keep a leading empty segment; `.` segments, empty
/// segments and trailing slashes disappear, `..` consumes the segment
/// before it where possible.
fn normalize_segments(path: &str) -> Vec<String> {
    let absolute = path.starts_with('/');
    let mut segs: Vec<String> = Vec::new();
    if absolute {
        segs.push(String::new());
    }
    for seg in path.split('/') {
        match seg {
            "" | "." => {}
            ".." => {
                let floor = usize::from(absolute);
                let ascending = matches!(segs.last(), Some(s) if s == "..");
                if segs.len() > floor && !ascending {
                    segs.pop();
                } else if !absolute {
                    segs.push("..".to_string());
                }
            }
            other => segs.push(other.to_string()),
        }
    }
    segs
}
