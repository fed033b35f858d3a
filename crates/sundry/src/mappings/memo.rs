//! A caching proxy around a function

use std::collections::HashMap;
use std::hash::Hash;

/// Caches the results of a function call per key
///
/// An optional normalization function canonicalizes keys before lookup,
/// so equivalent spellings share one cache slot.
///
/// ```
/// use sundry::mappings::Memo;
///
/// let mut triple = Memo::new(|n: &u32| n * 3);
/// assert_eq!(*triple.get(2), 6);
/// assert_eq!(triple.len(), 1);
/// ```
pub struct Memo<K, V> {
    cache: HashMap<K, V>,
    func: Box<dyn Fn(&K) -> V>,
    normalize: Option<Box<dyn Fn(K) -> K>>,
}

impl<K: Eq + Hash, V> Memo<K, V> {
    pub fn new(func: impl Fn(&K) -> V + 'static) -> Self {
        Self {
            cache: HashMap::new(),
            func: Box::new(func),
            normalize: None,
        }
    }

    /// A memo whose keys are canonicalized before lookup
    ///
    /// ```
    /// use sundry::mappings::Memo;
    ///
    /// let mut sorted_chars = Memo::with_normalize(
    ///     |s: &String| s.len(),
    ///     |s: String| {
    ///         let mut chars: Vec<char> = s.chars().collect();
    ///         chars.sort_unstable();
    ///         chars.dedup();
    ///         chars.into_iter().collect()
    ///     },
    /// );
    /// assert_eq!(*sorted_chars.get("onetwo".to_string()), 5);
    /// assert_eq!(*sorted_chars.get("twoone".to_string()), 5);
    /// assert_eq!(sorted_chars.len(), 1);
    /// ```
    pub fn with_normalize(
        func: impl Fn(&K) -> V + 'static,
        normalize: impl Fn(K) -> K + 'static,
    ) -> Self {
        Self {
            cache: HashMap::new(),
            func: Box::new(func),
            normalize: Some(Box::new(normalize)),
        }
    }

    /// The cached value for `key`, computing it on the first access
    pub fn get(&mut self, key: K) -> &V {
        let key = match &self.normalize {
            Some(normalize) => normalize(key),
            None => key,
        };
        let Self { cache, func, .. } = self;
        cache.entry(key).or_insert_with_key(|k| func(k))
    }

    /// Pre-seed the cache, bypassing the function
    pub fn put(&mut self, key: K, value: V) {
        let key = match &self.normalize {
            Some(normalize) => normalize(key),
            None => key,
        };
        self.cache.insert(key, value);
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

impl<K, V> std::fmt::Debug for Memo<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memo").field("cached", &self.cache.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_memo_calls_function_once_per_key() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let mut memo = Memo::new(move |n: &u32| {
            counter.set(counter.get() + 1);
            n + 1
        });
        assert_eq!(*memo.get(1), 2);
        assert_eq!(*memo.get(1), 2);
        assert_eq!(*memo.get(2), 3);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_memo_put_overrides() {
        let mut memo = Memo::new(|n: &u32| n * 10);
        memo.put(3, 7);
        assert_eq!(*memo.get(3), 7);
    }
}
