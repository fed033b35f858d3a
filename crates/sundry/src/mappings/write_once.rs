//! A map whose entries may be written only once

use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

use sundry_core::{Error, Result};

/// A map that refuses to overwrite or delete existing entries
///
/// Useful for registries that are filled during startup and must not
/// change afterwards. The tolerant flavour accepts re-insertion of the
/// *same* value, which keeps idempotent registration code simple.
///
/// ```
/// use sundry::mappings::WriteOnce;
///
/// let mut registry = WriteOnce::new();
/// registry.insert("eins", 1).unwrap();
/// assert!(registry.insert("eins", 2).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct WriteOnce<K, V> {
    map: HashMap<K, V>,
    tolerant: bool,
    frozen: bool,
}

impl<K, V> Default for WriteOnce<K, V>
where
    K: Eq + Hash + Display,
    V: PartialEq,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> WriteOnce<K, V>
where
    K: Eq + Hash + Display,
    V: PartialEq,
{
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
            tolerant: false,
            frozen: false,
        }
    }

    /// A write-once map that accepts re-insertion of an equal value
    pub fn tolerant() -> Self {
        Self {
            map: HashMap::new(),
            tolerant: true,
            frozen: false,
        }
    }

    /// Refuse any further insertion, even of new keys
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn insert(&mut self, key: K, value: V) -> Result<()> {
        if self.frozen {
            return Err(Error::Frozen {
                key: key.to_string(),
            });
        }
        match self.map.get(&key) {
            None => {
                self.map.insert(key, value);
                Ok(())
            }
            Some(existing) if self.tolerant && *existing == value => Ok(()),
            Some(_) => Err(Error::Overwrite {
                key: key.to_string(),
            }),
        }
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.map.get(key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.map.iter()
    }
}
