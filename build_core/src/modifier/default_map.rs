//! DefaultMap - An ordered map that answers absent keys with `V::default()`

use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};

/// Ordered map where a lookup of a missing key yields the default value
/// instead of `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DefaultMap<K: Ord, V> {
    inner: BTreeMap<K, V>,
}

impl<K: Ord, V> Default for DefaultMap<K, V> {
    fn default() -> Self {
        DefaultMap {
            inner: BTreeMap::new(),
        }
    }
}

impl<K: Ord, V: Clone + Default> DefaultMap<K, V> {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Value for `key`, or `V::default()` when absent
    pub fn get(&self, key: &K) -> V {
        self.inner.get(key).cloned().unwrap_or_default()
    }

    /// Mutable access to the value for `key`, inserting the default first
    pub fn entry(&mut self, key: K) -> &mut V {
        self.inner.entry(key).or_default()
    }

    /// Insert a value, returning the previous one if present
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.inner.insert(key, value)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.contains_key(key)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, K, V> {
        self.inner.iter()
    }

    pub fn iter_mut(&mut self) -> btree_map::IterMut<'_, K, V> {
        self.inner.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for DefaultMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        DefaultMap {
            inner: iter.into_iter().collect(),
        }
    }
}

impl<'a, K: Ord, V> IntoIterator for &'a DefaultMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = btree_map::Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}
