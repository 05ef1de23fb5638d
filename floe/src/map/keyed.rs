use std::cmp::Ordering;
use std::rc::Rc;

use ahash::{HashMap, HashMapExt};

use crate::error;
use crate::key::{Key, KeyHash};
use crate::sequence::Sequence;

use super::iter::Entries;

/// One slot of the deduplicated view: the computed key hash, the canonical
/// key and the last-written value.
#[derive(Debug, Clone)]
pub(crate) struct Entry<K, V> {
    pub(crate) hash: KeyHash,
    pub(crate) key: K,
    pub(crate) value: V,
}

/// An immutable associative container built from an ordered sequence of
/// key/value pairs.
///
/// The raw pairs are kept exactly as supplied, duplicates included, and
/// are reachable through [`items`](Self::items). Everything else operates on
/// the deduplicated view: unique keys in order of first occurrence, each
/// carrying the value of its last occurrence among the pairs.
///
/// ```
/// use floe::KeyedMap;
///
/// let map = KeyedMap::new(vec![(1, "one"), (2, "two"), (1, "uno")]).unwrap();
/// assert_eq!(map.len(), 2);
/// assert_eq!(map.get(&1), Ok(&"uno"));
/// assert_eq!(map.keys().items(), &[1, 2]);
/// ```
#[derive(Debug, Clone)]
pub struct KeyedMap<K, V> {
    items: Rc<[(K, V)]>,
    entries: Rc<[Entry<K, V>]>,
    index: Rc<HashMap<KeyHash, usize>>,
}

impl<K: Key + Clone, V: Clone> KeyedMap<K, V> {
    /// Build a map from ordered pairs.
    ///
    /// A duplicated key keeps the position of its first occurrence and takes
    /// the value of its last. Fails with [`error::Error::InvalidKeyType`]
    /// when a key is not key-eligible.
    pub fn new(pairs: Vec<(K, V)>) -> error::Result<Self> {
        let mut index: HashMap<KeyHash, usize> = HashMap::with_capacity(pairs.len());
        let mut entries: Vec<Entry<K, V>> = Vec::with_capacity(pairs.len());
        for (key, value) in &pairs {
            let hash = key.key_hash()?;
            match index.get(&hash) {
                Some(&slot) => {
                    entries[slot].key = key.clone();
                    entries[slot].value = value.clone();
                }
                None => {
                    index.insert(hash.clone(), entries.len());
                    entries.push(Entry {
                        hash,
                        key: key.clone(),
                        value: value.clone(),
                    });
                }
            }
        }
        Ok(KeyedMap {
            items: pairs.into(),
            entries: entries.into(),
            index: Rc::new(index),
        })
    }

    // entries are already deduplicated and validated; the raw pairs of the
    // result are the entries themselves
    fn from_entries(entries: Vec<Entry<K, V>>) -> Self {
        let mut index = HashMap::with_capacity(entries.len());
        for (slot, entry) in entries.iter().enumerate() {
            index.insert(entry.hash.clone(), slot);
        }
        let items: Vec<(K, V)> = entries
            .iter()
            .map(|entry| (entry.key.clone(), entry.value.clone()))
            .collect();
        KeyedMap {
            items: items.into(),
            entries: entries.into(),
            index: Rc::new(index),
        }
    }

    /// Concatenate the raw pairs of `self` and `other` and rebuild: a key
    /// present in both keeps its first position and takes its last value.
    pub fn merge(&self, other: &KeyedMap<K, V>) -> Self {
        let mut index: HashMap<KeyHash, usize> =
            HashMap::with_capacity(self.entries.len() + other.entries.len());
        let mut entries: Vec<Entry<K, V>> =
            Vec::with_capacity(self.entries.len() + other.entries.len());
        for entry in self.entries.iter().chain(other.entries.iter()) {
            match index.get(&entry.hash) {
                Some(&slot) => {
                    entries[slot].key = entry.key.clone();
                    entries[slot].value = entry.value.clone();
                }
                None => {
                    index.insert(entry.hash.clone(), entries.len());
                    entries.push(entry.clone());
                }
            }
        }
        let mut items = Vec::with_capacity(self.items.len() + other.items.len());
        items.extend_from_slice(&self.items);
        items.extend_from_slice(&other.items);
        KeyedMap {
            items: items.into(),
            entries: entries.into(),
            index: Rc::new(index),
        }
    }

    /// Add or overwrite one pair, as a merge with a singleton map.
    ///
    /// An existing key keeps its position in iteration order; a new key is
    /// appended at the end.
    pub fn put(&self, key: K, value: V) -> error::Result<Self> {
        Ok(self.merge(&KeyedMap::new(vec![(key, value)])?))
    }

    /// The unique keys, in first-occurrence order.
    pub fn keys(&self) -> Sequence<K> {
        self.entries.iter().map(|entry| entry.key.clone()).collect()
    }

    /// The value for each unique key, in key order.
    pub fn values(&self) -> Sequence<V> {
        self.entries
            .iter()
            .map(|entry| entry.value.clone())
            .collect()
    }

    /// The raw backing pairs, duplicates included, in input order.
    pub fn items(&self) -> Sequence<(K, V)> {
        Sequence::from_shared(self.items.clone())
    }

    /// Project every `(value, key)` through `f` into a flat sequence. The
    /// key is consumed by the projection, not preserved.
    pub fn map<U>(&self, mut f: impl FnMut(&V, &K) -> U) -> Sequence<U> {
        self.entries
            .iter()
            .map(|entry| f(&entry.value, &entry.key))
            .collect()
    }

    /// Keep the entries matching the predicate, in order.
    pub fn filter(&self, mut predicate: impl FnMut(&V, &K) -> bool) -> Self {
        let entries = self
            .entries
            .iter()
            .filter(|entry| predicate(&entry.value, &entry.key))
            .cloned()
            .collect();
        Self::from_entries(entries)
    }

    /// Reorder the unique entries by comparing keys; values stay with their
    /// keys. Stable.
    pub fn sort_keys(&self, mut comparator: impl FnMut(&K, &K) -> Ordering) -> Self {
        let mut entries = self.entries.to_vec();
        entries.sort_by(|a, b| comparator(&a.key, &b.key));
        Self::from_entries(entries)
    }

    /// Swap key and value roles.
    ///
    /// Every value must itself be key-eligible, otherwise this is
    /// [`error::Error::InvalidKeyType`]. A value occurring under several
    /// keys collapses to one entry, last key winning, like any other
    /// duplicated key.
    pub fn flip(&self) -> error::Result<KeyedMap<V, K>>
    where
        V: Key,
    {
        self.values().combine(&self.keys())
    }

    /// Reorder the entries by comparing values, via a double
    /// [`flip`](Self::flip), so the values must themselves be key-eligible.
    pub fn sort_values(&self, comparator: impl FnMut(&V, &V) -> Ordering) -> error::Result<Self>
    where
        V: Key,
    {
        self.flip()?.sort_keys(comparator).flip()
    }
}

impl<K: Key, V> KeyedMap<K, V> {
    /// The value stored under `key`.
    ///
    /// An absent key is a contract violation: [`error::Error::KeyNotFound`].
    /// Use [`get_or`](Self::get_or) when absence is expected.
    pub fn get(&self, key: &K) -> error::Result<&V> {
        let hash = key.key_hash()?;
        self.index
            .get(&hash)
            .map(|&slot| &self.entries[slot].value)
            .ok_or(error::Error::KeyNotFound)
    }

    /// The value stored under `key`, or `default` when the key is absent.
    pub fn get_or(&self, key: &K, default: V) -> V
    where
        V: Clone,
    {
        match self.get(key) {
            Ok(value) => value.clone(),
            Err(_) => default,
        }
    }
}

impl<K, V> KeyedMap<K, V> {
    /// The number of unique keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the deduplicated `(key, value)` entries in
    /// first-occurrence order.
    pub fn iter(&self) -> Entries<'_, K, V> {
        Entries::new(self.entries.iter())
    }

    /// Traverse the deduplicated view in order.
    pub fn each(&self, mut f: impl FnMut(&V, &K)) {
        for entry in self.entries.iter() {
            f(&entry.value, &entry.key);
        }
    }

    pub fn exists(&self, mut predicate: impl FnMut(&V, &K) -> bool) -> bool {
        self.entries
            .iter()
            .any(|entry| predicate(&entry.value, &entry.key))
    }

    /// The first key whose entry matches the predicate, or `None`.
    pub fn find_key(&self, mut predicate: impl FnMut(&V, &K) -> bool) -> Option<&K> {
        self.entries
            .iter()
            .find(|entry| predicate(&entry.value, &entry.key))
            .map(|entry| &entry.key)
    }

    /// The first value whose entry matches the predicate, or `None`.
    pub fn find_value(&self, mut predicate: impl FnMut(&V, &K) -> bool) -> Option<&V> {
        self.entries
            .iter()
            .find(|entry| predicate(&entry.value, &entry.key))
            .map(|entry| &entry.value)
    }

    pub fn first_key(&self) -> Option<&K> {
        self.entries.first().map(|entry| &entry.key)
    }

    pub fn first_value(&self) -> Option<&V> {
        self.entries.first().map(|entry| &entry.value)
    }
}

// the raw pairs determine the deduplicated view, so they decide equality
impl<K: PartialEq, V: PartialEq> PartialEq for KeyedMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<K: Eq, V: Eq> Eq for KeyedMap<K, V> {}

impl<K, V> Default for KeyedMap<K, V> {
    fn default() -> Self {
        KeyedMap {
            items: Vec::new().into(),
            entries: Vec::new().into(),
            index: Rc::new(HashMap::new()),
        }
    }
}

impl<K: Key + Clone, V: Clone> TryFrom<Vec<(K, V)>> for KeyedMap<K, V> {
    type Error = error::Error;

    fn try_from(pairs: Vec<(K, V)>) -> error::Result<Self> {
        Self::new(pairs)
    }
}

impl<'a, K, V> IntoIterator for &'a KeyedMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Entries<'a, K, V>;

    fn into_iter(self) -> Entries<'a, K, V> {
        self.iter()
    }
}
