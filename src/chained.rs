use crate::error::{self, InvalidArgument};

use std::borrow::Borrow;
use std::collections::hash_map::RandomState;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::iter::FusedIterator;
use std::{iter, slice};

const DEFAULT_CAPACITY: usize = 3;
const DEFAULT_LOAD_FACTOR: f64 = 0.75;

/// A hash table that resolves collisions by chaining entries in per-bucket lists.
///
/// Unlike [`HashTable`](crate::HashTable), removal never leaves anything
/// behind, and lookups never move entries, so all reads take `&self`. The
/// table doubles its bucket count once it holds more than
/// `capacity * load_factor` entries.
///
/// # Examples
///
/// ```
/// use probemap::SeparateChainingHashTable;
///
/// let mut table = SeparateChainingHashTable::new();
/// table.insert("a", 1);
/// table.insert("b", 2);
/// assert_eq!(table.get("a"), Some(&1));
/// assert_eq!(table.remove("b"), Some(2));
/// assert_eq!(table.len(), 1);
/// ```
#[derive(Clone)]
pub struct SeparateChainingHashTable<K, V, S = RandomState> {
    buckets: Box<[Vec<Entry<K, V>>]>,
    len: usize,
    threshold: usize,
    load_factor: f64,
    hasher: S,
}

#[derive(Clone)]
struct Entry<K, V> {
    // Cached so that resizing does not rehash keys.
    hash: u64,
    key: K,
    value: V,
}

fn empty_buckets<K, V>(capacity: usize) -> Box<[Vec<Entry<K, V>>]> {
    iter::repeat_with(Vec::new).take(capacity).collect()
}

impl<K, V> SeparateChainingHashTable<K, V> {
    /// Creates an empty table with 3 buckets and a load factor of 0.75.
    pub fn new() -> SeparateChainingHashTable<K, V> {
        SeparateChainingHashTable::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty table with at least `capacity` buckets.
    pub fn with_capacity(capacity: usize) -> SeparateChainingHashTable<K, V> {
        SeparateChainingHashTable::raw(capacity, DEFAULT_LOAD_FACTOR, RandomState::new())
    }

    /// Creates an empty table with at least `capacity` buckets and the given
    /// load factor.
    ///
    /// Returns an error if the load factor is not a finite, positive number.
    pub fn with_capacity_and_load_factor(
        capacity: usize,
        load_factor: f64,
    ) -> Result<SeparateChainingHashTable<K, V>, InvalidArgument> {
        let load_factor = error::check_load_factor(load_factor)?;
        Ok(SeparateChainingHashTable::raw(
            capacity,
            load_factor,
            RandomState::new(),
        ))
    }
}

impl<K, V, S> SeparateChainingHashTable<K, V, S> {
    /// Creates an empty table which will use the given hash builder to hash keys.
    pub fn with_hasher(hasher: S) -> SeparateChainingHashTable<K, V, S> {
        SeparateChainingHashTable::raw(DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR, hasher)
    }

    fn raw(capacity: usize, load_factor: f64, hasher: S) -> SeparateChainingHashTable<K, V, S> {
        let capacity = capacity.max(DEFAULT_CAPACITY);

        SeparateChainingHashTable {
            buckets: empty_buckets(capacity),
            len: 0,
            threshold: (capacity as f64 * load_factor) as usize,
            load_factor,
            hasher,
        }
    }

    /// Returns the number of entries in the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the table contains no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of buckets in the table.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Removes every entry from the table, keeping its buckets.
    pub fn clear(&mut self) {
        self.buckets.iter_mut().for_each(Vec::clear);
        self.len = 0;
    }

    /// An iterator visiting all key-value pairs, bucket by bucket.
    pub fn iter(&self) -> ChainIter<'_, K, V> {
        ChainIter {
            buckets: self.buckets.iter(),
            bucket: Default::default(),
            remaining: self.len,
        }
    }

    /// An iterator visiting all keys, bucket by bucket.
    pub fn keys(&self) -> ChainKeys<'_, K, V> {
        ChainKeys { iter: self.iter() }
    }

    /// An iterator visiting all values, bucket by bucket.
    pub fn values(&self) -> ChainValues<'_, K, V> {
        ChainValues { iter: self.iter() }
    }

    #[inline]
    fn bucket_index(&self, hash: u64) -> usize {
        (hash % self.buckets.len() as u64) as usize
    }

    fn resize(&mut self) {
        let capacity = self.buckets.len() * 2;
        log::debug!(
            "resizing chained table from {} to {capacity} buckets ({} entries)",
            self.buckets.len(),
            self.len
        );

        self.threshold = (capacity as f64 * self.load_factor) as usize;
        let old = std::mem::replace(&mut self.buckets, empty_buckets(capacity));
        for entry in old.into_vec().into_iter().flatten() {
            let index = self.bucket_index(entry.hash);
            self.buckets[index].push(entry);
        }
    }
}

impl<K, V, S> SeparateChainingHashTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Inserts a key-value pair, returning the previous value for the key.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let hash = self.hasher.hash_one(&key);
        let index = self.bucket_index(hash);
        let bucket = &mut self.buckets[index];

        if let Some(entry) = bucket.iter_mut().find(|entry| entry.key == key) {
            return Some(std::mem::replace(&mut entry.value, value));
        }

        bucket.push(Entry { hash, key, value });
        self.len += 1;
        if self.len > self.threshold {
            self.resize();
        }

        None
    }

    fn entry<Q>(&self, key: &Q) -> Option<&Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hasher.hash_one(key);
        self.buckets[self.bucket_index(hash)]
            .iter()
            .find(|entry| <K as Borrow<Q>>::borrow(&entry.key) == key)
    }

    /// Returns a reference to the value corresponding to the key.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entry(key).map(|entry| &entry.value)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hasher.hash_one(key);
        let index = self.bucket_index(hash);
        self.buckets[index]
            .iter_mut()
            .find(|entry| <K as Borrow<Q>>::borrow(&entry.key) == key)
            .map(|entry| &mut entry.value)
    }

    /// Returns `true` if the table contains a value for the specified key.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entry(key).is_some()
    }

    /// Removes a key from the table, returning its value if it was present.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hasher.hash_one(key);
        let index = self.bucket_index(hash);
        let bucket = &mut self.buckets[index];

        let position = bucket
            .iter()
            .position(|entry| <K as Borrow<Q>>::borrow(&entry.key) == key)?;
        let entry = bucket.swap_remove(position);
        self.len -= 1;
        Some(entry.value)
    }
}

impl<K, V> Default for SeparateChainingHashTable<K, V> {
    fn default() -> Self {
        SeparateChainingHashTable::new()
    }
}

impl<K, V, S> fmt::Debug for SeparateChainingHashTable<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> Extend<(K, V)> for SeparateChainingHashTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a SeparateChainingHashTable<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = ChainIter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the entries of a [`SeparateChainingHashTable`].
pub struct ChainIter<'a, K, V> {
    buckets: slice::Iter<'a, Vec<Entry<K, V>>>,
    bucket: slice::Iter<'a, Entry<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for ChainIter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.bucket.next() {
                self.remaining -= 1;
                return Some((&entry.key, &entry.value));
            }

            self.bucket = self.buckets.next()?.iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for ChainIter<'_, K, V> {}
impl<K, V> FusedIterator for ChainIter<'_, K, V> {}

impl<K, V> Clone for ChainIter<'_, K, V> {
    fn clone(&self) -> Self {
        ChainIter {
            buckets: self.buckets.clone(),
            bucket: self.bucket.clone(),
            remaining: self.remaining,
        }
    }
}

impl<K, V> fmt::Debug for ChainIter<'_, K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// An iterator over the keys of a [`SeparateChainingHashTable`].
///
/// This struct is created by the [`keys`](SeparateChainingHashTable::keys) method.
pub struct ChainKeys<'a, K, V> {
    iter: ChainIter<'a, K, V>,
}

impl<'a, K, V> Iterator for ChainKeys<'a, K, V> {
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let (key, _) = self.iter.next()?;
        Some(key)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<K, V> ExactSizeIterator for ChainKeys<'_, K, V> {}
impl<K, V> FusedIterator for ChainKeys<'_, K, V> {}

impl<K, V> Clone for ChainKeys<'_, K, V> {
    fn clone(&self) -> Self {
        ChainKeys {
            iter: self.iter.clone(),
        }
    }
}

impl<K: fmt::Debug, V> fmt::Debug for ChainKeys<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// An iterator over the values of a [`SeparateChainingHashTable`].
///
/// This struct is created by the [`values`](SeparateChainingHashTable::values) method.
pub struct ChainValues<'a, K, V> {
    iter: ChainIter<'a, K, V>,
}

impl<'a, K, V> Iterator for ChainValues<'a, K, V> {
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let (_, value) = self.iter.next()?;
        Some(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<K, V> ExactSizeIterator for ChainValues<'_, K, V> {}
impl<K, V> FusedIterator for ChainValues<'_, K, V> {}

impl<K, V> Clone for ChainValues<'_, K, V> {
    fn clone(&self) -> Self {
        ChainValues {
            iter: self.iter.clone(),
        }
    }
}

impl<K, V: fmt::Debug> fmt::Debug for ChainValues<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;
    use std::hash::{BuildHasherDefault, Hasher};

    #[derive(Default)]
    struct ConstantHasher;

    impl Hasher for ConstantHasher {
        fn finish(&self) -> u64 {
            42
        }

        fn write(&mut self, _: &[u8]) {}
    }

    #[test]
    fn illegal_load_factor() {
        for load_factor in [0.0, -0.5, f64::INFINITY, f64::NAN] {
            assert!(SeparateChainingHashTable::<u32, u32>::with_capacity_and_load_factor(
                6,
                load_factor
            )
            .is_err());
        }
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let table = SeparateChainingHashTable::<u32, u32>::with_capacity(0);
        assert_eq!(table.capacity(), 3);
    }

    #[test]
    fn updating_value() {
        let mut table = SeparateChainingHashTable::new();
        assert_eq!(table.insert(1, 1), None);
        assert_eq!(table.insert(1, 5), Some(1));
        assert_eq!(table.insert(1, -7), Some(5));
        assert_eq!(table.get(&1), Some(&-7));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn grows_past_threshold() {
        let mut table = SeparateChainingHashTable::new();
        // threshold = floor(3 * 0.75) = 2
        table.insert(1, ());
        table.insert(2, ());
        assert_eq!(table.capacity(), 3);
        table.insert(3, ());
        assert_eq!(table.capacity(), 6);
        for key in 1..=3 {
            assert!(table.contains_key(&key));
        }
    }

    #[test]
    fn single_chain() {
        let mut table: SeparateChainingHashTable<u32, u32, _> =
            SeparateChainingHashTable::with_hasher(BuildHasherDefault::<ConstantHasher>::default());
        for key in 0..20 {
            table.insert(key, key * 2);
        }
        for key in (0..20).step_by(2) {
            assert_eq!(table.remove(&key), Some(key * 2));
        }
        assert_eq!(table.len(), 10);
        for key in 0..20 {
            assert_eq!(table.get(&key).copied(), (key % 2 == 1).then_some(key * 2));
        }
        *table.get_mut(&1).unwrap() = 100;
        assert_eq!(table.get(&1), Some(&100));
    }

    #[test]
    fn iter_matches_contents() {
        let mut table = SeparateChainingHashTable::new();
        let mut expected = HashMap::new();
        for key in 0..100u32 {
            table.insert(key, key.to_string());
            expected.insert(key, key.to_string());
        }
        table.remove(&50);
        expected.remove(&50);

        assert_eq!(table.iter().len(), 99);
        let collected = table
            .iter()
            .map(|(k, v)| (*k, v.clone()))
            .collect::<HashMap<_, _>>();
        assert_eq!(collected, expected);
        assert_eq!(table.keys().count(), 99);
        assert_eq!(table.values().count(), 99);

        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.iter().next(), None);
    }

    #[test]
    fn keys_and_values() {
        let mut table =
            SeparateChainingHashTable::with_hasher(BuildHasherDefault::<ConstantHasher>::default());
        table.insert(1u32, "one");
        table.insert(2u32, "two");
        table.insert(3u32, "three");
        table.remove(&2);

        let keys = table.keys();
        assert_eq!(keys.len(), 2);
        assert_eq!(keys.clone().copied().collect::<Vec<_>>(), [1, 3]);
        assert_eq!(format!("{keys:?}"), "[1, 3]");

        let mut values = table.values();
        assert_eq!(values.len(), 2);
        assert_eq!(format!("{values:?}"), r#"["one", "three"]"#);
        assert_eq!(values.next(), Some(&"one"));
        assert_eq!(values.len(), 1);
        assert_eq!(values.next(), Some(&"three"));
        assert_eq!(values.next(), None);
        assert_eq!(values.next(), None);

        assert_eq!(format!("{:?}", table.iter()), r#"[(1, "one"), (3, "three")]"#);

        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.iter().next(), None);
    }
}
