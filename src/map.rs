use crate::error::{self, InvalidArgument};
use crate::probe::{DoubleHashing, LinearProbing, ProbeCapacity, ProbeStrategy, QuadraticProbing};
use crate::raw::{self, DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR};

use std::borrow::Borrow;
use std::collections::hash_map::RandomState;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ops::Index;

/// An open-addressing hash table.
///
/// Collisions are resolved by walking a probe sequence within a single slot
/// array, as dictated by the probing strategy `P`. Removed entries leave a
/// tombstone behind so that the probe sequences of other keys stay intact.
/// Lookups that pass a tombstone on their way to a key move the entry into
/// that tombstone, which is why [`get`](HashTable::get) and
/// [`contains_key`](HashTable::contains_key) take `&mut self`. Use
/// [`peek`](HashTable::peek) for a lookup through a shared reference.
///
/// The table grows once the number of used slots (live entries plus
/// tombstones) reaches `capacity * load_factor`.
///
/// See [`LinearProbingHashTable`], [`QuadraticProbingHashTable`] and
/// [`DoubleHashingHashTable`] for the concrete strategies.
#[derive(Clone)]
pub struct HashTable<K, V, P = LinearProbing, S = RandomState> {
    raw: raw::HashTable<K, V, P, S>,
}

/// A [`HashTable`] that probes with a constant stride.
pub type LinearProbingHashTable<K, V, S = RandomState> = HashTable<K, V, LinearProbing, S>;

/// A [`HashTable`] that probes with triangular-number strides.
pub type QuadraticProbingHashTable<K, V, S = RandomState> = HashTable<K, V, QuadraticProbing, S>;

/// A [`HashTable`] that probes with a stride derived from a second hash of the key.
pub type DoubleHashingHashTable<K, V, S = RandomState> = HashTable<K, V, DoubleHashing, S>;

/// A builder for a [`HashTable`].
///
/// # Examples
///
/// ```rust
/// use probemap::{HashTable, QuadraticProbing};
/// use std::collections::hash_map::RandomState;
///
/// let table: HashTable<&str, i32, QuadraticProbing> = HashTable::builder()
///     // Set the initial capacity.
///     .capacity(32)
///     // Set the load factor.
///     .load_factor(0.5)
///     // Set the hasher.
///     .hasher(RandomState::new())
///     // Construct the table.
///     .build()
///     .unwrap();
///
/// assert_eq!(table.capacity(), 32);
/// assert_eq!(table.threshold(), 16);
/// ```
pub struct HashTableBuilder<K, V, P = LinearProbing, S = RandomState> {
    capacity: usize,
    load_factor: f64,
    probing: P,
    hasher: S,
    _kv: PhantomData<(K, V)>,
}

impl<K, V, P, S> HashTableBuilder<K, V, P, S> {
    /// Set the initial capacity of the table.
    ///
    /// The capacity is raised to at least 7 and then rounded up to satisfy
    /// the probing strategy. A capacity of zero is rejected by
    /// [`build`](HashTableBuilder::build).
    pub fn capacity(self, capacity: usize) -> HashTableBuilder<K, V, P, S> {
        HashTableBuilder { capacity, ..self }
    }

    /// Set the load factor of the table.
    ///
    /// Must be finite and positive. Values above one are allowed and let the
    /// table fill up completely before growing.
    ///
    /// The table keeps `capacity * load_factor` at or above the number of used
    /// slots, so a tiny load factor means a huge table: once that product drops
    /// below one the threshold is zero and every insert grows the table. With
    /// a load factor of `1e-12`, a few dozen inserts are enough to exhaust
    /// memory.
    pub fn load_factor(self, load_factor: f64) -> HashTableBuilder<K, V, P, S> {
        HashTableBuilder {
            load_factor,
            ..self
        }
    }

    /// Set the probing strategy.
    pub fn probing<P2>(self, probing: P2) -> HashTableBuilder<K, V, P2, S> {
        HashTableBuilder {
            probing,
            capacity: self.capacity,
            load_factor: self.load_factor,
            hasher: self.hasher,
            _kv: PhantomData,
        }
    }

    /// Set the hash builder used to hash keys.
    ///
    /// The `hasher` passed should implement the [`BuildHasher`] trait for the
    /// table to be useful.
    pub fn hasher<S2>(self, hasher: S2) -> HashTableBuilder<K, V, P, S2> {
        HashTableBuilder {
            hasher,
            capacity: self.capacity,
            load_factor: self.load_factor,
            probing: self.probing,
            _kv: PhantomData,
        }
    }
}

impl<K, V, P, S> HashTableBuilder<K, V, P, S>
where
    P: ProbeCapacity,
{
    /// Construct a [`HashTable`] from the builder, using the configured options.
    ///
    /// Returns an error if the capacity is zero or the load factor is not a
    /// finite, positive number.
    pub fn build(self) -> Result<HashTable<K, V, P, S>, InvalidArgument> {
        if self.capacity == 0 {
            return Err(InvalidArgument::Capacity(self.capacity));
        }
        let load_factor = error::check_load_factor(self.load_factor)?;

        Ok(HashTable {
            raw: raw::HashTable::new(self.capacity, load_factor, self.probing, self.hasher),
        })
    }
}

impl<K, V, P, S> fmt::Debug for HashTableBuilder<K, V, P, S>
where
    P: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashTableBuilder")
            .field("capacity", &self.capacity)
            .field("load_factor", &self.load_factor)
            .field("probing", &self.probing)
            .finish()
    }
}

impl<K, V, P> HashTable<K, V, P>
where
    P: ProbeCapacity + Default,
{
    /// Creates an empty table with the default capacity (7) and load factor (0.65).
    ///
    /// # Examples
    ///
    /// ```
    /// use probemap::LinearProbingHashTable;
    ///
    /// let table: LinearProbingHashTable<&str, i32> = LinearProbingHashTable::new();
    /// assert_eq!(table.capacity(), 7);
    /// ```
    pub fn new() -> HashTable<K, V, P> {
        HashTable::with_hasher(RandomState::new())
    }

    /// Creates an empty table with at least the specified capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use probemap::QuadraticProbingHashTable;
    ///
    /// let table: QuadraticProbingHashTable<u32, u32> =
    ///     QuadraticProbingHashTable::with_capacity(100).unwrap();
    /// assert_eq!(table.capacity(), 128);
    ///
    /// assert!(QuadraticProbingHashTable::<u32, u32>::with_capacity(0).is_err());
    /// ```
    pub fn with_capacity(capacity: usize) -> Result<HashTable<K, V, P>, InvalidArgument> {
        HashTable::with_capacity_and_hasher(capacity, RandomState::new())
    }

    /// Creates an empty table with at least the specified capacity and the
    /// given load factor.
    ///
    /// See [`HashTableBuilder::load_factor`] for how the load factor bounds
    /// the table's size.
    pub fn with_capacity_and_load_factor(
        capacity: usize,
        load_factor: f64,
    ) -> Result<HashTable<K, V, P>, InvalidArgument> {
        HashTable::builder()
            .capacity(capacity)
            .load_factor(load_factor)
            .build()
    }

    /// Returns a builder for a `HashTable`.
    pub fn builder() -> HashTableBuilder<K, V, P> {
        HashTableBuilder {
            capacity: DEFAULT_CAPACITY,
            load_factor: DEFAULT_LOAD_FACTOR,
            probing: P::default(),
            hasher: RandomState::new(),
            _kv: PhantomData,
        }
    }
}

impl<K, V, P, S> HashTable<K, V, P, S>
where
    P: ProbeCapacity + Default,
{
    /// Creates an empty table which will use the given hash builder to hash keys.
    pub fn with_hasher(hasher: S) -> HashTable<K, V, P, S> {
        HashTable {
            raw: raw::HashTable::new(DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR, P::default(), hasher),
        }
    }

    /// Creates an empty table with at least the specified capacity, using
    /// `hasher` to hash the keys.
    pub fn with_capacity_and_hasher(
        capacity: usize,
        hasher: S,
    ) -> Result<HashTable<K, V, P, S>, InvalidArgument> {
        HashTableBuilder {
            capacity,
            load_factor: DEFAULT_LOAD_FACTOR,
            probing: P::default(),
            hasher,
            _kv: PhantomData,
        }
        .build()
    }
}

impl<K, V, P, S> Default for HashTable<K, V, P, S>
where
    P: ProbeCapacity + Default,
    S: Default,
{
    fn default() -> Self {
        HashTable::with_hasher(S::default())
    }
}

impl<K, V, P, S> HashTable<K, V, P, S>
where
    P: ProbeCapacity,
{
    /// Returns the number of entries in the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the table contains no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of slots in the table.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Returns the number of slots holding either an entry or a tombstone.
    #[inline]
    pub fn used_buckets(&self) -> usize {
        self.raw.used_buckets()
    }

    /// Returns the number of used slots at which the next insert grows the table.
    #[inline]
    pub fn threshold(&self) -> usize {
        self.raw.threshold()
    }

    /// Returns the load factor of the table.
    #[inline]
    pub fn load_factor(&self) -> f64 {
        self.raw.load_factor()
    }

    /// Returns a reference to the probing strategy.
    #[inline]
    pub fn probing(&self) -> &P {
        &self.raw.probing
    }

    /// Returns a reference to the table's [`BuildHasher`].
    #[inline]
    pub fn hasher(&self) -> &S {
        &self.raw.hasher
    }

    /// Removes every entry from the table, keeping its capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use probemap::LinearProbingHashTable;
    ///
    /// let mut table = LinearProbingHashTable::new();
    /// table.insert(1, "a");
    /// table.clear();
    /// assert!(table.is_empty());
    /// assert_eq!(table.used_buckets(), 0);
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// An iterator visiting all key-value pairs in slot order.
    ///
    /// Slot order depends on hashing and on the history of the table, not on
    /// insertion order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            raw: self.raw.iter(),
        }
    }

    /// An iterator visiting all key-value pairs in slot order, with mutable
    /// references to the values.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            raw: self.raw.iter_mut(),
        }
    }

    /// An iterator visiting all keys in slot order.
    #[inline]
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { iter: self.iter() }
    }

    /// An iterator visiting all values in slot order.
    #[inline]
    pub fn values(&self) -> Values<'_, K, V> {
        Values { iter: self.iter() }
    }

    /// An iterator visiting all values mutably in slot order.
    #[inline]
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            iter: self.iter_mut(),
        }
    }
}

impl<K, V, P, S> HashTable<K, V, P, S>
where
    K: Hash + Eq,
    P: ProbeStrategy<K>,
    S: BuildHasher,
{
    /// Inserts a key-value pair into the table.
    ///
    /// If the table did not have this key present, `None` is returned. If it
    /// did, the value is updated and the old value is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use probemap::DoubleHashingHashTable;
    ///
    /// let mut table = DoubleHashingHashTable::new();
    /// assert_eq!(table.insert(37, "a"), None);
    /// assert_eq!(table.insert(37, "b"), Some("a"));
    /// assert_eq!(table.len(), 1);
    /// ```
    #[inline]
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.raw.insert(key, value)
    }
}

impl<K, V, P, S> HashTable<K, V, P, S>
where
    K: Hash + Eq,
    P: ProbeCapacity,
    S: BuildHasher,
{
    /// Returns a reference to the value corresponding to the key.
    ///
    /// If the probe sequence passed a tombstone before reaching the key, the
    /// entry is moved into that tombstone to shorten future lookups.
    ///
    /// # Examples
    ///
    /// ```
    /// use probemap::LinearProbingHashTable;
    ///
    /// let mut table = LinearProbingHashTable::new();
    /// table.insert(String::from("a"), 1);
    /// assert_eq!(table.get("a"), Some(&1));
    /// assert_eq!(table.get("b"), None);
    /// ```
    #[inline]
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        P: ProbeStrategy<Q>,
    {
        self.raw.get(key)
    }

    /// Returns the key-value pair corresponding to the supplied key.
    #[inline]
    pub fn get_key_value<Q>(&mut self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        P: ProbeStrategy<Q>,
    {
        self.raw.get_key_value(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    #[inline]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        P: ProbeStrategy<Q>,
    {
        self.raw.get_mut(key)
    }

    /// Returns `true` if the table contains a value for the specified key.
    ///
    /// Relocates the entry like [`get`](HashTable::get).
    #[inline]
    pub fn contains_key<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        P: ProbeStrategy<Q>,
    {
        self.raw.contains_key(key)
    }

    /// Returns a reference to the value corresponding to the key, without
    /// moving the entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use probemap::QuadraticProbingHashTable;
    ///
    /// let mut table = QuadraticProbingHashTable::new();
    /// table.insert(1, "a");
    ///
    /// let table = &table;
    /// assert_eq!(table.peek(&1), Some(&"a"));
    /// ```
    #[inline]
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        P: ProbeStrategy<Q>,
    {
        self.raw.peek(key)
    }

    /// Removes a key from the table, returning the value at the key if the
    /// key was previously in the table.
    ///
    /// The slot is left as a tombstone until the next resize or clear.
    ///
    /// # Examples
    ///
    /// ```
    /// use probemap::LinearProbingHashTable;
    ///
    /// let mut table = LinearProbingHashTable::new();
    /// table.insert(1, "a");
    /// assert_eq!(table.remove(&1), Some("a"));
    /// assert_eq!(table.remove(&1), None);
    /// assert_eq!(table.used_buckets(), 1);
    /// ```
    #[inline]
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        P: ProbeStrategy<Q>,
    {
        self.raw.remove(key)
    }

    /// Removes a key from the table, returning the stored key and value if
    /// the key was previously in the table.
    #[inline]
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        P: ProbeStrategy<Q>,
    {
        self.raw.remove_entry(key)
    }
}

impl<K, V, P, S> PartialEq for HashTable<K, V, P, S>
where
    K: Hash + Eq,
    V: PartialEq,
    P: ProbeStrategy<K>,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }

        self.iter()
            .all(|(key, value)| other.peek(key).map_or(false, |v| *value == *v))
    }
}

impl<K, V, P, S> Eq for HashTable<K, V, P, S>
where
    K: Hash + Eq,
    V: Eq,
    P: ProbeStrategy<K>,
    S: BuildHasher,
{
}

impl<K, V, P, S> fmt::Debug for HashTable<K, V, P, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
    P: ProbeCapacity,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, Q, V, P, S> Index<&Q> for HashTable<K, V, P, S>
where
    K: Hash + Eq + Borrow<Q>,
    Q: Hash + Eq + ?Sized,
    P: ProbeStrategy<Q>,
    S: BuildHasher,
{
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the table.
    #[inline]
    fn index(&self, key: &Q) -> &V {
        self.peek(key).expect("no entry found for key")
    }
}

impl<K, V, P, S> Extend<(K, V)> for HashTable<K, V, P, S>
where
    K: Hash + Eq,
    P: ProbeStrategy<K>,
    S: BuildHasher,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a, K, V, P, S> Extend<(&'a K, &'a V)> for HashTable<K, V, P, S>
where
    K: Hash + Eq + Copy,
    V: Copy,
    P: ProbeStrategy<K>,
    S: BuildHasher,
{
    fn extend<T: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: T) {
        self.extend(iter.into_iter().map(|(&key, &value)| (key, value)));
    }
}

impl<K, V, P, S> FromIterator<(K, V)> for HashTable<K, V, P, S>
where
    K: Hash + Eq,
    P: ProbeStrategy<K> + Default,
    S: BuildHasher + Default,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut table = HashTable::default();
        table.extend(iter);
        table
    }
}

impl<'a, K, V, P, S> IntoIterator for &'a HashTable<K, V, P, S>
where
    P: ProbeCapacity,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, P, S> IntoIterator for &'a mut HashTable<K, V, P, S>
where
    P: ProbeCapacity,
{
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K, V, P, S> IntoIterator for HashTable<K, V, P, S>
where
    P: ProbeCapacity,
{
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            raw: self.raw.into_entries(),
        }
    }
}

/// An iterator over a table's entries.
///
/// This struct is created by the [`iter`](HashTable::iter) method on [`HashTable`].
pub struct Iter<'a, K, V> {
    raw: raw::Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.raw.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.raw.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            raw: self.raw.clone(),
        }
    }
}

impl<K, V> fmt::Debug for Iter<'_, K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// A mutable iterator over a table's entries.
///
/// This struct is created by the [`iter_mut`](HashTable::iter_mut) method on [`HashTable`].
pub struct IterMut<'a, K, V> {
    raw: raw::IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.raw.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.raw.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}
impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// An owning iterator over a table's entries.
///
/// This struct is created by the `into_iter` method on [`HashTable`].
pub struct IntoIter<K, V> {
    raw: raw::IntoIter<K, V>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.raw.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.raw.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}

/// An iterator over a table's keys.
///
/// This struct is created by the [`keys`](HashTable::keys) method on [`HashTable`].
pub struct Keys<'a, K, V> {
    iter: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
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

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}
impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Keys {
            iter: self.iter.clone(),
        }
    }
}

impl<K: fmt::Debug, V> fmt::Debug for Keys<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// An iterator over a table's values.
///
/// This struct is created by the [`values`](HashTable::values) method on [`HashTable`].
pub struct Values<'a, K, V> {
    iter: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
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

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}
impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Values {
            iter: self.iter.clone(),
        }
    }
}

impl<K, V: fmt::Debug> fmt::Debug for Values<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// A mutable iterator over a table's values.
///
/// This struct is created by the [`values_mut`](HashTable::values_mut) method on [`HashTable`].
pub struct ValuesMut<'a, K, V> {
    iter: IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

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

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}
impl<K, V> FusedIterator for ValuesMut<'_, K, V> {}
