pub mod probe;
pub mod utils;

use std::borrow::Borrow;
use std::hash::{BuildHasher, Hash};
use std::{iter, mem, slice, vec};

use self::probe::Probe;
use crate::probe::{ProbeCapacity, ProbeStrategy};

/// The capacity used when none is requested, and the smallest capacity a
/// table is ever created with.
pub const DEFAULT_CAPACITY: usize = 7;

/// The load factor used when none is requested.
pub const DEFAULT_LOAD_FACTOR: f64 = 0.65;

// A cell in the slot array.
#[derive(Clone, Debug)]
pub enum Slot<K, V> {
    // Never used since the last resize or clear. Terminates a probe sequence.
    Empty,
    // Previously occupied. Probing continues past it, and inserts may reuse it.
    Tombstone,
    Occupied(K, V),
}

// The outcome of walking a key's probe sequence.
enum Walk {
    // The key lives at `index`. `tombstone` is the first tombstone passed on
    // the way there, if any.
    Found {
        index: usize,
        tombstone: Option<usize>,
    },
    // The key is absent. `empty` is the empty slot that ended the walk, or
    // `None` if the whole sequence was exhausted.
    Vacant {
        empty: Option<usize>,
        tombstone: Option<usize>,
    },
}

// An open-addressing hash table over a flat slot array.
#[derive(Clone)]
pub struct HashTable<K, V, P, S> {
    slots: Box<[Slot<K, V>]>,
    // The number of occupied slots.
    len: usize,
    // The number of occupied or tombstoned slots.
    used: usize,
    // `used` at or above this triggers a resize before the next insert.
    threshold: usize,
    load_factor: f64,
    pub probing: P,
    pub hasher: S,
}

fn empty_slots<K, V>(capacity: usize) -> Box<[Slot<K, V>]> {
    iter::repeat_with(|| Slot::Empty).take(capacity).collect()
}

fn threshold(capacity: usize, load_factor: f64) -> usize {
    // Float to int casts saturate.
    (capacity as f64 * load_factor) as usize
}

impl<K, V, P, S> HashTable<K, V, P, S>
where
    P: ProbeCapacity,
{
    // Creates a table from validated configuration.
    pub fn new(capacity: usize, load_factor: f64, probing: P, hasher: S) -> HashTable<K, V, P, S> {
        debug_assert!(capacity > 0);
        debug_assert!(load_factor.is_finite() && load_factor > 0.0);

        let capacity = probing.adjust_capacity(capacity.max(DEFAULT_CAPACITY));

        HashTable {
            slots: empty_slots(capacity),
            len: 0,
            used: 0,
            threshold: threshold(capacity, load_factor),
            load_factor,
            probing,
            hasher,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn used_buckets(&self) -> usize {
        self.used
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    #[inline]
    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }

    // Resets every slot to empty, keeping the current capacity.
    pub fn clear(&mut self) {
        self.slots.fill_with(|| Slot::Empty);
        self.len = 0;
        self.used = 0;
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            slots: self.slots.iter(),
            remaining: self.len,
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            slots: self.slots.iter_mut(),
            remaining: self.len,
        }
    }

    pub fn into_entries(self) -> IntoIter<K, V> {
        IntoIter {
            slots: self.slots.into_vec().into_iter(),
            remaining: self.len,
        }
    }

    // Moves the entry at `index` into the earlier `tombstone`, leaving a
    // tombstone behind, so the next walk for this key is shorter. Returns the
    // entry's new index.
    fn relocate(&mut self, index: usize, tombstone: Option<usize>) -> usize {
        match tombstone {
            Some(t) => {
                debug_assert!(matches!(self.slots[t], Slot::Tombstone));
                self.slots[t] = mem::replace(&mut self.slots[index], Slot::Tombstone);
                log::trace!("relocated entry from slot {index} to tombstone at {t}");
                t
            }
            None => index,
        }
    }
}

impl<K, V, P, S> HashTable<K, V, P, S>
where
    K: Hash + Eq,
    P: ProbeCapacity,
    S: BuildHasher,
{
    // Walks the probe sequence of `key` until it finds the key or an empty slot.
    fn walk<Q>(&self, key: &Q) -> Walk
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        P: ProbeStrategy<Q>,
    {
        let hash = self.hasher.hash_one(key);
        let mut tombstone = None;

        for i in Probe::start(&self.probing, key, hash, self.slots.len()) {
            match &self.slots[i] {
                Slot::Tombstone => {
                    tombstone.get_or_insert(i);
                }
                Slot::Occupied(k, _) if <K as Borrow<Q>>::borrow(k) == key => {
                    return Walk::Found {
                        index: i,
                        tombstone,
                    };
                }
                Slot::Occupied(..) => {}
                Slot::Empty => {
                    return Walk::Vacant {
                        empty: Some(i),
                        tombstone,
                    };
                }
            }
        }

        Walk::Vacant {
            empty: None,
            tombstone,
        }
    }

    // Returns the index of the entry for `key`, relocating it into an earlier
    // tombstone if the walk passed one.
    fn find<Q>(&mut self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        P: ProbeStrategy<Q>,
    {
        match self.walk(key) {
            Walk::Found { index, tombstone } => Some(self.relocate(index, tombstone)),
            Walk::Vacant { .. } => None,
        }
    }

    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        P: ProbeStrategy<Q>,
    {
        let index = self.find(key)?;
        self.slots[index].value()
    }

    pub fn get_key_value<Q>(&mut self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        P: ProbeStrategy<Q>,
    {
        let index = self.find(key)?;
        match &self.slots[index] {
            Slot::Occupied(k, v) => Some((k, v)),
            _ => None,
        }
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        P: ProbeStrategy<Q>,
    {
        let index = self.find(key)?;
        match &mut self.slots[index] {
            Slot::Occupied(_, v) => Some(v),
            _ => None,
        }
    }

    pub fn contains_key<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        P: ProbeStrategy<Q>,
    {
        self.find(key).is_some()
    }

    // Looks up `key` without relocating anything.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        P: ProbeStrategy<Q>,
    {
        match self.walk(key) {
            Walk::Found { index, .. } => self.slots[index].value(),
            Walk::Vacant { .. } => None,
        }
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        P: ProbeStrategy<Q>,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        P: ProbeStrategy<Q>,
    {
        let Walk::Found { index, .. } = self.walk(key) else {
            return None;
        };

        match mem::replace(&mut self.slots[index], Slot::Tombstone) {
            Slot::Occupied(key, value) => {
                self.len -= 1;
                Some((key, value))
            }
            _ => unreachable!("walk found a key in a slot that is not occupied"),
        }
    }
}

impl<K, V, P, S> HashTable<K, V, P, S>
where
    K: Hash + Eq,
    P: ProbeStrategy<K>,
    S: BuildHasher,
{
    // Inserts a key-value pair, returning the previous value for the key.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        // Tombstones count towards the threshold: left alone they would make
        // every probe sequence longer.
        if self.used >= self.threshold {
            self.resize();
        }

        self.insert_unchecked(key, value)
    }

    // Inserts without consulting the resize threshold.
    fn insert_unchecked(&mut self, key: K, value: V) -> Option<V> {
        loop {
            match self.walk(&key) {
                Walk::Found { index, tombstone } => {
                    let index = self.relocate(index, tombstone);
                    return match &mut self.slots[index] {
                        Slot::Occupied(_, current) => Some(mem::replace(current, value)),
                        _ => unreachable!("relocated entry is not occupied"),
                    };
                }

                // Reuse the first tombstone on the way rather than the empty slot.
                Walk::Vacant {
                    tombstone: Some(t), ..
                } => {
                    log::trace!("inserting into tombstone at slot {t}");
                    self.slots[t] = Slot::Occupied(key, value);
                    self.len += 1;
                    return None;
                }

                Walk::Vacant {
                    empty: Some(i),
                    tombstone: None,
                } => {
                    self.slots[i] = Slot::Occupied(key, value);
                    self.len += 1;
                    self.used += 1;
                    return None;
                }

                // Every slot on the sequence is occupied by another key. Only
                // reachable with a load factor of at least one.
                Walk::Vacant {
                    empty: None,
                    tombstone: None,
                } => self.resize(),
            }
        }
    }

    // Grows the slot array and rehashes every live entry into it. Tombstones
    // are dropped.
    fn resize(&mut self) {
        let old_capacity = self.slots.len();
        let capacity = self
            .probing
            .adjust_capacity(self.probing.increase_capacity(old_capacity));

        log::debug!(
            "resizing table from {old_capacity} to {capacity} slots ({} live, {} used)",
            self.len,
            self.used
        );

        self.threshold = threshold(capacity, self.load_factor);
        let slots = mem::replace(&mut self.slots, empty_slots(capacity));
        self.len = 0;
        self.used = 0;

        for slot in slots.into_vec() {
            if let Slot::Occupied(key, value) = slot {
                self.insert_unchecked(key, value);
            }
        }
    }
}

impl<K, V> Slot<K, V> {
    #[inline]
    fn value(&self) -> Option<&V> {
        match self {
            Slot::Occupied(_, value) => Some(value),
            _ => None,
        }
    }
}

// An iterator over the live entries of a table, in slot order.
pub struct Iter<'a, K, V> {
    slots: slice::Iter<'a, Slot<K, V>>,
    remaining: usize,
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            slots: self.slots.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        for slot in self.slots.by_ref() {
            if let Slot::Occupied(key, value) = slot {
                self.remaining -= 1;
                return Some((key, value));
            }
        }

        None
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

pub struct IterMut<'a, K, V> {
    slots: slice::IterMut<'a, Slot<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        for slot in self.slots.by_ref() {
            if let Slot::Occupied(key, value) = slot {
                self.remaining -= 1;
                return Some((&*key, value));
            }
        }

        None
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

pub struct IntoIter<K, V> {
    slots: vec::IntoIter<Slot<K, V>>,
    remaining: usize,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        for slot in self.slots.by_ref() {
            if let Slot::Occupied(key, value) = slot {
                self.remaining -= 1;
                return Some((key, value));
            }
        }

        None
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
