#![allow(dead_code)]

use probemap::{
    DoubleHashing, HashTable, LinearProbing, ProbeCapacity, ProbeStrategy, QuadraticProbing,
    SecondaryHash,
};

use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, BuildHasherDefault, Hash, Hasher};

// The operations shared by every probing strategy, so one test body can run
// against all of them.
pub trait Table<K, V> {
    fn insert(&mut self, key: K, value: V) -> Option<V>;
    fn get(&mut self, key: &K) -> Option<&V>;
    fn peek(&self, key: &K) -> Option<&V>;
    fn contains_key(&mut self, key: &K) -> bool;
    fn remove(&mut self, key: &K) -> Option<V>;
    fn clear(&mut self);
    fn len(&self) -> usize;
    fn capacity(&self) -> usize;
    fn used_buckets(&self) -> usize;
    fn threshold(&self) -> usize;
    fn keys(&self) -> Vec<&K>;
    fn values(&self) -> Vec<&V>;
    // Whether the capacity satisfies the strategy's structural constraint.
    fn capacity_is_valid(&self) -> bool;
    fn strategy(&self) -> &'static str;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, V, P, S> Table<K, V> for HashTable<K, V, P, S>
where
    K: Hash + Eq,
    P: ProbeStrategy<K>,
    S: BuildHasher,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        HashTable::insert(self, key, value)
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        HashTable::get(self, key)
    }

    fn peek(&self, key: &K) -> Option<&V> {
        HashTable::peek(self, key)
    }

    fn contains_key(&mut self, key: &K) -> bool {
        HashTable::contains_key(self, key)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        HashTable::remove(self, key)
    }

    fn clear(&mut self) {
        HashTable::clear(self)
    }

    fn len(&self) -> usize {
        HashTable::len(self)
    }

    fn capacity(&self) -> usize {
        HashTable::capacity(self)
    }

    fn used_buckets(&self) -> usize {
        HashTable::used_buckets(self)
    }

    fn threshold(&self) -> usize {
        HashTable::threshold(self)
    }

    fn keys(&self) -> Vec<&K> {
        HashTable::keys(self).collect()
    }

    fn values(&self) -> Vec<&V> {
        HashTable::values(self).collect()
    }

    fn capacity_is_valid(&self) -> bool {
        let capacity = HashTable::capacity(self);
        self.probing().adjust_capacity(capacity) == capacity
    }

    fn strategy(&self) -> &'static str {
        std::any::type_name::<P>()
    }
}

// Run the test on a table of every probing strategy, with the default configuration.
pub fn with_table<K, V>(test: impl FnMut(&dyn Fn() -> Box<dyn Table<K, V>>))
where
    K: Hash + Eq + SecondaryHash + 'static,
    V: 'static,
{
    with_config::<K, V, RandomState>(7, 0.65, test);
}

// Run the test on a table of every probing strategy, with the given
// configuration and hasher.
pub fn with_config<K, V, S>(
    capacity: usize,
    load_factor: f64,
    mut test: impl FnMut(&dyn Fn() -> Box<dyn Table<K, V>>),
) where
    K: Hash + Eq + SecondaryHash + 'static,
    V: 'static,
    S: BuildHasher + Default + 'static,
{
    test(&|| table::<K, V, LinearProbing, S>(capacity, load_factor));
    test(&|| table::<K, V, QuadraticProbing, S>(capacity, load_factor));
    test(&|| table::<K, V, DoubleHashing, S>(capacity, load_factor));
}

fn table<K, V, P, S>(capacity: usize, load_factor: f64) -> Box<dyn Table<K, V>>
where
    K: Hash + Eq + 'static,
    V: 'static,
    P: ProbeStrategy<K> + Default + 'static,
    S: BuildHasher + Default + 'static,
{
    let table = HashTable::<K, V, P>::builder()
        .capacity(capacity)
        .load_factor(load_factor)
        .hasher(S::default())
        .build()
        .unwrap();

    Box::new(table)
}

// Hashes a `u64` to itself, so tests control exactly which slot a key lands in.
#[derive(Default)]
pub struct IdentityHasher(u64);

impl Hasher for IdentityHasher {
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.0 = (self.0 << 8) | u64::from(byte);
        }
    }

    fn write_u64(&mut self, n: u64) {
        self.0 = n;
    }
}

pub type Identity = BuildHasherDefault<IdentityHasher>;

// A key whose primary and secondary hashes are chosen by the test.
//
// Equality also compares the id, so distinct keys can share both hashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collider {
    pub hash: u64,
    pub secondary: u64,
    pub id: u32,
}

impl Collider {
    pub fn new(hash: u64, id: u32) -> Collider {
        Collider {
            hash,
            secondary: 1,
            id,
        }
    }

    pub fn with_secondary(hash: u64, secondary: u64, id: u32) -> Collider {
        Collider {
            hash,
            secondary,
            id,
        }
    }
}

impl Hash for Collider {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl SecondaryHash for Collider {
    fn secondary_hash(&self) -> u64 {
        self.secondary
    }
}

// Prints a log message if `RUST_LOG=debug` is set.
#[macro_export]
macro_rules! debug {
    ($($x:tt)*) => {
        if std::env::var("RUST_LOG").as_deref() == Ok("debug") {
            println!($($x)*);
        }
    };
}

// Returns the number of rounds to use for randomized tests.
pub fn rounds() -> usize {
    if cfg!(miri) {
        2
    } else {
        64
    }
}
