#![doc = include_str!("../README.md")]

mod chained;
mod error;
mod map;
mod probe;
mod raw;

#[cfg(feature = "serde")]
mod serde_impls;

pub use chained::{ChainIter, ChainKeys, ChainValues, SeparateChainingHashTable};
pub use error::InvalidArgument;
pub use map::{
    DoubleHashingHashTable, HashTable, HashTableBuilder, IntoIter, Iter, IterMut, Keys,
    LinearProbingHashTable, QuadraticProbingHashTable, Values, ValuesMut,
};
pub use probe::{
    DoubleHashing, LinearProbing, ProbeCapacity, ProbeStrategy, QuadraticProbing, SecondaryHash,
};

