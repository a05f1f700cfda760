//! Collision resolution strategies.
//!
//! A table walks a key's *probe sequence* until it finds the key, an empty
//! slot, or runs out of slots. The sequence is
//! `offset, offset + probe(1), offset + probe(2), ...` (all modulo the
//! capacity), where `offset` is derived from the key's hash. A strategy
//! supplies `probe` and keeps the capacity in a shape for which the sequence
//! visits every slot exactly once before repeating.

use crate::error::InvalidArgument;
use crate::raw::utils::{gcd, next_prime};

use std::rc::Rc;
use std::sync::Arc;

/// The capacity rules of a probing strategy.
///
/// `adjust_capacity` is applied after every capacity change, before any key
/// is probed against the new slot array.
pub trait ProbeCapacity {
    /// Rounds `capacity` up to the nearest value this strategy can probe
    /// exhaustively.
    fn adjust_capacity(&self, capacity: usize) -> usize;

    /// Returns the capacity to grow to when the table is resized.
    ///
    /// The result is passed through [`adjust_capacity`](ProbeCapacity::adjust_capacity)
    /// afterwards.
    fn increase_capacity(&self, capacity: usize) -> usize {
        capacity.saturating_mul(2).saturating_add(1)
    }
}

/// A probing strategy for keys of type `K`.
pub trait ProbeStrategy<K: ?Sized>: ProbeCapacity {
    /// Per-key state computed once before the walk starts.
    type Setup: Copy;

    /// Precomputes whatever `probe` needs to know about `key`.
    fn setup_probing(&self, key: &K, capacity: usize) -> Self::Setup;

    /// Returns the offset of the `x`-th probe (1-based) from the key's home slot.
    ///
    /// The table reduces the result modulo the capacity, so the result only
    /// has to be exact modulo the capacity. Strategies that need the capacity
    /// to get there carry it in `Setup`.
    fn probe(&self, setup: Self::Setup, x: usize) -> usize;
}

// `a * b % m` without overflow.
#[inline]
fn mul_mod(a: usize, b: usize, m: usize) -> usize {
    ((a as u128 * b as u128) % m as u128) as usize
}

/// Probing with a constant stride.
///
/// The `x`-th probe lands `constant * x` slots past the home slot. The
/// capacity is kept coprime with the constant so that every slot is reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearProbing {
    constant: usize,
}

impl LinearProbing {
    /// The default stride.
    pub const DEFAULT_CONSTANT: usize = 17;

    /// Creates a linear probing strategy with the given stride.
    ///
    /// Returns an error if `constant` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use probemap::LinearProbing;
    ///
    /// let probing = LinearProbing::with_constant(3).unwrap();
    /// assert_eq!(probing.constant(), 3);
    /// assert!(LinearProbing::with_constant(0).is_err());
    /// ```
    pub fn with_constant(constant: usize) -> Result<LinearProbing, InvalidArgument> {
        if constant == 0 {
            return Err(InvalidArgument::LinearConstant(constant));
        }

        Ok(LinearProbing { constant })
    }

    /// Returns the stride of this strategy.
    pub fn constant(&self) -> usize {
        self.constant
    }
}

impl Default for LinearProbing {
    fn default() -> Self {
        LinearProbing {
            constant: LinearProbing::DEFAULT_CONSTANT,
        }
    }
}

impl ProbeCapacity for LinearProbing {
    fn adjust_capacity(&self, mut capacity: usize) -> usize {
        while gcd(self.constant, capacity) != 1 {
            capacity += 1;
        }
        capacity
    }
}

impl<K: ?Sized> ProbeStrategy<K> for LinearProbing {
    // The stride reduced modulo the capacity, and the capacity.
    type Setup = (usize, usize);

    #[inline]
    fn setup_probing(&self, _key: &K, capacity: usize) -> (usize, usize) {
        (self.constant % capacity, capacity)
    }

    #[inline]
    fn probe(&self, (stride, capacity): (usize, usize), x: usize) -> usize {
        mul_mod(stride, x, capacity)
    }
}

/// Probing with triangular-number strides, `(x² + x) / 2`.
///
/// Over a power-of-two capacity the triangular numbers hit every residue, so
/// the capacity is always a power of two.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuadraticProbing;

impl ProbeCapacity for QuadraticProbing {
    fn adjust_capacity(&self, capacity: usize) -> usize {
        capacity.next_power_of_two()
    }

    fn increase_capacity(&self, capacity: usize) -> usize {
        (capacity + 1).next_power_of_two()
    }
}

impl<K: ?Sized> ProbeStrategy<K> for QuadraticProbing {
    type Setup = ();

    #[inline]
    fn setup_probing(&self, _key: &K, _capacity: usize) {}

    #[inline]
    fn probe(&self, _setup: (), x: usize) -> usize {
        // Halve whichever factor is even first so the product stays exact
        // modulo any power of two, even if it wraps.
        if x % 2 == 0 {
            (x / 2).wrapping_mul(x + 1)
        } else {
            x.wrapping_mul((x + 1) / 2)
        }
    }
}

/// Probing with a stride taken from a second, independent hash of the key.
///
/// The `x`-th probe lands `x * h2` slots past the home slot, where `h2` is the
/// key's [`SecondaryHash`] reduced modulo the capacity (and bumped to 1 if it
/// reduces to 0). The capacity is always prime, so any non-zero stride
/// reaches every slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DoubleHashing;

impl ProbeCapacity for DoubleHashing {
    fn adjust_capacity(&self, capacity: usize) -> usize {
        next_prime(capacity)
    }
}

impl<K> ProbeStrategy<K> for DoubleHashing
where
    K: SecondaryHash + ?Sized,
{
    // The stride `h2`, and the capacity.
    type Setup = (usize, usize);

    #[inline]
    fn setup_probing(&self, key: &K, capacity: usize) -> (usize, usize) {
        let h2 = match key.secondary_hash() % capacity as u64 {
            // A zero stride would probe the home slot forever.
            0 => 1,
            h2 => h2 as usize,
        };
        (h2, capacity)
    }

    #[inline]
    fn probe(&self, (h2, capacity): (usize, usize), x: usize) -> usize {
        mul_mod(h2, x, capacity)
    }
}

/// A second hash function, independent of [`Hash`](std::hash::Hash), used to
/// derive the probing stride for [`DoubleHashing`].
///
/// Types that implement `Borrow` for lookups must return the same secondary
/// hash as their borrowed form, just as they must for `Hash`.
pub trait SecondaryHash {
    /// Returns the secondary hash of this value.
    fn secondary_hash(&self) -> u64;
}

macro_rules! secondary_hash_int {
    ($($int:ty),*) => {$(
        impl SecondaryHash for $int {
            #[inline]
            fn secondary_hash(&self) -> u64 {
                *self as u64
            }
        }
    )*};
}

secondary_hash_int!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl SecondaryHash for u128 {
    fn secondary_hash(&self) -> u64 {
        (*self as u64) ^ ((*self >> 64) as u64)
    }
}

impl SecondaryHash for i128 {
    fn secondary_hash(&self) -> u64 {
        (*self as u128).secondary_hash()
    }
}

impl SecondaryHash for bool {
    fn secondary_hash(&self) -> u64 {
        *self as u64
    }
}

impl SecondaryHash for char {
    fn secondary_hash(&self) -> u64 {
        *self as u64
    }
}

// Multiplicative polynomial hash over the elements, base 17.
fn polynomial<I: Iterator<Item = u64>>(items: I) -> u64 {
    let mut hash = 0u64;
    let mut power = 1u64;
    for item in items {
        hash = hash.wrapping_add(power.wrapping_mul(item));
        power = power.wrapping_mul(17);
    }
    hash
}

impl SecondaryHash for str {
    fn secondary_hash(&self) -> u64 {
        polynomial(self.chars().map(|c| c as u64))
    }
}

impl SecondaryHash for String {
    fn secondary_hash(&self) -> u64 {
        self.as_str().secondary_hash()
    }
}

impl<T: SecondaryHash> SecondaryHash for [T] {
    fn secondary_hash(&self) -> u64 {
        polynomial(self.iter().map(T::secondary_hash))
    }
}

impl<T: SecondaryHash> SecondaryHash for Vec<T> {
    fn secondary_hash(&self) -> u64 {
        self.as_slice().secondary_hash()
    }
}

impl<T: SecondaryHash + ?Sized> SecondaryHash for &T {
    fn secondary_hash(&self) -> u64 {
        (**self).secondary_hash()
    }
}

macro_rules! secondary_hash_deref {
    ($($ptr:ident),*) => {$(
        impl<T: SecondaryHash + ?Sized> SecondaryHash for $ptr<T> {
            fn secondary_hash(&self) -> u64 {
                (**self).secondary_hash()
            }
        }
    )*};
}

secondary_hash_deref!(Box, Rc, Arc);
