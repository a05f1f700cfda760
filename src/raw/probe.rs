use std::marker::PhantomData;

use crate::probe::ProbeStrategy;

// Reduces a hash to a slot index in `[0, capacity)`.
#[inline]
pub fn normalize(hash: u64, capacity: usize) -> usize {
    (hash % capacity as u64) as usize
}

// The probe sequence of a single key.
//
// Yields the home slot first, then `home + probe(x)` for `x = 1, 2, ...`.
// Given a capacity that satisfies the strategy's constraint, the first
// `capacity` indices are distinct, so the sequence stops after that many.
pub struct Probe<'p, P, Q>
where
    P: ProbeStrategy<Q>,
    Q: ?Sized,
{
    probing: &'p P,
    setup: P::Setup,
    // The home slot of the key.
    offset: usize,
    capacity: usize,
    // The number of indices yielded so far.
    x: usize,
    _key: PhantomData<fn(&Q)>,
}

impl<'p, P, Q> Probe<'p, P, Q>
where
    P: ProbeStrategy<Q>,
    Q: ?Sized,
{
    // Initialize the probe sequence for `key`.
    #[inline]
    pub fn start(probing: &'p P, key: &Q, hash: u64, capacity: usize) -> Probe<'p, P, Q> {
        Probe {
            probing,
            setup: probing.setup_probing(key, capacity),
            offset: normalize(hash, capacity),
            capacity,
            x: 0,
            _key: PhantomData,
        }
    }
}

impl<P, Q> Iterator for Probe<'_, P, Q>
where
    P: ProbeStrategy<Q>,
    Q: ?Sized,
{
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.x == self.capacity {
            return None;
        }

        let i = match self.x {
            0 => self.offset,
            x => (self.offset + self.probing.probe(self.setup, x) % self.capacity) % self.capacity,
        };

        self.x += 1;
        Some(i)
    }
}
