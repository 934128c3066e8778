//! Random Sources
//!
//! Defines the trait the simulator draws priorities and burst times from,
//! so callers can replace the thread RNG with a seeded or scripted source
//! without the scheduler depending on a particular generator.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniformly distributed integers
pub trait RandomSource {
    /// Draw a value in `[low, high]` (both ends inclusive)
    ///
    /// Implementations return `low` when `high <= low`.
    fn next_in_range(&mut self, low: i64, high: i64) -> i64;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_in_range(&mut self, low: i64, high: i64) -> i64 {
        (**self).next_in_range(low, high)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_in_range(&mut self, low: i64, high: i64) -> i64 {
        (**self).next_in_range(low, high)
    }
}

/// Unseeded source backed by the thread-local RNG
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_in_range(&mut self, low: i64, high: i64) -> i64 {
        if high <= low {
            return low;
        }
        rand::thread_rng().gen_range(low..=high)
    }
}

/// Deterministic source: the same seed yields the same sequence
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    /// Create a source seeded with `seed`
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_in_range(&mut self, low: i64, high: i64) -> i64 {
        if high <= low {
            return low;
        }
        self.rng.gen_range(low..=high)
    }
}

/// Source that replays a fixed list of numbers
///
/// Each draw takes the next number `v` and returns `low + v % span`, where
/// `span` is the size of the requested range. The list starts over once it
/// is used up, so a short script can drive an arbitrarily long run.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    values: Vec<i64>,
    cursor: usize,
}

impl ScriptedRandom {
    /// Create a source replaying `values`
    pub fn new(values: Vec<i64>) -> Self {
        Self { values, cursor: 0 }
    }

    /// Number of draws taken so far
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRandom {
    fn next_in_range(&mut self, low: i64, high: i64) -> i64 {
        if high <= low || self.values.is_empty() {
            return low;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        let span = high - low + 1;
        low + value.rem_euclid(span)
    }
}
