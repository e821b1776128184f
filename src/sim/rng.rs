//! Injectable randomness
//!
//! The simulation only ever asks for a uniform integer below a bound. Any
//! `rand` generator satisfies that; tests can replay a fixed script instead.

use rand::{Rng, RngCore, SeedableRng};
use rand_pcg::Pcg32;

/// Source of uniform integers for obstacle and food placement
pub trait RandomSource {
    /// Uniform integer in `0..bound`. `bound` is never zero.
    fn below(&mut self, bound: u32) -> u32;

    /// Fair coin flip
    fn coin(&mut self) -> bool {
        self.below(2) == 1
    }
}

impl<R: RngCore> RandomSource for R {
    fn below(&mut self, bound: u32) -> u32 {
        self.random_range(0..bound)
    }
}

/// Default generator for a run seed
pub fn seeded(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Replays a fixed list of values, cycling when exhausted.
///
/// Each draw yields `value % bound`, so scripts can be written as the exact
/// results expected by the caller.
#[derive(Debug, Clone)]
pub struct SequenceRng {
    values: Vec<u32>,
    cursor: usize,
}

impl SequenceRng {
    pub fn new(values: impl Into<Vec<u32>>) -> Self {
        let mut values = values.into();
        if values.is_empty() {
            values.push(0);
        }
        Self { values, cursor: 0 }
    }

    /// Number of values drawn so far
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceRng {
    fn below(&mut self, bound: u32) -> u32 {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value % bound
    }
}
