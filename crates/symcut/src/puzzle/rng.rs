//! Index sources for random moves.
//!
//! Random cutter/symmetry picks go through `IndexSource` so scrambles can be
//! replayed from a seed and tests can script the exact move sequence.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform draw of an index in `0..bound`.
pub trait IndexSource {
    /// `bound` is always at least 1 when called by the puzzle.
    fn next_index(&mut self, bound: usize) -> usize;
}

/// `IndexSource` backed by any `rand` generator.
#[derive(Clone, Debug)]
pub struct RandIndices<R> {
    rng: R,
}

impl<R: Rng> RandIndices<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl RandIndices<StdRng> {
    /// Reproducible stream: the same seed yields the same scramble.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> IndexSource for RandIndices<R> {
    fn next_index(&mut self, bound: usize) -> usize {
        self.rng.gen_range(0..bound.max(1))
    }
}

/// Replays a fixed list of indices (wrapping), each reduced modulo the bound.
#[derive(Clone, Debug)]
pub struct ScriptedIndices {
    script: Vec<usize>,
    pos: usize,
}

impl ScriptedIndices {
    pub fn new(script: Vec<usize>) -> Self {
        Self { script, pos: 0 }
    }
}

impl IndexSource for ScriptedIndices {
    fn next_index(&mut self, bound: usize) -> usize {
        if self.script.is_empty() {
            return 0;
        }
        let v = self.script[self.pos % self.script.len()];
        self.pos += 1;
        v % bound.max(1)
    }
}
