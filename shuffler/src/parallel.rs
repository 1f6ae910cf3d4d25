//! Parallel shuffle derivation with deterministic output ordering.
//!
//! - Supervisor draws seeds from the random source, one after another
//! - Workers decode seeds and synthesize instructions (fully independent)
//!
//! Drawing is sequential because the source is stateful; everything derived
//! from a seed is pure, so results come back in draw order whatever the
//! thread count.

use log::debug;
use rayon::prelude::*;
use shuffler_core::{Seed, Shuffle, ShuffleError, ShuffleGenerator};
use shufflerandom::RandomSource;

/// Configuration for parallel execution.
#[derive(Clone, Default)]
pub struct ParallelConfig {
    /// Number of worker threads (0 = auto-detect)
    pub num_threads: usize,
}

/// Supervisor for parallel shuffle generation.
pub struct Supervisor<R: RandomSource> {
    generator: ShuffleGenerator<R>,
}

impl<R: RandomSource> Supervisor<R> {
    pub fn new(generator: ShuffleGenerator<R>, parallel_config: ParallelConfig) -> Self {
        // Configure rayon thread pool if custom thread count specified
        if parallel_config.num_threads > 0 {
            rayon::ThreadPoolBuilder::new()
                .num_threads(parallel_config.num_threads)
                .build_global()
                .ok(); // Ignore error if pool already initialized
        }

        Self { generator }
    }

    fn draw_seeds(&mut self, count: usize) -> Result<Vec<Seed>, ShuffleError> {
        (0..count).map(|_| self.generator.next_seed()).collect()
    }

    /// Produce `count` shuffles, in the order their seeds were drawn.
    pub fn produce(&mut self, count: usize) -> Result<Vec<Shuffle>, ShuffleError> {
        let seeds = self.draw_seeds(count)?;
        let items = self.generator.count();
        debug!("deriving {} shuffles of {} items", seeds.len(), items);

        seeds
            .into_par_iter()
            .map(|seed| Shuffle::from_seed(items, seed))
            .collect()
    }
}
