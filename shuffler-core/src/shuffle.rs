use crate::{synthesize, Algorithm, Permutation, Seed, ShuffleError};
use log::debug;
use shufflerandom::{OsEntropy, RandomSource};

/// Fewest items worth shuffling
pub const MIN_COUNT: usize = 2;
/// Most items supported
pub const MAX_COUNT: usize = 100;

/// Check an item count before it reaches the engine.
pub fn validate_count(count: usize) -> Result<(), ShuffleError> {
    if (MIN_COUNT..=MAX_COUNT).contains(&count) {
        Ok(())
    } else {
        Err(ShuffleError::InvalidCount { count })
    }
}

/// A seed together with everything derived from it.
///
/// The permutation and the instructions are recomputed from `(count, seed)`;
/// only those two values need to be stored or shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shuffle {
    count: usize,
    seed: Seed,
    permutation: Permutation,
    algorithm: Algorithm,
}

impl Shuffle {
    /// Rebuild a shuffle from a caller-supplied count and seed.
    ///
    /// Rejects counts outside `2..=100` and seeds that are not below `count!`.
    pub fn from_seed(count: usize, seed: Seed) -> Result<Self, ShuffleError> {
        validate_count(count)?;
        seed.check_range(count)?;
        Ok(Self::derive(count, seed))
    }

    /// Draw a fresh seed and derive the shuffle from it.
    pub fn random<R: RandomSource + ?Sized>(
        count: usize,
        source: &mut R,
    ) -> Result<Self, ShuffleError> {
        validate_count(count)?;
        let seed = Seed::generate(count, source)?;
        Ok(Self::derive(count, seed))
    }

    fn derive(count: usize, seed: Seed) -> Self {
        let permutation = seed.decode(count);
        let algorithm = synthesize(count, &permutation, &seed);
        Shuffle {
            count,
            seed,
            permutation,
            algorithm,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn seed(&self) -> &Seed {
        &self.seed
    }

    pub fn permutation(&self) -> &Permutation {
        &self.permutation
    }

    pub fn algorithm(&self) -> &Algorithm {
        &self.algorithm
    }

    /// Deal an ordered deck through the instructions and compare the result
    /// with the permutation.
    pub fn verify(&self) -> bool {
        let deck = Permutation::identity(self.count);
        self.algorithm.apply(deck.as_slice()) == self.permutation.as_slice()
    }
}

/// Generator for fresh shuffles of a fixed item count
pub struct ShuffleGenerator<R: RandomSource> {
    count: usize,
    source: R,
}

impl ShuffleGenerator<OsEntropy> {
    /// Generator backed by operating-system entropy
    pub fn secure(count: usize) -> Result<Self, ShuffleError> {
        Self::new(count, OsEntropy::new())
    }
}

impl<R: RandomSource> ShuffleGenerator<R> {
    pub fn new(count: usize, source: R) -> Result<Self, ShuffleError> {
        validate_count(count)?;
        Ok(ShuffleGenerator { count, source })
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Draw the next seed without deriving anything from it
    pub fn next_seed(&mut self) -> Result<Seed, ShuffleError> {
        Seed::generate(self.count, &mut self.source)
    }

    pub fn generate(&mut self) -> Result<Shuffle, ShuffleError> {
        let seed = self.next_seed()?;
        debug!("new shuffle of {} items, seed {}", self.count, seed);
        Ok(Shuffle::derive(self.count, seed))
    }

    /// Generate multiple shuffles
    pub fn generate_many(&mut self, count: usize) -> Result<Vec<Shuffle>, ShuffleError> {
        (0..count).map(|_| self.generate()).collect()
    }
}
