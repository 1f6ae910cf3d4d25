use shufflerandom::EntropyError;
use thiserror::Error;

/// Errors raised at the boundary of the shuffle engine.
///
/// The pure operations (`Seed::decode`, `synthesize`, `Algorithm::apply`) never
/// fail; these variants come from entropy draws and from validating
/// caller-supplied counts, seeds, permutations and faces.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShuffleError {
    #[error(transparent)]
    Entropy(#[from] EntropyError),

    #[error("item count {count} is outside the supported range 2..=100")]
    InvalidCount { count: usize },

    #[error("seed {seed} is not below {count}!")]
    InvalidSeedRange { count: usize, seed: String },

    #[error("invalid seed {0:?}: expected a non-negative decimal integer")]
    InvalidSeedText(String),

    #[error("not a permutation: {0}")]
    InvalidPermutation(String),

    #[error("unknown face {0:?}: expected \"card\" or \"number\"")]
    InvalidFace(String),
}
