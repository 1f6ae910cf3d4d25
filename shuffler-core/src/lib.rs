mod card;
mod error;
mod instructions;
mod permutation;
mod seed;
mod shuffle;

pub use card::{Card, Face, Rank, Suit};
pub use error::ShuffleError;
pub use instructions::{pass_count, slot_count, synthesize, Algorithm, Pass, PILE_COUNT};
pub use permutation::Permutation;
pub use seed::Seed;
pub use shuffle::{validate_count, Shuffle, ShuffleGenerator, MAX_COUNT, MIN_COUNT};
