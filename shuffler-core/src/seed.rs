//! Seeds: permutations of `n` items packed into one integer in `[0, n!)`.
//!
//! A seed is read as a number in the factorial (mixed-radix) system. Decoding
//! peels off a digit with radix `n`, then `n - 1`, and so on down to 1; each
//! digit picks among the items not chosen yet (Lehmer decoding). Generation
//! builds the same integer from independently drawn uniform digits, so a fresh
//! seed is uniform over all `n!` orderings.

use crate::{Permutation, ShuffleError};
use log::debug;
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};
use shufflerandom::{uniform, RandomSource};
use std::fmt;
use std::str::FromStr;

/// An arbitrary-precision shuffle seed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Seed(BigUint);

impl Seed {
    pub fn new(value: BigUint) -> Self {
        Seed(value)
    }

    /// `n!`, the exclusive upper bound for seeds of `n` items.
    pub fn factorial(n: usize) -> BigUint {
        (2..=n).fold(BigUint::one(), |acc, i| acc * BigUint::from(i))
    }

    /// Draw a uniformly random seed in `[0, n!)`.
    ///
    /// For `i` in `1..=n` the accumulator is multiplied by `i` and a uniform
    /// digit in `[0, i)` is added.
    pub fn generate<R: RandomSource + ?Sized>(
        n: usize,
        source: &mut R,
    ) -> Result<Self, ShuffleError> {
        let mut value = BigUint::zero();
        for radix in 1..=n {
            let digit = uniform(source, radix as u32)?;
            value = value * BigUint::from(radix) + BigUint::from(digit);
        }
        debug!("generated seed for {} items ({} bits)", n, value.bits());
        Ok(Seed(value))
    }

    /// Decode into the ordering of `n` items this seed names.
    ///
    /// Total for any seed: values at or above `n!` are not rejected here and
    /// simply lose their high digits.
    pub fn decode(&self, n: usize) -> Permutation {
        let mut used = vec![false; n];
        let mut items = Vec::with_capacity(n);
        let mut digits = self.digits();

        for i in 0..n {
            let mut rank = digits.next(n - i);
            for (index, taken) in used.iter_mut().enumerate() {
                if *taken {
                    continue;
                }
                if rank == 0 {
                    *taken = true;
                    items.push(index);
                    break;
                }
                rank -= 1;
            }
        }

        Permutation::from_vec_unchecked(items)
    }

    /// The unique seed in `[0, n!)` that decodes to `permutation`.
    pub fn from_permutation(permutation: &Permutation) -> Self {
        let n = permutation.len();
        let mut used = vec![false; n];
        let mut ranks = Vec::with_capacity(n);

        for &item in permutation {
            let rank = used[..item].iter().filter(|taken| !**taken).count();
            used[item] = true;
            ranks.push(rank);
        }

        // Most significant digit is the last one decode consumes.
        let mut value = BigUint::zero();
        for (i, &rank) in ranks.iter().enumerate().rev() {
            value = value * BigUint::from(n - i) + BigUint::from(rank);
        }
        Seed(value)
    }

    /// Reject seeds that do not name a distinct ordering of `n` items.
    pub fn check_range(&self, n: usize) -> Result<(), ShuffleError> {
        if self.0 < Self::factorial(n) {
            Ok(())
        } else {
            Err(ShuffleError::InvalidSeedRange {
                count: n,
                seed: self.to_string(),
            })
        }
    }

    /// Reader over a private copy of this seed's mixed-radix digits.
    pub(crate) fn digits(&self) -> Digits {
        Digits {
            rest: self.0.clone(),
        }
    }
}

/// Consumes mixed-radix digits, least significant first.
pub(crate) struct Digits {
    rest: BigUint,
}

impl Digits {
    /// Next digit in base `radix`; `radix` must be non-zero.
    pub(crate) fn next(&mut self, radix: usize) -> usize {
        let (quotient, digit) = self.rest.div_rem(&BigUint::from(radix));
        self.rest = quotient;
        // digit < radix, so it always fits
        digit.to_usize().unwrap_or_default()
    }
}

impl From<u64> for Seed {
    fn from(value: u64) -> Self {
        Seed(BigUint::from(value))
    }
}

impl From<BigUint> for Seed {
    fn from(value: BigUint) -> Self {
        Seed(value)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Seed {
    type Err = ShuffleError;

    /// Parse a non-negative decimal integer of any length.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ShuffleError::InvalidSeedText(s.to_string()));
        }
        BigUint::from_str(text)
            .map(Seed)
            .map_err(|_| ShuffleError::InvalidSeedText(s.to_string()))
    }
}
