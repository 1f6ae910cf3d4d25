//! Random sources for shuffle generation.
//!
//! Every consumer draws 32-bit words through [`RandomSource`] and narrows them
//! to a bounded range with [`uniform`], which rejects the tail of the 32-bit
//! range so that no residue is favoured.

use rand::rngs::OsRng;
use rand::RngCore;
use thiserror::Error;

/// Failure to produce random words.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EntropyError {
    /// The secure generator could not be read. Not recoverable by retrying.
    #[error("secure random source unavailable: {0}")]
    Unavailable(String),
    /// `uniform(0)` has no value to return.
    #[error("cannot draw from an empty range")]
    EmptyRange,
}

/// A source of uniformly distributed 32-bit words.
pub trait RandomSource {
    fn try_next_u32(&mut self) -> Result<u32, EntropyError>;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn try_next_u32(&mut self) -> Result<u32, EntropyError> {
        (**self).try_next_u32()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn try_next_u32(&mut self) -> Result<u32, EntropyError> {
        (**self).try_next_u32()
    }
}

/// Draw an integer in `[0, n)` with rejection sampling.
///
/// Words at or above `floor(2^32 / n) * n` are discarded and redrawn, so every
/// residue is equally likely whether or not `n` divides `2^32`. Fewer than two
/// draws are needed on average.
pub fn uniform<R: RandomSource + ?Sized>(source: &mut R, n: u32) -> Result<u32, EntropyError> {
    if n == 0 {
        return Err(EntropyError::EmptyRange);
    }

    let threshold = rejection_threshold(n);
    loop {
        let word = source.try_next_u32()?;
        if u64::from(word) < threshold {
            return Ok(word % n);
        }
        log::trace!("rejected word {} for range {}", word, n);
    }
}

/// First 32-bit word value that `uniform(n)` refuses to reduce.
pub fn rejection_threshold(n: u32) -> u64 {
    const SPAN: u64 = 1 << 32;
    (SPAN / u64::from(n)) * u64::from(n)
}

// ============================================================================
// Operating-system entropy
// ============================================================================

/// Cryptographically secure words from the operating system.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsEntropy;

impl OsEntropy {
    pub fn new() -> Self {
        OsEntropy
    }
}

impl RandomSource for OsEntropy {
    fn try_next_u32(&mut self) -> Result<u32, EntropyError> {
        let mut bytes = [0u8; 4];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| EntropyError::Unavailable(e.to_string()))?;
        Ok(u32::from_le_bytes(bytes))
    }
}

// ============================================================================
// Xoshiro256++ - deterministic source for reproducible runs
// ============================================================================
//
// Reference: https://prng.di.unimi.it/
// Not suitable when the shuffle must be unpredictable; use OsEntropy there.

/// Seedable PRNG using the xoshiro256++ algorithm.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Xoshiro256PlusPlus {
    s: [u64; 4],
}

impl Xoshiro256PlusPlus {
    /// Create a new RNG seeded from a u64.
    ///
    /// Uses SplitMix64 to expand the seed into the full 256-bit state,
    /// as recommended by the xoshiro authors.
    pub fn seed_from_u64(seed: u64) -> Self {
        let mut z = seed;
        let mut state = [0u64; 4];
        for s in &mut state {
            z = z.wrapping_add(0x9e3779b97f4a7c15);
            let mut x = z;
            x = (x ^ (x >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
            x = (x ^ (x >> 27)).wrapping_mul(0x94d049bb133111eb);
            *s = x ^ (x >> 31);
        }
        Self { s: state }
    }

    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        let result = (self.s[0].wrapping_add(self.s[3]))
            .rotate_left(23)
            .wrapping_add(self.s[0]);

        let t = self.s[1] << 17;

        self.s[2] ^= self.s[0];
        self.s[3] ^= self.s[1];
        self.s[1] ^= self.s[2];
        self.s[0] ^= self.s[3];

        self.s[2] ^= t;
        self.s[3] = self.s[3].rotate_left(45);

        result
    }

    /// Upper half of the next u64; the high bits are the stronger ones.
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }
}

impl RandomSource for Xoshiro256PlusPlus {
    fn try_next_u32(&mut self) -> Result<u32, EntropyError> {
        Ok(self.next_u32())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Replays a fixed list of words, then reports exhaustion.
    struct Scripted {
        words: VecDeque<u32>,
        draws: usize,
    }

    impl Scripted {
        fn new(words: &[u32]) -> Self {
            Scripted {
                words: words.iter().copied().collect(),
                draws: 0,
            }
        }
    }

    impl RandomSource for Scripted {
        fn try_next_u32(&mut self) -> Result<u32, EntropyError> {
            self.draws += 1;
            self.words
                .pop_front()
                .ok_or_else(|| EntropyError::Unavailable("script exhausted".to_string()))
        }
    }

    #[test]
    fn test_threshold_values() {
        assert_eq!(rejection_threshold(1), 1 << 32);
        assert_eq!(rejection_threshold(2), 1 << 32);
        assert_eq!(rejection_threshold(3), 4294967295);
        assert_eq!(rejection_threshold(52), (4294967296 / 52) * 52);
    }

    #[test]
    fn test_tail_words_are_redrawn() {
        // u32::MAX sits exactly on the threshold for n = 3 and must not be reduced.
        let mut source = Scripted::new(&[u32::MAX, 5]);
        assert_eq!(uniform(&mut source, 3).unwrap(), 2);
        assert_eq!(source.draws, 2);
    }

    #[test]
    fn test_every_tail_word_rejected() {
        let n = 100u32;
        let threshold = rejection_threshold(n);
        let tail: Vec<u32> = (threshold..(1u64 << 32)).map(|w| w as u32).collect();
        assert!(!tail.is_empty());

        let mut words = tail.clone();
        words.push(42);
        let mut source = Scripted::new(&words);
        assert_eq!(uniform(&mut source, n).unwrap(), 42);
        assert_eq!(source.draws, tail.len() + 1);
    }

    #[test]
    fn test_word_below_threshold_is_reduced() {
        let mut source = Scripted::new(&[1_000_003]);
        assert_eq!(uniform(&mut source, 10).unwrap(), 3);
        assert_eq!(source.draws, 1);
    }

    #[test]
    fn test_single_value_range() {
        let mut source = Scripted::new(&[u32::MAX]);
        assert_eq!(uniform(&mut source, 1).unwrap(), 0);
    }

    #[test]
    fn test_empty_range_is_an_error() {
        let mut source = Scripted::new(&[7]);
        assert_eq!(uniform(&mut source, 0), Err(EntropyError::EmptyRange));
        assert_eq!(source.draws, 0);
    }

    #[test]
    fn test_unavailable_source_propagates() {
        let mut source = Scripted::new(&[]);
        assert!(matches!(
            uniform(&mut source, 6),
            Err(EntropyError::Unavailable(_))
        ));
    }

    #[test]
    fn test_os_entropy_in_bounds() {
        let mut source = OsEntropy::new();
        for n in [1, 2, 3, 52, 100] {
            for _ in 0..200 {
                assert!(uniform(&mut source, n).unwrap() < n);
            }
        }
    }

    #[test]
    fn test_xoshiro_deterministic() {
        let mut rng1 = Xoshiro256PlusPlus::seed_from_u64(42);
        let mut rng2 = Xoshiro256PlusPlus::seed_from_u64(42);

        for _ in 0..100 {
            assert_eq!(rng1.next_u64(), rng2.next_u64());
        }
    }

    #[test]
    fn test_xoshiro_different_seeds() {
        let mut rng1 = Xoshiro256PlusPlus::seed_from_u64(1);
        let mut rng2 = Xoshiro256PlusPlus::seed_from_u64(2);
        assert_ne!(rng1.next_u64(), rng2.next_u64());
    }

    #[test]
    fn test_uniform_distribution() {
        // Rough check that no residue is favoured
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(12345);
        let n = 52u32;
        let samples = 52000;
        let mut counts = [0u32; 52];

        for _ in 0..samples {
            counts[uniform(&mut rng, n).unwrap() as usize] += 1;
        }

        // Allow 30% deviation (700-1300) around 1000 hits per bucket
        let expected = samples / n;
        for (i, &count) in counts.iter().enumerate() {
            assert!(
                count >= expected * 7 / 10 && count <= expected * 13 / 10,
                "Bucket {} has {} hits, expected ~{} (±30%)",
                i,
                count,
                expected
            );
        }
    }

    #[test]
    fn test_boxed_source() {
        let mut boxed: Box<dyn RandomSource> = Box::new(Xoshiro256PlusPlus::seed_from_u64(9));
        let mut plain = Xoshiro256PlusPlus::seed_from_u64(9);
        assert_eq!(
            uniform(&mut boxed, 1000).unwrap(),
            uniform(&mut plain, 1000).unwrap()
        );
    }
}
