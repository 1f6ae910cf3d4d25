//! Dealing instructions that reproduce a permutation by hand.
//!
//! Each item is given an address in `[0, K^S)`. Sorting items by address yields
//! the target order, so the instructions are a least-significant-digit radix
//! sort in base `K`: one pass per digit, dealing into `K` piles and stacking
//! them. Slots not used by a real item are padding, and which slots are padding
//! is chosen from the seed so that piles stay evenly filled.
//!
//! A deck is listed bottom card first. A pass deals from the top (the end of
//! the list), so the order within every pile is the reverse of the order the
//! cards had in the deck; the digit complement on alternate passes undoes it.

use crate::{Permutation, Seed};
use log::{debug, trace};

/// Number of piles dealt into on every pass
pub const PILE_COUNT: usize = 4;

/// Passes needed to address `n` items: smallest `S` with `K^S >= n`.
pub fn pass_count(n: usize) -> usize {
    let mut passes = 0;
    let mut slots = 1;
    while slots < n {
        passes += 1;
        slots *= PILE_COUNT;
    }
    passes
}

/// Addressable slots, `K^S`, for `n` items.
pub fn slot_count(n: usize) -> usize {
    PILE_COUNT.pow(pass_count(n) as u32)
}

/// One deal: the pile (1-based) for each card, in the order the cards are dealt.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pass {
    piles: Vec<u8>,
}

impl Pass {
    pub fn piles(&self) -> &[u8] {
        &self.piles
    }

    pub fn len(&self) -> usize {
        self.piles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.piles.is_empty()
    }

    /// How many cards land on each pile
    pub fn pile_sizes(&self) -> [usize; PILE_COUNT] {
        let mut sizes = [0; PILE_COUNT];
        for &pile in &self.piles {
            sizes[usize::from(pile) - 1] += 1;
        }
        sizes
    }
}

/// The full sequence of passes for one shuffle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Algorithm {
    passes: Vec<Pass>,
}

impl Algorithm {
    pub fn passes(&self) -> &[Pass] {
        &self.passes
    }

    pub fn len(&self) -> usize {
        self.passes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    /// Carry out the passes on a physical deck.
    ///
    /// `deck` is listed bottom card first. Every pass deals from the top onto
    /// piles 1..=K as instructed, then stacks the piles with pile 1 at the
    /// bottom. The deck must hold as many cards as each pass has labels.
    pub fn apply<T: Clone>(&self, deck: &[T]) -> Vec<T> {
        let mut deck = deck.to_vec();
        for pass in &self.passes {
            let mut piles: Vec<Vec<T>> = (0..PILE_COUNT).map(|_| Vec::new()).collect();
            for (card, &pile) in deck.into_iter().rev().zip(pass.piles()) {
                piles[usize::from(pile) - 1].push(card);
            }
            deck = piles.into_iter().flatten().collect();
        }
        deck
    }
}

/// Build the dealing instructions that turn an ordered deck of `n` items into
/// `permutation`.
///
/// `seed` must be the seed `permutation` was decoded from: its digits are read
/// again, from the start, to place the padding slots. `permutation` must hold
/// `n` items.
///
/// Each padding swap divides the seed before the next one is drawn. The
/// earlier web shuffler page reused the undivided seed, so for seeds shared in
/// its links these instructions differ from the page's, though both produce
/// the same permutation.
pub fn synthesize(n: usize, permutation: &Permutation, seed: &Seed) -> Algorithm {
    debug_assert_eq!(permutation.len(), n);

    let passes = pass_count(n);
    let slots = slot_count(n);
    debug!(
        "synthesizing {} passes over {} slots ({} padding) for {} items",
        passes,
        slots,
        slots - n,
        n
    );

    let padding = padding_slots(n, slots, seed);
    let mut order = assign_addresses(n, permutation, &padding);

    let mut result = Vec::with_capacity(passes);
    let mut place = 1;
    for pass in 0..passes {
        // Each deal reverses the order within a pile; complement the digit
        // whenever an odd number of deals still follow.
        let complement = (passes - pass - 1) % 2 == 1;

        let mut piles: Vec<Vec<usize>> = vec![Vec::new(); PILE_COUNT];
        let mut labels = Vec::with_capacity(n);
        for &address in order.iter().rev() {
            let mut digit = (address / place) % PILE_COUNT;
            if complement {
                digit = PILE_COUNT - 1 - digit;
            }
            labels.push((digit + 1) as u8);
            piles[digit].push(address);
        }
        trace!(
            "pass {}: pile sizes {:?}",
            pass,
            piles.iter().map(Vec::len).collect::<Vec<_>>()
        );

        order = piles.into_iter().flatten().collect();
        place *= PILE_COUNT;
        result.push(Pass { piles: labels });
    }

    Algorithm { passes: result }
}

/// Mark which of the `slots` addresses are padding.
///
/// Starts with the last `slots - n` marked and Fisher-Yates shuffles the marks,
/// taking each swap index as the next digit of the seed in radix `i + 1`.
fn padding_slots(n: usize, slots: usize, seed: &Seed) -> Vec<bool> {
    let mut padding: Vec<bool> = (0..slots).map(|slot| slot >= n).collect();
    let mut digits = seed.digits();
    for i in (1..slots).rev() {
        let j = digits.next(i + 1);
        padding.swap(i, j);
    }
    padding
}

/// Address of every item: the p-th real slot goes to `permutation[p]`.
///
/// Returned indexed by the item's starting position, which for the ordered
/// deck is the item itself.
fn assign_addresses(n: usize, permutation: &Permutation, padding: &[bool]) -> Vec<usize> {
    let mut addresses = vec![0; n];
    let real_slots = padding
        .iter()
        .enumerate()
        .filter(|&(_, &pad)| !pad)
        .map(|(slot, _)| slot);
    for (slot, &item) in real_slots.zip(permutation) {
        addresses[item] = slot;
    }
    addresses
}
