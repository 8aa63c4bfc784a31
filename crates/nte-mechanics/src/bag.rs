//! The token bag and its draw-without-replacement semantics.

use serde::{Deserialize, Serialize};

use crate::random::RandomSource;
use crate::token::Token;

/// The tokens still waiting in the bag for the current test.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bag {
    white: u32,
    black: u32,
}

impl Bag {
    /// Create a bag holding the given counts.
    pub fn new(white: u32, black: u32) -> Self {
        Self { white, black }
    }

    /// Replace the contents of the bag.
    pub fn initialize(&mut self, white: u32, black: u32) {
        self.white = white;
        self.black = black;
    }

    /// White tokens left in the bag.
    pub fn white(&self) -> u32 {
        self.white
    }

    /// Black tokens left in the bag.
    pub fn black(&self) -> u32 {
        self.black
    }

    /// Total tokens left in the bag, saturating at `u32::MAX`.
    pub fn remaining(&self) -> u32 {
        self.white.saturating_add(self.black)
    }

    /// Returns true if no tokens are left.
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Draw one token and take it out of the bag.
    ///
    /// The chance of white is `white / remaining` at the moment of the
    /// draw. Returns `None` without touching the source when the bag is
    /// empty.
    pub fn draw_one(&mut self, rng: &mut impl RandomSource) -> Option<Token> {
        let total = self.remaining();
        if total == 0 {
            return None;
        }
        let r = rng.next_below(total);
        debug_assert!(r < total, "random source returned {r} for bound {total}");
        if r < self.white {
            self.white -= 1;
            Some(Token::White)
        } else {
            self.black -= 1;
            Some(Token::Black)
        }
    }
}

impl std::fmt::Display for Bag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} white, {} black", self.white, self.black)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{EntropySource, SequenceSource};
    use proptest::prelude::*;

    #[test]
    fn empty_bag_draws_nothing() {
        let mut bag = Bag::new(0, 0);
        let mut rng = SequenceSource::constant(0);
        assert_eq!(bag.draw_one(&mut rng), None);
        assert_eq!(bag, Bag::new(0, 0));
        assert_eq!(rng.calls(), 0);
    }

    #[test]
    fn only_white_always_white() {
        let mut rng = EntropySource::seeded(7);
        for _ in 0..200 {
            let mut bag = Bag::new(1, 0);
            assert_eq!(bag.draw_one(&mut rng), Some(Token::White));
            assert!(bag.is_empty());
        }
    }

    #[test]
    fn only_black_always_black() {
        let mut rng = EntropySource::seeded(8);
        for _ in 0..200 {
            let mut bag = Bag::new(0, 1);
            assert_eq!(bag.draw_one(&mut rng), Some(Token::Black));
            assert!(bag.is_empty());
        }
    }

    #[test]
    fn low_index_picks_white() {
        // Positions [0, white) are white, the rest are black.
        let mut bag = Bag::new(2, 3);
        let mut rng = SequenceSource::new(vec![1, 3, 0]);
        assert_eq!(bag.draw_one(&mut rng), Some(Token::White));
        assert_eq!(bag, Bag::new(1, 3));
        assert_eq!(bag.draw_one(&mut rng), Some(Token::Black));
        assert_eq!(bag, Bag::new(1, 2));
        assert_eq!(bag.draw_one(&mut rng), Some(Token::White));
        assert_eq!(bag, Bag::new(0, 2));
    }

    #[test]
    fn probability_follows_remaining_tokens() {
        // With one white and one black, the second draw is forced.
        let mut rng = EntropySource::seeded(3);
        for _ in 0..100 {
            let mut bag = Bag::new(1, 1);
            let first = bag.draw_one(&mut rng).unwrap();
            let second = bag.draw_one(&mut rng).unwrap();
            assert_ne!(first, second);
            assert_eq!(bag.draw_one(&mut rng), None);
        }
    }

    #[test]
    fn initialize_replaces_contents() {
        let mut bag = Bag::new(5, 5);
        bag.initialize(1, 2);
        assert_eq!(bag.white(), 1);
        assert_eq!(bag.black(), 2);
        assert_eq!(bag.to_string(), "1 white, 2 black");
    }

    #[test]
    fn huge_counts_do_not_overflow() {
        let mut bag = Bag::new(u32::MAX, 1);
        assert_eq!(bag.remaining(), u32::MAX);
        let mut rng = SequenceSource::constant(0);
        assert_eq!(bag.draw_one(&mut rng), Some(Token::White));
        assert_eq!(bag, Bag::new(u32::MAX - 1, 1));
        assert_eq!(bag.remaining(), u32::MAX);
    }

    proptest! {
        #[test]
        fn draws_conserve_tokens(white in 0u32..20, black in 0u32..20, seed in any::<u64>()) {
            let mut bag = Bag::new(white, black);
            let mut rng = EntropySource::seeded(seed);
            let total = white + black;
            let mut whites = 0;
            for n in 1..=total {
                if bag.draw_one(&mut rng) == Some(Token::White) {
                    whites += 1;
                }
                prop_assert_eq!(bag.remaining(), total - n);
            }
            prop_assert_eq!(whites, white);
            prop_assert_eq!(bag.draw_one(&mut rng), None);
        }
    }
}
