//! Outcome of a test, derived from its draw history.
//!
//! One white token is enough to succeed; each further white is an extra
//! success. Black tokens never cancel whites: they are complications the
//! character has to deal with.

use serde::{Deserialize, Serialize};

use crate::config::SessionConfig;
use crate::random::RandomSource;
use crate::session::TestSession;
use crate::token::{DrawPhase, DrawnToken};

/// Counts derived from the tokens drawn so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// White tokens drawn.
    pub whites: u32,
    /// Black tokens drawn and not spent.
    pub blacks: u32,
    /// Black tokens among `blacks` that came from the risk extension.
    pub risk_blacks: u32,
}

impl Outcome {
    /// Tally a draw history.
    pub fn from_history(history: &[DrawnToken]) -> Self {
        history.iter().fold(Self::default(), |mut acc, d| {
            if d.token.is_white() {
                acc.whites += 1;
            } else {
                acc.blacks += 1;
                if d.phase == DrawPhase::Risk {
                    acc.risk_blacks += 1;
                }
            }
            acc
        })
    }

    /// At least one white token was drawn.
    pub fn success(&self) -> bool {
        self.whites >= 1
    }

    /// Whites beyond the first.
    pub fn extra_successes(&self) -> u32 {
        self.whites.saturating_sub(1)
    }

    /// Blacks to be handled as complications.
    pub fn complications(&self) -> u32 {
        self.blacks
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.success() {
            write!(f, "Success")?;
            if self.extra_successes() > 0 {
                write!(f, " (+{} extra)", self.extra_successes())?;
            }
        } else {
            write!(f, "Failure")?;
        }
        match self.complications() {
            0 => Ok(()),
            1 => write!(f, ", 1 complication"),
            n => write!(f, ", {n} complications"),
        }
    }
}

/// Exact chance of drawing at least one white token.
///
/// Draws `draws` tokens without replacement from `white + black` tokens,
/// stopping early if the bag runs out.
pub fn success_probability(white: u32, black: u32, draws: u32) -> f64 {
    let total = white + black;
    let n = draws.min(total);
    if white == 0 || n == 0 {
        return 0.0;
    }
    if black < n {
        return 1.0;
    }
    // Chance that every draw is black.
    let all_black: f64 = (0..n)
        .map(|i| f64::from(black - i) / f64::from(total - i))
        .product();
    1.0 - all_black
}

/// Estimate the success rate by running `trials` full tests.
///
/// Each trial starts a test from `config` and draws up to the base limit.
/// Returns 0.0 when `trials` is 0.
pub fn simulate<R: RandomSource>(config: &SessionConfig, trials: u32, rng: R) -> f64 {
    if trials == 0 {
        return 0.0;
    }
    let mut session = TestSession::with_source(config.clone(), rng);
    let mut successes = 0u32;
    for _ in 0..trials {
        session.start_test();
        while session.draw().is_some() {}
        if session.outcome().success() {
            successes += 1;
        }
    }
    f64::from(successes) / f64::from(trials)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::EntropySource;
    use crate::token::Token;
    use proptest::prelude::*;

    fn tokens(seq: &[Token]) -> Vec<DrawnToken> {
        seq.iter().copied().map(DrawnToken::base).collect()
    }

    #[test]
    fn empty_history_fails() {
        let o = Outcome::from_history(&[]);
        assert!(!o.success());
        assert_eq!(o.extra_successes(), 0);
        assert_eq!(o.complications(), 0);
        assert_eq!(o.to_string(), "Failure");
    }

    #[test]
    fn one_white_is_enough() {
        let o = Outcome::from_history(&tokens(&[Token::Black, Token::White, Token::Black]));
        assert!(o.success());
        assert_eq!(o.extra_successes(), 0);
        assert_eq!(o.complications(), 2);
        assert_eq!(o.to_string(), "Success, 2 complications");
    }

    #[test]
    fn extra_whites_improve() {
        let o = Outcome::from_history(&tokens(&[Token::White, Token::White, Token::White]));
        assert_eq!(o.extra_successes(), 2);
        assert_eq!(o.to_string(), "Success (+2 extra)");
    }

    #[test]
    fn risk_blacks_tallied_separately() {
        let history = vec![
            DrawnToken::base(Token::Black),
            DrawnToken::base(Token::White),
            DrawnToken::risk(Token::Black),
        ];
        let o = Outcome::from_history(&history);
        assert_eq!(o.blacks, 2);
        assert_eq!(o.risk_blacks, 1);
        assert_eq!(o.to_string(), "Success, 2 complications");
    }

    #[test]
    fn probability_edges() {
        assert_eq!(success_probability(0, 5, 4), 0.0);
        assert_eq!(success_probability(3, 0, 1), 1.0);
        assert_eq!(success_probability(3, 3, 0), 0.0);
        // Four draws from 3 black: a white must come out.
        assert_eq!(success_probability(3, 3, 4), 1.0);
    }

    #[test]
    fn probability_hypergeometric() {
        // 1 white, 1 black, one draw: half.
        assert!((success_probability(1, 1, 1) - 0.5).abs() < 1e-12);
        // 1 white, 3 black, two draws: 1 - (3/4 * 2/3) = 0.5.
        assert!((success_probability(1, 3, 2) - 0.5).abs() < 1e-12);
        // 2 white, 4 black, two draws: 1 - (4/6 * 3/5) = 0.6.
        assert!((success_probability(2, 4, 2) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn simulation_tracks_exact_odds() {
        let config = SessionConfig::default().with_traits(1).with_draw_limit(2);
        let estimate = simulate(&config, 4000, EntropySource::seeded(21));
        let exact = success_probability(1, 3, 2);
        assert!((estimate - exact).abs() < 0.05, "estimate {estimate} vs {exact}");
    }

    #[test]
    fn simulation_without_trials() {
        assert_eq!(
            simulate(&SessionConfig::default(), 0, EntropySource::seeded(1)),
            0.0
        );
    }

    proptest! {
        #[test]
        fn derived_counts_match_history(seq in proptest::collection::vec(any::<bool>(), 0..12)) {
            let history: Vec<DrawnToken> = seq
                .iter()
                .map(|&w| DrawnToken::base(if w { Token::White } else { Token::Black }))
                .collect();
            let whites = seq.iter().filter(|&&w| w).count() as u32;
            let o = Outcome::from_history(&history);
            prop_assert_eq!(o.success(), whites >= 1);
            prop_assert_eq!(o.extra_successes(), whites.saturating_sub(1));
            prop_assert_eq!(o.complications(), seq.len() as u32 - whites);
        }

        #[test]
        fn probability_in_unit_range(w in 0u32..13, b in 0u32..100, n in 0u32..6) {
            let p = success_probability(w, b, n);
            prop_assert!((0.0..=1.0).contains(&p));
        }
    }
}
