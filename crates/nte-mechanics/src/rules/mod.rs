//! Rule configuration: from traits and difficulty to a starting bag.
//!
//! Raw inputs are never rejected. Numbers are truncated toward zero and
//! clamped into range, and non-numeric input counts as zero.

pub mod difficulty;

pub use difficulty::Difficulty;

use serde::{Deserialize, Serialize};

/// Most traits that can be in play for one test.
pub const MAX_TRAITS: u32 = 12;
/// Largest manual black token count.
pub const MAX_BLACK_OVERRIDE: u32 = 99;
/// Smallest configurable draw limit.
pub const MIN_DRAW_LIMIT: u32 = 1;
/// Largest configurable draw limit.
pub const MAX_DRAW_LIMIT: u32 = 4;
/// Draw limit while risk is active.
pub const RISK_DRAW_LIMIT: u32 = 5;

/// Truncate toward zero and clamp into `[min, max]`.
///
/// Non-finite values count as zero before clamping.
pub fn clamp_int(value: f64, min: u32, max: u32) -> u32 {
    let truncated = if value.is_finite() { value.trunc() } else { 0.0 };
    truncated.clamp(f64::from(min), f64::from(max)) as u32
}

/// Clamp an integer into `[min, max]`.
pub fn clamp_count(value: i64, min: u32, max: u32) -> u32 {
    value.clamp(i64::from(min), i64::from(max)) as u32
}

/// Parse user text as a number and clamp it; unparsable text counts as zero.
pub fn parse_clamped(text: &str, min: u32, max: u32) -> u32 {
    let value = text.trim().parse::<f64>().unwrap_or(0.0);
    clamp_int(value, min, max)
}

/// The declarative inputs that decide a test's starting bag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Traits in play; each one is a white token.
    pub traits: u32,
    /// Difficulty tier supplying the black tokens.
    pub difficulty: Difficulty,
    /// Whether the manual black count replaces the tier's.
    pub override_enabled: bool,
    /// Manual black count, kept while the override is switched off.
    pub manual_blacks: u32,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            traits: 3,
            difficulty: Difficulty::Normale,
            override_enabled: false,
            manual_blacks: 3,
        }
    }
}

impl RuleConfig {
    /// Create a configuration, clamping every count into range.
    ///
    /// `Some(n)` switches the manual black override on with `n` blacks.
    pub fn new(traits: i64, difficulty: Difficulty, black_override: Option<i64>) -> Self {
        let mut config = Self {
            traits: clamp_count(traits, 0, MAX_TRAITS),
            difficulty,
            ..Self::default()
        };
        config.set_black_override(black_override);
        config
    }

    /// Switch the override on with a new manual count, or off with `None`.
    ///
    /// Switching off keeps the manual count for the next time it is enabled.
    pub fn set_black_override(&mut self, blacks: Option<i64>) {
        match blacks {
            Some(b) => {
                self.manual_blacks = clamp_count(b, 0, MAX_BLACK_OVERRIDE);
                self.override_enabled = true;
            }
            None => self.override_enabled = false,
        }
    }

    /// The manual count in force, if the override is on.
    pub fn black_override(&self) -> Option<u32> {
        self.override_enabled.then(|| self.manual_blacks.min(MAX_BLACK_OVERRIDE))
    }

    /// White tokens this configuration puts in the bag.
    pub fn whites(&self) -> u32 {
        self.traits.min(MAX_TRAITS)
    }

    /// Black tokens this configuration puts in the bag.
    pub fn blacks(&self) -> u32 {
        self.black_override().unwrap_or_else(|| self.difficulty.blacks())
    }

    /// The canonical `(white, black)` starting composition.
    pub fn resolve(&self) -> (u32, u32) {
        (self.whites(), self.blacks())
    }
}
