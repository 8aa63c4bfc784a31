//! The fixed table of difficulty tiers.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MechError;

/// A named difficulty preset, from easiest to hardest.
///
/// Each tier puts a fixed number of black tokens in the bag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// One black token.
    Facilissima,
    /// Two black tokens.
    Facile,
    /// Three black tokens.
    #[default]
    Normale,
    /// Four black tokens.
    Difficile,
    /// Five black tokens.
    Difficilissima,
    /// Six black tokens.
    QuasiImpossibile,
}

impl Difficulty {
    /// Every tier in table order.
    pub const ALL: [Difficulty; 6] = [
        Self::Facilissima,
        Self::Facile,
        Self::Normale,
        Self::Difficile,
        Self::Difficilissima,
        Self::QuasiImpossibile,
    ];

    /// Stable identifier of the tier.
    pub fn id(self) -> &'static str {
        match self {
            Self::Facilissima => "facilissima",
            Self::Facile => "facile",
            Self::Normale => "normale",
            Self::Difficile => "difficile",
            Self::Difficilissima => "difficilissima",
            Self::QuasiImpossibile => "quasi_impossibile",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Facilissima => "Facilissima",
            Self::Facile => "Facile",
            Self::Normale => "Normale",
            Self::Difficile => "Difficile",
            Self::Difficilissima => "Difficilissima",
            Self::QuasiImpossibile => "Quasi impossibile",
        }
    }

    /// Number of black tokens this tier adds to the bag.
    pub fn blacks(self) -> u32 {
        match self {
            Self::Facilissima => 1,
            Self::Facile => 2,
            Self::Normale => 3,
            Self::Difficile => 4,
            Self::Difficilissima => 5,
            Self::QuasiImpossibile => 6,
        }
    }
}

impl FromStr for Difficulty {
    type Err = MechError;

    /// Accepts the id or the label, ignoring case; spaces and dashes count
    /// as underscores.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        Self::ALL
            .into_iter()
            .find(|d| d.id() == normalized)
            .ok_or_else(|| MechError::UnknownDifficulty(s.trim().to_string()))
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} black)", self.label(), self.blacks())
    }
}
