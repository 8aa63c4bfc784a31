//! Modifiers that carry effects within and across tests.
//!
//! - **Risk** raises the draw limit for the rest of the current test.
//! - **Confusion** is armed before a test and consumed when the next test
//!   starts, randomizing the trait tokens of that one test.
//! - **Spends** convert one drawn black token into a narrative effect; each
//!   effect can be claimed once per test.

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MechError;
use crate::token::DrawnToken;

/// An effect a drawn black token can be spent on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectKind {
    /// Push through with a burst of adrenaline.
    Adrenaline,
    /// Take on confusion.
    Confusion,
}

impl EffectKind {
    /// Every spendable effect.
    pub const ALL: [EffectKind; 2] = [Self::Adrenaline, Self::Confusion];

    /// Stable identifier of the effect.
    pub fn id(self) -> &'static str {
        match self {
            Self::Adrenaline => "adrenaline",
            Self::Confusion => "confusion",
        }
    }
}

impl FromStr for EffectKind {
    type Err = MechError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "adrenaline" | "adrenalina" => Ok(Self::Adrenaline),
            "confusion" | "confusione" => Ok(Self::Confusion),
            other => Err(MechError::UnknownEffect(other.to_string())),
        }
    }
}

impl std::fmt::Display for EffectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Modifier flags for one interactive session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModifierTracker {
    risk_active: bool,
    confusion_pending: bool,
    confusion_active: bool,
    claimed: BTreeSet<EffectKind>,
}

impl ModifierTracker {
    /// Create a tracker with nothing armed or claimed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if risk raised the limit for the current test.
    pub fn risk_active(&self) -> bool {
        self.risk_active
    }

    /// Mark risk as taken for the current test.
    pub(crate) fn activate_risk(&mut self) {
        self.risk_active = true;
    }

    /// Returns true if confusion is armed for the next test.
    pub fn confusion_pending(&self) -> bool {
        self.confusion_pending
    }

    /// Returns true if the current test started under confusion.
    pub fn confusion_active(&self) -> bool {
        self.confusion_active
    }

    /// Arm or disarm confusion for the next test.
    pub fn set_confusion_pending(&mut self, pending: bool) {
        self.confusion_pending = pending;
    }

    /// Clear per-test state for a new test and consume armed confusion.
    ///
    /// Returns true if the new test runs under confusion.
    pub fn begin_test(&mut self) -> bool {
        self.risk_active = false;
        self.claimed.clear();
        self.confusion_active = std::mem::take(&mut self.confusion_pending);
        self.confusion_active
    }

    /// Returns true if the effect was already claimed this test.
    pub fn is_claimed(&self, kind: EffectKind) -> bool {
        self.claimed.contains(&kind)
    }

    /// Effects claimed this test, in a stable order.
    pub fn claimed(&self) -> impl Iterator<Item = EffectKind> + '_ {
        self.claimed.iter().copied()
    }

    /// Returns true if `kind` could be spent against the given history.
    pub fn can_spend(&self, kind: EffectKind, history: &[DrawnToken]) -> bool {
        !self.is_claimed(kind) && history.iter().any(|d| d.token.is_black())
    }

    /// Spend the most recently drawn black token on `kind`.
    ///
    /// Removes the last black entry from `history` and claims the effect.
    /// Returns the removed entry, or `None` if the effect is already claimed
    /// or no black token has been drawn.
    pub fn spend(&mut self, kind: EffectKind, history: &mut Vec<DrawnToken>) -> Option<DrawnToken> {
        if self.is_claimed(kind) {
            return None;
        }
        let idx = history.iter().rposition(|d| d.token.is_black())?;
        self.claimed.insert(kind);
        Some(history.remove(idx))
    }

    /// Return every flag to its initial state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
