//! Read-only snapshot of a session for display.

use serde::{Deserialize, Serialize};

use crate::modifier::EffectKind;
use crate::outcome::Outcome;
use crate::random::RandomSource;
use crate::session::{TestSession, TestState};
use crate::token::DrawnToken;

/// What a front end may show about the bag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "visibility", rename_all = "snake_case")]
pub enum BagView {
    /// Exact counts are known.
    Visible {
        /// White tokens left.
        white: u32,
        /// Black tokens left.
        black: u32,
    },
    /// The test started under confusion, so only the total is shown.
    Hidden {
        /// Tokens left.
        remaining: u32,
    },
}

impl BagView {
    /// Tokens left, whatever the visibility.
    pub fn remaining(&self) -> u32 {
        match self {
            Self::Visible { white, black } => white + black,
            Self::Hidden { remaining } => *remaining,
        }
    }
}

impl std::fmt::Display for BagView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Visible { white, black } => write!(f, "{white} white, {black} black"),
            Self::Hidden { remaining } => write!(f, "{remaining} tokens (hidden)"),
        }
    }
}

/// Everything a front end needs to render the current test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestView {
    /// Where the test stands.
    pub state: TestState,
    /// Tokens left in the bag.
    pub bag: BagView,
    /// Drawn tokens in order, minus spent ones.
    pub history: Vec<DrawnToken>,
    /// Derived counts.
    pub outcome: Outcome,
    /// At least one white drawn.
    pub success: bool,
    /// Whites beyond the first.
    pub extra_successes: u32,
    /// Unspent blacks drawn.
    pub complications: u32,
    /// Draws made this test.
    pub draws_made: u32,
    /// Configured draw limit.
    pub base_limit: u32,
    /// Draw limit in force.
    pub effective_limit: u32,
    /// Whether another draw is possible.
    pub can_draw: bool,
    /// Whether risk can be activated now.
    pub can_activate_risk: bool,
    /// Whether risk is active this test.
    pub risk_active: bool,
    /// Whether confusion is armed for the next test.
    pub confusion_pending: bool,
    /// Whether this test started under confusion.
    pub confusion_active: bool,
    /// Effects claimed this test.
    pub claimed: Vec<EffectKind>,
    /// Effects a black token could be spent on now.
    pub spendable: Vec<EffectKind>,
    /// Composition the next test would start from.
    pub next_bag: (u32, u32),
}

impl TestView {
    /// Capture the state of a session.
    pub fn from_session<R: RandomSource>(session: &TestSession<R>) -> Self {
        let modifiers = session.modifiers();
        let bag = if modifiers.confusion_active() {
            BagView::Hidden {
                remaining: session.bag().remaining(),
            }
        } else {
            BagView::Visible {
                white: session.bag().white(),
                black: session.bag().black(),
            }
        };
        let outcome = session.outcome();

        Self {
            state: session.state(),
            bag,
            history: session.history().to_vec(),
            outcome,
            success: outcome.success(),
            extra_successes: outcome.extra_successes(),
            complications: outcome.complications(),
            draws_made: session.draws_made(),
            base_limit: session.base_limit(),
            effective_limit: session.effective_limit(),
            can_draw: session.can_draw(),
            can_activate_risk: session.can_activate_risk(),
            risk_active: modifiers.risk_active(),
            confusion_pending: modifiers.confusion_pending(),
            confusion_active: modifiers.confusion_active(),
            claimed: modifiers.claimed().collect(),
            spendable: EffectKind::ALL
                .into_iter()
                .filter(|&k| session.can_spend(k))
                .collect(),
            next_bag: session.preview(),
        }
    }
}
