//! A test session: one bag, one draw history, and the modifiers around it.
//!
//! `TestSession` owns the whole per-session state. Commands that are not
//! currently allowed do nothing and report that through their return value;
//! the `can_*` predicates tell a front end which commands to offer.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::bag::Bag;
use crate::config::SessionConfig;
use crate::modifier::{EffectKind, ModifierTracker};
use crate::outcome::Outcome;
use crate::random::{EntropySource, RandomSource};
use crate::rules::{
    self, Difficulty, MAX_DRAW_LIMIT, MAX_TRAITS, MIN_DRAW_LIMIT,
    RISK_DRAW_LIMIT,
};
use crate::token::{DrawPhase, DrawnToken, Token};
use crate::view::TestView;

/// Where the current test stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestState {
    /// No bag has been loaded yet.
    Idle,
    /// Draws are possible.
    InProgress,
    /// The draw limit is reached or the bag is empty.
    Exhausted,
}

impl std::fmt::Display for TestState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::InProgress => write!(f, "in progress"),
            Self::Exhausted => write!(f, "exhausted"),
        }
    }
}

/// An interactive token bag session.
#[derive(Debug, Clone)]
pub struct TestSession<R = EntropySource> {
    config: SessionConfig,
    bag: Bag,
    loaded: bool,
    history: Vec<DrawnToken>,
    draws_made: u32,
    modifiers: ModifierTracker,
    rng: R,
}

impl TestSession<EntropySource> {
    /// Create a session drawing from the configured seed, or from operating
    /// system entropy when there is none.
    pub fn new(config: SessionConfig) -> Self {
        let rng = EntropySource::from_seed_or_os(config.seed);
        Self::with_source(config, rng)
    }
}

impl<R: RandomSource> TestSession<R> {
    /// Create a session drawing from the given source.
    ///
    /// The session starts idle; call [`start_test`](Self::start_test) to
    /// load the first bag.
    pub fn with_source(config: SessionConfig, rng: R) -> Self {
        Self {
            config,
            bag: Bag::default(),
            loaded: false,
            history: Vec::new(),
            draws_made: 0,
            modifiers: ModifierTracker::new(),
            rng,
        }
    }

    // --- Configuration ---

    /// The current configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Mutable access to the configuration. Changes to traits and
    /// difficulty apply from the next test; the draw limit applies at once.
    pub fn config_mut(&mut self) -> &mut SessionConfig {
        &mut self.config
    }

    /// Set the traits in play (clamped to 0-12).
    pub fn set_traits(&mut self, traits: i64) {
        self.config.rules.traits = rules::clamp_count(traits, 0, MAX_TRAITS);
    }

    /// Set the difficulty tier.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.config.rules.difficulty = difficulty;
    }

    /// Switch the manual black count on with a value (clamped to 0-99), or
    /// off with `None`, keeping the last value.
    pub fn set_black_override(&mut self, blacks: Option<i64>) {
        self.config.rules.set_black_override(blacks);
    }

    /// Switch the manual black count on or off without changing it.
    pub fn set_override_enabled(&mut self, enabled: bool) {
        self.config.rules.override_enabled = enabled;
    }

    /// Set the base draw limit (clamped to 1-4).
    pub fn set_draw_limit(&mut self, limit: i64) {
        self.config.draw_limit = rules::clamp_count(limit, MIN_DRAW_LIMIT, MAX_DRAW_LIMIT);
    }

    /// Arm or disarm confusion for the next test.
    pub fn set_confusion_pending(&mut self, pending: bool) {
        self.modifiers.set_confusion_pending(pending);
    }

    /// The `(white, black)` composition the next test would start from,
    /// before any confusion is applied.
    pub fn preview(&self) -> (u32, u32) {
        self.config.rules.resolve()
    }

    // --- Commands ---

    /// Start a new test with a freshly filled bag.
    ///
    /// Clears the draw history, risk and claimed effects. If confusion is
    /// armed it is consumed: every trait token becomes white or black on a
    /// fair coin flip instead of being white.
    pub fn start_test(&mut self) {
        let (whites, blacks) = self.config.rules.resolve();
        let confused = self.modifiers.begin_test();

        if confused {
            let mut white = 0;
            let mut black = blacks;
            for _ in 0..whites {
                if self.rng.next_below(2) == 0 {
                    white += 1;
                } else {
                    black += 1;
                }
            }
            debug!(white, black, "confusion consumed, trait tokens randomized");
            self.bag.initialize(white, black);
        } else {
            self.bag.initialize(whites, blacks);
        }

        self.history.clear();
        self.draws_made = 0;
        self.loaded = true;
        debug!(
            bag = %self.bag,
            limit = self.config.base_limit(),
            "test started"
        );
    }

    /// Draw one token, if the test allows another draw.
    pub fn draw(&mut self) -> Option<DrawnToken> {
        if !self.can_draw() {
            trace!(state = %self.state(), "draw ignored");
            return None;
        }
        let token = self.bag.draw_one(&mut self.rng)?;
        let phase = if self.modifiers.risk_active() {
            DrawPhase::Risk
        } else {
            DrawPhase::Base
        };
        let drawn = DrawnToken { token, phase };
        self.history.push(drawn);
        self.draws_made += 1;
        debug!(
            token = %token,
            ?phase,
            draws = self.draws_made,
            remaining = self.bag.remaining(),
            "token drawn"
        );
        Some(drawn)
    }

    /// Take the risk: raise the draw limit to 5 for this test.
    ///
    /// Only allowed once the base draws are all made and the bag still has
    /// tokens. Returns true if risk was activated.
    pub fn activate_risk(&mut self) -> bool {
        if !self.can_activate_risk() {
            trace!("risk not available");
            return false;
        }
        self.modifiers.activate_risk();
        debug!(limit = RISK_DRAW_LIMIT, "risk activated");
        true
    }

    /// Spend the most recently drawn black token on an effect.
    ///
    /// The token leaves the history but still counts as a draw made.
    /// Draw eligibility counts draws made, not history entries, so a spend
    /// never buys an extra draw.
    ///
    /// Returns the spent token, or `None` if no black token is drawn or the
    /// effect was already claimed this test.
    pub fn spend(&mut self, kind: EffectKind) -> Option<DrawnToken> {
        let spent = self.modifiers.spend(kind, &mut self.history);
        match spent {
            Some(_) => debug!(effect = %kind, "black token spent"),
            None => trace!(effect = %kind, "spend ignored"),
        }
        spent
    }

    /// Restore every setting and flag to its default and load a fresh bag.
    ///
    /// The random source is kept.
    pub fn reset_all(&mut self) {
        let seed = self.config.seed;
        self.config = SessionConfig {
            seed,
            ..SessionConfig::default()
        };
        self.modifiers.reset();
        let (whites, blacks) = self.config.rules.resolve();
        self.bag.initialize(whites, blacks);
        self.history.clear();
        self.draws_made = 0;
        self.loaded = true;
        debug!(bag = %self.bag, "session reset");
    }

    // --- Queries ---

    /// Where the current test stands.
    pub fn state(&self) -> TestState {
        if !self.loaded {
            TestState::Idle
        } else if self.can_draw() {
            TestState::InProgress
        } else {
            TestState::Exhausted
        }
    }

    /// Tokens left in the bag.
    pub fn bag(&self) -> &Bag {
        &self.bag
    }

    /// Drawn tokens in draw order, minus spent ones.
    pub fn history(&self) -> &[DrawnToken] {
        &self.history
    }

    /// Draws made this test, including tokens later spent.
    pub fn draws_made(&self) -> u32 {
        self.draws_made
    }

    /// The modifier flags.
    pub fn modifiers(&self) -> &ModifierTracker {
        &self.modifiers
    }

    /// The configured draw limit.
    pub fn base_limit(&self) -> u32 {
        self.config.base_limit()
    }

    /// The draw limit in force: 5 under risk, the base limit otherwise.
    pub fn effective_limit(&self) -> u32 {
        if self.modifiers.risk_active() {
            RISK_DRAW_LIMIT
        } else {
            self.base_limit()
        }
    }

    /// Returns true if another draw is possible.
    pub fn can_draw(&self) -> bool {
        self.loaded && self.draws_made < self.effective_limit() && !self.bag.is_empty()
    }

    /// Returns true if risk could be activated now.
    pub fn can_activate_risk(&self) -> bool {
        let base = self.base_limit();
        self.loaded
            && !self.modifiers.risk_active()
            && base < RISK_DRAW_LIMIT
            && self.draws_made == base
            && !self.bag.is_empty()
    }

    /// Returns true if a black token could be spent on `kind` now.
    pub fn can_spend(&self, kind: EffectKind) -> bool {
        self.modifiers.can_spend(kind, &self.history)
    }

    /// Outcome derived from the current history.
    pub fn outcome(&self) -> Outcome {
        Outcome::from_history(&self.history)
    }

    /// White tokens drawn.
    pub fn white_count(&self) -> u32 {
        self.count(Token::White)
    }

    /// Black tokens drawn and not spent.
    pub fn black_count(&self) -> u32 {
        self.count(Token::Black)
    }

    fn count(&self, token: Token) -> u32 {
        self.history.iter().filter(|d| d.token == token).count() as u32
    }

    /// Snapshot of everything a front end displays.
    pub fn view(&self) -> TestView {
        TestView::from_session(self)
    }
}
