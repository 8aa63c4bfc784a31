//! Token bag resolution engine for Not the End.
//!
//! A test is resolved by drawing tokens without replacement from a bag of
//! white (success) and black (complication) tokens. The bag is built from
//! the traits in play and a difficulty tier, and a handful of modifiers
//! carry effects within and across tests: risk escalation, confusion and
//! single-use black token spends.

pub mod bag;
pub mod config;
pub mod error;
pub mod modifier;
pub mod outcome;
pub mod random;
pub mod rules;
pub mod session;
pub mod token;
pub mod view;

pub use bag::Bag;
pub use config::SessionConfig;
pub use error::{MechError, MechResult};
pub use modifier::{EffectKind, ModifierTracker};
pub use outcome::{Outcome, simulate, success_probability};
pub use random::{EntropySource, RandomSource, SequenceSource};
pub use rules::{Difficulty, RuleConfig};
pub use session::{TestSession, TestState};
pub use token::{DrawPhase, DrawnToken, Token};
pub use view::{BagView, TestView};
