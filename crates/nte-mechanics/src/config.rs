//! Configuration for a token bag session.

use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};
use crate::rules::{
    self, Difficulty, MAX_BLACK_OVERRIDE, MAX_DRAW_LIMIT, MAX_TRAITS, MIN_DRAW_LIMIT, RuleConfig,
};

/// Settings a player adjusts between tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Traits, difficulty and black override.
    #[serde(flatten)]
    pub rules: RuleConfig,
    /// Draws allowed per test before risk (1-4).
    pub draw_limit: u32,
    /// RNG seed for reproducible draws; operating system entropy if unset.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            rules: RuleConfig::default(),
            draw_limit: MAX_DRAW_LIMIT,
            seed: None,
        }
    }
}

/// Loosely typed document accepted by [`SessionConfig::from_json`].
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    traits: Option<f64>,
    difficulty: Option<String>,
    override_enabled: Option<bool>,
    manual_blacks: Option<f64>,
    black_override: Option<f64>,
    draw_limit: Option<f64>,
    seed: Option<u64>,
}

impl SessionConfig {
    /// Set the traits in play (clamped to 0-12).
    pub fn with_traits(mut self, traits: i64) -> Self {
        self.rules.traits = rules::clamp_count(traits, 0, MAX_TRAITS);
        self
    }

    /// Set the difficulty tier.
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.rules.difficulty = difficulty;
        self
    }

    /// Switch the manual black count on with a value (clamped to 0-99), or
    /// off with `None`, keeping the last value.
    pub fn with_black_override(mut self, blacks: Option<i64>) -> Self {
        self.rules.set_black_override(blacks);
        self
    }

    /// Switch the manual black count on or off without changing it.
    pub fn with_override_enabled(mut self, enabled: bool) -> Self {
        self.rules.override_enabled = enabled;
        self
    }

    /// Set the base draw limit (clamped to 1-4).
    pub fn with_draw_limit(mut self, limit: i64) -> Self {
        self.draw_limit = rules::clamp_count(limit, MIN_DRAW_LIMIT, MAX_DRAW_LIMIT);
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The base draw limit, clamped to 1-4 even if the field was set directly.
    pub fn base_limit(&self) -> u32 {
        self.draw_limit.clamp(MIN_DRAW_LIMIT, MAX_DRAW_LIMIT)
    }

    /// Load a configuration from a JSON document.
    ///
    /// Missing fields keep their defaults and numbers are clamped into range;
    /// only malformed JSON and unknown difficulty ids are errors.
    pub fn from_json(text: &str) -> MechResult<Self> {
        let raw: RawConfig = serde_json::from_str(text)?;
        let mut config = Self::default();
        if let Some(traits) = raw.traits {
            config.rules.traits = rules::clamp_int(traits, 0, MAX_TRAITS);
        }
        if let Some(id) = raw.difficulty {
            config.rules.difficulty = id.parse()?;
        }
        if let Some(blacks) = raw.manual_blacks {
            config.rules.manual_blacks = rules::clamp_int(blacks, 0, MAX_BLACK_OVERRIDE);
        }
        if let Some(enabled) = raw.override_enabled {
            config.rules.override_enabled = enabled;
        }
        // Shorthand: a bare count switches the override on.
        if let Some(blacks) = raw.black_override {
            config.rules.manual_blacks = rules::clamp_int(blacks, 0, MAX_BLACK_OVERRIDE);
            config.rules.override_enabled = true;
        }
        if let Some(limit) = raw.draw_limit {
            config.draw_limit = rules::clamp_int(limit, MIN_DRAW_LIMIT, MAX_DRAW_LIMIT);
        }
        config.seed = raw.seed;
        Ok(config)
    }

    /// Serialize the configuration as pretty-printed JSON.
    pub fn to_json(&self) -> MechResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Apply a textual setting, as typed by a player.
    ///
    /// Keys: `traits`, `difficulty`, `blacks` (a count, or `off`/`on` to
    /// toggle the override and keep its count) and `limit`. Numeric values
    /// are coerced, never rejected.
    pub fn apply_setting(&mut self, key: &str, value: &str) -> MechResult<()> {
        match key.trim().to_lowercase().as_str() {
            "traits" | "tratti" => {
                self.rules.traits = rules::parse_clamped(value, 0, MAX_TRAITS);
            }
            "difficulty" | "difficolta" => {
                self.rules.difficulty = value.parse()?;
            }
            "blacks" | "override" | "neri" => {
                match value.trim().to_lowercase().as_str() {
                    "off" | "none" => self.rules.override_enabled = false,
                    "on" => self.rules.override_enabled = true,
                    _ => {
                        self.rules.manual_blacks =
                            rules::parse_clamped(value, 0, MAX_BLACK_OVERRIDE);
                        self.rules.override_enabled = true;
                    }
                }
            }
            "limit" | "draws" => {
                self.draw_limit = rules::parse_clamped(value, MIN_DRAW_LIMIT, MAX_DRAW_LIMIT);
            }
            other => {
                return Err(MechError::InvalidConfig(format!("unknown setting: {other}")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = SessionConfig::default();
        assert_eq!(cfg.rules.resolve(), (3, 3));
        assert_eq!(cfg.rules.difficulty, Difficulty::Normale);
        assert_eq!(cfg.draw_limit, 4);
        assert_eq!(cfg.seed, None);
    }

    #[test]
    fn builder_methods() {
        let cfg = SessionConfig::default()
            .with_traits(5)
            .with_difficulty(Difficulty::Difficile)
            .with_draw_limit(2)
            .with_seed(7);
        assert_eq!(cfg.rules.resolve(), (5, 4));
        assert_eq!(cfg.draw_limit, 2);
        assert_eq!(cfg.seed, Some(7));
    }

    #[test]
    fn builder_clamps() {
        let cfg = SessionConfig::default()
            .with_traits(99)
            .with_black_override(Some(-1))
            .with_draw_limit(9);
        assert_eq!(cfg.rules.resolve(), (12, 0));
        assert_eq!(cfg.draw_limit, 4);
        assert_eq!(SessionConfig::default().with_draw_limit(0).draw_limit, 1);
    }

    #[test]
    fn base_limit_clamps_direct_writes() {
        let cfg = SessionConfig {
            draw_limit: 0,
            ..SessionConfig::default()
        };
        assert_eq!(cfg.base_limit(), 1);
    }

    #[test]
    fn from_json_partial_document() {
        let cfg = SessionConfig::from_json(r#"{"traits": 2.8, "difficulty": "facile"}"#).unwrap();
        assert_eq!(cfg.rules.resolve(), (2, 2));
        assert_eq!(cfg.draw_limit, 4);
    }

    #[test]
    fn from_json_clamps_numbers() {
        let cfg = SessionConfig::from_json(
            r#"{"traits": -3, "black_override": 500, "draw_limit": 12, "seed": 5}"#,
        )
        .unwrap();
        assert_eq!(cfg.rules.resolve(), (0, 99));
        assert_eq!(cfg.draw_limit, 4);
        assert_eq!(cfg.seed, Some(5));
    }

    #[test]
    fn from_json_keeps_disabled_manual_count() {
        let cfg =
            SessionConfig::from_json(r#"{"override_enabled": false, "manual_blacks": 8}"#).unwrap();
        assert_eq!(cfg.rules.blacks(), 3);
        let cfg = cfg.with_override_enabled(true);
        assert_eq!(cfg.rules.blacks(), 8);
    }

    #[test]
    fn from_json_rejects_unknown_tier() {
        assert!(matches!(
            SessionConfig::from_json(r#"{"difficulty": "brutale"}"#),
            Err(MechError::UnknownDifficulty(_))
        ));
    }

    #[test]
    fn from_json_rejects_malformed() {
        assert!(matches!(
            SessionConfig::from_json("{traits: 3"),
            Err(MechError::Json(_))
        ));
    }

    #[test]
    fn json_round_trip() {
        let cfg = SessionConfig::default()
            .with_traits(4)
            .with_black_override(Some(2))
            .with_seed(11);
        let text = cfg.to_json().unwrap();
        assert_eq!(SessionConfig::from_json(&text).unwrap(), cfg);
    }

    #[test]
    fn apply_settings() {
        let mut cfg = SessionConfig::default();
        cfg.apply_setting("traits", "6").unwrap();
        cfg.apply_setting("difficulty", "difficilissima").unwrap();
        cfg.apply_setting("limit", "banana").unwrap();
        assert_eq!(cfg.rules.resolve(), (6, 5));
        assert_eq!(cfg.draw_limit, 1);

        cfg.apply_setting("blacks", "0").unwrap();
        assert_eq!(cfg.rules.blacks(), 0);
        cfg.apply_setting("blacks", "off").unwrap();
        assert_eq!(cfg.rules.blacks(), 5);
        cfg.apply_setting("blacks", "on").unwrap();
        assert_eq!(cfg.rules.blacks(), 0);
    }

    #[test]
    fn apply_unknown_setting() {
        let mut cfg = SessionConfig::default();
        assert!(matches!(
            cfg.apply_setting("luck", "3"),
            Err(MechError::InvalidConfig(_))
        ));
    }
}
