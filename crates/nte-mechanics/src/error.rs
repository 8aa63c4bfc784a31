//! Error types for the token bag engine.
//!
//! Game commands never fail; these errors only come from turning text into
//! engine inputs (tier ids, effect names, configuration documents).

/// Errors that can occur while parsing engine inputs.
#[derive(Debug, thiserror::Error)]
pub enum MechError {
    /// A difficulty tier id that is not in the tier table.
    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),

    /// An effect name that cannot be spent.
    #[error("unknown effect: {0}")]
    UnknownEffect(String),

    /// A configuration value that cannot be used.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A configuration document that is not valid JSON.
    #[error("invalid config document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience result type for engine operations.
pub type MechResult<T> = Result<T, MechError>;
