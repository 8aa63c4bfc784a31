//! Tokens and entries of the draw history.

use serde::{Deserialize, Serialize};

/// A single token in the bag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Token {
    /// A success marker.
    White,
    /// A complication marker.
    Black,
}

impl Token {
    /// Short symbol used in compact displays.
    pub fn symbol(self) -> char {
        match self {
            Self::White => 'W',
            Self::Black => 'B',
        }
    }

    /// Returns true for a white token.
    pub fn is_white(self) -> bool {
        self == Self::White
    }

    /// Returns true for a black token.
    pub fn is_black(self) -> bool {
        self == Self::Black
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::White => write!(f, "white"),
            Self::Black => write!(f, "black"),
        }
    }
}

/// When in the test a token was drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawPhase {
    /// Within the base draw limit.
    #[default]
    Base,
    /// After risk raised the limit.
    Risk,
}

/// One entry of the draw history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawnToken {
    /// The token that came out of the bag.
    pub token: Token,
    /// Whether it was drawn in the base draws or the risk extension.
    pub phase: DrawPhase,
}

impl DrawnToken {
    /// A token drawn within the base limit.
    pub fn base(token: Token) -> Self {
        Self {
            token,
            phase: DrawPhase::Base,
        }
    }

    /// A token drawn during the risk extension.
    pub fn risk(token: Token) -> Self {
        Self {
            token,
            phase: DrawPhase::Risk,
        }
    }
}

impl std::fmt::Display for DrawnToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.phase {
            DrawPhase::Base => write!(f, "{}", self.token.symbol()),
            DrawPhase::Risk => write!(f, "{}!", self.token.symbol()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_predicates() {
        assert!(Token::White.is_white());
        assert!(!Token::White.is_black());
        assert!(Token::Black.is_black());
    }

    #[test]
    fn token_display() {
        assert_eq!(Token::White.to_string(), "white");
        assert_eq!(Token::Black.symbol(), 'B');
    }

    #[test]
    fn drawn_token_display_marks_risk() {
        assert_eq!(DrawnToken::base(Token::White).to_string(), "W");
        assert_eq!(DrawnToken::risk(Token::Black).to_string(), "B!");
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&DrawnToken::risk(Token::Black)).unwrap();
        assert_eq!(json, r#"{"token":"black","phase":"risk"}"#);
    }
}
