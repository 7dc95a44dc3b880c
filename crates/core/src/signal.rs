//! Trade signal types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Directional tilt of a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    /// Expect price to go up
    Bullish,
    /// Expect price to go down
    Bearish,
    /// No directional bias
    Neutral,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Bullish => Self::Bearish,
            Self::Bearish => Self::Bullish,
            Self::Neutral => Self::Neutral,
        }
    }

    /// Returns true if this direction has a directional bias.
    #[must_use]
    pub const fn is_directional(self) -> bool {
        !matches!(self, Self::Neutral)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bullish => write!(f, "BULLISH"),
            Self::Bearish => write!(f, "BEARISH"),
            Self::Neutral => write!(f, "NEUTRAL"),
        }
    }
}

/// Output of the signal scorer.
///
/// A pure function of the snapshot: identical inputs always produce an
/// identical signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeSignal {
    pub direction: Direction,
    /// Strength of the directional read, `50` meaning no conviction.
    pub confidence_pct: u8,
    /// Final dampened score on the 0-100 scale, `50` being neutral.
    pub score: f64,
    /// One line per adjustment that contributed to the score.
    pub rationale: Vec<String>,
}

impl TradeSignal {
    /// A neutral signal with baseline confidence.
    #[must_use]
    pub fn neutral(rationale: Vec<String>) -> Self {
        Self {
            direction: Direction::Neutral,
            confidence_pct: 50,
            score: 50.0,
            rationale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_is_involutive() {
        for d in [Direction::Bullish, Direction::Bearish, Direction::Neutral] {
            assert_eq!(d.opposite().opposite(), d);
        }
        assert!(!Direction::Neutral.is_directional());
        assert!(Direction::Bearish.is_directional());
    }
}
