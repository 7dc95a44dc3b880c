//! Gamma and volatility regime labels.
//!
//! Derived fresh on every evaluation and shared by every downstream stage so
//! they all read the same regime.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sign of aggregate dealer gamma.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GammaSign {
    /// Dealers long gamma: they sell rallies and buy dips (mean reversion).
    PositiveGamma,
    /// Dealers short gamma: they chase price (momentum).
    NegativeGamma,
}

/// Which side of the gamma flip spot is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlipSide {
    AboveFlip,
    BelowFlip,
}

/// Shape of the VIX term structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VolRegime {
    /// Front month above back month: stress.
    Backwardation,
    Normal,
    /// Steep upward slope: complacency.
    Contango,
}

/// Combined regime classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Regime {
    pub gamma: GammaSign,
    pub flip_side: FlipSide,
    pub vol: VolRegime,
}

impl Regime {
    #[must_use]
    pub const fn is_positive_gamma(&self) -> bool {
        matches!(self.gamma, GammaSign::PositiveGamma)
    }

    #[must_use]
    pub const fn is_negative_gamma(&self) -> bool {
        matches!(self.gamma, GammaSign::NegativeGamma)
    }

    /// True for the unusual pairings (long gamma below the flip, short gamma
    /// above it) that indicate stale or inconsistent upstream inputs.
    #[must_use]
    pub const fn is_inconsistent(&self) -> bool {
        matches!(
            (self.gamma, self.flip_side),
            (GammaSign::PositiveGamma, FlipSide::BelowFlip)
                | (GammaSign::NegativeGamma, FlipSide::AboveFlip)
        )
    }

    /// One-line trader-facing description of the dealer book.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match (self.gamma, self.flip_side) {
            (GammaSign::PositiveGamma, FlipSide::AboveFlip) => {
                "Dealers long gamma above the flip: expect mean reversion and pinning"
            }
            (GammaSign::PositiveGamma, FlipSide::BelowFlip) => {
                "Dealers long gamma but price below the flip: dampening is fading"
            }
            (GammaSign::NegativeGamma, FlipSide::AboveFlip) => {
                "Dealers short gamma above the flip: moves can extend in either direction"
            }
            (GammaSign::NegativeGamma, FlipSide::BelowFlip) => {
                "Dealers short gamma below the flip: hedging amplifies downside momentum"
            }
        }
    }
}

impl fmt::Display for GammaSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PositiveGamma => write!(f, "POSITIVE_GAMMA"),
            Self::NegativeGamma => write!(f, "NEGATIVE_GAMMA"),
        }
    }
}

impl fmt::Display for FlipSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AboveFlip => write!(f, "ABOVE_FLIP"),
            Self::BelowFlip => write!(f, "BELOW_FLIP"),
        }
    }
}

impl fmt::Display for VolRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Backwardation => write!(f, "BACKWARDATION"),
            Self::Normal => write!(f, "NORMAL"),
            Self::Contango => write!(f, "CONTANGO"),
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} ({})", self.gamma, self.flip_side, self.vol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_wire_labels() {
        let regime = Regime {
            gamma: GammaSign::NegativeGamma,
            flip_side: FlipSide::BelowFlip,
            vol: VolRegime::Normal,
        };
        assert_eq!(regime.to_string(), "NEGATIVE_GAMMA/BELOW_FLIP (NORMAL)");
        assert_eq!(
            serde_json::to_string(&regime.gamma).unwrap(),
            "\"NEGATIVE_GAMMA\""
        );
    }

    #[test]
    fn inconsistent_pairings() {
        let mut regime = Regime {
            gamma: GammaSign::PositiveGamma,
            flip_side: FlipSide::AboveFlip,
            vol: VolRegime::Normal,
        };
        assert!(!regime.is_inconsistent());
        regime.flip_side = FlipSide::BelowFlip;
        assert!(regime.is_inconsistent());
    }
}
