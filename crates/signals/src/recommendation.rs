//! Recommendation assembly.

use std::fmt;

use gex_core::{Direction, Regime, ScoringConfig, TradeSignal};
use serde::{Deserialize, Serialize};

use crate::trap::TrapFlag;

/// Strategy tag attached to a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Strategy {
    /// Stand aside.
    Hold,
    /// Take the signal's directional side.
    Directional,
    /// Sell range: short strangle with wings.
    IronCondor,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hold => write!(f, "HOLD"),
            Self::Directional => write!(f, "DIRECTIONAL"),
            Self::IronCondor => write!(f, "IRON_CONDOR"),
        }
    }
}

/// Final structured output of a market evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub strategy: Strategy,
    pub direction: Direction,
    pub confidence_pct: u8,
    pub reasoning: Vec<String>,
}

/// Picks a strategy from `(direction, confidence)` and collects reasoning.
///
/// Directional with enough confidence trades the direction; a neutral read
/// under long-gamma dealers sells the range; anything else holds.
#[must_use]
pub fn build(
    signal: &TradeSignal,
    trap: Option<&TrapFlag>,
    regime: &Regime,
    config: &ScoringConfig,
) -> Recommendation {
    let strategy = select_strategy(signal, regime, config.directional_min_confidence);

    let mut reasoning = Vec::with_capacity(signal.rationale.len() + 4);
    reasoning.push(match strategy {
        Strategy::Directional => format!(
            "{} {} at {}% confidence",
            strategy, signal.direction, signal.confidence_pct
        ),
        Strategy::IronCondor => {
            "Neutral read under long-gamma dealers: sell the range between the walls".to_string()
        }
        Strategy::Hold => format!(
            "{} read at {}% confidence does not clear the {}% bar",
            signal.direction, signal.confidence_pct, config.directional_min_confidence
        ),
    });
    reasoning.push(format!("Regime {regime}: {}", regime.description()));
    reasoning.extend(signal.rationale.iter().cloned());

    if let Some(trap) = trap {
        reasoning.push(format!("Trap {}: {}", trap.trap_type, trap.retail_narrative));
        reasoning.push(format!("Reality: {}", trap.mechanical_reality));
    }

    Recommendation {
        strategy,
        direction: signal.direction,
        confidence_pct: signal.confidence_pct,
        reasoning,
    }
}

fn select_strategy(signal: &TradeSignal, regime: &Regime, min_confidence: u8) -> Strategy {
    match signal.direction {
        d if d.is_directional() && signal.confidence_pct >= min_confidence => {
            Strategy::Directional
        }
        Direction::Neutral if regime.is_positive_gamma() => Strategy::IronCondor,
        _ => Strategy::Hold,
    }
}
