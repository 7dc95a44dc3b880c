//! Signal scoring.
//!
//! Starts from a neutral baseline and applies bounded adjustments:
//!
//! | Term | Effect |
//! |---|---|
//! | long gamma, price between the walls | `+15` (pinning) |
//! | short gamma, price below the flip | `-15` (downside momentum) |
//! | volume ratio | `±10`, extends or shrinks the existing tilt |
//! | weekday | multiplies the deviation from baseline (Mon 1.0 → Fri 0.2) |
//!
//! Volume under the directional minimum forces `Neutral` outright.

use gex_core::{Direction, FlipSide, Regime, ScoringConfig, TradeSignal, TradingDay};
use tracing::debug;

use crate::curves::linear_weekday_decay;
use crate::walls::WallProximity;

/// Scores a regime and wall read into a bounded trade signal.
#[must_use]
pub fn score(
    regime: &Regime,
    walls: &WallProximity,
    volume_ratio: f64,
    day: TradingDay,
    config: &ScoringConfig,
) -> TradeSignal {
    let volume_ratio = if volume_ratio.is_finite() {
        volume_ratio.max(0.0)
    } else {
        0.0
    };
    let mut rationale = Vec::new();
    let mut tilt = 0.0;

    if regime.is_positive_gamma() && walls.inside_walls() {
        tilt += config.positive_gamma_adjustment;
        rationale.push(format!(
            "+{:.0}: dealers long gamma with price pinned between the walls",
            config.positive_gamma_adjustment
        ));
    }

    if regime.is_negative_gamma() && regime.flip_side == FlipSide::BelowFlip {
        tilt -= config.negative_gamma_adjustment;
        rationale.push(format!(
            "-{:.0}: dealers short gamma below the flip, hedging chases price lower",
            config.negative_gamma_adjustment
        ));
    }

    if tilt != 0.0 {
        let volume_term = volume_adjustment(volume_ratio, config);
        let magnitude = (tilt.abs() + volume_term).max(0.0);
        rationale.push(format!(
            "{volume_term:+.1}: volume at {volume_ratio:.2}x average {} the read",
            if volume_term >= 0.0 { "confirms" } else { "undercuts" }
        ));
        tilt = magnitude.copysign(tilt);
    }

    let weight = linear_weekday_decay(day, config.friday_decay_weight);
    if weight < 1.0 {
        rationale.push(format!(
            "x{weight:.2}: {day} weekly gamma decay dampens conviction"
        ));
    }

    let score = (config.baseline + tilt * weight).clamp(0.0, 100.0);

    if volume_ratio < config.min_directional_volume_ratio {
        rationale.push(format!(
            "Volume {volume_ratio:.2}x below {:.1}x: no directional claim",
            config.min_directional_volume_ratio
        ));
        debug!(score, volume_ratio, "Low volume forces neutral signal");
        return TradeSignal {
            score,
            ..TradeSignal::neutral(rationale)
        };
    }

    let direction = if score > config.bullish_above {
        Direction::Bullish
    } else if score < config.bearish_below {
        Direction::Bearish
    } else {
        Direction::Neutral
    };

    let confidence_pct = confidence(score, config.baseline);

    debug!(score, %direction, confidence_pct, "Signal scored");

    TradeSignal {
        direction,
        confidence_pct,
        score,
        rationale,
    }
}

/// Volume term in `[-max, +max]`: zero at the directional minimum, full
/// strength at the cap.
#[must_use]
pub fn volume_adjustment(volume_ratio: f64, config: &ScoringConfig) -> f64 {
    let span = config.volume_ratio_cap - config.min_directional_volume_ratio;
    if span <= 0.0 {
        return 0.0;
    }
    let capped = volume_ratio.clamp(0.0, config.volume_ratio_cap);
    let term = config.volume_adjustment_max * (capped - config.min_directional_volume_ratio) / span;
    term.clamp(-config.volume_adjustment_max, config.volume_adjustment_max)
}

/// Distance from baseline, reported on a 50-100 scale.
fn confidence(score: f64, baseline: f64) -> u8 {
    let pct = (50.0 + (score - baseline).abs()).round().clamp(0.0, 100.0);
    pct as u8
}
