//! Position status rules.
//!
//! Evaluated fresh every tick from the current snapshot alone. Rules are
//! checked in risk order and the first match wins:
//!
//! 1. wall broken → `StopOut`
//! 2. volume below the edge floor → `Exit`
//! 3. half the premium captured → `TakeProfit`
//! 4. wall held, strong volume, decay on schedule → `Working`
//! 5. middling volume or decay behind schedule → `Monitor`
//! 6. otherwise → `Active`
//!
//! A broken wall overrides a profit target, and a dead edge overrides an
//! on-track position. The order must not change.

use gex_core::StatusConfig;
use gex_signals::{wall_reaction, WallReaction, WallSide};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, info, warn};

use crate::types::{PositionAssessment, PositionSnapshot, PositionStatus};

/// Returns the status for this tick.
#[must_use]
pub fn next_status(pos: &PositionSnapshot, config: &StatusConfig) -> PositionStatus {
    Rules::new(pos, config).status()
}

/// Returns the status with a human-readable summary and supporting figures.
#[must_use]
pub fn assess(pos: &PositionSnapshot, config: &StatusConfig) -> PositionAssessment {
    let rules = Rules::new(pos, config);
    let status = rules.status();
    let summary = rules.summary(status);

    match status {
        PositionStatus::StopOut | PositionStatus::Exit => {
            warn!(%status, price = %pos.current_price, wall = %pos.wall_strike, volume = pos.volume_ratio, "Position must close");
        }
        PositionStatus::TakeProfit => {
            info!(%status, captured = %rules.captured, "Profit target reached");
        }
        _ => debug!(%status, captured = %rules.captured, expected = %rules.expected, "Position assessed"),
    }

    PositionAssessment {
        status,
        summary,
        premium_captured_pct: (rules.captured * dec!(100)).round_dp(2),
        expected_decay_pct: (rules.expected * dec!(100)).round_dp(2),
        decay_on_schedule: rules.on_schedule(),
        wall_reaction: rules.reaction,
    }
}

/// Derived figures shared by the status decision and its summary.
struct Rules<'a> {
    pos: &'a PositionSnapshot,
    config: &'a StatusConfig,
    captured: Decimal,
    expected: Decimal,
    reaction: WallReaction,
}

impl<'a> Rules<'a> {
    fn new(pos: &'a PositionSnapshot, config: &'a StatusConfig) -> Self {
        let daily = to_decimal(config.expected_daily_decay);
        let reaction = wall_reaction(
            pos.current_price.to_f64().unwrap_or(0.0),
            pos.wall_strike.to_f64().unwrap_or(0.0),
            WallSide::Resistance,
            config.bounce_band_pct,
        );
        Self {
            pos,
            config,
            captured: pos.premium_captured(),
            expected: pos.expected_decay(daily),
            reaction,
        }
    }

    fn wall_broken(&self) -> bool {
        self.pos.current_price > self.pos.wall_strike
    }

    /// An unusable volume reading (NaN, negative) counts as no edge.
    fn edge_gone(&self) -> bool {
        let volume = self.pos.volume_ratio;
        !(volume.is_finite() && volume >= self.config.edge_gone_volume_ratio)
    }

    fn profit_reached(&self) -> bool {
        self.captured >= to_decimal(self.config.take_profit_capture)
    }

    fn on_schedule(&self) -> bool {
        self.captured >= self.expected
    }

    /// The wall was tested and price has since left the band below it.
    fn bounce_confirmed(&self) -> bool {
        self.reaction == WallReaction::Retreated
    }

    fn strong_volume(&self) -> bool {
        self.pos.volume_ratio >= self.config.working_volume_ratio
    }

    fn status(&self) -> PositionStatus {
        if self.wall_broken() {
            PositionStatus::StopOut
        } else if self.edge_gone() {
            PositionStatus::Exit
        } else if self.profit_reached() {
            PositionStatus::TakeProfit
        } else if self.bounce_confirmed() && self.strong_volume() && self.on_schedule() {
            PositionStatus::Working
        } else if !self.strong_volume() || !self.on_schedule() {
            PositionStatus::Monitor
        } else {
            PositionStatus::Active
        }
    }

    fn summary(&self, status: PositionStatus) -> String {
        let pos = self.pos;
        let captured = (self.captured * dec!(100)).round_dp(1);
        let expected = (self.expected * dec!(100)).round_dp(1);
        match status {
            PositionStatus::StopOut => format!(
                "Wall {} broken with price at {}: stop out",
                pos.wall_strike, pos.current_price
            ),
            PositionStatus::Exit => format!(
                "Volume {:.2}x below {:.1}x: edge gone, exit",
                pos.volume_ratio, self.config.edge_gone_volume_ratio
            ),
            PositionStatus::TakeProfit => {
                format!("{captured}% of entry premium captured: take profit")
            }
            PositionStatus::Working => format!(
                "Wall {} held, volume {:.2}x, decay {captured}% vs {expected}% expected: working",
                pos.wall_strike, pos.volume_ratio
            ),
            PositionStatus::Monitor if !self.on_schedule() => format!(
                "Decay {captured}% behind the {expected}% schedule: monitor"
            ),
            PositionStatus::Monitor => format!(
                "Volume {:.2}x below {:.1}x confirmation: monitor",
                pos.volume_ratio, self.config.working_volume_ratio
            ),
            PositionStatus::Active => format!(
                "Price {} testing the {} wall: active",
                pos.current_price, pos.wall_strike
            ),
        }
    }
}

/// Config thresholds are binary floats; drop the representation noise so
/// `0.08` compares equal to `dec!(0.08)`.
fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value)
        .map(|d| d.round_dp(10))
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> PositionSnapshot {
        PositionSnapshot {
            current_price: dec!(96),
            wall_strike: dec!(98),
            volume_ratio: 2.2,
            entry_premium: dec!(2.00),
            current_premium: dec!(1.84),
            iv_rank: 70,
            days_in_trade: 1,
        }
    }

    fn status(pos: &PositionSnapshot) -> PositionStatus {
        next_status(pos, &StatusConfig::default())
    }

    #[test]
    fn broken_wall_stops_out_before_anything_else() {
        let pos = PositionSnapshot {
            current_price: dec!(100),
            volume_ratio: 1.2,
            current_premium: dec!(1.90),
            ..base()
        };
        assert_eq!(status(&pos), PositionStatus::StopOut);

        // Even with the profit target hit and strong volume.
        let pos = PositionSnapshot {
            current_price: dec!(100),
            volume_ratio: 2.8,
            current_premium: dec!(0.50),
            ..base()
        };
        assert_eq!(status(&pos), PositionStatus::StopOut);
    }

    #[test]
    fn dead_volume_exits_before_profit_target() {
        let pos = PositionSnapshot {
            volume_ratio: 1.4,
            current_premium: dec!(0.80),
            ..base()
        };
        assert_eq!(status(&pos), PositionStatus::Exit);
    }

    #[test]
    fn unusable_volume_reading_exits() {
        for volume_ratio in [f64::NAN, f64::INFINITY, -2.0] {
            let pos = PositionSnapshot {
                volume_ratio,
                ..base()
            };
            assert_eq!(status(&pos), PositionStatus::Exit, "{volume_ratio}");
        }
    }

    #[test]
    fn half_premium_captured_takes_profit() {
        let pos = PositionSnapshot {
            current_premium: dec!(1.00),
            ..base()
        };
        assert_eq!(status(&pos), PositionStatus::TakeProfit);
    }

    #[test]
    fn wall_held_with_volume_and_decay_is_working() {
        assert_eq!(status(&base()), PositionStatus::Working);
    }

    #[test]
    fn middling_volume_monitors() {
        let pos = PositionSnapshot {
            volume_ratio: 1.7,
            ..base()
        };
        assert_eq!(status(&pos), PositionStatus::Monitor);
    }

    #[test]
    fn decay_behind_schedule_monitors() {
        let pos = PositionSnapshot {
            current_premium: dec!(1.90),
            ..base()
        };
        assert_eq!(status(&pos), PositionStatus::Monitor);
        let assessment = assess(&pos, &StatusConfig::default());
        assert!(!assessment.decay_on_schedule);
        assert!(assessment.summary.contains("behind"));
    }

    #[test]
    fn wall_still_under_test_is_active() {
        let pos = PositionSnapshot {
            current_price: dec!(97.8),
            ..base()
        };
        assert_eq!(status(&pos), PositionStatus::Active);
    }

    #[test]
    fn price_on_the_wall_is_not_broken() {
        let pos = PositionSnapshot {
            current_price: dec!(98),
            ..base()
        };
        assert_eq!(status(&pos), PositionStatus::Active);
    }

    #[test]
    fn assessment_reports_figures() {
        let assessment = assess(&base(), &StatusConfig::default());
        assert_eq!(assessment.status, PositionStatus::Working);
        assert_eq!(assessment.premium_captured_pct, dec!(8));
        assert_eq!(assessment.expected_decay_pct, dec!(8));
        assert_eq!(assessment.wall_reaction, WallReaction::Retreated);
        assert!(assessment.summary.contains("working"));
    }
}
