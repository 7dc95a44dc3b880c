//! Types for options position status evaluation.

use std::fmt;

use gex_core::{Result, ValidationError};
use gex_signals::WallReaction;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Live view of an open position, refreshed by the position tracker each tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionSnapshot {
    /// Underlying price.
    pub current_price: Decimal,
    /// Strike of the wall the position is leaning on.
    pub wall_strike: Decimal,
    pub volume_ratio: f64,
    /// Premium collected at entry, per contract.
    pub entry_premium: Decimal,
    /// Current mark of that premium.
    pub current_premium: Decimal,
    pub iv_rank: u8,
    pub days_in_trade: u32,
}

impl PositionSnapshot {
    /// Fraction of entry premium already decayed, `(entry - current) / entry`.
    ///
    /// Zero when the entry premium is zero or negative.
    #[must_use]
    pub fn premium_captured(&self) -> Decimal {
        if self.entry_premium <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        (self.entry_premium - self.current_premium) / self.entry_premium
    }

    /// Rejects snapshots no tracker could have produced: non-positive
    /// prices, negative premiums, or a non-finite or negative volume ratio.
    ///
    /// # Errors
    /// Returns the first offending field as a [`ValidationError`].
    pub fn validate(&self) -> Result<()> {
        if self.current_price <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveSpot(
                self.current_price.to_f64().unwrap_or(0.0),
            ));
        }
        if self.wall_strike <= Decimal::ZERO {
            return Err(negative("wallStrike", self.wall_strike));
        }
        if !self.volume_ratio.is_finite() {
            return Err(ValidationError::NotFinite {
                field: "volumeRatio",
            });
        }
        if self.volume_ratio < 0.0 {
            return Err(ValidationError::Negative {
                field: "volumeRatio",
                value: self.volume_ratio,
            });
        }
        if self.entry_premium < Decimal::ZERO {
            return Err(negative("entryPremium", self.entry_premium));
        }
        if self.current_premium < Decimal::ZERO {
            return Err(negative("currentPremium", self.current_premium));
        }
        Ok(())
    }

    /// Decay the schedule expects by now, as a fraction of entry premium.
    #[must_use]
    pub fn expected_decay(&self, daily_decay: Decimal) -> Decimal {
        daily_decay * Decimal::from(self.days_in_trade)
    }
}

fn negative(field: &'static str, value: Decimal) -> ValidationError {
    ValidationError::Negative {
        field,
        value: value.to_f64().unwrap_or(0.0),
    }
}

/// Status of an open position.
///
/// `StopOut` and `TakeProfit` are terminal; every other status is
/// re-evaluated on the next tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PositionStatus {
    Active,
    Working,
    Monitor,
    Exit,
    TakeProfit,
    StopOut,
}

impl PositionStatus {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::StopOut | Self::TakeProfit)
    }

    /// True when the position should be closed now.
    #[must_use]
    pub const fn requires_close(self) -> bool {
        matches!(self, Self::StopOut | Self::TakeProfit | Self::Exit)
    }
}

impl fmt::Display for PositionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "ACTIVE"),
            Self::Working => write!(f, "WORKING"),
            Self::Monitor => write!(f, "MONITOR"),
            Self::Exit => write!(f, "EXIT"),
            Self::TakeProfit => write!(f, "TAKE_PROFIT"),
            Self::StopOut => write!(f, "STOP_OUT"),
        }
    }
}

/// Status plus the figures that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionAssessment {
    pub status: PositionStatus,
    pub summary: String,
    /// Premium captured, in percent of entry.
    pub premium_captured_pct: Decimal,
    /// Decay expected by the schedule, in percent of entry.
    pub expected_decay_pct: Decimal,
    pub decay_on_schedule: bool,
    pub wall_reaction: WallReaction,
}

/// A position snapshot tagged with its identity in the tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedPosition {
    pub id: i64,
    pub ticker: String,
    pub snapshot: PositionSnapshot,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn position(entry: Decimal, current: Decimal, days: u32) -> PositionSnapshot {
        PositionSnapshot {
            current_price: dec!(96),
            wall_strike: dec!(98),
            volume_ratio: 2.0,
            entry_premium: entry,
            current_premium: current,
            iv_rank: 60,
            days_in_trade: days,
        }
    }

    #[test]
    fn premium_captured_fraction() {
        assert_eq!(position(dec!(2.00), dec!(1.50), 1).premium_captured(), dec!(0.25));
        assert_eq!(position(dec!(2.00), dec!(2.40), 1).premium_captured(), dec!(-0.2));
        assert_eq!(position(dec!(0), dec!(1.00), 1).premium_captured(), Decimal::ZERO);
    }

    #[test]
    fn expected_decay_scales_with_days() {
        assert_eq!(position(dec!(2), dec!(2), 3).expected_decay(dec!(0.08)), dec!(0.24));
        assert_eq!(position(dec!(2), dec!(2), 0).expected_decay(dec!(0.08)), dec!(0));
    }

    #[test]
    fn terminal_statuses() {
        assert!(PositionStatus::StopOut.is_terminal());
        assert!(PositionStatus::TakeProfit.is_terminal());
        assert!(!PositionStatus::Exit.is_terminal());
        assert!(PositionStatus::Exit.requires_close());
        assert!(!PositionStatus::Monitor.requires_close());
    }

    #[test]
    fn validate_rejects_impossible_snapshots() {
        assert!(position(dec!(2), dec!(1.8), 1).validate().is_ok());

        let nan_volume = PositionSnapshot {
            volume_ratio: f64::NAN,
            ..position(dec!(2), dec!(1.8), 1)
        };
        assert_eq!(
            nan_volume.validate(),
            Err(ValidationError::NotFinite { field: "volumeRatio" })
        );

        let zero_price = PositionSnapshot {
            current_price: Decimal::ZERO,
            ..position(dec!(2), dec!(1.8), 1)
        };
        assert!(matches!(
            zero_price.validate(),
            Err(ValidationError::NonPositiveSpot(_))
        ));

        assert!(matches!(
            position(dec!(2), dec!(-0.5), 1).validate(),
            Err(ValidationError::Negative { field: "currentPremium", .. })
        ));
    }

    #[test]
    fn position_snapshot_from_tracker_json() {
        let json = r#"{
            "currentPrice": "96",
            "wallStrike": "98",
            "volumeRatio": 2.2,
            "entryPremium": "2.00",
            "currentPremium": "1.84",
            "ivRank": 70,
            "daysInTrade": 1
        }"#;
        let pos: PositionSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(pos.entry_premium, dec!(2.00));
        assert_eq!(pos.days_in_trade, 1);
    }
}
