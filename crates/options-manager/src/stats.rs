//! Closed-trade statistics.
//!
//! Summarizes realized P&L supplied by the caller. Nothing is stored here.

use gex_core::thresholds::NEUTRAL_RISK_REWARD;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Win/loss summary of a set of closed trades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeStats {
    pub trades: usize,
    pub wins: usize,
    pub losses: usize,
    /// Wins divided by trades, in `[0, 1]`.
    pub win_rate: f64,
    pub avg_win: Decimal,
    /// Average loss as a positive magnitude.
    pub avg_loss: Decimal,
    pub risk_reward: f64,
    /// Expected P&L per trade.
    pub expectancy: Decimal,
}

impl TradeStats {
    /// Computes statistics from realized P&L per trade. Flat trades count
    /// toward the total but neither wins nor losses.
    #[must_use]
    pub fn from_pnls(pnls: &[Decimal]) -> Self {
        let (wins, losses): (Vec<Decimal>, Vec<Decimal>) = pnls
            .iter()
            .filter(|p| !p.is_zero())
            .partition(|p| p.is_sign_positive());

        let avg_win = mean(&wins);
        let avg_loss = mean(&losses).abs();
        let total: Decimal = pnls.iter().sum();
        let expectancy = if pnls.is_empty() {
            Decimal::ZERO
        } else {
            total / Decimal::from(pnls.len())
        };

        #[allow(clippy::cast_precision_loss)]
        let win_rate = if pnls.is_empty() {
            0.0
        } else {
            wins.len() as f64 / pnls.len() as f64
        };

        Self {
            trades: pnls.len(),
            wins: wins.len(),
            losses: losses.len(),
            win_rate,
            avg_win,
            avg_loss,
            risk_reward: risk_reward_ratio(avg_win, avg_loss),
            expectancy,
        }
    }
}

/// Average win divided by average loss.
///
/// With no losses the ratio is undefined; it resolves to
/// [`NEUTRAL_RISK_REWARD`] rather than infinity.
#[must_use]
pub fn risk_reward_ratio(avg_win: Decimal, avg_loss: Decimal) -> f64 {
    let avg_loss = avg_loss.abs();
    if avg_loss.is_zero() {
        return NEUTRAL_RISK_REWARD;
    }
    (avg_win / avg_loss).to_f64().unwrap_or(NEUTRAL_RISK_REWARD)
}

fn mean(values: &[Decimal]) -> Decimal {
    if values.is_empty() {
        return Decimal::ZERO;
    }
    values.iter().sum::<Decimal>() / Decimal::from(values.len())
}
