//! Gamma regime classification.
//!
//! Computed once per snapshot and shared by every downstream stage so the
//! scorer, trap detector and recommendation never disagree about the book.

use gex_core::{FlipSide, GammaSign, MarketSnapshot, Regime, RegimeConfig, VolRegime};
use tracing::debug;

/// Classifies the dealer gamma book and the vol term structure.
#[must_use]
pub fn classify(snapshot: &MarketSnapshot, config: &RegimeConfig) -> Regime {
    let gamma = if snapshot.net_gex_billions >= 0.0 {
        GammaSign::PositiveGamma
    } else {
        GammaSign::NegativeGamma
    };

    let flip_side = if snapshot.spot_price >= snapshot.flip_point {
        FlipSide::AboveFlip
    } else {
        FlipSide::BelowFlip
    };

    let vol = vol_regime(snapshot.vix_term_structure_contango_pct, config);

    let regime = Regime {
        gamma,
        flip_side,
        vol,
    };

    debug!(
        %regime,
        net_gex = snapshot.net_gex_billions,
        inconsistent = regime.is_inconsistent(),
        "Regime classified"
    );

    regime
}

/// Maps term-structure contango to a vol regime. Missing data reads `Normal`.
#[must_use]
pub fn vol_regime(contango_pct: Option<f64>, config: &RegimeConfig) -> VolRegime {
    match contango_pct {
        Some(c) if c < config.backwardation_below_pct => VolRegime::Backwardation,
        Some(c) if c > config.contango_above_pct => VolRegime::Contango,
        _ => VolRegime::Normal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gex_core::TradingDay;

    fn snapshot(spot: f64, gex: f64, flip: f64, contango: Option<f64>) -> MarketSnapshot {
        MarketSnapshot {
            spot_price: spot,
            vix: 16.0,
            net_gex_billions: gex,
            flip_point: flip,
            call_wall_strike: Some(spot * 1.02),
            put_wall_strike: Some(spot * 0.98),
            volume_ratio: 1.0,
            iv_rank: 50,
            day_of_week: TradingDay::Mon,
            vix_term_structure_contango_pct: contango,
        }
    }

    #[test]
    fn zero_gex_counts_as_positive() {
        let regime = classify(&snapshot(500.0, 0.0, 500.0, None), &RegimeConfig::default());
        assert_eq!(regime.gamma, GammaSign::PositiveGamma);
        assert_eq!(regime.flip_side, FlipSide::AboveFlip);
    }

    #[test]
    fn negative_gex_below_flip() {
        let regime = classify(&snapshot(500.0, -2.5, 505.0, None), &RegimeConfig::default());
        assert_eq!(regime.gamma, GammaSign::NegativeGamma);
        assert_eq!(regime.flip_side, FlipSide::BelowFlip);
        assert_eq!(regime.vol, VolRegime::Normal);
    }

    #[test]
    fn vol_regime_boundaries() {
        let config = RegimeConfig::default();
        assert_eq!(vol_regime(Some(-5.1), &config), VolRegime::Backwardation);
        assert_eq!(vol_regime(Some(-5.0), &config), VolRegime::Normal);
        assert_eq!(vol_regime(Some(10.0), &config), VolRegime::Normal);
        assert_eq!(vol_regime(Some(10.5), &config), VolRegime::Contango);
        assert_eq!(vol_regime(None, &config), VolRegime::Normal);
    }

    #[test]
    fn thresholds_come_from_config() {
        let config = RegimeConfig {
            backwardation_below_pct: 0.0,
            contango_above_pct: 2.0,
        };
        assert_eq!(vol_regime(Some(-1.0), &config), VolRegime::Backwardation);
        assert_eq!(vol_regime(Some(3.0), &config), VolRegime::Contango);
    }
}
