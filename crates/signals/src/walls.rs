//! Wall proximity analysis.
//!
//! Measures how far spot sits from the call wall, the put wall and the gamma
//! flip, classifies how price is reacting at a wall, and estimates an
//! advisory pin likelihood.

use std::fmt;

use gex_core::{MarketSnapshot, WallConfig};
use serde::{Deserialize, Serialize};

use crate::curves::exponential_pin_curve;
use crate::normalizer::pct_change;

/// Which role a wall plays relative to price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WallSide {
    /// Call wall: a ceiling, broken when price trades above it.
    Resistance,
    /// Put wall: a floor, broken when price trades below it.
    Support,
}

/// How price is behaving at a wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WallReaction {
    /// Price has crossed through the wall.
    Broke,
    /// Price is inside the testing band on the intact side.
    Bounced,
    /// Price is on the intact side and has moved out of the band.
    Retreated,
}

impl WallReaction {
    /// True unless the wall has been crossed.
    #[must_use]
    pub const fn is_intact(self) -> bool {
        !matches!(self, Self::Broke)
    }
}

impl fmt::Display for WallReaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Broke => write!(f, "BROKE"),
            Self::Bounced => write!(f, "BOUNCED"),
            Self::Retreated => write!(f, "RETREATED"),
        }
    }
}

/// Classifies price action at a wall.
///
/// Distance is `(wall - price) / price * 100`; inside `band_pct` on the
/// intact side the wall is being tested and holding.
#[must_use]
pub fn wall_reaction(price: f64, wall: f64, side: WallSide, band_pct: f64) -> WallReaction {
    let broke = match side {
        WallSide::Resistance => price > wall,
        WallSide::Support => price < wall,
    };
    if broke {
        return WallReaction::Broke;
    }
    if pct_change(wall, price).abs() < band_pct {
        WallReaction::Bounced
    } else {
        WallReaction::Retreated
    }
}

/// Heuristic pin likelihood toward the nearer wall.
///
/// Not a statistical probability. `advisory` is always set so renderers can
/// label it accordingly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PinEstimate {
    pub likelihood: f64,
    pub nearest: WallSide,
    pub distance_pct: f64,
    pub advisory: bool,
}

/// Spot's position relative to the walls and the flip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallProximity {
    pub spot_price: f64,
    pub flip_point: f64,
    pub call_wall_strike: Option<f64>,
    pub put_wall_strike: Option<f64>,
    /// `(call - spot) / spot * 100`; positive while spot is below the call wall.
    pub distance_to_call_pct: Option<f64>,
    /// `(put - spot) / spot * 100`; negative while spot is above the put wall.
    pub distance_to_put_pct: Option<f64>,
    /// `(flip - spot) / spot * 100`.
    pub distance_to_flip_pct: f64,
    pub call_reaction: Option<WallReaction>,
    pub put_reaction: Option<WallReaction>,
    pub pin: Option<PinEstimate>,
}

impl WallProximity {
    /// True when both walls are known.
    #[must_use]
    pub const fn has_both_walls(&self) -> bool {
        self.call_wall_strike.is_some() && self.put_wall_strike.is_some()
    }

    /// True when `put <= spot <= call`. False if either wall is unknown.
    #[must_use]
    pub fn inside_walls(&self) -> bool {
        match (self.put_wall_strike, self.call_wall_strike) {
            (Some(put), Some(call)) => put <= self.spot_price && self.spot_price <= call,
            _ => false,
        }
    }
}

/// Computes wall distances, reactions and the pin estimate for a snapshot.
#[must_use]
pub fn analyze(snapshot: &MarketSnapshot, config: &WallConfig) -> WallProximity {
    let spot = snapshot.spot_price;
    let call = snapshot.call_wall_strike;
    let put = snapshot.put_wall_strike;

    let distance_to_call_pct = call.map(|c| pct_change(c, spot));
    let distance_to_put_pct = put.map(|p| pct_change(p, spot));

    let call_reaction =
        call.map(|c| wall_reaction(spot, c, WallSide::Resistance, config.bounce_band_pct));
    let put_reaction =
        put.map(|p| wall_reaction(spot, p, WallSide::Support, config.bounce_band_pct));

    let nearest = match (distance_to_call_pct, distance_to_put_pct) {
        (Some(c), Some(p)) if c.abs() <= p.abs() => Some((WallSide::Resistance, c)),
        (Some(_), Some(p)) => Some((WallSide::Support, p)),
        (Some(c), None) => Some((WallSide::Resistance, c)),
        (None, Some(p)) => Some((WallSide::Support, p)),
        (None, None) => None,
    };

    let pin = nearest.map(|(side, distance)| PinEstimate {
        likelihood: exponential_pin_curve(distance, config.pin_decay_scale_pct),
        nearest: side,
        distance_pct: distance.abs(),
        advisory: true,
    });

    WallProximity {
        spot_price: spot,
        flip_point: snapshot.flip_point,
        call_wall_strike: call,
        put_wall_strike: put,
        distance_to_call_pct,
        distance_to_put_pct,
        distance_to_flip_pct: pct_change(snapshot.flip_point, spot),
        call_reaction,
        put_reaction,
        pin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gex_core::TradingDay;

    fn snapshot(spot: f64, call: Option<f64>, put: Option<f64>) -> MarketSnapshot {
        MarketSnapshot {
            spot_price: spot,
            vix: 15.0,
            net_gex_billions: 1.0,
            flip_point: 495.0,
            call_wall_strike: call,
            put_wall_strike: put,
            volume_ratio: 1.0,
            iv_rank: 50,
            day_of_week: TradingDay::Mon,
            vix_term_structure_contango_pct: None,
        }
    }

    #[test]
    fn distances_are_signed_percentages_of_spot() {
        let p = analyze(
            &snapshot(500.0, Some(510.0), Some(490.0)),
            &WallConfig::default(),
        );
        assert!((p.distance_to_call_pct.unwrap() - 2.0).abs() < 1e-9);
        assert!((p.distance_to_put_pct.unwrap() + 2.0).abs() < 1e-9);
        assert!((p.distance_to_flip_pct + 1.0).abs() < 1e-9);
        assert!(p.inside_walls());
    }

    #[test]
    fn reaction_at_resistance() {
        assert_eq!(
            wall_reaction(100.0, 100.3, WallSide::Resistance, 0.5),
            WallReaction::Bounced
        );
        assert_eq!(
            wall_reaction(96.0, 98.0, WallSide::Resistance, 0.5),
            WallReaction::Retreated
        );
        assert_eq!(
            wall_reaction(100.0, 98.0, WallSide::Resistance, 0.5),
            WallReaction::Broke
        );
    }

    #[test]
    fn reaction_at_support_is_mirrored() {
        assert_eq!(
            wall_reaction(90.2, 90.0, WallSide::Support, 0.5),
            WallReaction::Bounced
        );
        assert_eq!(
            wall_reaction(89.0, 90.0, WallSide::Support, 0.5),
            WallReaction::Broke
        );
        assert!(WallReaction::Retreated.is_intact());
        assert!(!WallReaction::Broke.is_intact());
    }

    #[test]
    fn pin_tracks_nearest_wall_and_is_advisory() {
        let config = WallConfig::default();
        let near_call = analyze(&snapshot(508.0, Some(510.0), Some(490.0)), &config);
        let pin = near_call.pin.unwrap();
        assert_eq!(pin.nearest, WallSide::Resistance);
        assert!(pin.advisory);

        let centered = analyze(&snapshot(500.0, Some(510.0), Some(490.0)), &config);
        assert!(pin.likelihood > centered.pin.unwrap().likelihood);
    }

    #[test]
    fn missing_walls_leave_fields_empty() {
        let p = analyze(&snapshot(500.0, None, Some(490.0)), &WallConfig::default());
        assert!(p.call_reaction.is_none());
        assert!(!p.has_both_walls());
        assert!(!p.inside_walls());
        assert_eq!(p.pin.unwrap().nearest, WallSide::Support);

        let p = analyze(&snapshot(500.0, None, None), &WallConfig::default());
        assert!(p.pin.is_none());
    }
}
