//! Psychology trap detection.
//!
//! A trap is a setup where the obvious retail read is directly contradicted
//! by what dealer hedging must do. Each flag pairs the retail narrative with
//! the mechanical counter-narrative.

use std::fmt;
use std::str::FromStr;

use gex_core::{Direction, FlipSide, Regime, WallConfig};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::walls::WallProximity;

/// Crowd positioning hint supplied by an upstream sentiment producer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RetailSentiment {
    Bullish,
    Bearish,
    Neutral,
}

impl RetailSentiment {
    #[must_use]
    pub const fn direction(self) -> Direction {
        match self {
            Self::Bullish => Direction::Bullish,
            Self::Bearish => Direction::Bearish,
            Self::Neutral => Direction::Neutral,
        }
    }
}

impl FromStr for RetailSentiment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bullish" | "bull" => Ok(Self::Bullish),
            "bearish" | "bear" => Ok(Self::Bearish),
            "neutral" => Ok(Self::Neutral),
            other => Err(format!("unknown sentiment: {other}")),
        }
    }
}

/// Kinds of trap the detector recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrapType {
    /// Chasing a breakout into a call wall that long-gamma dealers defend.
    CallWallBreakout,
    /// Shorting a breakdown into a put wall that long-gamma dealers defend.
    PutWallBreakdown,
    /// Buying the dip while short-gamma dealers are forced sellers.
    NegativeGammaDipBuy,
}

impl TrapType {
    /// Direction the crowd is leaning when it walks into this trap.
    #[must_use]
    pub const fn retail_direction(self) -> Direction {
        match self {
            Self::CallWallBreakout | Self::NegativeGammaDipBuy => Direction::Bullish,
            Self::PutWallBreakdown => Direction::Bearish,
        }
    }
}

impl fmt::Display for TrapType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CallWallBreakout => write!(f, "CALL_WALL_BREAKOUT"),
            Self::PutWallBreakdown => write!(f, "PUT_WALL_BREAKDOWN"),
            Self::NegativeGammaDipBuy => write!(f, "NEGATIVE_GAMMA_DIP_BUY"),
        }
    }
}

/// A detected trap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrapFlag {
    pub trap_type: TrapType,
    pub retail_narrative: String,
    pub mechanical_reality: String,
}

/// Looks for a trap in the current regime and wall layout.
///
/// Returns `None` when either wall strike is unknown, and when the supplied
/// sentiment does not lean the way the trap requires. With no sentiment hint
/// the obvious read is assumed. At most one trap is reported, checked in
/// the order call wall, put wall, dip buy.
#[must_use]
pub fn detect(
    regime: &Regime,
    walls: &WallProximity,
    sentiment: Option<RetailSentiment>,
    config: &WallConfig,
) -> Option<TrapFlag> {
    let (call, put) = match (walls.call_wall_strike, walls.put_wall_strike) {
        (Some(call), Some(put)) => (call, put),
        _ => return None,
    };
    let distance_to_call = walls.distance_to_call_pct?;
    let distance_to_put = walls.distance_to_put_pct?;
    let near = config.trap_proximity_pct;

    let leans = |trap: TrapType| {
        sentiment.map_or(true, |s| s.direction() == trap.retail_direction())
    };

    let flag = if regime.is_positive_gamma()
        && (0.0..=near).contains(&distance_to_call)
        && leans(TrapType::CallWallBreakout)
    {
        Some(TrapFlag {
            trap_type: TrapType::CallWallBreakout,
            retail_narrative: format!(
                "Price is {distance_to_call:.2}% under the {call:.0} call wall: breakout coming, buy calls"
            ),
            mechanical_reality: format!(
                "Dealers long gamma at {call:.0} must sell into strength, so rallies stall beneath the strike"
            ),
        })
    } else if regime.is_positive_gamma()
        && (-near..=0.0).contains(&distance_to_put)
        && leans(TrapType::PutWallBreakdown)
    {
        Some(TrapFlag {
            trap_type: TrapType::PutWallBreakdown,
            retail_narrative: format!(
                "Price is {:.2}% above the {put:.0} put wall: support is cracking, buy puts",
                distance_to_put.abs()
            ),
            mechanical_reality: format!(
                "Dealers long gamma at {put:.0} must buy weakness, so selloffs stall above the strike"
            ),
        })
    } else if regime.is_negative_gamma()
        && regime.flip_side == FlipSide::BelowFlip
        && leans(TrapType::NegativeGammaDipBuy)
    {
        Some(TrapFlag {
            trap_type: TrapType::NegativeGammaDipBuy,
            retail_narrative: format!(
                "Price is {:.2}% below the {:.0} flip: oversold, buy the dip",
                walls.distance_to_flip_pct.abs(),
                walls.flip_point
            ),
            mechanical_reality:
                "Dealers short gamma must sell into weakness, so hedging flows extend the move lower"
                    .to_string(),
        })
    } else {
        None
    };

    if let Some(flag) = &flag {
        debug!(trap = %flag.trap_type, "Psychology trap detected");
    }

    flag
}
