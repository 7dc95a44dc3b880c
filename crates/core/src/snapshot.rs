//! Market snapshot types.
//!
//! [`RawMarketSnapshot`] mirrors what upstream producers hand over: every
//! field may be missing. [`MarketSnapshot`] is the normalized form that the
//! classifier, analyzer and scorer operate on.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A regular-session weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TradingDay {
    #[serde(rename = "MON", alias = "Mon", alias = "Monday")]
    Mon,
    #[serde(rename = "TUE", alias = "Tue", alias = "Tuesday")]
    Tue,
    #[serde(rename = "WED", alias = "Wed", alias = "Wednesday")]
    Wed,
    #[serde(rename = "THU", alias = "Thu", alias = "Thursday")]
    Thu,
    #[serde(rename = "FRI", alias = "Fri", alias = "Friday")]
    Fri,
}

impl TradingDay {
    /// All trading days, Monday first.
    pub const ALL: [Self; 5] = [Self::Mon, Self::Tue, Self::Wed, Self::Thu, Self::Fri];

    /// Zero-based index from Monday.
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::Mon => 0,
            Self::Tue => 1,
            Self::Wed => 2,
            Self::Thu => 3,
            Self::Fri => 4,
        }
    }

    /// Short uppercase label ("MON").
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Mon => "MON",
            Self::Tue => "TUE",
            Self::Wed => "WED",
            Self::Thu => "THU",
            Self::Fri => "FRI",
        }
    }
}

impl fmt::Display for TradingDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<Weekday> for TradingDay {
    type Error = ValidationError;

    fn try_from(day: Weekday) -> Result<Self, Self::Error> {
        match day {
            Weekday::Mon => Ok(Self::Mon),
            Weekday::Tue => Ok(Self::Tue),
            Weekday::Wed => Ok(Self::Wed),
            Weekday::Thu => Ok(Self::Thu),
            Weekday::Fri => Ok(Self::Fri),
            Weekday::Sat | Weekday::Sun => Err(ValidationError::Weekend(day)),
        }
    }
}

impl FromStr for TradingDay {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let weekday: Weekday = s
            .trim()
            .parse()
            .map_err(|_| ValidationError::UnknownDay(s.to_string()))?;
        Self::try_from(weekday)
    }
}

/// Unvalidated snapshot as delivered by the market-data collaborator.
///
/// Field names follow the upstream camelCase JSON contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMarketSnapshot {
    pub spot_price: Option<f64>,
    pub vix: Option<f64>,
    pub net_gex_billions: Option<f64>,
    pub flip_point: Option<f64>,
    pub call_wall_strike: Option<f64>,
    pub put_wall_strike: Option<f64>,
    pub volume_ratio: Option<f64>,
    pub iv_rank: Option<i64>,
    pub day_of_week: Option<TradingDay>,
    pub vix_term_structure_contango_pct: Option<f64>,
    /// Capture time; used to derive the weekday when `day_of_week` is absent.
    pub as_of: Option<DateTime<Utc>>,
}

impl RawMarketSnapshot {
    /// Creates a raw snapshot carrying only a spot price.
    #[must_use]
    pub fn new(spot_price: f64) -> Self {
        Self {
            spot_price: Some(spot_price),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_vix(mut self, vix: f64) -> Self {
        self.vix = Some(vix);
        self
    }

    #[must_use]
    pub fn with_net_gex(mut self, billions: f64) -> Self {
        self.net_gex_billions = Some(billions);
        self
    }

    #[must_use]
    pub fn with_flip_point(mut self, flip: f64) -> Self {
        self.flip_point = Some(flip);
        self
    }

    /// Sets both wall strikes.
    #[must_use]
    pub fn with_walls(mut self, call_wall: f64, put_wall: f64) -> Self {
        self.call_wall_strike = Some(call_wall);
        self.put_wall_strike = Some(put_wall);
        self
    }

    #[must_use]
    pub fn with_volume_ratio(mut self, ratio: f64) -> Self {
        self.volume_ratio = Some(ratio);
        self
    }

    #[must_use]
    pub fn with_iv_rank(mut self, rank: i64) -> Self {
        self.iv_rank = Some(rank);
        self
    }

    #[must_use]
    pub fn with_day(mut self, day: TradingDay) -> Self {
        self.day_of_week = Some(day);
        self
    }

    #[must_use]
    pub fn with_contango_pct(mut self, pct: f64) -> Self {
        self.vix_term_structure_contango_pct = Some(pct);
        self
    }

    #[must_use]
    pub fn with_as_of(mut self, as_of: DateTime<Utc>) -> Self {
        self.as_of = Some(as_of);
        self
    }
}

/// Fully-populated snapshot, immutable for the duration of one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub spot_price: f64,
    pub vix: f64,
    /// Signed; positive means dealers are net long gamma.
    pub net_gex_billions: f64,
    pub flip_point: f64,
    pub call_wall_strike: Option<f64>,
    pub put_wall_strike: Option<f64>,
    /// Current volume divided by trailing average.
    pub volume_ratio: f64,
    pub iv_rank: u8,
    pub day_of_week: TradingDay,
    pub vix_term_structure_contango_pct: Option<f64>,
}

impl MarketSnapshot {
    /// Returns true when the expected `call >= flip >= put` ordering holds.
    ///
    /// Missing walls are not counted as violations.
    #[must_use]
    pub fn walls_ordered(&self) -> bool {
        let call_ok = self.call_wall_strike.map_or(true, |c| c >= self.flip_point);
        let put_ok = self.put_wall_strike.map_or(true, |p| self.flip_point >= p);
        call_ok && put_ok
    }
}
