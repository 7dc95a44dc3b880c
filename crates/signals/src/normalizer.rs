//! Snapshot validation and default filling.
//!
//! Turns a [`RawMarketSnapshot`] into a [`MarketSnapshot`]. Only a missing or
//! non-positive spot price (or an equally meaningless value such as a negative
//! volume ratio) is fatal; every other gap is defaulted and reported as a
//! [`NormalizationWarning`].

use chrono_tz::America::New_York;
use gex_core::{
    thresholds, MarketSnapshot, NormalizationWarning, NormalizerConfig, RawMarketSnapshot, Result,
    TradingDay, ValidationError,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// A validated snapshot plus the warnings raised while producing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Normalized {
    pub snapshot: MarketSnapshot,
    pub warnings: Vec<NormalizationWarning>,
}

/// Percentage change `(a - b) / b * 100`, or `0` when `b` is zero.
#[must_use]
pub fn pct_change(a: f64, b: f64) -> f64 {
    if b == 0.0 {
        return 0.0;
    }
    (a - b) / b * 100.0
}

/// Validates a raw snapshot and fills defaults.
///
/// # Errors
/// Returns [`ValidationError`] when the spot price is missing or not positive,
/// when any supplied number is not finite, or when `vix`/`volumeRatio` is
/// negative.
pub fn normalize(raw: &RawMarketSnapshot, config: &NormalizerConfig) -> Result<Normalized> {
    let spot_price = match finite("spotPrice", raw.spot_price)? {
        None => return Err(ValidationError::MissingSpot),
        Some(spot) if spot <= 0.0 => return Err(ValidationError::NonPositiveSpot(spot)),
        Some(spot) => spot,
    };

    let mut warnings = Vec::new();

    let vix = match non_negative("vix", raw.vix)? {
        Some(v) => v,
        None => {
            warnings.push(NormalizationWarning::defaulted("vix", config.default_vix));
            config.default_vix
        }
    };

    let volume_ratio = match non_negative("volumeRatio", raw.volume_ratio)? {
        Some(v) => v,
        None => {
            warnings.push(NormalizationWarning::defaulted(
                "volumeRatio",
                config.default_volume_ratio,
            ));
            config.default_volume_ratio
        }
    };

    let net_gex_billions = match finite("netGexBillions", raw.net_gex_billions)? {
        Some(v) => v,
        None => {
            warnings.push(NormalizationWarning::defaulted(
                "netGexBillions",
                config.default_net_gex_billions,
            ));
            config.default_net_gex_billions
        }
    };

    let flip_point = match finite("flipPoint", raw.flip_point)? {
        Some(v) => v,
        None => {
            warnings.push(NormalizationWarning::defaulted("flipPoint", spot_price));
            spot_price
        }
    };

    let call_wall_strike = wall("callWallStrike", raw.call_wall_strike, &mut warnings)?;
    let put_wall_strike = wall("putWallStrike", raw.put_wall_strike, &mut warnings)?;

    let iv_rank = iv_rank(raw.iv_rank, config, &mut warnings);
    let day_of_week = trading_day(raw, &mut warnings);
    let vix_term_structure_contango_pct =
        finite("vixTermStructureContangoPct", raw.vix_term_structure_contango_pct)?;

    let snapshot = MarketSnapshot {
        spot_price,
        vix,
        net_gex_billions,
        flip_point,
        call_wall_strike,
        put_wall_strike,
        volume_ratio,
        iv_rank,
        day_of_week,
        vix_term_structure_contango_pct,
    };

    if !snapshot.walls_ordered() {
        warnings.push(NormalizationWarning::WallOrdering {
            call_wall: call_wall_strike,
            flip_point,
            put_wall: put_wall_strike,
        });
    }

    if warnings.is_empty() {
        debug!(spot = spot_price, day = %day_of_week, "Snapshot normalized");
    } else {
        warn!(
            spot = spot_price,
            warnings = warnings.len(),
            "Snapshot normalized with substitutions"
        );
    }

    Ok(Normalized { snapshot, warnings })
}

fn finite(field: &'static str, value: Option<f64>) -> Result<Option<f64>> {
    match value {
        Some(v) if !v.is_finite() => Err(ValidationError::NotFinite { field }),
        other => Ok(other),
    }
}

fn non_negative(field: &'static str, value: Option<f64>) -> Result<Option<f64>> {
    match finite(field, value)? {
        Some(v) if v < 0.0 => Err(ValidationError::Negative { field, value: v }),
        other => Ok(other),
    }
}

/// Upstream producers send `0` for a wall they could not compute.
fn wall(
    field: &'static str,
    value: Option<f64>,
    warnings: &mut Vec<NormalizationWarning>,
) -> Result<Option<f64>> {
    match finite(field, value)? {
        Some(strike) if strike > 0.0 => Ok(Some(strike)),
        _ => {
            warnings.push(NormalizationWarning::missing(field));
            Ok(None)
        }
    }
}

fn iv_rank(
    value: Option<i64>,
    config: &NormalizerConfig,
    warnings: &mut Vec<NormalizationWarning>,
) -> u8 {
    let Some(rank) = value else {
        warnings.push(NormalizationWarning::defaulted("ivRank", config.default_iv_rank));
        return config.default_iv_rank;
    };

    let clamped = rank.clamp(0, i64::from(thresholds::MAX_IV_RANK));
    if clamped != rank {
        warnings.push(NormalizationWarning::Clamped {
            field: "ivRank".to_string(),
            from: rank as f64,
            to: clamped as f64,
        });
    }
    u8::try_from(clamped).unwrap_or(thresholds::MAX_IV_RANK)
}

/// Explicit day wins; otherwise the capture time in exchange-local time;
/// otherwise Friday, the most conservative decay weight. A capture time
/// that lands on a weekend also falls back to Friday.
fn trading_day(raw: &RawMarketSnapshot, warnings: &mut Vec<NormalizationWarning>) -> TradingDay {
    if let Some(day) = raw.day_of_week {
        return day;
    }
    if let Some(as_of) = raw.as_of {
        let weekday = chrono::Datelike::weekday(&as_of.with_timezone(&New_York));
        if let Ok(day) = TradingDay::try_from(weekday) {
            return day;
        }
        debug!(%weekday, "Capture time falls on a weekend");
    }
    warnings.push(NormalizationWarning::defaulted("dayOfWeek", TradingDay::Fri));
    TradingDay::Fri
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn config() -> NormalizerConfig {
        NormalizerConfig::default()
    }

    fn complete() -> RawMarketSnapshot {
        RawMarketSnapshot::new(500.0)
            .with_vix(18.0)
            .with_net_gex(1.2)
            .with_flip_point(495.0)
            .with_walls(510.0, 490.0)
            .with_volume_ratio(1.8)
            .with_iv_rank(40)
            .with_day(TradingDay::Tue)
            .with_contango_pct(4.0)
    }

    #[test]
    fn complete_snapshot_has_no_warnings() {
        let out = normalize(&complete(), &config()).unwrap();
        assert!(out.warnings.is_empty(), "{:?}", out.warnings);
        assert_eq!(out.snapshot.iv_rank, 40);
        assert_eq!(out.snapshot.day_of_week, TradingDay::Tue);
    }

    #[test]
    fn rejects_missing_and_non_positive_spot() {
        let raw = RawMarketSnapshot::default();
        assert_eq!(normalize(&raw, &config()), Err(ValidationError::MissingSpot));

        let raw = RawMarketSnapshot::new(0.0);
        assert_eq!(
            normalize(&raw, &config()),
            Err(ValidationError::NonPositiveSpot(0.0))
        );

        let raw = RawMarketSnapshot::new(-12.0);
        assert!(matches!(
            normalize(&raw, &config()),
            Err(ValidationError::NonPositiveSpot(_))
        ));
    }

    #[test]
    fn rejects_nonsensical_values() {
        let raw = complete().with_volume_ratio(-0.5);
        assert!(matches!(
            normalize(&raw, &config()),
            Err(ValidationError::Negative { field: "volumeRatio", .. })
        ));

        let raw = complete().with_net_gex(f64::NAN);
        assert!(matches!(
            normalize(&raw, &config()),
            Err(ValidationError::NotFinite { field: "netGexBillions" })
        ));
    }

    #[test]
    fn defaults_missing_fields_with_warnings() {
        let out = normalize(&RawMarketSnapshot::new(420.0), &config()).unwrap();
        let s = &out.snapshot;

        assert!((s.volume_ratio - 1.0).abs() < f64::EPSILON);
        assert_eq!(s.iv_rank, 50);
        assert!(s.net_gex_billions.abs() < f64::EPSILON);
        assert!((s.flip_point - 420.0).abs() < f64::EPSILON);
        assert_eq!(s.day_of_week, TradingDay::Fri);
        assert!(s.call_wall_strike.is_none());
        assert!(s.put_wall_strike.is_none());

        let defaulted = out.warnings.iter().filter(|w| w.is_defaulted()).count();
        assert_eq!(defaulted, 6);
        assert!(out
            .warnings
            .contains(&NormalizationWarning::missing("callWallStrike")));
    }

    #[test]
    fn clamps_iv_rank() {
        let out = normalize(&complete().with_iv_rank(140), &config()).unwrap();
        assert_eq!(out.snapshot.iv_rank, 100);
        assert!(matches!(
            out.warnings.as_slice(),
            [NormalizationWarning::Clamped { .. }]
        ));
    }

    #[test]
    fn zero_wall_is_treated_as_missing() {
        let mut raw = complete();
        raw.call_wall_strike = Some(0.0);
        let out = normalize(&raw, &config()).unwrap();
        assert!(out.snapshot.call_wall_strike.is_none());
        assert!(out
            .warnings
            .contains(&NormalizationWarning::missing("callWallStrike")));
    }

    #[test]
    fn flags_wall_ordering_violation() {
        let raw = complete().with_walls(480.0, 490.0);
        let out = normalize(&raw, &config()).unwrap();
        assert!(out
            .warnings
            .iter()
            .any(|w| matches!(w, NormalizationWarning::WallOrdering { .. })));
    }

    #[test]
    fn derives_day_from_capture_time_in_new_york() {
        // 2024-03-04 is a Monday; 02:00 UTC is still Sunday evening in New York.
        let mut raw = complete();
        raw.day_of_week = None;

        let monday_afternoon = Utc.with_ymd_and_hms(2024, 3, 4, 18, 0, 0).unwrap();
        let out = normalize(&raw.clone().with_as_of(monday_afternoon), &config()).unwrap();
        assert_eq!(out.snapshot.day_of_week, TradingDay::Mon);

        let sunday_evening = Utc.with_ymd_and_hms(2024, 3, 4, 2, 0, 0).unwrap();
        let out = normalize(&raw.with_as_of(sunday_evening), &config()).unwrap();
        assert_eq!(out.snapshot.day_of_week, TradingDay::Fri);
        assert!(out
            .warnings
            .contains(&NormalizationWarning::defaulted("dayOfWeek", TradingDay::Fri)));
    }

    #[test]
    fn weekend_capture_time_is_defaulted_not_rejected() {
        let mut raw = complete();
        raw.day_of_week = None;
        let saturday = Utc.with_ymd_and_hms(2024, 3, 9, 15, 0, 0).unwrap();

        let out = normalize(&raw.with_as_of(saturday), &config()).unwrap();
        assert_eq!(out.snapshot.day_of_week, TradingDay::Fri);
        assert_eq!(out.warnings.iter().filter(|w| w.is_defaulted()).count(), 1);
    }

    #[test]
    fn pct_change_guards_zero_denominator() {
        assert!((pct_change(105.0, 100.0) - 5.0).abs() < 1e-9);
        assert!(pct_change(5.0, 0.0).abs() < f64::EPSILON);
    }
}
