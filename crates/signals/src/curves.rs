//! Heuristic curves used by the scorer and the wall analyzer.
//!
//! These are informal curve fits, not calibrated models. They are kept as
//! standalone functions so a fitted model can replace either one without
//! touching the decision structure around it.

use gex_core::TradingDay;

/// Weight applied to premium-selling confidence on a given weekday.
///
/// Falls linearly from `1.0` on Monday to `friday_weight` on Friday as the
/// weekly gamma erodes into expiration.
#[must_use]
pub fn linear_weekday_decay(day: TradingDay, friday_weight: f64) -> f64 {
    let floor = friday_weight.clamp(0.0, 1.0);
    let step = (1.0 - floor) / 4.0;
    1.0 - step * f64::from(day.index())
}

/// Advisory pin likelihood given the distance (percent) to the nearest wall.
///
/// `exp(-|distance| / scale)`: `1.0` at the strike, strictly decreasing as
/// price moves away. A non-positive scale collapses to a step at zero.
#[must_use]
pub fn exponential_pin_curve(distance_pct: f64, scale_pct: f64) -> f64 {
    let distance = distance_pct.abs();
    if scale_pct <= 0.0 {
        return if distance == 0.0 { 1.0 } else { 0.0 };
    }
    (-distance / scale_pct).exp()
}
