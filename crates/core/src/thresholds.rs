//! Named decision thresholds shared by every stage of the engine.
//!
//! Each constant is the default for the matching field in
//! [`EngineConfig`](crate::config::EngineConfig). Stages read the config,
//! never these constants directly, so a host can tune them without a rebuild.

// Normalizer defaults

/// Volume ratio assumed when the snapshot omits it.
pub const DEFAULT_VOLUME_RATIO: f64 = 1.0;
/// IV rank assumed when the snapshot omits it.
pub const DEFAULT_IV_RANK: u8 = 50;
/// Net GEX assumed when the snapshot omits it (no dealer bias).
pub const DEFAULT_NET_GEX_BILLIONS: f64 = 0.0;
/// VIX assumed when the snapshot omits it.
pub const DEFAULT_VIX: f64 = 0.0;
/// Upper bound of IV rank.
pub const MAX_IV_RANK: u8 = 100;

// Regime classification

/// Term-structure contango (percent) below which the curve is in backwardation.
pub const BACKWARDATION_CONTANGO_PCT: f64 = -5.0;
/// Term-structure contango (percent) above which the curve is in steep contango.
pub const CONTANGO_CONTANGO_PCT: f64 = 10.0;

// Wall proximity

/// Half-width of the band around a wall inside which price is testing it.
pub const BOUNCE_BAND_PCT: f64 = 0.5;
/// Distance (percent) over which the pin curve decays by a factor of e.
pub const PIN_DECAY_SCALE_PCT: f64 = 1.0;
/// Distance (percent) from a wall inside which a trap setup is considered live.
pub const TRAP_WALL_PROXIMITY_PCT: f64 = 1.0;

// Signal scoring

/// Neutral starting score.
pub const BASELINE_SCORE: f64 = 50.0;
/// Score added when long-gamma dealers pin price between the walls.
pub const POSITIVE_GAMMA_PIN_ADJUSTMENT: f64 = 15.0;
/// Score subtracted when short-gamma dealers chase price below the flip.
pub const NEGATIVE_GAMMA_MOMENTUM_ADJUSTMENT: f64 = 15.0;
/// Largest magnitude of the volume confirmation term.
pub const VOLUME_ADJUSTMENT_MAX: f64 = 10.0;
/// Volume ratio at which the volume term saturates.
pub const VOLUME_RATIO_CAP: f64 = 3.0;
/// Below this volume ratio no directional claim is allowed.
pub const MIN_DIRECTIONAL_VOLUME_RATIO: f64 = 1.5;
/// Score above which the signal reads bullish.
pub const BULLISH_SCORE_THRESHOLD: f64 = 60.0;
/// Score below which the signal reads bearish.
pub const BEARISH_SCORE_THRESHOLD: f64 = 40.0;
/// Weekday decay weight reached on Friday (Monday is always 1.0).
pub const FRIDAY_DECAY_WEIGHT: f64 = 0.2;

// Recommendation

/// Minimum confidence for a directional trade.
pub const DIRECTIONAL_MIN_CONFIDENCE: u8 = 65;

// Position status

/// Volume ratio below which the edge is considered gone.
pub const EDGE_GONE_VOLUME_RATIO: f64 = 1.5;
/// Volume ratio at or above which a position is confirmed working.
pub const WORKING_VOLUME_RATIO: f64 = 2.0;
/// Fraction of entry premium captured that triggers profit taking.
pub const TAKE_PROFIT_CAPTURE: f64 = 0.50;
/// Expected premium decay per day in trade, as a fraction of entry premium.
pub const EXPECTED_DAILY_DECAY: f64 = 0.08;

// Trade statistics

/// Risk/reward reported when there are no losing trades to divide by.
pub const NEUTRAL_RISK_REWARD: f64 = 0.0;
