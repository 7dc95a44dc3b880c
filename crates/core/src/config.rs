use serde::{Deserialize, Serialize};

use crate::thresholds;

/// Tunable parameters for every stage of the engine.
///
/// `Default` reproduces the constants in [`thresholds`]. Every section is
/// `#[serde(default)]` so a config file only needs the keys it overrides.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub normalizer: NormalizerConfig,
    pub regime: RegimeConfig,
    pub walls: WallConfig,
    pub scoring: ScoringConfig,
    pub status: StatusConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    pub default_volume_ratio: f64,
    pub default_iv_rank: u8,
    pub default_net_gex_billions: f64,
    pub default_vix: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegimeConfig {
    pub backwardation_below_pct: f64,
    pub contango_above_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallConfig {
    /// Half-width of the testing band around a wall, in percent.
    pub bounce_band_pct: f64,
    /// Scale of the exponential pin curve, in percent.
    pub pin_decay_scale_pct: f64,
    /// How close to a wall a trap setup must be, in percent.
    pub trap_proximity_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub baseline: f64,
    pub positive_gamma_adjustment: f64,
    pub negative_gamma_adjustment: f64,
    pub volume_adjustment_max: f64,
    pub volume_ratio_cap: f64,
    pub min_directional_volume_ratio: f64,
    pub bullish_above: f64,
    pub bearish_below: f64,
    pub friday_decay_weight: f64,
    pub directional_min_confidence: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusConfig {
    pub edge_gone_volume_ratio: f64,
    pub working_volume_ratio: f64,
    pub take_profit_capture: f64,
    pub expected_daily_decay: f64,
    pub bounce_band_pct: f64,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            default_volume_ratio: thresholds::DEFAULT_VOLUME_RATIO,
            default_iv_rank: thresholds::DEFAULT_IV_RANK,
            default_net_gex_billions: thresholds::DEFAULT_NET_GEX_BILLIONS,
            default_vix: thresholds::DEFAULT_VIX,
        }
    }
}

impl Default for RegimeConfig {
    fn default() -> Self {
        Self {
            backwardation_below_pct: thresholds::BACKWARDATION_CONTANGO_PCT,
            contango_above_pct: thresholds::CONTANGO_CONTANGO_PCT,
        }
    }
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            bounce_band_pct: thresholds::BOUNCE_BAND_PCT,
            pin_decay_scale_pct: thresholds::PIN_DECAY_SCALE_PCT,
            trap_proximity_pct: thresholds::TRAP_WALL_PROXIMITY_PCT,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            baseline: thresholds::BASELINE_SCORE,
            positive_gamma_adjustment: thresholds::POSITIVE_GAMMA_PIN_ADJUSTMENT,
            negative_gamma_adjustment: thresholds::NEGATIVE_GAMMA_MOMENTUM_ADJUSTMENT,
            volume_adjustment_max: thresholds::VOLUME_ADJUSTMENT_MAX,
            volume_ratio_cap: thresholds::VOLUME_RATIO_CAP,
            min_directional_volume_ratio: thresholds::MIN_DIRECTIONAL_VOLUME_RATIO,
            bullish_above: thresholds::BULLISH_SCORE_THRESHOLD,
            bearish_below: thresholds::BEARISH_SCORE_THRESHOLD,
            friday_decay_weight: thresholds::FRIDAY_DECAY_WEIGHT,
            directional_min_confidence: thresholds::DIRECTIONAL_MIN_CONFIDENCE,
        }
    }
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            edge_gone_volume_ratio: thresholds::EDGE_GONE_VOLUME_RATIO,
            working_volume_ratio: thresholds::WORKING_VOLUME_RATIO,
            take_profit_capture: thresholds::TAKE_PROFIT_CAPTURE,
            expected_daily_decay: thresholds::EXPECTED_DAILY_DECAY,
            bounce_band_pct: thresholds::BOUNCE_BAND_PCT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let json = r#"{ "scoring": { "friday_decay_weight": 0.5 } }"#;
        let config: EngineConfig = serde_json::from_str(json).unwrap();
        assert!((config.scoring.friday_decay_weight - 0.5).abs() < f64::EPSILON);
        assert!((config.scoring.baseline - 50.0).abs() < f64::EPSILON);
        assert_eq!(config.status, StatusConfig::default());
    }
}
