//! Shared types for the gamma regime decision engine.
//!
//! Everything here is plain data: snapshots, regime labels, signals,
//! thresholds and configuration. The decision stages live in
//! `gex-signals` and `gex-options-manager`.

pub mod config;
pub mod error;
pub mod regime;
pub mod signal;
pub mod snapshot;
pub mod thresholds;
pub mod warnings;

pub use config::{
    EngineConfig, NormalizerConfig, RegimeConfig, ScoringConfig, StatusConfig, WallConfig,
};
pub use error::{Result, ValidationError};
pub use regime::{FlipSide, GammaSign, Regime, VolRegime};
pub use signal::{Direction, TradeSignal};
pub use snapshot::{MarketSnapshot, RawMarketSnapshot, TradingDay};
pub use warnings::NormalizationWarning;
