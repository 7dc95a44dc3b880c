//! Full snapshot evaluation pipeline.
//!
//! snapshot → normalize → {classify, analyze walls} → {score, detect trap}
//! → build recommendation. Every step is pure; the engine only carries its
//! configuration.

use gex_core::{
    EngineConfig, MarketSnapshot, NormalizationWarning, RawMarketSnapshot, Regime, Result,
    TradeSignal,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::normalizer::normalize;
use crate::recommendation::{build, Recommendation};
use crate::regime::classify;
use crate::scorer::score;
use crate::trap::{detect, RetailSentiment, TrapFlag};
use crate::walls::{analyze, WallProximity};

/// Every intermediate product of one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub snapshot: MarketSnapshot,
    pub regime: Regime,
    pub walls: WallProximity,
    pub signal: TradeSignal,
    pub trap: Option<TrapFlag>,
    pub recommendation: Recommendation,
    pub warnings: Vec<NormalizationWarning>,
}

/// Stateless evaluator bound to one configuration.
#[derive(Debug, Clone, Default)]
pub struct DecisionEngine {
    config: EngineConfig,
}

impl DecisionEngine {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Normalizes a raw snapshot and evaluates it.
    ///
    /// # Errors
    /// Returns the normalizer's [`ValidationError`](gex_core::ValidationError)
    /// when the snapshot is unusable.
    pub fn evaluate(
        &self,
        raw: &RawMarketSnapshot,
        sentiment: Option<RetailSentiment>,
    ) -> Result<Evaluation> {
        let normalized = normalize(raw, &self.config.normalizer)?;
        Ok(self.run(normalized.snapshot, normalized.warnings, sentiment))
    }

    /// Evaluates an already-normalized snapshot.
    #[must_use]
    pub fn evaluate_snapshot(
        &self,
        snapshot: &MarketSnapshot,
        sentiment: Option<RetailSentiment>,
    ) -> Evaluation {
        self.run(snapshot.clone(), Vec::new(), sentiment)
    }

    fn run(
        &self,
        snapshot: MarketSnapshot,
        warnings: Vec<NormalizationWarning>,
        sentiment: Option<RetailSentiment>,
    ) -> Evaluation {
        let config = &self.config;
        let regime = classify(&snapshot, &config.regime);
        let walls = analyze(&snapshot, &config.walls);
        let signal = score(
            &regime,
            &walls,
            snapshot.volume_ratio,
            snapshot.day_of_week,
            &config.scoring,
        );
        let trap = detect(&regime, &walls, sentiment, &config.walls);
        let recommendation = build(&signal, trap.as_ref(), &regime, &config.scoring);

        debug!(
            spot = snapshot.spot_price,
            %regime,
            strategy = %recommendation.strategy,
            direction = %recommendation.direction,
            confidence = recommendation.confidence_pct,
            trap = ?trap.as_ref().map(|t| t.trap_type),
            warnings = warnings.len(),
            "Snapshot evaluated"
        );

        Evaluation {
            snapshot,
            regime,
            walls,
            signal,
            trap,
            recommendation,
            warnings,
        }
    }
}

/// Evaluates a raw snapshot with the default configuration.
///
/// # Errors
/// See [`DecisionEngine::evaluate`].
pub fn evaluate(raw: &RawMarketSnapshot, sentiment: Option<RetailSentiment>) -> Result<Evaluation> {
    DecisionEngine::default().evaluate(raw, sentiment)
}
