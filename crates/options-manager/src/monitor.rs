//! Batch position monitoring.
//!
//! Each position is assessed independently; no result depends on another
//! position or on a previous tick.

use std::collections::BTreeMap;

use gex_core::StatusConfig;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::status::assess;
use crate::types::{PositionAssessment, PositionStatus, TrackedPosition};

/// Assessment of one tracked position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionReport {
    pub id: i64,
    pub ticker: String,
    pub assessment: PositionAssessment,
}

/// Result of one monitoring tick across all open positions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonitorReport {
    pub positions: Vec<PositionReport>,
    pub counts: BTreeMap<PositionStatus, usize>,
}

impl MonitorReport {
    /// Positions whose status says to close now.
    pub fn to_close(&self) -> impl Iterator<Item = &PositionReport> {
        self.positions
            .iter()
            .filter(|p| p.assessment.status.requires_close())
    }

    #[must_use]
    pub fn count(&self, status: PositionStatus) -> usize {
        self.counts.get(&status).copied().unwrap_or(0)
    }
}

/// Assesses every open position for this tick.
#[must_use]
pub fn evaluate_positions(positions: &[TrackedPosition], config: &StatusConfig) -> MonitorReport {
    let mut report = MonitorReport::default();

    for pos in positions {
        let assessment = assess(&pos.snapshot, config);
        *report.counts.entry(assessment.status).or_insert(0) += 1;
        report.positions.push(PositionReport {
            id: pos.id,
            ticker: pos.ticker.clone(),
            assessment,
        });
    }

    let closing = report.to_close().count();
    info!(
        positions = positions.len(),
        closing,
        counts = ?report.counts,
        "Monitoring tick complete"
    );

    report
}
