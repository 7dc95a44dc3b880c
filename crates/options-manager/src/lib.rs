//! Deterministic options position management.
//!
//! - Classifies each open position into a status on every monitoring tick
//! - Summarizes a monitoring tick across the whole book
//! - Computes win/loss statistics over closed trades
//!
//! No state is kept between calls; the position tracker owns the lifecycle.

pub mod monitor;
pub mod stats;
pub mod status;
pub mod types;

pub use monitor::{evaluate_positions, MonitorReport, PositionReport};
pub use stats::{risk_reward_ratio, TradeStats};
pub use status::{assess, next_status};
pub use types::{PositionAssessment, PositionSnapshot, PositionStatus, TrackedPosition};
