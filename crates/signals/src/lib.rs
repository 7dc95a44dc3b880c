//! Decision stages for the gamma regime engine.
//!
//! Each stage is a pure function of its explicit inputs; [`DecisionEngine`]
//! chains them for a full snapshot evaluation.

pub mod curves;
pub mod engine;
pub mod normalizer;
pub mod recommendation;
pub mod regime;
pub mod scorer;
pub mod trap;
pub mod walls;

pub use curves::{exponential_pin_curve, linear_weekday_decay};
pub use engine::{evaluate, DecisionEngine, Evaluation};
pub use normalizer::{normalize, pct_change, Normalized};
pub use recommendation::{build, Recommendation, Strategy};
pub use regime::{classify, vol_regime};
pub use scorer::{score, volume_adjustment};
pub use trap::{detect, RetailSentiment, TrapFlag, TrapType};
pub use walls::{analyze, wall_reaction, PinEstimate, WallProximity, WallReaction, WallSide};
