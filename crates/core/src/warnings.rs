//! Non-fatal normalization warnings.
//!
//! Attached to the evaluation output so callers can decide whether to
//! down-weight confidence. Never raised as errors.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A recoverable problem found while normalizing a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NormalizationWarning {
    /// The field was missing and a default was substituted.
    DefaultedField { field: String, default: String },
    /// The field was missing and has no meaningful default.
    MissingField { field: String },
    /// The value was out of range and was clamped.
    Clamped { field: String, from: f64, to: f64 },
    /// `call_wall >= flip >= put_wall` does not hold.
    WallOrdering {
        call_wall: Option<f64>,
        flip_point: f64,
        put_wall: Option<f64>,
    },
}

impl NormalizationWarning {
    pub fn defaulted(field: &str, default: impl fmt::Display) -> Self {
        Self::DefaultedField {
            field: field.to_string(),
            default: default.to_string(),
        }
    }

    pub fn missing(field: &str) -> Self {
        Self::MissingField {
            field: field.to_string(),
        }
    }

    /// True for warnings produced by default substitution.
    #[must_use]
    pub const fn is_defaulted(&self) -> bool {
        matches!(self, Self::DefaultedField { .. })
    }
}

impl fmt::Display for NormalizationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DefaultedField { field, default } => {
                write!(f, "{field} missing, defaulted to {default}")
            }
            Self::MissingField { field } => write!(f, "{field} missing"),
            Self::Clamped { field, from, to } => {
                write!(f, "{field} out of range ({from}), clamped to {to}")
            }
            Self::WallOrdering {
                call_wall,
                flip_point,
                put_wall,
            } => write!(
                f,
                "wall ordering violated: call {} / flip {flip_point} / put {}",
                fmt_strike(*call_wall),
                fmt_strike(*put_wall)
            ),
        }
    }
}

fn fmt_strike(strike: Option<f64>) -> String {
    strike.map_or_else(|| "n/a".to_string(), |s| format!("{s}"))
}
