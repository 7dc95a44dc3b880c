//! Error types for snapshot validation.
//!
//! Only inputs that make every downstream ratio meaningless are fatal.
//! Everything recoverable is reported through
//! [`NormalizationWarning`](crate::warnings::NormalizationWarning) instead.

use thiserror::Error;

/// Fatal validation failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Spot price was not supplied.
    #[error("spot price is required")]
    MissingSpot,

    /// Spot price is zero or negative.
    #[error("spot price must be positive, got {0}")]
    NonPositiveSpot(f64),

    /// A numeric field was NaN or infinite.
    #[error("{field} must be a finite number")]
    NotFinite {
        /// Name of the offending field.
        field: &'static str,
    },

    /// A field that cannot be negative was negative.
    #[error("{field} must not be negative, got {value}")]
    Negative {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A snapshot was stamped on a day with no regular session.
    #[error("{0} is not a trading day")]
    Weekend(chrono::Weekday),

    /// A day-of-week label could not be parsed.
    #[error("unknown day of week: {0:?}")]
    UnknownDay(String),
}

/// Result alias for validation.
pub type Result<T> = std::result::Result<T, ValidationError>;
