use thiserror::Error;
use time::Date;

/// Validation and contract errors exposed by `histvol-core`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be positive")]
    NonPositiveValue { field: &'static str },

    #[error("bar high must be >= low")]
    InvalidBarRange,
    #[error("bar open/close must be within high/low range")]
    InvalidBarBounds,

    #[error("bar dates must be strictly increasing: {prev} followed by {next}")]
    NonIncreasingDates { prev: Date, next: Date },
}

/// Computation errors from the calculator, estimator bank, and aggregator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("insufficient data: {actual} bar(s) available, {required} required")]
    InsufficientData { required: usize, actual: usize },

    #[error("rolling window {window} exceeds available series length {available}")]
    WindowTooLong { window: usize, available: usize },

    #[error("rolling window must be non-zero")]
    InvalidWindow,
}
