//! Numerical core for historical volatility analysis.
//!
//! This crate contains:
//! - Canonical domain models and validation (`PriceBar`, `PriceSeries`)
//! - The return & range calculator (`derive_series`)
//! - The volatility estimator bank (realized, Parkinson, Garman-Klass,
//!   ATR, rolling)
//! - The per-calendar-year aggregator (`summarize_by_year`)
//!
//! Everything here is pure and synchronous; loading, rendering, and export
//! live in `histvol-data` and the CLI.

pub mod aggregate;
pub mod config;
pub mod derive;
pub mod domain;
pub mod error;
pub mod estimators;

pub use aggregate::{YearStat, summarize_by_year};
pub use config::AnalysisConfig;
pub use derive::{DerivedBar, derive_series, log_returns};
pub use domain::{PriceBar, PriceSeries};
pub use error::{AnalysisError, ValidationError};
pub use estimators::{
    RollingVolatility, average_true_range, garman_klass_volatility, parkinson_volatility,
    realized_volatility, rolling_volatility,
};
