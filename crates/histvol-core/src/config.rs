use time::macros::date;
use time::Date;

/// Explicit analysis parameters.
///
/// Everything that was a module-level constant in earlier iterations of this
/// tool lives here so the core stays testable without environment setup. The
/// CLI surfaces each field as a flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisConfig {
    /// Inclusive start of the date-range filter.
    pub start: Date,
    /// Inclusive end of the date-range filter.
    pub end: Date,
    /// Trailing window length for rolling volatility, in trading days.
    pub rolling_window: usize,
    /// Trading periods per year used for annualization (sqrt scaling).
    pub periods_per_year: f64,
    /// How many most-recent years to include in the returns histogram panel.
    pub histogram_years: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            start: date!(2015 - 01 - 01),
            end: date!(2025 - 12 - 31),
            rolling_window: 30,
            periods_per_year: 252.0,
            histogram_years: 5,
        }
    }
}

impl AnalysisConfig {
    /// Annualization multiplier applied to per-period volatility.
    pub fn annualization_factor(&self) -> f64 {
        self.periods_per_year.sqrt()
    }
}
