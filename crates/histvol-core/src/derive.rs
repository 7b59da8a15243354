use time::Date;

use crate::AnalysisError;
use crate::domain::PriceSeries;

/// Per-bar quantities derived from a `PriceBar` and its predecessor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedBar {
    pub date: Date,
    pub close: f64,
    /// `ln(close_t / close_{t-1})`; `None` on the first bar.
    pub log_return: Option<f64>,
    /// `ln(high / low)`.
    pub log_hl: f64,
    /// `ln(close / open)`.
    pub log_co: f64,
    /// Largest of `high - low`, `|high - prev_close|`, `|low - prev_close|`.
    /// The first bar has no previous close and falls back to `high - low`.
    pub true_range: f64,
}

/// Return & Range Calculator.
///
/// Produces one `DerivedBar` per input bar, aligned to the series. Pure;
/// fails only when fewer than 2 bars are supplied, since no return can be
/// computed from a single observation.
pub fn derive_series(series: &PriceSeries) -> Result<Vec<DerivedBar>, AnalysisError> {
    let bars = series.bars();
    if bars.len() < 2 {
        return Err(AnalysisError::InsufficientData {
            required: 2,
            actual: bars.len(),
        });
    }

    let mut derived = Vec::with_capacity(bars.len());
    let mut prev_close: Option<f64> = None;

    for bar in bars {
        let log_return = prev_close.map(|prev| (bar.close / prev).ln());
        let true_range = match prev_close {
            Some(prev) => (bar.high - bar.low)
                .max((bar.high - prev).abs())
                .max((bar.low - prev).abs()),
            None => bar.high - bar.low,
        };

        derived.push(DerivedBar {
            date: bar.date,
            close: bar.close,
            log_return,
            log_hl: (bar.high / bar.low).ln(),
            log_co: (bar.close / bar.open).ln(),
            true_range,
        });
        prev_close = Some(bar.close);
    }

    Ok(derived)
}

/// Defined log returns of a window, in order.
pub fn log_returns(bars: &[DerivedBar]) -> Vec<f64> {
    bars.iter().filter_map(|bar| bar.log_return).collect()
}
