//! The estimator bank: stateless pure functions over a finite window.
//!
//! Each estimator consumes a window of derived bars (or of log returns) and
//! returns an annualized volatility scalar; the rolling variant yields a
//! lazy sequence aligned to its input. Keeping them free functions with a
//! common shape lets the year aggregator call each one without knowing its
//! internals.

use tracing::warn;

use crate::AnalysisError;
use crate::derive::DerivedBar;

/// Annualized close-to-close realized volatility.
///
/// Sample standard deviation (n-1 denominator) of log returns scaled by
/// `sqrt(periods_per_year)`. With exactly one return the standard deviation
/// is 0 by convention, and an empty window also reports 0; partial calendar
/// years therefore produce a value instead of aborting, with the day count
/// reported alongside so consumers can judge reliability.
pub fn realized_volatility(returns: &[f64], periods_per_year: f64) -> f64 {
    if returns.len() < 2 {
        return 0.0;
    }

    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean) * (r - mean)).sum::<f64>() / (n - 1.0);
    variance.sqrt() * periods_per_year.sqrt()
}

/// Annualized Parkinson volatility: `sqrt(mean(ln(high/low)^2) / (4 ln 2))`.
///
/// Range-based, so it never goes negative; the radicand is a mean of squares.
pub fn parkinson_volatility(bars: &[DerivedBar], periods_per_year: f64) -> f64 {
    if bars.is_empty() {
        return 0.0;
    }

    let mean_sq = bars.iter().map(|bar| bar.log_hl * bar.log_hl).sum::<f64>() / bars.len() as f64;
    (mean_sq / (4.0 * 2.0_f64.ln())).sqrt() * periods_per_year.sqrt()
}

/// Annualized Garman-Klass volatility.
///
/// Mean over the window of `0.5*HL^2 - (2 ln 2 - 1)*CO^2` where
/// `HL = ln(high/low)` and `CO = ln(close/open)`. A pathological bar (open
/// at the high or low) can push its radicand negative; the mean is floored
/// at zero before the square root so the estimator degrades to 0 instead of
/// propagating a NaN. Offending bars are logged with their dates.
pub fn garman_klass_volatility(bars: &[DerivedBar], periods_per_year: f64) -> f64 {
    if bars.is_empty() {
        return 0.0;
    }

    let k = 2.0 * 2.0_f64.ln() - 1.0;
    let mut sum = 0.0;
    for bar in bars {
        let radicand = 0.5 * bar.log_hl * bar.log_hl - k * bar.log_co * bar.log_co;
        if radicand < 0.0 {
            warn!(
                date = %bar.date,
                radicand,
                "negative Garman-Klass radicand; window mean is floored at zero"
            );
        }
        sum += radicand;
    }

    let mean = (sum / bars.len() as f64).max(0.0);
    mean.sqrt() * periods_per_year.sqrt()
}

/// Mean true range over the window, in absolute price units (not annualized).
pub fn average_true_range(bars: &[DerivedBar]) -> f64 {
    if bars.is_empty() {
        return 0.0;
    }
    bars.iter().map(|bar| bar.true_range).sum::<f64>() / bars.len() as f64
}

/// Realized volatility over a trailing window, re-evaluated at every return.
///
/// The iterator is aligned to the input returns: the first `window - 1`
/// positions yield `None` because insufficient history exists, every later
/// position yields the annualized volatility of the trailing `window`
/// returns. Lazy and non-restartable, like any by-value iterator.
pub fn rolling_volatility(
    returns: &[f64],
    window: usize,
    periods_per_year: f64,
) -> Result<RollingVolatility<'_>, AnalysisError> {
    if window == 0 {
        return Err(AnalysisError::InvalidWindow);
    }
    if window > returns.len() {
        return Err(AnalysisError::WindowTooLong {
            window,
            available: returns.len(),
        });
    }

    Ok(RollingVolatility {
        returns,
        window,
        periods_per_year,
        pos: 0,
    })
}

/// See [`rolling_volatility`].
#[derive(Debug, Clone)]
pub struct RollingVolatility<'a> {
    returns: &'a [f64],
    window: usize,
    periods_per_year: f64,
    pos: usize,
}

impl Iterator for RollingVolatility<'_> {
    type Item = Option<f64>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.returns.len() {
            return None;
        }

        let item = if self.pos + 1 < self.window {
            None
        } else {
            let start = self.pos + 1 - self.window;
            Some(realized_volatility(
                &self.returns[start..=self.pos],
                self.periods_per_year,
            ))
        };
        self.pos += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.returns.len() - self.pos;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RollingVolatility<'_> {}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    fn derived(log_hl: f64, log_co: f64) -> DerivedBar {
        DerivedBar {
            date: date!(2024 - 01 - 02),
            close: 100.0,
            log_return: None,
            log_hl,
            log_co,
            true_range: 1.0,
        }
    }

    #[test]
    fn realized_is_zero_for_identical_returns() {
        let returns = vec![0.01; 20];
        assert_eq!(realized_volatility(&returns, 252.0), 0.0);
    }

    #[test]
    fn realized_is_positive_for_varying_returns() {
        let returns = [0.01, -0.01, 0.02, -0.02];
        assert!(realized_volatility(&returns, 252.0) > 0.0);
    }

    #[test]
    fn realized_single_return_is_zero_by_convention() {
        assert_eq!(realized_volatility(&[0.05], 252.0), 0.0);
        assert_eq!(realized_volatility(&[], 252.0), 0.0);
    }

    #[test]
    fn realized_matches_hand_computed_sample_std() {
        let returns = [0.01, 0.03];
        // mean 0.02, sample variance (0.0001 + 0.0001) / 1 = 2e-4
        let expected = (2e-4_f64).sqrt() * 252.0_f64.sqrt();
        assert!((realized_volatility(&returns, 252.0) - expected).abs() < 1e-12);
    }

    #[test]
    fn parkinson_is_non_negative() {
        let bars = vec![derived(0.02, 0.01), derived(0.0, 0.0)];
        assert!(parkinson_volatility(&bars, 252.0) >= 0.0);
        assert_eq!(parkinson_volatility(&[], 252.0), 0.0);
    }

    #[test]
    fn garman_klass_clamps_negative_mean_radicand() {
        // Open at the high with a wide close-open move: the CO term dominates
        // and the radicand goes negative.
        let bars = vec![derived(0.001, 0.05)];
        let vol = garman_klass_volatility(&bars, 252.0);
        assert_eq!(vol, 0.0);
        assert!(!vol.is_nan());
    }

    #[test]
    fn garman_klass_positive_for_ordinary_bars() {
        let bars = vec![derived(0.02, 0.005), derived(0.015, 0.002)];
        assert!(garman_klass_volatility(&bars, 252.0) > 0.0);
    }

    #[test]
    fn atr_is_plain_mean_of_true_range() {
        let mut bars = vec![derived(0.01, 0.0), derived(0.01, 0.0)];
        bars[0].true_range = 2.0;
        bars[1].true_range = 4.0;
        assert!((average_true_range(&bars) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn rolling_has_window_minus_one_leading_gaps() {
        let returns: Vec<f64> = (0..10).map(|i| 0.001 * i as f64).collect();
        let values: Vec<Option<f64>> =
            rolling_volatility(&returns, 4, 252.0).expect("valid window").collect();

        assert_eq!(values.len(), 10);
        assert_eq!(values.iter().take_while(|v| v.is_none()).count(), 3);
        assert!(values[3..].iter().all(Option::is_some));
    }

    #[test]
    fn rolling_rejects_window_longer_than_series() {
        let returns = [0.01, 0.02];
        let err = rolling_volatility(&returns, 3, 252.0).expect_err("must fail");
        assert_eq!(
            err,
            AnalysisError::WindowTooLong {
                window: 3,
                available: 2
            }
        );
    }

    #[test]
    fn rolling_rejects_zero_window() {
        let err = rolling_volatility(&[0.01], 0, 252.0).expect_err("must fail");
        assert_eq!(err, AnalysisError::InvalidWindow);
    }
}
