use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::derive::{DerivedBar, log_returns};
use crate::estimators;

/// Per-calendar-year statistics row.
///
/// Serializable so the exporter can round-trip it through the summary CSV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearStat {
    pub year: i32,
    pub trading_days: usize,
    pub realized_vol: f64,
    pub parkinson_vol: f64,
    pub garman_klass_vol: f64,
    pub avg_atr: f64,
    pub annualized_return: f64,
    pub min_close: f64,
    pub max_close: f64,
}

/// Year Aggregator: partition the derived series by calendar year and run
/// every estimator in the bank over each year's slice.
///
/// Partial first/last years (from the date-range filter) are included as
/// ordinary rows; `trading_days` carries the observation count so consumers
/// can judge reliability. Output is ascending by year because the input is
/// date-ordered.
pub fn summarize_by_year(bars: &[DerivedBar], config: &AnalysisConfig) -> Vec<YearStat> {
    let mut stats = Vec::new();
    let mut start = 0;

    while start < bars.len() {
        let year = bars[start].date.year();
        let mut end = start + 1;
        while end < bars.len() && bars[end].date.year() == year {
            end += 1;
        }
        stats.push(year_stat(year, &bars[start..end], config));
        start = end;
    }

    stats
}

fn year_stat(year: i32, bars: &[DerivedBar], config: &AnalysisConfig) -> YearStat {
    let returns = log_returns(bars);
    let mean_return = if returns.is_empty() {
        0.0
    } else {
        returns.iter().sum::<f64>() / returns.len() as f64
    };

    let mut min_close = f64::INFINITY;
    let mut max_close = f64::NEG_INFINITY;
    for bar in bars {
        min_close = min_close.min(bar.close);
        max_close = max_close.max(bar.close);
    }

    YearStat {
        year,
        trading_days: bars.len(),
        realized_vol: estimators::realized_volatility(&returns, config.periods_per_year),
        parkinson_vol: estimators::parkinson_volatility(bars, config.periods_per_year),
        garman_klass_vol: estimators::garman_klass_volatility(bars, config.periods_per_year),
        avg_atr: estimators::average_true_range(bars),
        annualized_return: mean_return * config.periods_per_year,
        min_close,
        max_close,
    }
}
