//! CLI argument definitions for histvol.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use histvol_core::AnalysisConfig;
use time::Date;
use time::macros::format_description;

/// Historical volatility analyzer for daily OHLC data.
///
/// Loads a CSV of daily price bars, computes annualized volatility metrics
/// per calendar year (realized, Parkinson, Garman-Klass, ATR), writes a
/// summary table and a six-panel chart, and prints a report to stdout.
#[derive(Debug, Parser)]
#[command(
    name = "histvol",
    author,
    version,
    about = "Historical volatility analysis for daily OHLC CSV data"
)]
pub struct Cli {
    /// Input CSV with at least time, open, high, low, close columns.
    pub input: PathBuf,

    /// Inclusive start of the date-range filter (YYYY-MM-DD).
    #[arg(long, value_parser = parse_date, default_value = "2015-01-01")]
    pub start: Date,

    /// Inclusive end of the date-range filter (YYYY-MM-DD).
    #[arg(long, value_parser = parse_date, default_value = "2025-12-31")]
    pub end: Date,

    /// Rolling volatility window length in trading days.
    #[arg(long, default_value_t = 30)]
    pub window: usize,

    /// Trading periods per year used for annualization.
    #[arg(long, default_value_t = 252.0)]
    pub periods_per_year: f64,

    /// How many most-recent years the returns histogram panel shows.
    #[arg(long, default_value_t = 5)]
    pub histogram_years: usize,

    /// Output path for the per-year summary table.
    #[arg(long, default_value = "volatility_summary.csv")]
    pub summary_out: PathBuf,

    /// Output path for the rendered chart.
    #[arg(long, default_value = "volatility_analysis.png")]
    pub chart_out: PathBuf,

    /// Output format for the stdout report.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, default_value_t = false)]
    pub pretty: bool,
}

impl Cli {
    pub fn analysis_config(&self) -> AnalysisConfig {
        AnalysisConfig {
            start: self.start,
            end: self.end,
            rolling_window: self.window,
            periods_per_year: self.periods_per_year,
            histogram_years: self.histogram_years,
        }
    }
}

/// Output format options for the stdout report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table with an overall statistics block.
    Table,
    /// JSON document of the summary rows.
    Json,
}

fn parse_date(raw: &str) -> Result<Date, String> {
    Date::parse(raw, format_description!("[year]-[month]-[day]"))
        .map_err(|_| format!("invalid date '{raw}', expected YYYY-MM-DD"))
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    #[test]
    fn parses_iso_date() {
        assert_eq!(parse_date("2021-06-15").expect("parses"), date!(2021 - 06 - 15));
    }

    #[test]
    fn rejects_malformed_date() {
        assert!(parse_date("15/06/2021").is_err());
    }
}
