mod cli;
mod error;
mod report;

use clap::Parser;
use histvol_core::{derive_series, log_returns, rolling_volatility, summarize_by_year};
use histvol_data::{load_price_series, render_dashboard, write_summary};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::error::CliError;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(error) = run() {
        eprintln!("error: {error}");
        std::process::exit(error.exit_code());
    }
}

fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    let config = cli.analysis_config();

    let series = load_price_series(&cli.input, config.start, config.end)?;
    let derived = derive_series(&series)?;
    let returns = log_returns(&derived);
    let rolling: Vec<Option<f64>> =
        rolling_volatility(&returns, config.rolling_window, config.periods_per_year)?.collect();
    let stats = summarize_by_year(&derived, &config);
    info!(years = stats.len(), "computed volatility metrics");

    report::render(&stats, &series, cli.format, cli.pretty)?;
    write_summary(&cli.summary_out, &stats)?;
    render_dashboard(&cli.chart_out, &derived, &stats, &rolling, &config)?;

    Ok(())
}
