//! Stdout rendering of the analysis results.

use histvol_core::{PriceSeries, YearStat};

use crate::cli::OutputFormat;
use crate::error::CliError;

pub fn render(
    stats: &[YearStat],
    series: &PriceSeries,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(stats)?
            } else {
                serde_json::to_string(stats)?
            };
            println!("{payload}");
        }
        OutputFormat::Table => render_table(stats, series),
    }

    Ok(())
}

fn render_table(stats: &[YearStat], series: &PriceSeries) {
    println!("{:=<94}", "");
    println!("HISTORICAL VOLATILITY SUMMARY");
    println!("{:=<94}", "");

    if let (Some(first), Some(last)) = (series.first_date(), series.last_date()) {
        println!("{} trading days from {first} to {last}", series.len());
        println!();
    }

    println!(
        "{:<6} {:>6} {:>10} {:>11} {:>13} {:>9} {:>9} {:>11} {:>11}",
        "year",
        "days",
        "realized%",
        "parkinson%",
        "garman-klass%",
        "avg_atr",
        "return%",
        "min_close",
        "max_close"
    );
    for stat in stats {
        println!(
            "{:<6} {:>6} {:>10.2} {:>11.2} {:>13.2} {:>9.2} {:>9.2} {:>11.2} {:>11.2}",
            stat.year,
            stat.trading_days,
            stat.realized_vol * 100.0,
            stat.parkinson_vol * 100.0,
            stat.garman_klass_vol * 100.0,
            stat.avg_atr,
            stat.annualized_return * 100.0,
            stat.min_close,
            stat.max_close
        );
    }

    println!();
    println!("{:=<94}", "");
    println!("OVERALL STATISTICS");
    println!("{:=<94}", "");

    if stats.is_empty() {
        return;
    }

    let avg_realized =
        stats.iter().map(|s| s.realized_vol).sum::<f64>() / stats.len() as f64 * 100.0;
    let avg_return =
        stats.iter().map(|s| s.annualized_return).sum::<f64>() / stats.len() as f64 * 100.0;

    println!("Average realized volatility: {avg_realized:>8.2}%");
    if let Some(highest) = stats
        .iter()
        .max_by(|a, b| a.realized_vol.total_cmp(&b.realized_vol))
    {
        println!(
            "Highest volatility year:     {:>8} ({:.2}%)",
            highest.year,
            highest.realized_vol * 100.0
        );
    }
    if let Some(lowest) = stats
        .iter()
        .min_by(|a, b| a.realized_vol.total_cmp(&b.realized_vol))
    {
        println!(
            "Lowest volatility year:      {:>8} ({:.2}%)",
            lowest.year,
            lowest.realized_vol * 100.0
        );
    }
    println!("Average annualized return:   {avg_return:>8.2}%");
    if let Some(best) = stats
        .iter()
        .max_by(|a, b| a.annualized_return.total_cmp(&b.annualized_return))
    {
        println!(
            "Best performing year:        {:>8} ({:.2}%)",
            best.year,
            best.annualized_return * 100.0
        );
    }
    println!("{:=<94}", "");
}
