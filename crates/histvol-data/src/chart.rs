//! Six-panel volatility dashboard rendered to PNG.
//!
//! Panel layout (3 rows x 2 columns, row-major):
//! 1. Grouped bars of the three volatility estimators per year
//! 2. Volatility trend over years (lines + shaded realized area)
//! 3. Rolling realized volatility over the full range, with mean line
//! 4. Average true range per year
//! 5. Annualized return vs realized volatility scatter, labelled by year
//! 6. Overlaid histograms of daily returns for the most recent years

use std::path::Path;

use histvol_core::{AnalysisConfig, DerivedBar, YearStat};
use plotters::coord::Shift;
use plotters::prelude::*;
use time::Date;
use tracing::info;

use crate::error::DataError;

const STEEL: RGBColor = RGBColor(46, 134, 171);
const PLUM: RGBColor = RGBColor(162, 59, 114);
const AMBER: RGBColor = RGBColor(241, 143, 1);
const BRICK: RGBColor = RGBColor(199, 62, 29);
const MOSS: RGBColor = RGBColor(106, 153, 78);
const PALETTE: [RGBColor; 5] = [STEEL, PLUM, AMBER, BRICK, MOSS];

const BAR_WIDTH: f64 = 0.25;

type DrawResult = Result<(), Box<dyn std::error::Error>>;

/// Render the dashboard for an already-computed analysis.
///
/// `rolling` is the rolling-volatility sequence aligned to the return
/// series, i.e. to `bars[1..]`.
pub fn render_dashboard(
    path: &Path,
    bars: &[DerivedBar],
    stats: &[YearStat],
    rolling: &[Option<f64>],
    config: &AnalysisConfig,
) -> Result<(), DataError> {
    draw_dashboard(path, bars, stats, rolling, config).map_err(|error| DataError::Render {
        path: path.to_path_buf(),
        message: error.to_string(),
    })?;
    info!(path = %path.display(), "wrote chart");
    Ok(())
}

fn draw_dashboard(
    path: &Path,
    bars: &[DerivedBar],
    stats: &[YearStat],
    rolling: &[Option<f64>],
    config: &AnalysisConfig,
) -> DrawResult {
    let root = BitMapBackend::new(path, (1600, 1200)).into_drawing_area();
    root.fill(&WHITE)?;
    let areas = root.split_evenly((3, 2));

    draw_vol_bars(&areas[0], stats)?;
    draw_vol_trend(&areas[1], stats)?;
    draw_rolling(&areas[2], bars, rolling)?;
    draw_atr_bars(&areas[3], stats)?;
    draw_risk_return(&areas[4], stats)?;
    draw_return_histogram(&areas[5], bars, stats, config)?;

    root.present()?;
    Ok(())
}

fn draw_vol_bars(area: &DrawingArea<BitMapBackend<'_>, Shift>, stats: &[YearStat]) -> DrawResult {
    let max_pct = stats
        .iter()
        .map(|s| s.realized_vol.max(s.parkinson_vol).max(s.garman_klass_vol))
        .fold(0.0f64, f64::max)
        * 100.0;
    let y_max = if max_pct > 0.0 { max_pct * 1.15 } else { 1.0 };

    let mut chart = ChartBuilder::on(area)
        .caption("Volatility by Year", ("sans-serif", 22))
        .margin(12)
        .x_label_area_size(35)
        .y_label_area_size(55)
        .build_cartesian_2d(-0.6f64..stats.len() as f64 - 0.4, 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(stats.len())
        .x_label_formatter(&|x| year_label(stats, *x))
        .y_desc("Annualized Volatility (%)")
        .draw()?;

    type Metric = fn(&YearStat) -> f64;
    let groups: [(f64, &str, RGBColor, Metric); 3] = [
        (-BAR_WIDTH, "Realized", STEEL, |s: &YearStat| s.realized_vol),
        (0.0, "Parkinson", PLUM, |s: &YearStat| s.parkinson_vol),
        (BAR_WIDTH, "Garman-Klass", AMBER, |s: &YearStat| {
            s.garman_klass_vol
        }),
    ];

    for (offset, label, color, metric) in groups {
        chart
            .draw_series(stats.iter().enumerate().map(|(i, stat)| {
                let x0 = i as f64 + offset - BAR_WIDTH / 2.0;
                Rectangle::new(
                    [(x0, 0.0), (x0 + BAR_WIDTH, metric(stat) * 100.0)],
                    color.mix(0.8).filled(),
                )
            }))?
            .label(label)
            .legend(move |(x, y)| Rectangle::new([(x, y - 4), (x + 8, y + 4)], color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    Ok(())
}

fn draw_vol_trend(area: &DrawingArea<BitMapBackend<'_>, Shift>, stats: &[YearStat]) -> DrawResult {
    let (Some(first), Some(last)) = (stats.first(), stats.last()) else {
        return Ok(());
    };
    let x_max = if last.year > first.year {
        last.year
    } else {
        first.year + 1
    };
    let max_pct = stats
        .iter()
        .map(|s| s.realized_vol.max(s.parkinson_vol))
        .fold(0.0f64, f64::max)
        * 100.0;
    let y_max = if max_pct > 0.0 { max_pct * 1.15 } else { 1.0 };

    let mut chart = ChartBuilder::on(area)
        .caption("Volatility Trend Over Time", ("sans-serif", 22))
        .margin(12)
        .x_label_area_size(35)
        .y_label_area_size(55)
        .build_cartesian_2d(first.year..x_max, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_label_formatter(&|year| year.to_string())
        .y_desc("Volatility (%)")
        .draw()?;

    chart
        .draw_series(
            AreaSeries::new(
                stats.iter().map(|s| (s.year, s.realized_vol * 100.0)),
                0.0,
                STEEL.mix(0.2),
            )
            .border_style(STEEL.stroke_width(2)),
        )?
        .label("Realized")
        .legend(|(x, y)| PathElement::new([(x, y), (x + 12, y)], STEEL.stroke_width(2)));

    chart
        .draw_series(LineSeries::new(
            stats.iter().map(|s| (s.year, s.parkinson_vol * 100.0)),
            PLUM.stroke_width(2),
        ))?
        .label("Parkinson")
        .legend(|(x, y)| PathElement::new([(x, y), (x + 12, y)], PLUM.stroke_width(2)));

    chart.draw_series(
        stats
            .iter()
            .map(|s| Circle::new((s.year, s.realized_vol * 100.0), 4, STEEL.filled())),
    )?;
    chart.draw_series(
        stats
            .iter()
            .map(|s| Circle::new((s.year, s.parkinson_vol * 100.0), 4, PLUM.filled())),
    )?;

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    Ok(())
}

fn draw_rolling(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    bars: &[DerivedBar],
    rolling: &[Option<f64>],
) -> DrawResult {
    // Aligned to the return series, which starts at the second bar.
    let dates: Vec<Date> = bars.iter().skip(1).map(|b| b.date).collect();
    let points: Vec<(f64, f64)> = rolling
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|v| (i as f64, v * 100.0)))
        .collect();

    let max_pct = points.iter().map(|p| p.1).fold(0.0f64, f64::max);
    let y_max = if max_pct > 0.0 { max_pct * 1.15 } else { 1.0 };
    let mean = if points.is_empty() {
        0.0
    } else {
        points.iter().map(|p| p.1).sum::<f64>() / points.len() as f64
    };

    let mut chart = ChartBuilder::on(area)
        .caption("Rolling Realized Volatility", ("sans-serif", 22))
        .margin(12)
        .x_label_area_size(35)
        .y_label_area_size(55)
        .build_cartesian_2d(0f64..dates.len().max(1) as f64, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_label_formatter(&|x| {
            dates
                .get(x.round() as usize)
                .map(|d| d.year().to_string())
                .unwrap_or_default()
        })
        .y_desc("Rolling Volatility (%)")
        .draw()?;

    chart.draw_series(LineSeries::new(points.iter().copied(), &STEEL))?;

    chart
        .draw_series(LineSeries::new(
            [(0.0, mean), (dates.len() as f64, mean)],
            BRICK.stroke_width(2),
        ))?
        .label(format!("Mean: {mean:.1}%"))
        .legend(|(x, y)| PathElement::new([(x, y), (x + 12, y)], BRICK.stroke_width(2)));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    Ok(())
}

fn draw_atr_bars(area: &DrawingArea<BitMapBackend<'_>, Shift>, stats: &[YearStat]) -> DrawResult {
    let max_atr = stats.iter().map(|s| s.avg_atr).fold(0.0f64, f64::max);
    let y_max = if max_atr > 0.0 { max_atr * 1.15 } else { 1.0 };

    let mut chart = ChartBuilder::on(area)
        .caption("Average True Range by Year", ("sans-serif", 22))
        .margin(12)
        .x_label_area_size(35)
        .y_label_area_size(55)
        .build_cartesian_2d(-0.6f64..stats.len() as f64 - 0.4, 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(stats.len())
        .x_label_formatter(&|x| year_label(stats, *x))
        .y_desc("Average ATR (price units)")
        .draw()?;

    chart.draw_series(stats.iter().enumerate().map(|(i, stat)| {
        let x0 = i as f64 - 0.35;
        Rectangle::new([(x0, 0.0), (x0 + 0.7, stat.avg_atr)], AMBER.mix(0.8).filled())
    }))?;
    Ok(())
}

fn draw_risk_return(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    stats: &[YearStat],
) -> DrawResult {
    let xs: Vec<f64> = stats.iter().map(|s| s.realized_vol * 100.0).collect();
    let ys: Vec<f64> = stats.iter().map(|s| s.annualized_return * 100.0).collect();

    let x_max = xs.iter().copied().fold(0.0f64, f64::max);
    let x_max = if x_max > 0.0 { x_max * 1.2 } else { 1.0 };
    let y_lo = ys.iter().copied().fold(0.0f64, f64::min);
    let y_hi = ys.iter().copied().fold(0.0f64, f64::max);
    let span = (y_hi - y_lo).max(1.0);
    let (y_min, y_max) = (y_lo - span * 0.15, y_hi + span * 0.15);

    let mut chart = ChartBuilder::on(area)
        .caption("Risk-Return Profile by Year", ("sans-serif", 22))
        .margin(12)
        .x_label_area_size(35)
        .y_label_area_size(55)
        .build_cartesian_2d(0f64..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Realized Volatility (%)")
        .y_desc("Annualized Return (%)")
        .draw()?;

    chart.draw_series(LineSeries::new(
        [(0.0, 0.0), (x_max, 0.0)],
        BRICK.mix(0.5).stroke_width(1),
    ))?;

    chart.draw_series(
        xs.iter()
            .zip(&ys)
            .map(|(&x, &y)| Circle::new((x, y), 8, STEEL.mix(0.6).filled())),
    )?;

    chart.draw_series(stats.iter().zip(xs.iter().zip(&ys)).map(|(stat, (&x, &y))| {
        Text::new(stat.year.to_string(), (x, y), ("sans-serif", 13))
    }))?;
    Ok(())
}

fn draw_return_histogram(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    bars: &[DerivedBar],
    stats: &[YearStat],
    config: &AnalysisConfig,
) -> DrawResult {
    let mut recent: Vec<i32> = stats
        .iter()
        .rev()
        .take(config.histogram_years.max(1))
        .map(|s| s.year)
        .collect();
    recent.reverse();

    let mut per_year: Vec<(i32, Vec<f64>)> =
        recent.iter().map(|&year| (year, Vec::new())).collect();
    for bar in bars {
        if let Some(log_return) = bar.log_return {
            if let Some(slot) = per_year
                .iter_mut()
                .find(|(year, _)| *year == bar.date.year())
            {
                slot.1.push(log_return * 100.0);
            }
        }
    }

    let all: Vec<f64> = per_year.iter().flat_map(|(_, r)| r.iter().copied()).collect();
    let (Some(&lo), Some(&hi)) = (
        all.iter().min_by(|a, b| a.total_cmp(b)),
        all.iter().max_by(|a, b| a.total_cmp(b)),
    ) else {
        return Ok(());
    };
    let (lo, hi) = if hi > lo { (lo, hi) } else { (lo - 0.5, lo + 0.5) };

    const BINS: usize = 50;
    let bin_width = (hi - lo) / BINS as f64;

    let counted: Vec<(i32, Vec<usize>)> = per_year
        .iter()
        .map(|(year, returns)| {
            let mut counts = vec![0usize; BINS];
            for &value in returns {
                let idx = (((value - lo) / bin_width) as usize).min(BINS - 1);
                counts[idx] += 1;
            }
            (*year, counts)
        })
        .collect();

    let y_max = counted
        .iter()
        .flat_map(|(_, counts)| counts.iter().copied())
        .max()
        .unwrap_or(0)
        .max(1) as f64;

    let mut chart = ChartBuilder::on(area)
        .caption("Distribution of Daily Returns", ("sans-serif", 22))
        .margin(12)
        .x_label_area_size(35)
        .y_label_area_size(55)
        .build_cartesian_2d(lo..hi, 0f64..y_max * 1.1)?;

    chart
        .configure_mesh()
        .x_desc("Daily Return (%)")
        .y_desc("Frequency")
        .draw()?;

    for (k, (year, counts)) in counted.iter().enumerate() {
        let color = PALETTE[k % PALETTE.len()];
        chart
            .draw_series(counts.iter().enumerate().filter(|(_, &c)| c > 0).map(
                |(b, &count)| {
                    let x0 = lo + b as f64 * bin_width;
                    Rectangle::new(
                        [(x0, 0.0), (x0 + bin_width, count as f64)],
                        color.mix(0.45).filled(),
                    )
                },
            ))?
            .label(year.to_string())
            .legend(move |(x, y)| Rectangle::new([(x, y - 4), (x + 8, y + 4)], color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    Ok(())
}

fn year_label(stats: &[YearStat], x: f64) -> String {
    let nearest = x.round();
    if (x - nearest).abs() > 0.3 || nearest < 0.0 {
        return String::new();
    }
    stats
        .get(nearest as usize)
        .map(|s| s.year.to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use histvol_core::{
        AnalysisConfig, PriceBar, PriceSeries, derive_series, log_returns, rolling_volatility,
        summarize_by_year,
    };
    use time::Duration;
    use time::macros::date;

    use super::*;

    #[test]
    fn renders_non_empty_png() {
        let bars: Vec<PriceBar> = (0..80)
            .map(|i| {
                let date = date!(2023 - 01 - 02)
                    .checked_add(Duration::days(i))
                    .expect("in range");
                let close = 100.0 + (i as f64 * 0.7).sin() * 3.0;
                PriceBar::new(date, close, close + 1.5, close - 1.5, close).expect("valid bar")
            })
            .collect();

        let series = PriceSeries::new(bars).expect("valid series");
        let derived = derive_series(&series).expect("derives");
        let config = AnalysisConfig {
            rolling_window: 10,
            ..AnalysisConfig::default()
        };
        let stats = summarize_by_year(&derived, &config);
        let returns = log_returns(&derived);
        let rolling: Vec<Option<f64>> =
            rolling_volatility(&returns, config.rolling_window, config.periods_per_year)
                .expect("valid window")
                .collect();

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("dashboard.png");
        render_dashboard(&path, &derived, &stats, &rolling, &config).expect("renders");

        let metadata = std::fs::metadata(&path).expect("file exists");
        assert!(metadata.len() > 0);
    }
}
