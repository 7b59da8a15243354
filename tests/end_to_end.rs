//! End-to-end scenarios: synthetic CSV in, summary table and chart out.

use histvol_core::{
    AnalysisConfig, AnalysisError, derive_series, log_returns, rolling_volatility,
    summarize_by_year,
};
use histvol_data::{DataError, load_price_series, render_dashboard, write_summary};
use histvol_tests::{Row, alternating_closes, daily_rows, write_csv};
use time::macros::date;

#[test]
fn three_synthetic_years_produce_expected_volatility_profile() {
    // Given: 2021 flat prices, 2022 alternating +/-1% returns, 2023 one
    // extreme gap day (100 -> 120) in the middle of the year.
    let mut rows = daily_rows(date!(2021 - 01 - 04), &[100.0; 60]);
    rows.extend(daily_rows(
        date!(2022 - 01 - 03),
        &alternating_closes(100.0, 60),
    ));
    let mut closes_2023 = vec![100.0; 30];
    closes_2023.extend(vec![120.0; 30]);
    rows.extend(daily_rows(date!(2023 - 01 - 02), &closes_2023));
    let file = write_csv(&rows);

    // When: the full pipeline runs over the three years.
    let config = AnalysisConfig::default();
    let series = load_price_series(file.path(), config.start, config.end).expect("loads");
    let derived = derive_series(&series).expect("derives");
    let stats = summarize_by_year(&derived, &config);

    // Then: one row per year with the expected volatility ordering.
    assert_eq!(stats.len(), 3);
    assert_eq!(
        stats.iter().map(|s| s.year).collect::<Vec<_>>(),
        vec![2021, 2022, 2023]
    );
    assert_eq!(
        stats.iter().map(|s| s.trading_days).sum::<usize>(),
        series.len()
    );

    assert!(stats[0].realized_vol.abs() < 1e-9, "flat year must be ~0");
    assert!(stats[1].realized_vol > 0.0, "alternating year must be > 0");
    assert!(
        stats[2].avg_atr > stats[1].avg_atr,
        "the gap day must inflate the 2023 average true range"
    );
}

#[test]
fn missing_low_column_fails_before_any_calculation() {
    let file = {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "time,open,high,close").expect("header");
        writeln!(file, "2024-01-02,100.0,102.0,101.0").expect("row");
        file
    };

    let config = AnalysisConfig::default();
    let err = load_price_series(file.path(), config.start, config.end).expect_err("must fail");
    assert!(matches!(err, DataError::MissingColumn { column: "low", .. }));
}

#[test]
fn single_bar_series_is_insufficient_data() {
    let rows = vec![Row::around(date!(2024 - 01 - 02), 100.0)];
    let file = write_csv(&rows);

    let config = AnalysisConfig::default();
    let series = load_price_series(file.path(), config.start, config.end).expect("loads");
    let err = derive_series(&series).expect_err("must fail");
    assert_eq!(
        err,
        AnalysisError::InsufficientData {
            required: 2,
            actual: 1
        }
    );
}

#[test]
fn rolling_window_longer_than_series_is_fatal() {
    let rows = daily_rows(date!(2024 - 01 - 02), &alternating_closes(100.0, 10));
    let file = write_csv(&rows);

    let config = AnalysisConfig::default();
    let series = load_price_series(file.path(), config.start, config.end).expect("loads");
    let derived = derive_series(&series).expect("derives");
    let returns = log_returns(&derived);

    // 10 bars yield 9 returns; the default 30-day window cannot be filled.
    let err = rolling_volatility(&returns, config.rolling_window, config.periods_per_year)
        .expect_err("must fail");
    assert_eq!(
        err,
        AnalysisError::WindowTooLong {
            window: 30,
            available: 9
        }
    );
}

#[test]
fn full_run_writes_both_output_artifacts() {
    let rows = daily_rows(date!(2023 - 01 - 02), &alternating_closes(100.0, 90));
    let file = write_csv(&rows);
    let dir = tempfile::tempdir().expect("tempdir");
    let summary_path = dir.path().join("summary.csv");
    let chart_path = dir.path().join("dashboard.png");

    let config = AnalysisConfig {
        rolling_window: 20,
        ..AnalysisConfig::default()
    };
    let series = load_price_series(file.path(), config.start, config.end).expect("loads");
    let derived = derive_series(&series).expect("derives");
    let returns = log_returns(&derived);
    let rolling: Vec<Option<f64>> =
        rolling_volatility(&returns, config.rolling_window, config.periods_per_year)
            .expect("valid window")
            .collect();
    let stats = summarize_by_year(&derived, &config);

    write_summary(&summary_path, &stats).expect("writes summary");
    render_dashboard(&chart_path, &derived, &stats, &rolling, &config).expect("renders chart");

    assert!(summary_path.exists());
    assert!(std::fs::metadata(&chart_path).expect("chart exists").len() > 0);
}
