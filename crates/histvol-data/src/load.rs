//! CSV ingest: turn a date-indexed OHLC export into a validated
//! `PriceSeries` filtered to the configured range.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use csv::StringRecord;
use histvol_core::{PriceBar, PriceSeries};
use time::Date;
use time::macros::format_description;
use tracing::info;

use crate::error::DataError;

const REQUIRED_COLUMNS: [&str; 5] = ["time", "open", "high", "low", "close"];

/// Load daily OHLC bars from `path` and keep those inside `[start, end]`.
///
/// The header lookup is case-insensitive and BOM-tolerant; dates must be
/// ISO `YYYY-MM-DD` (an RFC3339 timestamp is accepted by truncating at the
/// `T`). Any unreadable file, missing column, or malformed row is fatal:
/// there is no partial-success mode.
pub fn load_price_series(path: &Path, start: Date, end: Date) -> Result<PriceSeries, DataError> {
    let file = File::open(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|source| DataError::Csv {
            path: path.to_path_buf(),
            source,
        })?
        .clone();
    let header_map = build_header_map(&headers);

    for column in REQUIRED_COLUMNS {
        if !header_map.contains_key(column) {
            return Err(DataError::MissingColumn {
                column,
                path: path.to_path_buf(),
            });
        }
    }

    let mut bars = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // records() starts on the line after the header; CSV lines are 1-based.
        let line = idx + 2;
        let record = result.map_err(|source| DataError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        bars.push(parse_bar(&record, &header_map, line)?);
    }

    let loaded = bars.len();
    let series = PriceSeries::new(bars)?.filter_range(start, end);
    info!(
        path = %path.display(),
        rows = loaded,
        in_range = series.len(),
        "loaded price series"
    );

    Ok(series)
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports sometimes prefix the first header with a UTF-8 BOM;
    // without stripping it the `time` column would look missing.
    name.trim().trim_start_matches('\u{feff}').to_ascii_lowercase()
}

fn parse_bar(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
    line: usize,
) -> Result<PriceBar, DataError> {
    let date = parse_date(get_field(record, header_map, "time", line)?, line)?;
    let open = parse_price(record, header_map, "open", line)?;
    let high = parse_price(record, header_map, "high", line)?;
    let low = parse_price(record, header_map, "low", line)?;
    let close = parse_price(record, header_map, "close", line)?;

    PriceBar::new(date, open, high, low, close).map_err(|error| DataError::Row {
        line,
        message: error.to_string(),
    })
}

fn get_field<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &'static str,
    line: usize,
) -> Result<&'a str, DataError> {
    header_map
        .get(name)
        .and_then(|idx| record.get(*idx))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| DataError::Row {
            line,
            message: format!("missing value for column '{name}'"),
        })
}

fn parse_price(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
    name: &'static str,
    line: usize,
) -> Result<f64, DataError> {
    let raw = get_field(record, header_map, name, line)?;
    raw.parse::<f64>().map_err(|_| DataError::Row {
        line,
        message: format!("invalid number '{raw}' for column '{name}'"),
    })
}

fn parse_date(raw: &str, line: usize) -> Result<Date, DataError> {
    let date_part = raw.split('T').next().unwrap_or(raw);
    Date::parse(date_part, format_description!("[year]-[month]-[day]")).map_err(|_| {
        DataError::Date {
            line,
            value: raw.to_owned(),
        }
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use time::macros::date;

    use super::*;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write csv");
        file
    }

    #[test]
    fn loads_and_filters_valid_csv() {
        let file = write_csv(
            "time,open,high,low,close\n\
             2014-12-31,99.0,100.0,98.0,99.5\n\
             2024-01-02,100.0,102.0,99.0,101.0\n\
             2024-01-03,101.0,103.0,100.0,102.0\n",
        );

        let series =
            load_price_series(file.path(), date!(2015 - 01 - 01), date!(2025 - 12 - 31))
                .expect("loads");
        assert_eq!(series.len(), 2);
        assert_eq!(series.first_date(), Some(date!(2024 - 01 - 02)));
    }

    #[test]
    fn accepts_rfc3339_timestamps_and_bom() {
        let file = write_csv(
            "\u{feff}time,open,high,low,close\n\
             2024-01-02T00:00:00Z,100.0,102.0,99.0,101.0\n\
             2024-01-03T00:00:00Z,101.0,103.0,100.0,102.0\n",
        );

        let series =
            load_price_series(file.path(), date!(2015 - 01 - 01), date!(2025 - 12 - 31))
                .expect("loads");
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn missing_column_is_fatal() {
        let file = write_csv("time,open,high,close\n2024-01-02,100.0,102.0,101.0\n");

        let err = load_price_series(file.path(), date!(2015 - 01 - 01), date!(2025 - 12 - 31))
            .expect_err("must fail");
        assert!(matches!(err, DataError::MissingColumn { column: "low", .. }));
    }

    #[test]
    fn malformed_row_is_fatal_with_line_number() {
        let file = write_csv(
            "time,open,high,low,close\n\
             2024-01-02,100.0,102.0,99.0,101.0\n\
             2024-01-03,not_a_number,103.0,100.0,102.0\n",
        );

        let err = load_price_series(file.path(), date!(2015 - 01 - 01), date!(2025 - 12 - 31))
            .expect_err("must fail");
        assert!(matches!(err, DataError::Row { line: 3, .. }));
    }

    #[test]
    fn out_of_order_dates_are_fatal() {
        let file = write_csv(
            "time,open,high,low,close\n\
             2024-01-03,100.0,102.0,99.0,101.0\n\
             2024-01-02,101.0,103.0,100.0,102.0\n",
        );

        let err = load_price_series(file.path(), date!(2015 - 01 - 01), date!(2025 - 12 - 31))
            .expect_err("must fail");
        assert!(matches!(err, DataError::Validation(_)));
    }
}
