//! Flat-file export of the per-year summary table.

use std::path::Path;

use histvol_core::YearStat;
use tracing::info;

use crate::error::DataError;

/// Write the summary table as CSV, one row per year, ascending.
///
/// Column order is fixed by the `YearStat` field order: year, trading_days,
/// realized_vol, parkinson_vol, garman_klass_vol, avg_atr,
/// annualized_return, min_close, max_close.
pub fn write_summary(path: &Path, stats: &[YearStat]) -> Result<(), DataError> {
    let mut writer = csv::Writer::from_path(path).map_err(|source| DataError::Export {
        path: path.to_path_buf(),
        source,
    })?;

    for stat in stats {
        writer.serialize(stat).map_err(|source| DataError::Export {
            path: path.to_path_buf(),
            source,
        })?;
    }

    writer.flush().map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), years = stats.len(), "wrote summary table");
    Ok(())
}

/// Read a previously exported summary table back into memory.
pub fn read_summary(path: &Path) -> Result<Vec<YearStat>, DataError> {
    let mut reader = csv::Reader::from_path(path).map_err(|source| DataError::Csv {
        path: path.to_path_buf(),
        source,
    })?;

    reader
        .deserialize()
        .collect::<Result<Vec<YearStat>, csv::Error>>()
        .map_err(|source| DataError::Csv {
            path: path.to_path_buf(),
            source,
        })
}
