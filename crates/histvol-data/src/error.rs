use std::path::PathBuf;

use thiserror::Error;

/// Errors from the I/O collaborators: loader, exporter, and renderer.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("missing required column '{column}' in '{path}'")]
    MissingColumn { column: &'static str, path: PathBuf },

    #[error("malformed CSV in '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("row {line}: {message}")]
    Row { line: usize, message: String },

    #[error("row {line}: invalid date '{value}', expected YYYY-MM-DD")]
    Date { line: usize, value: String },

    #[error(transparent)]
    Validation(#[from] histvol_core::ValidationError),

    #[error("failed to write summary '{path}': {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to render chart '{path}': {message}")]
    Render { path: PathBuf, message: String },
}
