use histvol_data::DataError;
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Analysis(#[from] histvol_core::AnalysisError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Data(DataError::Export { .. } | DataError::Render { .. }) => 10,
            Self::Data(_) => 2,
            Self::Analysis(_) => 3,
            Self::Serialization(_) | Self::Io(_) => 10,
        }
    }
}
