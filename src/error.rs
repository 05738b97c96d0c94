//! Error types for the analysis pipeline.

use std::path::PathBuf;

use thiserror::Error;

use crate::k_means::KMeansParamsError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot read input file {}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Malformed input table. `line` is 1-based and counts the header row.
    #[error("malformed input at line {line}: {reason}")]
    Format { line: usize, reason: String },
    #[error("column '{0}' has zero variance and cannot be standardized")]
    DegenerateColumn(String),
    #[error("invalid cluster count: k = {k} for {n} entities")]
    InvalidClusterCount { k: usize, n: usize },
    #[error("dataset contains no observations")]
    EmptyDataset,
    #[error("invalid hyperparameter: {0}")]
    InvalidParams(#[from] KMeansParamsError),
    #[error("failed to write report")]
    Report(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::FileAccess {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn format(line: usize, reason: impl Into<String>) -> Self {
        Error::Format {
            line,
            reason: reason.into(),
        }
    }
}
