use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors: any of these ends the run before a result is printed.
#[derive(Debug, Error)]
pub enum FlightError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed record at line {line}: {reason}")]
    Format { line: u64, reason: String },

    #[error("no passenger records to select from")]
    EmptyInput,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("{failed} of {total} chunks failed to map")]
    FailedChunks { failed: usize, total: usize },
}

/// Failure of a single map task. Isolated to its chunk.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error("row {row} of chunk {chunk} has no passenger id")]
    MissingField { chunk: usize, row: usize },

    #[error("map task for chunk {chunk} panicked: {message}")]
    Panicked { chunk: usize, message: String },
}
