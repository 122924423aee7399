use std::io;

use thiserror::Error;

/// Represents the state of the writer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum WriterState {
    Initial,       // Can only write status
    StatusWritten, // Can only write headers
    HeadersOpen,   // Can append headers
    HeadersClosed, // Headers done, can only write body
    BodyWritten,   // Body written, can only complete
    Failed,        // Error occurred, no operations allowed
}

/// Represents the error that can occur during writing
#[derive(Debug, Error)]
pub enum WriterError {
    #[error("invalid writer state: {0}")]
    InvalidState(String),
    #[error("network/io error: {0}")]
    Io(#[from] io::Error),
    #[error("required header missing: {0}")]
    MissingHeader(String),
    #[error("invalid header: {0}")]
    InvalidHeader(String),
    #[error("content-length mismatch: declared {declared}, actual {actual}")]
    ContentLengthMismatch { declared: usize, actual: usize },
}
