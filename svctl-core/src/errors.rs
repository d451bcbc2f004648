use std::path::PathBuf;
use thiserror::Error;

/// Why a service's status could not be read. The messages are shown to the
/// user verbatim in the `ERROR` column.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StatusError {
    #[error("unable to open supervise/ok")]
    ProbeMissing,

    #[error("unable to open supervise/status")]
    StatusOpen,

    #[error("unable to read supervise/status")]
    StatusRead,

    #[error("unable to read supervise/status: wrong format")]
    WrongFormat,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ControlError {
    #[error("{base}: unable to open supervise/control")]
    Open { base: String },

    #[error("{base}: unable to write to supervise/control")]
    Write { base: String },
}

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
