use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Service directory not found: {path}: {source}")]
    BaseDirNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Service directory is not a directory: {0}")]
    BaseDirNotDir(PathBuf),

    #[error("Giving up on unreadable input: {0}")]
    Input(#[source] std::io::Error),

    #[error("Cannot start line editor: {0}")]
    Editor(#[from] rustyline::error::ReadlineError),
}

pub type Result<T> = std::result::Result<T, CliError>;
