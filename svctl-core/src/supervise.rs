//! File-level access to one service's `supervise/` directory.

use std::fs::File;
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use svctl_protocol::{STATUS_LEN, Status};
use svctl_unix::fifo;
use tracing::debug;

use crate::errors::{ControlError, StatusError};

const SUPERVISE_OK: &str = "supervise/ok";
const SUPERVISE_STATUS: &str = "supervise/status";
const SUPERVISE_CONTROL: &str = "supervise/control";

/// A service directory plus the name it is shown under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDir {
    path: PathBuf,
    name: String,
}

impl ServiceDir {
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Last path component, used to prefix control errors.
    pub fn base(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Probe `supervise/ok`, then read and decode `supervise/status`.
    pub async fn read_status(&self) -> Result<Status, StatusError> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || read_status(&path))
            .await
            .unwrap_or(Err(StatusError::StatusRead))
    }

    /// Write all of `action` to `supervise/control` in a single call.
    pub async fn write_control(&self, action: &'static [u8]) -> Result<(), ControlError> {
        let path = self.path.clone();
        let base = self.base();
        let write_base = base.clone();
        tokio::task::spawn_blocking(move || write_control(&path, action, write_base))
            .await
            .unwrap_or(Err(ControlError::Write { base }))
    }
}

/// Blocking status read. runsv must be attached (`supervise/ok` has a
/// reader) before the record is trusted.
pub fn read_status(dir: &Path) -> Result<Status, StatusError> {
    if let Err(e) = fifo::open_writer(&dir.join(SUPERVISE_OK)) {
        if fifo::is_no_reader(&e) {
            debug!("{}: runsv not attached", dir.display());
        } else {
            debug!("{}: cannot open {}: {}", dir.display(), SUPERVISE_OK, e);
        }
        return Err(StatusError::ProbeMissing);
    }

    let mut file =
        File::open(dir.join(SUPERVISE_STATUS)).map_err(|_| StatusError::StatusOpen)?;
    let mut buf = [0u8; STATUS_LEN];
    file.read_exact(&mut buf).map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => StatusError::WrongFormat,
        _ => StatusError::StatusRead,
    })?;

    Status::decode(&buf).map_err(|_| StatusError::WrongFormat)
}

/// Blocking control write.
pub fn write_control(dir: &Path, action: &[u8], base: String) -> Result<(), ControlError> {
    let mut file = match fifo::open_writer(&dir.join(SUPERVISE_CONTROL)) {
        Ok(f) => f,
        Err(e) => {
            debug!("{}: cannot open {}: {}", dir.display(), SUPERVISE_CONTROL, e);
            return Err(ControlError::Open { base });
        }
    };

    match file.write(action) {
        Ok(n) if n == action.len() => Ok(()),
        Ok(n) => {
            debug!("{}: short control write ({} of {})", dir.display(), n, action.len());
            Err(ControlError::Write { base })
        }
        Err(e) => {
            debug!("{}: control write failed: {}", dir.display(), e);
            Err(ControlError::Write { base })
        }
    }
}
