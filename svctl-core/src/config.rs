use std::path::{Path, PathBuf};

/// Service root used when `SVDIR` is not set.
pub const DEFAULT_SVDIR: &str = "/service";

const HISTORY_DIR: &str = "svctl";
const HISTORY_FILE: &str = "hist";

#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory relative service patterns are resolved against
    pub basedir: PathBuf,
    /// Where the prompt history is persisted, if anywhere
    pub history_path: Option<PathBuf>,
    /// Colourise state labels
    pub color: bool,
}

impl Config {
    pub fn new(basedir: impl Into<PathBuf>) -> Self {
        Self {
            basedir: basedir.into(),
            history_path: None,
            color: false,
        }
    }

    /// Resolve the service root from an explicit value or `SVDIR`.
    pub fn resolve_basedir(explicit: Option<&Path>) -> PathBuf {
        if let Some(dir) = explicit {
            return dir.to_path_buf();
        }
        match std::env::var_os("SVDIR") {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => PathBuf::from(DEFAULT_SVDIR),
        }
    }

    /// `<data dir>/svctl/hist`, if the platform has a data directory.
    pub fn default_history_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join(HISTORY_DIR).join(HISTORY_FILE))
    }

    pub fn with_history(mut self, path: Option<PathBuf>) -> Self {
        self.history_path = path;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }
}
