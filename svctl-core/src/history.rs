//! Prompt history, persisted one entry per line.

use std::collections::VecDeque;
use std::path::Path;

use crate::errors::HistoryError;

/// Entries kept in memory and on disk.
pub const HISTORY_LIMIT: usize = 1000;

#[derive(Debug, Clone, Default)]
pub struct History {
    entries: VecDeque<String>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from `path`. A missing file is an empty history.
    pub fn load(path: &Path) -> Result<Self, HistoryError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::new()),
            Err(source) => {
                return Err(HistoryError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let mut history = Self::new();
        for line in content.lines() {
            history.push(line);
        }
        Ok(history)
    }

    /// Record a dispatched line. Blank lines and immediate repeats are
    /// dropped.
    pub fn push(&mut self, line: &str) {
        if line.trim().is_empty() || self.entries.back().is_some_and(|last| last == line) {
            return;
        }
        if self.entries.len() == HISTORY_LIMIT {
            self.entries.pop_front();
        }
        self.entries.push_back(line.to_string());
    }

    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rewrite `path` with the current entries, creating its directory.
    pub fn save(&self, path: &Path) -> Result<(), HistoryError> {
        let io_err = |source| HistoryError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let mut content = String::new();
        for entry in &self.entries {
            content.push_str(entry);
            content.push('\n');
        }
        std::fs::write(path, content).map_err(io_err)
    }
}

#[cfg(test)]
mod tests;
