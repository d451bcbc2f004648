//! Where command results go.
//!
//! Waiters run concurrently and share one sink; every call emits a whole
//! line so output from different services only interleaves at line
//! boundaries.

use std::io::Write;
use std::sync::Mutex;

use tracing::warn;

pub trait Output: Send + Sync {
    /// Emit one complete line (without trailing newline).
    fn line(&self, line: &str);

    /// Show the input prompt. No newline is appended.
    fn prompt(&self, _prompt: &str) {}
}

/// Writes to the process stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutOutput;

impl Output for StdoutOutput {
    fn line(&self, line: &str) {
        if let Err(e) = write_line(&mut std::io::stdout().lock(), line) {
            warn!("error writing to stdout: {}", e);
        }
    }

    fn prompt(&self, prompt: &str) {
        if let Err(e) = write_prompt(&mut std::io::stdout().lock(), prompt) {
            warn!("error writing prompt: {}", e);
        }
    }
}

fn write_line(out: &mut impl Write, line: &str) -> std::io::Result<()> {
    writeln!(out, "{line}")
}

fn write_prompt(out: &mut impl Write, prompt: &str) -> std::io::Result<()> {
    write!(out, "{prompt}")?;
    out.flush()
}

/// Keeps every emitted line in memory.
#[derive(Debug, Default)]
pub struct CaptureOutput {
    lines: Mutex<Vec<String>>,
}

impl CaptureOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    /// Return and forget everything captured so far.
    pub fn take(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|mut l| std::mem::take(&mut *l))
            .unwrap_or_default()
    }
}

impl Output for CaptureOutput {
    fn line(&self, line: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line.to_string());
        }
    }
}
