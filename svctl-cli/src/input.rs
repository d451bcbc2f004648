//! Where prompt lines come from.
//!
//! A terminal gets the line editor in [`crate::editor`]; anything else is
//! read line by line. Both report Ctrl-C as [`Input::Interrupted`] instead
//! of letting it end the process.

use std::sync::Arc;

use svctl_core::Output;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tokio::sync::mpsc;
use tracing::error;

/// One read from the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Line(String),
    /// Ctrl-C while waiting for a line
    Interrupted,
    Eof,
}

pub trait LineSource {
    /// Show `prompt` and wait for the next line.
    async fn read_line(&mut self, prompt: &str) -> std::io::Result<Input>;

    /// Keep a dispatched line for recall.
    fn remember(&mut self, _line: &str) {}
}

/// Forward every SIGINT the process receives. Once the listener is
/// installed Ctrl-C no longer terminates svctl.
pub fn interrupts() -> mpsc::UnboundedReceiver<()> {
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        loop {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("cannot listen for interrupts: {}", e);
                return;
            }
            if tx.send(()).is_err() {
                return;
            }
        }
    });
    rx
}

/// Drop interrupts that arrived while no prompt was shown.
pub(crate) fn drain(interrupts: &mut mpsc::UnboundedReceiver<()>) {
    while interrupts.try_recv().is_ok() {}
}

/// Line reader for input that is not a terminal.
pub struct ReaderInput<R> {
    lines: Lines<R>,
    interrupts: mpsc::UnboundedReceiver<()>,
    output: Arc<dyn Output>,
}

impl<R: AsyncBufRead + Unpin> ReaderInput<R> {
    pub fn new(reader: R, interrupts: mpsc::UnboundedReceiver<()>, output: Arc<dyn Output>) -> Self {
        Self {
            lines: reader.lines(),
            interrupts,
            output,
        }
    }
}

impl<R: AsyncBufRead + Unpin> LineSource for ReaderInput<R> {
    async fn read_line(&mut self, prompt: &str) -> std::io::Result<Input> {
        drain(&mut self.interrupts);
        self.output.prompt(prompt);

        tokio::select! {
            line = self.lines.next_line() => Ok(match line? {
                Some(line) => Input::Line(line),
                None => Input::Eof,
            }),
            Some(()) = self.interrupts.recv() => Ok(Input::Interrupted),
        }
    }
}
