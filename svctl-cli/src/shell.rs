//! The interactive prompt loop.

use svctl_core::{Controller, Flow, Output};
use tracing::{error, info};

use crate::errors::{CliError, Result};
use crate::input::{Input, LineSource};

pub const PROMPT: &str = "svctl> ";

/// Consecutive read failures tolerated before the shell gives up.
const MAX_READ_ERRORS: usize = 16;

/// Show every service once, then read and dispatch lines until `exit` or
/// end of input. Ctrl-C at the prompt discards the line.
pub async fn run<S: LineSource>(
    controller: &mut Controller,
    output: &dyn Output,
    input: &mut S,
) -> Result<()> {
    controller.status("*", true).await;

    let mut failures = 0;
    loop {
        match input.read_line(PROMPT).await {
            Ok(Input::Line(line)) => {
                failures = 0;
                if !line.trim().is_empty() {
                    input.remember(&line);
                }
                if controller.dispatch(&line).await == Flow::Exit {
                    return Ok(());
                }
            }
            Ok(Input::Interrupted) => {
                failures = 0;
                info!("interrupted");
            }
            Ok(Input::Eof) => {
                output.line("");
                return Ok(());
            }
            Err(e) => {
                error!("error reading prompt contents: {}", e);
                failures += 1;
                if failures >= MAX_READ_ERRORS {
                    return Err(CliError::Input(e));
                }
            }
        }
    }
}
