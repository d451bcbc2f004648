//! Line editing on a terminal: recall of earlier lines and tab completion
//! of command and service names.

use std::path::Path;

use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{CompletionType, Context, Editor, Helper, Highlighter, Hinter, Validator};
use svctl_core::CommandCompleter;
use svctl_core::history::{HISTORY_LIMIT, History};
use tokio::sync::mpsc;
use tracing::warn;

use crate::input::{Input, LineSource, drain};

#[derive(Helper, Hinter, Highlighter, Validator)]
pub struct PromptHelper {
    completer: CommandCompleter,
}

impl PromptHelper {
    pub fn new(basedir: &Path) -> Self {
        Self {
            completer: CommandCompleter::new(basedir),
        }
    }

    /// Candidates for the word before `pos`, each followed by a space.
    fn candidates(&self, line: &str, pos: usize) -> (usize, Vec<Pair>) {
        let (start, names) = self.completer.complete(line, pos);
        let pairs = names
            .into_iter()
            .map(|name| Pair {
                replacement: format!("{name} "),
                display: name,
            })
            .collect();
        (start, pairs)
    }
}

impl Completer for PromptHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok(self.candidates(line, pos))
    }
}

pub struct EditorInput {
    editor: Editor<PromptHelper, DefaultHistory>,
    interrupts: mpsc::UnboundedReceiver<()>,
}

impl EditorInput {
    /// Editor seeded with `history`, completing services under `basedir`.
    pub fn new(
        basedir: &Path,
        history: &History,
        interrupts: mpsc::UnboundedReceiver<()>,
    ) -> rustyline::Result<Self> {
        let config = rustyline::Config::builder()
            .max_history_size(HISTORY_LIMIT)?
            .history_ignore_dups(true)?
            .auto_add_history(false)
            .completion_type(CompletionType::List)
            .build();

        let mut editor = Editor::with_config(config)?;
        editor.set_helper(Some(PromptHelper::new(basedir)));
        for entry in history.entries() {
            editor.add_history_entry(entry)?;
        }

        Ok(Self { editor, interrupts })
    }
}

impl LineSource for EditorInput {
    async fn read_line(&mut self, prompt: &str) -> std::io::Result<Input> {
        // Ctrl-C at the prompt arrives as a key press. Signals caught while
        // a command ran are stale.
        drain(&mut self.interrupts);

        // Needs the multi-threaded runtime.
        match tokio::task::block_in_place(|| self.editor.readline(prompt)) {
            Ok(line) => Ok(Input::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(Input::Interrupted),
            Err(ReadlineError::Eof) => Ok(Input::Eof),
            Err(ReadlineError::Io(e)) => Err(e),
            Err(e) => Err(std::io::Error::other(e.to_string())),
        }
    }

    fn remember(&mut self, line: &str) {
        if let Err(e) = self.editor.add_history_entry(line) {
            warn!("cannot add history entry: {}", e);
        }
    }
}
