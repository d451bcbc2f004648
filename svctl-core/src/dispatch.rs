//! Command line dispatch.
//!
//! One call handles one prompt line: meta commands run in place, action
//! commands fan out one [`Waiter`] per matched service and return once all
//! of them have finished.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use svctl_protocol::now_counter;
use tokio::task::JoinSet;
use tracing::{error, warn};

use crate::commands::{self, ActionCommand, Command, MetaCommand};
use crate::config::Config;
use crate::history::History;
use crate::output::Output;
use crate::render::{StatusReport, render_table};
use crate::services::ServiceResolver;
use crate::waiter::Waiter;

/// Whether the prompt loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Controller {
    resolver: ServiceResolver,
    output: Arc<dyn Output>,
    history: History,
    history_path: Option<PathBuf>,
    color: bool,
}

impl Controller {
    pub fn new(config: &Config, output: Arc<dyn Output>) -> Self {
        Self {
            resolver: ServiceResolver::new(&config.basedir),
            output,
            history: History::new(),
            history_path: config.history_path.clone(),
            color: config.color,
        }
    }

    /// Like [`Controller::new`], with history loaded from the configured
    /// file. Load failures are logged and leave the history empty.
    pub fn with_loaded_history(config: &Config, output: Arc<dyn Output>) -> Self {
        let mut controller = Self::new(config, output);
        if let Some(path) = &controller.history_path {
            match History::load(path) {
                Ok(history) => controller.history = history,
                Err(e) => warn!("error reading history file: {}", e),
            }
        }
        controller
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Write history back to the configured file, if any.
    pub fn persist_history(&self) {
        let Some(path) = &self.history_path else {
            return;
        };
        if let Err(e) = self.history.save(path) {
            warn!("error writing history file: {}", e);
        }
    }

    /// Handle one prompt line.
    pub async fn dispatch(&mut self, line: &str) -> Flow {
        self.history.push(line);
        let start = now_counter();

        let line = line.trim();
        if line.is_empty() {
            return Flow::Continue;
        }

        let mut tokens = line.split(' ');
        let name = tokens.next().unwrap_or_default();
        let args: Vec<&str> = tokens.filter(|t| !t.is_empty()).collect();

        match commands::lookup(name) {
            Some(Command::Meta(meta)) => self.run_meta(meta, &args).await,
            Some(Command::Action(cmd)) => {
                self.run_action(cmd, &args, start).await;
                Flow::Continue
            }
            None => {
                self.output.line(&format!("{name}: unable to find action"));
                Flow::Continue
            }
        }
    }

    /// Print the status of every service matching `pattern`, aligned as one
    /// table.
    pub async fn status(&self, pattern: &str, with_log: bool) {
        let services = self.resolver.resolve(pattern, with_log);
        if services.is_empty() {
            self.output.line(&format!("{pattern}: unable to find service"));
            return;
        }

        let mut reports = Vec::with_capacity(services.len());
        for service in &services {
            reports.push(StatusReport::new(service.name(), service.read_status().await));
        }
        for line in render_table(&reports, now_counter(), self.color) {
            self.output.line(&line);
        }
    }

    async fn run_meta(&self, meta: MetaCommand, args: &[&str]) -> Flow {
        match meta {
            MetaCommand::Exit => return Flow::Exit,
            MetaCommand::Status => {
                if args.is_empty() {
                    self.status("*", true).await;
                }
                for pattern in args {
                    self.status(pattern, true).await;
                }
            }
            MetaCommand::Help => {
                if args.is_empty() {
                    for entry in commands::help_catalogue() {
                        self.emit_lines(&entry);
                    }
                }
                for token in args {
                    match commands::lookup(token) {
                        Some(cmd) => self.emit_lines(&cmd.help(token)),
                        None => self.output.line(&format!("{token}: unable to find action")),
                    }
                }
            }
        }
        Flow::Continue
    }

    async fn run_action(&self, cmd: &'static ActionCommand, args: &[&str], start: u64) {
        let patterns: &[&str] = if args.is_empty() { &["*"] } else { args };

        let mut seen = HashSet::new();
        let mut waiters = JoinSet::new();
        for pattern in patterns {
            let services = self.resolver.resolve(pattern, false);
            if services.is_empty() {
                self.output.line(&format!("{pattern}: unable to find service"));
                continue;
            }
            for service in services {
                if !seen.insert(service.path().to_path_buf()) {
                    continue;
                }
                let waiter = Waiter::new(
                    service,
                    cmd.action(),
                    start,
                    Arc::clone(&self.output),
                    self.color,
                );
                waiters.spawn(waiter.run());
            }
        }

        while let Some(joined) = waiters.join_next().await {
            if let Err(e) = joined {
                error!("waiter for {} failed: {}", cmd.primary(), e);
            }
        }
    }

    fn emit_lines(&self, text: &str) {
        for line in text.lines() {
            self.output.line(line);
        }
    }
}
