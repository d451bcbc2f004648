//! Tab completion for the prompt.
//!
//! The first word completes to command names, as do the arguments of
//! `help`. Every other word completes to service names under the base
//! directory, `log/` children included.

use std::path::PathBuf;

use crate::commands::{ACTIONS, MetaCommand, lookup_meta};
use crate::services::ServiceResolver;

#[derive(Debug, Clone)]
pub struct CommandCompleter {
    resolver: ServiceResolver,
}

impl CommandCompleter {
    pub fn new(basedir: impl Into<PathBuf>) -> Self {
        Self {
            resolver: ServiceResolver::new(basedir),
        }
    }

    /// Complete the word ending at byte `pos` of `line`. Returns where that
    /// word starts and the names that may replace it.
    pub fn complete(&self, line: &str, pos: usize) -> (usize, Vec<String>) {
        let head = line.get(..pos).unwrap_or(line);
        let start = head.rfind(' ').map_or(0, |i| i + 1);
        let word = &head[start..];

        let candidates = match head[..start].split(' ').find(|t| !t.is_empty()) {
            None => command_names(word),
            Some(cmd) if lookup_meta(cmd) == Some(MetaCommand::Help) => command_names(word),
            Some(_) => self.service_names(word),
        };
        (start, candidates)
    }

    fn service_names(&self, prefix: &str) -> Vec<String> {
        self.resolver
            .resolve(&format!("{prefix}*"), true)
            .iter()
            .map(|service| service.name().to_string())
            .collect()
    }
}

/// Every command name starting with `prefix`, actions first, in table
/// order.
pub fn command_names(prefix: &str) -> Vec<String> {
    ACTIONS
        .iter()
        .flat_map(|cmd| cmd.names().iter())
        .chain(MetaCommand::ALL.iter().flat_map(|meta| meta.names().iter()))
        .filter(|name| name.starts_with(prefix))
        .map(|name| name.to_string())
        .collect()
}
