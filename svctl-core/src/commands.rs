//! The command vocabulary typed at the prompt.
//!
//! Action commands write bytes to `supervise/control` and wait for the
//! service to converge; meta commands run locally. A token matches a
//! command by one of its names, by its single control byte (`u`, `d`, `h`,
//! ...) or, for signal commands, by the first letter of its primary name.

const GLOB_NOTE: &str = "NAMES support globing with '*' and '?'.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
    /// State changes with their own help text.
    Lifecycle(&'static str),
    /// Forwards a single signal; help is generated from the signal name.
    Signal(&'static str),
}

/// A command that is written to `supervise/control`.
#[derive(Debug, PartialEq, Eq)]
pub struct ActionCommand {
    names: &'static [&'static str],
    action: &'static [u8],
    family: Family,
}

pub static ACTIONS: &[ActionCommand] = &[
    ActionCommand {
        names: &["up", "start"],
        action: b"u",
        family: Family::Lifecycle(
            "up NAMES...   Starts service(s) with matching NAMES.\n              \
             NAMES support globing with '*' and '?'.",
        ),
    },
    ActionCommand {
        names: &["down", "stop"],
        action: b"d",
        family: Family::Lifecycle(
            "down NAMES...   Stops service(s) with matching NAMES.\n                \
             NAMES support globing with '*' and '?'.",
        ),
    },
    ActionCommand {
        names: &["restart", "r"],
        action: b"tcu",
        family: Family::Lifecycle(
            "restart NAMES...   Restarts service(s) with matching NAMES.\n                   \
             NAMES support globing with '*' and '?'.\n                   \
             Waits up to 7 seconds for the service to get back up, then\n                   \
             reports TIMEOUT.",
        ),
    },
    ActionCommand {
        names: &["once", "o"],
        action: b"o",
        family: Family::Lifecycle(
            "once NAMES...   Starts service once and does not try to restart it if it stops.\n                \
             NAMES support globing with '*' and '?'.",
        ),
    },
    ActionCommand {
        names: &["pause"],
        action: b"p",
        family: Family::Signal("STOP"),
    },
    ActionCommand {
        names: &["cont"],
        action: b"c",
        family: Family::Signal("CONT"),
    },
    ActionCommand {
        names: &["hup", "reload"],
        action: b"h",
        family: Family::Signal("HUP"),
    },
    ActionCommand {
        names: &["alarm"],
        action: b"a",
        family: Family::Signal("ALRM"),
    },
    ActionCommand {
        names: &["interrupt"],
        action: b"i",
        family: Family::Signal("INT"),
    },
    ActionCommand {
        names: &["quit"],
        action: b"q",
        family: Family::Signal("QUIT"),
    },
    ActionCommand {
        names: &["1"],
        action: b"1",
        family: Family::Signal("USR1"),
    },
    ActionCommand {
        names: &["2"],
        action: b"2",
        family: Family::Signal("USR2"),
    },
    ActionCommand {
        names: &["term"],
        action: b"t",
        family: Family::Signal("TERM"),
    },
    ActionCommand {
        names: &["kill"],
        action: b"k",
        family: Family::Signal("KILL"),
    },
];

impl ActionCommand {
    pub fn names(&self) -> &'static [&'static str] {
        self.names
    }

    pub fn primary(&self) -> &'static str {
        self.names[0]
    }

    /// Bytes written to `supervise/control`, in order.
    pub fn action(&self) -> &'static [u8] {
        self.action
    }

    pub fn is_signal(&self) -> bool {
        matches!(self.family, Family::Signal(_))
    }

    fn shortcut(&self) -> Option<&'static str> {
        match self.family {
            Family::Signal(_) => self.primary().get(..1),
            Family::Lifecycle(_) => None,
        }
    }

    pub fn matches(&self, token: &str) -> bool {
        self.names.contains(&token)
            || (self.action.len() == 1 && self.action == token.as_bytes())
            || self.shortcut() == Some(token)
    }

    /// Help text for this command as asked for by `token`. Signal commands
    /// echo the name the user typed when it is one of their names.
    pub fn help(&self, token: &str) -> String {
        match self.family {
            Family::Lifecycle(text) => text.to_string(),
            Family::Signal(signal) => {
                let name = if self.names.contains(&token) {
                    token
                } else {
                    self.primary()
                };
                signal_help(name, signal)
            }
        }
    }
}

fn signal_help(name: &str, signal: &str) -> String {
    format!(
        "{name} NAMES...   Sends signal '{signal}' to service(s) with matching NAMES.\n\
         {pad}{GLOB_NOTE}",
        pad = " ".repeat(name.len() + 12),
    )
}

/// Commands handled by svctl itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaCommand {
    Status,
    Help,
    Exit,
}

impl MetaCommand {
    pub const ALL: [MetaCommand; 3] = [MetaCommand::Status, MetaCommand::Help, MetaCommand::Exit];

    pub fn names(&self) -> &'static [&'static str] {
        match self {
            MetaCommand::Status => &["status", "s"],
            MetaCommand::Help => &["help", "?"],
            MetaCommand::Exit => &["exit", "e"],
        }
    }

    pub fn matches(&self, token: &str) -> bool {
        self.names().contains(&token)
    }

    pub fn help(&self) -> &'static str {
        match self {
            MetaCommand::Status => {
                "status [NAMES...]   Shows status(es) of service(s) with matching NAMES.\n                    \
                 When invoked without NAMES, shows statuses of all processes.\n                    \
                 NAMES support globing with '*' and '?'."
            }
            MetaCommand::Help => {
                "help [CMDS...]   Shows help message(s) about CMDS.\n                 \
                 When invoked without CMDS, shows available CMDS."
            }
            MetaCommand::Exit => "exit   Exits svctl.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Meta(MetaCommand),
    Action(&'static ActionCommand),
}

impl Command {
    pub fn help(&self, token: &str) -> String {
        match self {
            Command::Meta(meta) => meta.help().to_string(),
            Command::Action(cmd) => cmd.help(token),
        }
    }
}

pub fn lookup_meta(token: &str) -> Option<MetaCommand> {
    MetaCommand::ALL.into_iter().find(|m| m.matches(token))
}

pub fn lookup_action(token: &str) -> Option<&'static ActionCommand> {
    ACTIONS.iter().find(|cmd| cmd.matches(token))
}

/// Resolve a prompt token. Meta commands take precedence.
pub fn lookup(token: &str) -> Option<Command> {
    lookup_meta(token)
        .map(Command::Meta)
        .or_else(|| lookup_action(token).map(Command::Action))
}

/// Every help entry, in catalogue order. Signal commands get one entry per
/// name so `reload` is listed next to `hup`.
pub fn help_catalogue() -> Vec<String> {
    let mut entries = Vec::new();
    for cmd in ACTIONS {
        if cmd.is_signal() {
            entries.extend(cmd.names.iter().map(|name| cmd.help(name)));
        } else {
            entries.push(cmd.help(cmd.primary()));
        }
    }
    entries.extend(MetaCommand::ALL.iter().map(|m| m.help().to_string()));
    entries
}
