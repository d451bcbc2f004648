//! Status line formatting.
//!
//! `NAME   RUNNING (pid 123)   12s`, `NAME   STOPPED   3s` or
//! `NAME   ERROR   <reason>`. Columns are padded to the widest entry of a
//! batch plus three spaces.

use colored::{Color, Colorize};
use svctl_protocol::{RunState, Status};

use crate::errors::StatusError;

const GAP: usize = 3;
const ERROR_LABEL: &str = "ERROR";
pub const TIMEOUT_PREFIX: &str = "TIMEOUT: ";

/// One service's status as shown to the user.
#[derive(Debug, Clone)]
pub struct StatusReport {
    name: String,
    result: Result<Status, StatusError>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Widths {
    pub name: usize,
    pub state: usize,
}

impl Widths {
    pub fn of<'a>(reports: impl IntoIterator<Item = &'a StatusReport>) -> Self {
        reports.into_iter().fold(Widths::default(), |acc, r| Widths {
            name: acc.name.max(r.name.len()),
            state: acc.state.max(r.state_text().len()),
        })
    }
}

impl StatusReport {
    pub fn new(name: impl Into<String>, result: Result<Status, StatusError>) -> Self {
        Self {
            name: name.into(),
            result,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> Option<&Status> {
        self.result.as_ref().ok()
    }

    pub fn is_error(&self) -> bool {
        self.result.is_err()
    }

    fn state_text(&self) -> String {
        match &self.result {
            Ok(status) if status.run_state == RunState::Running => {
                format!("{} (pid {})", status.run_state, status.pid)
            }
            Ok(status) => status.run_state.as_str().to_string(),
            Err(_) => ERROR_LABEL.to_string(),
        }
    }

    /// Render alone, padded only to its own widths.
    pub fn line(&self, now: u64, color: bool) -> String {
        self.render(Widths::of([self]), now, color)
    }

    pub fn render(&self, widths: Widths, now: u64, color: bool) -> String {
        let mut out = format!("{:<width$}", self.name, width = widths.name + GAP);

        let state = self.state_text();
        let pad = " ".repeat(widths.state + GAP - state.len());
        let (label, rest) = match &self.result {
            Ok(status) => (status.run_state.as_str(), &state[status.run_state.as_str().len()..]),
            Err(_) => (ERROR_LABEL, ""),
        };
        if color {
            out.push_str(&label.color(label_color(label)).to_string());
        } else {
            out.push_str(label);
        }
        out.push_str(rest);
        out.push_str(&pad);

        match &self.result {
            Ok(status) => out.push_str(&format!("{}s", status.elapsed(now))),
            Err(e) => out.push_str(&e.to_string()),
        }
        out
    }
}

/// Render a batch with shared column widths.
pub fn render_table(reports: &[StatusReport], now: u64, color: bool) -> Vec<String> {
    let widths = Widths::of(reports);
    reports
        .iter()
        .map(|r| r.render(widths, now, color))
        .collect()
}

pub fn timeout_prefix(color: bool) -> String {
    if color {
        TIMEOUT_PREFIX.yellow().bold().to_string()
    } else {
        TIMEOUT_PREFIX.to_string()
    }
}

fn label_color(label: &str) -> Color {
    match label {
        "RUNNING" => Color::Green,
        "FINISHING" => Color::Yellow,
        "STOPPED" => Color::BrightBlack,
        _ => Color::Red,
    }
}
