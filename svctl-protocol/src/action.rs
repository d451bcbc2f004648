//! Control bytes and the rules deciding when they have taken effect.
//!
//! runsv rewrites `supervise/status` at its own pace, so a client can only
//! sample it. A status whose age is older than the moment the command was
//! issued has not caught up with our write yet.

use crate::status::{RunState, Status, WANT_DOWN};

/// A single byte understood by `supervise/control`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionByte {
    Up,
    Down,
    Term,
    Kill,
    Once,
    Pause,
    Cont,
    /// Reserved by runsv (`x`); no observable target state.
    Exit,
    /// HUP, ALRM, INT, QUIT, USR1, USR2 and anything else runsv forwards
    /// as a plain signal.
    Signal(u8),
}

impl From<u8> for ActionByte {
    fn from(b: u8) -> Self {
        match b {
            b'u' => ActionByte::Up,
            b'd' => ActionByte::Down,
            b't' => ActionByte::Term,
            b'k' => ActionByte::Kill,
            b'o' => ActionByte::Once,
            b'p' => ActionByte::Pause,
            b'c' => ActionByte::Cont,
            b'x' => ActionByte::Exit,
            other => ActionByte::Signal(other),
        }
    }
}

impl ActionByte {
    /// Whether `status` shows this byte's effect for a command issued at
    /// `start` (status counter domain).
    pub fn reached(self, status: &Status, start: u64) -> bool {
        let running = status.is_running();
        match self {
            ActionByte::Up => running && status.run_state == RunState::Running,
            ActionByte::Down => !running && status.run_state == RunState::Stopped,
            ActionByte::Term | ActionByte::Kill => {
                if !running && status.want == WANT_DOWN {
                    return true;
                }
                status.age >= start && running && status.term == 0
            }
            ActionByte::Once => {
                if running {
                    status.want == WANT_DOWN
                } else {
                    status.age >= start
                }
            }
            ActionByte::Pause => !running || status.is_paused(),
            ActionByte::Cont => !running || !status.is_paused(),
            ActionByte::Exit | ActionByte::Signal(_) => true,
        }
    }
}

/// True once every byte of `action` has taken effect.
pub fn check(action: &[u8], status: &Status, start: u64) -> bool {
    action
        .iter()
        .all(|&b| ActionByte::from(b).reached(status, start))
}

/// Whether `action` still has to be written to `supervise/control`.
///
/// Skips the write when runsv already wants what the first byte asks for,
/// except for `d` while no TERM is pending.
pub fn should_write(action: &[u8], status: &Status) -> bool {
    match action.first() {
        Some(&first) => status.want != first || (first == b'd' && status.term != 1),
        None => false,
    }
}

#[cfg(test)]
mod tests;
