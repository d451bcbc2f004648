//! Decoder for the `supervise/status` record.
//!
//! Layout (20 bytes):
//!
//! | offset | width | field                                   |
//! |--------|-------|-----------------------------------------|
//! | 0      | 8     | TAI64 label of the last change, BE      |
//! | 8      | 4     | nanoseconds, BE                         |
//! | 12     | 4     | pid, LE, 0 when nothing is running      |
//! | 16     | 1     | paused flag                             |
//! | 17     | 1     | want: `u`, `d` or 0                     |
//! | 18     | 1     | term flag                               |
//! | 19     | 1     | run state                               |

use std::fmt;

use chrono::Utc;

use crate::errors::DecodeError;

/// Size of the status record on disk.
pub const STATUS_LEN: usize = 20;

/// Offset runsv adds to unix seconds when stamping the record.
pub const TAI_OFFSET: u64 = 4611686018427387914;

pub const WANT_UP: u8 = b'u';
pub const WANT_DOWN: u8 = b'd';

/// Current time in the counter domain of [`Status::age`].
pub fn now_counter() -> u64 {
    counter_from_unix(Utc::now().timestamp())
}

/// Convert unix seconds to the status counter domain. Negative inputs clamp
/// to the epoch.
pub fn counter_from_unix(secs: i64) -> u64 {
    TAI_OFFSET + secs.max(0) as u64
}

/// Run state byte (offset 19)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Stopped,
    Running,
    Finishing,
    Unknown(u8),
}

impl RunState {
    pub fn from_byte(b: u8) -> Self {
        match b {
            0 => RunState::Stopped,
            1 => RunState::Running,
            2 => RunState::Finishing,
            other => RunState::Unknown(other),
        }
    }

    pub fn as_byte(&self) -> u8 {
        match self {
            RunState::Stopped => 0,
            RunState::Running => 1,
            RunState::Finishing => 2,
            RunState::Unknown(b) => *b,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RunState::Stopped => "STOPPED",
            RunState::Running => "RUNNING",
            RunState::Finishing => "FINISHING",
            RunState::Unknown(_) => "UNKNOWN",
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One decoded status record. Short lived: every poll decodes a fresh one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    /// TAI64 label of the last state change
    pub age: u64,
    pub nanos: u32,
    /// 0 when no process is running
    pub pid: u32,
    pub paused: u8,
    /// `u`, `d`, or 0 when runsv has no preference
    pub want: u8,
    pub term: u8,
    pub run_state: RunState,
}

impl Status {
    pub fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        if buf.len() != STATUS_LEN {
            return Err(DecodeError::WrongLength { len: buf.len() });
        }

        let mut age = [0u8; 8];
        age.copy_from_slice(&buf[0..8]);
        let mut nanos = [0u8; 4];
        nanos.copy_from_slice(&buf[8..12]);
        let mut pid = [0u8; 4];
        pid.copy_from_slice(&buf[12..16]);

        Ok(Self {
            age: u64::from_be_bytes(age),
            nanos: u32::from_be_bytes(nanos),
            pid: u32::from_le_bytes(pid),
            paused: buf[16],
            want: buf[17],
            term: buf[18],
            run_state: RunState::from_byte(buf[19]),
        })
    }

    pub fn encode(&self) -> [u8; STATUS_LEN] {
        let mut buf = [0u8; STATUS_LEN];
        buf[0..8].copy_from_slice(&self.age.to_be_bytes());
        buf[8..12].copy_from_slice(&self.nanos.to_be_bytes());
        buf[12..16].copy_from_slice(&self.pid.to_le_bytes());
        buf[16] = self.paused;
        buf[17] = self.want;
        buf[18] = self.term;
        buf[19] = self.run_state.as_byte();
        buf
    }

    pub fn is_running(&self) -> bool {
        self.pid != 0
    }

    pub fn is_paused(&self) -> bool {
        self.paused != 0
    }

    pub fn term_pending(&self) -> bool {
        self.term != 0
    }

    /// Seconds since the last state change, as of `now`.
    pub fn elapsed(&self, now: u64) -> u64 {
        now.saturating_sub(self.age)
    }
}
