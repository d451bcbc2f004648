//! The runsv control ABI as seen from a client.
//!
//! `status` decodes the fixed 20-byte record runsv keeps in
//! `supervise/status`, and `action` decides, for the bytes written to
//! `supervise/control`, whether the write is needed and whether the
//! service has reached the state it implies.

pub mod action;
pub mod errors;
pub mod status;

pub use action::{ActionByte, check, should_write};
pub use errors::DecodeError;
pub use status::{RunState, STATUS_LEN, Status, TAI_OFFSET, now_counter};
