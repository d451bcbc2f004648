//! Command dispatch and convergence engine for svctl.
//!
//! A [`Controller`] takes prompt lines, resolves the command, expands
//! service patterns under the base directory and runs one [`Waiter`] per
//! service until it reaches the state the command implies.

pub mod commands;
pub mod completion;
pub mod config;
pub mod dispatch;
pub mod errors;
pub mod history;
pub mod output;
pub mod render;
pub mod services;
pub mod supervise;
pub mod waiter;

pub use completion::CommandCompleter;
pub use config::Config;
pub use dispatch::{Controller, Flow};
pub use output::{CaptureOutput, Output, StdoutOutput};
pub use waiter::{Outcome, Waiter};
