//! Test utilities for the svctl workspace
//!
//! This crate provides a fake runsv that serves real FIFOs, a builder for
//! service directory trees and polling helpers used by the integration
//! tests under `tests/`.

pub mod helpers;

pub use helpers::fake_supervisor::{Behavior, FakeSupervisor, Initial};
pub use helpers::service_tree::TestServiceTree;
pub use helpers::wait_utils::{WaitError, wait_for_control, wait_for_pid_change};
