//! Async utilities to wait for a fake supervisor to observe something

use std::time::Duration;
use tokio::time::{Instant, sleep};

use super::fake_supervisor::FakeSupervisor;

const POLL: Duration = Duration::from_millis(10);

/// Error type for wait operations
#[derive(Debug)]
pub enum WaitError {
    Timeout,
}

impl std::fmt::Display for WaitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WaitError::Timeout => write!(f, "Wait operation timed out"),
        }
    }
}

impl std::error::Error for WaitError {}

/// Wait until the supervisor has read exactly `expected` from its control
/// FIFO.
pub async fn wait_for_control(
    sup: &FakeSupervisor,
    expected: &[u8],
    timeout: Duration,
) -> Result<(), WaitError> {
    let deadline = Instant::now() + timeout;
    loop {
        if sup.received() == expected {
            return Ok(());
        }
        if Instant::now() >= deadline {
            return Err(WaitError::Timeout);
        }
        sleep(POLL).await;
    }
}

/// Wait until the simulated process has a pid other than `old`, returning
/// the new one.
pub async fn wait_for_pid_change(
    sup: &FakeSupervisor,
    old: u32,
    timeout: Duration,
) -> Result<u32, WaitError> {
    let deadline = Instant::now() + timeout;
    loop {
        let pid = sup.pid();
        if pid != old {
            return Ok(pid);
        }
        if Instant::now() >= deadline {
            return Err(WaitError::Timeout);
        }
        sleep(POLL).await;
    }
}
