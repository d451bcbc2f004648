//! Per-service convergence: write the control bytes, then poll
//! `supervise/status` until the action has taken effect or time runs out.

use std::sync::Arc;
use std::time::Duration;

use svctl_protocol::{check, now_counter, should_write};
use tokio::time::{Instant, MissedTickBehavior, interval_at, sleep};
use tracing::debug;

use crate::output::Output;
use crate::render::{StatusReport, timeout_prefix};
use crate::supervise::ServiceDir;

/// Status poll period.
pub const TICK: Duration = Duration::from_millis(100);

/// How long a service gets to converge before `TIMEOUT:` is reported.
pub const TIMEOUT: Duration = Duration::from_secs(7);

/// How a waiter ended. Exactly one line has been emitted in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Converged,
    TimedOut,
    /// Status could not be read, before or while polling.
    Unavailable,
    ControlFailed,
}

pub struct Waiter {
    service: ServiceDir,
    action: &'static [u8],
    start: u64,
    output: Arc<dyn Output>,
    color: bool,
}

impl Waiter {
    /// `start` is the status counter captured before the command was
    /// dispatched; records older than it predate our write.
    pub fn new(
        service: ServiceDir,
        action: &'static [u8],
        start: u64,
        output: Arc<dyn Output>,
        color: bool,
    ) -> Self {
        Self {
            service,
            action,
            start,
            output,
            color,
        }
    }

    pub async fn run(self) -> Outcome {
        let status = match self.service.read_status().await {
            Ok(status) => status,
            Err(e) => {
                self.emit(&StatusReport::new(self.service.name(), Err(e)));
                return Outcome::Unavailable;
            }
        };

        if should_write(self.action, &status) {
            if let Err(e) = self.service.write_control(self.action).await {
                self.output.line(&e.to_string());
                return Outcome::ControlFailed;
            }
            debug!(
                "{}: wrote {:?} to supervise/control",
                self.service.name(),
                String::from_utf8_lossy(self.action)
            );
        } else {
            debug!(
                "{}: runsv already wants {:?}, control write skipped",
                self.service.name(),
                char::from(status.want)
            );
        }

        let timeout = sleep(TIMEOUT);
        tokio::pin!(timeout);
        let mut tick = interval_at(Instant::now() + TICK, TICK);
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = &mut timeout => {
                    debug!("{}: timed out after {:?}", self.service.name(), TIMEOUT);
                    let report = self.report().await;
                    let line = format!(
                        "{}{}",
                        timeout_prefix(self.color),
                        report.line(now_counter(), self.color)
                    );
                    self.output.line(&line);
                    return Outcome::TimedOut;
                }
                _ = tick.tick() => {
                    let report = self.report().await;
                    let converged = match report.status() {
                        Some(status) => check(self.action, status, self.start),
                        None => true,
                    };
                    if converged {
                        self.emit(&report);
                        return if report.is_error() {
                            Outcome::Unavailable
                        } else {
                            debug!("{}: converged", self.service.name());
                            Outcome::Converged
                        };
                    }
                }
            }
        }
    }

    async fn report(&self) -> StatusReport {
        StatusReport::new(self.service.name(), self.service.read_status().await)
    }

    fn emit(&self, report: &StatusReport) {
        self.output.line(&report.line(now_counter(), self.color));
    }
}
