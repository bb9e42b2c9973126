//! Restart policy for the monitoring task.

use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{error, info};

use crate::error::{BotError, Result};

/// Backoff and restart limits.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Wait before the first restart.
    pub initial_delay: Duration,
    /// Backoff multiplier per consecutive failure.
    pub multiplier: f64,
    /// Upper bound on the wait.
    pub max_delay: Duration,
    /// Consecutive failures tolerated before giving up.
    pub max_restarts: u32,
    /// A run lasting this long resets the failure count.
    pub healthy_after: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(1),
            multiplier: 2.0,
            max_delay: Duration::from_secs(5 * 60),
            max_restarts: 10,
            healthy_after: Duration::from_secs(10 * 60),
        }
    }
}

impl RetryPolicy {
    /// Wait before restarting after `failures` consecutive failures.
    #[must_use]
    pub fn backoff(&self, failures: u32) -> Duration {
        if failures == 0 {
            return Duration::ZERO;
        }

        let exponent = i32::try_from(failures - 1).unwrap_or(i32::MAX);
        let secs = self.initial_delay.as_secs_f64() * self.multiplier.powi(exponent);
        Duration::from_secs_f64(secs.min(self.max_delay.as_secs_f64()))
    }
}

/// How supervision ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// The task returned successfully.
    Completed,
    /// The shutdown signal fired.
    Shutdown,
}

/// Runs a task, restarting it with backoff when it fails.
pub struct Supervisor {
    policy: RetryPolicy,
}

impl Supervisor {
    #[must_use]
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    /// Run fresh instances of `task` until one succeeds, restarts run out,
    /// or `shutdown` resolves.
    ///
    /// Shutdown drops the running task and is never retried.
    pub async fn run_until<F, Fut, S>(&self, mut task: F, shutdown: S) -> Result<Exit>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<()>>,
        S: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut failures: u32 = 0;

        loop {
            let started = Instant::now();
            let outcome = tokio::select! {
                () = &mut shutdown => {
                    info!("Good Bye!");
                    return Ok(Exit::Shutdown);
                }
                outcome = task() => outcome,
            };

            let err = match outcome {
                Ok(()) => return Ok(Exit::Completed),
                Err(e) => e,
            };

            if started.elapsed() >= self.policy.healthy_after {
                failures = 0;
            }
            failures += 1;

            if failures > self.policy.max_restarts {
                error!(error = %err, failures, "Too many consecutive failures, giving up");
                return Err(BotError::RestartsExhausted {
                    attempts: failures,
                    last_error: err.to_string(),
                });
            }

            let delay = self.policy.backoff(failures);
            error!(
                error = %err,
                failures,
                delay_ms = delay.as_millis() as u64,
                "Something happened... Restarting!"
            );

            tokio::select! {
                () = &mut shutdown => {
                    info!("Good Bye!");
                    return Ok(Exit::Shutdown);
                }
                () = tokio::time::sleep(delay) => {}
            }
        }
    }
}
