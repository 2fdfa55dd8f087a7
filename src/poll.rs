//! Condition polling
//!
//! [`wait_for`] re-checks a predicate on a fixed cadence until it holds,
//! suspending the calling task in between. It never gives up on its own.
//! [`Poller`] adds opt-in bounds (attempt limit, overall timeout, cancellation
//! token), each with its own error, and supports fallible predicates.

use std::time::Duration;

use thiserror::Error;
use tokio::time::{sleep, timeout, Instant};
use tokio_util::sync::CancellationToken;

/// Delay between predicate evaluations
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(10);

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum PollError {
    #[error("condition not met within {elapsed:?} ({attempts} attempts)")]
    TimedOut { attempts: u64, elapsed: Duration },

    #[error("condition not met after {attempts} attempts")]
    Exhausted { attempts: u64 },

    #[error("wait cancelled after {attempts} attempts")]
    Cancelled { attempts: u64 },

    #[error("invalid poller configuration: {0}")]
    InvalidConfig(&'static str),

    #[error("predicate failed: {0}")]
    Predicate(#[source] BoxError),
}

/// Wait until `predicate` returns true, checking every
/// [`DEFAULT_POLL_INTERVAL`]. Returns the number of evaluations.
///
/// A predicate that is already true completes without sleeping. There is no
/// upper bound; use [`Poller`] when the condition might never hold.
pub async fn wait_for(mut predicate: impl FnMut() -> bool) -> u64 {
    let mut attempts = 1;
    while !predicate() {
        sleep(DEFAULT_POLL_INTERVAL).await;
        attempts += 1;
    }
    attempts
}

/// Like [`wait_for`], but stops at the first predicate error
pub async fn try_wait_for<E>(predicate: impl FnMut() -> Result<bool, E>) -> Result<u64, PollError>
where
    E: Into<BoxError>,
{
    Poller::new().try_wait(predicate).await
}

/// Configurable poll loop
#[derive(Debug, Clone)]
pub struct Poller {
    interval: Duration,
    max_attempts: Option<u64>,
    timeout: Option<Duration>,
    cancel: Option<CancellationToken>,
}

impl Default for Poller {
    fn default() -> Self {
        Self::new()
    }
}

impl Poller {
    /// Unbounded poller with the default interval
    pub fn new() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_attempts: None,
            timeout: None,
            cancel: None,
        }
    }

    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Give up after this many evaluations
    pub fn max_attempts(mut self, attempts: u64) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    /// Give up once this much time has passed since the first evaluation
    pub fn timeout(mut self, limit: Duration) -> Self {
        self.timeout = Some(limit);
        self
    }

    /// Stop as soon as `token` is cancelled
    pub fn cancel_on(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    fn validate(&self) -> Result<(), PollError> {
        if self.interval.is_zero() {
            return Err(PollError::InvalidConfig("interval must be greater than zero"));
        }
        if self.max_attempts == Some(0) {
            return Err(PollError::InvalidConfig("max attempts must be at least 1"));
        }
        Ok(())
    }

    /// Wait until `predicate` returns true; returns the number of evaluations
    pub async fn wait(&self, mut predicate: impl FnMut() -> bool) -> Result<u64, PollError> {
        self.try_wait(|| Ok::<bool, std::convert::Infallible>(predicate())).await
    }

    /// Wait until `predicate` returns `Ok(true)`. The first `Err` ends the
    /// wait and is handed back as [`PollError::Predicate`].
    pub async fn try_wait<F, E>(&self, mut predicate: F) -> Result<u64, PollError>
    where
        F: FnMut() -> Result<bool, E>,
        E: Into<BoxError>,
    {
        self.validate()?;

        let started = Instant::now();
        let mut attempts = 0u64;

        let outcome = {
            let run = self.run(&mut predicate, &mut attempts);
            let bounded = async {
                match self.timeout {
                    Some(limit) => timeout(limit, run).await.ok(),
                    None => Some(run.await),
                }
            };

            match &self.cancel {
                Some(token) => tokio::select! {
                    biased;
                    _ = token.cancelled() => None,
                    result = bounded => Some(result),
                },
                None => Some(bounded.await),
            }
        };

        match outcome {
            Some(Some(result)) => result,
            Some(None) => {
                tracing::debug!("Poll timed out after {} attempts", attempts);
                Err(PollError::TimedOut {
                    attempts,
                    elapsed: started.elapsed(),
                })
            }
            None => {
                tracing::debug!("Poll cancelled after {} attempts", attempts);
                Err(PollError::Cancelled { attempts })
            }
        }
    }

    async fn run<F, E>(&self, predicate: &mut F, attempts: &mut u64) -> Result<u64, PollError>
    where
        F: FnMut() -> Result<bool, E>,
        E: Into<BoxError>,
    {
        loop {
            *attempts += 1;

            if predicate().map_err(|e| PollError::Predicate(e.into()))? {
                tracing::trace!("Condition met after {} attempts", attempts);
                return Ok(*attempts);
            }

            if self.max_attempts.is_some_and(|max| *attempts >= max) {
                return Err(PollError::Exhausted { attempts: *attempts });
            }

            sleep(self.interval).await;
        }
    }
}
