use std::future::Future;
use std::time::Duration;

use gantry_common::config;
use log::warn;

/// A policy for retrying a fallible asynchronous operation.
/// The attempt count includes the first attempt, and `None` means
/// the operation is retried until it succeeds or the future is dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum RetryStrategy {
    Fixed {
        max_attempts: Option<usize>,
        delay: Duration,
    },
    ExponentialBackoff {
        max_attempts: Option<usize>,
        initial_delay: Duration,
        max_delay: Duration,
        factor: u32,
    },
}

struct ExponentialBackoffDelay {
    delay: Duration,
    max_delay: Duration,
    factor: u32,
}

impl Iterator for ExponentialBackoffDelay {
    type Item = Duration;

    fn next(&mut self) -> Option<Self::Item> {
        let delay = self.delay;
        self.delay = std::cmp::min(delay.saturating_mul(self.factor), self.max_delay);
        Some(delay)
    }
}

impl RetryStrategy {
    pub async fn run<F, Fut, T, E>(&self, mut f: F) -> Result<T, E>
    where
        F: FnMut() -> Fut + Send,
        Fut: Future<Output = Result<T, E>> + Send,
        T: Send + 'static,
        E: std::fmt::Display + Send + 'static,
    {
        let mut delays = self.delays();
        let mut attempt = 1;
        loop {
            match f().await {
                x @ Ok(_) => return x,
                Err(e) => {
                    if self.max_attempts().is_some_and(|max| attempt >= max) {
                        warn!("retryable operation failed after {attempt} attempts: {e}");
                        return Err(e);
                    }
                    // The delay iterators never end, so a delay is always available here.
                    let delay = delays.next().unwrap_or_default();
                    warn!("retryable operation failed (attempt {attempt}), retrying in {delay:?}: {e}");
                    tokio::time::sleep(delay).await;
                }
            }
            attempt += 1;
        }
    }

    pub fn max_attempts(&self) -> Option<usize> {
        match self {
            Self::Fixed { max_attempts, .. } | Self::ExponentialBackoff { max_attempts, .. } => {
                *max_attempts
            }
        }
    }

    /// Returns the delays to wait after each failed attempt.
    pub fn delays(&self) -> Box<dyn Iterator<Item = Duration> + Send> {
        match self {
            Self::ExponentialBackoff {
                max_attempts: _,
                initial_delay,
                max_delay,
                factor,
            } => Box::new(ExponentialBackoffDelay {
                delay: *initial_delay,
                max_delay: *max_delay,
                factor: *factor,
            }),
            Self::Fixed {
                max_attempts: _,
                delay,
            } => Box::new(std::iter::repeat(*delay)),
        }
    }
}

fn non_zero(value: usize) -> Option<usize> {
    if value == 0 {
        None
    } else {
        Some(value)
    }
}

impl From<&config::RetryStrategy> for RetryStrategy {
    fn from(config: &config::RetryStrategy) -> Self {
        match config {
            config::RetryStrategy::Fixed(config::FixedRetryStrategy {
                max_attempts,
                delay_secs,
            }) => Self::Fixed {
                max_attempts: non_zero(*max_attempts),
                delay: Duration::from_secs(*delay_secs),
            },
            config::RetryStrategy::ExponentialBackoff(
                config::ExponentialBackoffRetryStrategy {
                    max_attempts,
                    initial_delay_secs,
                    max_delay_secs,
                    factor,
                },
            ) => Self::ExponentialBackoff {
                max_attempts: non_zero(*max_attempts),
                initial_delay: Duration::from_secs(*initial_delay_secs),
                max_delay: Duration::from_secs(*max_delay_secs),
                factor: *factor,
            },
        }
    }
}
