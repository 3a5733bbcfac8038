//! Bounded retry with exponential backoff.
//!
//! Both outbound HTTP clients (weather fetch, Telegram send) share this one
//! policy instead of hand-rolling their own loops. Every failure is retried
//! identically up to the attempt cap; there is no jitter and no
//! retryable/non-retryable classification.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// Attempt cap plus backoff schedule for one retried operation.
///
/// The backoff before retry `n` (1-based) is `base_delay * 2^(n-1)`, so the
/// default policy sleeps 1s, then 2s, between its three attempts.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub const fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    /// Delay before the attempt following `attempt` (1-based).
    ///
    /// Shift capped at 31 so extreme configs saturate instead of overflowing.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u32 << attempt.saturating_sub(1).min(31);
        self.base_delay.saturating_mul(factor)
    }

    /// Run `operation` up to `max_attempts` times.
    ///
    /// Returns the first success immediately. On each failure except the
    /// last, sleeps for [`RetryPolicy::backoff`] before the next attempt.
    /// Once attempts are exhausted, the last error is returned; earlier
    /// errors are logged only.
    pub async fn run<T, E, F, Fut>(&self, label: &str, mut operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let mut attempt = 1u32;

        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    tracing::warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        error = %err,
                        "{label} attempt failed"
                    );

                    if attempt >= self.max_attempts {
                        return Err(err);
                    }
                }
            }

            tokio::time::sleep(self.backoff(attempt)).await;
            attempt += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Policy with zero backoff so tests never sleep.
    fn immediate(max_attempts: u32) -> RetryPolicy {
        RetryPolicy::new(max_attempts, Duration::ZERO)
    }

    #[test]
    fn backoff_doubles_per_attempt() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff(1), Duration::from_secs(1));
        assert_eq!(policy.backoff(2), Duration::from_secs(2));
        assert_eq!(policy.backoff(3), Duration::from_secs(4));
        assert_eq!(policy.backoff(4), Duration::from_secs(8));
    }

    #[tokio::test]
    async fn first_attempt_success_makes_exactly_one_call() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);

        let result = immediate(3)
            .run("test", || {
                let c = Arc::clone(&c);
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    Ok::<u32, String>(7)
                }
            })
            .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn recovers_after_transient_failures() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);

        let result = immediate(3)
            .run("test", || {
                let c = Arc::clone(&c);
                async move {
                    let n = c.fetch_add(1, Ordering::SeqCst);
                    if n < 2 {
                        Err("flaky".to_string())
                    } else {
                        Ok::<u32, String>(42)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn permanent_failure_returns_last_error_after_cap() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);

        let result: Result<u32, String> = immediate(3)
            .run("test", || {
                let c = Arc::clone(&c);
                async move {
                    let n = c.fetch_add(1, Ordering::SeqCst) + 1;
                    Err(format!("boom {n}"))
                }
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // Only the last attempt's reason survives.
        assert_eq!(result.unwrap_err(), "boom 3");
    }

    #[tokio::test]
    async fn single_attempt_policy_never_retries() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);

        let result: Result<u32, String> = immediate(1)
            .run("test", || {
                let c = Arc::clone(&c);
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    Err("no".to_string())
                }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
