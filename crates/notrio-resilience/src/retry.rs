// SPDX-FileCopyrightText: 2026 Notrio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Retry executor with a per-attempt deadline.
//!
//! Wraps a stage operation with a maximum attempt count and a
//! `tokio::time::timeout` deadline per attempt. A deadline miss is treated
//! identically to an operation error for retry accounting. Attempts are
//! strictly sequential with no inter-attempt backoff.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use notrio_core::NotrioError;

/// Attempt budget and per-attempt deadline for one stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Values below 1 are treated as 1.
    pub max_attempts: u32,
    /// Deadline for a single attempt.
    pub attempt_timeout: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, attempt_timeout: Duration) -> Self {
        Self {
            max_attempts,
            attempt_timeout,
        }
    }

    fn budget(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

/// Runs one stage's operation under a retry budget and per-attempt deadline.
///
/// The stage name appears in warn logs for every failed attempt and in the
/// terminal error once the budget is exhausted.
#[derive(Debug, Clone)]
pub struct RetryExecutor {
    stage: String,
    policy: RetryPolicy,
}

impl RetryExecutor {
    pub fn new(stage: impl Into<String>, policy: RetryPolicy) -> Self {
        Self {
            stage: stage.into(),
            policy,
        }
    }

    /// The stage name this executor reports in logs and errors.
    pub fn stage(&self) -> &str {
        &self.stage
    }

    /// Run `op` until it succeeds or the attempt budget is exhausted.
    ///
    /// Returns the operation's value, or a terminal
    /// [`NotrioError::RetryExhausted`] wrapping the last attempt's cause
    /// (which is a [`NotrioError::Timeout`] when the last attempt missed its
    /// deadline).
    pub async fn run<T, F, Fut>(&self, op: F) -> Result<T, NotrioError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, NotrioError>>,
    {
        let budget = self.policy.budget();
        let mut last_error = None;

        for attempt in 1..=budget {
            match tokio::time::timeout(self.policy.attempt_timeout, op()).await {
                Ok(Ok(value)) => {
                    if attempt > 1 {
                        debug!(
                            stage = %self.stage,
                            attempt,
                            "stage succeeded after retry"
                        );
                    }
                    return Ok(value);
                }
                Ok(Err(err)) => {
                    warn!(
                        stage = %self.stage,
                        attempt,
                        budget,
                        error = %err,
                        "stage attempt failed"
                    );
                    last_error = Some(err);
                }
                Err(_) => {
                    let err = NotrioError::Timeout {
                        stage: self.stage.clone(),
                        timeout: self.policy.attempt_timeout,
                    };
                    warn!(
                        stage = %self.stage,
                        attempt,
                        budget,
                        timeout_ms = self.policy.attempt_timeout.as_millis() as u64,
                        "stage attempt exceeded deadline"
                    );
                    last_error = Some(err);
                }
            }
        }

        Err(NotrioError::RetryExhausted {
            stage: self.stage.clone(),
            attempts: budget,
            source: Box::new(last_error.unwrap_or_else(|| {
                NotrioError::Internal("retry loop completed without recording a cause".to_string())
            })),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn executor(stage: &str, attempts: u32, timeout_ms: u64) -> RetryExecutor {
        RetryExecutor::new(
            stage,
            RetryPolicy::new(attempts, Duration::from_millis(timeout_ms)),
        )
    }

    #[tokio::test]
    async fn first_attempt_success_calls_once() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result = executor("Database", 3, 1000)
            .run(|| {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, NotrioError>("msg-1")
                }
            })
            .await;

        assert_eq!(result.unwrap(), "msg-1");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn transient_failure_then_success() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result = executor("Database", 3, 1000)
            .run(|| {
                let counter = counter.clone();
                async move {
                    if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                        Err(NotrioError::Storage {
                            source: "database is locked".into(),
                        })
                    } else {
                        Ok("msg-2")
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), "msg-2");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn exhaustion_reports_stage_attempts_and_cause() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result: Result<(), _> = executor("Email", 2, 1000)
            .run(|| {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err(NotrioError::email("Email service unavailable"))
                }
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        let err = result.unwrap_err();
        let text = err.to_string();
        assert!(text.contains("Email failed after 2 attempts"), "got: {text}");
        assert!(text.contains("Email service unavailable"), "got: {text}");
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_miss_becomes_timeout_cause() {
        let result: Result<(), _> = executor("Email", 1, 100)
            .run(|| async {
                tokio::time::sleep(Duration::from_secs(10)).await;
                Ok(())
            })
            .await;

        let err = result.unwrap_err();
        match &err {
            NotrioError::RetryExhausted { source, .. } => {
                assert_eq!(source.to_string(), "Email timeout after 100ms");
            }
            other => panic!("expected RetryExhausted, got {other:?}"),
        }
        assert_eq!(
            err.to_string(),
            "Email failed after 1 attempts: Email timeout after 100ms"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn every_attempt_gets_its_own_deadline() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result: Result<(), _> = executor("Websocket", 3, 50)
            .run(|| {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_secs(1)).await;
                    Ok(())
                }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn zero_attempt_budget_is_clamped_to_one() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result = executor("Database", 0, 1000)
            .run(|| {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, NotrioError>(())
                }
            })
            .await;

        assert!(result.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
