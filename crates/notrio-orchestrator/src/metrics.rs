// SPDX-FileCopyrightText: 2026 Notrio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process-wide trio counters.
//!
//! The registry is shared by every concurrently running trio (registration
//! flows, payment webhooks, broadcasts), so all counter mutation happens
//! under one lock. The lock is never held across an await point.

use std::sync::Mutex;
use std::time::Duration;

use serde::Serialize;

/// A point-in-time copy of the trio counters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    /// Every `create_trio` invocation that reached validation.
    pub total_requests: u64,
    /// Trios that reached the Completed terminal state.
    pub successful_trios: u64,
    /// Trios that reached a failed terminal state. Validation rejections are
    /// not counted here.
    pub failed_trios: u64,
    /// Running mean over completed (success + failure) trios, in milliseconds.
    pub average_latency_ms: f64,
    /// Compensating rollback invocations, whether or not anything was deleted.
    pub rollback_count: u64,
}

#[derive(Debug, Default)]
struct MetricsInner {
    total_requests: u64,
    successful_trios: u64,
    failed_trios: u64,
    average_latency_ms: f64,
    rollback_count: u64,
}

/// Mutex-guarded trio counters with a reset hook for test isolation.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    inner: Mutex<MetricsInner>,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one `create_trio` invocation. Called before validation runs.
    pub fn record_request(&self) {
        self.lock().total_requests += 1;
    }

    /// Record one terminal outcome. Called exactly once per trio that got
    /// past validation.
    pub fn record_completion(&self, success: bool, duration: Duration, rollback_invoked: bool) {
        let mut inner = self.lock();
        if success {
            inner.successful_trios += 1;
        } else {
            inner.failed_trios += 1;
        }
        if rollback_invoked {
            inner.rollback_count += 1;
        }

        let completed = inner.successful_trios + inner.failed_trios;
        let duration_ms = duration.as_secs_f64() * 1000.0;
        inner.average_latency_ms += (duration_ms - inner.average_latency_ms) / completed as f64;
    }

    /// Current counter values.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let inner = self.lock();
        MetricsSnapshot {
            total_requests: inner.total_requests,
            successful_trios: inner.successful_trios,
            failed_trios: inner.failed_trios,
            average_latency_ms: inner.average_latency_ms,
            rollback_count: inner.rollback_count,
        }
    }

    /// Zero all counters. Intended for test isolation only.
    pub fn reset(&self) {
        *self.lock() = MetricsInner::default();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MetricsInner> {
        // A poisoned lock only means another trio panicked mid-update;
        // the counters themselves are still usable.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let registry = MetricsRegistry::new();
        let snap = registry.snapshot();
        assert_eq!(snap.total_requests, 0);
        assert_eq!(snap.successful_trios, 0);
        assert_eq!(snap.failed_trios, 0);
        assert_eq!(snap.average_latency_ms, 0.0);
        assert_eq!(snap.rollback_count, 0);
    }

    #[test]
    fn completion_counts_split_by_outcome() {
        let registry = MetricsRegistry::new();
        registry.record_request();
        registry.record_completion(true, Duration::from_millis(10), false);
        registry.record_request();
        registry.record_completion(false, Duration::from_millis(30), true);

        let snap = registry.snapshot();
        assert_eq!(snap.total_requests, 2);
        assert_eq!(snap.successful_trios, 1);
        assert_eq!(snap.failed_trios, 1);
        assert_eq!(snap.rollback_count, 1);
    }

    #[test]
    fn average_latency_is_a_running_mean() {
        let registry = MetricsRegistry::new();
        registry.record_completion(true, Duration::from_millis(10), false);
        registry.record_completion(true, Duration::from_millis(20), false);
        registry.record_completion(false, Duration::from_millis(60), true);

        let snap = registry.snapshot();
        assert!(
            (snap.average_latency_ms - 30.0).abs() < 1e-9,
            "got {}",
            snap.average_latency_ms
        );
    }

    #[test]
    fn validation_rejections_touch_total_only() {
        let registry = MetricsRegistry::new();
        registry.record_request();

        let snap = registry.snapshot();
        assert_eq!(snap.total_requests, 1);
        assert_eq!(snap.successful_trios + snap.failed_trios, 0);
        assert_eq!(snap.average_latency_ms, 0.0);
    }

    #[test]
    fn reset_restores_zeros() {
        let registry = MetricsRegistry::new();
        registry.record_request();
        registry.record_completion(false, Duration::from_millis(5), true);

        registry.reset();
        assert_eq!(registry.snapshot(), MetricsRegistry::new().snapshot());
    }
}
