// SPDX-FileCopyrightText: 2026 Notrio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Metric registration and recording helpers.
//!
//! Uses the metrics-rs facade so any recorder (Prometheus, statsd, etc.)
//! can collect these metrics.

use metrics::{describe_counter, describe_histogram};

/// Register all Notrio metric descriptions.
///
/// Called once at startup after the recorder is installed.
pub fn register_metrics() {
    describe_counter!("notrio_trios_total", "Total trio requests by outcome");
    describe_counter!(
        "notrio_rollbacks_total",
        "Total compensating rollback invocations"
    );
    describe_counter!(
        "notrio_realtime_push_failures_total",
        "Realtime pushes that exhausted their retry budget"
    );
    describe_histogram!(
        "notrio_trio_duration_seconds",
        "End-to-end trio duration in seconds"
    );
}

/// Record one completed trio with its terminal outcome.
pub fn record_trio(outcome: &str) {
    metrics::counter!("notrio_trios_total", "outcome" => outcome.to_string()).increment(1);
}

/// Record a compensating rollback invocation.
pub fn record_rollback() {
    metrics::counter!("notrio_rollbacks_total").increment(1);
}

/// Record a realtime push that failed after all attempts.
pub fn record_push_failure() {
    metrics::counter!("notrio_realtime_push_failures_total").increment(1);
}

/// Record end-to-end trio latency.
pub fn record_trio_duration(seconds: f64) {
    metrics::histogram!("notrio_trio_duration_seconds").record(seconds);
}
