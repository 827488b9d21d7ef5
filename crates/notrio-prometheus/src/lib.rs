// SPDX-FileCopyrightText: 2026 Notrio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prometheus metrics adapter for the Notrio notification orchestrator.
//!
//! Installs a process-wide Prometheus recorder and exposes a render handle
//! for the gateway's `/metrics` endpoint. All recording goes through the
//! metrics-rs facade in [`recording`].

pub mod recording;

pub use recording::{
    record_push_failure, record_rollback, record_trio, record_trio_duration, register_metrics,
};

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus recorder and register metric descriptions.
///
/// Returns the handle used to render the exposition format for `/metrics`.
/// Fails if a recorder is already installed in this process.
pub fn install_recorder() -> Result<PrometheusHandle, String> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| format!("failed to install Prometheus recorder: {e}"))?;
    recording::register_metrics();
    tracing::debug!("Prometheus recorder installed");
    Ok(handle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_without_recorder_is_a_no_op() {
        // The metrics facade drops records when no recorder is installed;
        // these must not panic in that state.
        record_trio("success");
        record_trio("failure");
        record_rollback();
        record_push_failure();
        record_trio_duration(0.123);
    }
}
