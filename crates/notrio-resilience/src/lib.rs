// SPDX-FileCopyrightText: 2026 Notrio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resilience primitives for the Notrio notification orchestrator.
//!
//! Currently provides the retry executor used by every trio stage. Attempts
//! are sequential (stages 1 and 2 depend on ordering correctness) and each
//! attempt runs under its own deadline.

pub mod retry;

pub use retry::{RetryExecutor, RetryPolicy};
