// SPDX-FileCopyrightText: 2026 Notrio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Notrio integration tests.
//!
//! Provides mock implementations of the three gateway traits with scripted
//! failures, latency injection, and captured-call assertions.

pub mod mock_mailer;
pub mod mock_pusher;
pub mod mock_store;

pub use mock_mailer::{MockMailer, SentEmail};
pub use mock_pusher::MockPusher;
pub use mock_store::{CreatedRecord, MockStore};
