// SPDX-FileCopyrightText: 2026 Notrio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Email gateway trait for transactional mail dispatch.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::NotrioError;
use crate::traits::adapter::GatewayAdapter;

/// Gateway to the transactional email sender.
///
/// Each method dispatches exactly one templated email; acceptance is `Ok(())`
/// and any failure is an error. There is no partial-success notion within a
/// single call.
#[async_trait]
pub trait EmailGateway: GatewayAdapter {
    /// Send the account-welcome email.
    async fn send_welcome(
        &self,
        address: &str,
        display_name: &str,
        name: &str,
    ) -> Result<(), NotrioError>;

    /// Send the password-reset-success confirmation email.
    async fn send_password_reset_success(
        &self,
        address: &str,
        display_name: &str,
        name: &str,
    ) -> Result<(), NotrioError>;

    /// Send an upcoming-event reminder email.
    async fn send_event_reminder(
        &self,
        address: &str,
        display_name: &str,
        event_name: &str,
        starts_at: DateTime<Utc>,
        location: Option<&str>,
    ) -> Result<(), NotrioError>;

    /// Send a free-form transactional email.
    async fn send_generic(
        &self,
        address: &str,
        display_name: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), NotrioError>;
}
