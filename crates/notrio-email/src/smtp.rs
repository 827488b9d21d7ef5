// SPDX-FileCopyrightText: 2026 Notrio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SMTP implementation of the EmailGateway trait over lettre.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use notrio_config::model::SmtpConfig;
use notrio_core::types::{GatewayType, HealthStatus};
use notrio_core::{EmailGateway, GatewayAdapter, NotrioError};

use crate::templates::{self, RenderedEmail};

/// SMTP-backed transactional mailer.
///
/// Builds a STARTTLS relay transport at construction; individual sends
/// reuse the transport's connection pool.
#[derive(Debug)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, NotrioError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| NotrioError::Email {
                message: format!("invalid SMTP relay {}: {e}", config.host),
                source: Some(Box::new(e)),
            })?
            .port(config.port);

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        let from = mailbox(&config.from_address, &config.from_name)?;
        Ok(Self {
            transport: builder.build(),
            from,
        })
    }

    async fn dispatch(
        &self,
        address: &str,
        display_name: &str,
        rendered: RenderedEmail,
    ) -> Result<(), NotrioError> {
        let to = mailbox(address, display_name)?;
        let email = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(rendered.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(rendered.body)
            .map_err(|e| NotrioError::Email {
                message: format!("failed to build email: {e}"),
                source: Some(Box::new(e)),
            })?;

        self.transport
            .send(email)
            .await
            .map_err(|e| NotrioError::Email {
                message: format!("SMTP send failed: {e}"),
                source: Some(Box::new(e)),
            })?;
        tracing::debug!(to = address, subject = %rendered.subject, "email accepted by relay");
        Ok(())
    }
}

/// Build a mailbox from a raw address and display name.
fn mailbox(address: &str, display_name: &str) -> Result<Mailbox, NotrioError> {
    let parsed: Address = address.parse().map_err(|e| NotrioError::Email {
        message: format!("invalid email address {address}: {e}"),
        source: Some(Box::new(e)),
    })?;
    Ok(Mailbox::new(Some(display_name.to_string()), parsed))
}

#[async_trait]
impl GatewayAdapter for SmtpMailer {
    fn name(&self) -> &str {
        "smtp"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn gateway_type(&self) -> GatewayType {
        GatewayType::Email
    }

    async fn health_check(&self) -> Result<HealthStatus, NotrioError> {
        match self.transport.test_connection().await {
            Ok(true) => Ok(HealthStatus::Healthy),
            Ok(false) => Ok(HealthStatus::Degraded("SMTP relay not responding".into())),
            Err(e) => Ok(HealthStatus::Unhealthy(e.to_string())),
        }
    }

    async fn shutdown(&self) -> Result<(), NotrioError> {
        Ok(())
    }
}

#[async_trait]
impl EmailGateway for SmtpMailer {
    async fn send_welcome(
        &self,
        address: &str,
        display_name: &str,
        name: &str,
    ) -> Result<(), NotrioError> {
        self.dispatch(address, display_name, templates::welcome(name))
            .await
    }

    async fn send_password_reset_success(
        &self,
        address: &str,
        display_name: &str,
        name: &str,
    ) -> Result<(), NotrioError> {
        self.dispatch(address, display_name, templates::password_reset_success(name))
            .await
    }

    async fn send_event_reminder(
        &self,
        address: &str,
        display_name: &str,
        event_name: &str,
        starts_at: DateTime<Utc>,
        location: Option<&str>,
    ) -> Result<(), NotrioError> {
        self.dispatch(
            address,
            display_name,
            templates::event_reminder(event_name, starts_at, location),
        )
        .await
    }

    async fn send_generic(
        &self,
        address: &str,
        display_name: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), NotrioError> {
        self.dispatch(address, display_name, templates::generic(subject, body))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mailer_builds_from_default_config() {
        let config = SmtpConfig::default();
        assert!(SmtpMailer::new(&config).is_ok());
    }

    #[test]
    fn invalid_from_address_is_rejected() {
        let config = SmtpConfig {
            from_address: "not-an-address".to_string(),
            ..SmtpConfig::default()
        };
        let err = SmtpMailer::new(&config).unwrap_err();
        assert!(err.to_string().contains("invalid email address"));
    }

    #[test]
    fn mailbox_carries_display_name() {
        let mb = mailbox("a@b.com", "Alice").unwrap();
        let rendered = mb.to_string();
        assert!(rendered.contains("Alice"), "got: {rendered}");
        assert!(rendered.contains("a@b.com"), "got: {rendered}");
    }
}
