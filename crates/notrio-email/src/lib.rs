// SPDX-FileCopyrightText: 2026 Notrio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SMTP email gateway for the Notrio notification orchestrator.
//!
//! Implements [`notrio_core::EmailGateway`] over lettre's async SMTP
//! transport, with plain-text transactional templates.

pub mod smtp;
pub mod templates;

pub use smtp::SmtpMailer;
pub use templates::RenderedEmail;
