// SPDX-FileCopyrightText: 2026 Notrio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plain-text rendering of the transactional email templates.

use chrono::{DateTime, Utc};

/// A rendered email ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub body: String,
}

/// Account-welcome email.
pub fn welcome(name: &str) -> RenderedEmail {
    RenderedEmail {
        subject: "Welcome!".to_string(),
        body: format!(
            "Hi {name},\n\n\
             Your account has been created and is ready to use.\n\n\
             See you inside!"
        ),
    }
}

/// Password-reset-success confirmation email.
pub fn password_reset_success(name: &str) -> RenderedEmail {
    RenderedEmail {
        subject: "Your password was changed".to_string(),
        body: format!(
            "Hi {name},\n\n\
             Your password was reset successfully.\n\n\
             If you did not request this change, contact support immediately."
        ),
    }
}

/// Upcoming-event reminder email.
pub fn event_reminder(
    event_name: &str,
    starts_at: DateTime<Utc>,
    location: Option<&str>,
) -> RenderedEmail {
    let when = starts_at.format("%Y-%m-%d %H:%M UTC");
    let where_line = match location {
        Some(location) => format!("Where: {location}\n"),
        None => String::new(),
    };
    RenderedEmail {
        subject: format!("Reminder: {event_name}"),
        body: format!(
            "This is a reminder for your upcoming event.\n\n\
             Event: {event_name}\n\
             When: {when}\n\
             {where_line}\n\
             We look forward to seeing you there."
        ),
    }
}

/// Free-form transactional email.
pub fn generic(subject: &str, body: &str) -> RenderedEmail {
    RenderedEmail {
        subject: subject.to_string(),
        body: body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn welcome_addresses_the_user() {
        let email = welcome("Alice");
        assert_eq!(email.subject, "Welcome!");
        assert!(email.body.contains("Hi Alice"));
    }

    #[test]
    fn password_reset_mentions_support() {
        let email = password_reset_success("Bob");
        assert!(email.body.contains("Hi Bob"));
        assert!(email.body.contains("contact support"));
    }

    #[test]
    fn event_reminder_includes_time_and_location() {
        let starts_at = Utc.with_ymd_and_hms(2026, 9, 12, 18, 30, 0).unwrap();
        let email = event_reminder("Rust Meetup", starts_at, Some("Main Hall"));
        assert_eq!(email.subject, "Reminder: Rust Meetup");
        assert!(email.body.contains("2026-09-12 18:30 UTC"));
        assert!(email.body.contains("Where: Main Hall"));
    }

    #[test]
    fn event_reminder_omits_missing_location() {
        let starts_at = Utc.with_ymd_and_hms(2026, 9, 12, 18, 30, 0).unwrap();
        let email = event_reminder("Rust Meetup", starts_at, None);
        assert!(!email.body.contains("Where:"));
    }

    #[test]
    fn generic_passes_subject_and_body_through() {
        let email = generic("Maintenance", "Tonight at 02:00 UTC.");
        assert_eq!(email.subject, "Maintenance");
        assert_eq!(email.body, "Tonight at 02:00 UTC.");
    }
}
