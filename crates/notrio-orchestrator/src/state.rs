// SPDX-FileCopyrightText: 2026 Notrio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-trio lifecycle states.
//!
//! `Pending -> PersistenceInFlight -> {PersistenceFailed} | Persisted ->
//! EmailInFlight (if target) -> {EmailFailed} | EmailDone ->
//! RealtimeFanout -> Completed`. The realtime stage is best-effort and
//! never terminal on its own.

use strum::Display;

/// Lifecycle state of one trio as it moves through the stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TrioState {
    Pending,
    PersistenceInFlight,
    PersistenceFailed,
    Persisted,
    EmailInFlight,
    EmailFailed,
    EmailDone,
    RealtimeFanout,
    Completed,
}

impl TrioState {
    /// Whether this state ends the trio.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TrioState::PersistenceFailed | TrioState::EmailFailed | TrioState::Completed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_three_terminal_states() {
        let all = [
            TrioState::Pending,
            TrioState::PersistenceInFlight,
            TrioState::PersistenceFailed,
            TrioState::Persisted,
            TrioState::EmailInFlight,
            TrioState::EmailFailed,
            TrioState::EmailDone,
            TrioState::RealtimeFanout,
            TrioState::Completed,
        ];
        let terminal: Vec<_> = all.iter().filter(|s| s.is_terminal()).collect();
        assert_eq!(
            terminal,
            vec![
                &TrioState::PersistenceFailed,
                &TrioState::EmailFailed,
                &TrioState::Completed
            ]
        );
    }

    #[test]
    fn display_uses_variant_names() {
        assert_eq!(TrioState::RealtimeFanout.to_string(), "RealtimeFanout");
    }
}
