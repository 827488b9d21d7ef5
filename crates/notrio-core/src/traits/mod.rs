// SPDX-FileCopyrightText: 2026 Notrio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway trait definitions: the entire boundary between the orchestrator
//! and the rest of the system.

pub mod adapter;
pub mod email;
pub mod persistence;
pub mod realtime;

pub use adapter::GatewayAdapter;
pub use email::EmailGateway;
pub use persistence::PersistenceGateway;
pub use realtime::RealtimeGateway;
