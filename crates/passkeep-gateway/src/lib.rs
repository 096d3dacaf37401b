// SPDX-FileCopyrightText: 2026 Passkeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Passkeep vault.
//!
//! A thin axum layer over the auth service and the credential and reminder
//! stores. The gateway owns the wire contract (camelCase JSON, status
//! codes) and nothing else; all domain rules live in the services it wraps.

pub mod error;
pub mod gate;
pub mod handlers;
pub mod server;

pub use server::{build_router, start_server, AppState, ServerConfig};
