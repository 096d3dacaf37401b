// SPDX-FileCopyrightText: 2026 Passkeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Client-side vault access: API client, optimistic sync cache, and the
//! orchestrator tying them together.
//!
//! The mirror is presentation state, never a source of truth; the server
//! listing wins on every refresh.

pub mod api;
pub mod cache;
pub mod sync;

pub use api::{ApiClient, AuthSession, CredentialRecord, ReminderRecord};
pub use cache::{CacheEntry, EditBuffer, EntryState, MutationTicket, SyncCache};
pub use sync::VaultClient;
