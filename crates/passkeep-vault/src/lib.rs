// SPDX-FileCopyrightText: 2026 Passkeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Encrypted credential storage for Passkeep.
//!
//! The cipher engine is a pure AES-256-GCM transform keyed by a single
//! process-wide key; the credential store layers owner-scoped CRUD on top of
//! it, encrypting on every write and decrypting on every read.

pub mod crypto;
pub mod reminders;
pub mod store;

pub use crypto::CipherEngine;
pub use reminders::ReminderStore;
pub use store::CredentialStore;
