// SPDX-FileCopyrightText: 2026 Passkeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Passkeep credential vault.

use thiserror::Error;

/// The primary error type used across all Passkeep crates.
///
/// The first four variants are expected, caller-recoverable conditions and
/// carry messages safe to return to the client. `Crypto`, `Storage`, and
/// `Internal` are server-side faults: they are logged in full and reported
/// to the caller as an opaque failure.
#[derive(Debug, Error)]
pub enum PasskeepError {
    /// Malformed input (bad email shape, short secret, missing fields).
    #[error("validation error: {0}")]
    Validation(String),

    /// Missing/invalid/expired token, or failed login. The message never
    /// reveals whether an email exists.
    #[error("auth error: {0}")]
    Auth(String),

    /// Duplicate registration.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Unknown record, or a record owned by someone else. The two cases are
    /// deliberately indistinguishable.
    #[error("not found: {0}")]
    NotFound(String),

    /// Envelope malformed or authentication tag mismatch. Signals tampering
    /// or key mismatch, never silently degraded plaintext.
    #[error("crypto error: {0}")]
    Crypto(String),

    /// Storage backend errors (database connection, query failure).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration errors (invalid TOML, bad key encoding).
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PasskeepError {
    /// The undifferentiated login failure. Unknown email and wrong password
    /// must produce byte-identical errors to prevent account enumeration.
    pub fn invalid_credentials() -> Self {
        Self::Auth("invalid credentials".to_string())
    }

    /// Whether this error is safe to report verbatim to the caller.
    pub fn is_client_safe(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::Auth(_) | Self::Conflict(_) | Self::NotFound(_)
        )
    }
}
