// SPDX-FileCopyrightText: 2026 Passkeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Row types for storage entities.
//!
//! Ids are stored as UUID strings; timestamps as RFC 3339 strings. The
//! service crates convert to and from the domain types in `passkeep-core`.

/// An identity row, including the password hash.
///
/// This type stays inside the server: the hash must never cross the HTTP
/// boundary, and Debug output redacts it.
#[derive(Clone)]
pub struct IdentityRow {
    pub id: String,
    /// Lowercased before insert; the UNIQUE constraint is the last line of
    /// defense against duplicate registration races.
    pub email: String,
    pub password_hash: String,
    pub created_at: String,
}

impl std::fmt::Debug for IdentityRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityRow")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"[redacted]")
            .finish()
    }
}

/// A credential row. The secret only exists here as a cipher envelope.
#[derive(Debug, Clone)]
pub struct CredentialRow {
    pub id: String,
    pub owner_id: String,
    pub app_name: String,
    pub username: String,
    /// Nonce plus ciphertext plus GCM tag, as produced by the cipher engine.
    pub secret_envelope: Vec<u8>,
    pub created_at: String,
}

/// A reminder row.
#[derive(Debug, Clone)]
pub struct ReminderRow {
    pub id: String,
    pub owner_id: String,
    pub credential_label: String,
    pub fire_at: String,
    pub created_at: String,
}
