// SPDX-FileCopyrightText: 2026 Passkeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the server and client crates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The verified identity a request operates on behalf of.
///
/// Only ever produced by token verification, never parsed from a request
/// body. Every store query is scoped by this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerId(pub Uuid);

impl std::fmt::Display for OwnerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A registered identity, as exposed outside the auth service.
///
/// The password hash is intentionally absent from this type; it never
/// leaves `passkeep-auth`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: Uuid,
    /// Stored lowercased; uniqueness is case-insensitive.
    pub email: String,
}

/// A stored credential with its secret decrypted.
///
/// This is the shape returned by the credential store to token-verified
/// callers. At rest the secret only exists as a cipher envelope.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub id: Uuid,
    pub owner_id: OwnerId,
    pub app_name: String,
    pub username: String,
    pub secret: String,
}

// Plaintext secrets must never reach logs through Debug formatting.
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("id", &self.id)
            .field("owner_id", &self.owner_id)
            .field("app_name", &self.app_name)
            .field("username", &self.username)
            .field("secret", &"[redacted]")
            .finish()
    }
}

/// An owner-scoped reminder.
///
/// `credential_label` is a free-text reference, not a foreign key: renaming
/// or deleting a credential orphans its reminders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: Uuid,
    pub owner_id: OwnerId,
    pub credential_label: String,
    pub fire_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_debug_redacts_secret() {
        let cred = Credential {
            id: Uuid::new_v4(),
            owner_id: OwnerId(Uuid::new_v4()),
            app_name: "mail".to_string(),
            username: "a".to_string(),
            secret: "hunter2-plaintext".to_string(),
        };
        let debug = format!("{cred:?}");
        assert!(!debug.contains("hunter2-plaintext"));
        assert!(debug.contains("[redacted]"));
        assert!(debug.contains("mail"));
    }

    #[test]
    fn reminder_serde_round_trip() {
        let reminder = Reminder {
            id: Uuid::new_v4(),
            owner_id: OwnerId(Uuid::new_v4()),
            credential_label: "mail".to_string(),
            fire_at: Utc::now(),
        };
        let json = serde_json::to_string(&reminder).unwrap();
        let parsed: Reminder = serde_json::from_str(&json).unwrap();
        assert_eq!(reminder, parsed);
    }
}
