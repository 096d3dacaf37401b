// SPDX-FileCopyrightText: 2026 Passkeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Passkeep credential vault.
//!
//! Provides the shared error taxonomy, domain types, and the pure secret
//! strength evaluator used by both the server and client crates.

pub mod error;
pub mod strength;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::PasskeepError;
pub use strength::{evaluate, StrengthLevel, StrengthReport};
pub use types::{Credential, Identity, OwnerId, Reminder};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_has_all_variants() {
        let _validation = PasskeepError::Validation("test".into());
        let _auth = PasskeepError::Auth("test".into());
        let _conflict = PasskeepError::Conflict("test".into());
        let _not_found = PasskeepError::NotFound("test".into());
        let _crypto = PasskeepError::Crypto("test".into());
        let _storage = PasskeepError::Storage {
            source: Box::new(std::io::Error::other("test")),
        };
        let _config = PasskeepError::Config("test".into());
        let _internal = PasskeepError::Internal("test".into());
    }

    #[test]
    fn owner_id_round_trips_through_serde() {
        let id = OwnerId(uuid::Uuid::new_v4());
        let json = serde_json::to_string(&id).expect("should serialize");
        let parsed: OwnerId = serde_json::from_str(&json).expect("should deserialize");
        assert_eq!(id, parsed);
    }
}
