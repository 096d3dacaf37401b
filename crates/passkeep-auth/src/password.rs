// SPDX-FileCopyrightText: 2026 Passkeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One-way secret hashing with Argon2id.
//!
//! Each hash carries its own random salt and parameters in PHC string
//! format, so verification needs no side-channel configuration.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use passkeep_core::PasskeepError;

/// Hash a login secret with Argon2id and a fresh random salt.
pub fn hash_secret(secret: &str) -> Result<String, PasskeepError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasskeepError::Internal(format!("secret hashing failed: {e}")))
}

/// Verify a candidate secret against a stored PHC hash string.
///
/// A mismatch is `Ok(false)`; only a corrupted hash or an internal argon2
/// fault is an error.
pub fn verify_secret(secret: &str, stored_hash: &str) -> Result<bool, PasskeepError> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| PasskeepError::Internal(format!("stored hash is malformed: {e}")))?;
    match Argon2::default().verify_password(secret.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasskeepError::Internal(format!(
            "secret verification failed: {e}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let hash = hash_secret("Abcdef1!").unwrap();
        assert!(verify_secret("Abcdef1!", &hash).unwrap());
    }

    #[test]
    fn wrong_secret_fails_verification() {
        let hash = hash_secret("Abcdef1!").unwrap();
        assert!(!verify_secret("wrong-secret", &hash).unwrap());
    }

    #[test]
    fn same_secret_hashes_differently() {
        // Fresh salt per hash.
        let h1 = hash_secret("Abcdef1!").unwrap();
        let h2 = hash_secret("Abcdef1!").unwrap();
        assert_ne!(h1, h2);
    }

    #[test]
    fn hash_does_not_contain_plaintext() {
        let hash = hash_secret("Abcdef1!").unwrap();
        assert!(!hash.contains("Abcdef1!"));
        assert!(hash.starts_with("$argon2id$"));
    }

    #[test]
    fn garbage_stored_hash_is_an_internal_error() {
        let err = verify_secret("anything", "not-a-phc-string").unwrap_err();
        assert!(matches!(err, PasskeepError::Internal(_)));
    }
}
