// SPDX-FileCopyrightText: 2026 Passkeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! AES-256-GCM seal/open with a self-describing envelope.
//!
//! Every call to [`CipherEngine::encrypt`] generates a fresh random 96-bit
//! nonce via the system CSPRNG, so encrypting the same plaintext twice
//! yields different envelopes. Nonce reuse would be catastrophic for GCM
//! security. The envelope layout is `nonce || ciphertext || tag`.

use passkeep_core::PasskeepError;
use ring::aead::{Aad, LessSafeKey, Nonce, UnboundKey, AES_256_GCM};
use ring::rand::{SecureRandom, SystemRandom};
use zeroize::Zeroizing;

/// Nonce length for AES-256-GCM (96 bits).
pub const NONCE_LEN: usize = 12;

/// GCM authentication tag length.
pub const TAG_LEN: usize = 16;

/// Symmetric cipher keyed by a single process-wide secret key.
///
/// The key is injected at construction (loaded from config at startup) and
/// lives for the process lifetime; the engine holds no per-record state.
pub struct CipherEngine {
    key: Zeroizing<[u8; 32]>,
}

impl std::fmt::Debug for CipherEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CipherEngine")
            .field("key", &"[redacted]")
            .finish()
    }
}

impl CipherEngine {
    pub fn new(key: [u8; 32]) -> Self {
        Self {
            key: Zeroizing::new(key),
        }
    }

    /// Encrypt plaintext into an envelope with an embedded random nonce.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, PasskeepError> {
        let less_safe = self.aead_key()?;

        let rng = SystemRandom::new();
        let mut nonce_bytes = [0u8; NONCE_LEN];
        rng.fill(&mut nonce_bytes)
            .map_err(|_| PasskeepError::Crypto("failed to generate random nonce".to_string()))?;
        let nonce = Nonce::assume_unique_for_key(nonce_bytes);

        // Seal in place: the plaintext buffer is extended with the tag,
        // then prefixed with the nonce to form the envelope.
        let mut in_out = plaintext.to_vec();
        less_safe
            .seal_in_place_append_tag(nonce, Aad::empty(), &mut in_out)
            .map_err(|_| PasskeepError::Crypto("AES-256-GCM encryption failed".to_string()))?;

        let mut envelope = Vec::with_capacity(NONCE_LEN + in_out.len());
        envelope.extend_from_slice(&nonce_bytes);
        envelope.extend_from_slice(&in_out);
        Ok(envelope)
    }

    /// Decrypt an envelope produced by [`encrypt`](Self::encrypt).
    ///
    /// Fails when the envelope is too short to contain a nonce and tag, or
    /// when the authentication tag does not verify -- tampering or key
    /// mismatch never silently yields garbage plaintext.
    pub fn decrypt(&self, envelope: &[u8]) -> Result<Vec<u8>, PasskeepError> {
        if envelope.len() < NONCE_LEN + TAG_LEN {
            return Err(PasskeepError::Crypto(
                "envelope too short -- malformed or truncated".to_string(),
            ));
        }
        let (nonce_bytes, ciphertext) = envelope.split_at(NONCE_LEN);
        let nonce = Nonce::try_assume_unique_for_key(nonce_bytes)
            .map_err(|_| PasskeepError::Crypto("malformed nonce in envelope".to_string()))?;

        let less_safe = self.aead_key()?;
        let mut in_out = ciphertext.to_vec();
        let plaintext = less_safe
            .open_in_place(nonce, Aad::empty(), &mut in_out)
            .map_err(|_| {
                PasskeepError::Crypto(
                    "AES-256-GCM decryption failed -- wrong key or tampered data".to_string(),
                )
            })?;
        Ok(plaintext.to_vec())
    }

    /// Decrypt an envelope and interpret the plaintext as UTF-8.
    pub fn decrypt_str(&self, envelope: &[u8]) -> Result<String, PasskeepError> {
        let plaintext = self.decrypt(envelope)?;
        String::from_utf8(plaintext)
            .map_err(|e| PasskeepError::Crypto(format!("decrypted value is not valid UTF-8: {e}")))
    }

    /// Generate a random 32-byte key suitable for AES-256-GCM.
    pub fn generate_key() -> Result<[u8; 32], PasskeepError> {
        let rng = SystemRandom::new();
        let mut key = [0u8; 32];
        rng.fill(&mut key)
            .map_err(|_| PasskeepError::Crypto("failed to generate random key".to_string()))?;
        Ok(key)
    }

    fn aead_key(&self) -> Result<LessSafeKey, PasskeepError> {
        let unbound = UnboundKey::new(&AES_256_GCM, self.key.as_ref())
            .map_err(|_| PasskeepError::Crypto("failed to create AES-256-GCM key".to_string()))?;
        Ok(LessSafeKey::new(unbound))
    }
}
