// SPDX-FileCopyrightText: 2026 Passkeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Compact HMAC-SHA256 signed access tokens.
//!
//! Wire format: `base64url(claims_json).base64url(mac)`, carried as a bearer
//! header value. Tokens are never persisted; each request reconstructs and
//! verifies the claims. The MAC check uses `Mac::verify_slice`, which is
//! constant-time, and runs before the claims are even parsed.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use passkeep_core::{OwnerId, PasskeepError};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use uuid::Uuid;
use zeroize::Zeroizing;

type HmacSha256 = Hmac<Sha256>;

/// Claims embedded in an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the identity id the token grants access as.
    pub sub: Uuid,
    /// Issued at (unix timestamp).
    pub iat: i64,
    /// Expiry (unix timestamp).
    pub exp: i64,
}

/// Issues and verifies access tokens with a server-held signing key.
///
/// The key is injected at construction (from config) so tests can use
/// deterministic keys. Clients cannot forge or extend tokens without it.
pub struct TokenSigner {
    key: Zeroizing<[u8; 32]>,
    ttl: Duration,
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("key", &"[redacted]")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl TokenSigner {
    pub fn new(key: [u8; 32], ttl_hours: u32) -> Self {
        Self {
            key: Zeroizing::new(key),
            ttl: Duration::hours(i64::from(ttl_hours)),
        }
    }

    /// Issue a token for `subject` expiring `ttl` from now.
    pub fn issue(&self, subject: Uuid) -> String {
        self.issue_at(subject, Utc::now())
    }

    /// Verify a token and return the subject it was issued for.
    ///
    /// Fails with `Auth` when the token is malformed, the MAC does not
    /// verify, or the expiry has passed.
    pub fn verify(&self, token: &str) -> Result<OwnerId, PasskeepError> {
        self.verify_at(token, Utc::now())
    }

    fn issue_at(&self, subject: Uuid, now: DateTime<Utc>) -> String {
        let claims = TokenClaims {
            sub: subject,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        let payload = URL_SAFE_NO_PAD
            .encode(serde_json::to_vec(&claims).expect("claims serialize infallibly"));
        let mac = self.mac_over(payload.as_bytes());
        format!("{payload}.{mac}")
    }

    fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<OwnerId, PasskeepError> {
        let (payload, mac_b64) = token
            .split_once('.')
            .ok_or_else(|| PasskeepError::Auth("malformed token".to_string()))?;
        let mac_bytes = URL_SAFE_NO_PAD
            .decode(mac_b64)
            .map_err(|_| PasskeepError::Auth("malformed token".to_string()))?;

        let mut mac = HmacSha256::new_from_slice(self.key.as_ref())
            .expect("HMAC accepts any key length");
        mac.update(payload.as_bytes());
        mac.verify_slice(&mac_bytes)
            .map_err(|_| PasskeepError::Auth("invalid token signature".to_string()))?;

        let claims_json = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| PasskeepError::Auth("malformed token".to_string()))?;
        let claims: TokenClaims = serde_json::from_slice(&claims_json)
            .map_err(|_| PasskeepError::Auth("malformed token".to_string()))?;

        if now.timestamp() >= claims.exp {
            return Err(PasskeepError::Auth("token expired".to_string()));
        }
        Ok(OwnerId(claims.sub))
    }

    fn mac_over(&self, data: &[u8]) -> String {
        let mut mac = HmacSha256::new_from_slice(self.key.as_ref())
            .expect("HMAC accepts any key length");
        mac.update(data);
        URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes())
    }
}
