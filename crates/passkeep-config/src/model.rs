// SPDX-FileCopyrightText: 2026 Passkeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Passkeep credential vault.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup.

use base64::Engine as _;
use passkeep_core::PasskeepError;
use serde::{Deserialize, Serialize};

/// Top-level Passkeep configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values,
/// except that serving requires both keys to be set.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PasskeepConfig {
    /// HTTP server bind settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Process-wide cipher and token signing keys.
    #[serde(default)]
    pub keys: KeysConfig,

    /// Token issuance settings.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

/// HTTP server bind configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file. `:memory:` is accepted for tests.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    "passkeep.db".to_string()
}

/// Process-wide key material, injected into the cipher engine and token
/// signer at startup. Both values are base64-encoded 32-byte keys
/// (`passkeep keygen` prints a fresh pair).
#[derive(Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct KeysConfig {
    /// Key for AES-256-GCM encryption of stored secrets.
    #[serde(default)]
    pub cipher_key: Option<String>,

    /// Key for HMAC-SHA256 access token signatures.
    #[serde(default)]
    pub signing_key: Option<String>,
}

impl std::fmt::Debug for KeysConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeysConfig")
            .field("cipher_key", &self.cipher_key.as_ref().map(|_| "[redacted]"))
            .field(
                "signing_key",
                &self.signing_key.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}

impl KeysConfig {
    /// Decode the cipher key, failing when absent or not 32 bytes.
    pub fn cipher_key_bytes(&self) -> Result<[u8; 32], PasskeepError> {
        decode_key("keys.cipher_key", self.cipher_key.as_deref())
    }

    /// Decode the signing key, failing when absent or not 32 bytes.
    pub fn signing_key_bytes(&self) -> Result<[u8; 32], PasskeepError> {
        decode_key("keys.signing_key", self.signing_key.as_deref())
    }
}

fn decode_key(name: &str, value: Option<&str>) -> Result<[u8; 32], PasskeepError> {
    let encoded = value
        .ok_or_else(|| PasskeepError::Config(format!("{name} is required")))?;
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|e| PasskeepError::Config(format!("{name} is not valid base64: {e}")))?;
    bytes
        .try_into()
        .map_err(|_| PasskeepError::Config(format!("{name} must decode to exactly 32 bytes")))
}

/// Token issuance configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// Access token lifetime in hours.
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_ttl_hours: default_token_ttl_hours(),
        }
    }
}

fn default_token_ttl_hours() -> u32 {
    24
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = PasskeepConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.storage.database_path, "passkeep.db");
        assert_eq!(config.auth.token_ttl_hours, 24);
        assert_eq!(config.log.level, "info");
        assert!(config.keys.cipher_key.is_none());
    }

    #[test]
    fn keys_debug_redacts_material() {
        let keys = KeysConfig {
            cipher_key: Some("c2VjcmV0LWtleS1tYXRlcmlhbA==".to_string()),
            signing_key: None,
        };
        let debug = format!("{keys:?}");
        assert!(!debug.contains("c2VjcmV0"));
        assert!(debug.contains("[redacted]"));
    }

    #[test]
    fn missing_key_fails_decode() {
        let keys = KeysConfig::default();
        assert!(keys.cipher_key_bytes().is_err());
    }

    #[test]
    fn wrong_length_key_fails_decode() {
        let keys = KeysConfig {
            cipher_key: Some(base64::engine::general_purpose::STANDARD.encode([0u8; 16])),
            signing_key: None,
        };
        let err = keys.cipher_key_bytes().unwrap_err();
        assert!(err.to_string().contains("32 bytes"));
    }

    #[test]
    fn valid_key_decodes() {
        let keys = KeysConfig {
            cipher_key: Some(base64::engine::general_purpose::STANDARD.encode([7u8; 32])),
            signing_key: None,
        };
        assert_eq!(keys.cipher_key_bytes().unwrap(), [7u8; 32]);
    }
}
