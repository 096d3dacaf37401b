// SPDX-FileCopyrightText: 2026 Passkeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes: key encodings, address shapes, non-empty paths.

use thiserror::Error;

use crate::model::PasskeepConfig;

/// A configuration error surfaced at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// TOML/env deserialization failed.
    #[error("failed to parse configuration: {message}")]
    Parse { message: String },

    /// A value deserialized but violates a semantic constraint.
    #[error("invalid configuration: {message}")]
    Validation { message: String },
}

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns all collected validation errors (does not fail fast). Key
/// presence is checked here so `serve` fails at startup rather than on the
/// first request.
pub fn validate_config(config: &PasskeepConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let host = config.server.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("server.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if config.auth.token_ttl_hours == 0 {
        errors.push(ConfigError::Validation {
            message: "auth.token_ttl_hours must be at least 1".to_string(),
        });
    }

    // Keys are optional in the file (keygen runs without them) but must
    // decode when present.
    if config.keys.cipher_key.is_some() {
        if let Err(e) = config.keys.cipher_key_bytes() {
            errors.push(ConfigError::Validation {
                message: e.to_string(),
            });
        }
    }
    if config.keys.signing_key.is_some() {
        if let Err(e) = config.keys.signing_key_bytes() {
            errors.push(ConfigError::Validation {
                message: e.to_string(),
            });
        }
    }

    if !["trace", "debug", "info", "warn", "error"].contains(&config.log.level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "log.level `{}` is not one of trace, debug, info, warn, error",
                config.log.level
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Render collected configuration errors to stderr.
pub fn render_errors(errors: &[ConfigError]) {
    for error in errors {
        eprintln!("error: {error}");
    }
}
