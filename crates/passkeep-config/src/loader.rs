// SPDX-FileCopyrightText: 2026 Passkeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./passkeep.toml` > `~/.config/passkeep/passkeep.toml`
//! > `/etc/passkeep/passkeep.toml` with environment variable overrides via the
//! `PASSKEEP_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::PasskeepConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/passkeep/passkeep.toml` (system-wide)
/// 3. `~/.config/passkeep/passkeep.toml` (user XDG config)
/// 4. `./passkeep.toml` (local directory)
/// 5. `PASSKEEP_*` environment variables
pub fn load_config() -> Result<PasskeepConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PasskeepConfig::default()))
        .merge(Toml::file("/etc/passkeep/passkeep.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("passkeep/passkeep.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("passkeep.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<PasskeepConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PasskeepConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<PasskeepConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PasskeepConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `PASSKEEP_STORAGE_DATABASE_PATH` must map
/// to `storage.database_path`, not `storage.database.path`.
fn env_provider() -> Env {
    Env::prefixed("PASSKEEP_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        let mapped = key
            .as_str()
            .replacen("server_", "server.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("keys_", "keys.", 1)
            .replacen("auth_", "auth.", 1)
            .replacen("log_", "log.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_yields_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn toml_overrides_defaults() {
        let config = load_config_from_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000

            [storage]
            database_path = "/var/lib/passkeep/vault.db"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.storage.database_path, "/var/lib/passkeep/vault.db");
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config = load_config_from_str(
            r#"
            [auth]
            token_ttl_hours = 1
            "#,
        )
        .unwrap();
        assert_eq!(config.auth.token_ttl_hours, 1);
        assert_eq!(config.server.port, 8080);
    }
}
