// SPDX-FileCopyrightText: 2026 Passkeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Passkeep credential vault.
//!
//! Provides TOML configuration parsing with strict validation
//! (`deny_unknown_fields`), XDG file hierarchy lookup, and environment
//! variable overrides.
//!
//! # Usage
//!
//! ```no_run
//! use passkeep_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("listening on {}:{}", config.server.host, config.server.port);
//! ```

pub mod loader;
pub mod model;
pub mod validation;

pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::PasskeepConfig;
pub use validation::{render_errors, ConfigError};

/// Load configuration from the XDG hierarchy and validate it.
///
/// Loads config from TOML files + env vars via Figment, then runs
/// post-deserialization validation (key decoding, address shape).
pub fn load_and_validate() -> Result<PasskeepConfig, Vec<ConfigError>> {
    let config = loader::load_config()
        .map_err(|e| vec![ConfigError::Parse { message: e.to_string() }])?;
    validation::validate_config(&config)?;
    Ok(config)
}

/// Load configuration from a TOML string and validate it.
///
/// Useful for testing and explicit configuration.
pub fn load_and_validate_str(toml_content: &str) -> Result<PasskeepConfig, Vec<ConfigError>> {
    let config = loader::load_config_from_str(toml_content)
        .map_err(|e| vec![ConfigError::Parse { message: e.to_string() }])?;
    validation::validate_config(&config)?;
    Ok(config)
}
