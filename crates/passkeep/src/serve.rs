// SPDX-FileCopyrightText: 2026 Passkeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `passkeep serve` command implementation.
//!
//! Opens the database (running migrations), builds the auth service and
//! stores from config-supplied keys, and serves the gateway until the
//! process is stopped.

use std::sync::Arc;

use passkeep_auth::{AuthService, TokenSigner};
use passkeep_config::PasskeepConfig;
use passkeep_core::PasskeepError;
use passkeep_gateway::{AppState, ServerConfig};
use passkeep_storage::Database;
use passkeep_vault::{CipherEngine, CredentialStore, ReminderStore};
use tracing::info;

/// Runs the `passkeep serve` command.
pub async fn run_serve(config: PasskeepConfig) -> Result<(), PasskeepError> {
    init_tracing(&config.log.level);

    info!("starting passkeep serve");

    // Both keys must be present and well-formed before anything binds.
    let cipher_key = config.keys.cipher_key_bytes()?;
    let signing_key = config.keys.signing_key_bytes()?;

    let db = Database::open(&config.storage.database_path).await?;
    info!(path = %config.storage.database_path, "database opened, migrations applied");

    let state = AppState {
        auth: Arc::new(AuthService::new(
            db.clone(),
            TokenSigner::new(signing_key, config.auth.token_ttl_hours),
        )),
        credentials: Arc::new(CredentialStore::new(db.clone(), CipherEngine::new(cipher_key))),
        reminders: Arc::new(ReminderStore::new(db)),
    };

    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };
    passkeep_gateway::start_server(&server_config, state).await
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("passkeep={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
