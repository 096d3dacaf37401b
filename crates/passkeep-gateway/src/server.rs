// SPDX-FileCopyrightText: 2026 Passkeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state. Auth and health routes are
//! public; every credential and reminder route sits behind the bearer-token
//! gate.

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use passkeep_auth::AuthService;
use passkeep_core::PasskeepError;
use passkeep_vault::{CredentialStore, ReminderStore};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::gate;
use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub credentials: Arc<CredentialStore>,
    pub reminders: Arc<ReminderStore>,
}

/// Gateway server bind configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Build the full route tree over the given state.
///
/// Separated from [`start_server`] so tests can drive the router directly
/// without binding a socket.
pub fn build_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::get_health))
        .route("/auth/register", post(handlers::post_register))
        .route("/auth/login", post(handlers::post_login))
        .with_state(state.clone());

    let vault_routes = Router::new()
        .route(
            "/credentials",
            get(handlers::list_credentials).post(handlers::post_credential),
        )
        .route(
            "/credentials/{id}",
            put(handlers::put_credential).delete(handlers::delete_credential),
        )
        .route(
            "/reminders",
            get(handlers::list_reminders).post(handlers::post_reminder),
        )
        .route("/reminders/{id}", delete(handlers::delete_reminder))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            gate::require_token,
        ))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(vault_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Bind and serve the gateway until the process is stopped.
pub async fn start_server(config: &ServerConfig, state: AppState) -> Result<(), PasskeepError> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| PasskeepError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("gateway listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| PasskeepError::Internal(format!("gateway server error: {e}")))?;

    Ok(())
}
