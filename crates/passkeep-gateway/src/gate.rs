// SPDX-FileCopyrightText: 2026 Passkeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bearer-token access gate for the vault routes.
//!
//! Verifies `Authorization: Bearer <token>` before any handler runs and
//! injects the resolved [`OwnerId`] as a request extension. Handlers never
//! see an unverified owner id, and they never read one from the body.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use passkeep_core::PasskeepError;

use crate::error::ApiError;
use crate::server::AppState;

/// Middleware guarding every credential and reminder route.
pub async fn require_token(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| {
            ApiError(PasskeepError::Auth("missing bearer token".to_string()))
        })?;

    let owner = state.auth.verify_token(token)?;
    request.extensions_mut().insert(owner);
    Ok(next.run(request).await)
}
