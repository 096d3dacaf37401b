// SPDX-FileCopyrightText: 2026 Passkeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the auth and vault REST API.
//!
//! Wire field names are camelCase. Request DTOs keep every field optional
//! and defer presence checks to the services, so a missing field and an
//! empty field produce the same 400.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::{DateTime, Utc};
use passkeep_core::{Credential, Identity, OwnerId, PasskeepError, Reminder};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::server::AppState;

/// Request body for POST /auth/register and POST /auth/login.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub secret: String,
}

/// Response body for both auth endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub identity: Identity,
    pub token: String,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Request body for POST /credentials.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCredentialRequest {
    #[serde(default)]
    pub app_name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub secret: String,
}

/// Request body for PUT /credentials/{id}. Absent fields are left unchanged.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCredentialRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub secret: Option<String>,
}

/// Wire shape of a credential record.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialBody {
    pub id: Uuid,
    pub app_name: String,
    pub username: String,
    pub secret: String,
}

impl From<Credential> for CredentialBody {
    fn from(c: Credential) -> Self {
        Self {
            id: c.id,
            app_name: c.app_name,
            username: c.username,
            secret: c.secret,
        }
    }
}

/// Request body for POST /reminders.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReminderRequest {
    #[serde(default)]
    pub credential_label: String,
    #[serde(default)]
    pub fire_at: Option<DateTime<Utc>>,
}

/// Wire shape of a reminder record.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderBody {
    pub id: Uuid,
    pub credential_label: String,
    pub fire_at: DateTime<Utc>,
}

impl From<Reminder> for ReminderBody {
    fn from(r: Reminder) -> Self {
        Self {
            id: r.id,
            credential_label: r.credential_label,
            fire_at: r.fire_at,
        }
    }
}

/// POST /auth/register
pub async fn post_register(
    State(state): State<AppState>,
    Json(body): Json<AuthRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let (identity, token) = state.auth.register(&body.email, &body.secret).await?;
    Ok((StatusCode::CREATED, Json(AuthResponse { identity, token })))
}

/// POST /auth/login
pub async fn post_login(
    State(state): State<AppState>,
    Json(body): Json<AuthRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let (identity, token) = state.auth.login(&body.email, &body.secret).await?;
    Ok(Json(AuthResponse { identity, token }))
}

/// GET /health -- unauthenticated liveness check.
pub async fn get_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /credentials
pub async fn list_credentials(
    State(state): State<AppState>,
    Extension(owner): Extension<OwnerId>,
) -> Result<Json<Vec<CredentialBody>>, ApiError> {
    let credentials = state.credentials.list_for_owner(owner).await?;
    Ok(Json(credentials.into_iter().map(Into::into).collect()))
}

/// POST /credentials
pub async fn post_credential(
    State(state): State<AppState>,
    Extension(owner): Extension<OwnerId>,
    Json(body): Json<CreateCredentialRequest>,
) -> Result<(StatusCode, Json<CredentialBody>), ApiError> {
    let created = state
        .credentials
        .create(owner, &body.app_name, &body.username, &body.secret)
        .await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// PUT /credentials/{id}
pub async fn put_credential(
    State(state): State<AppState>,
    Extension(owner): Extension<OwnerId>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateCredentialRequest>,
) -> Result<Json<CredentialBody>, ApiError> {
    let updated = state
        .credentials
        .update(owner, id, body.username.as_deref(), body.secret.as_deref())
        .await?;
    Ok(Json(updated.into()))
}

/// DELETE /credentials/{id}
pub async fn delete_credential(
    State(state): State<AppState>,
    Extension(owner): Extension<OwnerId>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.credentials.delete(owner, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /reminders
pub async fn list_reminders(
    State(state): State<AppState>,
    Extension(owner): Extension<OwnerId>,
) -> Result<Json<Vec<ReminderBody>>, ApiError> {
    let reminders = state.reminders.list_for_owner(owner).await?;
    Ok(Json(reminders.into_iter().map(Into::into).collect()))
}

/// POST /reminders
pub async fn post_reminder(
    State(state): State<AppState>,
    Extension(owner): Extension<OwnerId>,
    Json(body): Json<CreateReminderRequest>,
) -> Result<(StatusCode, Json<ReminderBody>), ApiError> {
    let fire_at = body.fire_at.ok_or_else(|| {
        ApiError(PasskeepError::Validation("fireAt is required".to_string()))
    })?;
    let created = state
        .reminders
        .create(owner, &body.credential_label, fire_at)
        .await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// DELETE /reminders/{id}
///
/// Unlike credential deletion this answers 200, matching the wire contract
/// clients already depend on.
pub async fn delete_reminder(
    State(state): State<AppState>,
    Extension(owner): Extension<OwnerId>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.reminders.delete(owner, id).await?;
    Ok(StatusCode::OK)
}
