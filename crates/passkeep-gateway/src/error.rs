// SPDX-FileCopyrightText: 2026 Passkeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mapping from domain errors to HTTP responses.
//!
//! Client-safe errors carry their message through; server-side faults are
//! logged in full and reported as an opaque 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use passkeep_core::PasskeepError;
use serde::Serialize;

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Wrapper making [`PasskeepError`] usable as an axum rejection.
#[derive(Debug)]
pub struct ApiError(pub PasskeepError);

impl From<PasskeepError> for ApiError {
    fn from(err: PasskeepError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            PasskeepError::Validation(_) => StatusCode::BAD_REQUEST,
            PasskeepError::Auth(_) => StatusCode::UNAUTHORIZED,
            PasskeepError::Conflict(_) => StatusCode::CONFLICT,
            PasskeepError::NotFound(_) => StatusCode::NOT_FOUND,
            PasskeepError::Crypto(_)
            | PasskeepError::Storage { .. }
            | PasskeepError::Config(_)
            | PasskeepError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = if self.0.is_client_safe() {
            self.0.to_string()
        } else {
            tracing::error!(error = %self.0, "request failed with server-side fault");
            "internal error".to_string()
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_safe_errors_keep_their_message() {
        let response = ApiError(PasskeepError::Validation("email format is invalid".into()))
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn conflict_maps_to_409() {
        let response =
            ApiError(PasskeepError::Conflict("email is already registered".into())).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn server_faults_are_opaque_500s() {
        for err in [
            PasskeepError::Crypto("tag mismatch".into()),
            PasskeepError::Internal("boom".into()),
        ] {
            let response = ApiError(err).into_response();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}
