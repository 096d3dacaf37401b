// SPDX-FileCopyrightText: 2026 Passkeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Passkeep gateway API.
//!
//! Thin reqwest wrapper over the wire contract: camelCase JSON, bearer
//! token per request, gateway status codes mapped back onto the domain
//! error taxonomy.

use std::time::Duration;

use chrono::{DateTime, Utc};
use passkeep_core::{Identity, PasskeepError};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// Wire shape of a credential record.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRecord {
    pub id: Uuid,
    pub app_name: String,
    pub username: String,
    pub secret: String,
}

// Plaintext secrets must never reach logs through Debug formatting.
impl std::fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("id", &self.id)
            .field("app_name", &self.app_name)
            .field("username", &self.username)
            .field("secret", &"[redacted]")
            .finish()
    }
}

/// Wire shape of a reminder record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderRecord {
    pub id: Uuid,
    pub credential_label: String,
    pub fire_at: DateTime<Utc>,
}

/// Result of a successful register or login.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub identity: Identity,
    pub token: String,
}

#[derive(Debug, Serialize)]
struct AuthRequestBody<'a> {
    email: &'a str,
    secret: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateCredentialBody<'a> {
    app_name: &'a str,
    username: &'a str,
    secret: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateCredentialBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    secret: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateReminderBody<'a> {
    credential_label: &'a str,
    fire_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP client for gateway communication.
///
/// Holds the bearer token from the most recent register or login; every
/// vault call attaches it. Token absence is reported as `Auth` before any
/// request is sent.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, PasskeepError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| PasskeepError::Internal(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// POST /auth/register. Stores the issued token for subsequent calls.
    pub async fn register(
        &mut self,
        email: &str,
        secret: &str,
    ) -> Result<AuthSession, PasskeepError> {
        let session = self.post_auth("/auth/register", email, secret).await?;
        self.token = Some(session.token.clone());
        Ok(session)
    }

    /// POST /auth/login. Stores the issued token for subsequent calls.
    pub async fn login(
        &mut self,
        email: &str,
        secret: &str,
    ) -> Result<AuthSession, PasskeepError> {
        let session = self.post_auth("/auth/login", email, secret).await?;
        self.token = Some(session.token.clone());
        Ok(session)
    }

    /// GET /health.
    pub async fn health(&self) -> Result<(), PasskeepError> {
        let response = self
            .client
            .get(self.url("/health"))
            .send()
            .await
            .map_err(transport_error)?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(error_from_response(response).await)
        }
    }

    /// GET /credentials.
    pub async fn list_credentials(&self) -> Result<Vec<CredentialRecord>, PasskeepError> {
        let response = self
            .authorized(self.client.get(self.url("/credentials")))?
            .send()
            .await
            .map_err(transport_error)?;
        parse_json(response).await
    }

    /// POST /credentials.
    pub async fn create_credential(
        &self,
        app_name: &str,
        username: &str,
        secret: &str,
    ) -> Result<CredentialRecord, PasskeepError> {
        let response = self
            .authorized(self.client.post(self.url("/credentials")))?
            .json(&CreateCredentialBody {
                app_name,
                username,
                secret,
            })
            .send()
            .await
            .map_err(transport_error)?;
        parse_json(response).await
    }

    /// PUT /credentials/{id}.
    pub async fn update_credential(
        &self,
        id: Uuid,
        username: Option<&str>,
        secret: Option<&str>,
    ) -> Result<CredentialRecord, PasskeepError> {
        let response = self
            .authorized(self.client.put(self.url(&format!("/credentials/{id}"))))?
            .json(&UpdateCredentialBody { username, secret })
            .send()
            .await
            .map_err(transport_error)?;
        parse_json(response).await
    }

    /// DELETE /credentials/{id}.
    pub async fn delete_credential(&self, id: Uuid) -> Result<(), PasskeepError> {
        let response = self
            .authorized(self.client.delete(self.url(&format!("/credentials/{id}"))))?
            .send()
            .await
            .map_err(transport_error)?;
        expect_success(response).await
    }

    /// GET /reminders.
    pub async fn list_reminders(&self) -> Result<Vec<ReminderRecord>, PasskeepError> {
        let response = self
            .authorized(self.client.get(self.url("/reminders")))?
            .send()
            .await
            .map_err(transport_error)?;
        parse_json(response).await
    }

    /// POST /reminders.
    pub async fn create_reminder(
        &self,
        credential_label: &str,
        fire_at: DateTime<Utc>,
    ) -> Result<ReminderRecord, PasskeepError> {
        let response = self
            .authorized(self.client.post(self.url("/reminders")))?
            .json(&CreateReminderBody {
                credential_label,
                fire_at,
            })
            .send()
            .await
            .map_err(transport_error)?;
        parse_json(response).await
    }

    /// DELETE /reminders/{id}.
    pub async fn delete_reminder(&self, id: Uuid) -> Result<(), PasskeepError> {
        let response = self
            .authorized(self.client.delete(self.url(&format!("/reminders/{id}"))))?
            .send()
            .await
            .map_err(transport_error)?;
        expect_success(response).await
    }

    async fn post_auth(
        &self,
        route: &str,
        email: &str,
        secret: &str,
    ) -> Result<AuthSession, PasskeepError> {
        let response = self
            .client
            .post(self.url(route))
            .json(&AuthRequestBody { email, secret })
            .send()
            .await
            .map_err(transport_error)?;
        debug!(route, status = %response.status(), "auth response received");
        parse_json(response).await
    }

    fn authorized(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, PasskeepError> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| PasskeepError::Auth("not logged in".to_string()))?;
        Ok(builder.bearer_auth(token))
    }

    fn url(&self, route: &str) -> String {
        format!("{}{route}", self.base_url)
    }
}

async fn parse_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, PasskeepError> {
    if !response.status().is_success() {
        return Err(error_from_response(response).await);
    }
    response
        .json()
        .await
        .map_err(|e| PasskeepError::Internal(format!("malformed response body: {e}")))
}

async fn expect_success(response: reqwest::Response) -> Result<(), PasskeepError> {
    if response.status().is_success() {
        Ok(())
    } else {
        Err(error_from_response(response).await)
    }
}

/// Map a gateway error response back onto the domain taxonomy.
async fn error_from_response(response: reqwest::Response) -> PasskeepError {
    let status = response.status();
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => format!("request failed with status {status}"),
    };
    match status.as_u16() {
        400 => PasskeepError::Validation(message),
        401 => PasskeepError::Auth(message),
        404 => PasskeepError::NotFound(message),
        409 => PasskeepError::Conflict(message),
        _ => PasskeepError::Internal(message),
    }
}

fn transport_error(e: reqwest::Error) -> PasskeepError {
    PasskeepError::Internal(format!("HTTP request failed: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn session_body(email: &str) -> serde_json::Value {
        json!({
            "identity": { "id": Uuid::new_v4(), "email": email },
            "token": "test-token"
        })
    }

    #[tokio::test]
    async fn register_stores_the_issued_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/register"))
            .and(body_partial_json(json!({"email": "a@b.com"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(session_body("a@b.com")))
            .mount(&server)
            .await;

        let mut api = ApiClient::new(server.uri()).unwrap();
        assert!(!api.has_token());
        let session = api.register("a@b.com", "Abcdef1!").await.unwrap();
        assert_eq!(session.identity.email, "a@b.com");
        assert!(api.has_token());
    }

    #[tokio::test]
    async fn vault_calls_attach_the_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(session_body("a@b.com")))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/credentials"))
            .and(header("authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let mut api = ApiClient::new(server.uri()).unwrap();
        api.login("a@b.com", "Abcdef1!").await.unwrap();
        assert!(api.list_credentials().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn vault_calls_without_a_token_fail_before_any_request() {
        let api = ApiClient::new("http://127.0.0.1:1").unwrap();
        let err = api.list_credentials().await.unwrap_err();
        assert!(matches!(err, PasskeepError::Auth(_)));
    }

    #[tokio::test]
    async fn gateway_errors_map_back_onto_the_taxonomy() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/register"))
            .respond_with(
                ResponseTemplate::new(409)
                    .set_body_json(json!({"error": "conflict: email is already registered"})),
            )
            .mount(&server)
            .await;

        let mut api = ApiClient::new(server.uri()).unwrap();
        let err = api.register("a@b.com", "Abcdef1!").await.unwrap_err();
        assert!(matches!(err, PasskeepError::Conflict(_)));
    }

    #[tokio::test]
    async fn create_sends_camel_case_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(session_body("a@b.com")))
            .mount(&server)
            .await;
        let record_id = Uuid::new_v4();
        Mock::given(method("POST"))
            .and(path("/credentials"))
            .and(body_partial_json(json!({"appName": "mail"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": record_id,
                "appName": "mail",
                "username": "a",
                "secret": "Abcdef1!"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut api = ApiClient::new(server.uri()).unwrap();
        api.login("a@b.com", "Abcdef1!").await.unwrap();
        let record = api.create_credential("mail", "a", "Abcdef1!").await.unwrap();
        assert_eq!(record.id, record_id);
    }

    #[tokio::test]
    async fn reminder_delete_accepts_the_gateway_200() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(session_body("a@b.com")))
            .mount(&server)
            .await;
        let reminder_id = Uuid::new_v4();
        Mock::given(method("DELETE"))
            .and(path(format!("/reminders/{reminder_id}")))
            .and(header("authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let mut api = ApiClient::new(server.uri()).unwrap();
        api.login("a@b.com", "Abcdef1!").await.unwrap();
        api.delete_reminder(reminder_id).await.unwrap();
    }

    #[test]
    fn debug_never_prints_secret_or_token() {
        let record = CredentialRecord {
            id: Uuid::new_v4(),
            app_name: "mail".to_string(),
            username: "a".to_string(),
            secret: "hunter2-plaintext".to_string(),
        };
        assert!(!format!("{record:?}").contains("hunter2-plaintext"));
    }
}
