// SPDX-FileCopyrightText: 2026 Passkeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Orchestration of optimistic mutations against the gateway.
//!
//! Every mutation follows the same shape: stage in the local mirror, make
//! the network call, then commit the server's answer or roll the mirror
//! back and surface the error. There is no silent retry.

use passkeep_core::strength::{self, StrengthLevel};
use passkeep_core::PasskeepError;
use tracing::warn;
use uuid::Uuid;

use crate::api::{ApiClient, AuthSession, CredentialRecord};
use crate::cache::SyncCache;

/// High-level vault session: API client plus optimistic mirror.
#[derive(Debug)]
pub struct VaultClient {
    api: ApiClient,
    cache: SyncCache,
}

impl VaultClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, PasskeepError> {
        Ok(Self {
            api: ApiClient::new(base_url)?,
            cache: SyncCache::new(),
        })
    }

    /// Register, then populate the mirror with the (empty) initial listing.
    pub async fn register(
        &mut self,
        email: &str,
        secret: &str,
    ) -> Result<AuthSession, PasskeepError> {
        let session = self.api.register(email, secret).await?;
        self.refresh().await?;
        Ok(session)
    }

    /// Log in, then populate the mirror.
    pub async fn login(&mut self, email: &str, secret: &str) -> Result<AuthSession, PasskeepError> {
        let session = self.api.login(email, secret).await?;
        self.refresh().await?;
        Ok(session)
    }

    /// Re-fetch the full credential list and replace the mirror wholesale.
    ///
    /// On failure the mirror degrades to empty and the error is surfaced;
    /// a stale mirror never masquerades as a fresh one.
    pub async fn refresh(&mut self) -> Result<(), PasskeepError> {
        match self.api.list_credentials().await {
            Ok(records) => {
                self.cache.replace_all(records);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "credential refresh failed, mirror emptied");
                self.cache.replace_all(Vec::new());
                Err(e)
            }
        }
    }

    /// Create a credential, gated on secret strength.
    ///
    /// A secret scoring weak is refused unless the caller passes
    /// `allow_weak`, which records an explicit decision to proceed.
    pub async fn create_credential(
        &mut self,
        app_name: &str,
        username: &str,
        secret: &str,
        allow_weak: bool,
    ) -> Result<CredentialRecord, PasskeepError> {
        let report = strength::evaluate(secret);
        if report.level == StrengthLevel::Weak && !allow_weak {
            return Err(PasskeepError::Validation(format!(
                "secret scored weak ({}); set allow_weak to store it anyway",
                report.tips.join(", ")
            )));
        }

        let provisional = CredentialRecord {
            id: Uuid::new_v4(),
            app_name: app_name.to_string(),
            username: username.to_string(),
            secret: secret.to_string(),
        };
        let ticket = self.cache.stage_create(provisional);

        match self.api.create_credential(app_name, username, secret).await {
            Ok(confirmed) => {
                self.cache.commit(ticket, Some(confirmed.clone()));
                Ok(confirmed)
            }
            Err(e) => {
                self.cache.rollback(ticket);
                Err(e)
            }
        }
    }

    /// Update a mirrored credential. `None` fields are left unchanged.
    pub async fn update_credential(
        &mut self,
        id: Uuid,
        username: Option<&str>,
        secret: Option<&str>,
    ) -> Result<CredentialRecord, PasskeepError> {
        let ticket = self
            .cache
            .stage_update(id, username, secret)
            .ok_or_else(|| PasskeepError::NotFound("credential not in local mirror".to_string()))?;

        match self.api.update_credential(id, username, secret).await {
            Ok(confirmed) => {
                self.cache.commit(ticket, Some(confirmed.clone()));
                Ok(confirmed)
            }
            Err(e) => {
                self.cache.rollback(ticket);
                Err(e)
            }
        }
    }

    /// Delete a mirrored credential.
    pub async fn delete_credential(&mut self, id: Uuid) -> Result<(), PasskeepError> {
        let ticket = self
            .cache
            .stage_delete(id)
            .ok_or_else(|| PasskeepError::NotFound("credential not in local mirror".to_string()))?;

        match self.api.delete_credential(id).await {
            Ok(()) => {
                self.cache.commit(ticket, None);
                Ok(())
            }
            Err(e) => {
                self.cache.rollback(ticket);
                Err(e)
            }
        }
    }

    /// The current mirror, for presentation.
    pub fn cache(&self) -> &SyncCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut SyncCache {
        &mut self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn logged_in_client(server: &MockServer) -> VaultClient {
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "identity": { "id": Uuid::new_v4(), "email": "a@b.com" },
                "token": "test-token"
            })))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/credentials"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(server)
            .await;

        let mut client = VaultClient::new(server.uri()).unwrap();
        client.login("a@b.com", "Abcdef1!").await.unwrap();
        client
    }

    #[tokio::test]
    async fn weak_secrets_are_refused_before_any_request() {
        let server = MockServer::start().await;
        let mut client = logged_in_client(&server).await;
        Mock::given(method("POST"))
            .and(path("/credentials"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let err = client
            .create_credential("mail", "a", "weak", false)
            .await
            .unwrap_err();
        assert!(matches!(err, PasskeepError::Validation(_)));
        assert!(client.cache().records().is_empty());
    }

    #[tokio::test]
    async fn allow_weak_overrides_the_gate() {
        let server = MockServer::start().await;
        let mut client = logged_in_client(&server).await;
        Mock::given(method("POST"))
            .and(path("/credentials"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": Uuid::new_v4(),
                "appName": "mail",
                "username": "a",
                "secret": "weakpass"
            })))
            .expect(1)
            .mount(&server)
            .await;

        client
            .create_credential("mail", "a", "weakpass", true)
            .await
            .unwrap();
        assert_eq!(client.cache().records().len(), 1);
    }

    #[tokio::test]
    async fn successful_create_commits_the_server_record() {
        let server = MockServer::start().await;
        let mut client = logged_in_client(&server).await;
        let server_id = Uuid::new_v4();
        Mock::given(method("POST"))
            .and(path("/credentials"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": server_id,
                "appName": "mail",
                "username": "a",
                "secret": "Abcdef1!"
            })))
            .mount(&server)
            .await;

        let record = client
            .create_credential("mail", "a", "Abcdef1!", false)
            .await
            .unwrap();
        assert_eq!(record.id, server_id);
        assert_eq!(client.cache().records()[0].id, server_id);
    }

    #[tokio::test]
    async fn failed_create_rolls_the_mirror_back() {
        let server = MockServer::start().await;
        let mut client = logged_in_client(&server).await;
        Mock::given(method("POST"))
            .and(path("/credentials"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({"error": "internal error"})),
            )
            .mount(&server)
            .await;

        let err = client
            .create_credential("mail", "a", "Abcdef1!", false)
            .await
            .unwrap_err();
        assert!(matches!(err, PasskeepError::Internal(_)));
        assert!(client.cache().records().is_empty());
    }

    #[tokio::test]
    async fn failed_refresh_degrades_to_an_empty_mirror() {
        let server = MockServer::start().await;
        let mut client = logged_in_client(&server).await;
        Mock::given(method("POST"))
            .and(path("/credentials"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": Uuid::new_v4(),
                "appName": "mail",
                "username": "a",
                "secret": "Abcdef1!"
            })))
            .mount(&server)
            .await;
        client
            .create_credential("mail", "a", "Abcdef1!", false)
            .await
            .unwrap();

        server.reset().await;
        Mock::given(method("GET"))
            .and(path("/credentials"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({"error": "internal error"})),
            )
            .mount(&server)
            .await;

        assert!(client.refresh().await.is_err());
        assert!(client.cache().records().is_empty());
    }

    #[tokio::test]
    async fn mutating_an_unknown_record_is_not_found() {
        let server = MockServer::start().await;
        let mut client = logged_in_client(&server).await;
        let err = client
            .update_credential(Uuid::new_v4(), Some("x"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, PasskeepError::NotFound(_)));
    }
}
