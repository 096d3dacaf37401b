// SPDX-FileCopyrightText: 2026 Passkeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Owner-scoped credential CRUD over the cipher engine.
//!
//! Secrets are encrypted before every insert and re-encrypted on update;
//! reads decrypt on the way out. Every query is filtered by the owner id
//! resolved from the verified token -- a record belonging to a different
//! owner is reported as not found, which keeps foreign and missing records
//! indistinguishable.

use chrono::Utc;
use passkeep_core::{Credential, OwnerId, PasskeepError};
use passkeep_storage::queries::credentials as queries;
use passkeep_storage::{CredentialRow, Database};
use tracing::debug;
use uuid::Uuid;

use crate::crypto::CipherEngine;

/// Owner-scoped CRUD over encrypted credential records.
pub struct CredentialStore {
    db: Database,
    cipher: CipherEngine,
}

impl CredentialStore {
    pub fn new(db: Database, cipher: CipherEngine) -> Self {
        Self { db, cipher }
    }

    /// Store a new credential, encrypting the secret at rest.
    ///
    /// The response carries the caller-supplied plaintext rather than a
    /// decrypt round-trip; tests cover the read path separately.
    pub async fn create(
        &self,
        owner: OwnerId,
        app_name: &str,
        username: &str,
        secret: &str,
    ) -> Result<Credential, PasskeepError> {
        let app_name = app_name.trim();
        let username = username.trim();
        if app_name.is_empty() || username.is_empty() || secret.is_empty() {
            return Err(PasskeepError::Validation(
                "appName, username, and secret are all required".to_string(),
            ));
        }

        let id = Uuid::new_v4();
        let row = CredentialRow {
            id: id.to_string(),
            owner_id: owner.to_string(),
            app_name: app_name.to_string(),
            username: username.to_string(),
            secret_envelope: self.cipher.encrypt(secret.as_bytes())?,
            created_at: Utc::now().to_rfc3339(),
        };
        queries::insert_credential(&self.db, &row).await?;
        debug!(credential_id = %id, owner_id = %owner, "credential stored");

        Ok(Credential {
            id,
            owner_id: owner,
            app_name: app_name.to_string(),
            username: username.to_string(),
            secret: secret.to_string(),
        })
    }

    /// List the owner's credentials with secrets decrypted, insertion order.
    pub async fn list_for_owner(&self, owner: OwnerId) -> Result<Vec<Credential>, PasskeepError> {
        let rows = queries::list_by_owner(&self.db, &owner.to_string()).await?;
        rows.into_iter()
            .map(|row| self.row_to_credential(row))
            .collect()
    }

    /// Update a credential's username and/or secret (last-write-wins).
    ///
    /// Fails with `NotFound` when no record with `id` exists for `owner`.
    pub async fn update(
        &self,
        owner: OwnerId,
        id: Uuid,
        username: Option<&str>,
        secret: Option<&str>,
    ) -> Result<Credential, PasskeepError> {
        let existing = queries::get_for_owner(&self.db, &owner.to_string(), &id.to_string())
            .await?
            .ok_or_else(|| PasskeepError::NotFound("credential not found".to_string()))?;

        let username = match username.map(str::trim) {
            Some("") => {
                return Err(PasskeepError::Validation(
                    "username must not be empty".to_string(),
                ))
            }
            Some(name) => name.to_string(),
            None => existing.username.clone(),
        };
        let envelope = match secret {
            Some("") => {
                return Err(PasskeepError::Validation(
                    "secret must not be empty".to_string(),
                ))
            }
            Some(secret) => self.cipher.encrypt(secret.as_bytes())?,
            None => existing.secret_envelope.clone(),
        };

        let affected = queries::update_for_owner(
            &self.db,
            &owner.to_string(),
            &id.to_string(),
            &username,
            &envelope,
        )
        .await?;
        if affected == 0 {
            // Deleted between the fetch and the write.
            return Err(PasskeepError::NotFound("credential not found".to_string()));
        }
        debug!(credential_id = %id, owner_id = %owner, "credential updated");

        Ok(Credential {
            id,
            owner_id: owner,
            app_name: existing.app_name,
            username,
            secret: match secret {
                Some(secret) => secret.to_string(),
                None => self.cipher.decrypt_str(&existing.secret_envelope)?,
            },
        })
    }

    /// Delete a credential. Same ownership-scoped `NotFound` semantics as
    /// update.
    pub async fn delete(&self, owner: OwnerId, id: Uuid) -> Result<(), PasskeepError> {
        let affected =
            queries::delete_for_owner(&self.db, &owner.to_string(), &id.to_string()).await?;
        if affected == 0 {
            return Err(PasskeepError::NotFound("credential not found".to_string()));
        }
        debug!(credential_id = %id, owner_id = %owner, "credential deleted");
        Ok(())
    }

    fn row_to_credential(&self, row: CredentialRow) -> Result<Credential, PasskeepError> {
        Ok(Credential {
            id: parse_uuid(&row.id)?,
            owner_id: OwnerId(parse_uuid(&row.owner_id)?),
            app_name: row.app_name,
            username: row.username,
            secret: self.cipher.decrypt_str(&row.secret_envelope)?,
        })
    }
}

fn parse_uuid(raw: &str) -> Result<Uuid, PasskeepError> {
    Uuid::parse_str(raw)
        .map_err(|_| PasskeepError::Internal(format!("stored id is not a UUID: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use passkeep_storage::queries::identities;
    use passkeep_storage::IdentityRow;

    async fn store_with_owners(count: usize) -> (CredentialStore, Vec<OwnerId>) {
        let db = Database::open(":memory:").await.unwrap();
        let mut owners = Vec::new();
        for i in 0..count {
            let id = Uuid::new_v4();
            identities::insert_identity(
                &db,
                &IdentityRow {
                    id: id.to_string(),
                    email: format!("owner{i}@example.com"),
                    password_hash: "$argon2id$stub".to_string(),
                    created_at: Utc::now().to_rfc3339(),
                },
            )
            .await
            .unwrap();
            owners.push(OwnerId(id));
        }
        let cipher = CipherEngine::new(CipherEngine::generate_key().unwrap());
        (CredentialStore::new(db, cipher), owners)
    }

    #[tokio::test]
    async fn create_returns_plaintext_and_stores_ciphertext() {
        let (store, owners) = store_with_owners(1).await;
        let created = store
            .create(owners[0], "mail", "a", "Abcdef1!")
            .await
            .unwrap();
        assert_eq!(created.secret, "Abcdef1!");

        // The create response never exercises decryption, so read back
        // through the list path and compare.
        let listed = store.list_for_owner(owners[0]).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].secret, "Abcdef1!");
    }

    #[tokio::test]
    async fn stored_envelope_never_contains_plaintext() {
        let (store, owners) = store_with_owners(1).await;
        let created = store
            .create(owners[0], "mail", "a", "super-unique-plaintext-77")
            .await
            .unwrap();

        let row = passkeep_storage::queries::credentials::get_for_owner(
            &store.db,
            &owners[0].to_string(),
            &created.id.to_string(),
        )
        .await
        .unwrap()
        .unwrap();
        let envelope_str = String::from_utf8_lossy(&row.secret_envelope);
        assert!(!envelope_str.contains("super-unique-plaintext-77"));
    }

    #[tokio::test]
    async fn create_rejects_missing_fields() {
        let (store, owners) = store_with_owners(1).await;
        for (app, user, secret) in [("", "a", "s"), ("mail", "", "s"), ("mail", "a", "")] {
            let err = store.create(owners[0], app, user, secret).await.unwrap_err();
            assert!(matches!(err, PasskeepError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn owners_are_isolated() {
        let (store, owners) = store_with_owners(2).await;
        let created = store
            .create(owners[0], "mail", "a", "Abcdef1!")
            .await
            .unwrap();

        assert!(store.list_for_owner(owners[1]).await.unwrap().is_empty());

        let err = store
            .update(owners[1], created.id, Some("intruder"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, PasskeepError::NotFound(_)));

        let err = store.delete(owners[1], created.id).await.unwrap_err();
        assert!(matches!(err, PasskeepError::NotFound(_)));

        // Still intact for the real owner.
        let listed = store.list_for_owner(owners[0]).await.unwrap();
        assert_eq!(listed[0].username, "a");
    }

    #[tokio::test]
    async fn update_username_only_keeps_secret() {
        let (store, owners) = store_with_owners(1).await;
        let created = store
            .create(owners[0], "mail", "a", "Abcdef1!")
            .await
            .unwrap();

        let updated = store
            .update(owners[0], created.id, Some("a2"), None)
            .await
            .unwrap();
        assert_eq!(updated.username, "a2");
        assert_eq!(updated.secret, "Abcdef1!");

        let listed = store.list_for_owner(owners[0]).await.unwrap();
        assert_eq!(listed[0].username, "a2");
        assert_eq!(listed[0].secret, "Abcdef1!");
    }

    #[tokio::test]
    async fn update_secret_re_encrypts() {
        let (store, owners) = store_with_owners(1).await;
        let created = store
            .create(owners[0], "mail", "a", "Abcdef1!")
            .await
            .unwrap();

        let before = passkeep_storage::queries::credentials::get_for_owner(
            &store.db,
            &owners[0].to_string(),
            &created.id.to_string(),
        )
        .await
        .unwrap()
        .unwrap();

        store
            .update(owners[0], created.id, None, Some("NewSecret2@"))
            .await
            .unwrap();

        let after = passkeep_storage::queries::credentials::get_for_owner(
            &store.db,
            &owners[0].to_string(),
            &created.id.to_string(),
        )
        .await
        .unwrap()
        .unwrap();
        assert_ne!(before.secret_envelope, after.secret_envelope);

        let listed = store.list_for_owner(owners[0]).await.unwrap();
        assert_eq!(listed[0].secret, "NewSecret2@");
    }

    #[tokio::test]
    async fn delete_then_list_is_empty() {
        let (store, owners) = store_with_owners(1).await;
        let created = store
            .create(owners[0], "mail", "a", "Abcdef1!")
            .await
            .unwrap();
        store.delete(owners[0], created.id).await.unwrap();
        assert!(store.list_for_owner(owners[0]).await.unwrap().is_empty());

        let err = store.delete(owners[0], created.id).await.unwrap_err();
        assert!(matches!(err, PasskeepError::NotFound(_)));
    }

    #[tokio::test]
    async fn list_preserves_insertion_order() {
        let (store, owners) = store_with_owners(1).await;
        for app in ["zulu", "alpha", "mike"] {
            store
                .create(owners[0], app, "user", "Abcdef1!")
                .await
                .unwrap();
        }
        let apps: Vec<String> = store
            .list_for_owner(owners[0])
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.app_name)
            .collect();
        assert_eq!(apps, vec!["zulu", "alpha", "mike"]);
    }
}
