// SPDX-FileCopyrightText: 2026 Passkeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Registration, login, and token verification over the identity table.

use std::sync::OnceLock;

use chrono::Utc;
use passkeep_core::{Identity, OwnerId, PasskeepError};
use passkeep_storage::queries::identities;
use passkeep_storage::{Database, IdentityRow};
use regex::Regex;
use tracing::{debug, info};
use uuid::Uuid;

use crate::password;
use crate::token::TokenSigner;

/// Minimum accepted login secret length at registration.
const MIN_SECRET_LEN: usize = 8;

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid")
    })
}

/// Registers identities, verifies credentials, and issues access tokens.
pub struct AuthService {
    db: Database,
    signer: TokenSigner,
}

impl AuthService {
    pub fn new(db: Database, signer: TokenSigner) -> Self {
        Self { db, signer }
    }

    /// Register a new identity and issue its first token.
    ///
    /// Emails are compared and stored lowercased, so uniqueness is
    /// case-insensitive.
    pub async fn register(
        &self,
        email: &str,
        secret: &str,
    ) -> Result<(Identity, String), PasskeepError> {
        let email = email.trim().to_lowercase();
        if !email_regex().is_match(&email) {
            return Err(PasskeepError::Validation(
                "email format is invalid".to_string(),
            ));
        }
        if secret.chars().count() < MIN_SECRET_LEN {
            return Err(PasskeepError::Validation(format!(
                "secret must be at least {MIN_SECRET_LEN} characters"
            )));
        }
        let id = Uuid::new_v4();
        let row = IdentityRow {
            id: id.to_string(),
            email: email.clone(),
            password_hash: password::hash_secret(secret)?,
            created_at: Utc::now().to_rfc3339(),
        };
        // Duplicate emails surface from the insert as `Conflict`; there is
        // no separate lookup, so concurrent registrations cannot race past
        // the check.
        identities::insert_identity(&self.db, &row).await?;
        info!(identity_id = %id, "identity registered");

        let identity = Identity { id, email };
        let token = self.signer.issue(id);
        Ok((identity, token))
    }

    /// Verify login credentials and issue a fresh token.
    ///
    /// Unknown email and wrong secret produce the same undifferentiated
    /// error, so a caller cannot discover which emails are registered.
    pub async fn login(
        &self,
        email: &str,
        secret: &str,
    ) -> Result<(Identity, String), PasskeepError> {
        let email = email.trim().to_lowercase();
        if !email_regex().is_match(&email) {
            return Err(PasskeepError::Validation(
                "email format is invalid".to_string(),
            ));
        }

        let Some(row) = identities::find_by_email(&self.db, &email).await? else {
            return Err(PasskeepError::invalid_credentials());
        };
        if !password::verify_secret(secret, &row.password_hash)? {
            return Err(PasskeepError::invalid_credentials());
        }

        let id = parse_identity_id(&row.id)?;
        debug!(identity_id = %id, "login succeeded");
        let token = self.signer.issue(id);
        Ok((Identity { id, email: row.email }, token))
    }

    /// Issue a token for an already-verified identity.
    pub fn issue_token(&self, identity_id: Uuid) -> String {
        self.signer.issue(identity_id)
    }

    /// Verify a bearer token and resolve the owner it grants access as.
    pub fn verify_token(&self, token: &str) -> Result<OwnerId, PasskeepError> {
        self.signer.verify(token)
    }
}

fn parse_identity_id(raw: &str) -> Result<Uuid, PasskeepError> {
    Uuid::parse_str(raw)
        .map_err(|_| PasskeepError::Internal(format!("stored identity id is not a UUID: {raw}")))
}
