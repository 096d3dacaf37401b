// SPDX-FileCopyrightText: 2026 Passkeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credential CRUD operations.
//!
//! Every read and mutation is filtered by `owner_id`. A row belonging to a
//! different owner is indistinguishable from a row that does not exist:
//! lookups return `None` and mutations report zero affected rows.

use passkeep_core::PasskeepError;
use rusqlite::params;

use crate::database::{map_tr_err, Database};
use crate::models::CredentialRow;

/// Insert a new credential row.
pub async fn insert_credential(db: &Database, row: &CredentialRow) -> Result<(), PasskeepError> {
    let row = row.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO credentials (id, owner_id, app_name, username, secret_envelope, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    row.id,
                    row.owner_id,
                    row.app_name,
                    row.username,
                    row.secret_envelope,
                    row.created_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// List an owner's credentials in insertion order.
pub async fn list_by_owner(
    db: &Database,
    owner_id: &str,
) -> Result<Vec<CredentialRow>, PasskeepError> {
    let owner_id = owner_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, owner_id, app_name, username, secret_envelope, created_at
                 FROM credentials WHERE owner_id = ?1 ORDER BY rowid",
            )?;
            let rows = stmt.query_map(params![owner_id], row_to_credential)?;
            let mut credentials = Vec::new();
            for row in rows {
                credentials.push(row?);
            }
            Ok(credentials)
        })
        .await
        .map_err(map_tr_err)
}

/// Fetch a single credential scoped to its owner.
pub async fn get_for_owner(
    db: &Database,
    owner_id: &str,
    id: &str,
) -> Result<Option<CredentialRow>, PasskeepError> {
    let owner_id = owner_id.to_string();
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, owner_id, app_name, username, secret_envelope, created_at
                 FROM credentials WHERE id = ?1 AND owner_id = ?2",
            )?;
            let result = stmt.query_row(params![id, owner_id], row_to_credential);
            match result {
                Ok(row) => Ok(Some(row)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(map_tr_err)
}

/// Overwrite a credential's username and envelope (last-write-wins).
///
/// Returns the number of affected rows; zero means no such row for this
/// owner.
pub async fn update_for_owner(
    db: &Database,
    owner_id: &str,
    id: &str,
    username: &str,
    secret_envelope: &[u8],
) -> Result<usize, PasskeepError> {
    let owner_id = owner_id.to_string();
    let id = id.to_string();
    let username = username.to_string();
    let secret_envelope = secret_envelope.to_vec();
    db.connection()
        .call(move |conn| {
            let affected = conn.execute(
                "UPDATE credentials SET username = ?1, secret_envelope = ?2
                 WHERE id = ?3 AND owner_id = ?4",
                params![username, secret_envelope, id, owner_id],
            )?;
            Ok(affected)
        })
        .await
        .map_err(map_tr_err)
}

/// Delete a credential scoped to its owner. Returns affected row count.
pub async fn delete_for_owner(
    db: &Database,
    owner_id: &str,
    id: &str,
) -> Result<usize, PasskeepError> {
    let owner_id = owner_id.to_string();
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let affected = conn.execute(
                "DELETE FROM credentials WHERE id = ?1 AND owner_id = ?2",
                params![id, owner_id],
            )?;
            Ok(affected)
        })
        .await
        .map_err(map_tr_err)
}

fn row_to_credential(row: &rusqlite::Row<'_>) -> Result<CredentialRow, rusqlite::Error> {
    Ok(CredentialRow {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        app_name: row.get(2)?,
        username: row.get(3)?,
        secret_envelope: row.get(4)?,
        created_at: row.get(5)?,
    })
}
