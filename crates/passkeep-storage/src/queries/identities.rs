// SPDX-FileCopyrightText: 2026 Passkeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Identity CRUD operations.

use passkeep_core::PasskeepError;
use rusqlite::params;

use crate::database::{map_tr_err, Database};
use crate::models::IdentityRow;

/// Insert a new identity. The caller has already lowercased the email; the
/// UNIQUE constraint on it is the authoritative duplicate check, so a
/// constraint violation here surfaces as `Conflict` rather than a storage
/// fault. Concurrent registrations of the same email both reach the insert;
/// exactly one wins.
pub async fn insert_identity(db: &Database, row: &IdentityRow) -> Result<(), PasskeepError> {
    let row = row.clone();
    let inserted = db
        .connection()
        .call(move |conn| {
            let result = conn.execute(
                "INSERT INTO identities (id, email, password_hash, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![row.id, row.email, row.password_hash, row.created_at],
            );
            match result {
                Ok(_) => Ok(true),
                Err(rusqlite::Error::SqliteFailure(e, _))
                    if e.code == rusqlite::ErrorCode::ConstraintViolation =>
                {
                    Ok(false)
                }
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(map_tr_err)?;
    if inserted {
        Ok(())
    } else {
        Err(PasskeepError::Conflict(
            "email is already registered".to_string(),
        ))
    }
}

/// Look up an identity by (lowercased) email.
pub async fn find_by_email(
    db: &Database,
    email: &str,
) -> Result<Option<IdentityRow>, PasskeepError> {
    let email = email.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, email, password_hash, created_at
                 FROM identities WHERE email = ?1",
            )?;
            let result = stmt.query_row(params![email], |row| {
                Ok(IdentityRow {
                    id: row.get(0)?,
                    email: row.get(1)?,
                    password_hash: row.get(2)?,
                    created_at: row.get(3)?,
                })
            });
            match result {
                Ok(identity) => Ok(Some(identity)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(map_tr_err)
}
