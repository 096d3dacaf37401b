// SPDX-FileCopyrightText: 2026 Passkeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reminder CRUD operations, owner-scoped like credentials.

use passkeep_core::PasskeepError;
use rusqlite::params;

use crate::database::{map_tr_err, Database};
use crate::models::ReminderRow;

/// Insert a new reminder row.
pub async fn insert_reminder(db: &Database, row: &ReminderRow) -> Result<(), PasskeepError> {
    let row = row.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO reminders (id, owner_id, credential_label, fire_at, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    row.id,
                    row.owner_id,
                    row.credential_label,
                    row.fire_at,
                    row.created_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// List an owner's reminders, soonest first.
pub async fn list_by_owner(
    db: &Database,
    owner_id: &str,
) -> Result<Vec<ReminderRow>, PasskeepError> {
    let owner_id = owner_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, owner_id, credential_label, fire_at, created_at
                 FROM reminders WHERE owner_id = ?1 ORDER BY fire_at",
            )?;
            let rows = stmt.query_map(params![owner_id], |row| {
                Ok(ReminderRow {
                    id: row.get(0)?,
                    owner_id: row.get(1)?,
                    credential_label: row.get(2)?,
                    fire_at: row.get(3)?,
                    created_at: row.get(4)?,
                })
            })?;
            let mut reminders = Vec::new();
            for row in rows {
                reminders.push(row?);
            }
            Ok(reminders)
        })
        .await
        .map_err(map_tr_err)
}

/// Delete a reminder scoped to its owner. Returns affected row count.
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
                "DELETE FROM reminders WHERE id = ?1 AND owner_id = ?2",
                params![id, owner_id],
            )?;
            Ok(affected)
        })
        .await
        .map_err(map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IdentityRow;
    use crate::queries::identities;

    async fn db_with_owner(owner_id: &str) -> Database {
        let db = Database::open(":memory:").await.unwrap();
        identities::insert_identity(
            &db,
            &IdentityRow {
                id: owner_id.to_string(),
                email: format!("{owner_id}@example.com"),
                password_hash: "$argon2id$stub".to_string(),
                created_at: "2026-01-01T00:00:00Z".to_string(),
            },
        )
        .await
        .unwrap();
        db
    }

    fn sample_row(owner_id: &str, id: &str, fire_at: &str) -> ReminderRow {
        ReminderRow {
            id: id.to_string(),
            owner_id: owner_id.to_string(),
            credential_label: "mail".to_string(),
            fire_at: fire_at.to_string(),
            created_at: "2026-01-01T00:00:00Z".to_string(),
        }
    }

    #[tokio::test]
    async fn list_orders_by_fire_time() {
        let owner = uuid::Uuid::new_v4().to_string();
        let db = db_with_owner(&owner).await;
        insert_reminder(&db, &sample_row(&owner, "r1", "2026-06-01T00:00:00Z"))
            .await
            .unwrap();
        insert_reminder(&db, &sample_row(&owner, "r2", "2026-03-01T00:00:00Z"))
            .await
            .unwrap();

        let rows = list_by_owner(&db, &owner).await.unwrap();
        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["r2", "r1"]);
    }

    #[tokio::test]
    async fn delete_is_owner_scoped() {
        let owner_a = uuid::Uuid::new_v4().to_string();
        let owner_b = uuid::Uuid::new_v4().to_string();
        let db = db_with_owner(&owner_a).await;
        identities::insert_identity(
            &db,
            &IdentityRow {
                id: owner_b.clone(),
                email: "b@example.com".to_string(),
                password_hash: "$argon2id$stub".to_string(),
                created_at: "2026-01-01T00:00:00Z".to_string(),
            },
        )
        .await
        .unwrap();
        insert_reminder(&db, &sample_row(&owner_a, "r1", "2026-06-01T00:00:00Z"))
            .await
            .unwrap();

        assert_eq!(delete_for_owner(&db, &owner_b, "r1").await.unwrap(), 0);
        assert_eq!(delete_for_owner(&db, &owner_a, "r1").await.unwrap(), 1);
    }
}
