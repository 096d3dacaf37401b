// SPDX-FileCopyrightText: 2026 Passkeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Owner-scoped reminder records.
//!
//! Reminders reference credentials by free-text label, not by id: renaming
//! or deleting a credential leaves its reminders behind. Scheduling and
//! notification delivery belong to the client.

use chrono::{DateTime, Utc};
use passkeep_core::{OwnerId, PasskeepError, Reminder};
use passkeep_storage::queries::reminders as queries;
use passkeep_storage::{Database, ReminderRow};
use tracing::debug;
use uuid::Uuid;

/// Owner-scoped CRUD over reminder records.
pub struct ReminderStore {
    db: Database,
}

impl ReminderStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Store a new reminder.
    pub async fn create(
        &self,
        owner: OwnerId,
        credential_label: &str,
        fire_at: DateTime<Utc>,
    ) -> Result<Reminder, PasskeepError> {
        let credential_label = credential_label.trim();
        if credential_label.is_empty() {
            return Err(PasskeepError::Validation(
                "credentialLabel is required".to_string(),
            ));
        }

        let id = Uuid::new_v4();
        let row = ReminderRow {
            id: id.to_string(),
            owner_id: owner.to_string(),
            credential_label: credential_label.to_string(),
            fire_at: fire_at.to_rfc3339(),
            created_at: Utc::now().to_rfc3339(),
        };
        queries::insert_reminder(&self.db, &row).await?;
        debug!(reminder_id = %id, owner_id = %owner, "reminder stored");

        Ok(Reminder {
            id,
            owner_id: owner,
            credential_label: credential_label.to_string(),
            fire_at,
        })
    }

    /// List the owner's reminders, soonest first.
    pub async fn list_for_owner(&self, owner: OwnerId) -> Result<Vec<Reminder>, PasskeepError> {
        let rows = queries::list_by_owner(&self.db, &owner.to_string()).await?;
        rows.into_iter().map(row_to_reminder).collect()
    }

    /// Delete a reminder, with the same ownership-scoped `NotFound`
    /// semantics as credentials.
    pub async fn delete(&self, owner: OwnerId, id: Uuid) -> Result<(), PasskeepError> {
        let affected =
            queries::delete_for_owner(&self.db, &owner.to_string(), &id.to_string()).await?;
        if affected == 0 {
            return Err(PasskeepError::NotFound("reminder not found".to_string()));
        }
        debug!(reminder_id = %id, owner_id = %owner, "reminder deleted");
        Ok(())
    }
}

fn row_to_reminder(row: ReminderRow) -> Result<Reminder, PasskeepError> {
    let id = Uuid::parse_str(&row.id)
        .map_err(|_| PasskeepError::Internal(format!("stored id is not a UUID: {}", row.id)))?;
    let owner_id = Uuid::parse_str(&row.owner_id).map_err(|_| {
        PasskeepError::Internal(format!("stored owner id is not a UUID: {}", row.owner_id))
    })?;
    let fire_at = DateTime::parse_from_rfc3339(&row.fire_at)
        .map_err(|e| PasskeepError::Internal(format!("stored fire_at is not RFC 3339: {e}")))?
        .with_timezone(&Utc);
    Ok(Reminder {
        id,
        owner_id: OwnerId(owner_id),
        credential_label: row.credential_label,
        fire_at,
    })
}
