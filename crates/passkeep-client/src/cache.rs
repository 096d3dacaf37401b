// SPDX-FileCopyrightText: 2026 Passkeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Optimistic local mirror of the server-side credential list.
//!
//! The mirror lives for the session and is refreshed wholesale; every
//! refresh bumps a generation counter. Mutations are staged optimistically
//! and carry a ticket stamped with the generation they were staged under.
//! A ticket whose generation predates the latest refresh is stale: commit
//! and rollback both ignore it, so an in-flight mutation can never write
//! into a mirror it was not staged against.

use uuid::Uuid;

use crate::api::CredentialRecord;

/// In-progress edit of a single entry, not yet sent anywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBuffer {
    pub username: String,
    pub secret: String,
}

/// Sync state of a single cache entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryState {
    /// Matches the last server response.
    Synced,
    /// Created locally; the server has not confirmed it yet.
    PendingCreate,
    /// Updated locally; `prev` restores the entry on rollback.
    PendingUpdate { prev: CredentialRecord },
    /// Deleted locally; hidden from listings until the server confirms.
    PendingDelete,
}

/// A mirrored credential plus its UI-only state.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub record: CredentialRecord,
    pub visible: bool,
    pub edit_buffer: Option<EditBuffer>,
    pub state: EntryState,
}

impl CacheEntry {
    fn synced(record: CredentialRecord) -> Self {
        Self {
            record,
            visible: false,
            edit_buffer: None,
            state: EntryState::Synced,
        }
    }
}

/// Handle for committing or rolling back one staged mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationTicket {
    generation: u64,
    id: Uuid,
}

impl MutationTicket {
    /// The (possibly provisional) id of the entry this ticket covers.
    pub fn id(&self) -> Uuid {
        self.id
    }
}

/// Session-lifetime mirror with staged optimistic mutations.
#[derive(Debug, Default)]
pub struct SyncCache {
    entries: Vec<CacheEntry>,
    generation: u64,
}

impl SyncCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Replace the whole mirror with a fresh server listing.
    ///
    /// Invalidates every outstanding ticket and drops all UI state.
    pub fn replace_all(&mut self, records: Vec<CredentialRecord>) {
        self.generation += 1;
        self.entries = records.into_iter().map(CacheEntry::synced).collect();
    }

    /// Records currently presentable, in mirror order. Entries staged for
    /// deletion are excluded.
    pub fn records(&self) -> Vec<&CredentialRecord> {
        self.entries
            .iter()
            .filter(|e| e.state != EntryState::PendingDelete)
            .map(|e| &e.record)
            .collect()
    }

    pub fn entry(&self, id: Uuid) -> Option<&CacheEntry> {
        self.entries.iter().find(|e| e.record.id == id)
    }

    /// Case-insensitive substring search over app names.
    pub fn search(&self, needle: &str) -> Vec<&CredentialRecord> {
        let needle = needle.to_lowercase();
        self.records()
            .into_iter()
            .filter(|r| r.app_name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Flip an entry's secret-visibility toggle. Returns the new setting.
    pub fn toggle_visibility(&mut self, id: Uuid) -> Option<bool> {
        let entry = self.entry_mut(id)?;
        entry.visible = !entry.visible;
        Some(entry.visible)
    }

    pub fn set_edit_buffer(&mut self, id: Uuid, buffer: EditBuffer) -> bool {
        match self.entry_mut(id) {
            Some(entry) => {
                entry.edit_buffer = Some(buffer);
                true
            }
            None => false,
        }
    }

    pub fn take_edit_buffer(&mut self, id: Uuid) -> Option<EditBuffer> {
        self.entry_mut(id)?.edit_buffer.take()
    }

    /// Stage an optimistic create with a provisional record.
    pub fn stage_create(&mut self, record: CredentialRecord) -> MutationTicket {
        let ticket = self.ticket(record.id);
        self.entries.push(CacheEntry {
            record,
            visible: false,
            edit_buffer: None,
            state: EntryState::PendingCreate,
        });
        ticket
    }

    /// Stage an optimistic update, stashing the previous record for
    /// rollback. Returns `None` for an unknown or already-pending entry.
    pub fn stage_update(
        &mut self,
        id: Uuid,
        username: Option<&str>,
        secret: Option<&str>,
    ) -> Option<MutationTicket> {
        let generation = self.generation;
        let entry = self.entry_mut(id)?;
        if entry.state != EntryState::Synced {
            return None;
        }
        let prev = entry.record.clone();
        if let Some(username) = username {
            entry.record.username = username.to_string();
        }
        if let Some(secret) = secret {
            entry.record.secret = secret.to_string();
        }
        entry.state = EntryState::PendingUpdate { prev };
        Some(MutationTicket { generation, id })
    }

    /// Stage an optimistic delete. The entry stays in the mirror but is
    /// hidden from listings until committed or rolled back.
    pub fn stage_delete(&mut self, id: Uuid) -> Option<MutationTicket> {
        let generation = self.generation;
        let entry = self.entry_mut(id)?;
        if entry.state != EntryState::Synced {
            return None;
        }
        entry.state = EntryState::PendingDelete;
        Some(MutationTicket { generation, id })
    }

    /// Commit a staged mutation with the server's confirmed record (absent
    /// for deletes). Stale and unknown tickets are ignored.
    pub fn commit(&mut self, ticket: MutationTicket, confirmed: Option<CredentialRecord>) -> bool {
        if ticket.generation != self.generation {
            return false;
        }
        let Some(index) = self.index_of(ticket.id) else {
            return false;
        };
        match self.entries[index].state.clone() {
            EntryState::PendingCreate | EntryState::PendingUpdate { .. } => {
                if let Some(record) = confirmed {
                    self.entries[index].record = record;
                }
                self.entries[index].state = EntryState::Synced;
                true
            }
            EntryState::PendingDelete => {
                self.entries.remove(index);
                true
            }
            EntryState::Synced => false,
        }
    }

    /// Roll a staged mutation back to the pre-mutation mirror. Stale and
    /// unknown tickets are ignored.
    pub fn rollback(&mut self, ticket: MutationTicket) -> bool {
        if ticket.generation != self.generation {
            return false;
        }
        let Some(index) = self.index_of(ticket.id) else {
            return false;
        };
        match self.entries[index].state.clone() {
            EntryState::PendingCreate => {
                self.entries.remove(index);
                true
            }
            EntryState::PendingUpdate { prev } => {
                self.entries[index].record = prev;
                self.entries[index].state = EntryState::Synced;
                true
            }
            EntryState::PendingDelete => {
                self.entries[index].state = EntryState::Synced;
                true
            }
            EntryState::Synced => false,
        }
    }

    fn ticket(&self, id: Uuid) -> MutationTicket {
        MutationTicket {
            generation: self.generation,
            id,
        }
    }

    fn entry_mut(&mut self, id: Uuid) -> Option<&mut CacheEntry> {
        self.entries.iter_mut().find(|e| e.record.id == id)
    }

    fn index_of(&self, id: Uuid) -> Option<usize> {
        self.entries.iter().position(|e| e.record.id == id)
    }
}
