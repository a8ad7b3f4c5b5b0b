pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;

use crate::types::{NoteId, UserId};

/// Tag applied to notes created without one
pub const DEFAULT_TAG: &str = "General";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Note {
    pub id: NoteId,
    pub owner: UserId,
    pub title: String,
    pub description: String,
    pub tag: String,
    pub created_at: DateTime<Utc>,
}

/// A note as handed to the store for insertion. The store assigns `id` and
/// `created_at`.
#[derive(Debug, Clone)]
pub struct NewNote {
    pub owner: UserId,
    pub title: String,
    pub description: String,
    pub tag: String,
}

/// Sparse update: `None` means the field was not supplied and stays
/// untouched. A supplied empty string is a real value, not an omission.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NoteChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tag: Option<String>,
}

impl NoteChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.tag.is_none()
    }
}

/// Errors from the note store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Persistence contract for notes.
///
/// Implementations must keep the id-lookup-then-mutate sequences used by the
/// service at least read-your-writes consistent.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// All notes belonging to `owner`, store-determined order.
    async fn find_by_owner(&self, owner: UserId) -> Result<Vec<Note>, StoreError>;

    /// Single note by id, or `None` when absent.
    async fn find_by_id(&self, id: NoteId) -> Result<Option<Note>, StoreError>;

    /// Persist a new note, assigning its id and creation timestamp.
    async fn insert(&self, new: NewNote) -> Result<Note, StoreError>;

    /// Apply only the supplied fields and return the updated note.
    async fn update_fields(&self, id: NoteId, changes: NoteChanges) -> Result<Note, StoreError>;

    /// Remove the note permanently, returning its prior state.
    async fn delete_by_id(&self, id: NoteId) -> Result<Note, StoreError>;
}
