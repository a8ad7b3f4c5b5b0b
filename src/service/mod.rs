use std::sync::Arc;

use thiserror::Error;

use crate::store::{NewNote, Note, NoteChanges, NoteStore, StoreError, DEFAULT_TAG};
use crate::types::{NoteId, UserId};

/// Business errors from note operations
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("note not found")]
    NotFound,

    #[error("caller does not own this note")]
    Forbidden,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Ownership-checked CRUD over the per-user note collection.
///
/// Stateless between calls; the injected store is the only collaborator.
#[derive(Clone)]
pub struct NoteService {
    store: Arc<dyn NoteStore>,
}

impl NoteService {
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        Self { store }
    }

    /// All notes belonging to the caller, possibly empty.
    pub async fn list(&self, owner: UserId) -> Result<Vec<Note>, ServiceError> {
        Ok(self.store.find_by_owner(owner).await?)
    }

    /// Persist a new note for the caller. Input rules have already been
    /// enforced by the request validator; the tag falls back to the default
    /// when not supplied.
    pub async fn create(
        &self,
        owner: UserId,
        title: String,
        description: String,
        tag: Option<String>,
    ) -> Result<Note, ServiceError> {
        let note = self
            .store
            .insert(NewNote {
                owner,
                title,
                description,
                tag: tag.unwrap_or_else(|| DEFAULT_TAG.to_string()),
            })
            .await?;

        Ok(note)
    }

    /// Apply a sparse update to a note the caller owns.
    ///
    /// The existence check runs before the ownership check: a nonexistent id
    /// is `NotFound` no matter who asks.
    pub async fn update(
        &self,
        owner: UserId,
        id: NoteId,
        changes: NoteChanges,
    ) -> Result<Note, ServiceError> {
        let existing = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound)?;

        if existing.owner != owner {
            return Err(ServiceError::Forbidden);
        }

        Ok(self.store.update_fields(id, changes).await?)
    }

    /// Permanently remove a note the caller owns, returning its prior state.
    pub async fn delete(&self, owner: UserId, id: NoteId) -> Result<Note, ServiceError> {
        let existing = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound)?;

        if existing.owner != owner {
            return Err(ServiceError::Forbidden);
        }

        Ok(self.store.delete_by_id(id).await?)
    }
}
