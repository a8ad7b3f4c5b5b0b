use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::store::{NewNote, Note, NoteChanges, NoteStore, StoreError};
use crate::types::{NoteId, UserId};

/// In-memory note store for exercising the service without a database.
#[derive(Default)]
pub struct MemoryNoteStore {
    notes: Mutex<HashMap<NoteId, Note>>,
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct snapshot of a stored note, bypassing the service
    pub fn snapshot(&self, id: NoteId) -> Option<Note> {
        self.notes.lock().unwrap().get(&id).cloned()
    }
}

#[async_trait]
impl NoteStore for MemoryNoteStore {
    async fn find_by_owner(&self, owner: UserId) -> Result<Vec<Note>, StoreError> {
        let notes = self.notes.lock().unwrap();
        Ok(notes.values().filter(|n| n.owner == owner).cloned().collect())
    }

    async fn find_by_id(&self, id: NoteId) -> Result<Option<Note>, StoreError> {
        Ok(self.notes.lock().unwrap().get(&id).cloned())
    }

    async fn insert(&self, new: NewNote) -> Result<Note, StoreError> {
        let note = Note {
            id: NoteId::new(),
            owner: new.owner,
            title: new.title,
            description: new.description,
            tag: new.tag,
            created_at: Utc::now(),
        };
        self.notes.lock().unwrap().insert(note.id, note.clone());
        Ok(note)
    }

    async fn update_fields(&self, id: NoteId, changes: NoteChanges) -> Result<Note, StoreError> {
        let mut notes = self.notes.lock().unwrap();
        let note = notes.get_mut(&id).ok_or(StoreError::NotFound)?;

        if let Some(title) = changes.title {
            note.title = title;
        }
        if let Some(description) = changes.description {
            note.description = description;
        }
        if let Some(tag) = changes.tag {
            note.tag = tag;
        }

        Ok(note.clone())
    }

    async fn delete_by_id(&self, id: NoteId) -> Result<Note, StoreError> {
        self.notes
            .lock()
            .unwrap()
            .remove(&id)
            .ok_or(StoreError::NotFound)
    }
}
