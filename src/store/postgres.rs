use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::store::{NewNote, Note, NoteChanges, NoteStore, StoreError};
use crate::types::{NoteId, UserId};

/// Postgres-backed note store.
///
/// Constructed once at startup with an explicit pool and passed into the
/// service; there is no shared module-level handle.
#[derive(Clone)]
pub struct PgNoteStore {
    pool: PgPool,
}

impl PgNoteStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect using DATABASE_URL and the configured pool limits.
    pub async fn connect(database_url: &str, config: &DatabaseConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_secs))
            .connect(database_url)
            .await?;

        info!("Connected to notes database");
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create the notes table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS notes (
                 id          UUID PRIMARY KEY,
                 owner       UUID NOT NULL,
                 title       TEXT NOT NULL,
                 description TEXT NOT NULL,
                 tag         TEXT NOT NULL,
                 created_at  TIMESTAMPTZ NOT NULL
             )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS notes_owner_idx ON notes (owner)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl NoteStore for PgNoteStore {
    async fn find_by_owner(&self, owner: UserId) -> Result<Vec<Note>, StoreError> {
        let notes = sqlx::query_as::<_, Note>(
            "SELECT id, owner, title, description, tag, created_at
             FROM notes
             WHERE owner = $1",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        Ok(notes)
    }

    async fn find_by_id(&self, id: NoteId) -> Result<Option<Note>, StoreError> {
        let note = sqlx::query_as::<_, Note>(
            "SELECT id, owner, title, description, tag, created_at
             FROM notes
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(note)
    }

    async fn insert(&self, new: NewNote) -> Result<Note, StoreError> {
        let note = sqlx::query_as::<_, Note>(
            "INSERT INTO notes (id, owner, title, description, tag, created_at)
             VALUES ($1, $2, $3, $4, $5, now())
             RETURNING id, owner, title, description, tag, created_at",
        )
        .bind(NoteId::new())
        .bind(new.owner)
        .bind(new.title)
        .bind(new.description)
        .bind(new.tag)
        .fetch_one(&self.pool)
        .await?;

        Ok(note)
    }

    async fn update_fields(&self, id: NoteId, changes: NoteChanges) -> Result<Note, StoreError> {
        // Absent fields keep their current value
        let note = sqlx::query_as::<_, Note>(
            "UPDATE notes
             SET title       = COALESCE($2, title),
                 description = COALESCE($3, description),
                 tag         = COALESCE($4, tag)
             WHERE id = $1
             RETURNING id, owner, title, description, tag, created_at",
        )
        .bind(id)
        .bind(changes.title)
        .bind(changes.description)
        .bind(changes.tag)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)?;

        Ok(note)
    }

    async fn delete_by_id(&self, id: NoteId) -> Result<Note, StoreError> {
        let note = sqlx::query_as::<_, Note>(
            "DELETE FROM notes
             WHERE id = $1
             RETURNING id, owner, title, description, tag, created_at",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)?;

        Ok(note)
    }
}
