use axum::{extract::State, Extension, Json};
use serde::Deserialize;

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;
use crate::store::Note;
use crate::validation::validate_new_note;

#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    pub title: String,
    pub description: String,
    pub tag: Option<String>,
}

/// POST /api/notes/addnote - create a note owned by the caller
pub async fn add_note(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<CreateNoteRequest>,
) -> ApiResult<Note> {
    let violations = validate_new_note(&payload);
    if !violations.is_empty() {
        return Err(ApiError::validation_failed(violations));
    }

    let note = state
        .notes
        .create(auth.user_id, payload.title, payload.description, payload.tag)
        .await?;

    Ok(ApiResponse::created(note))
}
