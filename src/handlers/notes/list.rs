use axum::{extract::State, Extension};

use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;
use crate::store::Note;

/// GET /api/notes/fetchallnotes - all notes belonging to the caller
pub async fn fetch_all_notes(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<Vec<Note>> {
    let notes = state.notes.list(auth.user_id).await?;
    Ok(ApiResponse::success(notes))
}
