use axum::{
    extract::{Path, State},
    Extension,
};
use serde::Serialize;

use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;
use crate::store::Note;
use crate::types::NoteId;

/// Confirmation payload carrying the removed note's prior state
#[derive(Debug, Serialize)]
pub struct DeleteNoteResponse {
    pub message: String,
    pub deleted_note: Note,
}

/// DELETE /api/notes/deletenote/:id - permanently remove a note the caller owns
pub async fn delete_note(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<NoteId>,
) -> ApiResult<DeleteNoteResponse> {
    let deleted = state.notes.delete(auth.user_id, id).await?;

    Ok(ApiResponse::success(DeleteNoteResponse {
        message: "Note has been deleted".to_string(),
        deleted_note: deleted,
    }))
}
