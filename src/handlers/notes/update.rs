use axum::{
    extract::{Path, State},
    Extension, Json,
};

use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;
use crate::store::{Note, NoteChanges};
use crate::types::NoteId;

/// PUT /api/notes/updatenote/:id - sparse update of a note the caller owns.
/// Absent fields are left untouched.
pub async fn update_note(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<NoteId>,
    Json(changes): Json<NoteChanges>,
) -> ApiResult<Note> {
    let note = state.notes.update(auth.user_id, id, changes).await?;
    Ok(ApiResponse::success(note))
}
