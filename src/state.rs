use crate::service::NoteService;
use crate::store::postgres::PgNoteStore;

/// Shared application state, constructed once in `main` and handed to the
/// router. Holds the service plus the concrete store for health probing.
#[derive(Clone)]
pub struct AppState {
    pub notes: NoteService,
    pub store: PgNoteStore,
}
