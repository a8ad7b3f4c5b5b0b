mod create;
mod delete;
mod list;
mod update;

pub use create::{add_note, CreateNoteRequest};
pub use delete::{delete_note, DeleteNoteResponse};
pub use list::fetch_all_notes;
pub use update::update_note;
