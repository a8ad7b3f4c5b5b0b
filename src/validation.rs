//! Field-level validation for the note create payload.
//!
//! Runs before the service is invoked; the service itself never re-validates.

use serde::Serialize;

use crate::handlers::notes::CreateNoteRequest;

pub const MIN_TITLE_CHARS: usize = 3;
pub const MIN_DESCRIPTION_CHARS: usize = 5;

/// A single violated field, in validator declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

/// Check the create payload, returning the violated fields in order.
/// An empty result means the payload is acceptable.
pub fn validate_new_note(payload: &CreateNoteRequest) -> Vec<FieldViolation> {
    let mut violations = Vec::new();

    // Lengths are counted in characters, not bytes
    if payload.title.chars().count() < MIN_TITLE_CHARS {
        violations.push(FieldViolation {
            field: "title",
            message: format!("title must be at least {} characters", MIN_TITLE_CHARS),
        });
    }

    if payload.description.chars().count() < MIN_DESCRIPTION_CHARS {
        violations.push(FieldViolation {
            field: "description",
            message: format!(
                "description must be at least {} characters",
                MIN_DESCRIPTION_CHARS
            ),
        });
    }

    violations
}
