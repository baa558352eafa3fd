//! Form types for comments and status suggestions.

use serde::Deserialize;

use crate::domain::note::NewNote;
use crate::domain::profile::Role;
use crate::domain::types::{NoteBody, TypeConstraintError};
use crate::forms::FormError;

#[derive(Debug, Deserialize)]
/// Form data for adding a comment to an application. The body is
/// sanitized and checked for emptiness when the note is built.
pub struct AddCommentForm {
    pub application_id: i32,
    pub body: String,
}

impl AddCommentForm {
    pub fn to_new_note(&self, author_role: Role, author_id: i32) -> Result<NewNote, FormError> {
        let body = parse_body(&self.body)?;
        Ok(NewNote::comment(
            self.application_id,
            body,
            author_role,
            author_id,
        ))
    }
}

#[derive(Debug, Deserialize)]
/// Form data for an expert suggesting a status change.
pub struct SuggestStatusForm {
    pub application_id: i32,
    pub body: String,
    pub status_id: i32,
}

impl SuggestStatusForm {
    pub fn to_new_note(&self, author_id: i32) -> Result<NewNote, FormError> {
        let body = parse_body(&self.body)?;
        Ok(NewNote::suggestion(
            self.application_id,
            body,
            author_id,
            self.status_id,
        ))
    }
}

#[derive(Debug, Deserialize)]
/// Form data for editing an existing comment.
pub struct EditNoteForm {
    pub note_id: i32,
    pub body: String,
}

impl EditNoteForm {
    pub fn parsed_body(&self) -> Result<NoteBody, FormError> {
        parse_body(&self.body)
    }
}

#[derive(Debug, Deserialize)]
/// Form data identifying a note to delete or approve.
pub struct NoteIdForm {
    pub note_id: i32,
}

fn parse_body(raw: &str) -> Result<NoteBody, FormError> {
    NoteBody::try_from(raw).map_err(|err| match err {
        TypeConstraintError::EmptyString => {
            FormError::Invalid("Comment text cannot be empty".to_string())
        }
        _ => FormError::Invalid("Invalid comment text".to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::note::NoteKind;

    #[test]
    fn test_comment_form_builds_note() {
        let form = AddCommentForm {
            application_id: 4,
            body: "Looks promising".to_string(),
        };
        let note = form.to_new_note(Role::Executive, 2).unwrap();
        assert_eq!(note.application_id, 4);
        assert_eq!(note.kind, NoteKind::Comment);
        assert!(note.suggested_status_id.is_none());
    }

    #[test]
    fn test_suggestion_form_carries_status() {
        let form = SuggestStatusForm {
            application_id: 4,
            body: "Ready for the shortlist".to_string(),
            status_id: 3,
        };
        let note = form.to_new_note(9).unwrap();
        assert_eq!(note.kind, NoteKind::Suggestion);
        assert_eq!(note.suggested_status_id, Some(3));
        assert_eq!(note.author_role, Role::Expert);
    }

    #[test]
    fn test_blank_body_is_rejected() {
        let form = AddCommentForm {
            application_id: 1,
            body: "   ".to_string(),
        };
        assert!(matches!(
            form.to_new_note(Role::Expert, 1),
            Err(FormError::Invalid(_))
        ));
    }

    #[test]
    fn test_markup_is_stripped_from_body() {
        let form = AddCommentForm {
            application_id: 1,
            body: "<script>alert(1)</script>fine".to_string(),
        };
        let note = form.to_new_note(Role::Expert, 1).unwrap();
        assert_eq!(note.body.as_str(), "fine");
    }
}
