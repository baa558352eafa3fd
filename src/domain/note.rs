use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::profile::Role;
use crate::domain::types::{NoteBody, TypeConstraintError};

/// Discriminator between plain reviewer comments and status suggestions.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum NoteKind {
    Comment,
    Suggestion,
}

impl NoteKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoteKind::Comment => "comment",
            NoteKind::Suggestion => "suggestion",
        }
    }
}

impl Display for NoteKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for NoteKind {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "comment" => Ok(NoteKind::Comment),
            "suggestion" => Ok(NoteKind::Suggestion),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown note kind: {other}"
            ))),
        }
    }
}

/// A reviewer note attached to an application. Suggestion notes carry a
/// structured target status and a persisted acceptance stamp instead of
/// encoding either inside the text.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Note {
    pub id: i32,
    pub application_id: i32,
    pub body: String,
    pub kind: NoteKind,
    pub author_role: Role,
    pub author_id: i32,
    pub suggested_status_id: Option<i32>,
    pub accepted_by: Option<i32>,
    pub accepted_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

impl Note {
    pub fn is_suggestion(&self) -> bool {
        self.kind == NoteKind::Suggestion
    }

    /// A suggestion counts as accepted once its acceptance stamp is set, or
    /// when its target already equals the application's current status.
    pub fn is_accepted_against(&self, current_status_id: i32) -> bool {
        self.is_suggestion()
            && (self.accepted_at.is_some() || self.suggested_status_id == Some(current_status_id))
    }
}

#[derive(Clone, Debug)]
pub struct NewNote {
    pub application_id: i32,
    pub body: NoteBody,
    pub kind: NoteKind,
    pub author_role: Role,
    pub author_id: i32,
    pub suggested_status_id: Option<i32>,
}

impl NewNote {
    /// A plain reviewer comment.
    pub fn comment(application_id: i32, body: NoteBody, author_role: Role, author_id: i32) -> Self {
        Self {
            application_id,
            body,
            kind: NoteKind::Comment,
            author_role,
            author_id,
            suggested_status_id: None,
        }
    }

    /// A status suggestion awaiting executive approval.
    pub fn suggestion(
        application_id: i32,
        body: NoteBody,
        author_id: i32,
        suggested_status_id: i32,
    ) -> Self {
        Self {
            application_id,
            body,
            kind: NoteKind::Suggestion,
            author_role: Role::Expert,
            author_id,
            suggested_status_id: Some(suggested_status_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn suggestion(target: i32, accepted: bool) -> Note {
        let now = Utc::now().naive_utc();
        Note {
            id: 1,
            application_id: 2,
            body: "Proposed moving to status: Approved".to_string(),
            kind: NoteKind::Suggestion,
            author_role: Role::Expert,
            author_id: 3,
            suggested_status_id: Some(target),
            accepted_by: accepted.then_some(4),
            accepted_at: accepted.then(|| now),
            created_at: now,
        }
    }

    #[test]
    fn suggestion_is_proposed_until_accepted() {
        let note = suggestion(7, false);
        assert!(!note.is_accepted_against(5));
        assert!(note.is_accepted_against(7));
    }

    #[test]
    fn acceptance_stamp_survives_later_status_changes() {
        let note = suggestion(7, true);
        assert!(note.is_accepted_against(5));
    }

    #[test]
    fn plain_comment_never_reports_accepted() {
        let now = Utc::now().naive_utc();
        let note = Note {
            id: 1,
            application_id: 2,
            body: "looks promising".to_string(),
            kind: NoteKind::Comment,
            author_role: Role::Executive,
            author_id: 3,
            suggested_status_id: None,
            accepted_by: None,
            accepted_at: None,
            created_at: now,
        };
        assert!(!note.is_accepted_against(5));
    }
}
