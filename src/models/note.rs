//! Diesel models for storing application notes and suggestions.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::note::{Note as DomainNote, NewNote as DomainNewNote, NoteKind};
use crate::domain::profile::Role;
use crate::domain::types::TypeConstraintError;
use crate::models::application::Application;

#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(belongs_to(Application, foreign_key = application_id))]
#[diesel(table_name = crate::schema::application_notes)]
pub struct Note {
    pub id: i32,
    pub application_id: i32,
    pub body: String,
    pub kind: String,
    pub author_role: String,
    pub author_id: i32,
    pub suggested_status_id: Option<i32>,
    pub accepted_by: Option<i32>,
    pub accepted_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::application_notes)]
pub struct NewNote<'a> {
    pub application_id: i32,
    pub body: &'a str,
    pub kind: &'a str,
    pub author_role: &'a str,
    pub author_id: i32,
    pub suggested_status_id: Option<i32>,
    pub created_at: NaiveDateTime,
}

impl TryFrom<Note> for DomainNote {
    type Error = TypeConstraintError;

    fn try_from(note: Note) -> Result<Self, Self::Error> {
        Ok(Self {
            id: note.id,
            application_id: note.application_id,
            body: note.body,
            kind: NoteKind::try_from(note.kind.as_str())?,
            author_role: Role::try_from(note.author_role.as_str())?,
            author_id: note.author_id,
            suggested_status_id: note.suggested_status_id,
            accepted_by: note.accepted_by,
            accepted_at: note.accepted_at,
            created_at: note.created_at,
        })
    }
}

impl<'a> NewNote<'a> {
    pub fn from_domain(note: &'a DomainNewNote, created_at: NaiveDateTime) -> Self {
        Self {
            application_id: note.application_id,
            body: note.body.as_str(),
            kind: note.kind.as_str(),
            author_role: note.author_role.as_str(),
            author_id: note.author_id,
            suggested_status_id: note.suggested_status_id,
            created_at,
        }
    }
}
