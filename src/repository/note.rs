use chrono::Utc;
use diesel::prelude::*;

use crate::domain::note::{NewNote, Note};
use crate::domain::types::NoteBody;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, NoteReader, NoteWriter};

/// Comment recorded on the audit row written by a suggestion approval.
pub const APPROVAL_COMMENT: &str = "Suggestion approved";

impl NoteReader for DieselRepository {
    fn get_note_by_id(&self, id: i32) -> RepositoryResult<Option<Note>> {
        use crate::models::note::Note as DbNote;
        use crate::schema::application_notes;

        let mut conn = self.conn()?;
        let note = application_notes::table
            .find(id)
            .first::<DbNote>(&mut conn)
            .optional()?;

        note.map(|row| Note::try_from(row).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_notes(&self, application_id: i32) -> RepositoryResult<Vec<Note>> {
        use crate::models::note::Note as DbNote;
        use crate::schema::application_notes;

        let mut conn = self.conn()?;
        application_notes::table
            .filter(application_notes::application_id.eq(application_id))
            .order(application_notes::id.asc())
            .load::<DbNote>(&mut conn)?
            .into_iter()
            .map(|row| Note::try_from(row).map_err(RepositoryError::from))
            .collect()
    }
}

impl NoteWriter for DieselRepository {
    fn create_note(&self, new_note: &NewNote) -> RepositoryResult<Note> {
        use crate::models::note::{NewNote as DbNewNote, Note as DbNote};
        use crate::schema::application_notes;

        let mut conn = self.conn()?;
        let insertable = DbNewNote::from_domain(new_note, Utc::now().naive_utc());

        let created: DbNote = diesel::insert_into(application_notes::table)
            .values(&insertable)
            .get_result(&mut conn)?;

        Ok(Note::try_from(created)?)
    }

    fn update_note_body(&self, note_id: i32, body: &NoteBody) -> RepositoryResult<Note> {
        use crate::models::note::Note as DbNote;
        use crate::schema::application_notes;

        let mut conn = self.conn()?;
        let updated: DbNote = diesel::update(application_notes::table.find(note_id))
            .set(application_notes::body.eq(body.as_str()))
            .get_result(&mut conn)?;

        Ok(Note::try_from(updated)?)
    }

    fn delete_note(&self, note_id: i32) -> RepositoryResult<()> {
        use crate::schema::application_notes;

        let mut conn = self.conn()?;
        let affected =
            diesel::delete(application_notes::table.find(note_id)).execute(&mut conn)?;

        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    fn accept_suggestion(&self, note_id: i32, accepted_by: i32) -> RepositoryResult<Note> {
        use crate::models::note::Note as DbNote;
        use crate::schema::{application_notes, applications, status_history};

        let mut conn = self.conn()?;
        let now = Utc::now().naive_utc();

        let accepted = conn.transaction::<DbNote, RepositoryError, _>(|conn| {
            let note: DbNote = application_notes::table.find(note_id).first(conn)?;

            if note.kind != "suggestion" {
                return Err(RepositoryError::ValidationError(
                    "note is not a status suggestion".to_string(),
                ));
            }
            if note.accepted_at.is_some() {
                return Err(RepositoryError::ValidationError(
                    "suggestion already accepted".to_string(),
                ));
            }
            let target_status_id = note.suggested_status_id.ok_or_else(|| {
                RepositoryError::ValidationError(
                    "suggestion carries no target status".to_string(),
                )
            })?;

            diesel::update(applications::table.find(note.application_id))
                .set(applications::status_id.eq(target_status_id))
                .execute(conn)?;

            diesel::insert_into(status_history::table)
                .values((
                    status_history::application_id.eq(note.application_id),
                    status_history::status_id.eq(target_status_id),
                    status_history::changed_by.eq(accepted_by),
                    status_history::comment.eq(APPROVAL_COMMENT),
                    status_history::changed_at.eq(now),
                ))
                .execute(conn)?;

            let stamped: DbNote = diesel::update(application_notes::table.find(note_id))
                .set((
                    application_notes::accepted_by.eq(accepted_by),
                    application_notes::accepted_at.eq(now),
                ))
                .get_result(conn)?;

            Ok(stamped)
        })?;

        Ok(Note::try_from(accepted)?)
    }
}
