use crate::db::DbPool;
use crate::domain::application::{Application, NewApplication};
use crate::domain::lookup::{Field, Municipality};
use crate::domain::note::{NewNote, Note};
use crate::domain::profile::{NewProfile, Profile};
use crate::domain::status::{Status, StatusHistoryEntry};
use crate::domain::types::NoteBody;
use crate::repository::errors::RepositoryResult;

pub mod application;
pub mod errors;
pub mod lookup;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod note;
pub mod profile;

/// Scope selector for application listings: executives see everything,
/// experts see their assignments, applicants see their own submissions.
#[derive(Debug, Clone, Default)]
pub struct ApplicationListQuery {
    pub applicant_id: Option<i32>,
    pub assigned_expert_id: Option<i32>,
}

impl ApplicationListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn applicant(mut self, applicant_id: i32) -> Self {
        self.applicant_id = Some(applicant_id);
        self
    }

    pub fn assigned_expert(mut self, expert_id: i32) -> Self {
        self.assigned_expert_id = Some(expert_id);
        self
    }
}

pub trait ApplicationReader {
    fn get_application_by_id(&self, id: i32) -> RepositoryResult<Option<Application>>;
    fn list_applications(&self, query: ApplicationListQuery) -> RepositoryResult<Vec<Application>>;
    fn list_status_history(&self, application_id: i32)
    -> RepositoryResult<Vec<StatusHistoryEntry>>;
}

pub trait ApplicationWriter {
    /// Inserts the application and its initial history row in one
    /// transaction.
    fn create_application(
        &self,
        new_application: &NewApplication,
        status_id: i32,
    ) -> RepositoryResult<Application>;
    /// Updates the status and appends the audit row in one transaction.
    fn set_application_status(
        &self,
        application_id: i32,
        status_id: i32,
        changed_by: i32,
        comment: Option<&str>,
    ) -> RepositoryResult<Application>;
    /// Writes the assignment column only; no history row.
    fn assign_expert(
        &self,
        application_id: i32,
        expert_id: Option<i32>,
    ) -> RepositoryResult<Application>;
}

pub trait NoteReader {
    fn get_note_by_id(&self, id: i32) -> RepositoryResult<Option<Note>>;
    fn list_notes(&self, application_id: i32) -> RepositoryResult<Vec<Note>>;
}

pub trait NoteWriter {
    fn create_note(&self, new_note: &NewNote) -> RepositoryResult<Note>;
    fn update_note_body(&self, note_id: i32, body: &NoteBody) -> RepositoryResult<Note>;
    fn delete_note(&self, note_id: i32) -> RepositoryResult<()>;
    /// Applies the suggested status to the application, appends the audit
    /// row, and stamps the note as accepted, all in one transaction.
    fn accept_suggestion(&self, note_id: i32, accepted_by: i32) -> RepositoryResult<Note>;
}

pub trait ProfileReader {
    fn get_profile_by_id(&self, id: i32) -> RepositoryResult<Option<Profile>>;
    fn get_profile_by_email(&self, email: &str) -> RepositoryResult<Option<Profile>>;
    fn list_experts(&self) -> RepositoryResult<Vec<Profile>>;
}

pub trait ProfileWriter {
    /// Upserts keyed by email, refreshing name and role from the verified
    /// claims.
    fn create_or_update_profile(&self, new_profile: &NewProfile) -> RepositoryResult<Profile>;
}

pub trait LookupReader {
    fn list_statuses(&self) -> RepositoryResult<Vec<Status>>;
    fn get_status_by_id(&self, id: i32) -> RepositoryResult<Option<Status>>;
    fn get_status_by_label(&self, label: &str) -> RepositoryResult<Option<Status>>;
    fn list_fields(&self) -> RepositoryResult<Vec<Field>>;
    fn list_municipalities(&self) -> RepositoryResult<Vec<Municipality>>;
}

/// Diesel-backed implementation of every repository trait.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub(crate) fn conn(&self) -> RepositoryResult<crate::db::DbConnection> {
        Ok(self.pool.get()?)
    }
}
