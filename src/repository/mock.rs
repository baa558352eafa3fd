//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::application::{Application, NewApplication};
use crate::domain::lookup::{Field, Municipality};
use crate::domain::note::{NewNote, Note};
use crate::domain::profile::{NewProfile, Profile};
use crate::domain::status::{Status, StatusHistoryEntry};
use crate::domain::types::NoteBody;
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    ApplicationListQuery, ApplicationReader, ApplicationWriter, LookupReader, NoteReader,
    NoteWriter, ProfileReader, ProfileWriter,
};

mock! {
    pub Repository {}

    impl ApplicationReader for Repository {
        fn get_application_by_id(&self, id: i32) -> RepositoryResult<Option<Application>>;
        fn list_applications(
            &self,
            query: ApplicationListQuery,
        ) -> RepositoryResult<Vec<Application>>;
        fn list_status_history(
            &self,
            application_id: i32,
        ) -> RepositoryResult<Vec<StatusHistoryEntry>>;
    }

    impl ApplicationWriter for Repository {
        fn create_application(
            &self,
            new_application: &NewApplication,
            status_id: i32,
        ) -> RepositoryResult<Application>;
        fn set_application_status(
            &self,
            application_id: i32,
            status_id: i32,
            changed_by: i32,
            comment: Option<&str>,
        ) -> RepositoryResult<Application>;
        fn assign_expert(
            &self,
            application_id: i32,
            expert_id: Option<i32>,
        ) -> RepositoryResult<Application>;
    }

    impl NoteReader for Repository {
        fn get_note_by_id(&self, id: i32) -> RepositoryResult<Option<Note>>;
        fn list_notes(&self, application_id: i32) -> RepositoryResult<Vec<Note>>;
    }

    impl NoteWriter for Repository {
        fn create_note(&self, new_note: &NewNote) -> RepositoryResult<Note>;
        fn update_note_body(&self, note_id: i32, body: &NoteBody) -> RepositoryResult<Note>;
        fn delete_note(&self, note_id: i32) -> RepositoryResult<()>;
        fn accept_suggestion(&self, note_id: i32, accepted_by: i32) -> RepositoryResult<Note>;
    }

    impl ProfileReader for Repository {
        fn get_profile_by_id(&self, id: i32) -> RepositoryResult<Option<Profile>>;
        fn get_profile_by_email(&self, email: &str) -> RepositoryResult<Option<Profile>>;
        fn list_experts(&self) -> RepositoryResult<Vec<Profile>>;
    }

    impl ProfileWriter for Repository {
        fn create_or_update_profile(&self, new_profile: &NewProfile) -> RepositoryResult<Profile>;
    }

    impl LookupReader for Repository {
        fn list_statuses(&self) -> RepositoryResult<Vec<Status>>;
        fn get_status_by_id(&self, id: i32) -> RepositoryResult<Option<Status>>;
        fn get_status_by_label(&self, label: &str) -> RepositoryResult<Option<Status>>;
        fn list_fields(&self) -> RepositoryResult<Vec<Field>>;
        fn list_municipalities(&self) -> RepositoryResult<Vec<Municipality>>;
    }
}
