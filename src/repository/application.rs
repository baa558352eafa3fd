use chrono::Utc;
use diesel::prelude::*;

use crate::domain::application::{Application, NewApplication};
use crate::domain::status::StatusHistoryEntry;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    ApplicationListQuery, ApplicationReader, ApplicationWriter, DieselRepository,
};

/// Comment recorded on the audit row written alongside the submission.
pub const SUBMISSION_COMMENT: &str = "Application submitted";

impl ApplicationReader for DieselRepository {
    fn get_application_by_id(&self, id: i32) -> RepositoryResult<Option<Application>> {
        use crate::models::application::Application as DbApplication;
        use crate::schema::applications;

        let mut conn = self.conn()?;
        let application = applications::table
            .find(id)
            .first::<DbApplication>(&mut conn)
            .optional()?;

        application
            .map(|row| Application::try_from(row).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_applications(&self, query: ApplicationListQuery) -> RepositoryResult<Vec<Application>> {
        use crate::models::application::Application as DbApplication;
        use crate::schema::applications;

        let mut conn = self.conn()?;

        let mut statement = applications::table
            .order(applications::created_at.desc())
            .into_boxed();

        if let Some(applicant_id) = query.applicant_id {
            statement = statement.filter(applications::applicant_id.eq(applicant_id));
        }
        if let Some(expert_id) = query.assigned_expert_id {
            statement = statement.filter(applications::assigned_expert_id.eq(expert_id));
        }

        statement
            .load::<DbApplication>(&mut conn)?
            .into_iter()
            .map(|row| Application::try_from(row).map_err(RepositoryError::from))
            .collect()
    }

    fn list_status_history(
        &self,
        application_id: i32,
    ) -> RepositoryResult<Vec<StatusHistoryEntry>> {
        use crate::models::status::StatusHistoryEntry as DbStatusHistoryEntry;
        use crate::schema::status_history;

        let mut conn = self.conn()?;
        let entries = status_history::table
            .filter(status_history::application_id.eq(application_id))
            .order(status_history::id.asc())
            .load::<DbStatusHistoryEntry>(&mut conn)?;

        Ok(entries.into_iter().map(Into::into).collect())
    }
}

impl ApplicationWriter for DieselRepository {
    fn create_application(
        &self,
        new_application: &NewApplication,
        status_id: i32,
    ) -> RepositoryResult<Application> {
        use crate::models::application::{
            Application as DbApplication, NewApplication as DbNewApplication,
        };
        use crate::schema::{applications, status_history};

        let mut conn = self.conn()?;
        let now = Utc::now().naive_utc();

        let created = conn.transaction::<DbApplication, RepositoryError, _>(|conn| {
            let insertable = DbNewApplication::from_domain(new_application, status_id, now);
            let created: DbApplication = diesel::insert_into(applications::table)
                .values(&insertable)
                .get_result(conn)?;

            diesel::insert_into(status_history::table)
                .values((
                    status_history::application_id.eq(created.id),
                    status_history::status_id.eq(status_id),
                    status_history::changed_by.eq(new_application.applicant_id),
                    status_history::comment.eq(SUBMISSION_COMMENT),
                    status_history::changed_at.eq(now),
                ))
                .execute(conn)?;

            Ok(created)
        })?;

        Ok(Application::try_from(created)?)
    }

    fn set_application_status(
        &self,
        application_id: i32,
        status_id: i32,
        changed_by: i32,
        comment: Option<&str>,
    ) -> RepositoryResult<Application> {
        use crate::models::application::Application as DbApplication;
        use crate::schema::{applications, status_history};

        let mut conn = self.conn()?;
        let now = Utc::now().naive_utc();

        let updated = conn.transaction::<DbApplication, RepositoryError, _>(|conn| {
            let updated: DbApplication = diesel::update(applications::table.find(application_id))
                .set(applications::status_id.eq(status_id))
                .get_result(conn)?;

            diesel::insert_into(status_history::table)
                .values((
                    status_history::application_id.eq(application_id),
                    status_history::status_id.eq(status_id),
                    status_history::changed_by.eq(changed_by),
                    status_history::comment.eq(comment),
                    status_history::changed_at.eq(now),
                ))
                .execute(conn)?;

            Ok(updated)
        })?;

        Ok(Application::try_from(updated)?)
    }

    fn assign_expert(
        &self,
        application_id: i32,
        expert_id: Option<i32>,
    ) -> RepositoryResult<Application> {
        use crate::models::application::Application as DbApplication;
        use crate::schema::applications;

        let mut conn = self.conn()?;
        let updated: DbApplication = diesel::update(applications::table.find(application_id))
            .set(applications::assigned_expert_id.eq(expert_id))
            .get_result(&mut conn)?;

        Ok(Application::try_from(updated)?)
    }
}
