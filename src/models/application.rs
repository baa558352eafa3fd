use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::application::{
    Application as DomainApplication, DocumentDescriptor,
    NewApplication as DomainNewApplication,
};
use crate::domain::types::{AgeGroup, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::applications)]
/// Diesel model for [`crate::domain::application::Application`].
pub struct Application {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub age_group: String,
    pub prototype_url: Option<String>,
    /// JSON-encoded list of [`DocumentDescriptor`].
    pub documents: Option<String>,
    pub applicant_id: i32,
    pub field_id: i32,
    pub municipality_id: i32,
    pub status_id: i32,
    pub assigned_expert_id: Option<i32>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::applications)]
/// Insertable form of [`Application`].
pub struct NewApplication<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub age_group: &'a str,
    pub prototype_url: Option<&'a str>,
    pub documents: Option<String>,
    pub applicant_id: i32,
    pub field_id: i32,
    pub municipality_id: i32,
    pub status_id: i32,
    pub created_at: NaiveDateTime,
}

impl TryFrom<Application> for DomainApplication {
    type Error = TypeConstraintError;

    fn try_from(application: Application) -> Result<Self, Self::Error> {
        // Unparseable document payloads are dropped rather than propagated
        // into UI logic.
        let documents: Vec<DocumentDescriptor> = application
            .documents
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or_default();

        Ok(Self {
            id: application.id,
            title: application.title,
            description: application.description,
            age_group: AgeGroup::try_from(application.age_group.as_str())?,
            prototype_url: application.prototype_url,
            documents,
            applicant_id: application.applicant_id,
            field_id: application.field_id,
            municipality_id: application.municipality_id,
            status_id: application.status_id,
            assigned_expert_id: application.assigned_expert_id,
            created_at: application.created_at,
        })
    }
}

impl NewApplication<'_> {
    /// Builds the insertable row, resolving the status outside the domain
    /// payload since "New" is looked up by label at submission time.
    pub fn from_domain(
        application: &DomainNewApplication,
        status_id: i32,
        created_at: NaiveDateTime,
    ) -> NewApplication<'_> {
        let documents = if application.documents.is_empty() {
            None
        } else {
            serde_json::to_string(&application.documents).ok()
        };

        NewApplication {
            title: application.title.as_str(),
            description: application.description.as_str(),
            age_group: application.age_group.label(),
            prototype_url: application.prototype_url.as_ref().map(|url| url.as_str()),
            documents,
            applicant_id: application.applicant_id,
            field_id: application.field_id,
            municipality_id: application.municipality_id,
            status_id,
            created_at,
        }
    }
}
