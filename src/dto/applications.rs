//! DTOs shaped for the applications management and detail templates.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::application::{Application, DocumentDescriptor};
use crate::domain::lookup::{Field, Municipality};
use crate::domain::note::Note;
use crate::domain::status::{Status, DEFAULT_STATUS_COLOR};
use crate::pagination::Paginated;

/// Attachment descriptor enriched with a display size.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct DocumentDisplay {
    pub name: String,
    pub url: String,
    pub mime: String,
    pub size: u64,
    pub size_display: String,
}

impl From<&DocumentDescriptor> for DocumentDisplay {
    fn from(descriptor: &DocumentDescriptor) -> Self {
        Self {
            name: descriptor.name.clone(),
            url: descriptor.url.clone(),
            mime: descriptor.mime.clone(),
            size: descriptor.size,
            size_display: descriptor.size_display(),
        }
    }
}

/// One application row joined with its lookup labels, as the tables render
/// it. Label resolution happens once at construction so the listing
/// pipeline can sort on plain strings.
#[derive(Clone, Debug, Serialize)]
pub struct ApplicationRow {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub age_group: String,
    pub prototype_url: Option<String>,
    pub documents: Vec<DocumentDisplay>,
    pub applicant_id: i32,
    pub field_id: i32,
    pub municipality_id: i32,
    pub status_id: i32,
    pub assigned_expert_id: Option<i32>,
    pub created_at: NaiveDateTime,
    pub field_label: String,
    pub municipality_label: String,
    pub status_label: String,
    pub status_color: String,
    pub expert_name: Option<String>,
}

impl ApplicationRow {
    pub fn new(
        application: Application,
        field_label: String,
        municipality_label: String,
        status_label: String,
        status_color: Option<String>,
        expert_name: Option<String>,
    ) -> Self {
        let status_color = status_color.unwrap_or_else(|| DEFAULT_STATUS_COLOR.to_string());
        let documents = application.documents.iter().map(DocumentDisplay::from).collect();

        Self {
            id: application.id,
            title: application.title,
            description: application.description,
            age_group: application.age_group.label().to_string(),
            prototype_url: application.prototype_url,
            documents,
            applicant_id: application.applicant_id,
            field_id: application.field_id,
            municipality_id: application.municipality_id,
            status_id: application.status_id,
            assigned_expert_id: application.assigned_expert_id,
            created_at: application.created_at,
            field_label,
            municipality_label,
            status_label,
            status_color,
            expert_name,
        }
    }
}

/// Selectable expert entry for assignment dropdowns and filters.
#[derive(Clone, Debug, Serialize)]
pub struct ExpertOption {
    pub id: i32,
    pub name: String,
}

/// Data required to render the applications management page.
pub struct ApplicationsPageData {
    pub applications: Paginated<ApplicationRow>,
    pub statuses: Vec<Status>,
    pub fields: Vec<Field>,
    pub municipalities: Vec<Municipality>,
    pub experts: Vec<ExpertOption>,
}

/// A note prepared for rendering, with author and suggestion labels
/// resolved.
#[derive(Clone, Debug, Serialize)]
pub struct NoteDisplay {
    pub id: i32,
    pub body: String,
    pub kind: String,
    pub author_id: i32,
    pub author_name: String,
    pub author_role: String,
    pub created_at: NaiveDateTime,
    pub suggested_status_id: Option<i32>,
    pub suggested_status_label: Option<String>,
    /// Reconstructed suggestion state: accepted either by stamp or because
    /// the target already matches the current status.
    pub accepted: bool,
}

impl NoteDisplay {
    pub fn new(
        note: &Note,
        current_status_id: i32,
        author_name: String,
        suggested_status_label: Option<String>,
    ) -> Self {
        Self {
            id: note.id,
            body: note.body.clone(),
            kind: note.kind.as_str().to_string(),
            author_id: note.author_id,
            author_name,
            author_role: note.author_role.as_str().to_string(),
            created_at: note.created_at,
            suggested_status_id: note.suggested_status_id,
            suggested_status_label,
            accepted: note.is_accepted_against(current_status_id),
        }
    }
}

/// One audit-trail row with its status label resolved.
#[derive(Clone, Debug, Serialize)]
pub struct HistoryDisplay {
    pub status_id: i32,
    pub status_label: String,
    pub changed_by_name: String,
    pub comment: Option<String>,
    pub changed_at: NaiveDateTime,
}

/// Aggregated data required to render the application detail page.
pub struct ApplicationDetailData {
    pub application: ApplicationRow,
    pub notes: Vec<NoteDisplay>,
    pub history: Vec<HistoryDisplay>,
    pub statuses: Vec<Status>,
    pub experts: Vec<ExpertOption>,
    pub can_edit_status: bool,
    pub can_suggest: bool,
    pub can_comment: bool,
}
