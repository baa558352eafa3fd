//! DTOs for the public submission page and the applicant's own listings.

use serde::Serialize;

use crate::domain::lookup::{Field, Municipality};
use crate::dto::applications::{ApplicationRow, HistoryDisplay};

/// Data required to render the submission form.
pub struct IndexPageData {
    pub fields: Vec<Field>,
    pub municipalities: Vec<Municipality>,
    pub age_groups: Vec<&'static str>,
}

/// One of the applicant's submissions with its audit trail.
#[derive(Serialize)]
pub struct ApplicationSummary {
    pub application: ApplicationRow,
    pub history: Vec<HistoryDisplay>,
}

/// Result of a successful submission: the created application plus the
/// names of any uploads that were rejected and left out of it.
pub struct SubmissionOutcome {
    pub summary: ApplicationSummary,
    pub skipped_documents: Vec<String>,
}

/// Data required to render the "my applications" page.
pub struct MyApplicationsPageData {
    pub applications: Vec<ApplicationSummary>,
}
