//! Service behind the application submission flow.

use crate::domain::profile::Role;
use crate::dto::main::{ApplicationSummary, SubmissionOutcome};
use crate::forms::submission::SubmissionForm;
use crate::models::auth::AuthenticatedUser;
use crate::repository::errors::RepositoryError;
use crate::repository::{
    ApplicationReader, ApplicationWriter, LookupReader, ProfileReader, ProfileWriter,
};
use crate::services::applications::{build_row, history_displays, LabelMaps};
use crate::services::{current_profile, require_role, ServiceResult};
use crate::storage::DocumentStore;

/// Label of the status every new application starts in. Resolved at
/// submission time so reseeding statuses never breaks the flow.
pub const INITIAL_STATUS_LABEL: &str = "New";

/// Validates the submission, stores its documents, persists the
/// application with its initial audit-trail entry and loads the
/// confirmation summary. An upload that fails validation is dropped
/// from the application and reported back; only storage faults abort
/// the submission.
pub fn submit_application<R>(
    repo: &R,
    user: &AuthenticatedUser,
    mut form: SubmissionForm,
    store: &DocumentStore,
) -> ServiceResult<SubmissionOutcome>
where
    R: ApplicationReader
        + ApplicationWriter
        + LookupReader
        + ProfileReader
        + ProfileWriter
        + ?Sized,
{
    require_role(user, &[Role::Applicant])?;
    let profile = current_profile(repo, user)?;

    let mut application = form.to_new_application(profile.id)?;
    let mut skipped_documents = Vec::new();
    for file in form.documents.drain(..) {
        let name = file
            .file_name
            .clone()
            .unwrap_or_else(|| "unnamed file".to_string());
        match store.store(file) {
            Ok(descriptor) => application.documents.push(descriptor),
            Err(err) if err.is_client_error() => {
                log::warn!("Skipping upload '{name}': {err}");
                skipped_documents.push(format!("Skipped \"{name}\": {err}"));
            }
            Err(err) => return Err(err.into()),
        }
    }

    let initial_status = repo
        .get_status_by_label(INITIAL_STATUS_LABEL)?
        .ok_or_else(|| {
            RepositoryError::Unexpected(format!("status '{INITIAL_STATUS_LABEL}' is not seeded"))
        })?;

    let created = repo.create_application(&application, initial_status.id)?;

    let labels = LabelMaps::load(repo)?;
    let history = history_displays(repo, &labels, created.id)?;
    Ok(SubmissionOutcome {
        summary: ApplicationSummary {
            application: build_row(created, &labels),
            history,
        },
        skipped_documents,
    })
}
