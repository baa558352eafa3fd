//! Services behind comments, status suggestions and suggestion approval.

use crate::domain::note::NoteKind;
use crate::domain::profile::Role;
use crate::forms::notes::{AddCommentForm, EditNoteForm, NoteIdForm, SuggestStatusForm};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{ApplicationReader, LookupReader, NoteReader, NoteWriter, ProfileWriter};
use crate::services::{current_profile, require_role, ServiceError, ServiceResult};

/// Adds a comment to an application. Experts may only comment on
/// applications assigned to them.
pub fn add_comment<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: &AddCommentForm,
) -> ServiceResult<()>
where
    R: ApplicationReader + NoteWriter + ProfileWriter + ?Sized,
{
    let role = require_role(user, &[Role::Expert, Role::Executive])?;
    let profile = current_profile(repo, user)?;

    let application = repo
        .get_application_by_id(form.application_id)?
        .ok_or(ServiceError::NotFound)?;

    if role == Role::Expert && application.assigned_expert_id != Some(profile.id) {
        return Err(ServiceError::Unauthorized);
    }

    let note = form.to_new_note(role, profile.id)?;
    repo.create_note(&note)?;

    Ok(())
}

/// Records an expert's status suggestion on an application assigned to
/// them.
pub fn suggest_status<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: &SuggestStatusForm,
) -> ServiceResult<()>
where
    R: ApplicationReader + LookupReader + NoteWriter + ProfileWriter + ?Sized,
{
    require_role(user, &[Role::Expert])?;
    let profile = current_profile(repo, user)?;

    let application = repo
        .get_application_by_id(form.application_id)?
        .ok_or(ServiceError::NotFound)?;

    if application.assigned_expert_id != Some(profile.id) {
        return Err(ServiceError::Unauthorized);
    }

    repo.get_status_by_id(form.status_id)?
        .ok_or(ServiceError::NotFound)?;

    let note = form.to_new_note(profile.id)?;
    repo.create_note(&note)?;

    Ok(())
}

/// Updates the text of a comment. Only the author may edit, and
/// suggestions are immutable once recorded.
pub fn edit_note<R>(repo: &R, user: &AuthenticatedUser, form: &EditNoteForm) -> ServiceResult<()>
where
    R: NoteReader + NoteWriter + ProfileWriter + ?Sized,
{
    require_role(user, &[Role::Expert, Role::Executive])?;
    let profile = current_profile(repo, user)?;

    let note = repo
        .get_note_by_id(form.note_id)?
        .ok_or(ServiceError::NotFound)?;

    if note.author_id != profile.id {
        return Err(ServiceError::Unauthorized);
    }
    if note.kind == NoteKind::Suggestion {
        return Err(ServiceError::Form(
            "Suggestions cannot be edited".to_string(),
        ));
    }

    let body = form.parsed_body()?;
    repo.update_note_body(form.note_id, &body)?;

    Ok(())
}

/// Deletes a comment. Only the author may delete, and suggestions stay
/// on record.
pub fn delete_note<R>(repo: &R, user: &AuthenticatedUser, form: &NoteIdForm) -> ServiceResult<()>
where
    R: NoteReader + NoteWriter + ProfileWriter + ?Sized,
{
    require_role(user, &[Role::Expert, Role::Executive])?;
    let profile = current_profile(repo, user)?;

    let note = repo
        .get_note_by_id(form.note_id)?
        .ok_or(ServiceError::NotFound)?;

    if note.author_id != profile.id {
        return Err(ServiceError::Unauthorized);
    }
    if note.kind == NoteKind::Suggestion {
        return Err(ServiceError::Form(
            "Suggestions cannot be deleted".to_string(),
        ));
    }

    repo.delete_note(form.note_id)?;

    Ok(())
}

/// Approves a status suggestion: moves the application to the suggested
/// status and stamps the suggestion as accepted. Executives only.
pub fn approve_suggestion<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: &NoteIdForm,
) -> ServiceResult<()>
where
    R: NoteReader + NoteWriter + ProfileWriter + ?Sized,
{
    require_role(user, &[Role::Executive])?;
    let profile = current_profile(repo, user)?;

    repo.get_note_by_id(form.note_id)?
        .ok_or(ServiceError::NotFound)?;

    repo.accept_suggestion(form.note_id, profile.id)?;

    Ok(())
}
