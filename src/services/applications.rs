//! Services behind the review listing, the application detail page and
//! the executive-only status and assignment operations.

use std::collections::HashMap;

use crate::domain::application::{Application, DocumentDescriptor};
use crate::domain::profile::Role;
use crate::domain::status::Status;
use crate::dto::applications::{
    ApplicationDetailData, ApplicationRow, ApplicationsPageData, ExpertOption, HistoryDisplay,
    NoteDisplay,
};
use crate::forms::applications::{ApplicationsQuery, AssignExpertForm, SetStatusForm};
use crate::listing;
use crate::models::auth::AuthenticatedUser;
use crate::pagination::{clamp_per_page, Paginated};
use crate::repository::{
    ApplicationListQuery, ApplicationReader, ApplicationWriter, LookupReader, NoteReader,
    ProfileReader, ProfileWriter,
};
use crate::services::{current_profile, require_role, ServiceError, ServiceResult};

/// History comment recorded when an executive changes a status without
/// leaving one.
pub const DEFAULT_STATUS_CHANGE_COMMENT: &str = "Status changed by executive";

/// Lookup labels resolved once per request so row construction and
/// display mapping stay allocation-cheap.
pub struct LabelMaps {
    pub fields: HashMap<i32, String>,
    pub municipalities: HashMap<i32, String>,
    pub statuses: HashMap<i32, Status>,
    pub experts: HashMap<i32, String>,
}

impl LabelMaps {
    pub fn load<R>(repo: &R) -> ServiceResult<Self>
    where
        R: LookupReader + ProfileReader + ?Sized,
    {
        let fields = repo
            .list_fields()?
            .into_iter()
            .map(|field| (field.id, field.label))
            .collect();
        let municipalities = repo
            .list_municipalities()?
            .into_iter()
            .map(|municipality| (municipality.id, municipality.label))
            .collect();
        let statuses = repo
            .list_statuses()?
            .into_iter()
            .map(|status| (status.id, status))
            .collect();
        let experts = repo
            .list_experts()?
            .into_iter()
            .map(|expert| (expert.id, expert.full_name()))
            .collect();
        Ok(Self {
            fields,
            municipalities,
            statuses,
            experts,
        })
    }

    fn status_label(&self, status_id: i32) -> String {
        self.statuses
            .get(&status_id)
            .map(|status| status.label.clone())
            .unwrap_or_default()
    }

    pub fn expert_options(&self) -> Vec<ExpertOption> {
        let mut options: Vec<ExpertOption> = self
            .experts
            .iter()
            .map(|(id, name)| ExpertOption {
                id: *id,
                name: name.clone(),
            })
            .collect();
        options.sort_by(|a, b| a.name.cmp(&b.name));
        options
    }
}

/// Joins an application with its lookup labels.
pub fn build_row(application: Application, labels: &LabelMaps) -> ApplicationRow {
    let field_label = labels
        .fields
        .get(&application.field_id)
        .cloned()
        .unwrap_or_default();
    let municipality_label = labels
        .municipalities
        .get(&application.municipality_id)
        .cloned()
        .unwrap_or_default();
    let status = labels.statuses.get(&application.status_id);
    let status_label = status.map(|s| s.label.clone()).unwrap_or_default();
    let status_color = status.and_then(|s| s.color.clone());
    let expert_name = application
        .assigned_expert_id
        .and_then(|id| labels.experts.get(&id).cloned());

    ApplicationRow::new(
        application,
        field_label,
        municipality_label,
        status_label,
        status_color,
        expert_name,
    )
}

/// Resolves the audit trail of one application for rendering.
pub fn history_displays<R>(
    repo: &R,
    labels: &LabelMaps,
    application_id: i32,
) -> ServiceResult<Vec<HistoryDisplay>>
where
    R: ApplicationReader + ProfileReader + ?Sized,
{
    let mut names = NameCache::default();
    let entries = repo.list_status_history(application_id)?;
    let mut displays = Vec::with_capacity(entries.len());
    for entry in entries {
        displays.push(HistoryDisplay {
            status_id: entry.status_id,
            status_label: labels.status_label(entry.status_id),
            changed_by_name: names.resolve(repo, entry.changed_by)?,
            comment: entry.comment,
            changed_at: entry.changed_at,
        });
    }
    Ok(displays)
}

/// Per-request cache of profile display names.
#[derive(Default)]
struct NameCache {
    names: HashMap<i32, String>,
}

impl NameCache {
    fn resolve<R>(&mut self, repo: &R, profile_id: i32) -> ServiceResult<String>
    where
        R: ProfileReader + ?Sized,
    {
        if let Some(name) = self.names.get(&profile_id) {
            return Ok(name.clone());
        }
        let name = repo
            .get_profile_by_id(profile_id)?
            .map(|profile| profile.full_name())
            .unwrap_or_else(|| "Unknown".to_string());
        self.names.insert(profile_id, name.clone());
        Ok(name)
    }
}

/// Loads the filtered, sorted and paginated review listing. Executives see
/// every application; experts only the ones assigned to them.
pub fn load_applications_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: &ApplicationsQuery,
) -> ServiceResult<ApplicationsPageData>
where
    R: ApplicationReader + LookupReader + ProfileReader + ProfileWriter + ?Sized,
{
    let role = require_role(user, &[Role::Expert, Role::Executive])?;
    let profile = current_profile(repo, user)?;

    let scope = match role {
        Role::Expert => ApplicationListQuery::default().assigned_expert(profile.id),
        _ => ApplicationListQuery::default(),
    };

    let labels = LabelMaps::load(repo)?;
    let applications = repo.list_applications(scope)?;
    let rows: Vec<ApplicationRow> = applications
        .into_iter()
        .map(|application| build_row(application, &labels))
        .collect();

    let rows = listing::apply(rows, &query.to_filter(), query.sort, query.direction);

    let page = query.page.unwrap_or(1).max(1);
    let per_page = clamp_per_page(query.per_page);
    let applications = Paginated::slice(rows, page, per_page);

    Ok(ApplicationsPageData {
        applications,
        statuses: repo.list_statuses()?,
        fields: repo.list_fields()?,
        municipalities: repo.list_municipalities()?,
        experts: labels.expert_options(),
    })
}

/// Loads one application with its notes and audit trail. Applicants may
/// only open their own submissions, experts only their assignments.
pub fn load_application_detail<R>(
    repo: &R,
    user: &AuthenticatedUser,
    application_id: i32,
) -> ServiceResult<ApplicationDetailData>
where
    R: ApplicationReader + NoteReader + LookupReader + ProfileReader + ProfileWriter + ?Sized,
{
    let role = require_role(user, &[Role::Applicant, Role::Expert, Role::Executive])?;
    let profile = current_profile(repo, user)?;

    let application = repo
        .get_application_by_id(application_id)?
        .ok_or(ServiceError::NotFound)?;

    if role == Role::Applicant && application.applicant_id != profile.id {
        return Err(ServiceError::Unauthorized);
    }

    let is_assigned_expert = application.assigned_expert_id == Some(profile.id);
    if role == Role::Expert && !is_assigned_expert {
        return Err(ServiceError::Unauthorized);
    }

    let labels = LabelMaps::load(repo)?;
    let current_status_id = application.status_id;

    let mut names = NameCache::default();
    let notes = repo.list_notes(application_id)?;
    let mut note_displays = Vec::with_capacity(notes.len());
    for note in &notes {
        let author_name = names.resolve(repo, note.author_id)?;
        let suggested_status_label = note
            .suggested_status_id
            .map(|status_id| labels.status_label(status_id));
        note_displays.push(NoteDisplay::new(
            note,
            current_status_id,
            author_name,
            suggested_status_label,
        ));
    }

    let history = history_displays(repo, &labels, application_id)?;

    Ok(ApplicationDetailData {
        application: build_row(application, &labels),
        notes: note_displays,
        history,
        statuses: repo.list_statuses()?,
        experts: labels.expert_options(),
        can_edit_status: role == Role::Executive,
        can_suggest: role == Role::Expert && is_assigned_expert,
        can_comment: matches!(role, Role::Expert | Role::Executive),
    })
}

/// Moves an application to a new status, recording the change in the
/// audit trail. Executives only.
pub fn set_status<R>(repo: &R, user: &AuthenticatedUser, form: &SetStatusForm) -> ServiceResult<()>
where
    R: ApplicationReader + ApplicationWriter + LookupReader + ProfileWriter + ?Sized,
{
    require_role(user, &[Role::Executive])?;
    let profile = current_profile(repo, user)?;

    repo.get_status_by_id(form.status_id)?
        .ok_or(ServiceError::NotFound)?;
    repo.get_application_by_id(form.application_id)?
        .ok_or(ServiceError::NotFound)?;

    let comment = form.comment();
    let comment = comment.as_deref().unwrap_or(DEFAULT_STATUS_CHANGE_COMMENT);
    repo.set_application_status(form.application_id, form.status_id, profile.id, Some(comment))?;

    Ok(())
}

/// Assigns an expert to an application, or clears the assignment.
/// Executives only.
pub fn assign_expert<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: &AssignExpertForm,
) -> ServiceResult<()>
where
    R: ApplicationReader + ApplicationWriter + ProfileReader + ?Sized,
{
    require_role(user, &[Role::Executive])?;

    repo.get_application_by_id(form.application_id)?
        .ok_or(ServiceError::NotFound)?;

    let expert_id = form.expert_id();
    if let Some(expert_id) = expert_id {
        let assignee = repo
            .get_profile_by_id(expert_id)?
            .ok_or(ServiceError::NotFound)?;
        if assignee.role != Role::Expert {
            return Err(ServiceError::Form(
                "Only experts can be assigned to applications".to_string(),
            ));
        }
    }

    repo.assign_expert(form.application_id, expert_id)?;

    Ok(())
}

/// Resolves one of an application's documents for download, applying the
/// same access rule as the detail page.
pub fn document_for_download<R>(
    repo: &R,
    user: &AuthenticatedUser,
    application_id: i32,
    index: usize,
) -> ServiceResult<DocumentDescriptor>
where
    R: ApplicationReader + ProfileWriter + ?Sized,
{
    let role = require_role(user, &[Role::Applicant, Role::Expert, Role::Executive])?;
    let profile = current_profile(repo, user)?;

    let application = repo
        .get_application_by_id(application_id)?
        .ok_or(ServiceError::NotFound)?;
    if role == Role::Applicant && application.applicant_id != profile.id {
        return Err(ServiceError::Unauthorized);
    }
    if role == Role::Expert && application.assigned_expert_id != Some(profile.id) {
        return Err(ServiceError::Unauthorized);
    }

    application
        .documents
        .into_iter()
        .nth(index)
        .ok_or(ServiceError::NotFound)
}
