//! Services behind the submission page and the applicant's own listings.

use crate::domain::profile::Role;
use crate::domain::types::AgeGroup;
use crate::dto::main::{ApplicationSummary, IndexPageData, MyApplicationsPageData};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{ApplicationListQuery, ApplicationReader, LookupReader, ProfileReader, ProfileWriter};
use crate::services::applications::{build_row, history_displays, LabelMaps};
use crate::services::{current_profile, require_role, ServiceResult};

/// Loads the lookup data backing the submission form.
pub fn load_index_page<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<IndexPageData>
where
    R: LookupReader + ?Sized,
{
    require_role(user, &[Role::Applicant])?;

    Ok(IndexPageData {
        fields: repo.list_fields()?,
        municipalities: repo.list_municipalities()?,
        age_groups: AgeGroup::ALL.iter().map(|group| group.label()).collect(),
    })
}

/// Loads the signed-in applicant's submissions with their audit trails,
/// newest first.
pub fn load_my_applications<R>(
    repo: &R,
    user: &AuthenticatedUser,
) -> ServiceResult<MyApplicationsPageData>
where
    R: ApplicationReader + LookupReader + ProfileReader + ProfileWriter + ?Sized,
{
    require_role(user, &[Role::Applicant])?;
    let profile = current_profile(repo, user)?;

    let labels = LabelMaps::load(repo)?;
    let applications = repo.list_applications(ApplicationListQuery::default().applicant(profile.id))?;

    let mut summaries = Vec::with_capacity(applications.len());
    for application in applications {
        let history = history_displays(repo, &labels, application.id)?;
        summaries.push(ApplicationSummary {
            application: build_row(application, &labels),
            history,
        });
    }

    Ok(MyApplicationsPageData {
        applications: summaries,
    })
}
