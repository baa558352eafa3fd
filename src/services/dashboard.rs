//! Services behind the role dashboards.

use std::collections::HashMap;

use crate::domain::profile::Role;
use crate::domain::status::DEFAULT_STATUS_COLOR;
use crate::dto::dashboard::{DashboardData, StatusCount};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{ApplicationListQuery, ApplicationReader, LookupReader, ProfileReader, ProfileWriter};
use crate::services::{current_profile, require_role, ServiceResult};

/// Loads the KPI block for the reviewer dashboards. Experts see counts
/// over the applications assigned to them; executives see the whole
/// pipeline.
pub fn load_dashboard<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<DashboardData>
where
    R: ApplicationReader + LookupReader + ProfileReader + ProfileWriter + ?Sized,
{
    let role = require_role(user, &[Role::Expert, Role::Executive])?;
    let profile = current_profile(repo, user)?;

    let query = match role {
        Role::Expert => ApplicationListQuery::default().assigned_expert(profile.id),
        _ => ApplicationListQuery::default(),
    };
    let applications = repo.list_applications(query)?;

    let mut counts: HashMap<i32, usize> = HashMap::new();
    let mut unassigned = 0;
    for application in &applications {
        *counts.entry(application.status_id).or_default() += 1;
        if application.assigned_expert_id.is_none() {
            unassigned += 1;
        }
    }

    let by_status = repo
        .list_statuses()?
        .into_iter()
        .map(|status| StatusCount {
            count: counts.get(&status.id).copied().unwrap_or(0),
            label: status.label,
            color: status
                .color
                .unwrap_or_else(|| DEFAULT_STATUS_COLOR.to_string()),
        })
        .collect();

    Ok(DashboardData {
        total: applications.len(),
        by_status,
        unassigned,
        expert_count: repo.list_experts()?.len(),
    })
}
