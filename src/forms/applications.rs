//! Query and form types for the application review pages.

use serde::{Deserialize, Serialize};

use crate::domain::types::AgeGroup;
use crate::listing::{ApplicationFilter, ExpertFilter, SortDirection, SortKey};

/// Sentinel value selecting applications without an assigned expert.
pub const UNASSIGNED_EXPERT: &str = "unassigned";

#[derive(Debug, Default, Serialize, Deserialize)]
/// Query string accepted by the applications list page. Multi-select
/// filters repeat the parameter, e.g. `?status_id=1&status_id=3`.
pub struct ApplicationsQuery {
    pub search: Option<String>,
    #[serde(default)]
    pub field_id: Vec<i32>,
    #[serde(default)]
    pub status_id: Vec<i32>,
    #[serde(default)]
    pub municipality_id: Vec<i32>,
    #[serde(default)]
    pub expert: Vec<String>,
    pub age_group: Option<String>,
    #[serde(default)]
    pub sort: SortKey,
    #[serde(default)]
    pub direction: SortDirection,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

impl ApplicationsQuery {
    /// Builds the in-memory filter, silently dropping values that do
    /// not parse (an unknown age group label or expert id).
    pub fn to_filter(&self) -> ApplicationFilter {
        let experts = self
            .expert
            .iter()
            .filter_map(|value| {
                if value == UNASSIGNED_EXPERT {
                    Some(ExpertFilter::Unassigned)
                } else {
                    value.parse::<i32>().ok().map(ExpertFilter::Expert)
                }
            })
            .collect();
        ApplicationFilter {
            title: self
                .search
                .as_ref()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            field_ids: self.field_id.clone(),
            status_ids: self.status_id.clone(),
            municipality_ids: self.municipality_id.clone(),
            experts,
            age_group: self
                .age_group
                .as_deref()
                .and_then(|label| AgeGroup::try_from(label).ok()),
        }
    }
}

#[derive(Debug, Deserialize)]
/// Form data for moving an application to a new status.
pub struct SetStatusForm {
    pub application_id: i32,
    pub status_id: i32,
    pub comment: Option<String>,
}

impl SetStatusForm {
    pub fn comment(&self) -> Option<&str> {
        self.comment
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

#[derive(Debug, Deserialize)]
/// Form data for assigning or clearing an application's expert.
/// An empty `expert_id` clears the assignment.
pub struct AssignExpertForm {
    pub application_id: i32,
    #[serde(default)]
    expert_id: Option<String>,
}

impl AssignExpertForm {
    pub fn expert_id(&self) -> Option<i32> {
        self.expert_id
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .and_then(|value| value.parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_parses_multi_select() {
        let query: ApplicationsQuery =
            serde_html_form::from_str("status_id=1&status_id=3&expert=unassigned&expert=7")
                .unwrap();
        let filter = query.to_filter();
        assert_eq!(filter.status_ids, vec![1, 3]);
        assert_eq!(
            filter.experts,
            vec![ExpertFilter::Unassigned, ExpertFilter::Expert(7)]
        );
    }

    #[test]
    fn test_query_drops_unparseable_values() {
        let query: ApplicationsQuery =
            serde_html_form::from_str("search=+drone+&expert=bogus&age_group=nope").unwrap();
        let filter = query.to_filter();
        assert_eq!(filter.title.as_deref(), Some("drone"));
        assert!(filter.experts.is_empty());
        assert!(filter.age_group.is_none());
    }

    #[test]
    fn test_assign_form_empty_expert_clears() {
        let form: AssignExpertForm =
            serde_html_form::from_str("application_id=5&expert_id=").unwrap();
        assert_eq!(form.expert_id(), None);
        let form: AssignExpertForm =
            serde_html_form::from_str("application_id=5&expert_id=12").unwrap();
        assert_eq!(form.expert_id(), Some(12));
    }

    #[test]
    fn test_status_comment_trimmed_to_none() {
        let form = SetStatusForm {
            application_id: 1,
            status_id: 2,
            comment: Some("   ".to_string()),
        };
        assert_eq!(form.comment(), None);
    }
}
