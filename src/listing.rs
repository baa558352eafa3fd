//! In-memory filtering, sorting, and pagination for application listings.
//!
//! The management views fetch the role-visible set in full and recompute
//! this pipeline on every request: free-text title filter, multi-select
//! lookup filters, a single-column sort, then one page slice.

use serde::{Deserialize, Serialize};

use crate::domain::types::AgeGroup;
use crate::dto::applications::ApplicationRow;

/// One selection in the assigned-expert filter. `Unassigned` matches rows
/// without an assigned expert.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExpertFilter {
    Unassigned,
    Expert(i32),
}

#[derive(Clone, Debug, Default)]
pub struct ApplicationFilter {
    /// Case-insensitive substring match on the title.
    pub title: Option<String>,
    pub field_ids: Vec<i32>,
    pub status_ids: Vec<i32>,
    pub municipality_ids: Vec<i32>,
    pub experts: Vec<ExpertFilter>,
    pub age_group: Option<AgeGroup>,
}

impl ApplicationFilter {
    fn matches(&self, row: &ApplicationRow) -> bool {
        if let Some(needle) = &self.title {
            let needle = needle.trim().to_lowercase();
            if !needle.is_empty() && !row.title.to_lowercase().contains(&needle) {
                return false;
            }
        }

        if !self.field_ids.is_empty() && !self.field_ids.contains(&row.field_id) {
            return false;
        }

        if !self.status_ids.is_empty() && !self.status_ids.contains(&row.status_id) {
            return false;
        }

        if !self.municipality_ids.is_empty()
            && !self.municipality_ids.contains(&row.municipality_id)
        {
            return false;
        }

        if !self.experts.is_empty() {
            let matched = self.experts.iter().any(|selection| match selection {
                ExpertFilter::Unassigned => row.assigned_expert_id.is_none(),
                ExpertFilter::Expert(id) => row.assigned_expert_id == Some(*id),
            });
            if !matched {
                return false;
            }
        }

        if let Some(group) = self.age_group {
            if row.age_group != group.label() {
                return false;
            }
        }

        true
    }
}

/// Sortable columns of the applications table.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Title,
    #[default]
    CreatedAt,
    Field,
    Municipality,
    Status,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Applies filter and sort in order. The sort is stable, so rows comparing
/// equal keep their original relative order.
pub fn apply(
    rows: Vec<ApplicationRow>,
    filter: &ApplicationFilter,
    sort: SortKey,
    direction: SortDirection,
) -> Vec<ApplicationRow> {
    let mut rows: Vec<ApplicationRow> = rows
        .into_iter()
        .filter(|row| filter.matches(row))
        .collect();

    rows.sort_by(|a, b| {
        let ordering = match sort {
            SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
            SortKey::Field => a.field_label.to_lowercase().cmp(&b.field_label.to_lowercase()),
            SortKey::Municipality => a
                .municipality_label
                .to_lowercase()
                .cmp(&b.municipality_label.to_lowercase()),
            SortKey::Status => a
                .status_label
                .to_lowercase()
                .cmp(&b.status_label.to_lowercase()),
        };
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });

    rows
}
