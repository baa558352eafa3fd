//! DTOs for the role dashboards.

use serde::Serialize;

/// Count of applications currently in one status.
#[derive(Clone, Debug, Serialize)]
pub struct StatusCount {
    pub label: String,
    pub color: String,
    pub count: usize,
}

/// KPI block rendered on the reviewer dashboards. For experts the counts
/// cover only the applications assigned to them.
#[derive(Clone, Debug, Serialize)]
pub struct DashboardData {
    pub total: usize,
    pub by_status: Vec<StatusCount>,
    pub unassigned: usize,
    pub expert_count: usize,
}
