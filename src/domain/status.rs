use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Badge color used when a status row carries none.
pub const DEFAULT_STATUS_COLOR: &str = "#6c757d";

/// A review-stage label from the controlled vocabulary. The set is owned by
/// the database, not hardcoded; only the "New" label is resolved by name at
/// submission time.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Status {
    pub id: i32,
    pub label: String,
    /// Badge color hint for templates.
    pub color: Option<String>,
}

/// One row of the append-only status audit trail.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StatusHistoryEntry {
    pub id: i32,
    pub application_id: i32,
    pub status_id: i32,
    pub changed_by: i32,
    pub comment: Option<String>,
    pub changed_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewStatusHistoryEntry {
    pub application_id: i32,
    pub status_id: i32,
    pub changed_by: i32,
    pub comment: Option<String>,
}
