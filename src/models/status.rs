//! Diesel models for the status vocabulary and its audit trail.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::status::{
    NewStatusHistoryEntry as DomainNewStatusHistoryEntry, Status as DomainStatus,
    StatusHistoryEntry as DomainStatusHistoryEntry,
};
use crate::models::application::Application;

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::statuses)]
pub struct Status {
    pub id: i32,
    pub label: String,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(belongs_to(Application, foreign_key = application_id))]
#[diesel(table_name = crate::schema::status_history)]
pub struct StatusHistoryEntry {
    pub id: i32,
    pub application_id: i32,
    pub status_id: i32,
    pub changed_by: i32,
    pub comment: Option<String>,
    pub changed_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::status_history)]
pub struct NewStatusHistoryEntry<'a> {
    pub application_id: i32,
    pub status_id: i32,
    pub changed_by: i32,
    pub comment: Option<&'a str>,
    pub changed_at: NaiveDateTime,
}

impl From<Status> for DomainStatus {
    fn from(status: Status) -> Self {
        Self {
            id: status.id,
            label: status.label,
            color: status.color,
        }
    }
}

impl From<StatusHistoryEntry> for DomainStatusHistoryEntry {
    fn from(entry: StatusHistoryEntry) -> Self {
        Self {
            id: entry.id,
            application_id: entry.application_id,
            status_id: entry.status_id,
            changed_by: entry.changed_by,
            comment: entry.comment,
            changed_at: entry.changed_at,
        }
    }
}

impl<'a> NewStatusHistoryEntry<'a> {
    pub fn from_domain(
        entry: &'a DomainNewStatusHistoryEntry,
        changed_at: NaiveDateTime,
    ) -> Self {
        Self {
            application_id: entry.application_id,
            status_id: entry.status_id,
            changed_by: entry.changed_by,
            comment: entry.comment.as_deref(),
            changed_at,
        }
    }
}
