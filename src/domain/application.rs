use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{AgeGroup, Description, PrototypeUrl, Title};

/// Descriptor of one uploaded attachment, persisted as JSON on the
/// application row.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentDescriptor {
    /// Original file name shown to reviewers.
    pub name: String,
    /// Public URL the stored file is served from.
    pub url: String,
    /// MIME type reported at upload time.
    pub mime: String,
    /// File size in bytes.
    pub size: u64,
}

impl DocumentDescriptor {
    /// Human-readable size in base-1024 units, rounded to two decimals.
    pub fn size_display(&self) -> String {
        format_file_size(self.size)
    }
}

/// Formats a byte count using base-1024 units (Bytes/KB/MB/GB) rounded to
/// two decimals, trailing zeros trimmed.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let exponent = (bytes.ilog2() / 10).min(UNITS.len() as u32 - 1);
    let value = bytes as f64 / 1024f64.powi(exponent as i32);
    let rounded = (value * 100.0).round() / 100.0;

    let mut text = format!("{rounded:.2}");
    while text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.pop();
    }

    format!("{text} {}", UNITS[exponent as usize])
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Application {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub age_group: AgeGroup,
    pub prototype_url: Option<String>,
    /// Attachments uploaded with the submission; empty when none were kept.
    pub documents: Vec<DocumentDescriptor>,
    pub applicant_id: i32,
    pub field_id: i32,
    pub municipality_id: i32,
    pub status_id: i32,
    pub assigned_expert_id: Option<i32>,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewApplication {
    pub title: Title,
    pub description: Description,
    pub age_group: AgeGroup,
    pub prototype_url: Option<PrototypeUrl>,
    pub documents: Vec<DocumentDescriptor>,
    pub applicant_id: i32,
    pub field_id: i32,
    pub municipality_id: i32,
}
