//! Multipart form used by applicants to submit a new application.

use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};

use crate::domain::application::NewApplication;
use crate::domain::types::{AgeGroup, Description, PrototypeUrl, Title, TypeConstraintError};
use crate::forms::FormError;

/// Maximum number of supporting documents per application.
pub const MAX_DOCUMENTS: usize = 5;

#[derive(MultipartForm)]
pub struct SubmissionForm {
    pub title: Text<String>,
    pub description: Text<String>,
    pub age_group: Text<String>,
    pub field_id: Text<i32>,
    pub municipality_id: Text<i32>,
    pub prototype_url: Option<Text<String>>,
    // No per-field limit here: an oversize file must reach the storage
    // layer so it can be skipped on its own instead of failing the whole
    // multipart extraction.
    pub documents: Vec<TempFile>,
}

impl SubmissionForm {
    /// Validates the text fields and builds a domain application
    /// without documents; uploads are stored by the caller.
    pub fn to_new_application(&self, applicant_id: i32) -> Result<NewApplication, FormError> {
        let title = Title::try_from(self.title.trim())
            .map_err(|_| FormError::Invalid("Title must be at least 10 characters".to_string()))?;
        let description = Description::try_from(self.description.trim()).map_err(|_| {
            FormError::Invalid("Description must be at least 100 characters".to_string())
        })?;
        let age_group = AgeGroup::try_from(self.age_group.as_str())
            .map_err(|_| FormError::Invalid("Unknown age group".to_string()))?;
        let prototype_url = self
            .prototype_url
            .as_ref()
            .map(|url| url.trim())
            .filter(|url| !url.is_empty())
            .map(PrototypeUrl::try_from)
            .transpose()
            .map_err(|err| match err {
                TypeConstraintError::InvalidUrl => {
                    FormError::Invalid("Prototype link must be a valid URL".to_string())
                }
                _ => FormError::Invalid("Invalid prototype link".to_string()),
            })?;

        if self.documents.len() > MAX_DOCUMENTS {
            return Err(FormError::TooManyDocuments(MAX_DOCUMENTS));
        }

        Ok(NewApplication {
            title,
            description,
            age_group,
            prototype_url,
            documents: Vec::new(),
            applicant_id,
            field_id: self.field_id.0,
            municipality_id: self.municipality_id.0,
        })
    }
}
