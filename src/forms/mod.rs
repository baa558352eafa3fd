//! Form definitions backing the portal routes.

use thiserror::Error;
use validator::ValidationErrors;

pub mod applications;
pub mod notes;
pub mod submission;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("{0}")]
    Invalid(String),

    #[error("unsupported document type: {0}")]
    UnsupportedDocumentType(String),

    #[error("document too large: {0}")]
    DocumentTooLarge(String),

    #[error("too many documents, at most {0} allowed")]
    TooManyDocuments(usize),
}
