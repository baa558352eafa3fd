//! Filesystem storage for uploaded supporting documents.

use std::io;
use std::path::{Path, PathBuf};

use actix_multipart::form::tempfile::TempFile;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::application::{format_file_size, DocumentDescriptor};

/// Largest accepted supporting document, 10 MiB.
pub const MAX_DOCUMENT_SIZE: u64 = 10 * 1024 * 1024;

/// Document types an applicant may attach: PDF, Word, PowerPoint and
/// short videos.
pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.ms-powerpoint",
    "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    "video/mp4",
    "video/quicktime",
];

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("uploaded file has no name")]
    MissingFileName,

    #[error("uploaded file has no content type")]
    MissingContentType,

    #[error("unsupported document type: {0}")]
    UnsupportedType(String),

    #[error("document {name} is too large: {size}")]
    TooLarge { name: String, size: String },

    #[error("storage error: {0}")]
    Io(#[from] io::Error),
}

impl StorageError {
    /// Whether the error is the applicant's fault rather than the
    /// server's.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, StorageError::Io(_))
    }
}

/// Writes uploaded documents into the configured uploads directory under
/// collision-free names.
#[derive(Clone)]
pub struct DocumentStore {
    uploads_dir: PathBuf,
}

impl DocumentStore {
    pub fn new(uploads_dir: impl Into<PathBuf>) -> io::Result<Self> {
        let uploads_dir = uploads_dir.into();
        std::fs::create_dir_all(&uploads_dir)?;
        Ok(Self { uploads_dir })
    }

    /// Validates and persists one uploaded file, returning its
    /// descriptor for the application record.
    pub fn store(&self, file: TempFile) -> Result<DocumentDescriptor, StorageError> {
        let name = file
            .file_name
            .as_deref()
            .and_then(|raw| Path::new(raw).file_name())
            .and_then(|name| name.to_str())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .ok_or(StorageError::MissingFileName)?;

        let mime = file
            .content_type
            .as_ref()
            .map(|mime| mime.essence_str().to_string())
            .ok_or(StorageError::MissingContentType)?;
        if !ALLOWED_MIME_TYPES.contains(&mime.as_str()) {
            return Err(StorageError::UnsupportedType(mime));
        }

        let size = file.size as u64;
        if size > MAX_DOCUMENT_SIZE {
            return Err(StorageError::TooLarge {
                name,
                size: format_file_size(size),
            });
        }

        let stored_name = format!("{}_{name}", Uuid::new_v4());
        let target = self.uploads_dir.join(&stored_name);
        // TempFile may live on another filesystem, so copy instead of
        // renaming.
        std::fs::copy(file.file.path(), &target)?;

        Ok(DocumentDescriptor {
            name,
            url: format!("/uploads/{stored_name}"),
            mime,
            size,
        })
    }

    /// Resolves a stored document's path from its public URL.
    pub fn resolve(&self, url: &str) -> Option<PathBuf> {
        let stored_name = url.strip_prefix("/uploads/")?;
        if stored_name.contains('/') || stored_name.contains("..") {
            return None;
        }
        Some(self.uploads_dir.join(stored_name))
    }
}
