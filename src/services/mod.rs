//! Business logic shared by the HTTP handlers. Service functions are
//! generic over the repository traits so tests can run them against
//! mocks.

use thiserror::Error;

use crate::domain::profile::Role;
use crate::models::auth::AuthenticatedUser;
use crate::repository::errors::RepositoryError;

pub mod applications;
pub mod dashboard;
pub mod main;
pub mod notes;
pub mod submission;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    #[error("{0}")]
    Form(String),

    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<crate::forms::FormError> for ServiceError {
    fn from(err: crate::forms::FormError) -> Self {
        ServiceError::Form(err.to_string())
    }
}

impl From<crate::storage::StorageError> for ServiceError {
    fn from(err: crate::storage::StorageError) -> Self {
        if err.is_client_error() {
            ServiceError::Form(err.to_string())
        } else {
            ServiceError::Internal(err.to_string())
        }
    }
}

/// Checks that the signed-in user holds one of the given roles.
pub fn require_role(user: &AuthenticatedUser, allowed: &[Role]) -> ServiceResult<Role> {
    user.parsed_role()
        .filter(|role| allowed.contains(role))
        .ok_or(ServiceError::Unauthorized)
}

/// Resolves the signed-in user's profile record, creating or refreshing
/// it from the token claims.
pub fn current_profile<R>(
    repo: &R,
    user: &AuthenticatedUser,
) -> ServiceResult<crate::domain::profile::Profile>
where
    R: crate::repository::ProfileWriter + ?Sized,
{
    let profile = repo.create_or_update_profile(&crate::domain::profile::NewProfile::from(user))?;
    Ok(profile)
}
