use thiserror::Error;

use crate::forms::FormError;
use crate::repository::errors::RepositoryError;

pub mod about;
pub mod blog;
pub mod categories;
pub mod contact;
pub mod contact_info;
pub mod main;
pub mod products;
pub mod settings;
pub mod testimonials;
pub mod uploads;

/// Result type returned by service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors surfaced by the service layer and mapped to responses by routes.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("not found")]
    NotFound,
    #[error("conflict with existing data")]
    Conflict,
    /// User-facing form problem, shown as a flash message.
    #[error("{0}")]
    Form(String),
    #[error("repository error: {0}")]
    Repository(RepositoryError),
    #[error("upload failed: {0}")]
    Upload(String),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::Conflict => ServiceError::Conflict,
            other => ServiceError::Repository(other),
        }
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        ServiceError::Form(err.to_string())
    }
}
