use thiserror::Error;

use crate::forms::{FieldErrors, FormError};

/// Generic error type used by service layer functions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// No active, logged-in user is attached to the request.
    #[error("unauthorized")]
    Unauthorized,
    /// Requested resource was not found.
    #[error("not found")]
    NotFound,
    /// Submitted form data was rejected; nothing was written.
    #[error("invalid form: {0}")]
    Form(FieldErrors),
    /// The operation would break a catalog invariant.
    #[error("conflict: {0}")]
    Conflict(String),
    /// An unexpected internal error occurred.
    #[error("internal error")]
    Internal,
}

impl From<FormError> for ServiceError {
    fn from(value: FormError) -> Self {
        ServiceError::Form(value.0)
    }
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
