use thiserror::Error;

use crate::fetch::FetchError;

/// Generic error type used by service layer functions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// Requested resource was not found.
    #[error("not found")]
    NotFound,
    /// An unexpected internal error occurred.
    #[error("internal error")]
    Internal,
    /// The catalog is still loading or its last load failed.
    #[error("catalog unavailable: {0}")]
    Unavailable(FetchError),
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
