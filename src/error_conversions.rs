//! Error conversion glue between layers.
//!
//! The domain layer must not depend on repository or loader error types, so
//! the conversions live here instead of next to either type.

use crate::domain::types::TypeConstraintError;
use crate::fetch::FetchError;
use crate::repository::RepositoryError;

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

impl From<RepositoryError> for FetchError {
    fn from(val: RepositoryError) -> Self {
        FetchError::new(val.to_string())
    }
}
