use std::path::PathBuf;

use thiserror::Error;

/// Failures raised while loading or reading the fixture catalog.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The fixture file could not be read.
    #[error("failed to read fixture {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The fixture file is not valid JSON of the expected shape.
    #[error("failed to parse fixture {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// A record violates a domain constraint.
    #[error("validation error: {0}")]
    ValidationError(String),
}

/// Convenient alias for results returned from repository functions.
pub type RepositoryResult<T> = Result<T, RepositoryError>;
