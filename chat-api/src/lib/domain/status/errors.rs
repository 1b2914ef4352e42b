use thiserror::Error;

/// Error for StatusId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StatusIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for status title validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StatusTitleError {
    #[error("Title must not be empty")]
    Empty,

    #[error("Title too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for resource URI validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResourceUriError {
    #[error("Resource URI must not be empty")]
    Empty,
}

/// Top-level error for status operations
#[derive(Debug, Clone, Error)]
pub enum StatusError {
    #[error("Invalid status ID: {0}")]
    InvalidStatusId(#[from] StatusIdError),

    #[error("Invalid title: {0}")]
    InvalidTitle(#[from] StatusTitleError),

    #[error("Invalid resource URI: {0}")]
    InvalidResourceUri(#[from] ResourceUriError),

    #[error("Status not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
