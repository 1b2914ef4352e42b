use thiserror::Error;

/// Error for ProfileId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProfileIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for first/last name validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PersonNameError {
    #[error("Name must not be empty")]
    Empty,

    #[error("Name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for avatar validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AvatarError {
    #[error("Avatar must not be empty")]
    Empty,
}

/// Top-level error for profile operations
#[derive(Debug, Clone, Error)]
pub enum ProfileError {
    #[error("Invalid profile ID: {0}")]
    InvalidProfileId(#[from] ProfileIdError),

    #[error("Invalid name: {0}")]
    InvalidName(#[from] PersonNameError),

    #[error("Invalid avatar: {0}")]
    InvalidAvatar(#[from] AvatarError),

    #[error("At least one field is required")]
    EmptyUpdate,

    #[error("Profile not found: {0}")]
    NotFound(String),

    #[error("Profile already exists for user: {0}")]
    AlreadyExists(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
