use thiserror::Error;

use crate::domain::status::errors::StatusError;
use crate::domain::user::errors::UserIdError;

/// Error for FriendshipId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FriendshipIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for friendship operations
#[derive(Debug, Clone, Error)]
pub enum FriendError {
    #[error("Invalid friendship ID: {0}")]
    InvalidFriendshipId(#[from] FriendshipIdError),

    #[error("Invalid user ID: {0}")]
    InvalidUserId(#[from] UserIdError),

    #[error("Cannot send a friend request to yourself")]
    SelfRequest,

    #[error("Friendship already exists with user: {0}")]
    AlreadyExists(String),

    #[error("Friend not found: {0}")]
    NotFound(String),

    #[error("Friend request not found: {0}")]
    RequestNotFound(String),

    #[error(transparent)]
    Status(#[from] StatusError),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
