use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::friend::errors::FriendError;
use crate::domain::profile::errors::ProfileError;
use crate::domain::status::errors::StatusError;
use crate::user::errors::UserError;

pub mod friends;
pub mod login;
pub mod logout;
pub mod me;
pub mod profiles;
pub mod refresh;
pub mod register;
pub mod statuses;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    Forbidden(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => ApiError::NotFound("User not found".to_string()),
            UserError::UsernameAlreadyExists(_) | UserError::EmailAlreadyExists(_) => {
                ApiError::Conflict(err.to_string())
            }
            UserError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            UserError::InvalidToken(_) => {
                ApiError::Unauthorized("Invalid or expired token".to_string())
            }
            UserError::AccountDeleted(_) => {
                ApiError::Forbidden("Account has been deleted".to_string())
            }
            UserError::InvalidUsername(_)
            | UserError::InvalidEmail(_)
            | UserError::InvalidPassword(_)
            | UserError::InvalidLoginIdentifier(_)
            | UserError::InvalidUserId(_) => ApiError::UnprocessableEntity(err.to_string()),
            UserError::DatabaseError(_) | UserError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<ProfileError> for ApiError {
    fn from(err: ProfileError) -> Self {
        match err {
            ProfileError::NotFound(_) => ApiError::NotFound("Profile not found".to_string()),
            ProfileError::AlreadyExists(_) => {
                ApiError::Conflict("Profile already exists".to_string())
            }
            ProfileError::InvalidProfileId(_) => ApiError::BadRequest(err.to_string()),
            ProfileError::EmptyUpdate => ApiError::BadRequest(err.to_string()),
            ProfileError::InvalidName(_) | ProfileError::InvalidAvatar(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            ProfileError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<StatusError> for ApiError {
    fn from(err: StatusError) -> Self {
        match err {
            StatusError::NotFound(_) => ApiError::NotFound("Status not found".to_string()),
            StatusError::InvalidStatusId(_) => ApiError::BadRequest(err.to_string()),
            StatusError::InvalidTitle(_) | StatusError::InvalidResourceUri(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            StatusError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<FriendError> for ApiError {
    fn from(err: FriendError) -> Self {
        match err {
            FriendError::NotFound(_) => ApiError::NotFound("Friend not found".to_string()),
            FriendError::RequestNotFound(_) => {
                ApiError::NotFound("Friend request not found".to_string())
            }
            FriendError::AlreadyExists(_) => {
                ApiError::Conflict("Friend request already exists".to_string())
            }
            FriendError::SelfRequest => ApiError::UnprocessableEntity(err.to_string()),
            FriendError::InvalidFriendshipId(_) | FriendError::InvalidUserId(_) => {
                ApiError::BadRequest(err.to_string())
            }
            FriendError::Status(status_err) => ApiError::from(status_err),
            FriendError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Plain message payload for operations without a resource to return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageData {
    pub message: String,
}

impl MessageData {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::errors::PasswordError;

    #[test]
    fn test_user_error_status_mapping() {
        assert_eq!(
            ApiError::from(UserError::NotFound("alice".to_string())),
            ApiError::NotFound("User not found".to_string())
        );
        assert!(matches!(
            ApiError::from(UserError::AccountDeleted("id".to_string())),
            ApiError::Forbidden(_)
        ));
        assert!(matches!(
            ApiError::from(UserError::InvalidCredentials),
            ApiError::Unauthorized(_)
        ));
        assert!(matches!(
            ApiError::from(UserError::EmailAlreadyExists("a@b.c".to_string())),
            ApiError::Conflict(_)
        ));
        assert!(matches!(
            ApiError::from(UserError::from(PasswordError::TooShort { min: 8, actual: 3 })),
            ApiError::UnprocessableEntity(_)
        ));
    }

    #[test]
    fn test_friend_error_status_mapping() {
        assert_eq!(
            ApiError::from(FriendError::RequestNotFound("id".to_string())),
            ApiError::NotFound("Friend request not found".to_string())
        );
        assert!(matches!(
            ApiError::from(FriendError::AlreadyExists("id".to_string())),
            ApiError::Conflict(_)
        ));
        assert!(matches!(
            ApiError::from(FriendError::SelfRequest),
            ApiError::UnprocessableEntity(_)
        ));
        assert!(matches!(
            ApiError::from(FriendError::Status(StatusError::DatabaseError(
                "timeout".to_string()
            ))),
            ApiError::InternalServerError(_)
        ));
    }

    #[test]
    fn test_internal_errors_are_not_exposed() {
        let response =
            ApiError::from(UserError::DatabaseError("connection refused".to_string()))
                .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
