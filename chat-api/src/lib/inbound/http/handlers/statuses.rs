use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::MessageData;
use crate::domain::status::errors::StatusError;
use crate::domain::status::models::CreateStatusCommand;
use crate::domain::status::models::ResourceUri;
use crate::domain::status::models::Status;
use crate::domain::status::models::StatusId;
use crate::domain::status::models::StatusTitle;
use crate::domain::status::ports::StatusServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn list_statuses(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> Result<ApiSuccess<Vec<StatusData>>, ApiError> {
    state
        .status_service
        .list_statuses(&auth_user.user_id)
        .await
        .map_err(ApiError::from)
        .map(|statuses| {
            ApiSuccess::new(
                StatusCode::OK,
                statuses.iter().map(StatusData::from).collect(),
            )
        })
}

pub async fn create_status(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(body): Json<CreateStatusRequest>,
) -> Result<ApiSuccess<StatusData>, ApiError> {
    state
        .status_service
        .create_status(&auth_user.user_id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref status| ApiSuccess::new(StatusCode::CREATED, status.into()))
}

pub async fn delete_status(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(status_id): Path<String>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    let status_id = StatusId::from_string(&status_id).map_err(StatusError::from)?;

    state
        .status_service
        .delete_status(&auth_user.user_id, &status_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, MessageData::new("Status deleted")))
}

/// HTTP request body for posting a status (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateStatusRequest {
    title: String,
    resource_uri: String,
    #[serde(default)]
    resource_thumbnail: Option<String>,
}

impl CreateStatusRequest {
    fn try_into_command(self) -> Result<CreateStatusCommand, StatusError> {
        Ok(CreateStatusCommand {
            title: StatusTitle::new(self.title)?,
            resource_uri: ResourceUri::new(self.resource_uri)?,
            resource_thumbnail: self.resource_thumbnail,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusData {
    pub uid: String,
    pub title: String,
    pub resource_uri: String,
    pub resource_thumbnail: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Status> for StatusData {
    fn from(status: &Status) -> Self {
        Self {
            uid: status.id.to_string(),
            title: status.title.as_str().to_string(),
            resource_uri: status.resource_uri.as_str().to_string(),
            resource_thumbnail: status.resource_thumbnail.clone(),
            created_at: status.created_at,
        }
    }
}
