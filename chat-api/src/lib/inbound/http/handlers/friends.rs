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
use crate::domain::friend::errors::FriendError;
use crate::domain::friend::models::Friend;
use crate::domain::friend::models::FriendStatus;
use crate::domain::friend::models::FriendshipId;
use crate::domain::friend::ports::FriendServicePort;
use crate::domain::user::models::UserId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

fn parse_user_id(raw: &str) -> Result<UserId, FriendError> {
    Ok(UserId::from_string(raw)?)
}

fn parse_request_id(raw: &str) -> Result<FriendshipId, FriendError> {
    Ok(FriendshipId::from_string(raw)?)
}

pub async fn list_friends(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> Result<ApiSuccess<Vec<FriendData>>, ApiError> {
    state
        .friend_service
        .list_friends(&auth_user.user_id)
        .await
        .map_err(ApiError::from)
        .map(|friends| ApiSuccess::new(StatusCode::OK, friends.iter().map(FriendData::from).collect()))
}

pub async fn get_friend(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(friend_id): Path<String>,
) -> Result<ApiSuccess<FriendData>, ApiError> {
    let friend_id = parse_user_id(&friend_id)?;

    state
        .friend_service
        .get_friend(&auth_user.user_id, &friend_id)
        .await
        .map_err(ApiError::from)
        .map(|ref friend| ApiSuccess::new(StatusCode::OK, friend.into()))
}

pub async fn remove_friend(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(friend_id): Path<String>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    let friend_id = parse_user_id(&friend_id)?;

    state
        .friend_service
        .remove_friend(&auth_user.user_id, &friend_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, MessageData::new("Friend removed")))
}

pub async fn send_request(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(body): Json<SendRequestRequest>,
) -> Result<ApiSuccess<CreatedRequestData>, ApiError> {
    let target = parse_user_id(&body.uid)?;

    state
        .friend_service
        .send_request(&auth_user.user_id, &target)
        .await
        .map_err(ApiError::from)
        .map(|request| {
            ApiSuccess::new(
                StatusCode::CREATED,
                CreatedRequestData {
                    rid: request.id.to_string(),
                    uid: request.addressee_id.to_string(),
                    created_at: request.created_at,
                },
            )
        })
}

pub async fn list_requests(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> Result<ApiSuccess<Vec<FriendRequestData>>, ApiError> {
    state
        .friend_service
        .list_requests(&auth_user.user_id)
        .await
        .map_err(ApiError::from)
        .map(|requests| {
            ApiSuccess::new(
                StatusCode::OK,
                requests.iter().map(FriendRequestData::from).collect(),
            )
        })
}

pub async fn get_request(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(request_id): Path<String>,
) -> Result<ApiSuccess<FriendRequestData>, ApiError> {
    let request_id = parse_request_id(&request_id)?;

    state
        .friend_service
        .get_request(&auth_user.user_id, &request_id)
        .await
        .map_err(ApiError::from)
        .map(|ref request| ApiSuccess::new(StatusCode::OK, request.into()))
}

pub async fn accept_request(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(request_id): Path<String>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    let request_id = parse_request_id(&request_id)?;

    state
        .friend_service
        .accept_request(&auth_user.user_id, &request_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, MessageData::new("Friend request accepted")))
}

pub async fn delete_request(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(request_id): Path<String>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    let request_id = parse_request_id(&request_id)?;

    state
        .friend_service
        .delete_request(&auth_user.user_id, &request_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, MessageData::new("Friend request deleted")))
}

pub async fn list_friends_statuses(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> Result<ApiSuccess<Vec<FriendStatusData>>, ApiError> {
    state
        .friend_service
        .list_friends_statuses(&auth_user.user_id)
        .await
        .map_err(ApiError::from)
        .map(|feed| ApiSuccess::new(StatusCode::OK, feed.iter().map(FriendStatusData::from).collect()))
}

pub async fn get_friend_statuses(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(friend_id): Path<String>,
) -> Result<ApiSuccess<Vec<FriendStatusData>>, ApiError> {
    let friend_id = parse_user_id(&friend_id)?;

    state
        .friend_service
        .get_friend_statuses(&auth_user.user_id, &friend_id)
        .await
        .map_err(ApiError::from)
        .map(|feed| ApiSuccess::new(StatusCode::OK, feed.iter().map(FriendStatusData::from).collect()))
}

/// HTTP request body for a friend request (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SendRequestRequest {
    uid: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedRequestData {
    pub rid: String,
    pub uid: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FriendData {
    pub rid: String,
    pub uid: String,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted_at: Option<DateTime<Utc>>,
}

impl From<&Friend> for FriendData {
    fn from(friend: &Friend) -> Self {
        Self {
            rid: friend.relation_id.to_string(),
            uid: friend.user_id.to_string(),
            username: friend.username.clone(),
            first_name: friend.first_name.clone(),
            last_name: friend.last_name.clone(),
            bio: friend.bio.clone(),
            avatar: friend.avatar.clone(),
            accepted_at: friend.accepted_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FriendRequestData {
    #[serde(flatten)]
    pub friend: FriendData,
    pub outgoing: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Friend> for FriendRequestData {
    fn from(request: &Friend) -> Self {
        Self {
            friend: request.into(),
            outgoing: request.is_outgoing(),
            created_at: request.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FriendStatusData {
    pub rid: String,
    pub uid: String,
    pub status_id: String,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar: Option<String>,
    pub title: String,
    pub resource_uri: String,
    pub resource_thumbnail: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&FriendStatus> for FriendStatusData {
    fn from(entry: &FriendStatus) -> Self {
        Self {
            rid: entry.friend.relation_id.to_string(),
            uid: entry.friend.user_id.to_string(),
            status_id: entry.status.id.to_string(),
            username: entry.friend.username.clone(),
            first_name: entry.friend.first_name.clone(),
            last_name: entry.friend.last_name.clone(),
            avatar: entry.friend.avatar.clone(),
            title: entry.status.title.as_str().to_string(),
            resource_uri: entry.status.resource_uri.as_str().to_string(),
            resource_thumbnail: entry.status.resource_thumbnail.clone(),
            created_at: entry.status.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_path_ids_are_bad_requests() {
        assert!(matches!(
            parse_user_id("nope").map_err(ApiError::from),
            Err(ApiError::BadRequest(_))
        ));
        assert!(matches!(
            parse_request_id("nope").map_err(ApiError::from),
            Err(ApiError::BadRequest(_))
        ));
    }

    #[test]
    fn test_request_data_marks_direction() {
        let me = UserId::new();
        let other = UserId::new();
        let request = Friend {
            relation_id: FriendshipId::new(),
            requester_id: me,
            user_id: other,
            username: "bob".to_string(),
            first_name: None,
            last_name: None,
            bio: None,
            avatar: None,
            created_at: Utc::now(),
            accepted_at: None,
        };

        let data = FriendRequestData::from(&request);
        assert!(data.outgoing);
        assert_eq!(data.friend.uid, other.to_string());

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["username"], "bob");
        assert!(json.get("accepted_at").is_none());
    }
}
