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
use crate::domain::profile::errors::ProfileError;
use crate::domain::profile::models::Avatar;
use crate::domain::profile::models::CreateProfileCommand;
use crate::domain::profile::models::PersonName;
use crate::domain::profile::models::Profile;
use crate::domain::profile::models::ProfileId;
use crate::domain::profile::models::UpdateProfileCommand;
use crate::domain::profile::ports::ProfileServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn get_own_profile(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> Result<ApiSuccess<ProfileData>, ApiError> {
    state
        .profile_service
        .get_own_profile(&auth_user.user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref profile| ApiSuccess::new(StatusCode::OK, profile.into()))
}

pub async fn get_profile(
    State(state): State<AppState>,
    _auth_user: AuthenticatedUser,
    Path(profile_id): Path<String>,
) -> Result<ApiSuccess<ProfileData>, ApiError> {
    let profile_id = ProfileId::from_string(&profile_id).map_err(ProfileError::from)?;

    state
        .profile_service
        .get_profile(&profile_id)
        .await
        .map_err(ApiError::from)
        .map(|ref profile| ApiSuccess::new(StatusCode::OK, profile.into()))
}

pub async fn create_profile(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(body): Json<CreateProfileRequest>,
) -> Result<ApiSuccess<ProfileData>, ApiError> {
    state
        .profile_service
        .create_profile(&auth_user.user_id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref profile| ApiSuccess::new(StatusCode::CREATED, profile.into()))
}

pub async fn update_profile(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<ApiSuccess<ProfileData>, ApiError> {
    state
        .profile_service
        .update_profile(&auth_user.user_id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref profile| ApiSuccess::new(StatusCode::OK, profile.into()))
}

pub async fn delete_profile(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    state
        .profile_service
        .delete_profile(&auth_user.user_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, MessageData::new("Profile deleted")))
}

pub async fn reactivate_profile(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> Result<ApiSuccess<ProfileData>, ApiError> {
    state
        .profile_service
        .reactivate_profile(&auth_user.user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref profile| ApiSuccess::new(StatusCode::OK, profile.into()))
}

/// HTTP request body for creating a profile (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateProfileRequest {
    first_name: String,
    last_name: String,
    avatar: String,
    #[serde(default)]
    bio: Option<String>,
}

impl CreateProfileRequest {
    fn try_into_command(self) -> Result<CreateProfileCommand, ProfileError> {
        Ok(CreateProfileCommand {
            first_name: PersonName::new(self.first_name)?,
            last_name: PersonName::new(self.last_name)?,
            bio: self.bio,
            avatar: Avatar::new(self.avatar)?,
        })
    }
}

/// HTTP request body for a partial profile update (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    avatar: Option<String>,
    #[serde(default)]
    bio: Option<String>,
}

impl UpdateProfileRequest {
    fn try_into_command(self) -> Result<UpdateProfileCommand, ProfileError> {
        let first_name = self.first_name.map(PersonName::new).transpose()?;
        let last_name = self.last_name.map(PersonName::new).transpose()?;
        let avatar = self.avatar.map(Avatar::new).transpose()?;
        UpdateProfileCommand::new(first_name, last_name, self.bio, avatar)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileData {
    pub uid: String,
    pub first_name: String,
    pub last_name: String,
    pub bio: Option<String>,
    pub avatar: String,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Profile> for ProfileData {
    fn from(profile: &Profile) -> Self {
        Self {
            uid: profile.id.to_string(),
            first_name: profile.first_name.as_str().to_string(),
            last_name: profile.last_name.as_str().to_string(),
            bio: profile.bio.clone(),
            avatar: profile.avatar.as_str().to_string(),
            username: profile.username.clone(),
            email: profile.email.clone(),
            created_at: profile.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_without_fields_is_rejected() {
        let request: UpdateProfileRequest = serde_json::from_str("{}").unwrap();
        assert!(matches!(
            request.try_into_command(),
            Err(ProfileError::EmptyUpdate)
        ));
    }

    #[test]
    fn test_create_request_requires_avatar() {
        let request: CreateProfileRequest = serde_json::from_str(
            r#"{"first_name": "Ada", "last_name": "Lovelace", "avatar": " "}"#,
        )
        .unwrap();
        assert!(matches!(
            request.try_into_command(),
            Err(ProfileError::InvalidAvatar(_))
        ));
    }
}
