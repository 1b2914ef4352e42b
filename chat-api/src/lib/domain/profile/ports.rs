use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::profile::errors::ProfileError;
use crate::domain::profile::models::CreateProfileCommand;
use crate::domain::profile::models::NewProfile;
use crate::domain::profile::models::Profile;
use crate::domain::profile::models::ProfileId;
use crate::domain::profile::models::UpdateProfileCommand;
use crate::domain::user::models::UserId;

/// Port for profile domain service operations.
#[async_trait]
pub trait ProfileServicePort: Send + Sync + 'static {
    /// Retrieve the caller's active profile.
    ///
    /// # Errors
    /// * `NotFound` - Caller has no profile or it is deactivated
    async fn get_own_profile(&self, user_id: &UserId) -> Result<Profile, ProfileError>;

    /// Retrieve any active profile by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Profile does not exist or is deactivated
    async fn get_profile(&self, id: &ProfileId) -> Result<Profile, ProfileError>;

    /// Create the caller's profile.
    ///
    /// # Arguments
    /// * `user_id` - Owning account
    /// * `command` - Validated profile fields
    ///
    /// # Errors
    /// * `AlreadyExists` - Caller already has a profile, active or not
    /// * `DatabaseError` - Database operation failed
    async fn create_profile(
        &self,
        user_id: &UserId,
        command: CreateProfileCommand,
    ) -> Result<Profile, ProfileError>;

    /// Partially update the caller's active profile.
    ///
    /// # Errors
    /// * `NotFound` - Caller has no active profile
    /// * `DatabaseError` - Database operation failed
    async fn update_profile(
        &self,
        user_id: &UserId,
        command: UpdateProfileCommand,
    ) -> Result<Profile, ProfileError>;

    /// Deactivate the caller's profile.
    ///
    /// # Errors
    /// * `NotFound` - Caller has no active profile
    async fn delete_profile(&self, user_id: &UserId) -> Result<(), ProfileError>;

    /// Reactivate the caller's profile. Active profiles are returned unchanged.
    ///
    /// # Errors
    /// * `NotFound` - Caller has no profile
    async fn reactivate_profile(&self, user_id: &UserId) -> Result<Profile, ProfileError>;
}

/// Persistence operations for profiles.
#[async_trait]
pub trait ProfileRepository: Send + Sync + 'static {
    /// Insert a profile and return it joined with its owner.
    ///
    /// # Errors
    /// * `AlreadyExists` - Owner already has a profile
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, profile: NewProfile) -> Result<Profile, ProfileError>;

    /// Retrieve profile by identifier, deactivated profiles included.
    async fn find_by_id(&self, id: &ProfileId) -> Result<Option<Profile>, ProfileError>;

    /// Retrieve profile by owning account, deactivated profiles included.
    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<Profile>, ProfileError>;

    /// Persist the editable fields of `profile`.
    ///
    /// # Errors
    /// * `NotFound` - Profile does not exist
    async fn update(&self, profile: Profile) -> Result<Profile, ProfileError>;

    /// Set or clear the deactivation timestamp of the account's profile.
    async fn set_deleted_at(
        &self,
        user_id: &UserId,
        deleted_at: Option<DateTime<Utc>>,
    ) -> Result<(), ProfileError>;
}
