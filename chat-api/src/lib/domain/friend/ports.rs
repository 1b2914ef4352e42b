use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::friend::errors::FriendError;
use crate::domain::friend::models::Friend;
use crate::domain::friend::models::FriendStatus;
use crate::domain::friend::models::Friendship;
use crate::domain::friend::models::FriendshipId;
use crate::domain::user::models::UserId;

/// Port for friendship domain service operations.
///
/// Every operation is scoped to the calling account: relations it is not a
/// member of are reported as not found.
#[async_trait]
pub trait FriendServicePort: Send + Sync + 'static {
    /// Ask another account for friendship.
    ///
    /// # Errors
    /// * `SelfRequest` - Target is the caller
    /// * `AlreadyExists` - A request or friendship already links both accounts
    /// * `NotFound` - Target account does not exist
    async fn send_request(&self, user_id: &UserId, target: &UserId)
        -> Result<Friendship, FriendError>;

    async fn list_friends(&self, user_id: &UserId) -> Result<Vec<Friend>, FriendError>;

    /// # Errors
    /// * `NotFound` - `friend_id` is not an accepted friend of the caller
    async fn get_friend(&self, user_id: &UserId, friend_id: &UserId)
        -> Result<Friend, FriendError>;

    /// # Errors
    /// * `NotFound` - `friend_id` is not an accepted friend of the caller
    async fn remove_friend(&self, user_id: &UserId, friend_id: &UserId)
        -> Result<(), FriendError>;

    /// Pending requests the caller sent or received, newest first.
    async fn list_requests(&self, user_id: &UserId) -> Result<Vec<Friend>, FriendError>;

    /// # Errors
    /// * `RequestNotFound` - No pending request with this id involves the caller
    async fn get_request(&self, user_id: &UserId, id: &FriendshipId)
        -> Result<Friend, FriendError>;

    /// Accept a pending request addressed to the caller.
    ///
    /// # Errors
    /// * `RequestNotFound` - No pending request with this id is addressed to the caller
    async fn accept_request(&self, user_id: &UserId, id: &FriendshipId)
        -> Result<(), FriendError>;

    /// Decline a received request or withdraw a sent one.
    ///
    /// # Errors
    /// * `RequestNotFound` - No pending request with this id involves the caller
    async fn delete_request(&self, user_id: &UserId, id: &FriendshipId)
        -> Result<(), FriendError>;

    /// Visible statuses of every friend, newest first.
    async fn list_friends_statuses(&self, user_id: &UserId)
        -> Result<Vec<FriendStatus>, FriendError>;

    /// Visible statuses of one friend, newest first.
    ///
    /// # Errors
    /// * `NotFound` - `friend_id` is not an accepted friend of the caller
    async fn get_friend_statuses(
        &self,
        user_id: &UserId,
        friend_id: &UserId,
    ) -> Result<Vec<FriendStatus>, FriendError>;
}

/// Persistence operations for friendships.
#[async_trait]
pub trait FriendRepository: Send + Sync + 'static {
    /// # Errors
    /// * `AlreadyExists` - Both accounts are already linked, in either direction
    /// * `NotFound` - Addressee account does not exist
    async fn create(&self, friendship: Friendship) -> Result<Friendship, FriendError>;

    /// Accepted friends of `user_id`.
    async fn find_friends(&self, user_id: &UserId) -> Result<Vec<Friend>, FriendError>;

    async fn find_friend(
        &self,
        user_id: &UserId,
        friend_id: &UserId,
    ) -> Result<Option<Friend>, FriendError>;

    /// # Returns
    /// Whether an accepted friendship was removed
    async fn delete_friend(&self, user_id: &UserId, friend_id: &UserId)
        -> Result<bool, FriendError>;

    /// Pending requests involving `user_id`.
    async fn find_requests(&self, user_id: &UserId) -> Result<Vec<Friend>, FriendError>;

    async fn find_request(
        &self,
        user_id: &UserId,
        id: &FriendshipId,
    ) -> Result<Option<Friend>, FriendError>;

    /// Mark a pending request addressed to `addressee_id` accepted.
    ///
    /// # Returns
    /// Whether a request was accepted
    async fn accept_request(
        &self,
        addressee_id: &UserId,
        id: &FriendshipId,
        accepted_at: DateTime<Utc>,
    ) -> Result<bool, FriendError>;

    /// # Returns
    /// Whether a pending request was removed
    async fn delete_request(&self, user_id: &UserId, id: &FriendshipId)
        -> Result<bool, FriendError>;
}
