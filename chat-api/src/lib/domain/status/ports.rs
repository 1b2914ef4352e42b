use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::status::errors::StatusError;
use crate::domain::status::models::CreateStatusCommand;
use crate::domain::status::models::Status;
use crate::domain::status::models::StatusId;
use crate::domain::user::models::UserId;

/// Port for status domain service operations.
#[async_trait]
pub trait StatusServicePort: Send + Sync + 'static {
    /// List the caller's statuses still inside the visibility window, newest first.
    async fn list_statuses(&self, user_id: &UserId) -> Result<Vec<Status>, StatusError>;

    /// Post a status for the caller.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_status(
        &self,
        user_id: &UserId,
        command: CreateStatusCommand,
    ) -> Result<Status, StatusError>;

    /// Withdraw one of the caller's visible statuses.
    ///
    /// # Errors
    /// * `NotFound` - No visible status with this id belongs to the caller
    async fn delete_status(&self, user_id: &UserId, id: &StatusId) -> Result<(), StatusError>;
}

/// Persistence operations for statuses.
#[async_trait]
pub trait StatusRepository: Send + Sync + 'static {
    async fn create(&self, status: Status) -> Result<Status, StatusError>;

    /// Statuses of `user_id` created after `since` and not deleted, newest first.
    async fn find_visible_by_user(
        &self,
        user_id: &UserId,
        since: DateTime<Utc>,
    ) -> Result<Vec<Status>, StatusError>;

    /// Mark a status deleted if it belongs to `user_id`, is not deleted and was
    /// created after `since`.
    ///
    /// # Returns
    /// Whether a status was marked
    async fn soft_delete(
        &self,
        user_id: &UserId,
        id: &StatusId,
        since: DateTime<Utc>,
        deleted_at: DateTime<Utc>,
    ) -> Result<bool, StatusError>;
}
