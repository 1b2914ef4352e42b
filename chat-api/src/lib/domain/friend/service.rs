use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::friend::errors::FriendError;
use crate::domain::friend::models::Friend;
use crate::domain::friend::models::FriendStatus;
use crate::domain::friend::models::Friendship;
use crate::domain::friend::models::FriendshipId;
use crate::domain::friend::ports::FriendRepository;
use crate::domain::friend::ports::FriendServicePort;
use crate::domain::status::models::Status;
use crate::domain::status::ports::StatusRepository;
use crate::domain::user::models::UserId;

pub struct FriendService<FR, SR>
where
    FR: FriendRepository,
    SR: StatusRepository,
{
    repository: Arc<FR>,
    statuses: Arc<SR>,
}

impl<FR, SR> FriendService<FR, SR>
where
    FR: FriendRepository,
    SR: StatusRepository,
{
    pub fn new(repository: Arc<FR>, statuses: Arc<SR>) -> Self {
        Self {
            repository,
            statuses,
        }
    }

    async fn visible_statuses(
        &self,
        friends: Vec<Friend>,
    ) -> Result<Vec<FriendStatus>, FriendError> {
        let since = Status::visible_since(Utc::now());
        let mut feed = Vec::new();

        for friend in friends {
            let statuses = self
                .statuses
                .find_visible_by_user(&friend.user_id, since)
                .await?;
            feed.extend(statuses.into_iter().map(|status| FriendStatus {
                friend: friend.clone(),
                status,
            }));
        }

        feed.sort_by(|a, b| b.status.created_at.cmp(&a.status.created_at));
        Ok(feed)
    }

    async fn require_friend(
        &self,
        user_id: &UserId,
        friend_id: &UserId,
    ) -> Result<Friend, FriendError> {
        self.repository
            .find_friend(user_id, friend_id)
            .await?
            .ok_or(FriendError::NotFound(friend_id.to_string()))
    }
}

#[async_trait]
impl<FR, SR> FriendServicePort for FriendService<FR, SR>
where
    FR: FriendRepository,
    SR: StatusRepository,
{
    async fn send_request(
        &self,
        user_id: &UserId,
        target: &UserId,
    ) -> Result<Friendship, FriendError> {
        if user_id == target {
            return Err(FriendError::SelfRequest);
        }

        let request = self
            .repository
            .create(Friendship::request(*user_id, *target, Utc::now()))
            .await?;
        tracing::debug!(
            requester_id = %user_id,
            addressee_id = %target,
            friendship_id = %request.id,
            "Friend request sent"
        );

        Ok(request)
    }

    async fn list_friends(&self, user_id: &UserId) -> Result<Vec<Friend>, FriendError> {
        self.repository.find_friends(user_id).await
    }

    async fn get_friend(&self, user_id: &UserId, friend_id: &UserId) -> Result<Friend, FriendError> {
        self.require_friend(user_id, friend_id).await
    }

    async fn remove_friend(&self, user_id: &UserId, friend_id: &UserId) -> Result<(), FriendError> {
        if !self.repository.delete_friend(user_id, friend_id).await? {
            return Err(FriendError::NotFound(friend_id.to_string()));
        }

        tracing::debug!(user_id = %user_id, friend_id = %friend_id, "Friend removed");
        Ok(())
    }

    async fn list_requests(&self, user_id: &UserId) -> Result<Vec<Friend>, FriendError> {
        self.repository.find_requests(user_id).await
    }

    async fn get_request(
        &self,
        user_id: &UserId,
        id: &FriendshipId,
    ) -> Result<Friend, FriendError> {
        self.repository
            .find_request(user_id, id)
            .await?
            .ok_or(FriendError::RequestNotFound(id.to_string()))
    }

    async fn accept_request(&self, user_id: &UserId, id: &FriendshipId) -> Result<(), FriendError> {
        if !self
            .repository
            .accept_request(user_id, id, Utc::now())
            .await?
        {
            return Err(FriendError::RequestNotFound(id.to_string()));
        }

        tracing::debug!(user_id = %user_id, friendship_id = %id, "Friend request accepted");
        Ok(())
    }

    async fn delete_request(&self, user_id: &UserId, id: &FriendshipId) -> Result<(), FriendError> {
        if !self.repository.delete_request(user_id, id).await? {
            return Err(FriendError::RequestNotFound(id.to_string()));
        }

        Ok(())
    }

    async fn list_friends_statuses(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<FriendStatus>, FriendError> {
        let friends = self.repository.find_friends(user_id).await?;
        self.visible_statuses(friends).await
    }

    async fn get_friend_statuses(
        &self,
        user_id: &UserId,
        friend_id: &UserId,
    ) -> Result<Vec<FriendStatus>, FriendError> {
        let friend = self.require_friend(user_id, friend_id).await?;
        self.visible_statuses(vec![friend]).await
    }
}
