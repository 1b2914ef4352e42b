use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::status::errors::StatusError;
use crate::domain::status::models::CreateStatusCommand;
use crate::domain::status::models::Status;
use crate::domain::status::models::StatusId;
use crate::domain::status::ports::StatusRepository;
use crate::domain::status::ports::StatusServicePort;
use crate::domain::user::models::UserId;

pub struct StatusService<SR>
where
    SR: StatusRepository,
{
    repository: Arc<SR>,
}

impl<SR> StatusService<SR>
where
    SR: StatusRepository,
{
    pub fn new(repository: Arc<SR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<SR> StatusServicePort for StatusService<SR>
where
    SR: StatusRepository,
{
    async fn list_statuses(&self, user_id: &UserId) -> Result<Vec<Status>, StatusError> {
        self.repository
            .find_visible_by_user(user_id, Status::visible_since(Utc::now()))
            .await
    }

    async fn create_status(
        &self,
        user_id: &UserId,
        command: CreateStatusCommand,
    ) -> Result<Status, StatusError> {
        let status = Status {
            id: StatusId::new(),
            user_id: *user_id,
            title: command.title,
            resource_uri: command.resource_uri,
            resource_thumbnail: command.resource_thumbnail,
            created_at: Utc::now(),
            deleted_at: None,
        };

        let created = self.repository.create(status).await?;
        tracing::debug!(user_id = %user_id, status_id = %created.id, "Status posted");

        Ok(created)
    }

    async fn delete_status(&self, user_id: &UserId, id: &StatusId) -> Result<(), StatusError> {
        let now = Utc::now();
        let deleted = self
            .repository
            .soft_delete(user_id, id, Status::visible_since(now), now)
            .await?;

        if !deleted {
            return Err(StatusError::NotFound(id.to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use chrono::Duration;
    use mockall::mock;

    use super::*;
    use crate::domain::status::models::ResourceUri;
    use crate::domain::status::models::StatusTitle;

    mock! {
        pub TestStatusRepository {}

        #[async_trait]
        impl StatusRepository for TestStatusRepository {
            async fn create(&self, status: Status) -> Result<Status, StatusError>;
            async fn find_visible_by_user(
                &self,
                user_id: &UserId,
                since: DateTime<Utc>,
            ) -> Result<Vec<Status>, StatusError>;
            async fn soft_delete(
                &self,
                user_id: &UserId,
                id: &StatusId,
                since: DateTime<Utc>,
                deleted_at: DateTime<Utc>,
            ) -> Result<bool, StatusError>;
        }
    }

    #[tokio::test]
    async fn test_create_status() {
        let user_id = UserId::new();
        let mut repository = MockTestStatusRepository::new();

        repository
            .expect_create()
            .withf(move |status| {
                status.user_id == user_id
                    && status.title.as_str() == "Sunset"
                    && status.deleted_at.is_none()
            })
            .times(1)
            .returning(|status| Ok(status));

        let service = StatusService::new(Arc::new(repository));

        let command = CreateStatusCommand {
            title: StatusTitle::new("Sunset".to_string()).unwrap(),
            resource_uri: ResourceUri::new("https://cdn.example.com/s.jpg".to_string()).unwrap(),
            resource_thumbnail: None,
        };

        let status = service.create_status(&user_id, command).await.unwrap();
        assert_eq!(status.user_id, user_id);
    }

    #[tokio::test]
    async fn test_list_statuses_uses_visibility_window() {
        let user_id = UserId::new();
        let mut repository = MockTestStatusRepository::new();

        repository
            .expect_find_visible_by_user()
            .withf(move |id, since| {
                let expected = Utc::now() - Duration::hours(24);
                *id == user_id && (*since - expected).num_seconds().abs() < 5
            })
            .times(1)
            .returning(|_, _| Ok(Vec::new()));

        let service = StatusService::new(Arc::new(repository));

        let statuses = service.list_statuses(&user_id).await.unwrap();
        assert!(statuses.is_empty());
    }

    #[tokio::test]
    async fn test_delete_status_not_found() {
        let mut repository = MockTestStatusRepository::new();
        repository
            .expect_soft_delete()
            .times(1)
            .returning(|_, _, _, _| Ok(false));

        let service = StatusService::new(Arc::new(repository));

        let result = service
            .delete_status(&UserId::new(), &StatusId::new())
            .await;
        assert!(matches!(result, Err(StatusError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_status_success() {
        let user_id = UserId::new();
        let status_id = StatusId::new();
        let mut repository = MockTestStatusRepository::new();
        repository
            .expect_soft_delete()
            .withf(move |owner, id, since, deleted_at| {
                *owner == user_id && *id == status_id && since < deleted_at
            })
            .times(1)
            .returning(|_, _, _, _| Ok(true));

        let service = StatusService::new(Arc::new(repository));

        assert!(service.delete_status(&user_id, &status_id).await.is_ok());
    }
}
