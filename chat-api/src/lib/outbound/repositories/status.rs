use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::status::errors::StatusError;
use crate::domain::status::models::ResourceUri;
use crate::domain::status::models::Status;
use crate::domain::status::models::StatusId;
use crate::domain::status::models::StatusTitle;
use crate::domain::status::ports::StatusRepository;
use crate::domain::user::models::UserId;

pub struct PostgresStatusRepository {
    pool: PgPool,
}

impl PostgresStatusRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct StatusRow {
    id: Uuid,
    user_id: Uuid,
    title: String,
    resource_uri: String,
    resource_thumbnail: Option<String>,
    created_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl TryFrom<StatusRow> for Status {
    type Error = StatusError;

    fn try_from(row: StatusRow) -> Result<Self, Self::Error> {
        Ok(Status {
            id: StatusId(row.id),
            user_id: UserId(row.user_id),
            title: StatusTitle::new(row.title)?,
            resource_uri: ResourceUri::new(row.resource_uri)?,
            resource_thumbnail: row.resource_thumbnail,
            created_at: row.created_at,
            deleted_at: row.deleted_at,
        })
    }
}

#[async_trait]
impl StatusRepository for PostgresStatusRepository {
    async fn create(&self, status: Status) -> Result<Status, StatusError> {
        sqlx::query(
            r#"
            INSERT INTO statuses (id, user_id, title, resource_uri, resource_thumbnail, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(status.id.0)
        .bind(status.user_id.0)
        .bind(status.title.as_str())
        .bind(status.resource_uri.as_str())
        .bind(status.resource_thumbnail.as_deref())
        .bind(status.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StatusError::DatabaseError(e.to_string()))?;

        Ok(status)
    }

    async fn find_visible_by_user(
        &self,
        user_id: &UserId,
        since: DateTime<Utc>,
    ) -> Result<Vec<Status>, StatusError> {
        let rows = sqlx::query_as::<_, StatusRow>(
            r#"
            SELECT id, user_id, title, resource_uri, resource_thumbnail, created_at, deleted_at
            FROM statuses
            WHERE user_id = $1 AND created_at > $2 AND deleted_at IS NULL
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id.0)
        .bind(since)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StatusError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Status::try_from).collect()
    }

    async fn soft_delete(
        &self,
        user_id: &UserId,
        id: &StatusId,
        since: DateTime<Utc>,
        deleted_at: DateTime<Utc>,
    ) -> Result<bool, StatusError> {
        let result = sqlx::query(
            r#"
            UPDATE statuses
            SET deleted_at = $4
            WHERE id = $1 AND user_id = $2 AND created_at > $3 AND deleted_at IS NULL
            "#,
        )
        .bind(id.0)
        .bind(user_id.0)
        .bind(since)
        .bind(deleted_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StatusError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
