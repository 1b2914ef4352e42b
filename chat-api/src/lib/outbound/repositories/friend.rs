use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::friend::errors::FriendError;
use crate::domain::friend::models::Friend;
use crate::domain::friend::models::Friendship;
use crate::domain::friend::models::FriendshipId;
use crate::domain::friend::ports::FriendRepository;
use crate::domain::user::models::UserId;

/// Relations of `$1`, each joined with the other member's account and active
/// profile. Deleted accounts are left out.
const FRIEND_SELECT: &str = r#"
    SELECT f.id AS relation_id, f.requester_id, o.id AS user_id, o.username,
           p.first_name, p.last_name, p.bio, p.avatar, f.created_at, f.accepted_at
    FROM friendships f
    JOIN users o ON o.id = CASE
        WHEN f.requester_id = $1 THEN f.addressee_id
        ELSE f.requester_id
    END
    LEFT JOIN profiles p ON p.user_id = o.id AND p.deleted_at IS NULL
    WHERE (f.requester_id = $1 OR f.addressee_id = $1) AND o.deleted_at IS NULL
"#;

pub struct PostgresFriendRepository {
    pool: PgPool,
}

impl PostgresFriendRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct FriendRow {
    relation_id: Uuid,
    requester_id: Uuid,
    user_id: Uuid,
    username: String,
    first_name: Option<String>,
    last_name: Option<String>,
    bio: Option<String>,
    avatar: Option<String>,
    created_at: DateTime<Utc>,
    accepted_at: Option<DateTime<Utc>>,
}

impl From<FriendRow> for Friend {
    fn from(row: FriendRow) -> Self {
        Friend {
            relation_id: FriendshipId(row.relation_id),
            requester_id: UserId(row.requester_id),
            user_id: UserId(row.user_id),
            username: row.username,
            first_name: row.first_name,
            last_name: row.last_name,
            bio: row.bio,
            avatar: row.avatar,
            created_at: row.created_at,
            accepted_at: row.accepted_at,
        }
    }
}

fn database_error(e: sqlx::Error) -> FriendError {
    FriendError::DatabaseError(e.to_string())
}

#[async_trait]
impl FriendRepository for PostgresFriendRepository {
    async fn create(&self, friendship: Friendship) -> Result<Friendship, FriendError> {
        sqlx::query(
            r#"
            INSERT INTO friendships (id, requester_id, addressee_id, created_at, accepted_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(friendship.id.0)
        .bind(friendship.requester_id.0)
        .bind(friendship.addressee_id.0)
        .bind(friendship.created_at)
        .bind(friendship.accepted_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return FriendError::AlreadyExists(friendship.addressee_id.to_string());
                }
                if db_err.is_foreign_key_violation() {
                    return FriendError::NotFound(friendship.addressee_id.to_string());
                }
                if db_err.is_check_violation() {
                    return FriendError::SelfRequest;
                }
            }
            database_error(e)
        })?;

        Ok(friendship)
    }

    async fn find_friends(&self, user_id: &UserId) -> Result<Vec<Friend>, FriendError> {
        let sql = format!(
            "{} AND f.accepted_at IS NOT NULL ORDER BY o.username",
            FRIEND_SELECT
        );

        let rows = sqlx::query_as::<_, FriendRow>(&sql)
            .bind(user_id.0)
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(rows.into_iter().map(Friend::from).collect())
    }

    async fn find_friend(
        &self,
        user_id: &UserId,
        friend_id: &UserId,
    ) -> Result<Option<Friend>, FriendError> {
        let sql = format!(
            "{} AND f.accepted_at IS NOT NULL AND o.id = $2",
            FRIEND_SELECT
        );

        let row = sqlx::query_as::<_, FriendRow>(&sql)
            .bind(user_id.0)
            .bind(friend_id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(row.map(Friend::from))
    }

    async fn delete_friend(&self, user_id: &UserId, friend_id: &UserId) -> Result<bool, FriendError> {
        let result = sqlx::query(
            r#"
            DELETE FROM friendships
            WHERE accepted_at IS NOT NULL
              AND ((requester_id = $1 AND addressee_id = $2)
                OR (requester_id = $2 AND addressee_id = $1))
            "#,
        )
        .bind(user_id.0)
        .bind(friend_id.0)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_requests(&self, user_id: &UserId) -> Result<Vec<Friend>, FriendError> {
        let sql = format!(
            "{} AND f.accepted_at IS NULL ORDER BY f.created_at DESC",
            FRIEND_SELECT
        );

        let rows = sqlx::query_as::<_, FriendRow>(&sql)
            .bind(user_id.0)
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(rows.into_iter().map(Friend::from).collect())
    }

    async fn find_request(
        &self,
        user_id: &UserId,
        id: &FriendshipId,
    ) -> Result<Option<Friend>, FriendError> {
        let sql = format!("{} AND f.accepted_at IS NULL AND f.id = $2", FRIEND_SELECT);

        let row = sqlx::query_as::<_, FriendRow>(&sql)
            .bind(user_id.0)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(row.map(Friend::from))
    }

    async fn accept_request(
        &self,
        addressee_id: &UserId,
        id: &FriendshipId,
        accepted_at: DateTime<Utc>,
    ) -> Result<bool, FriendError> {
        let result = sqlx::query(
            r#"
            UPDATE friendships
            SET accepted_at = $3
            WHERE id = $1 AND addressee_id = $2 AND accepted_at IS NULL
            "#,
        )
        .bind(id.0)
        .bind(addressee_id.0)
        .bind(accepted_at)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_request(&self, user_id: &UserId, id: &FriendshipId) -> Result<bool, FriendError> {
        let result = sqlx::query(
            r#"
            DELETE FROM friendships
            WHERE id = $1 AND accepted_at IS NULL
              AND (requester_id = $2 OR addressee_id = $2)
            "#,
        )
        .bind(id.0)
        .bind(user_id.0)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(result.rows_affected() > 0)
    }
}
