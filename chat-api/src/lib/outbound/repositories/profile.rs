use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::profile::errors::ProfileError;
use crate::domain::profile::models::Avatar;
use crate::domain::profile::models::NewProfile;
use crate::domain::profile::models::PersonName;
use crate::domain::profile::models::Profile;
use crate::domain::profile::models::ProfileId;
use crate::domain::profile::ports::ProfileRepository;
use crate::domain::user::models::UserId;

/// Profile columns joined with the owning account's username and email.
///
/// Expects the profile relation aliased `p`.
const PROFILE_COLUMNS: &str = r#"
    p.id, p.user_id, p.first_name, p.last_name, p.bio, p.avatar,
    u.username, u.email, p.created_at, p.updated_at, p.deleted_at
"#;

pub struct PostgresProfileRepository {
    pool: PgPool,
}

impl PostgresProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ProfileRow {
    id: Uuid,
    user_id: Uuid,
    first_name: String,
    last_name: String,
    bio: Option<String>,
    avatar: String,
    username: String,
    email: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl TryFrom<ProfileRow> for Profile {
    type Error = ProfileError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        Ok(Profile {
            id: ProfileId(row.id),
            user_id: UserId(row.user_id),
            first_name: PersonName::new(row.first_name)?,
            last_name: PersonName::new(row.last_name)?,
            bio: row.bio,
            avatar: Avatar::new(row.avatar)?,
            username: row.username,
            email: row.email,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        })
    }
}

fn database_error(e: sqlx::Error) -> ProfileError {
    ProfileError::DatabaseError(e.to_string())
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn create(&self, profile: NewProfile) -> Result<Profile, ProfileError> {
        let sql = format!(
            r#"
            WITH p AS (
                INSERT INTO profiles (id, user_id, first_name, last_name, bio, avatar)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING *
            )
            SELECT {} FROM p JOIN users u ON p.user_id = u.id
            "#,
            PROFILE_COLUMNS
        );

        let row = sqlx::query_as::<_, ProfileRow>(&sql)
            .bind(profile.id.0)
            .bind(profile.user_id.0)
            .bind(profile.first_name.as_str())
            .bind(profile.last_name.as_str())
            .bind(profile.bio.as_deref())
            .bind(profile.avatar.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_unique_violation() {
                        return ProfileError::AlreadyExists(profile.user_id.to_string());
                    }
                }
                database_error(e)
            })?;

        Profile::try_from(row)
    }

    async fn find_by_id(&self, id: &ProfileId) -> Result<Option<Profile>, ProfileError> {
        let sql = format!(
            "SELECT {} FROM profiles p JOIN users u ON p.user_id = u.id WHERE p.id = $1",
            PROFILE_COLUMNS
        );

        sqlx::query_as::<_, ProfileRow>(&sql)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?
            .map(Profile::try_from)
            .transpose()
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<Profile>, ProfileError> {
        let sql = format!(
            "SELECT {} FROM profiles p JOIN users u ON p.user_id = u.id WHERE p.user_id = $1",
            PROFILE_COLUMNS
        );

        sqlx::query_as::<_, ProfileRow>(&sql)
            .bind(user_id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?
            .map(Profile::try_from)
            .transpose()
    }

    async fn update(&self, profile: Profile) -> Result<Profile, ProfileError> {
        let sql = format!(
            r#"
            WITH p AS (
                UPDATE profiles
                SET first_name = $2, last_name = $3, bio = $4, avatar = $5, updated_at = NOW()
                WHERE id = $1
                RETURNING *
            )
            SELECT {} FROM p JOIN users u ON p.user_id = u.id
            "#,
            PROFILE_COLUMNS
        );

        sqlx::query_as::<_, ProfileRow>(&sql)
            .bind(profile.id.0)
            .bind(profile.first_name.as_str())
            .bind(profile.last_name.as_str())
            .bind(profile.bio.as_deref())
            .bind(profile.avatar.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?
            .ok_or(ProfileError::NotFound(profile.id.to_string()))
            .and_then(Profile::try_from)
    }

    async fn set_deleted_at(
        &self,
        user_id: &UserId,
        deleted_at: Option<DateTime<Utc>>,
    ) -> Result<(), ProfileError> {
        let result = sqlx::query("UPDATE profiles SET deleted_at = $2 WHERE user_id = $1")
            .bind(user_id.0)
            .bind(deleted_at)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(ProfileError::NotFound(user_id.to_string()));
        }

        Ok(())
    }
}
