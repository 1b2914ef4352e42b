use std::fmt;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::status::errors::ResourceUriError;
use crate::domain::status::errors::StatusIdError;
use crate::domain::status::errors::StatusTitleError;
use crate::domain::user::models::UserId;

/// How long a status stays visible after it is posted.
pub const VISIBILITY_WINDOW_HOURS: i64 = 24;

/// Short-lived media status posted by an account.
#[derive(Debug, Clone)]
pub struct Status {
    pub id: StatusId,
    pub user_id: UserId,
    pub title: StatusTitle,
    pub resource_uri: ResourceUri,
    pub resource_thumbnail: Option<String>,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Status {
    /// Oldest creation time still visible at `now`.
    pub fn visible_since(now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::hours(VISIBILITY_WINDOW_HOURS)
    }

    pub fn is_visible_at(&self, now: DateTime<Utc>) -> bool {
        self.deleted_at.is_none() && self.created_at > Self::visible_since(now)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusId(pub Uuid);

impl StatusId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, StatusIdError> {
        Uuid::parse_str(s)
            .map(StatusId)
            .map_err(|e| StatusIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for StatusId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for StatusId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTitle(String);

impl StatusTitle {
    const MAX_LENGTH: usize = 128;

    pub fn new(title: String) -> Result<Self, StatusTitleError> {
        let title = title.trim().to_string();
        let length = title.chars().count();
        if length == 0 {
            Err(StatusTitleError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(StatusTitleError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(title))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceUri(String);

impl ResourceUri {
    pub fn new(uri: String) -> Result<Self, ResourceUriError> {
        let uri = uri.trim().to_string();
        if uri.is_empty() {
            return Err(ResourceUriError::Empty);
        }
        Ok(Self(uri))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Command to post a status for the caller
#[derive(Debug)]
pub struct CreateStatusCommand {
    pub title: StatusTitle,
    pub resource_uri: ResourceUri,
    pub resource_thumbnail: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_created_at(created_at: DateTime<Utc>) -> Status {
        Status {
            id: StatusId::new(),
            user_id: UserId::new(),
            title: StatusTitle::new("At the beach".to_string()).unwrap(),
            resource_uri: ResourceUri::new("https://cdn.example.com/a.jpg".to_string()).unwrap(),
            resource_thumbnail: None,
            created_at,
            deleted_at: None,
        }
    }

    #[test]
    fn test_visibility_window() {
        let now = Utc::now();

        assert!(status_created_at(now - Duration::hours(23)).is_visible_at(now));
        assert!(!status_created_at(now - Duration::hours(24)).is_visible_at(now));
        assert!(!status_created_at(now - Duration::hours(25)).is_visible_at(now));
    }

    #[test]
    fn test_deleted_status_is_hidden() {
        let now = Utc::now();
        let mut status = status_created_at(now);
        status.deleted_at = Some(now);

        assert!(!status.is_visible_at(now));
    }

    #[test]
    fn test_title_validation() {
        assert_eq!(
            StatusTitle::new(" ".to_string()),
            Err(StatusTitleError::Empty)
        );
        assert!(StatusTitle::new("x".repeat(129)).is_err());
    }
}
