use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::profile::errors::AvatarError;
use crate::domain::profile::errors::PersonNameError;
use crate::domain::profile::errors::ProfileError;
use crate::domain::profile::errors::ProfileIdError;
use crate::domain::user::models::UserId;

/// Public profile attached to an account.
///
/// At most one per account. `username` and `email` are read from the owning
/// account when the profile is loaded.
#[derive(Debug, Clone)]
pub struct Profile {
    pub id: ProfileId,
    pub user_id: UserId,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub bio: Option<String>,
    pub avatar: Avatar,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Profile {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProfileId(pub Uuid);

impl ProfileId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, ProfileIdError> {
        Uuid::parse_str(s)
            .map(ProfileId)
            .map_err(|e| ProfileIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for ProfileId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// First or last name: trimmed, non-empty, at most 64 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    const MAX_LENGTH: usize = 64;

    pub fn new(name: String) -> Result<Self, PersonNameError> {
        let name = name.trim().to_string();
        let length = name.chars().count();
        if length == 0 {
            Err(PersonNameError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(PersonNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Avatar image reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Avatar(String);

impl Avatar {
    pub fn new(avatar: String) -> Result<Self, AvatarError> {
        let avatar = avatar.trim().to_string();
        if avatar.is_empty() {
            return Err(AvatarError::Empty);
        }
        Ok(Self(avatar))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Command to create the caller's profile
#[derive(Debug)]
pub struct CreateProfileCommand {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub bio: Option<String>,
    pub avatar: Avatar,
}

/// Row to insert for a new profile
#[derive(Debug, Clone)]
pub struct NewProfile {
    pub id: ProfileId,
    pub user_id: UserId,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub bio: Option<String>,
    pub avatar: Avatar,
}

/// Partial update of the caller's profile.
///
/// Only provided fields will be updated.
#[derive(Debug)]
pub struct UpdateProfileCommand {
    pub first_name: Option<PersonName>,
    pub last_name: Option<PersonName>,
    pub bio: Option<String>,
    pub avatar: Option<Avatar>,
}

impl UpdateProfileCommand {
    /// # Errors
    /// * `EmptyUpdate` - No field was provided
    pub fn new(
        first_name: Option<PersonName>,
        last_name: Option<PersonName>,
        bio: Option<String>,
        avatar: Option<Avatar>,
    ) -> Result<Self, ProfileError> {
        if first_name.is_none() && last_name.is_none() && bio.is_none() && avatar.is_none() {
            return Err(ProfileError::EmptyUpdate);
        }
        Ok(Self {
            first_name,
            last_name,
            bio,
            avatar,
        })
    }

    /// Apply the provided fields onto `profile`.
    pub fn apply(self, profile: &mut Profile) {
        if let Some(first_name) = self.first_name {
            profile.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            profile.last_name = last_name;
        }
        if let Some(bio) = self.bio {
            profile.bio = Some(bio);
        }
        if let Some(avatar) = self.avatar {
            profile.avatar = avatar;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_name_is_trimmed_and_bounded() {
        assert_eq!(
            PersonName::new("  Ada ".to_string()).unwrap().as_str(),
            "Ada"
        );
        assert_eq!(
            PersonName::new("   ".to_string()),
            Err(PersonNameError::Empty)
        );
        assert_eq!(
            PersonName::new("x".repeat(65)),
            Err(PersonNameError::TooLong {
                max: 64,
                actual: 65
            })
        );
    }

    #[test]
    fn test_empty_update_is_rejected() {
        let result = UpdateProfileCommand::new(None, None, None, None);
        assert!(matches!(result, Err(ProfileError::EmptyUpdate)));
    }
}
