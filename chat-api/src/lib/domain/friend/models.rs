use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::friend::errors::FriendshipIdError;
use crate::domain::status::models::Status;
use crate::domain::user::models::UserId;

/// Relation between two accounts. Pending until the addressee accepts it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Friendship {
    pub id: FriendshipId,
    pub requester_id: UserId,
    pub addressee_id: UserId,
    pub created_at: DateTime<Utc>,
    pub accepted_at: Option<DateTime<Utc>>,
}

impl Friendship {
    pub fn request(requester_id: UserId, addressee_id: UserId, now: DateTime<Utc>) -> Self {
        Self {
            id: FriendshipId::new(),
            requester_id,
            addressee_id,
            created_at: now,
            accepted_at: None,
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.accepted_at.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FriendshipId(pub Uuid);

impl FriendshipId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, FriendshipIdError> {
        Uuid::parse_str(s)
            .map(FriendshipId)
            .map_err(|e| FriendshipIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for FriendshipId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FriendshipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The other side of a friendship, seen from one of its members.
///
/// Profile fields are absent when the other account has no active profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Friend {
    pub relation_id: FriendshipId,
    pub requester_id: UserId,
    pub user_id: UserId,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub accepted_at: Option<DateTime<Utc>>,
}

impl Friend {
    /// Whether the viewing member sent the request.
    pub fn is_outgoing(&self) -> bool {
        self.requester_id != self.user_id
    }
}

/// A visible status posted by a friend.
#[derive(Debug, Clone)]
pub struct FriendStatus {
    pub friend: Friend,
    pub status: Status,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn friend(requester_id: UserId, user_id: UserId) -> Friend {
        Friend {
            relation_id: FriendshipId::new(),
            requester_id,
            user_id,
            username: "bob".to_string(),
            first_name: None,
            last_name: None,
            bio: None,
            avatar: None,
            created_at: Utc::now(),
            accepted_at: None,
        }
    }

    #[test]
    fn test_request_direction() {
        let me = UserId::new();
        let other = UserId::new();

        assert!(friend(me, other).is_outgoing());
        assert!(!friend(other, other).is_outgoing());
    }

    #[test]
    fn test_new_request_is_pending() {
        let request = Friendship::request(UserId::new(), UserId::new(), Utc::now());
        assert!(!request.is_accepted());
    }

    #[test]
    fn test_friendship_id_from_string() {
        let id = FriendshipId::new();
        assert_eq!(FriendshipId::from_string(&id.to_string()), Ok(id));
        assert!(FriendshipId::from_string("not-a-uuid").is_err());
    }
}
