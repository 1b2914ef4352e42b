use async_trait::async_trait;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::Session;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;

/// Port for account and session operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new account and open a session for it.
    ///
    /// # Arguments
    /// * `command` - Validated username, email and password
    ///
    /// # Returns
    /// Created account and its token pair
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<Session, UserError>;

    /// Verify credentials and open a session.
    ///
    /// # Arguments
    /// * `command` - Login identifier and password
    ///
    /// # Returns
    /// Account and a fresh token pair
    ///
    /// # Errors
    /// * `NotFound` - No account matches the identifier
    /// * `AccountDeleted` - Account has been closed
    /// * `InvalidCredentials` - Password does not match
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<Session, UserError>;

    /// Mint a new access token from a refresh token.
    ///
    /// The refresh token itself is never rotated.
    ///
    /// # Errors
    /// * `InvalidToken` - Refresh token is invalid, expired or lacks an account id
    async fn refresh(&self, refresh_token: &str) -> Result<String, UserError>;

    /// Retrieve an active account by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist or has been closed
    /// * `DatabaseError` - Database operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by identifier, closed accounts included.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by username, closed accounts included.
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;

    /// Retrieve user by email address, closed accounts included.
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;
}
