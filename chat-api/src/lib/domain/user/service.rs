use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::JwtError;
use chrono::Utc;

use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::LoginIdentifier;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::Session;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for account operations.
///
/// scrypt work runs on the blocking pool so request workers stay free.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token authority
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    async fn hash_password(&self, password: String) -> Result<String, UserError> {
        let authenticator = Arc::clone(&self.authenticator);
        tokio::task::spawn_blocking(move || authenticator.hash_password(&password))
            .await
            .map_err(|e| UserError::Unknown(format!("Password hashing task failed: {}", e)))?
            .map_err(|e| UserError::Unknown(format!("Password hashing failed: {}", e)))
    }

    async fn verify_and_issue(&self, user: &User, password: String) -> Result<Session, UserError> {
        let authenticator = Arc::clone(&self.authenticator);
        let stored_hash = user.password_hash.clone();
        let subject = user.email.as_str().to_string();
        let user_id = user.id.0;

        let tokens = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(&password, &stored_hash, &subject, user_id)
        })
        .await
        .map_err(|e| UserError::Unknown(format!("Credential check task failed: {}", e)))?
        .map_err(|e| match e {
            AuthenticationError::InvalidCredentials => UserError::InvalidCredentials,
            other => UserError::Unknown(other.to_string()),
        })?;

        Ok(Session {
            user: user.clone(),
            tokens,
        })
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<Session, UserError> {
        let password_hash = self
            .hash_password(command.password.as_str().to_string())
            .await?;

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            username: command.username,
            email: command.email,
            password_hash,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        let created_user = self.repository.create(user).await?;

        let tokens = self
            .authenticator
            .generate_tokens(created_user.email.as_str(), created_user.id.0)
            .map_err(|e| UserError::Unknown(format!("Token generation failed: {}", e)))?;

        tracing::info!(user_id = %created_user.id, "Account registered");

        Ok(Session {
            user: created_user,
            tokens,
        })
    }

    async fn login(&self, command: LoginCommand) -> Result<Session, UserError> {
        let user = match &command.identifier {
            LoginIdentifier::Username(username) => {
                self.repository.find_by_username(username).await?
            }
            LoginIdentifier::Email(email) => self.repository.find_by_email(email).await?,
        }
        .ok_or_else(|| UserError::NotFound(command.identifier.to_string()))?;

        if user.is_deleted() {
            return Err(UserError::AccountDeleted(user.id.to_string()));
        }

        let session = self
            .verify_and_issue(&user, command.password.as_str().to_string())
            .await?;

        tracing::info!(user_id = %session.user.id, "Session opened");

        Ok(session)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<String, UserError> {
        self.authenticator
            .refresh_access_token(refresh_token)
            .map_err(refresh_error)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .filter(|user| !user.is_deleted())
            .ok_or(UserError::NotFound(id.to_string()))
    }
}

/// Signing and key failures are the server's fault; everything else means the
/// presented refresh token is unusable.
fn refresh_error(e: JwtError) -> UserError {
    match e {
        JwtError::EncodingFailed(_)
        | JwtError::InvalidKey(_)
        | JwtError::InvalidConfiguration(_) => {
            tracing::error!(error = %e, "Access token could not be minted");
            UserError::Unknown(format!("Token generation failed: {}", e))
        }
        _ => {
            tracing::warn!(error = %e, "Refresh token rejected");
            UserError::InvalidToken(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::Password;
    use crate::domain::user::models::Username;
    use crate::testing;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;
            async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;
        }
    }

    fn stored_user(authenticator: &Authenticator, password: &str) -> User {
        let now = Utc::now();
        User {
            id: UserId::new(),
            username: Username::new("testuser".to_string()).unwrap(),
            email: EmailAddress::new("test@example.com".to_string()).unwrap(),
            password_hash: authenticator.hash_password(password).unwrap(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    fn login_command(password: &str) -> LoginCommand {
        LoginCommand {
            identifier: LoginIdentifier::Username(Username::new("testuser".to_string()).unwrap()),
            password: Password::new(password.to_string()).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_create()
            .withf(|user| {
                user.username.as_str() == "testuser"
                    && user.email.as_str() == "test@example.com"
                    && user.password_hash.contains(':')
                    && user.password_hash != "password123"
                    && user.deleted_at.is_none()
            })
            .times(1)
            .returning(|user| Ok(user));

        let authenticator = Arc::new(testing::authenticator());
        let service = UserService::new(Arc::new(repository), Arc::clone(&authenticator));

        let command = RegisterUserCommand::new(
            Username::new("testuser".to_string()).unwrap(),
            EmailAddress::new("test@example.com".to_string()).unwrap(),
            Password::new("password123".to_string()).unwrap(),
        );

        let session = service.register(command).await.unwrap();
        assert_eq!(session.user.username.as_str(), "testuser");

        let claims = authenticator
            .token_service()
            .get_claims(&session.tokens.access_token)
            .unwrap();
        assert_eq!(claims.subject, "test@example.com");
        assert_eq!(claims.user_id, Some(session.user.id.0));
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let mut repository = MockTestUserRepository::new();

        repository.expect_create().times(1).returning(|user| {
            Err(UserError::UsernameAlreadyExists(
                user.username.as_str().to_string(),
            ))
        });

        let service = UserService::new(Arc::new(repository), Arc::new(testing::authenticator()));

        let command = RegisterUserCommand::new(
            Username::new("testuser".to_string()).unwrap(),
            EmailAddress::new("test2@example.com".to_string()).unwrap(),
            Password::new("password456".to_string()).unwrap(),
        );

        let result = service.register(command).await;
        assert!(matches!(result, Err(UserError::UsernameAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_login_success() {
        let authenticator = Arc::new(testing::authenticator());
        let user = stored_user(&authenticator, "password123");
        let user_id = user.id;

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_username()
            .withf(|username| username.as_str() == "testuser")
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = UserService::new(Arc::new(repository), Arc::clone(&authenticator));

        let session = service.login(login_command("password123")).await.unwrap();
        assert_eq!(session.user.id, user_id);
        assert!(matches!(
            authenticator
                .token_service()
                .validate_token(&session.tokens.refresh_token),
            Ok(true)
        ));
    }

    #[tokio::test]
    async fn test_login_by_email_uses_email_lookup() {
        let authenticator = Arc::new(testing::authenticator());
        let user = stored_user(&authenticator, "password123");

        let mut repository = MockTestUserRepository::new();
        repository.expect_find_by_username().times(0);
        repository
            .expect_find_by_email()
            .withf(|email| email.as_str() == "test@example.com")
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = UserService::new(Arc::new(repository), authenticator);

        let command = LoginCommand {
            identifier: LoginIdentifier::Email(
                EmailAddress::new("test@example.com".to_string()).unwrap(),
            ),
            password: Password::new("password123".to_string()).unwrap(),
        };
        assert!(service.login(command).await.is_ok());
    }

    #[tokio::test]
    async fn test_login_unknown_account() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository), Arc::new(testing::authenticator()));

        let result = service.login(login_command("password123")).await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_login_deleted_account() {
        let authenticator = Arc::new(testing::authenticator());
        let mut user = stored_user(&authenticator, "password123");
        user.deleted_at = Some(Utc::now());

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = UserService::new(Arc::new(repository), authenticator);

        let result = service.login(login_command("password123")).await;
        assert!(matches!(result, Err(UserError::AccountDeleted(_))));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let authenticator = Arc::new(testing::authenticator());
        let user = stored_user(&authenticator, "password123");

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = UserService::new(Arc::new(repository), authenticator);

        let result = service.login(login_command("wrong-password")).await;
        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_refresh() {
        let authenticator = Arc::new(testing::authenticator());
        let pair = authenticator
            .generate_tokens("test@example.com", UserId::new().0)
            .unwrap();

        let service = UserService::new(
            Arc::new(MockTestUserRepository::new()),
            Arc::clone(&authenticator),
        );

        let access = service.refresh(&pair.refresh_token).await.unwrap();
        assert!(matches!(
            authenticator.token_service().validate_token(&access),
            Ok(true)
        ));

        let result = service.refresh("not-a-token").await;
        assert!(matches!(result, Err(UserError::InvalidToken(_))));
    }

    #[test]
    fn test_refresh_signing_failures_are_internal() {
        assert!(matches!(
            refresh_error(JwtError::EncodingFailed("bad key".to_string())),
            UserError::Unknown(_)
        ));
        assert!(matches!(
            refresh_error(JwtError::InvalidKey("not pem".to_string())),
            UserError::Unknown(_)
        ));
        assert!(matches!(
            refresh_error(JwtError::TokenExpired),
            UserError::InvalidToken(_)
        ));
        assert!(matches!(
            refresh_error(JwtError::DecodingFailed("garbage".to_string())),
            UserError::InvalidToken(_)
        ));
        assert!(matches!(
            refresh_error(JwtError::MissingClaim("uid".to_string())),
            UserError::InvalidToken(_)
        ));
    }

    #[tokio::test]
    async fn test_get_user_hides_deleted_accounts() {
        let authenticator = Arc::new(testing::authenticator());
        let mut user = stored_user(&authenticator, "password123");
        user.deleted_at = Some(Utc::now());
        let user_id = user.id;

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_id()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = UserService::new(Arc::new(repository), authenticator);

        let result = service.get_user(&user_id).await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }
}
