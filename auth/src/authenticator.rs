use uuid::Uuid;

use crate::gate;
use crate::gate::BoundIdentity;
use crate::gate::Credentials;
use crate::gate::Rejection;
use crate::jwt::JwtError;
use crate::jwt::TokenPair;
use crate::jwt::TokenService;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification, token
/// minting and per-request session resolution.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_service: TokenService,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `password_hasher` - Configured credential hasher
    /// * `token_service` - Token authority holding the signing key pair
    pub fn new(password_hasher: PasswordHasher, token_service: TokenService) -> Self {
        Self {
            password_hasher,
            token_service,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Salt generation or key derivation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and mint a token pair.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored credential record
    /// * `subject` - Account email written into the tokens
    /// * `user_id` - Account identifier written into the tokens
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match the record
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
        user_id: Uuid,
    ) -> Result<TokenPair, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.token_service.generate_tokens(subject, user_id)?)
    }

    /// Mint a token pair without password verification.
    ///
    /// Used right after registration, when the password was just hashed.
    pub fn generate_tokens(&self, subject: &str, user_id: Uuid) -> Result<TokenPair, JwtError> {
        self.token_service.generate_tokens(subject, user_id)
    }

    /// Mint a new access token from a refresh token.
    pub fn refresh_access_token(&self, refresh_token: &str) -> Result<String, JwtError> {
        self.token_service.refresh_token(refresh_token)
    }

    /// Resolve the credentials of an inbound request to an identity.
    pub fn authenticate_request(
        &self,
        credentials: &Credentials<'_>,
    ) -> Result<BoundIdentity, Rejection> {
        gate::authenticate(credentials, &self.token_service)
    }

    /// Underlying token authority.
    pub fn token_service(&self) -> &TokenService {
        &self.token_service
    }
}
