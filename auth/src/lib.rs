//! Authentication utilities library
//!
//! Identity and session management for the chat API:
//! - Password hashing (scrypt, `salt:key` records)
//! - Session token minting and verification (RS256 JWT)
//! - Per-request authentication gate (bearer header or cookie pair)
//! - Authentication coordination
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::{HashingParameters, PasswordHasher};
//!
//! let hasher = PasswordHasher::new(HashingParameters { log_n: 10, ..Default::default() }).unwrap();
//! let record = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &record));
//! assert!(!hasher.verify("not_my_password", &record));
//! ```
//!
//! ## Session Tokens
//! ```no_run
//! use auth::TokenService;
//! use chrono::Duration;
//! use uuid::Uuid;
//!
//! let private_key = std::fs::read("certs/app.rsa.key").unwrap();
//! let public_key = std::fs::read("certs/app.rsa.pub").unwrap();
//! let tokens = TokenService::from_rsa_pem(
//!     &private_key,
//!     &public_key,
//!     Duration::hours(24),
//!     Duration::days(7),
//! )
//! .unwrap();
//!
//! let pair = tokens.generate_tokens("alice@example.com", Uuid::new_v4()).unwrap();
//! assert!(tokens.validate_token(&pair.access_token).unwrap());
//! let access = tokens.refresh_token(&pair.refresh_token).unwrap();
//! ```

pub mod authenticator;
pub mod gate;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use gate::BoundIdentity;
pub use gate::Credentials;
pub use gate::GateState;
pub use gate::Identity;
pub use gate::Rejection;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::TokenKind;
pub use jwt::TokenPair;
pub use jwt::TokenService;
pub use password::HashingParameters;
pub use password::PasswordError;
pub use password::PasswordHasher;
