use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::errors::JwtError;

/// Issuer written into every minted token.
pub const ISSUER: &str = "erosecurity";

/// Which of the two session tokens is being minted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Access and refresh token returned on login, registration and refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Session token claims.
///
/// Typed view of the signed payload. Conversion to and from the wire claim
/// set happens only inside the token service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Issuing system
    pub issuer: String,
    /// Account email, used as the identity key
    pub subject: String,
    /// Account identifier, absent on tokens minted without one
    pub user_id: Option<Uuid>,
    /// Issued at (Unix timestamp)
    pub issued_at: i64,
    /// Expiration time (Unix timestamp)
    pub expires_at: i64,
    /// Unique token identifier
    pub token_id: Option<Uuid>,
}

impl Claims {
    /// Create claims for an identity expiring `lifetime` after `now`.
    ///
    /// Every call draws a fresh token id.
    pub fn for_identity(
        subject: impl ToString,
        user_id: Uuid,
        now: DateTime<Utc>,
        lifetime: Duration,
    ) -> Self {
        Self {
            issuer: ISSUER.to_string(),
            subject: subject.to_string(),
            user_id: Some(user_id),
            issued_at: now.timestamp(),
            expires_at: (now + lifetime).timestamp(),
            token_id: Some(Uuid::new_v4()),
        }
    }
}

/// Claim set as it appears inside the token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct WireClaims {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

impl From<&Claims> for WireClaims {
    fn from(claims: &Claims) -> Self {
        Self {
            iss: Some(claims.issuer.clone()),
            sub: Some(claims.subject.clone()),
            uid: claims.user_id.map(|id| id.to_string()),
            iat: Some(claims.issued_at),
            exp: Some(claims.expires_at),
            jti: claims.token_id.map(|id| id.to_string()),
        }
    }
}

impl TryFrom<WireClaims> for Claims {
    type Error = JwtError;

    fn try_from(wire: WireClaims) -> Result<Self, Self::Error> {
        let subject = wire
            .sub
            .filter(|sub| !sub.is_empty())
            .ok_or_else(|| JwtError::MissingClaim("sub".to_string()))?;
        let expires_at = wire
            .exp
            .ok_or_else(|| JwtError::MissingClaim("exp".to_string()))?;
        let user_id = wire
            .uid
            .map(|uid| Uuid::parse_str(&uid))
            .transpose()
            .map_err(|e| JwtError::InvalidToken(format!("malformed uid claim: {}", e)))?;
        let token_id = wire
            .jti
            .map(|jti| Uuid::parse_str(&jti))
            .transpose()
            .map_err(|e| JwtError::InvalidToken(format!("malformed jti claim: {}", e)))?;

        Ok(Self {
            issuer: wire.iss.unwrap_or_default(),
            subject,
            user_id,
            issued_at: wire.iat.unwrap_or_default(),
            expires_at,
            token_id,
        })
    }
}
