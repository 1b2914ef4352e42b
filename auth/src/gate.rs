//! Per-request authentication decision procedure.
//!
//! A request presents credentials over one of two channels: an
//! `Authorization: Bearer <token>` header, or an access/refresh cookie pair.
//! The header is authoritative whenever it is present, even when malformed.
//! Cookies are only consulted when no header was sent at all.
//!
//! The procedure is a small state machine. [`GateState::from_credentials`]
//! performs extraction, [`GateState::advance`] performs one transition, and
//! [`authenticate`] drives the machine to a terminal state.

use uuid::Uuid;

use crate::jwt::JwtError;
use crate::jwt::TokenService;

/// Raw credentials as they arrived on the request.
#[derive(Debug, Clone, Copy, Default)]
pub struct Credentials<'a> {
    /// Raw `Authorization` header bytes
    pub authorization: Option<&'a [u8]>,
    /// Value of the access-token cookie
    pub access_cookie: Option<&'a str>,
    /// Value of the refresh-token cookie
    pub refresh_cookie: Option<&'a str>,
}

/// Identity resolved from a validated token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Account email
    pub subject: String,
    /// Account identifier, when the token carries one
    pub user_id: Option<Uuid>,
}

/// Successful gate outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundIdentity {
    pub identity: Identity,
    /// New access token minted during cookie refresh; the caller must write
    /// it back into the access cookie.
    pub refreshed_access_token: Option<String>,
}

/// Why a request was rejected.
///
/// Only used for logging. Every variant maps to the same unauthenticated
/// response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    MalformedHeader,
    MissingCredentials,
    InvalidBearerToken,
    InvalidRefreshToken,
    RefreshFailed,
    ClaimsUnavailable,
}

impl Rejection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rejection::MalformedHeader => "malformed_authorization_header",
            Rejection::MissingCredentials => "missing_credentials",
            Rejection::InvalidBearerToken => "invalid_bearer_token",
            Rejection::InvalidRefreshToken => "invalid_refresh_token",
            Rejection::RefreshFailed => "refresh_failed",
            Rejection::ClaimsUnavailable => "claims_unavailable",
        }
    }
}

/// State of the authentication procedure for a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateState {
    NoCredential,
    HeaderCandidate(String),
    CookieAccessCandidate { access: String, refresh: String },
    CookieRefreshCandidate(String),
    Bound(BoundIdentity),
    Rejected(Rejection),
}

impl GateState {
    /// Extract the candidate credential from a request.
    pub fn from_credentials(credentials: &Credentials<'_>) -> Self {
        match credentials.authorization {
            Some(header) if !header.is_empty() => Self::from_header(header),
            _ => Self::from_cookies(credentials.access_cookie, credentials.refresh_cookie),
        }
    }

    fn from_header(header: &[u8]) -> Self {
        let Ok(header) = std::str::from_utf8(header) else {
            return Self::Rejected(Rejection::MalformedHeader);
        };

        let parts: Vec<&str> = header.split(' ').collect();
        match parts.as_slice() {
            ["Bearer", token] if !token.is_empty() => Self::HeaderCandidate(token.to_string()),
            _ => Self::Rejected(Rejection::MalformedHeader),
        }
    }

    fn from_cookies(access: Option<&str>, refresh: Option<&str>) -> Self {
        let access = access.unwrap_or_default();
        let refresh = refresh.unwrap_or_default();

        if access.is_empty() && refresh.is_empty() {
            return Self::NoCredential;
        }

        Self::CookieAccessCandidate {
            access: access.to_string(),
            refresh: refresh.to_string(),
        }
    }

    /// Whether no further transition is possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Bound(_) | Self::Rejected(_))
    }

    /// Perform one transition.
    ///
    /// Terminal states are returned unchanged.
    pub fn advance(self, tokens: &TokenService) -> Self {
        match self {
            Self::NoCredential => Self::Rejected(Rejection::MissingCredentials),

            Self::HeaderCandidate(token) => {
                if is_valid(tokens, &token) {
                    bind(tokens, &token, None)
                } else {
                    Self::Rejected(Rejection::InvalidBearerToken)
                }
            }

            Self::CookieAccessCandidate { access, refresh } => {
                if is_valid(tokens, &access) {
                    bind(tokens, &access, None)
                } else {
                    Self::CookieRefreshCandidate(refresh)
                }
            }

            Self::CookieRefreshCandidate(refresh) => {
                if !is_valid(tokens, &refresh) {
                    return Self::Rejected(Rejection::InvalidRefreshToken);
                }

                match tokens.refresh_token(&refresh) {
                    Ok(access) => bind(tokens, &access, Some(access.clone())),
                    Err(e) => {
                        tracing::debug!(error = %e, "Cookie refresh failed");
                        Self::Rejected(Rejection::RefreshFailed)
                    }
                }
            }

            terminal @ (Self::Bound(_) | Self::Rejected(_)) => terminal,
        }
    }
}

/// Run the procedure to completion.
pub fn authenticate(
    credentials: &Credentials<'_>,
    tokens: &TokenService,
) -> Result<BoundIdentity, Rejection> {
    let mut state = GateState::from_credentials(credentials);
    loop {
        state = match state {
            GateState::Bound(bound) => return Ok(bound),
            GateState::Rejected(rejection) => return Err(rejection),
            pending => pending.advance(tokens),
        };
    }
}

fn is_valid(tokens: &TokenService, token: &str) -> bool {
    if token.is_empty() {
        return false;
    }
    match tokens.validate_token(token) {
        Ok(valid) => valid,
        Err(e) => {
            log_validation_error(&e);
            false
        }
    }
}

fn bind(tokens: &TokenService, token: &str, refreshed_access_token: Option<String>) -> GateState {
    match tokens.get_claims(token) {
        Ok(claims) => GateState::Bound(BoundIdentity {
            identity: Identity {
                subject: claims.subject,
                user_id: claims.user_id,
            },
            refreshed_access_token,
        }),
        Err(e) => {
            log_validation_error(&e);
            GateState::Rejected(Rejection::ClaimsUnavailable)
        }
    }
}

fn log_validation_error(e: &JwtError) {
    tracing::debug!(error = %e, "Token validation failed");
}
