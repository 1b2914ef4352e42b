use std::sync::Arc;

use auth::Authenticator;
use auth::BoundIdentity;
use auth::Credentials;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum_extra::extract::CookieJar;

use crate::domain::user::models::UserId;
use crate::inbound::http::cookies::CookieSettings;
use crate::inbound::http::handlers::ApiError;

/// State shared by the authentication middleware and the session handlers.
#[derive(Clone)]
pub struct SessionState {
    pub authenticator: Arc<Authenticator>,
    pub cookies: Arc<CookieSettings>,
}

/// Identity of the caller, stored in request extensions by [`authenticate`].
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub email: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(unauthorized)
    }
}

/// Middleware that resolves the caller from a bearer header or the session
/// cookie pair.
///
/// A present `Authorization` header decides alone; cookies are consulted only
/// without it. When the access cookie had to be replaced through the refresh
/// cookie, the new access token is written back as a cookie on the response.
/// Every rejection produces the same 401 body.
pub async fn authenticate(
    State(session): State<SessionState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let outcome = {
        let (access_cookie, refresh_cookie) = session.cookies.session_values(&jar);
        let credentials = Credentials {
            authorization: req
                .headers()
                .get(AUTHORIZATION)
                .map(|value| value.as_bytes()),
            access_cookie,
            refresh_cookie,
        };
        session.authenticator.authenticate_request(&credentials)
    };

    let bound = outcome.map_err(|rejection| {
        tracing::warn!(reason = rejection.as_str(), "Request rejected by authentication");
        unauthorized().into_response()
    })?;

    let user = authenticated_user(&bound).ok_or_else(|| {
        tracing::warn!(
            subject = %bound.identity.subject,
            "Token carries no account id"
        );
        unauthorized().into_response()
    })?;

    tracing::debug!(
        user_id = %user.user_id,
        refreshed = bound.refreshed_access_token.is_some(),
        "Request authenticated"
    );
    req.extensions_mut().insert(user);

    let response = next.run(req).await;

    match bound.refreshed_access_token {
        Some(access_token) => {
            let jar = jar.add(session.cookies.access_cookie(&access_token));
            Ok((jar, response).into_response())
        }
        None => Ok(response),
    }
}

fn authenticated_user(bound: &BoundIdentity) -> Option<AuthenticatedUser> {
    bound.identity.user_id.map(|id| AuthenticatedUser {
        user_id: UserId(id),
        email: bound.identity.subject.clone(),
    })
}

fn unauthorized() -> ApiError {
    ApiError::Unauthorized("Unauthorized".to_string())
}
