use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

/// Exchange a refresh token for a new access token.
///
/// The access cookie is overwritten; the refresh token stays as it is.
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<RefreshRequest>,
) -> Result<(CookieJar, ApiSuccess<AccessTokenData>), ApiError> {
    let access_token = state
        .user_service
        .refresh(&body.refresh_token)
        .await
        .map_err(ApiError::from)?;

    let jar = jar.add(state.session.cookies.access_cookie(&access_token));

    Ok((
        jar,
        ApiSuccess::new(StatusCode::OK, AccessTokenData { access_token }),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RefreshRequest {
    refresh_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessTokenData {
    pub access_token: String,
}
