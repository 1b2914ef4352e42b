use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use super::register::TokenPairData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::LoginIdentifier;
use crate::domain::user::models::Password;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// Open a session with a username or email and a password.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<(CookieJar, ApiSuccess<TokenPairData>), ApiError> {
    let session = state
        .user_service
        .login(body.try_into_command()?)
        .await
        .map_err(ApiError::from)?;

    let jar = state.session.cookies.with_session(
        jar,
        &session.tokens.access_token,
        &session.tokens.refresh_token,
    );

    Ok((
        jar,
        ApiSuccess::new(StatusCode::OK, TokenPairData::from(session.tokens)),
    ))
}

/// HTTP request body for login; exactly one of `username` and `email`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    email: Option<String>,
    password: String,
}

impl LoginRequest {
    fn try_into_command(self) -> Result<LoginCommand, UserError> {
        let identifier = LoginIdentifier::from_parts(self.username, self.email)?;
        let password = Password::new(self.password)?;
        Ok(LoginCommand {
            identifier,
            password,
        })
    }
}
