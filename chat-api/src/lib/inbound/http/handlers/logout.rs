use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::CookieJar;

use super::ApiError;
use super::ApiSuccess;
use super::MessageData;
use crate::inbound::http::router::AppState;

/// Close the cookie session by expiring both session cookies.
///
/// Tokens stay valid until they expire; nothing is revoked server-side.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, ApiSuccess<MessageData>), ApiError> {
    let cookies = &state.session.cookies;

    match cookies.session_values(&jar) {
        (Some(_), Some(_)) => {}
        _ => return Err(ApiError::BadRequest("You are not logged in".to_string())),
    }

    Ok((
        cookies.without_session(jar),
        ApiSuccess::new(StatusCode::OK, MessageData::new("Logged out")),
    ))
}
