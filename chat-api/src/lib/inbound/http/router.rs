use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::friends;
use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::me::get_me;
use super::handlers::profiles;
use super::handlers::refresh::refresh;
use super::handlers::register::register;
use super::handlers::statuses;
use super::middleware::authenticate;
use super::middleware::SessionState;
use crate::domain::friend::service::FriendService;
use crate::domain::profile::service::ProfileService;
use crate::domain::status::service::StatusService;
use crate::domain::user::service::UserService;
use crate::outbound::repositories::PostgresFriendRepository;
use crate::outbound::repositories::PostgresProfileRepository;
use crate::outbound::repositories::PostgresStatusRepository;
use crate::outbound::repositories::PostgresUserRepository;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService<PostgresUserRepository>>,
    pub profile_service: Arc<ProfileService<PostgresProfileRepository>>,
    pub status_service: Arc<StatusService<PostgresStatusRepository>>,
    pub friend_service: Arc<FriendService<PostgresFriendRepository, PostgresStatusRepository>>,
    pub session: SessionState,
}

pub fn create_router(state: AppState) -> Router {
    let account_routes = Router::new()
        .route("/api/auth/v1/register", post(register))
        .route("/api/auth/v1/login", post(login))
        .route("/api/auth/v1/refresh", post(refresh))
        .route("/api/auth/v1/logout", post(logout));

    let protected_routes = Router::new()
        .route("/api/v1/user/me", get(get_me))
        .route(
            "/api/v1/user/profile",
            get(profiles::get_own_profile)
                .post(profiles::create_profile)
                .put(profiles::update_profile)
                .delete(profiles::delete_profile),
        )
        .route(
            "/api/v1/user/profile/reactivate",
            patch(profiles::reactivate_profile),
        )
        .route("/api/v1/user/profile/:uid", get(profiles::get_profile))
        .route(
            "/api/v1/user/status",
            get(statuses::list_statuses).post(statuses::create_status),
        )
        .route("/api/v1/user/status/:uid", delete(statuses::delete_status))
        .route("/api/v1/user/friends/details", get(friends::list_friends))
        .route(
            "/api/v1/user/friends/details/:uid",
            get(friends::get_friend).delete(friends::remove_friend),
        )
        .route(
            "/api/v1/user/friends/requests",
            get(friends::list_requests).post(friends::send_request),
        )
        .route(
            "/api/v1/user/friends/requests/:uid",
            get(friends::get_request)
                .patch(friends::accept_request)
                .delete(friends::delete_request),
        )
        .route(
            "/api/v1/user/friends/status",
            get(friends::list_friends_statuses),
        )
        .route(
            "/api/v1/user/friends/status/:uid",
            get(friends::get_friend_statuses),
        )
        .route_layer(middleware::from_fn_with_state(
            state.session.clone(),
            authenticate,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(account_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
