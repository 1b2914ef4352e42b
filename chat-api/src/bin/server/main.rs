use std::sync::Arc;

use auth::Authenticator;
use auth::PasswordHasher;
use auth::TokenService;
use chat_api::config::Config;
use chat_api::domain::friend::service::FriendService;
use chat_api::domain::profile::service::ProfileService;
use chat_api::domain::status::service::StatusService;
use chat_api::domain::user::service::UserService;
use chat_api::inbound::http::cookies::CookieSettings;
use chat_api::inbound::http::middleware::SessionState;
use chat_api::inbound::http::router::create_router;
use chat_api::inbound::http::router::AppState;
use chat_api::outbound::repositories::PostgresFriendRepository;
use chat_api::outbound::repositories::PostgresProfileRepository;
use chat_api::outbound::repositories::PostgresStatusRepository;
use chat_api::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chat_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "chat-api",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        private_key_path = %config.jwt.private_key_path,
        public_key_path = %config.jwt.public_key_path,
        access_token_hours = config.jwt.access_token_hours,
        refresh_token_hours = config.jwt.refresh_token_hours,
        "Configuration loaded"
    );

    let (access_lifetime, refresh_lifetime) = config.jwt.lifetimes()?;
    let cookies = CookieSettings::from_config(&config.cookies)?;

    let private_key = tokio::fs::read(&config.jwt.private_key_path).await?;
    let public_key = tokio::fs::read(&config.jwt.public_key_path).await?;
    let token_service = TokenService::from_rsa_pem(
        &private_key,
        &public_key,
        access_lifetime,
        refresh_lifetime,
    )
    .inspect_err(|e| tracing::error!(error = %e, "Failed to load signing keys"))?;
    let password_hasher = PasswordHasher::new(config.password.hashing_parameters())?;
    let authenticator = Arc::new(Authenticator::new(password_hasher, token_service));

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let profile_repository = Arc::new(PostgresProfileRepository::new(pg_pool.clone()));
    let status_repository = Arc::new(PostgresStatusRepository::new(pg_pool.clone()));
    let friend_repository = Arc::new(PostgresFriendRepository::new(pg_pool));

    let state = AppState {
        user_service: Arc::new(UserService::new(
            user_repository,
            Arc::clone(&authenticator),
        )),
        profile_service: Arc::new(ProfileService::new(profile_repository)),
        status_service: Arc::new(StatusService::new(Arc::clone(&status_repository))),
        friend_service: Arc::new(FriendService::new(friend_repository, status_repository)),
        session: SessionState {
            authenticator,
            cookies: Arc::new(cookies),
        },
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(state)).await?;

    Ok(())
}
