use auth::Authenticator;
use auth::HashingParameters;
use auth::PasswordHasher;
use auth::TokenService;
use chrono::Duration;

/// Authenticator over the fixture key pair with a cheap scrypt cost.
pub fn authenticator() -> Authenticator {
    let hasher = PasswordHasher::new(HashingParameters {
        log_n: 10,
        ..HashingParameters::default()
    })
    .expect("Failed to build password hasher");

    let tokens = TokenService::from_rsa_pem(
        include_bytes!("../../../auth/fixtures/private.pem"),
        include_bytes!("../../../auth/fixtures/public.pem"),
        Duration::hours(24),
        Duration::days(7),
    )
    .expect("Failed to build token service");

    Authenticator::new(hasher, tokens)
}
