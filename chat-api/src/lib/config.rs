use std::env;

use auth::HashingParameters;
use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub password: PasswordConfig,
    pub cookies: CookieConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Token signing keys and lifetimes.
///
/// Key paths point at PEM files: a PKCS#1 or PKCS#8 RSA private key and
/// the matching public key.
#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub private_key_path: String,
    pub public_key_path: String,
    pub access_token_hours: i64,
    pub refresh_token_hours: i64,
}

impl JwtConfig {
    /// Access and refresh token lifetimes.
    ///
    /// # Errors
    /// `ConfigError::Message` when either lifetime is out of range
    pub fn lifetimes(&self) -> Result<(Duration, Duration), ConfigError> {
        Ok((
            hours("jwt.access_token_hours", self.access_token_hours)?,
            hours("jwt.refresh_token_hours", self.refresh_token_hours)?,
        ))
    }
}

fn hours(key: &str, value: i64) -> Result<Duration, ConfigError> {
    Duration::try_hours(value)
        .ok_or_else(|| ConfigError::Message(format!("{} out of range: {}", key, value)))
}

/// scrypt cost parameters; `log_n` is the base-2 logarithm of N.
#[derive(Debug, Deserialize, Clone)]
pub struct PasswordConfig {
    pub log_n: u8,
    pub r: u32,
    pub p: u32,
    pub key_length: usize,
    pub salt_length: usize,
}

impl PasswordConfig {
    pub fn hashing_parameters(&self) -> HashingParameters {
        HashingParameters {
            log_n: self.log_n,
            r: self.r,
            p: self.p,
            key_length: self.key_length,
            salt_length: self.salt_length,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct CookieConfig {
    pub access_name: String,
    pub refresh_name: String,
    pub max_age_hours: i64,
    pub secure: bool,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__PRIVATE_KEY_PATH, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // DATABASE__URL=postgres://... overrides database.url
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        configuration.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    #[test]
    fn test_default_configuration_deserializes() {
        let config: Config = ConfigBuilder::builder()
            .add_source(File::from_str(
                include_str!("../../config/default.toml"),
                FileFormat::Toml,
            ))
            .build()
            .expect("Failed to build configuration")
            .try_deserialize()
            .expect("Failed to deserialize configuration");

        assert_eq!(config.jwt.access_token_hours, 24);
        assert_eq!(config.jwt.refresh_token_hours, 168);
        assert_eq!(config.cookies.access_name, "__a");
        assert_eq!(config.cookies.refresh_name, "__r");

        let params = config.password.hashing_parameters();
        assert_eq!(params.log_n, 14);
        assert_eq!(params.r, 8);
        assert_eq!(params.p, 1);
        assert_eq!(params.key_length, 32);
        assert_eq!(params.salt_length, 16);

        let (access, refresh) = config.jwt.lifetimes().expect("Lifetimes out of range");
        assert_eq!(access, Duration::hours(24));
        assert_eq!(refresh, Duration::hours(168));
    }

    #[test]
    fn test_lifetimes_reject_overflowing_hours() {
        let jwt = JwtConfig {
            private_key_path: "keys/private.pem".to_string(),
            public_key_path: "keys/public.pem".to_string(),
            access_token_hours: 24,
            refresh_token_hours: i64::MAX,
        };

        let result = jwt.lifetimes();
        assert!(
            matches!(result, Err(ConfigError::Message(ref msg)) if msg.contains("refresh_token_hours"))
        );
    }
}
