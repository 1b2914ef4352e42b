use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::SameSite;
use axum_extra::extract::CookieJar;
use config::ConfigError;
use time::Duration;

use crate::config::CookieConfig;

const SECONDS_PER_HOUR: i64 = 60 * 60;

/// Names and attributes of the session cookie pair.
#[derive(Debug, Clone)]
pub struct CookieSettings {
    pub access_name: String,
    pub refresh_name: String,
    pub max_age: Duration,
    pub secure: bool,
}

impl CookieSettings {
    /// # Errors
    /// `ConfigError::Message` when `max_age_hours` does not fit a duration
    pub fn from_config(config: &CookieConfig) -> Result<Self, ConfigError> {
        let max_age = config
            .max_age_hours
            .checked_mul(SECONDS_PER_HOUR)
            .map(Duration::seconds)
            .ok_or_else(|| {
                ConfigError::Message(format!(
                    "cookies.max_age_hours out of range: {}",
                    config.max_age_hours
                ))
            })?;

        Ok(Self {
            access_name: config.access_name.clone(),
            refresh_name: config.refresh_name.clone(),
            max_age,
            secure: config.secure,
        })
    }

    pub fn access_cookie(&self, token: &str) -> Cookie<'static> {
        self.session_cookie(&self.access_name, token)
    }

    pub fn refresh_cookie(&self, token: &str) -> Cookie<'static> {
        self.session_cookie(&self.refresh_name, token)
    }

    /// Add both session cookies to `jar`.
    pub fn with_session(&self, jar: CookieJar, access_token: &str, refresh_token: &str) -> CookieJar {
        jar.add(self.access_cookie(access_token))
            .add(self.refresh_cookie(refresh_token))
    }

    /// Overwrite both session cookies with expired blanks.
    pub fn without_session(&self, jar: CookieJar) -> CookieJar {
        jar.add(clear_cookie(&self.access_name))
            .add(clear_cookie(&self.refresh_name))
    }

    /// Values of the access and refresh cookies, when present.
    pub fn session_values<'a>(&self, jar: &'a CookieJar) -> (Option<&'a str>, Option<&'a str>) {
        (
            jar.get(&self.access_name).map(|c| c.value()),
            jar.get(&self.refresh_name).map(|c| c.value()),
        )
    }

    fn session_cookie(&self, name: &str, value: &str) -> Cookie<'static> {
        Cookie::build((name.to_string(), value.to_string()))
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .path("/")
            .max_age(self.max_age)
            .build()
    }
}

fn clear_cookie(name: &str) -> Cookie<'static> {
    Cookie::build((name.to_string(), ""))
        .http_only(true)
        .path("/")
        .max_age(Duration::ZERO)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> CookieSettings {
        CookieSettings {
            access_name: "__a".to_string(),
            refresh_name: "__r".to_string(),
            max_age: Duration::hours(24),
            secure: false,
        }
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = settings().access_cookie("token");

        assert_eq!(cookie.name(), "__a");
        assert_eq!(cookie.value(), "token");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(Duration::hours(24)));
        assert_eq!(cookie.http_only(), Some(true));
    }

    #[test]
    fn test_without_session_expires_both_cookies() {
        let settings = settings();
        let jar = settings.with_session(CookieJar::new(), "access", "refresh");
        let jar = settings.without_session(jar);

        let access = jar.get("__a").unwrap();
        let refresh = jar.get("__r").unwrap();
        assert_eq!(access.value(), "");
        assert_eq!(access.max_age(), Some(Duration::ZERO));
        assert_eq!(refresh.max_age(), Some(Duration::ZERO));
    }

    fn cookie_config(max_age_hours: i64) -> CookieConfig {
        CookieConfig {
            access_name: "__a".to_string(),
            refresh_name: "__r".to_string(),
            max_age_hours,
            secure: true,
        }
    }

    #[test]
    fn test_from_config() {
        let settings = CookieSettings::from_config(&cookie_config(24)).unwrap();

        assert_eq!(settings.max_age, Duration::hours(24));
        assert!(settings.secure);
    }

    #[test]
    fn test_from_config_rejects_overflowing_max_age() {
        assert!(matches!(
            CookieSettings::from_config(&cookie_config(i64::MAX)),
            Err(ConfigError::Message(_))
        ));
    }

    #[test]
    fn test_session_values() {
        let settings = settings();
        let jar = CookieJar::new().add(Cookie::new("__r", "refresh"));

        assert_eq!(settings.session_values(&jar), (None, Some("refresh")));
    }
}
