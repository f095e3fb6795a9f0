use std::sync::LazyLock;

use axum::http::HeaderValue;
use config::{Config, Environment, File};
use secrecy::Secret;
use serde::Deserialize;

use crate::config::constants::{env, prod};

static SETTINGS: LazyLock<EnrollSetting> = LazyLock::new(|| {
    dotenvy::dotenv().ok();

    let mut builder = Config::builder()
        .add_source(File::with_name("config/enroll").required(false))
        .add_source(Environment::with_prefix("ENROLL").separator("__"));

    // The conventional flat variables win over file and prefixed sources.
    if let Ok(url) = std::env::var(env::DATABASE_URL_ENV_VAR) {
        builder = builder
            .set_override("postgres.url", url)
            .expect("valid postgres.url override");
    }
    if let Ok(secret) = std::env::var(env::JWT_SECRET_ENV_VAR) {
        builder = builder
            .set_override("session.jwt_secret", secret)
            .expect("valid session.jwt_secret override");
    }
    if let Ok(origins) = std::env::var(env::ALLOWED_ORIGINS_ENV_VAR) {
        let origins: Vec<String> = origins.split(',').map(str::to_string).collect();
        builder = builder
            .set_override("app.allowed_origins", origins)
            .expect("valid app.allowed_origins override");
    }

    builder
        .build()
        .and_then(|config| config.try_deserialize())
        .expect("Failed to load enroll service configuration")
});

/// Service configuration.
///
/// Values come from `config/enroll.json` (optional) overlaid with
/// `ENROLL__`-prefixed environment variables and the conventional
/// `DATABASE_URL` / `JWT_SECRET` variables. Every field has a workable
/// default except the Postgres URL and the JWT secret, which the server
/// binary insists on at startup.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EnrollSetting {
    pub app: AppSetting,
    pub postgres: PostgresSetting,
    pub session: SessionSetting,
}

impl EnrollSetting {
    /// Load the cached service configuration.
    ///
    /// # Panics
    /// Panics if the configuration sources cannot be read or deserialized.
    pub fn load() -> &'static Self {
        &SETTINGS
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppSetting {
    pub address: String,
    pub assets_dir: String,
    pub allowed_origins: Option<AllowedOrigins>,
}

impl Default for AppSetting {
    fn default() -> Self {
        Self {
            address: prod::APP_ADDRESS.to_string(),
            assets_dir: prod::ASSETS_DIR.to_string(),
            allowed_origins: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PostgresSetting {
    pub url: Option<Secret<String>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionSetting {
    pub jwt_secret: Option<Secret<String>>,
    pub token_ttl_in_seconds: i64,
    pub cookie_name: String,
}

impl Default for SessionSetting {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            token_ttl_in_seconds: prod::SESSION_TOKEN_TTL_SECONDS,
            cookie_name: prod::SESSION_COOKIE_NAME.to_string(),
        }
    }
}

/// CORS origin allowlist.
#[derive(Debug, Clone, Deserialize)]
pub struct AllowedOrigins(Vec<String>);

impl AllowedOrigins {
    pub fn new(origins: Vec<String>) -> Self {
        Self(origins)
    }

    pub fn contains(&self, origin: &HeaderValue) -> bool {
        origin
            .to_str()
            .map(|value| self.0.iter().any(|allowed| allowed == value))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_origins_matching() {
        let origins = AllowedOrigins::new(vec!["https://app.example.com".to_string()]);

        assert!(origins.contains(&HeaderValue::from_static("https://app.example.com")));
        assert!(!origins.contains(&HeaderValue::from_static("https://evil.example.com")));
    }

    #[test]
    fn test_defaults() {
        let settings = EnrollSetting::default();

        assert_eq!(settings.app.address, prod::APP_ADDRESS);
        assert_eq!(settings.session.cookie_name, prod::SESSION_COOKIE_NAME);
        assert!(settings.postgres.url.is_none());
    }
}
