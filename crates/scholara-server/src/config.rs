//! Process configuration from environment variables.
//!
//! Secrets have no defaults: a missing database credential or JWT
//! secret stops startup instead of falling back to a built-in value.

use std::env;
use std::fmt::Display;
use std::str::FromStr;

use scholara_auth::AuthConfig;
use scholara_db::DbConfig;
use thiserror::Error;
use tracing::info;

const MIN_JWT_SECRET_BYTES: usize = 32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    Missing(&'static str),

    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub db: DbConfig,
    pub auth: AuthConfig,
    /// Run the daily expired-scholarship cleanup.
    pub cleanup_enabled: bool,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let jwt_secret = required("JWT_SECRET")?;
        if jwt_secret.len() < MIN_JWT_SECRET_BYTES {
            return Err(ConfigError::Invalid {
                key: "JWT_SECRET",
                reason: format!("must be at least {MIN_JWT_SECRET_BYTES} bytes"),
            });
        }

        let db = DbConfig {
            url: or_default(&get, "SCHOLARA_DB_URL", "127.0.0.1:8000"),
            namespace: or_default(&get, "SCHOLARA_DB_NAMESPACE", "scholara"),
            database: or_default(&get, "SCHOLARA_DB_DATABASE", "main"),
            username: required("SCHOLARA_DB_USERNAME")?,
            password: required("SCHOLARA_DB_PASSWORD")?,
        };

        let auth = AuthConfig {
            pepper: get("SCHOLARA_PASSWORD_PEPPER"),
            ..AuthConfig::new(jwt_secret)
        };

        Ok(Self {
            port: parsed(&get, "SCHOLARA_PORT", 5000)?,
            db,
            auth,
            cleanup_enabled: parsed(&get, "SCHOLARA_CLEANUP_ENABLED", true)?,
        })
    }
}

fn or_default(get: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    get(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    })
}

fn parsed<T>(
    get: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr + Display,
    T::Err: Display,
{
    match get(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        }),
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}
