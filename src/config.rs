// Application configuration loaded from the environment

use thiserror::Error;

/// Default token lifetime when JWT_TTL_SECONDS is not set (1 hour)
const DEFAULT_JWT_TTL_SECONDS: i64 = 3600;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
    #[error("invalid value for environment variable {name}: {value}")]
    InvalidVar { name: &'static str, value: String },
}

/// Runtime configuration, read once at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_ttl_seconds: i64,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// DATABASE_URL and JWT_SECRET are required; HOST, PORT and
    /// JWT_TTL_SECONDS fall back to sensible defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?;
        let jwt_secret =
            std::env::var("JWT_SECRET").map_err(|_| ConfigError::MissingVar("JWT_SECRET"))?;

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = match std::env::var("PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidVar {
                name: "PORT",
                value: raw,
            })?,
            Err(_) => 8080,
        };
        let jwt_ttl_seconds = match std::env::var("JWT_TTL_SECONDS") {
            Ok(raw) => raw.parse::<i64>().map_err(|_| ConfigError::InvalidVar {
                name: "JWT_TTL_SECONDS",
                value: raw,
            })?,
            Err(_) => DEFAULT_JWT_TTL_SECONDS,
        };

        Ok(Self {
            database_url,
            host,
            port,
            jwt_secret,
            jwt_ttl_seconds,
        })
    }
}
