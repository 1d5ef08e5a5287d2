//! Server configuration
//!
//! Every value can be overridden through environment variables:
//!
//! | Variable | Default | Meaning |
//! |----------------------|------------------------|--------------------------|
//! | HTTP_PORT | 3000 | HTTP listen port |
//! | DATABASE_PATH | data/order-server.db | SQLite database file |
//! | ENVIRONMENT | development | development / production |
//! | CORS_ALLOWED_ORIGINS | (any) | comma-separated origins |
//! | LOG_DIR | (stdout only) | rolling log directory |
//! | JWT_SECRET | dev key in debug builds | token signing secret |
//! | JWT_EXPIRATION_MINUTES | 1440 | token lifetime |
//! | JWT_ISSUER | order-server | token issuer |

use crate::auth::JwtConfig;

#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API listen port
    pub http_port: u16,
    /// SQLite database file path
    pub database_path: String,
    /// Running environment: development | production
    pub environment: String,
    /// CORS allowlist; empty means any origin
    pub allowed_origins: Vec<String>,
    /// Directory for rolling log files; unset logs to stdout only
    pub log_dir: Option<String>,
    /// JWT settings
    pub jwt: JwtConfig,
}

impl Config {
    /// Load from environment variables, using defaults for unset values.
    /// Fails when the JWT secret is missing in a release build.
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "data/order-server.db".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            allowed_origins: std::env::var("CORS_ALLOWED_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            log_dir: std::env::var("LOG_DIR").ok(),
            jwt: JwtConfig::from_env()?,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}
