//! Configuration module
//!
//! One immutable snapshot loaded at startup from the environment (with
//! `.env` support). `MONGO_URI` is required; everything else has a default
//! except `JWT_SECRET`, which must be injected so no signing key ever lives
//! in the source.

use std::env;

use anyhow::Context;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_JWT_EXPIRY_HOURS: i64 = 72;
const DEFAULT_RATE_LIMIT_MAX_REQUESTS: usize = 100;
const DEFAULT_RATE_LIMIT_WINDOW_SECS: u64 = 60;
const DEFAULT_RATE_LIMIT_MAX_CLIENTS: usize = 10_000;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_DB_SELECTION_TIMEOUT_SECS: u64 = 5;

/// Application configuration, loaded once and never mutated.
#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_uri: String,
    pub server_port: u16,
    pub environment: String,
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    pub rate_limit_max_requests: usize,
    pub rate_limit_window_secs: u64,
    pub rate_limit_max_clients: usize,
    pub request_timeout_secs: u64,
    pub db_server_selection_timeout_secs: u64,
    // SMTP settings for the password-reset mailer; all optional, and the
    // mailer is a no-op unless host and from are present.
    pub smtp_host: Option<String>,
    pub smtp_port: Option<u16>,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
    pub smtp_from: Option<String>,
}

fn env_parsed<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        // A missing .env file is fine; real environments set variables directly.
        dotenvy::dotenv().ok();

        let mongo_uri = env::var("MONGO_URI").context("MONGO_URI must be set")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;

        Ok(Self {
            mongo_uri,
            server_port: env_parsed("PORT", DEFAULT_PORT),
            environment: env::var("ENV").unwrap_or_else(|_| "development".to_string()),
            jwt_secret,
            jwt_expiry_hours: env_parsed("JWT_EXPIRY_HOURS", DEFAULT_JWT_EXPIRY_HOURS),
            rate_limit_max_requests: env_parsed(
                "RATE_LIMIT_MAX_REQUESTS",
                DEFAULT_RATE_LIMIT_MAX_REQUESTS,
            ),
            rate_limit_window_secs: env_parsed(
                "RATE_LIMIT_WINDOW_SECS",
                DEFAULT_RATE_LIMIT_WINDOW_SECS,
            ),
            rate_limit_max_clients: env_parsed(
                "RATE_LIMIT_MAX_CLIENTS",
                DEFAULT_RATE_LIMIT_MAX_CLIENTS,
            ),
            request_timeout_secs: env_parsed("REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            db_server_selection_timeout_secs: env_parsed(
                "DB_SERVER_SELECTION_TIMEOUT_SECS",
                DEFAULT_DB_SELECTION_TIMEOUT_SECS,
            ),
            smtp_host: env::var("SMTP_HOST").ok(),
            smtp_port: env::var("SMTP_PORT").ok().and_then(|port| port.parse().ok()),
            smtp_user: env::var("SMTP_USER").ok(),
            smtp_password: env::var("SMTP_PASSWORD").ok(),
            smtp_from: env::var("SMTP_FROM").ok(),
        })
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let environment = self.environment.to_lowercase();
        environment == "production" || environment == "prod"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            mongo_uri: "mongodb://localhost:27017".to_string(),
            server_port: DEFAULT_PORT,
            environment: "development".to_string(),
            jwt_secret: "test-secret".to_string(),
            jwt_expiry_hours: DEFAULT_JWT_EXPIRY_HOURS,
            rate_limit_max_requests: DEFAULT_RATE_LIMIT_MAX_REQUESTS,
            rate_limit_window_secs: DEFAULT_RATE_LIMIT_WINDOW_SECS,
            rate_limit_max_clients: DEFAULT_RATE_LIMIT_MAX_CLIENTS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            db_server_selection_timeout_secs: DEFAULT_DB_SELECTION_TIMEOUT_SECS,
            smtp_host: None,
            smtp_port: None,
            smtp_user: None,
            smtp_password: None,
            smtp_from: None,
        }
    }

    #[test]
    fn test_is_production() {
        let mut config = test_config();
        assert!(!config.is_production());
        config.environment = "Production".to_string();
        assert!(config.is_production());
        config.environment = "prod".to_string();
        assert!(config.is_production());
    }
}
