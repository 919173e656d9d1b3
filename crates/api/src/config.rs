//! # API Configuration Module
//!
//! This module handles loading and managing configuration for the Coachbook API server.
//! It retrieves configuration values from environment variables and provides defaults
//! where appropriate.
//!
//! ## Environment Variables
//!
//! The following environment variables are used:
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Per-request timeout (default: 30)
//! - `JWT_SECRET`: Secret for admin access tokens (required)
//! - `JWT_REFRESH_SECRET`: Secret for admin refresh tokens (required)
//! - `ACCESS_TOKEN_TTL_SECONDS`: Access token lifetime (default: 3600)
//! - `REFRESH_TOKEN_TTL_SECONDS`: Refresh token lifetime (default: 7 days)
//! - `COOKIE_SECURE`: Mark session cookies `Secure` (default: true)
//! - `WHATSAPP_PHONE_ID`, `WHATSAPP_TOKEN`, `WHATSAPP_RECEIVER`: contact form
//!   relay; when any is missing, contact messages are only logged

use eyre::{Result, WrapErr};
use std::env;
use tracing::Level;

/// Settings for issuing and checking admin session tokens.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub jwt_secret: String,
    pub jwt_refresh_secret: String,
    pub access_token_ttl: i64,
    pub refresh_token_ttl: i64,
    pub secure_cookies: bool,
}

impl AuthSettings {
    pub fn new(jwt_secret: impl Into<String>, jwt_refresh_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            jwt_refresh_secret: jwt_refresh_secret.into(),
            access_token_ttl: 3600,
            refresh_token_ttl: 7 * 24 * 60 * 60,
            secure_cookies: true,
        }
    }
}

/// Credentials for the WhatsApp Cloud API used by the contact form relay.
#[derive(Debug, Clone)]
pub struct WhatsAppConfig {
    pub api_base: String,
    pub phone_id: String,
    pub token: String,
    pub receiver: String,
}

/// Configuration for the Coachbook API server
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// PostgreSQL database connection string
    pub database_url: String,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    pub auth: AuthSettings,

    pub whatsapp: Option<WhatsAppConfig>,
}

fn parse_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The DATABASE_URL, JWT_SECRET or JWT_REFRESH_SECRET environment variable is not set
    /// - The API_PORT value cannot be parsed as a u16
    pub fn from_env() -> Result<Self> {
        // Network settings
        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Database settings
        let database_url = env::var("DATABASE_URL")
            .wrap_err("DATABASE_URL environment variable must be set")?;

        let log_level = parse_level(&env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));

        // CORS settings
        let cors_origins = env::var("API_CORS_ORIGINS").ok().map(|origins| {
            origins.split(',').map(|s| s.trim().to_string()).collect()
        });

        // Security settings
        let auth = AuthSettings {
            jwt_secret: env::var("JWT_SECRET")
                .wrap_err("JWT_SECRET environment variable must be set")?,
            jwt_refresh_secret: env::var("JWT_REFRESH_SECRET")
                .wrap_err("JWT_REFRESH_SECRET environment variable must be set")?,
            access_token_ttl: parse_or("ACCESS_TOKEN_TTL_SECONDS", 3600),
            refresh_token_ttl: parse_or("REFRESH_TOKEN_TTL_SECONDS", 7 * 24 * 60 * 60),
            secure_cookies: parse_or("COOKIE_SECURE", true),
        };

        let whatsapp = match (
            env::var("WHATSAPP_PHONE_ID"),
            env::var("WHATSAPP_TOKEN"),
            env::var("WHATSAPP_RECEIVER"),
        ) {
            (Ok(phone_id), Ok(token), Ok(receiver)) => Some(WhatsAppConfig {
                api_base: env::var("WHATSAPP_API_BASE")
                    .unwrap_or_else(|_| "https://graph.facebook.com/v22.0".to_string()),
                phone_id,
                token,
                receiver,
            }),
            _ => None,
        };

        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            request_timeout: parse_or("API_REQUEST_TIMEOUT_SECONDS", 30),
            auth,
            whatsapp,
        })
    }

    /// Returns the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub fn parse_level(value: &str) -> Level {
    match value.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}
