// server/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use storefront::media::DEFAULT_MEDIA_URL;

/// Thirty days.
pub const DEFAULT_ACCESS_TOKEN_LIFETIME_MINUTES: i64 = 43_200;

#[derive(Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub database_url: String,
  pub app_base_url: String,

  /// URL prefix stored image paths are served under.
  pub media_url: String,

  pub jwt_secret: String,
  pub access_token_lifetime_minutes: i64,
}

// Hand-written so the secret never reaches the logs.
impl std::fmt::Debug for AppConfig {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("AppConfig")
      .field("server_host", &self.server_host)
      .field("server_port", &self.server_port)
      .field("database_url", &self.database_url)
      .field("app_base_url", &self.app_base_url)
      .field("media_url", &self.media_url)
      .field("jwt_secret", &"[REDACTED]")
      .field("access_token_lifetime_minutes", &self.access_token_lifetime_minutes)
      .finish()
  }
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| {
      env::var(var_name).map_err(|e| AppError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let server_port = get_env("SERVER_PORT")
      .unwrap_or_else(|_| "8080".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;
    let database_url = get_env("DATABASE_URL")?;
    let app_base_url = get_env("APP_BASE_URL").unwrap_or_else(|_| format!("http://{}:{}", server_host, server_port));

    let mut media_url = get_env("MEDIA_URL").unwrap_or_else(|_| DEFAULT_MEDIA_URL.to_string());
    if !media_url.ends_with('/') {
      media_url.push('/');
    }

    let jwt_secret = get_env("JWT_SECRET")?;
    if jwt_secret.trim().is_empty() {
      return Err(AppError::Config("JWT_SECRET must not be empty".to_string()));
    }
    let access_token_lifetime_minutes = get_env("ACCESS_TOKEN_LIFETIME_MINUTES")
      .unwrap_or_else(|_| DEFAULT_ACCESS_TOKEN_LIFETIME_MINUTES.to_string())
      .parse::<i64>()
      .map_err(|e| AppError::Config(format!("Invalid ACCESS_TOKEN_LIFETIME_MINUTES: {}", e)))?;
    if access_token_lifetime_minutes <= 0 {
      return Err(AppError::Config(
        "ACCESS_TOKEN_LIFETIME_MINUTES must be positive".to_string(),
      ));
    }

    let config = Self {
      server_host,
      server_port,
      database_url,
      app_base_url,
      media_url,
      jwt_secret,
      access_token_lifetime_minutes,
    };
    tracing::info!(config = ?config, "Application configuration loaded successfully.");
    Ok(config)
  }

  pub fn access_token_lifetime(&self) -> chrono::Duration {
    chrono::Duration::minutes(self.access_token_lifetime_minutes)
  }
}
