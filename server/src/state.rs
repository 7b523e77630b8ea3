// server/src/state.rs
use crate::config::AppConfig;
use std::sync::Arc;
use storefront::{DbPool, JwtIssuer};

#[derive(Clone)]
pub struct AppState {
  pub db_pool: DbPool,
  pub config: Arc<AppConfig>,
  pub token_issuer: Arc<JwtIssuer>,
}

impl AppState {
  pub fn new(db_pool: DbPool, config: AppConfig) -> Self {
    let token_issuer = JwtIssuer::new(config.jwt_secret.as_bytes(), config.access_token_lifetime());
    Self {
      db_pool,
      config: Arc::new(config),
      token_issuer: Arc::new(token_issuer),
    }
  }
}
