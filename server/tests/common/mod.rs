// tests/common/mod.rs
#![allow(dead_code, unused_macros)] // Not every test binary uses every helper

use once_cell::sync::Lazy;
use storefront::decimal::Decimal2;
use storefront::models::{NewProduct, NewUser, Product, User};
use storefront::repo::{products, users};
use storefront::TokenIssuer;
use storefront_server::{AppConfig, AppState};
use tracing::Level;

static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

pub fn test_config() -> AppConfig {
  AppConfig {
    server_host: "127.0.0.1".to_string(),
    server_port: 8080,
    database_url: "sqlite::memory:".to_string(),
    app_base_url: "http://127.0.0.1:8080".to_string(),
    media_url: "/media/".to_string(),
    jwt_secret: "test-secret".to_string(),
    access_token_lifetime_minutes: 60,
  }
}

pub async fn test_state() -> AppState {
  let config = test_config();
  let pool = storefront::connect_and_migrate(&config.database_url)
    .await
    .expect("in-memory database should open and migrate");
  AppState::new(pool, config)
}

/// Builds the test service with the full route table over `$state`.
macro_rules! init_app {
  ($state:expr) => {
    actix_web::test::init_service(
      actix_web::App::new()
        .app_data(actix_web::web::Data::new($state.clone()))
        .wrap(actix_web::middleware::NormalizePath::new(
          actix_web::middleware::TrailingSlash::Always,
        ))
        .configure(storefront_server::web::configure_app_routes),
    )
    .await
  };
}

pub async fn make_user(state: &AppState, username: &str, is_staff: bool) -> User {
  users::create(
    &state.db_pool,
    NewUser {
      username: username.to_string(),
      email: format!("{}@example.com", username),
      is_staff,
      password: "password123".to_string(),
      ..Default::default()
    },
  )
  .await
  .expect("user should be created")
}

pub async fn make_product(state: &AppState, name: &str, price_hundredths: i64, stock: i32) -> Product {
  products::create(
    &state.db_pool,
    NewProduct {
      name: name.to_string(),
      price: Some(Decimal2::from_hundredths(price_hundredths)),
      stock_count: Some(stock),
      ..Default::default()
    },
  )
  .await
  .expect("product should be created")
}

pub fn bearer(state: &AppState, user: &User) -> (&'static str, String) {
  let token = state
    .token_issuer
    .issue_access_token(user)
    .expect("token should be issued");
  ("Authorization", format!("Bearer {}", token))
}
