// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use storefront::decimal::Decimal2;
use storefront::models::{NewProduct, NewUser, Product, User};
use storefront::repo::{products, users};
use storefront::DbPool;
use tracing::Level;

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

/// Fresh in-memory database with the schema applied.
pub async fn test_pool() -> DbPool {
  storefront::connect_and_migrate("sqlite::memory:")
    .await
    .expect("in-memory database should open and migrate")
}

pub async fn make_user(pool: &DbPool, username: &str) -> User {
  users::create(
    pool,
    NewUser {
      username: username.to_string(),
      email: format!("{}@example.com", username),
      first_name: String::new(),
      last_name: String::new(),
      is_staff: false,
      password: "password123".to_string(),
    },
  )
  .await
  .expect("user should be created")
}

pub async fn make_staff(pool: &DbPool, username: &str) -> User {
  users::create(
    pool,
    NewUser {
      username: username.to_string(),
      email: format!("{}@example.com", username),
      is_staff: true,
      password: "password123".to_string(),
      ..Default::default()
    },
  )
  .await
  .expect("staff user should be created")
}

pub async fn make_product(pool: &DbPool, owner: Option<&User>, name: &str, price_hundredths: i64, stock: i32) -> Product {
  products::create(
    pool,
    NewProduct {
      user_id: owner.map(|u| u.id),
      name: name.to_string(),
      brand: Some("Acme".to_string()),
      price: Some(Decimal2::from_hundredths(price_hundredths)),
      stock_count: Some(stock),
      ..Default::default()
    },
  )
  .await
  .expect("product should be created")
}
