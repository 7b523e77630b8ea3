// core/src/db.rs

//! Pool construction and schema migrations.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{info, instrument};

use crate::error::StoreResult;

pub type DbPool = SqlitePool;

/// Opens a pool for `database_url` with foreign-key enforcement on, so the
/// schema's CASCADE / SET NULL rules are applied by the engine.
#[instrument(name = "db::connect", err(Display))]
pub async fn connect(database_url: &str) -> StoreResult<DbPool> {
  let options = SqliteConnectOptions::from_str(database_url)?
    .create_if_missing(true)
    .foreign_keys(true);

  let mut pool_options = SqlitePoolOptions::new();
  if is_in_memory(database_url) {
    // Every connection to `:memory:` is a separate database; keep exactly one
    // alive for the life of the pool.
    pool_options = pool_options.max_connections(1).min_connections(1).idle_timeout(None).max_lifetime(None);
  }

  let pool = pool_options.connect_with(options).await?;
  info!("Database pool opened.");
  Ok(pool)
}

/// Applies the embedded migrations under `core/migrations`.
#[instrument(name = "db::migrate", skip(pool), err(Display))]
pub async fn migrate(pool: &DbPool) -> StoreResult<()> {
  sqlx::migrate!("./migrations").run(pool).await?;
  info!("Migrations applied.");
  Ok(())
}

pub async fn connect_and_migrate(database_url: &str) -> StoreResult<DbPool> {
  let pool = connect(database_url).await?;
  migrate(&pool).await?;
  Ok(pool)
}

fn is_in_memory(database_url: &str) -> bool {
  database_url.contains(":memory:") || database_url.contains("mode=memory")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn detects_in_memory_urls() {
    assert!(is_in_memory("sqlite::memory:"));
    assert!(is_in_memory("sqlite://file:shop?mode=memory&cache=shared"));
    assert!(!is_in_memory("sqlite://storefront.db"));
  }
}
