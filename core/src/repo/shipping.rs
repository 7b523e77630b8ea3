// core/src/repo/shipping.rs

use chrono::Utc;
use sqlx::SqliteExecutor;

use crate::error::StoreResult;
use crate::models::{NewShippingAddress, ShippingAddress};

/// Attaches the shipping address of `order_id`. An order has at most one;
/// a second insert fails with `StoreError::UniqueViolation`.
pub async fn create<'e, E>(executor: E, order_id: i64, address: NewShippingAddress) -> StoreResult<ShippingAddress>
where
  E: SqliteExecutor<'e>,
{
  let now = Utc::now();
  let sql = format!(
    "INSERT INTO shipping_addresses (order_id, address, city, postal_code, country, created_at, updated_at) \
     VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING {}",
    ShippingAddress::COLUMNS
  );
  Ok(
    sqlx::query_as::<_, ShippingAddress>(&sql)
      .bind(order_id)
      .bind(&address.address)
      .bind(&address.city)
      .bind(&address.postal_code)
      .bind(&address.country)
      .bind(now)
      .bind(now)
      .fetch_one(executor)
      .await?,
  )
}

pub async fn find_for_order<'e, E>(executor: E, order_id: i64) -> StoreResult<Option<ShippingAddress>>
where
  E: SqliteExecutor<'e>,
{
  let sql = format!(
    "SELECT {} FROM shipping_addresses WHERE order_id = ?",
    ShippingAddress::COLUMNS
  );
  Ok(
    sqlx::query_as::<_, ShippingAddress>(&sql)
      .bind(order_id)
      .fetch_optional(executor)
      .await?,
  )
}

pub async fn find<'e, E>(executor: E, id: i64) -> StoreResult<Option<ShippingAddress>>
where
  E: SqliteExecutor<'e>,
{
  let sql = format!("SELECT {} FROM shipping_addresses WHERE id = ?", ShippingAddress::COLUMNS);
  Ok(
    sqlx::query_as::<_, ShippingAddress>(&sql)
      .bind(id)
      .fetch_optional(executor)
      .await?,
  )
}
