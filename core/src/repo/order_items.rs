// core/src/repo/order_items.rs

use sqlx::SqliteExecutor;

use crate::error::{StoreError, StoreResult};
use crate::models::{NewOrderItem, OrderItem};
use crate::repo::not_found;

pub async fn create<'e, E>(executor: E, item: NewOrderItem) -> StoreResult<OrderItem>
where
  E: SqliteExecutor<'e>,
{
  if item.name.trim().is_empty() {
    return Err(StoreError::validation("name", "This field may not be blank."));
  }
  let sql = format!(
    "INSERT INTO order_items (product_id, order_id, name, qty, price, image) \
     VALUES (?, ?, ?, ?, ?, ?) RETURNING {}",
    OrderItem::COLUMNS
  );
  Ok(
    sqlx::query_as::<_, OrderItem>(&sql)
      .bind(item.product_id)
      .bind(item.order_id)
      .bind(&item.name)
      .bind(item.qty)
      .bind(item.price)
      .bind(&item.image)
      .fetch_one(executor)
      .await?,
  )
}

pub async fn find<'e, E>(executor: E, id: i64) -> StoreResult<Option<OrderItem>>
where
  E: SqliteExecutor<'e>,
{
  let sql = format!("SELECT {} FROM order_items WHERE id = ?", OrderItem::COLUMNS);
  Ok(sqlx::query_as::<_, OrderItem>(&sql).bind(id).fetch_optional(executor).await?)
}

pub async fn get<'e, E>(executor: E, id: i64) -> StoreResult<OrderItem>
where
  E: SqliteExecutor<'e>,
{
  find(executor, id).await?.ok_or_else(|| not_found("OrderItem", id))
}

/// Items of one order in insertion order.
pub async fn list_for_order<'e, E>(executor: E, order_id: i64) -> StoreResult<Vec<OrderItem>>
where
  E: SqliteExecutor<'e>,
{
  let sql = format!(
    "SELECT {} FROM order_items WHERE order_id = ? ORDER BY id ASC",
    OrderItem::COLUMNS
  );
  Ok(sqlx::query_as::<_, OrderItem>(&sql).bind(order_id).fetch_all(executor).await?)
}
