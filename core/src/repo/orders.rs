// core/src/repo/orders.rs

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::SqliteExecutor;
use tracing::{info, instrument, warn};

use crate::db::DbPool;
use crate::decimal::Decimal2;
use crate::error::{StoreError, StoreResult};
use crate::models::{NewOrder, NewOrderItem, NewShippingAddress, Order, OrderItem, ShippingAddress, User};
use crate::repo::{not_found, order_items, products, shipping, users};

/// One requested line of a new order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
  pub product_id: i64,
  pub qty: i32,
}

/// Everything the order placement flow needs besides the buyer.
#[derive(Debug, Clone, Default)]
pub struct PlaceOrder {
  pub lines: Vec<OrderLine>,
  pub payment_method: Option<String>,
  pub tax_price: Option<Decimal2>,
  pub shipping_price: Option<Decimal2>,
  pub shipping_address: NewShippingAddress,
}

/// An order with its related rows, ready to be rendered.
#[derive(Debug, Clone)]
pub struct OrderDetail {
  pub order: Order,
  pub owner: Option<User>,
  pub items: Vec<OrderItem>,
  pub shipping_address: Option<ShippingAddress>,
}

#[instrument(name = "repo::orders::create", skip(executor, new_order), err(Display))]
pub async fn create<'e, E>(executor: E, new_order: NewOrder) -> StoreResult<Order>
where
  E: SqliteExecutor<'e>,
{
  let now = Utc::now();
  let sql = format!(
    "INSERT INTO orders (user_id, payment_method, items_price, tax_price, shipping_price, total_price, \
       is_paid, is_delivered, created_at, updated_at, created_by, updated_by) \
     VALUES (?, ?, ?, ?, ?, ?, FALSE, FALSE, ?, ?, ?, ?) RETURNING {}",
    Order::COLUMNS
  );
  Ok(
    sqlx::query_as::<_, Order>(&sql)
      .bind(new_order.user_id)
      .bind(&new_order.payment_method)
      .bind(new_order.items_price)
      .bind(new_order.tax_price)
      .bind(new_order.shipping_price)
      .bind(new_order.total_price)
      .bind(now)
      .bind(now)
      .bind(&new_order.created_by)
      .bind(&new_order.created_by)
      .fetch_one(executor)
      .await?,
  )
}

/// Order placement: creates the order, its shipping address and one item per
/// line, snapshotting each product's name, price and image, and takes the
/// quantities out of stock. Runs in one transaction; nothing is written if any
/// line is rejected.
#[instrument(name = "repo::orders::place", skip(pool, buyer, request), fields(user_id = buyer.id, lines = request.lines.len()), err(Display))]
pub async fn place(pool: &DbPool, buyer: &User, request: PlaceOrder, media_url: &str) -> StoreResult<OrderDetail> {
  if request.lines.is_empty() {
    return Err(StoreError::validation("orderItems", "No Order Items"));
  }

  // Write lock up front; concurrent flows wait on the busy timeout.
  let mut tx = pool.begin_with("BEGIN IMMEDIATE").await?;

  let mut snapshots = Vec::with_capacity(request.lines.len());
  let mut items_total = Decimal::ZERO;
  for line in &request.lines {
    if line.qty < 1 {
      return Err(StoreError::validation("qty", "Ensure this value is greater than or equal to 1."));
    }

    let mut product = products::get(&mut *tx, line.product_id).await?;
    let price = product.price.ok_or_else(|| {
      StoreError::validation("orderItems", format!("Product '{}' has no price and cannot be ordered.", product.name))
    })?;
    let available = product.stock_count.unwrap_or(0);
    if line.qty > available {
      warn!(product_id = product.id, requested = line.qty, available, "Insufficient stock.");
      return Err(StoreError::validation(
        "orderItems",
        format!("Only {} of '{}' left in stock.", available, product.name),
      ));
    }

    items_total += price.as_decimal() * Decimal::from(line.qty);
    snapshots.push((product.id, product.name.clone(), line.qty, price, product.image_url(media_url)));

    product.stock_count = Some(available - line.qty);
    products::save(&mut *tx, &mut product).await?;
  }

  let items_price = Decimal2::parse_field("itemsPrice", items_total, Order::PRICE_MAX_DIGITS)?;
  let tax = request.tax_price.unwrap_or_default().as_decimal();
  let shipping_cost = request.shipping_price.unwrap_or_default().as_decimal();
  let total_price = Decimal2::parse_field("totalPrice", items_total + tax + shipping_cost, Order::PRICE_MAX_DIGITS)?;

  let order = create(
    &mut *tx,
    NewOrder {
      user_id: Some(buyer.id),
      payment_method: request.payment_method,
      items_price: Some(items_price),
      tax_price: request.tax_price,
      shipping_price: request.shipping_price,
      total_price: Some(total_price),
      created_by: Some(buyer.username.clone()),
    },
  )
  .await?;

  shipping::create(&mut *tx, order.id, request.shipping_address).await?;

  for (product_id, name, qty, price, image) in snapshots {
    order_items::create(
      &mut *tx,
      NewOrderItem {
        product_id: Some(product_id),
        order_id: order.id,
        name,
        qty,
        price,
        image: Some(image),
      },
    )
    .await?;
  }

  tx.commit().await?;
  info!(order_id = order.id, total = %total_price, "Order placed.");

  load_detail(pool, order.id).await
}

pub async fn find<'e, E>(executor: E, id: i64) -> StoreResult<Option<Order>>
where
  E: SqliteExecutor<'e>,
{
  let sql = format!("SELECT {} FROM orders WHERE id = ?", Order::COLUMNS);
  Ok(sqlx::query_as::<_, Order>(&sql).bind(id).fetch_optional(executor).await?)
}

pub async fn get<'e, E>(executor: E, id: i64) -> StoreResult<Order>
where
  E: SqliteExecutor<'e>,
{
  find(executor, id).await?.ok_or_else(|| not_found("Order", id))
}

/// Newest first.
pub async fn list_for_user<'e, E>(executor: E, user_id: i64) -> StoreResult<Vec<Order>>
where
  E: SqliteExecutor<'e>,
{
  let sql = format!(
    "SELECT {} FROM orders WHERE user_id = ? ORDER BY {}",
    Order::COLUMNS,
    Order::DEFAULT_ORDERING
  );
  Ok(sqlx::query_as::<_, Order>(&sql).bind(user_id).fetch_all(executor).await?)
}

/// Newest first.
pub async fn list_all<'e, E>(executor: E) -> StoreResult<Vec<Order>>
where
  E: SqliteExecutor<'e>,
{
  let sql = format!("SELECT {} FROM orders ORDER BY {}", Order::COLUMNS, Order::DEFAULT_ORDERING);
  Ok(sqlx::query_as::<_, Order>(&sql).fetch_all(executor).await?)
}

/// Deletes an order together with its items and shipping address.
#[instrument(name = "repo::orders::delete", skip(executor), err(Display))]
pub async fn delete<'e, E>(executor: E, id: i64) -> StoreResult<()>
where
  E: SqliteExecutor<'e>,
{
  let result = sqlx::query("DELETE FROM orders WHERE id = ?").bind(id).execute(executor).await?;
  if result.rows_affected() == 0 {
    return Err(not_found("Order", id));
  }
  info!(order_id = id, "Order deleted.");
  Ok(())
}

#[instrument(name = "repo::orders::mark_paid", skip(executor, actor), fields(actor = %actor.username), err(Display))]
pub async fn mark_paid<'e, E>(executor: E, id: i64, actor: &User) -> StoreResult<Order>
where
  E: SqliteExecutor<'e>,
{
  let now = Utc::now();
  let sql = format!(
    "UPDATE orders SET is_paid = TRUE, paid_at = ?, updated_at = ?, updated_by = ? WHERE id = ? RETURNING {}",
    Order::COLUMNS
  );
  let order = sqlx::query_as::<_, Order>(&sql)
    .bind(now)
    .bind(now)
    .bind(&actor.username)
    .bind(id)
    .fetch_optional(executor)
    .await?
    .ok_or_else(|| not_found("Order", id))?;
  info!(order_id = id, "Order marked as paid.");
  Ok(order)
}

#[instrument(name = "repo::orders::mark_delivered", skip(executor, actor), fields(actor = %actor.username), err(Display))]
pub async fn mark_delivered<'e, E>(executor: E, id: i64, actor: &User) -> StoreResult<Order>
where
  E: SqliteExecutor<'e>,
{
  let now = Utc::now();
  let sql = format!(
    "UPDATE orders SET is_delivered = TRUE, delivered_at = ?, updated_at = ?, updated_by = ? WHERE id = ? RETURNING {}",
    Order::COLUMNS
  );
  let order = sqlx::query_as::<_, Order>(&sql)
    .bind(now)
    .bind(now)
    .bind(&actor.username)
    .bind(id)
    .fetch_optional(executor)
    .await?
    .ok_or_else(|| not_found("Order", id))?;
  info!(order_id = id, "Order marked as delivered.");
  Ok(order)
}

pub async fn items<'e, E>(executor: E, order_id: i64) -> StoreResult<Vec<OrderItem>>
where
  E: SqliteExecutor<'e>,
{
  order_items::list_for_order(executor, order_id).await
}

pub async fn shipping_address<'e, E>(executor: E, order_id: i64) -> StoreResult<Option<ShippingAddress>>
where
  E: SqliteExecutor<'e>,
{
  shipping::find_for_order(executor, order_id).await
}

/// Loads an order with its owner, items and shipping address.
pub async fn load_detail(pool: &DbPool, id: i64) -> StoreResult<OrderDetail> {
  let order = get(pool, id).await?;
  into_detail(pool, order).await
}

/// Attaches related rows to an already loaded order.
pub async fn into_detail(pool: &DbPool, order: Order) -> StoreResult<OrderDetail> {
  let owner = match order.user_id {
    Some(user_id) => users::find(pool, user_id).await?,
    None => None,
  };
  let line_items = items(pool, order.id).await?;
  let address = shipping_address(pool, order.id).await?;
  Ok(OrderDetail {
    order,
    owner,
    items: line_items,
    shipping_address: address,
  })
}
