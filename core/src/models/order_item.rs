// core/src/models/order_item.rs

use std::fmt;

use sqlx::FromRow;

use crate::decimal::Decimal2;

/// A line of an order. `name`, `price` and `image` are copied from the
/// product when the order is placed and never follow later product edits.
#[derive(Debug, Clone, FromRow)]
pub struct OrderItem {
  pub id: i64,
  pub product_id: Option<i64>, // Cleared when the product is deleted
  pub order_id: i64,
  pub name: String,
  pub qty: i32,
  pub price: Decimal2,
  pub image: Option<String>, // Plain string, served as stored
}

impl OrderItem {
  pub const NAME_MAX_LENGTH: usize = 200;

  pub(crate) const COLUMNS: &'static str = "id, product_id, order_id, name, qty, price, image";
}

impl fmt::Display for OrderItem {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} x {}", self.qty, self.name)
  }
}

#[derive(Debug, Clone)]
pub struct NewOrderItem {
  pub product_id: Option<i64>,
  pub order_id: i64,
  pub name: String,
  pub qty: i32,
  pub price: Decimal2,
  pub image: Option<String>,
}
