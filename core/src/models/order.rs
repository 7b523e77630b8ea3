// core/src/models/order.rs

use std::fmt;

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::decimal::Decimal2;

#[derive(Debug, Clone, FromRow)]
pub struct Order {
  pub id: i64,
  pub user_id: Option<i64>, // Cleared when the owning user is deleted
  pub payment_method: Option<String>,
  pub items_price: Option<Decimal2>,
  pub tax_price: Option<Decimal2>,
  pub shipping_price: Option<Decimal2>,
  pub total_price: Option<Decimal2>,
  pub is_paid: bool,
  pub paid_at: Option<DateTime<Utc>>,
  pub is_delivered: bool,
  pub delivered_at: Option<DateTime<Utc>>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
  pub created_by: Option<String>,
  pub updated_by: Option<String>,
}

impl Order {
  pub const PAYMENT_METHOD_MAX_LENGTH: usize = 200;
  pub const PRICE_MAX_DIGITS: u32 = 10;

  pub(crate) const COLUMNS: &'static str = "id, user_id, payment_method, items_price, tax_price, shipping_price, \
     total_price, is_paid, paid_at, is_delivered, delivered_at, created_at, updated_at, created_by, updated_by";
  pub(crate) const DEFAULT_ORDERING: &'static str = "created_at DESC, id DESC";
}

impl fmt::Display for Order {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Order {}", self.id)
  }
}

#[derive(Debug, Clone, Default)]
pub struct NewOrder {
  pub user_id: Option<i64>,
  pub payment_method: Option<String>,
  pub items_price: Option<Decimal2>,
  pub tax_price: Option<Decimal2>,
  pub shipping_price: Option<Decimal2>,
  pub total_price: Option<Decimal2>,
  // Username of whoever is placing the order; written to both audit fields.
  pub created_by: Option<String>,
}
