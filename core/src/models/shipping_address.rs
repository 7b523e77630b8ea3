// core/src/models/shipping_address.rs

use std::fmt;

use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct ShippingAddress {
  pub id: i64,
  pub order_id: Option<i64>,
  pub address: Option<String>,
  pub city: Option<String>,
  pub postal_code: Option<String>,
  pub country: Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl ShippingAddress {
  pub const FIELD_MAX_LENGTH: usize = 200;

  pub(crate) const COLUMNS: &'static str =
    "id, order_id, address, city, postal_code, country, created_at, updated_at";
}

impl fmt::Display for ShippingAddress {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{}, {}",
      self.address.as_deref().unwrap_or(""),
      self.city.as_deref().unwrap_or("")
    )
  }
}

#[derive(Debug, Clone, Default)]
pub struct NewShippingAddress {
  pub address: Option<String>,
  pub city: Option<String>,
  pub postal_code: Option<String>,
  pub country: Option<String>,
}
