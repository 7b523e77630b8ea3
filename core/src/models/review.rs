// core/src/models/review.rs

use std::fmt;

use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct Review {
  pub id: i64,
  pub product_id: i64,
  pub user_id: i64,
  pub name: String,
  pub rating: Option<i32>,
  pub comment: Option<String>,
  pub created_at: DateTime<Utc>,
}

impl Review {
  pub const NAME_MAX_LENGTH: usize = 200;

  pub(crate) const COLUMNS: &'static str = "id, product_id, user_id, name, rating, comment, created_at";
  pub(crate) const DEFAULT_ORDERING: &'static str = "created_at DESC, id DESC";
}

impl fmt::Display for Review {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}'s review of product {}", self.name, self.product_id)
  }
}

#[derive(Debug, Clone, Default)]
pub struct NewReview {
  pub product_id: i64,
  pub user_id: i64,
  pub name: String,
  pub rating: Option<i32>,
  pub comment: Option<String>,
}
