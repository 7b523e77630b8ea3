// core/src/serializers/review.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Review;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewRepr {
  pub id: i64,
  pub product: i64,
  pub user: i64,
  pub name: String,
  pub rating: Option<i32>,
  pub comment: Option<String>,
  #[serde(rename = "createdAt")]
  pub created_at: DateTime<Utc>,
}

impl ReviewRepr {
  pub fn from_model(review: &Review) -> Self {
    Self {
      id: review.id,
      product: review.product_id,
      user: review.user_id,
      name: review.name.clone(),
      rating: review.rating,
      comment: review.comment.clone(),
      created_at: review.created_at,
    }
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewInput {
  pub rating: Option<i32>,
  pub comment: Option<String>,
}
