// core/src/models/product.rs

use std::fmt;

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::decimal::Decimal2;
use crate::media;

#[derive(Debug, Clone, FromRow)]
pub struct Product {
  pub id: i64,
  pub user_id: Option<i64>, // Cleared when the owning user is deleted
  pub name: String,
  pub brand: Option<String>,
  pub category: Option<String>,
  pub description: Option<String>,
  pub image: Option<String>, // Path relative to the media root
  pub rating: Option<Decimal2>,
  pub num_reviews: Option<i32>,
  pub price: Option<Decimal2>,
  pub stock_count: Option<i32>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Product {
  pub const NAME_MAX_LENGTH: usize = 150;
  pub const BRAND_MAX_LENGTH: usize = 100;
  pub const CATEGORY_MAX_LENGTH: usize = 100;
  pub const PRICE_MAX_DIGITS: u32 = 7;
  pub const RATING_MAX_DIGITS: u32 = 8;

  pub(crate) const COLUMNS: &'static str = "id, user_id, name, brand, category, description, image, rating, \
     num_reviews, price, stock_count, created_at, updated_at";
  pub(crate) const DEFAULT_ORDERING: &'static str = "created_at DESC, id DESC";

  pub fn in_stock(&self) -> bool {
    self.stock_count.unwrap_or(0) > 0
  }

  /// URL path of the product image under `media_url`, or the placeholder
  /// path when the stored reference is absent or unusable.
  pub fn image_url(&self, media_url: &str) -> String {
    media::image_url_or_placeholder(media_url, self.image.as_deref())
  }
}

impl fmt::Display for Product {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} - {}", self.name, self.brand.as_deref().unwrap_or("No Brand"))
  }
}

/// Input for inserting a product. Unset optional fields take the column
/// defaults (zero rating/stock, placeholder image).
#[derive(Debug, Clone, Default)]
pub struct NewProduct {
  pub user_id: Option<i64>,
  pub name: String,
  pub brand: Option<String>,
  pub category: Option<String>,
  pub description: Option<String>,
  pub image: Option<String>,
  pub price: Option<Decimal2>,
  pub stock_count: Option<i32>,
}
