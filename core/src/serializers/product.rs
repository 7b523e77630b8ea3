// core/src/serializers/product.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::decimal::Decimal2;
use crate::error::StoreResult;
use crate::media::{self, MediaError, PLACEHOLDER_IMAGE_URL};
use crate::models::{NewProduct, Product};
use crate::serializers::{check_optional_max_length, check_required, SerializerContext};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRepr {
  #[serde(rename = "_id")]
  pub id: i64,
  pub user: Option<i64>,
  #[serde(rename = "productname")]
  pub name: String,
  #[serde(rename = "productbrand")]
  pub brand: Option<String>,
  #[serde(rename = "productcategory")]
  pub category: Option<String>,
  #[serde(rename = "productinfo")]
  pub description: Option<String>,
  /// Absolute URL, or the placeholder path when there is no usable image.
  pub image: String,
  pub rating: Option<Decimal2>,
  #[serde(rename = "numReviews")]
  pub num_reviews: Option<i32>,
  pub price: Option<Decimal2>,
  #[serde(rename = "stockcount")]
  pub stock_count: Option<i32>,
  #[serde(rename = "createdAt")]
  pub created_at: DateTime<Utc>,
  #[serde(rename = "updatedAt")]
  pub updated_at: DateTime<Utc>,
}

impl ProductRepr {
  pub fn from_model(product: &Product, ctx: &SerializerContext) -> Self {
    Self {
      id: product.id,
      user: product.user_id,
      name: product.name.clone(),
      brand: product.brand.clone(),
      category: product.category.clone(),
      description: product.description.clone(),
      image: absolute_image_url(product, ctx),
      rating: product.rating,
      num_reviews: product.num_reviews,
      price: product.price,
      stock_count: product.stock_count,
      created_at: product.created_at,
      updated_at: product.updated_at,
    }
  }

  pub fn many(products: &[Product], ctx: &SerializerContext) -> Vec<Self> {
    products.iter().map(|p| Self::from_model(p, ctx)).collect()
  }
}

fn absolute_image_url(product: &Product, ctx: &SerializerContext) -> String {
  match media::storage_url(&ctx.media_url, product.image.as_deref()) {
    Ok(path) => media::build_absolute_uri(&ctx.origin, &path),
    Err(MediaError::Missing) => PLACEHOLDER_IMAGE_URL.to_string(),
    Err(e) => {
      warn!(product_id = product.id, error = %e, "Product image reference unusable, rendering placeholder.");
      PLACEHOLDER_IMAGE_URL.to_string()
    }
  }
}

/// Writable product fields as sent by admin clients. Absent fields are left
/// untouched on update and take column defaults on create.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductInput {
  #[serde(rename = "productname")]
  pub name: Option<String>,
  #[serde(rename = "productbrand")]
  pub brand: Option<String>,
  #[serde(rename = "productcategory")]
  pub category: Option<String>,
  #[serde(rename = "productinfo")]
  pub description: Option<String>,
  pub image: Option<String>,
  pub price: Option<Decimal>,
  #[serde(rename = "stockcount")]
  pub stock_count: Option<i32>,
}

impl ProductInput {
  fn check(&self) -> StoreResult<Option<Decimal2>> {
    check_optional_max_length("productbrand", self.brand.as_deref(), Product::BRAND_MAX_LENGTH)?;
    check_optional_max_length("productcategory", self.category.as_deref(), Product::CATEGORY_MAX_LENGTH)?;
    self
      .price
      .map(|p| Decimal2::parse_field("price", p, Product::PRICE_MAX_DIGITS))
      .transpose()
  }

  pub fn into_new_product(self, owner_id: Option<i64>) -> StoreResult<NewProduct> {
    let price = self.check()?;
    let name = self.name.unwrap_or_default();
    check_required("productname", &name, Product::NAME_MAX_LENGTH)?;
    Ok(NewProduct {
      user_id: owner_id,
      name,
      brand: self.brand,
      category: self.category,
      description: self.description,
      image: self.image,
      price,
      stock_count: self.stock_count,
    })
  }

  /// Partial update of an existing product. Call `repo::products::save`
  /// afterwards to persist.
  pub fn apply_to(self, product: &mut Product) -> StoreResult<()> {
    let price = self.check()?;
    if let Some(name) = self.name {
      check_required("productname", &name, Product::NAME_MAX_LENGTH)?;
      product.name = name;
    }
    if self.brand.is_some() {
      product.brand = self.brand;
    }
    if self.category.is_some() {
      product.category = self.category;
    }
    if self.description.is_some() {
      product.description = self.description;
    }
    if self.image.is_some() {
      product.image = self.image;
    }
    if price.is_some() {
      product.price = price;
    }
    if self.stock_count.is_some() {
      product.stock_count = self.stock_count;
    }
    Ok(())
  }
}
