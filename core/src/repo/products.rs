// core/src/repo/products.rs

use chrono::Utc;
use sqlx::SqliteExecutor;
use tracing::{debug, info, instrument};

use crate::error::{StoreError, StoreResult};
use crate::media::DEFAULT_PRODUCT_IMAGE;
use crate::models::{NewProduct, Product};
use crate::repo::not_found;

/// Optional narrowing for [`list`].
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
  /// Case-insensitive substring match on the product name.
  pub keyword: Option<String>,
  pub user_id: Option<i64>,
}

/// Inserts a product, stamping both timestamps. Rating, review count and
/// stock start at zero; a missing image gets the placeholder reference.
#[instrument(name = "repo::products::create", skip(executor, new_product), fields(name = %new_product.name), err(Display))]
pub async fn create<'e, E>(executor: E, new_product: NewProduct) -> StoreResult<Product>
where
  E: SqliteExecutor<'e>,
{
  if new_product.name.trim().is_empty() {
    return Err(StoreError::validation("productname", "This field may not be blank."));
  }

  let now = Utc::now();
  let image = new_product.image.unwrap_or_else(|| DEFAULT_PRODUCT_IMAGE.to_string());
  let sql = format!(
    "INSERT INTO products (user_id, name, brand, category, description, image, rating, num_reviews, \
       price, stock_count, created_at, updated_at) \
     VALUES (?, ?, ?, ?, ?, ?, 0, 0, ?, ?, ?, ?) RETURNING {}",
    Product::COLUMNS
  );
  let product = sqlx::query_as::<_, Product>(&sql)
    .bind(new_product.user_id)
    .bind(&new_product.name)
    .bind(&new_product.brand)
    .bind(&new_product.category)
    .bind(&new_product.description)
    .bind(&image)
    .bind(new_product.price)
    .bind(new_product.stock_count.unwrap_or(0))
    .bind(now)
    .bind(now)
    .fetch_one(executor)
    .await?;

  info!(product_id = product.id, "Product created.");
  Ok(product)
}

/// Writes every mutable column of `product` back. `updated_at` is refreshed;
/// `created_at` is never rewritten.
#[instrument(name = "repo::products::save", skip(executor, product), fields(product_id = product.id), err(Display))]
pub async fn save<'e, E>(executor: E, product: &mut Product) -> StoreResult<()>
where
  E: SqliteExecutor<'e>,
{
  let now = Utc::now();
  let result = sqlx::query(
    "UPDATE products SET user_id = ?, name = ?, brand = ?, category = ?, description = ?, image = ?, \
       rating = ?, num_reviews = ?, price = ?, stock_count = ?, updated_at = ? \
     WHERE id = ?",
  )
  .bind(product.user_id)
  .bind(&product.name)
  .bind(&product.brand)
  .bind(&product.category)
  .bind(&product.description)
  .bind(&product.image)
  .bind(product.rating)
  .bind(product.num_reviews)
  .bind(product.price)
  .bind(product.stock_count)
  .bind(now)
  .bind(product.id)
  .execute(executor)
  .await?;

  if result.rows_affected() == 0 {
    return Err(not_found("Product", product.id));
  }
  product.updated_at = now;
  debug!("Product saved.");
  Ok(())
}

pub async fn find<'e, E>(executor: E, id: i64) -> StoreResult<Option<Product>>
where
  E: SqliteExecutor<'e>,
{
  let sql = format!("SELECT {} FROM products WHERE id = ?", Product::COLUMNS);
  Ok(sqlx::query_as::<_, Product>(&sql).bind(id).fetch_optional(executor).await?)
}

pub async fn get<'e, E>(executor: E, id: i64) -> StoreResult<Product>
where
  E: SqliteExecutor<'e>,
{
  find(executor, id).await?.ok_or_else(|| not_found("Product", id))
}

/// Newest first.
#[instrument(name = "repo::products::list", skip(executor), err(Display))]
pub async fn list<'e, E>(executor: E, filter: &ProductFilter) -> StoreResult<Vec<Product>>
where
  E: SqliteExecutor<'e>,
{
  let keyword = filter
    .keyword
    .as_deref()
    .map(str::trim)
    .filter(|k| !k.is_empty())
    .map(|k| format!("%{}%", k.to_lowercase()));

  let sql = format!(
    "SELECT {} FROM products \
     WHERE (? IS NULL OR LOWER(name) LIKE ?) AND (? IS NULL OR user_id = ?) \
     ORDER BY {}",
    Product::COLUMNS,
    Product::DEFAULT_ORDERING
  );
  let products = sqlx::query_as::<_, Product>(&sql)
    .bind(&keyword)
    .bind(&keyword)
    .bind(filter.user_id)
    .bind(filter.user_id)
    .fetch_all(executor)
    .await?;

  debug!(count = products.len(), "Products listed.");
  Ok(products)
}

/// Deletes a product. Its reviews go with it; order items keep their
/// snapshot and lose the product reference.
#[instrument(name = "repo::products::delete", skip(executor), err(Display))]
pub async fn delete<'e, E>(executor: E, id: i64) -> StoreResult<()>
where
  E: SqliteExecutor<'e>,
{
  let result = sqlx::query("DELETE FROM products WHERE id = ?").bind(id).execute(executor).await?;
  if result.rows_affected() == 0 {
    return Err(not_found("Product", id));
  }
  info!(product_id = id, "Product deleted.");
  Ok(())
}
