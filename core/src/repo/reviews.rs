// core/src/repo/reviews.rs

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::SqliteExecutor;
use tracing::{info, instrument};

use crate::db::DbPool;
use crate::decimal::Decimal2;
use crate::error::{StoreError, StoreResult};
use crate::models::{NewReview, Review, User};
use crate::repo::products;

/// Inserts a review. A second review for the same (product, user) pair fails
/// with `StoreError::UniqueViolation`.
#[instrument(
  name = "repo::reviews::create",
  skip(executor, new_review),
  fields(product_id = new_review.product_id, user_id = new_review.user_id),
  err(Display)
)]
pub async fn create<'e, E>(executor: E, new_review: NewReview) -> StoreResult<Review>
where
  E: SqliteExecutor<'e>,
{
  let sql = format!(
    "INSERT INTO reviews (product_id, user_id, name, rating, comment, created_at) \
     VALUES (?, ?, ?, ?, ?, ?) RETURNING {}",
    Review::COLUMNS
  );
  let review = sqlx::query_as::<_, Review>(&sql)
    .bind(new_review.product_id)
    .bind(new_review.user_id)
    .bind(&new_review.name)
    .bind(new_review.rating.unwrap_or(0))
    .bind(&new_review.comment)
    .bind(Utc::now())
    .fetch_one(executor)
    .await?;
  Ok(review)
}

/// Newest first.
pub async fn list_for_product<'e, E>(executor: E, product_id: i64) -> StoreResult<Vec<Review>>
where
  E: SqliteExecutor<'e>,
{
  let sql = format!(
    "SELECT {} FROM reviews WHERE product_id = ? ORDER BY {}",
    Review::COLUMNS,
    Review::DEFAULT_ORDERING
  );
  Ok(sqlx::query_as::<_, Review>(&sql).bind(product_id).fetch_all(executor).await?)
}

/// Review submission: stores `user`'s review of the product and refreshes the
/// product's review count and average rating, all in one transaction.
#[instrument(name = "repo::reviews::submit", skip(pool, user, comment), fields(user_id = user.id), err(Display))]
pub async fn submit(
  pool: &DbPool,
  product_id: i64,
  user: &User,
  rating: Option<i32>,
  comment: Option<String>,
) -> StoreResult<Review> {
  let rating = match rating {
    Some(r) if (1..=5).contains(&r) => r,
    Some(0) | None => return Err(StoreError::validation("rating", "Please select a rating")),
    Some(_) => return Err(StoreError::validation("rating", "Rating must be between 1 and 5.")),
  };

  // Write lock up front; concurrent flows wait on the busy timeout.
  let mut tx = pool.begin_with("BEGIN IMMEDIATE").await?;
  let mut product = products::get(&mut *tx, product_id).await?;

  let author = if user.first_name.trim().is_empty() {
    user.username.clone()
  } else {
    user.first_name.clone()
  };
  let review = create(
    &mut *tx,
    NewReview {
      product_id,
      user_id: user.id,
      name: author,
      rating: Some(rating),
      comment,
    },
  )
  .await
  .map_err(|e| match e {
    StoreError::UniqueViolation { .. } => StoreError::UniqueViolation {
      constraint: "Product already reviewed".to_string(),
    },
    other => other,
  })?;

  let (count, total): (i64, i64) =
    sqlx::query_as("SELECT COUNT(*), COALESCE(SUM(rating), 0) FROM reviews WHERE product_id = ?")
      .bind(product_id)
      .fetch_one(&mut *tx)
      .await?;

  product.num_reviews = Some(count as i32);
  product.rating = Some(average(total, count));
  products::save(&mut *tx, &mut product).await?;

  tx.commit().await?;
  info!(review_id = review.id, product_id, "Review submitted.");
  Ok(review)
}

fn average(total: i64, count: i64) -> Decimal2 {
  if count == 0 {
    return Decimal2::zero();
  }
  Decimal2::rounded(Decimal::from(total) / Decimal::from(count))
}
