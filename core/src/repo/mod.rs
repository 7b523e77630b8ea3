// core/src/repo/mod.rs

//! Queries and writes for every entity.
//!
//! Single-statement operations are generic over `SqliteExecutor`, so they run
//! against the pool or inside a transaction (`&mut *tx`). Multi-row flows
//! (order placement, review submission) open their own transaction.

pub mod order_items;
pub mod orders;
pub mod products;
pub mod reviews;
pub mod shipping;
pub mod users;

use crate::error::StoreError;

pub(crate) fn not_found(entity: &'static str, id: i64) -> StoreError {
  StoreError::NotFound { entity, id }
}
