// core/src/lib.rs

//! Storefront: the data layer of a storefront REST backend.
//!
//! - `models` mirror the stored rows (products, reviews, orders, order items,
//!   shipping addresses, users).
//! - `repo` holds every query and write, including the order placement and
//!   review submission flows. Cascade and set-null rules on delete are
//!   enforced by SQLite itself (see `migrations/`).
//! - `serializers` turn rows into their JSON representations and parse
//!   client input.
//! - `token` issues signed access tokens for authenticated users.

pub mod auth;
pub mod db;
pub mod decimal;
pub mod error;
pub mod media;
pub mod models;
pub mod repo;
pub mod serializers;
pub mod token;

// --- Re-exports for the Public API ---

pub use crate::db::{connect, connect_and_migrate, migrate, DbPool};
pub use crate::decimal::Decimal2;
pub use crate::error::{StoreError, StoreResult};
pub use crate::serializers::SerializerContext;
pub use crate::token::{JwtIssuer, TokenIssuer};
