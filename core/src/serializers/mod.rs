// core/src/serializers/mod.rs

//! Wire representations.
//!
//! `*Repr` types are what clients receive; `*Input` types are what they send.
//! Field names follow the JSON contract the storefront clients already use
//! (`_id`, `productname`, `numReviews`, ...), not the Rust field names.

pub mod order;
pub mod product;
pub mod review;
pub mod user;

pub use order::{OrderInput, OrderItemRepr, OrderLineInput, OrderRepr, ShippingAddressInput, ShippingAddressRepr, UserField};
pub use product::{ProductInput, ProductRepr};
pub use review::{ReviewInput, ReviewRepr};
pub use user::{display_name, LoginInput, RegisterInput, UserRepr, UserWithTokenRepr};

use url::Url;

use crate::error::{StoreError, StoreResult};

/// Per-request data representations may depend on.
#[derive(Debug, Clone)]
pub struct SerializerContext {
  /// Scheme, host and port of the inbound request.
  pub origin: Url,
  pub media_url: String,
}

impl SerializerContext {
  pub fn new(origin: Url, media_url: impl Into<String>) -> Self {
    Self {
      origin,
      media_url: media_url.into(),
    }
  }

  /// Builds a context from an origin string such as `http://localhost:8000`.
  pub fn from_origin(origin: &str, media_url: impl Into<String>) -> StoreResult<Self> {
    let origin = Url::parse(origin).map_err(|e| StoreError::validation("origin", e.to_string()))?;
    Ok(Self::new(origin, media_url))
  }
}

pub(crate) fn check_max_length(field: &str, value: &str, max: usize) -> StoreResult<()> {
  if value.chars().count() > max {
    return Err(StoreError::validation(
      field,
      format!("Ensure this field has no more than {} characters.", max),
    ));
  }
  Ok(())
}

pub(crate) fn check_optional_max_length(field: &str, value: Option<&str>, max: usize) -> StoreResult<()> {
  match value {
    Some(v) => check_max_length(field, v, max),
    None => Ok(()),
  }
}

pub(crate) fn check_required(field: &str, value: &str, max: usize) -> StoreResult<()> {
  if value.trim().is_empty() {
    return Err(StoreError::validation(field, "This field may not be blank."));
  }
  check_max_length(field, value, max)
}
