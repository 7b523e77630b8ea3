// core/src/decimal.rs

//! Fixed-precision amounts with two fractional digits.
//!
//! Prices and ratings are `Decimal2` values. On the wire they render as
//! strings (`"89.99"`); in SQLite they are stored as INTEGER hundredths so the
//! value read back is exactly the value written.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::sqlite::SqliteTypeInfo;
use sqlx::{Database, Decode, Encode, Sqlite, Type};

use crate::error::{StoreError, StoreResult};

/// Number of fractional digits every stored amount carries.
pub const DECIMAL_PLACES: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Decimal2(Decimal);

impl Decimal2 {
  pub fn zero() -> Self {
    Decimal2(Decimal::new(0, DECIMAL_PLACES))
  }

  pub fn from_hundredths(hundredths: i64) -> Self {
    Decimal2(Decimal::new(hundredths, DECIMAL_PLACES))
  }

  /// Scale is pinned to `DECIMAL_PLACES` and magnitude is bounded by the
  /// column's digit limit, so the mantissa always fits in an i64.
  pub fn hundredths(&self) -> i64 {
    self.0.mantissa() as i64
  }

  pub fn as_decimal(&self) -> Decimal {
    self.0
  }

  /// Rounds a computed value (e.g. an average) half-up to two places.
  pub fn rounded(value: Decimal) -> Self {
    let mut d = value.round_dp_with_strategy(DECIMAL_PLACES, rust_decimal::RoundingStrategy::MidpointAwayFromZero);
    d.rescale(DECIMAL_PLACES);
    Decimal2(d)
  }

  /// Validates client input against a `decimal(max_digits, 2)` column.
  pub fn parse_field(field: &str, value: Decimal, max_digits: u32) -> StoreResult<Self> {
    let normalized = value.normalize();
    if normalized.scale() > DECIMAL_PLACES {
      return Err(StoreError::validation(
        field,
        format!("Ensure that there are no more than {} decimal places.", DECIMAL_PLACES),
      ));
    }

    let max_whole_digits = max_digits.saturating_sub(DECIMAL_PLACES);
    let limit = Decimal::from(10i64.pow(max_whole_digits));
    if normalized.abs().trunc() >= limit {
      return Err(StoreError::validation(
        field,
        format!(
          "Ensure that there are no more than {} digits before the decimal point.",
          max_whole_digits
        ),
      ));
    }

    let mut d = normalized;
    d.rescale(DECIMAL_PLACES);
    Ok(Decimal2(d))
  }
}

impl Default for Decimal2 {
  fn default() -> Self {
    Decimal2::zero()
  }
}

impl fmt::Display for Decimal2 {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}

impl From<Decimal2> for Decimal {
  fn from(value: Decimal2) -> Self {
    value.0
  }
}

impl Type<Sqlite> for Decimal2 {
  fn type_info() -> SqliteTypeInfo {
    <i64 as Type<Sqlite>>::type_info()
  }

  fn compatible(ty: &SqliteTypeInfo) -> bool {
    <i64 as Type<Sqlite>>::compatible(ty)
  }
}

impl<'q> Encode<'q, Sqlite> for Decimal2 {
  fn encode_by_ref(&self, buf: &mut <Sqlite as Database>::ArgumentBuffer<'q>) -> Result<IsNull, BoxDynError> {
    <i64 as Encode<'q, Sqlite>>::encode_by_ref(&self.hundredths(), buf)
  }
}

impl<'r> Decode<'r, Sqlite> for Decimal2 {
  fn decode(value: <Sqlite as Database>::ValueRef<'r>) -> Result<Self, BoxDynError> {
    let raw = <i64 as Decode<'r, Sqlite>>::decode(value)?;
    Ok(Decimal2::from_hundredths(raw))
  }
}
