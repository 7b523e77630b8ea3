// core/src/models/user.rs

use std::fmt;

use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct User {
  pub id: i64,
  pub username: String,
  pub email: String,
  pub first_name: String,
  pub last_name: String,
  pub is_staff: bool,
  // Never rendered; representations are built in `serializers::user`.
  pub password_hash: String,
  pub date_joined: DateTime<Utc>,
}

/// Input for creating a user. The password is hashed before insert.
#[derive(Debug, Clone, Default)]
pub struct NewUser {
  pub username: String,
  pub email: String,
  pub first_name: String,
  pub last_name: String,
  pub is_staff: bool,
  pub password: String,
}

impl fmt::Display for User {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.username)
  }
}
