// core/src/repo/users.rs

use chrono::Utc;
use sqlx::SqliteExecutor;
use tracing::{info, instrument, warn};

use crate::auth;
use crate::error::{StoreError, StoreResult};
use crate::models::{NewUser, User};
use crate::repo::not_found;

const USER_COLUMNS: &str = "id, username, email, first_name, last_name, is_staff, password_hash, date_joined";

/// Inserts a user, hashing the password first. A taken username fails with
/// `StoreError::UniqueViolation`.
#[instrument(name = "repo::users::create", skip(executor, new_user), fields(username = %new_user.username), err(Display))]
pub async fn create<'e, E>(executor: E, new_user: NewUser) -> StoreResult<User>
where
  E: SqliteExecutor<'e>,
{
  if new_user.username.trim().is_empty() {
    return Err(StoreError::validation("username", "This field may not be blank."));
  }
  let password_hash = auth::hash_password(&new_user.password)?;

  let sql = format!(
    "INSERT INTO users (username, email, first_name, last_name, is_staff, password_hash, date_joined) \
     VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING {}",
    USER_COLUMNS
  );
  let user = sqlx::query_as::<_, User>(&sql)
    .bind(&new_user.username)
    .bind(&new_user.email)
    .bind(&new_user.first_name)
    .bind(&new_user.last_name)
    .bind(new_user.is_staff)
    .bind(&password_hash)
    .bind(Utc::now())
    .fetch_one(executor)
    .await?;

  info!(user_id = user.id, "User created.");
  Ok(user)
}

pub async fn find<'e, E>(executor: E, id: i64) -> StoreResult<Option<User>>
where
  E: SqliteExecutor<'e>,
{
  let sql = format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS);
  Ok(sqlx::query_as::<_, User>(&sql).bind(id).fetch_optional(executor).await?)
}

pub async fn get<'e, E>(executor: E, id: i64) -> StoreResult<User>
where
  E: SqliteExecutor<'e>,
{
  find(executor, id).await?.ok_or_else(|| not_found("User", id))
}

pub async fn find_by_username<'e, E>(executor: E, username: &str) -> StoreResult<Option<User>>
where
  E: SqliteExecutor<'e>,
{
  let sql = format!("SELECT {} FROM users WHERE username = ?", USER_COLUMNS);
  Ok(
    sqlx::query_as::<_, User>(&sql)
      .bind(username)
      .fetch_optional(executor)
      .await?,
  )
}

/// Returns the user iff `password` matches the stored hash. Unknown users and
/// wrong passwords produce the same error.
#[instrument(name = "repo::users::authenticate", skip(executor, password), err(Display))]
pub async fn authenticate<'e, E>(executor: E, username: &str, password: &str) -> StoreResult<User>
where
  E: SqliteExecutor<'e>,
{
  let rejected = || StoreError::Auth("No active account found with the given credentials".to_string());

  let Some(user) = find_by_username(executor, username).await? else {
    warn!("Login attempt for unknown username.");
    return Err(rejected());
  };
  if !auth::verify_password(&user.password_hash, password)? {
    warn!(user_id = user.id, "Login attempt with wrong password.");
    return Err(rejected());
  }
  Ok(user)
}

/// Deletes a user. Their products and orders survive with the owner cleared;
/// their reviews are deleted.
#[instrument(name = "repo::users::delete", skip(executor), err(Display))]
pub async fn delete<'e, E>(executor: E, id: i64) -> StoreResult<()>
where
  E: SqliteExecutor<'e>,
{
  let result = sqlx::query("DELETE FROM users WHERE id = ?").bind(id).execute(executor).await?;
  if result.rows_affected() == 0 {
    return Err(not_found("User", id));
  }
  info!(user_id = id, "User deleted.");
  Ok(())
}
