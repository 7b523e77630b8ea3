// core/src/auth.rs

//! Password hashing and verification for stored users.

use crate::error::StoreError;
use argon2::{
  password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
  Argon2,
};
use tracing::{debug, error, instrument};

/// Hashes a plain-text password using Argon2 with a fresh random salt.
#[instrument(name = "auth::hash_password", skip(password), err(Display))]
pub fn hash_password(password: &str) -> Result<String, StoreError> {
  if password.is_empty() {
    return Err(StoreError::validation("password", "This field may not be blank."));
  }

  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|hash| hash.to_string())
    .map_err(|argon_err| {
      error!(error = %argon_err, "Argon2 password hashing failed.");
      StoreError::Password(argon_err.to_string())
    })
}

/// Verifies a plain-text password against a stored Argon2 hash.
///
/// Returns `Ok(false)` on a mismatch; an unparsable stored hash is an error.
#[instrument(name = "auth::verify_password", skip_all, err(Display))]
pub fn verify_password(stored_hash: &str, provided_password: &str) -> Result<bool, StoreError> {
  if provided_password.is_empty() {
    return Ok(false);
  }

  let parsed_hash = PasswordHash::new(stored_hash).map_err(|parse_err| {
    error!(error = %parse_err, "Failed to parse stored password hash string.");
    StoreError::Password(format!("Invalid stored password hash format: {}", parse_err))
  })?;

  match Argon2::default().verify_password(provided_password.as_bytes(), &parsed_hash) {
    Ok(()) => Ok(true),
    Err(argon2::password_hash::Error::Password) => {
      debug!("Password verification failed: passwords do not match.");
      Ok(false)
    }
    Err(other) => {
      error!(error = %other, "Argon2 password verification encountered an error.");
      Err(StoreError::Password(other.to_string()))
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn hash_then_verify() {
    let hash = hash_password("s3cret!").unwrap();
    assert!(hash.starts_with("$argon2"));
    assert!(verify_password(&hash, "s3cret!").unwrap());
    assert!(!verify_password(&hash, "wrong").unwrap());
    assert!(!verify_password(&hash, "").unwrap());
  }

  #[test]
  fn empty_password_is_rejected() {
    assert!(hash_password("").unwrap_err().is_validation());
  }

  #[test]
  fn garbage_hash_is_an_error() {
    assert!(matches!(verify_password("not-a-hash", "pw"), Err(StoreError::Password(_))));
  }
}
