// core/src/error.rs
use sqlx::error::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
  #[error("Invalid value for '{field}': {message}")]
  Validation { field: String, message: String },

  #[error("Uniqueness violated: {constraint}")]
  UniqueViolation { constraint: String },

  #[error("Required field missing: {detail}")]
  MissingField { detail: String },

  #[error("{entity} with id {id} not found")]
  NotFound { entity: &'static str, id: i64 },

  #[error("Authentication failed: {0}")]
  Auth(String),

  #[error("Database error: {source}")]
  Database {
    #[source]
    source: sqlx::Error,
  },

  #[error("Migration error: {0}")]
  Migrate(#[from] sqlx::migrate::MigrateError),

  #[error("Token error: {0}")]
  Token(#[from] jsonwebtoken::errors::Error),

  #[error("Password hashing error: {0}")]
  Password(String),
}

impl StoreError {
  pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
    StoreError::Validation {
      field: field.into(),
      message: message.into(),
    }
  }

  /// Constraint violations that the caller should report as bad input
  /// rather than as a server fault.
  pub fn is_validation(&self) -> bool {
    matches!(
      self,
      StoreError::Validation { .. } | StoreError::UniqueViolation { .. } | StoreError::MissingField { .. }
    )
  }
}

// Classifies storage-engine constraint failures so callers never have to
// inspect raw sqlx errors.
impl From<sqlx::Error> for StoreError {
  fn from(err: sqlx::Error) -> Self {
    if let sqlx::Error::Database(db_err) = &err {
      match db_err.kind() {
        ErrorKind::UniqueViolation => {
          return StoreError::UniqueViolation {
            constraint: db_err.message().to_string(),
          };
        }
        ErrorKind::NotNullViolation => {
          return StoreError::MissingField {
            detail: db_err.message().to_string(),
          };
        }
        ErrorKind::ForeignKeyViolation => {
          return StoreError::validation("reference", db_err.message());
        }
        _ => {}
      }
    }
    StoreError::Database { source: err }
  }
}

pub type StoreResult<T, E = StoreError> = std::result::Result<T, E>;
