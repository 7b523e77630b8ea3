// server/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use storefront::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error(transparent)]
  Store(#[from] StoreError),

  #[error("Bad Request: {0}")]
  BadRequest(String),

  #[error("Authentication Failed: {0}")]
  Auth(String),

  #[error("Forbidden: {0}")]
  Forbidden(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl AppError {
  /// Client-facing message placed in the `detail` field.
  fn detail(&self) -> String {
    match self {
      AppError::Store(store_err) => match store_err {
        StoreError::Validation { message, .. } => message.clone(),
        StoreError::UniqueViolation { constraint } => constraint.clone(),
        StoreError::MissingField { detail } => detail.clone(),
        StoreError::NotFound { .. } => "Not found.".to_string(),
        StoreError::Auth(m) => m.clone(),
        StoreError::Token(_) => "Given token not valid for any token type".to_string(),
        StoreError::Database { .. } | StoreError::Migrate(_) | StoreError::Password(_) => {
          "A server error occurred.".to_string()
        }
      },
      AppError::BadRequest(m) | AppError::Auth(m) | AppError::Forbidden(m) => m.clone(),
      AppError::Config(_) | AppError::Internal(_) => "A server error occurred.".to_string(),
    }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Store(store_err) if store_err.is_validation() => StatusCode::BAD_REQUEST,
      AppError::Store(StoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
      AppError::Store(StoreError::Auth(_) | StoreError::Token(_)) => StatusCode::UNAUTHORIZED,
      AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
      AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
      AppError::Auth(_) => StatusCode::UNAUTHORIZED,
      AppError::Forbidden(_) => StatusCode::FORBIDDEN,
      AppError::Config(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    if status.is_server_error() {
      tracing::error!(application_error = %self, "Responding with error");
    } else {
      tracing::warn!(application_error = %self, status = status.as_u16(), "Responding with error");
    }
    HttpResponse::build(status).json(json!({ "detail": self.detail() }))
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
