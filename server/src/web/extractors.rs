// server/src/web/extractors.rs

use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use storefront::models::User;
use storefront::repo::users;
use storefront::{SerializerContext, StoreError};
use tracing::warn;

use crate::errors::AppError;
use crate::state::AppState;

/// Caller identified by a valid `Authorization: Bearer <token>` header.
///
/// Only the token is checked here; handlers that need the user row call
/// [`AuthenticatedUser::load`].
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
  pub user_id: i64,
}

impl AuthenticatedUser {
  /// Fetches the caller's row. A token for a deleted user is rejected as
  /// unauthenticated rather than reported as a missing resource.
  pub async fn load(&self, state: &AppState) -> Result<User, AppError> {
    match users::get(&state.db_pool, self.user_id).await {
      Ok(user) => Ok(user),
      Err(StoreError::NotFound { .. }) => {
        warn!(user_id = self.user_id, "Valid token for a user that no longer exists.");
        Err(AppError::Auth("User not found".to_string()))
      }
      Err(e) => Err(e.into()),
    }
  }

  /// Like [`load`](Self::load) but also requires the staff flag.
  pub async fn load_staff(&self, state: &AppState) -> Result<User, AppError> {
    let user = self.load(state).await?;
    if !user.is_staff {
      return Err(AppError::Forbidden(
        "You do not have permission to perform this action.".to_string(),
      ));
    }
    Ok(user)
  }
}

impl FromRequest for AuthenticatedUser {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
    ready(authenticate(req))
  }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, AppError> {
  let state = req
    .app_data::<web::Data<AppState>>()
    .ok_or_else(|| AppError::Internal("AppState is not registered".to_string()))?;

  let header = req
    .headers()
    .get(actix_web::http::header::AUTHORIZATION)
    .and_then(|value| value.to_str().ok())
    .ok_or_else(|| AppError::Auth("Authentication credentials were not provided.".to_string()))?;

  let token = header
    .strip_prefix("Bearer ")
    .map(str::trim)
    .filter(|t| !t.is_empty())
    .ok_or_else(|| {
      warn!("Authorization header without a bearer token.");
      AppError::Auth("Authorization header must contain two space-delimited values".to_string())
    })?;

  let claims = state.token_issuer.verify_access_token(token)?;
  Ok(AuthenticatedUser {
    user_id: claims.user_id,
  })
}

/// Origin of the inbound request plus the configured media prefix.
pub fn serializer_context(req: &HttpRequest, state: &AppState) -> Result<SerializerContext, AppError> {
  let info = req.connection_info();
  let origin = format!("{}://{}", info.scheme(), info.host());
  Ok(SerializerContext::from_origin(&origin, state.config.media_url.clone())?)
}
