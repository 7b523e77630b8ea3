// server/src/web/handlers/user_handlers.rs

use actix_web::{web, HttpResponse};
use storefront::repo::users;
use storefront::serializers::{LoginInput, RegisterInput, UserRepr, UserWithTokenRepr};
use storefront::StoreError;
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::AuthenticatedUser;

#[instrument(name = "handler::register", skip(app_state, req_payload), fields(req_email = %req_payload.email))]
pub async fn register_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<RegisterInput>,
) -> Result<HttpResponse, AppError> {
  let new_user = req_payload.into_inner().into_new_user()?;
  let user = users::create(&app_state.db_pool, new_user).await.map_err(|e| match e {
    StoreError::UniqueViolation { .. } => {
      warn!("Registration for an email that is already taken.");
      AppError::BadRequest("User with this email already exists".to_string())
    }
    other => other.into(),
  })?;

  info!(user_id = user.id, "User registered.");
  let body = UserWithTokenRepr::from_model(&user, app_state.token_issuer.as_ref())?;
  Ok(HttpResponse::Created().json(body))
}

#[instrument(name = "handler::login", skip(app_state, req_payload), fields(username = %req_payload.username))]
pub async fn login_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<LoginInput>,
) -> Result<HttpResponse, AppError> {
  let LoginInput { username, password } = req_payload.into_inner();
  let user = users::authenticate(&app_state.db_pool, &username, &password).await?;
  info!(user_id = user.id, "Signin successful.");
  let body = UserWithTokenRepr::from_model(&user, app_state.token_issuer.as_ref())?;
  Ok(HttpResponse::Ok().json(body))
}

#[instrument(name = "handler::profile", skip(app_state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn profile_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let user = auth_user.load(&app_state).await?;
  Ok(HttpResponse::Ok().json(UserRepr::from_model(&user)))
}
