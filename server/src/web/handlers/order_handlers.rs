// server/src/web/handlers/order_handlers.rs

use actix_web::{web, HttpResponse};
use storefront::models::{Order, User};
use storefront::repo::orders;
use storefront::serializers::{OrderInput, OrderRepr};
use storefront::DbPool;
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::AuthenticatedUser;

async fn render_many(pool: &DbPool, list: Vec<Order>) -> Result<Vec<OrderRepr>, AppError> {
  let mut rendered = Vec::with_capacity(list.len());
  for order in list {
    let detail = orders::into_detail(pool, order).await?;
    rendered.push(OrderRepr::from_detail(&detail));
  }
  Ok(rendered)
}

fn ensure_owner_or_staff(order: &Order, user: &User) -> Result<(), AppError> {
  if user.is_staff || order.user_id == Some(user.id) {
    return Ok(());
  }
  warn!(order_id = order.id, user_id = user.id, "Order access denied.");
  Err(AppError::Forbidden("Not authorized to view this order".to_string()))
}

#[instrument(name = "handler::list_orders", skip(app_state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn list_orders_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  auth_user.load_staff(&app_state).await?;
  let all = orders::list_all(&app_state.db_pool).await?;
  Ok(HttpResponse::Ok().json(render_many(&app_state.db_pool, all).await?))
}

#[instrument(name = "handler::add_order_items", skip(app_state, req_payload, auth_user), fields(user_id = auth_user.user_id))]
pub async fn add_order_items_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<OrderInput>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let user = auth_user.load(&app_state).await?;
  let request = req_payload.into_inner().into_place_order()?;
  let detail = orders::place(&app_state.db_pool, &user, request, &app_state.config.media_url).await?;
  info!(order_id = detail.order.id, "Order created.");
  Ok(HttpResponse::Created().json(OrderRepr::from_detail(&detail)))
}

#[instrument(name = "handler::my_orders", skip(app_state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn my_orders_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let user = auth_user.load(&app_state).await?;
  let mine = orders::list_for_user(&app_state.db_pool, user.id).await?;
  Ok(HttpResponse::Ok().json(render_many(&app_state.db_pool, mine).await?))
}

#[instrument(name = "handler::get_order", skip(app_state, path, auth_user), fields(order_id = %path.as_ref(), user_id = auth_user.user_id))]
pub async fn get_order_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let user = auth_user.load(&app_state).await?;
  let detail = orders::load_detail(&app_state.db_pool, path.into_inner()).await?;
  ensure_owner_or_staff(&detail.order, &user)?;
  Ok(HttpResponse::Ok().json(OrderRepr::from_detail(&detail)))
}

#[instrument(name = "handler::pay_order", skip(app_state, path, auth_user), fields(order_id = %path.as_ref(), user_id = auth_user.user_id))]
pub async fn pay_order_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let user = auth_user.load(&app_state).await?;
  let order = orders::get(&app_state.db_pool, path.into_inner()).await?;
  ensure_owner_or_staff(&order, &user)?;
  let order = orders::mark_paid(&app_state.db_pool, order.id, &user).await?;
  let detail = orders::into_detail(&app_state.db_pool, order).await?;
  Ok(HttpResponse::Ok().json(OrderRepr::from_detail(&detail)))
}

#[instrument(name = "handler::deliver_order", skip(app_state, path, auth_user), fields(order_id = %path.as_ref(), user_id = auth_user.user_id))]
pub async fn deliver_order_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let staff = auth_user.load_staff(&app_state).await?;
  let order = orders::mark_delivered(&app_state.db_pool, path.into_inner(), &staff).await?;
  let detail = orders::into_detail(&app_state.db_pool, order).await?;
  Ok(HttpResponse::Ok().json(OrderRepr::from_detail(&detail)))
}
