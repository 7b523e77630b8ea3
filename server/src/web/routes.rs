// server/src/web/routes.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::instrument;

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::handlers::{order_handlers, product_handlers, user_handlers};

#[instrument(name = "handler::health_check", skip(app_state))]
async fn health_check_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  sqlx::query("SELECT 1")
    .execute(&app_state.db_pool)
    .await
    .map_err(|e| AppError::Internal(format!("database unreachable: {}", e)))?;
  Ok(HttpResponse::Ok().json(json!({ "status": "ok" })))
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  // Malformed JSON bodies get the same `{"detail": ...}` shape as every other error.
  cfg.app_data(
    web::JsonConfig::default().error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
  );
  cfg.app_data(
    web::QueryConfig::default().error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
  );

  cfg.service(
    web::scope("/api")
      .route("/health/", web::get().to(health_check_handler))
      .service(
        web::scope("/products")
          .route("/", web::get().to(product_handlers::list_products_handler))
          .route("/{product_id}/", web::get().to(product_handlers::get_product_handler))
          .route(
            "/{product_id}/reviews/",
            web::get().to(product_handlers::list_reviews_handler),
          )
          .route(
            "/{product_id}/reviews/",
            web::post().to(product_handlers::create_review_handler),
          ),
      )
      .service(
        web::scope("/users")
          .route("/register/", web::post().to(user_handlers::register_handler))
          .route("/login/", web::post().to(user_handlers::login_handler))
          .route("/profile/", web::get().to(user_handlers::profile_handler)),
      )
      .service(
        web::scope("/orders")
          .route("/", web::get().to(order_handlers::list_orders_handler))
          .route("/", web::post().to(order_handlers::add_order_items_handler))
          // Must precede `/{order_id}/`.
          .route("/myorders/", web::get().to(order_handlers::my_orders_handler))
          .route("/{order_id}/", web::get().to(order_handlers::get_order_handler))
          .route("/{order_id}/pay/", web::put().to(order_handlers::pay_order_handler))
          .route(
            "/{order_id}/deliver/",
            web::put().to(order_handlers::deliver_order_handler),
          ),
      ),
  );
}
