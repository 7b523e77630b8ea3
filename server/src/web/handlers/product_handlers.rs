// server/src/web/handlers/product_handlers.rs

use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use storefront::repo::products::{self, ProductFilter};
use storefront::repo::reviews;
use storefront::serializers::{ProductRepr, ReviewInput, ReviewRepr};
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::{serializer_context, AuthenticatedUser};

#[derive(Deserialize, Debug)]
pub struct ListProductsQuery {
  pub keyword: Option<String>,
}

#[instrument(name = "handler::list_products", skip(app_state, req))]
pub async fn list_products_handler(
  app_state: web::Data<AppState>,
  req: HttpRequest,
  query_params: web::Query<ListProductsQuery>,
) -> Result<HttpResponse, AppError> {
  let ctx = serializer_context(&req, &app_state)?;
  let filter = ProductFilter {
    keyword: query_params.into_inner().keyword,
    ..Default::default()
  };
  let products = products::list(&app_state.db_pool, &filter).await?;
  info!(count = products.len(), "Products fetched.");
  Ok(HttpResponse::Ok().json(ProductRepr::many(&products, &ctx)))
}

#[instrument(name = "handler::get_product", skip(app_state, req, path), fields(product_id = %path.as_ref()))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  req: HttpRequest,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  let ctx = serializer_context(&req, &app_state)?;
  let product = products::get(&app_state.db_pool, path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(ProductRepr::from_model(&product, &ctx)))
}

#[instrument(name = "handler::list_reviews", skip(app_state, path), fields(product_id = %path.as_ref()))]
pub async fn list_reviews_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  let product = products::get(&app_state.db_pool, path.into_inner()).await?;
  let reviews = reviews::list_for_product(&app_state.db_pool, product.id).await?;
  let body: Vec<ReviewRepr> = reviews.iter().map(ReviewRepr::from_model).collect();
  Ok(HttpResponse::Ok().json(body))
}

#[instrument(
  name = "handler::create_review",
  skip(app_state, path, req_payload, auth_user),
  fields(product_id = %path.as_ref(), user_id = auth_user.user_id)
)]
pub async fn create_review_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
  req_payload: web::Json<ReviewInput>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let user = auth_user.load(&app_state).await?;
  let input = req_payload.into_inner();
  let review = reviews::submit(&app_state.db_pool, path.into_inner(), &user, input.rating, input.comment).await?;
  Ok(HttpResponse::Created().json(ReviewRepr::from_model(&review)))
}
