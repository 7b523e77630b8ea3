// tests/api_tests.rs
#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use common::*;
use serde_json::{json, Value};
use storefront::repo::{orders, products, users};

#[actix_rt::test]
async fn test_health_check() {
  setup_tracing();
  let state = test_state().await;
  let app = init_app!(state);

  let resp = test::call_service(&app, test::TestRequest::get().uri("/api/health").to_request()).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body, json!({ "status": "ok" }));
}

#[actix_rt::test]
async fn test_product_list_and_detail_use_client_field_names() {
  setup_tracing();
  let state = test_state().await;
  let app = init_app!(state);
  let lamp = make_product(&state, "Desk Lamp", 3499, 2).await;
  make_product(&state, "Chair", 8900, 0).await;

  let resp = test::call_service(&app, test::TestRequest::get().uri("/api/products/").to_request()).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body.as_array().map(Vec::len), Some(2));
  assert_eq!(body[0]["productname"], json!("Chair"));

  let req = test::TestRequest::get().uri("/api/products/?keyword=lamp").to_request();
  let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
  assert_eq!(body.as_array().map(Vec::len), Some(1));

  let req = test::TestRequest::get()
    .uri(&format!("/api/products/{}/", lamp.id))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["_id"], json!(lamp.id));
  assert_eq!(body["price"], json!("34.99"));
  assert_eq!(body["stockcount"], json!(2));
  assert_eq!(body["numReviews"], json!(0));
  assert_eq!(body["rating"], json!("0.00"));
  let image = body["image"].as_str().unwrap_or_default();
  assert!(image.starts_with("http://"), "image was {}", image);
  assert!(image.ends_with("/media/products/placeholder.png"), "image was {}", image);
}

#[actix_rt::test]
async fn test_missing_product_is_404_with_detail() {
  setup_tracing();
  let state = test_state().await;
  let app = init_app!(state);

  let resp = test::call_service(&app, test::TestRequest::get().uri("/api/products/404/").to_request()).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body, json!({ "detail": "Not found." }));
}

#[actix_rt::test]
async fn test_register_then_login_then_profile() {
  setup_tracing();
  let state = test_state().await;
  let app = init_app!(state);

  let req = test::TestRequest::post()
    .uri("/api/users/register/")
    .set_json(json!({ "name": "Wendy", "email": "wendy@example.com", "password": "pa55word" }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let registered: Value = test::read_body_json(resp).await;
  assert_eq!(registered["username"], json!("wendy@example.com"));
  assert_eq!(registered["name"], json!("Wendy "));
  assert_eq!(registered["isAdmin"], json!(false));
  assert_eq!(registered["id"], registered["_id"]);
  assert!(registered["token"].is_string());

  let again = test::TestRequest::post()
    .uri("/api/users/register/")
    .set_json(json!({ "name": "Other", "email": "wendy@example.com", "password": "x" }))
    .to_request();
  let resp = test::call_service(&app, again).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["detail"], json!("User with this email already exists"));

  let req = test::TestRequest::post()
    .uri("/api/users/login/")
    .set_json(json!({ "username": "wendy@example.com", "password": "pa55word" }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let logged_in: Value = test::read_body_json(resp).await;
  let token = logged_in["token"].as_str().unwrap_or_default().to_string();

  let req = test::TestRequest::get()
    .uri("/api/users/profile/")
    .insert_header(("Authorization", format!("Bearer {}", token)))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let profile: Value = test::read_body_json(resp).await;
  assert_eq!(profile["email"], json!("wendy@example.com"));
  assert!(profile.get("token").is_none());
}

#[actix_rt::test]
async fn test_login_with_bad_credentials_is_401() {
  setup_tracing();
  let state = test_state().await;
  let app = init_app!(state);
  make_user(&state, "xena", false).await;

  let req = test::TestRequest::post()
    .uri("/api/users/login/")
    .set_json(json!({ "username": "xena", "password": "wrong" }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["detail"], json!("No active account found with the given credentials"));
}

#[actix_rt::test]
async fn test_protected_routes_require_a_valid_token() {
  setup_tracing();
  let state = test_state().await;
  let app = init_app!(state);

  let resp = test::call_service(&app, test::TestRequest::get().uri("/api/users/profile/").to_request()).await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

  let req = test::TestRequest::get()
    .uri("/api/orders/myorders/")
    .insert_header(("Authorization", "Bearer not.a.token"))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["detail"], json!("Given token not valid for any token type"));

  // A token for a user that has since been deleted.
  let ghost = make_user(&state, "ghost", false).await;
  let header = bearer(&state, &ghost);
  users::delete(&state.db_pool, ghost.id).await.unwrap();
  let req = test::TestRequest::get()
    .uri("/api/users/profile/")
    .insert_header(header)
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_review_flow_over_http() {
  setup_tracing();
  let state = test_state().await;
  let app = init_app!(state);
  let user = make_user(&state, "yara", false).await;
  let product = make_product(&state, "Kettle", 2999, 3).await;
  let uri = format!("/api/products/{}/reviews/", product.id);

  let req = test::TestRequest::post()
    .uri(&uri)
    .insert_header(bearer(&state, &user))
    .set_json(json!({ "rating": 0, "comment": "meh" }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["detail"], json!("Please select a rating"));

  let req = test::TestRequest::post()
    .uri(&uri)
    .insert_header(bearer(&state, &user))
    .set_json(json!({ "rating": 4, "comment": "Boils fast" }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let review: Value = test::read_body_json(resp).await;
  assert_eq!(review["rating"], json!(4));
  assert_eq!(review["product"], json!(product.id));

  let req = test::TestRequest::post()
    .uri(&uri)
    .insert_header(bearer(&state, &user))
    .set_json(json!({ "rating": 5 }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["detail"], json!("Product already reviewed"));

  let body: Value =
    test::read_body_json(test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await).await;
  assert_eq!(body.as_array().map(Vec::len), Some(1));

  let product = products::get(&state.db_pool, product.id).await.unwrap();
  assert_eq!(product.num_reviews, Some(1));
  assert_eq!(product.rating.map(|r| r.to_string()), Some("4.00".to_string()));
}

#[actix_rt::test]
async fn test_order_lifecycle_over_http() {
  setup_tracing();
  let state = test_state().await;
  let app = init_app!(state);
  let buyer = make_user(&state, "zoe", false).await;
  let stranger = make_user(&state, "eve", false).await;
  let admin = make_staff_user(&state).await;
  let product = make_product(&state, "Backpack", 4500, 5).await;

  let req = test::TestRequest::post()
    .uri("/api/orders/")
    .insert_header(bearer(&state, &buyer))
    .set_json(json!({ "orderItems": [] }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["detail"], json!("No Order Items"));

  let req = test::TestRequest::post()
    .uri("/api/orders/")
    .insert_header(bearer(&state, &buyer))
    .set_json(json!({
      "orderItems": [{ "product": product.id, "qty": 2 }],
      "shippingAddress": { "address": "9 Oak Ave", "city": "Austin", "postalCode": "73301", "country": "US" },
      "paymentMethod": "PayPal",
      "taxPrice": "7.20",
      "shippingPrice": "0.00"
    }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let order: Value = test::read_body_json(resp).await;
  assert_eq!(order["user"], json!("zoe"));
  assert_eq!(order["itemsPrice"], json!("90.00"));
  assert_eq!(order["totalPrice"], json!("97.20"));
  assert_eq!(order["orderItems"][0]["name"], json!("Backpack"));
  assert_eq!(order["shippingAddress"]["city"], json!("Austin"));
  let order_id = order["id"].as_i64().unwrap_or_default();
  assert_eq!(products::get(&state.db_pool, product.id).await.unwrap().stock_count, Some(3));

  // Owner and staff can read it, others cannot.
  let detail_uri = format!("/api/orders/{}/", order_id);
  let req = test::TestRequest::get()
    .uri(&detail_uri)
    .insert_header(bearer(&state, &stranger))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);
  let req = test::TestRequest::get()
    .uri(&detail_uri)
    .insert_header(bearer(&state, &admin))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

  let req = test::TestRequest::get()
    .uri("/api/orders/myorders/")
    .insert_header(bearer(&state, &buyer))
    .to_request();
  let mine: Value = test::read_body_json(test::call_service(&app, req).await).await;
  assert_eq!(mine.as_array().map(Vec::len), Some(1));

  let req = test::TestRequest::get()
    .uri("/api/orders/")
    .insert_header(bearer(&state, &buyer))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);
  let req = test::TestRequest::get()
    .uri("/api/orders/")
    .insert_header(bearer(&state, &admin))
    .to_request();
  let all: Value = test::read_body_json(test::call_service(&app, req).await).await;
  assert_eq!(all.as_array().map(Vec::len), Some(1));

  let req = test::TestRequest::put()
    .uri(&format!("/api/orders/{}/pay/", order_id))
    .insert_header(bearer(&state, &buyer))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let paid: Value = test::read_body_json(resp).await;
  assert_eq!(paid["isPaid"], json!(true));
  assert!(paid["paidAt"].is_string());

  let deliver_uri = format!("/api/orders/{}/deliver/", order_id);
  let req = test::TestRequest::put()
    .uri(&deliver_uri)
    .insert_header(bearer(&state, &buyer))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);
  let req = test::TestRequest::put()
    .uri(&deliver_uri)
    .insert_header(bearer(&state, &admin))
    .to_request();
  let delivered: Value = test::read_body_json(test::call_service(&app, req).await).await;
  assert_eq!(delivered["isDelivered"], json!(true));
  assert_eq!(delivered["updatedBy"], json!("admin"));

  let stored = orders::get(&state.db_pool, order_id).await.unwrap();
  assert!(stored.is_paid && stored.is_delivered);
}

#[actix_rt::test]
async fn test_routes_accept_paths_without_trailing_slash() {
  setup_tracing();
  let state = test_state().await;
  let app = init_app!(state);
  let buyer = make_user(&state, "ivy", false).await;
  let product = make_product(&state, "Kettle", 2999, 4).await;

  let resp = test::call_service(&app, test::TestRequest::get().uri("/api/products?keyword=kettle").to_request()).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body[0]["productname"], json!("Kettle"));

  let req = test::TestRequest::post()
    .uri("/api/orders")
    .insert_header(bearer(&state, &buyer))
    .set_json(json!({
      "orderItems": [{ "product": product.id, "qty": 1 }],
      "shippingAddress": { "address": "3 Elm St", "city": "Boston", "postalCode": "02101", "country": "US" },
      "paymentMethod": "PayPal",
      "taxPrice": "0.00",
      "shippingPrice": "0.00"
    }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let order: Value = test::read_body_json(resp).await;
  let order_id = order["id"].as_i64().unwrap_or_default();

  let req = test::TestRequest::get()
    .uri(&format!("/api/orders/{}", order_id))
    .insert_header(bearer(&state, &buyer))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["id"], json!(order_id));
  assert_eq!(body["orderItems"][0]["name"], json!("Kettle"));
}

#[actix_rt::test]
async fn test_malformed_json_gets_detail_body() {
  setup_tracing();
  let state = test_state().await;
  let app = init_app!(state);

  let req = test::TestRequest::post()
    .uri("/api/users/login/")
    .insert_header(("Content-Type", "application/json"))
    .set_payload("{not json")
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert!(body["detail"].is_string());
}

async fn make_staff_user(state: &storefront_server::AppState) -> storefront::models::User {
  make_user(state, "admin", true).await
}
