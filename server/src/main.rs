// server/src/main.rs

use actix_web::middleware::{NormalizePath, TrailingSlash};
use actix_web::{web as actix_data, App, HttpServer};
use anyhow::Context;
use storefront_server::{web, AppConfig, AppState};
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO)
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE)
    .init();

  tracing::info!("Starting storefront server...");

  let app_config = AppConfig::from_env().context("loading configuration")?;

  let db_pool = storefront::connect_and_migrate(&app_config.database_url)
    .await
    .context("opening and migrating the database")?;
  tracing::info!("Database ready.");

  let server_address = format!("{}:{}", app_config.server_host, app_config.server_port);
  let app_state = AppState::new(db_pool, app_config);

  tracing::info!("Attempting to bind server to {}...", server_address);
  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone()))
      .wrap(NormalizePath::new(TrailingSlash::Always))
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(web::configure_app_routes)
  })
  .bind(&server_address)
  .with_context(|| format!("binding {}", server_address))?
  .run()
  .await?;

  Ok(())
}
