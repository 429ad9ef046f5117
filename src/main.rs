//! Wellness rewards server
//!
//! Architecture:
//! - SeaORM for database access (SQLite by default)
//! - Axum for the HTTP API, rate limited per client IP
//! - Daily reward claims, streaks and levels computed server-side
//! - Generative-AI features proxied so the API key never leaves the server

mod ai;
mod config;
mod entity;
mod error;
mod feed;
mod game;
mod plugins;
mod prelude;
mod state;
mod sv;

use std::sync::Arc;

use tracing_subscriber::{
  EnvFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::{config::Config, prelude::*, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  dotenvy::dotenv().ok();

  tracing_subscriber::registry()
    .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
      "wellness=debug,tower_http=debug,sea_orm=warn".into()
    }))
    .with(tracing_subscriber::fmt::layer())
    .init();

  let config = Config::from_env()?;

  info!("Starting wellness server v{}", env!("CARGO_PKG_VERSION"));
  if config.ai.api_key.is_none() {
    warn!("GEMINI_API_KEY not set, AI endpoints will answer 502");
  }

  let app = Arc::new(AppState::new(config).await?);

  plugins::App::new()
    .register(plugins::server::Plugin)
    .register(plugins::streaks::Plugin)
    .run(app)
    .await;

  tokio::signal::ctrl_c().await.context("Failed to listen for ctrl-c")?;
  info!("Shutting down");

  Ok(())
}
