mod auth;
mod handlers;
mod insight;
mod stream;

use std::{net::SocketAddr, sync::Arc};

use async_trait::async_trait;
use axum::{
  Router,
  extract::DefaultBodyLimit,
  routing::{get, post},
};
use tower::ServiceBuilder;
use tower_governor::{GovernorLayer, governor::GovernorConfigBuilder};
use tower_http::{
  cors::{Any, CorsLayer},
  trace::TraceLayer,
};

use crate::{prelude::*, state::AppState};

/// Room for the JSON fields around the base64 image.
const IMAGE_ENVELOPE_BYTES: usize = 64 * 1024;

/// Request body limit that still admits an image of `max_image_bytes`.
fn image_body_limit(max_image_bytes: usize) -> usize {
  max_image_bytes
    .div_ceil(3)
    .saturating_mul(4)
    .saturating_add(IMAGE_ENVELOPE_BYTES)
}

pub fn router(app: Arc<AppState>) -> Router {
  let image_limit = image_body_limit(app.config.ai.max_image_bytes);

  Router::new()
    .route("/health", get(handlers::health))
    .route("/api/stats", get(handlers::stats))
    .route(
      "/api/claims",
      get(handlers::claim_history).post(handlers::claim),
    )
    .route("/api/claims/today", get(handlers::claim_status))
    .route(
      "/api/activities",
      get(handlers::activities).post(handlers::log_activity),
    )
    .route("/api/activities/stream", get(stream::activities))
    .route("/api/achievements", get(handlers::achievements))
    .route("/api/analyses", get(handlers::analyses))
    .route("/api/alerts", get(handlers::alerts).post(handlers::create_alert))
    .route("/api/alerts/{id}/read", post(handlers::read_alert))
    .route(
      "/api/profile",
      get(handlers::profile).patch(handlers::update_profile),
    )
    .route("/api/ai/symptoms", post(insight::symptoms))
    .route(
      "/api/ai/image",
      post(insight::image).layer(DefaultBodyLimit::max(image_limit)),
    )
    .route("/api/ai/nutrition", post(insight::nutrition))
    .route("/api/ai/recommendations", post(insight::recommendations))
    .with_state(app)
}

pub struct Plugin;

#[async_trait]
impl super::Plugin for Plugin {
  fn name(&self) -> &'static str {
    "http"
  }

  async fn start(&self, app: Arc<AppState>) -> anyhow::Result<()> {
    let governor_conf = Arc::new(
      GovernorConfigBuilder::default()
        .per_second(2)
        .burst_size(100)
        .finish()
        .context("Failed to build rate limiter config")?,
    );

    let limiter = governor_conf.limiter().clone();
    let addr = SocketAddr::from(([0, 0, 0, 0], app.config.port));

    let router = router(app)
      .layer(
        ServiceBuilder::new()
          .layer(TraceLayer::new_for_http())
          .layer(GovernorLayer::new(governor_conf))
          .layer(
            CorsLayer::new()
              .allow_origin(Any)
              .allow_methods(Any)
              .allow_headers(Any),
          ),
      )
      .into_make_service_with_connect_info::<SocketAddr>();

    let listener = tokio::net::TcpListener::bind(addr)
      .await
      .with_context(|| format!("Failed to bind {addr}"))?;
    info!("HTTP server listening on {addr}");

    let limiter = async {
      loop {
        time::sleep(Duration::from_secs(60)).await;
        limiter.retain_recent();
      }
    };

    let server = async {
      axum::serve(listener, router).await.context("Axum server error")
    };

    tokio::select! {
      result = server => {
        match &result {
          Ok(_) => info!("Server stopped gracefully"),
          Err(err) => error!("Server stopped with error: {err}"),
        }
        result
      }
      _ = limiter => {
        error!("Rate limiter cleaner stopped unexpectedly!");
        Ok(())
      }
    }
  }
}
