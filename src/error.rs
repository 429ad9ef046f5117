//! Error types for the wellness server

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};

#[derive(Debug, thiserror::Error)]
pub enum Ai {
  #[error("AI key is not configured")]
  NotConfigured,
  #[error("AI request failed: {0}")]
  Request(#[from] reqwest::Error),
  #[error("AI endpoint returned status {0}")]
  Status(u16),
  #[error("AI reply had no text")]
  EmptyReply,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("Database error: {0}")]
  Database(#[from] DbErr),

  #[error("Missing or invalid user id")]
  Unauthorized,

  #[error("Daily reward already claimed today")]
  AlreadyClaimed,

  #[error("{0} not found")]
  NotFound(&'static str),

  #[error("{0}")]
  Validation(String),

  #[error(transparent)]
  Ai(#[from] Ai),
}

impl Error {
  pub fn validation(message: impl Into<String>) -> Self {
    Self::Validation(message.into())
  }

  /// Maps a primary-key or unique violation to `AlreadyClaimed`.
  pub fn on_claim_conflict(err: DbErr) -> Self {
    match err.sql_err() {
      Some(SqlErr::UniqueConstraintViolation(_)) => Self::AlreadyClaimed,
      _ => Self::Database(err),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      Error::Database(err) => {
        tracing::error!("Database error: {err}");
        (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string())
      }
      Error::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
      Error::AlreadyClaimed => (StatusCode::CONFLICT, self.to_string()),
      Error::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
      Error::Validation(_) => (StatusCode::BAD_REQUEST, self.to_string()),
      Error::Ai(err) => {
        tracing::warn!("{err}");
        (StatusCode::BAD_GATEWAY, "AI service unavailable".to_string())
      }
    };

    let body = json::json!({
      "success": false,
      "error": message
    });

    (status, Json(body)).into_response()
  }
}
