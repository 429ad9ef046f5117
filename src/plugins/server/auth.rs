use axum::{extract::FromRequestParts, http::request::Parts};

use crate::prelude::*;

/// Header carrying the authenticated user's id, set by the identity proxy
/// in front of this service.
pub const USER_HEADER: &str = "x-user-id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserId(pub Uuid);

impl<S: Send + Sync> FromRequestParts<S> for UserId {
  type Rejection = Error;

  async fn from_request_parts(
    parts: &mut Parts,
    _state: &S,
  ) -> Result<Self, Self::Rejection> {
    parts
      .headers
      .get(USER_HEADER)
      .and_then(|value| value.to_str().ok())
      .and_then(|value| Uuid::parse_str(value.trim()).ok())
      .filter(|id| !id.is_nil())
      .map(UserId)
      .ok_or(Error::Unauthorized)
  }
}
