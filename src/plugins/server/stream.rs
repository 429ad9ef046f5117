use std::sync::Arc;

use axum::{
  extract::State,
  response::sse::{Event, KeepAlive, Sse},
};
use futures::{Stream, StreamExt};

use super::auth::UserId;
use crate::state::AppState;

/// Server-sent events: one `activity` event per activity the user logs.
pub async fn activities(
  State(app): State<Arc<AppState>>,
  UserId(user): UserId,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
  let events = app
    .feed
    .subscribe(user)
    .map(|activity| Event::default().event("activity").json_data(activity));

  Sse::new(events).keep_alive(KeepAlive::default())
}
