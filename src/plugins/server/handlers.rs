use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
};
use json::Value;
use serde::Deserialize;

use super::auth::UserId;
use crate::{
  entity::{
    achievement, daily_claim, health_alert, health_analysis, profile,
    user_activity,
  },
  prelude::*,
  state::AppState,
  sv::{
    self, ActivityKind,
    alert::NewAlert,
    claim::{ClaimOutcome, ClaimStatus},
    profile::ProfileUpdate,
    stats::StatsView,
  },
};

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
  pub limit: Option<u64>,
}

pub async fn health() -> &'static str {
  "OK"
}

pub async fn stats(
  State(app): State<Arc<AppState>>,
  UserId(user): UserId,
) -> Result<Json<StatsView>> {
  Ok(Json(app.sv().stats.view(user).await?))
}

pub async fn claim_status(
  State(app): State<Arc<AppState>>,
  UserId(user): UserId,
) -> Result<Json<ClaimStatus>> {
  Ok(Json(app.sv().claim.status(user, app.today()).await?))
}

pub async fn claim(
  State(app): State<Arc<AppState>>,
  UserId(user): UserId,
) -> Result<(StatusCode, Json<ClaimOutcome>)> {
  let outcome = app.sv().claim.claim(user, app.today()).await?;
  Ok((StatusCode::CREATED, Json(outcome)))
}

pub async fn claim_history(
  State(app): State<Arc<AppState>>,
  UserId(user): UserId,
  Query(query): Query<LimitQuery>,
) -> Result<Json<Vec<daily_claim::Model>>> {
  let limit = sv::clamp_limit(query.limit);
  Ok(Json(app.sv().claim.history(user, limit).await?))
}

pub async fn activities(
  State(app): State<Arc<AppState>>,
  UserId(user): UserId,
  Query(query): Query<LimitQuery>,
) -> Result<Json<Vec<user_activity::Model>>> {
  let limit = sv::clamp_limit(query.limit);
  Ok(Json(app.sv().activity.recent(user, limit).await?))
}

#[derive(Debug, Deserialize)]
pub struct LogActivityReq {
  pub activity_type: String,
  pub activity_data: Option<Value>,
}

pub async fn log_activity(
  State(app): State<Arc<AppState>>,
  UserId(user): UserId,
  Json(req): Json<LogActivityReq>,
) -> Result<(StatusCode, Json<user_activity::Model>)> {
  let kind: ActivityKind = req.activity_type.parse()?;
  let activity = app.sv().activity.log(user, kind, req.activity_data).await?;
  Ok((StatusCode::CREATED, Json(activity)))
}

pub async fn achievements(
  State(app): State<Arc<AppState>>,
  UserId(user): UserId,
) -> Result<Json<Vec<achievement::Model>>> {
  Ok(Json(app.sv().achievement.list(user).await?))
}

#[derive(Debug, Deserialize)]
pub struct AnalysesQuery {
  #[serde(rename = "type")]
  pub analysis_type: Option<String>,
  pub limit: Option<u64>,
}

pub async fn analyses(
  State(app): State<Arc<AppState>>,
  UserId(user): UserId,
  Query(query): Query<AnalysesQuery>,
) -> Result<Json<Vec<health_analysis::Model>>> {
  let limit = sv::clamp_limit(query.limit);
  let analyses = app
    .sv()
    .analysis
    .list(user, query.analysis_type.as_deref(), limit)
    .await?;
  Ok(Json(analyses))
}

#[derive(Debug, Deserialize)]
pub struct AlertsQuery {
  #[serde(default)]
  pub unread: bool,
}

pub async fn alerts(
  State(app): State<Arc<AppState>>,
  UserId(user): UserId,
  Query(query): Query<AlertsQuery>,
) -> Result<Json<Vec<health_alert::Model>>> {
  Ok(Json(app.sv().alert.list(user, query.unread).await?))
}

pub async fn create_alert(
  State(app): State<Arc<AppState>>,
  UserId(user): UserId,
  Json(req): Json<NewAlert>,
) -> Result<(StatusCode, Json<health_alert::Model>)> {
  let alert = app.sv().alert.create(user, req).await?;
  Ok((StatusCode::CREATED, Json(alert)))
}

pub async fn read_alert(
  State(app): State<Arc<AppState>>,
  UserId(user): UserId,
  Path(id): Path<Uuid>,
) -> Result<Json<health_alert::Model>> {
  Ok(Json(app.sv().alert.mark_read(user, id).await?))
}

pub async fn profile(
  State(app): State<Arc<AppState>>,
  UserId(user): UserId,
) -> Result<Json<profile::Model>> {
  Ok(Json(app.sv().profile.get(user).await?))
}

pub async fn update_profile(
  State(app): State<Arc<AppState>>,
  UserId(user): UserId,
  Json(req): Json<ProfileUpdate>,
) -> Result<Json<profile::Model>> {
  Ok(Json(app.sv().profile.update(user, req).await?))
}
