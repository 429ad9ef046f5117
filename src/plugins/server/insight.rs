//! AI feature endpoints: validate, ask the model, keep the answer.

use std::sync::Arc;

use axum::{Json, extract::State};
use json::Value;
use serde::Serialize;

use super::auth::UserId;
use crate::{
  ai::prompt::{
    ImageAnalysis, NutritionPlan, Prompt, Recommendations, SymptomCheck,
  },
  prelude::*,
  state::AppState,
};

#[derive(Debug, Serialize)]
pub struct InsightRes {
  pub analysis_id: Uuid,
  pub result: Value,
  pub points_earned: i64,
}

async fn ask<P: Prompt>(
  app: &AppState,
  user_id: Uuid,
  req: P,
) -> Result<Json<InsightRes>> {
  let parts = req.parts(&app.config.ai)?;
  let reply = app.ai.generate(&parts).await?;
  let result = P::result(&reply);

  let saved = app
    .sv()
    .analysis
    .save(user_id, P::KIND, req.record(), result.clone())
    .await?;

  Ok(Json(InsightRes {
    analysis_id: saved.analysis.id,
    result,
    points_earned: saved.activity.points_earned,
  }))
}

pub async fn symptoms(
  State(app): State<Arc<AppState>>,
  UserId(user): UserId,
  Json(req): Json<SymptomCheck>,
) -> Result<Json<InsightRes>> {
  ask(&app, user, req).await
}

pub async fn image(
  State(app): State<Arc<AppState>>,
  UserId(user): UserId,
  Json(req): Json<ImageAnalysis>,
) -> Result<Json<InsightRes>> {
  ask(&app, user, req).await
}

pub async fn nutrition(
  State(app): State<Arc<AppState>>,
  UserId(user): UserId,
  Json(req): Json<NutritionPlan>,
) -> Result<Json<InsightRes>> {
  ask(&app, user, req).await
}

pub async fn recommendations(
  State(app): State<Arc<AppState>>,
  UserId(user): UserId,
  Json(req): Json<Recommendations>,
) -> Result<Json<InsightRes>> {
  ask(&app, user, req).await
}
