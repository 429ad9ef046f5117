//! Append-only activity log; every entry also credits its points.

use std::{fmt, str::FromStr};

use json::Value;
use serde::{Deserialize, Serialize};

use super::stats;
use crate::{entity::user_activity, feed::Feed, prelude::*};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
  DailyClaim,
  SymptomCheck,
  ImageAnalysis,
  NutritionPlan,
  HealthRecommendation,
  ConsultationBooked,
  ProductViewed,
}

impl ActivityKind {
  pub const ALL: [ActivityKind; 7] = [
    Self::DailyClaim,
    Self::SymptomCheck,
    Self::ImageAnalysis,
    Self::NutritionPlan,
    Self::HealthRecommendation,
    Self::ConsultationBooked,
    Self::ProductViewed,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      Self::DailyClaim => "daily_claim",
      Self::SymptomCheck => "symptom_check",
      Self::ImageAnalysis => "image_analysis",
      Self::NutritionPlan => "nutrition_plan",
      Self::HealthRecommendation => "health_recommendation",
      Self::ConsultationBooked => "consultation_booked",
      Self::ProductViewed => "product_viewed",
    }
  }

  /// Points for a logged activity. Daily claims are priced by
  /// `game::Reward` instead.
  pub fn points(self) -> i64 {
    match self {
      Self::DailyClaim => 0,
      Self::SymptomCheck => 20,
      Self::ImageAnalysis => 25,
      Self::NutritionPlan => 20,
      Self::HealthRecommendation => 20,
      Self::ConsultationBooked => 30,
      Self::ProductViewed => 5,
    }
  }

  /// Counts towards `total_analyses`.
  pub fn is_analysis(self) -> bool {
    matches!(
      self,
      Self::SymptomCheck
        | Self::ImageAnalysis
        | Self::NutritionPlan
        | Self::HealthRecommendation
    )
  }
}

impl fmt::Display for ActivityKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for ActivityKind {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    Self::ALL
      .into_iter()
      .find(|kind| kind.as_str() == s)
      .ok_or_else(|| Error::validation(format!("Unknown activity type `{s}`")))
  }
}

pub(crate) struct Entry {
  pub user_id: Uuid,
  pub kind: ActivityKind,
  pub data: Option<Value>,
  pub points: i64,
  pub streak: Option<i32>,
  pub at: DateTime,
}

/// Inserts the log row only; the caller credits the points.
pub(crate) async fn append<C: ConnectionTrait>(
  conn: &C,
  entry: Entry,
) -> Result<user_activity::Model> {
  let activity = user_activity::ActiveModel {
    id: Set(Uuid::new_v4()),
    user_id: Set(entry.user_id),
    activity_type: Set(entry.kind.as_str().to_string()),
    activity_data: Set(entry.data),
    points_earned: Set(entry.points),
    streak_count: Set(entry.streak),
    completed_at: Set(entry.at),
  };

  Ok(activity.insert(conn).await?)
}

/// Appends a non-claim activity and credits its points on `conn`. The caller
/// commits and publishes.
pub(crate) async fn record<C: ConnectionTrait>(
  conn: &C,
  user_id: Uuid,
  kind: ActivityKind,
  data: Option<Value>,
) -> Result<user_activity::Model> {
  if kind == ActivityKind::DailyClaim {
    return Err(Error::validation(
      "Daily claims are recorded by claiming the reward",
    ));
  }

  let now = Utc::now().naive_utc();
  let points = kind.points();

  let stats = stats::get_or_create(conn, user_id).await?;
  let entry = append(
    conn,
    Entry { user_id, kind, data, points, streak: None, at: now },
  )
  .await?;

  let analyses = stats.total_analyses + i32::from(kind.is_analysis());
  let mut update = stats::credit(stats, points, now);
  update.total_analyses = Set(analyses);
  update.update(conn).await?;

  debug!("User {user_id} logged {kind} (+{points})");
  Ok(entry)
}

pub struct Activity<'a> {
  db: &'a DatabaseConnection,
  feed: &'a Feed,
}

impl<'a> Activity<'a> {
  pub fn new(db: &'a DatabaseConnection, feed: &'a Feed) -> Self {
    Self { db, feed }
  }

  /// Logs an activity, credits its points and publishes it to the feed.
  pub async fn log(
    &self,
    user_id: Uuid,
    kind: ActivityKind,
    data: Option<Value>,
  ) -> Result<user_activity::Model> {
    let txn = self.db.begin().await?;
    let entry = record(&txn, user_id, kind, data).await?;
    txn.commit().await?;

    self.feed.publish(entry.clone());
    Ok(entry)
  }

  pub async fn recent(
    &self,
    user_id: Uuid,
    limit: u64,
  ) -> Result<Vec<user_activity::Model>> {
    let activities = user_activity::Entity::find()
      .filter(user_activity::Column::UserId.eq(user_id))
      .order_by_desc(user_activity::Column::CompletedAt)
      .limit(limit)
      .all(self.db)
      .await?;
    Ok(activities)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::sv::{Stats, testing::setup_test_db};

  #[test]
  fn kinds_round_trip_through_strings() {
    for kind in ActivityKind::ALL {
      assert_eq!(kind.as_str().parse::<ActivityKind>().unwrap(), kind);
      assert_eq!(
        json::to_value(kind).unwrap(),
        json::Value::String(kind.to_string())
      );
    }
    assert!("meditation".parse::<ActivityKind>().is_err());
  }

  #[tokio::test]
  async fn log_credits_points_and_analyses() {
    let db = setup_test_db().await;
    let feed = Feed::new(8);
    let sv = Activity::new(&db, &feed);
    let user = Uuid::new_v4();

    sv.log(user, ActivityKind::SymptomCheck, Some(json::json!({"a": 1})))
      .await
      .unwrap();
    sv.log(user, ActivityKind::ProductViewed, None).await.unwrap();

    let stats = Stats::new(&db).get_or_create(user).await.unwrap();
    assert_eq!(stats.total_points, 25);
    assert_eq!(stats.total_analyses, 1);
    assert!(stats.last_activity_at.is_some());

    let recent = sv.recent(user, 10).await.unwrap();
    assert_eq!(recent.len(), 2);
    assert!(recent.iter().any(|a| a.activity_type == "symptom_check"));
  }

  #[tokio::test]
  async fn daily_claim_cannot_be_logged_directly() {
    let db = setup_test_db().await;
    let feed = Feed::new(8);

    let res = Activity::new(&db, &feed)
      .log(Uuid::new_v4(), ActivityKind::DailyClaim, None)
      .await;
    assert!(matches!(res, Err(Error::Validation(_))));
  }

  #[tokio::test]
  async fn recent_is_scoped_and_limited() {
    let db = setup_test_db().await;
    let feed = Feed::new(8);
    let sv = Activity::new(&db, &feed);
    let (me, other) = (Uuid::new_v4(), Uuid::new_v4());

    for _ in 0..3 {
      sv.log(me, ActivityKind::ProductViewed, None).await.unwrap();
    }
    sv.log(other, ActivityKind::ConsultationBooked, None).await.unwrap();

    assert_eq!(sv.recent(me, 2).await.unwrap().len(), 2);
    assert_eq!(sv.recent(other, 10).await.unwrap().len(), 1);
  }
}
