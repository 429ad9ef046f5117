use json::Value;

use super::{ActivityKind, activity};
use crate::{
  entity::{health_analysis, user_activity},
  feed::Feed,
  prelude::*,
};

/// A stored analysis together with the activity that paid for it.
#[derive(Debug)]
pub struct Saved {
  pub analysis: health_analysis::Model,
  pub activity: user_activity::Model,
}

pub struct Analysis<'a> {
  db: &'a DatabaseConnection,
  feed: &'a Feed,
}

impl<'a> Analysis<'a> {
  pub fn new(db: &'a DatabaseConnection, feed: &'a Feed) -> Self {
    Self { db, feed }
  }

  /// Stores the analysis and logs its activity in one transaction, so an
  /// analysis never exists without its points.
  pub async fn save(
    &self,
    user_id: Uuid,
    kind: ActivityKind,
    input: Value,
    result: Value,
  ) -> Result<Saved> {
    let txn = self.db.begin().await?;
    let now = Utc::now().naive_utc();

    let analysis = health_analysis::ActiveModel {
      id: Set(Uuid::new_v4()),
      user_id: Set(user_id),
      analysis_type: Set(kind.as_str().to_string()),
      input_data: Set(input),
      result_data: Set(result),
      created_at: Set(now),
      updated_at: Set(now),
    }
    .insert(&txn)
    .await?;

    let activity = activity::record(
      &txn,
      user_id,
      kind,
      Some(json::json!({ "analysis_id": analysis.id })),
    )
    .await?;

    txn.commit().await?;

    self.feed.publish(activity.clone());
    Ok(Saved { analysis, activity })
  }

  pub async fn list(
    &self,
    user_id: Uuid,
    analysis_type: Option<&str>,
    limit: u64,
  ) -> Result<Vec<health_analysis::Model>> {
    let mut query = health_analysis::Entity::find()
      .filter(health_analysis::Column::UserId.eq(user_id));

    if let Some(ty) = analysis_type {
      query = query.filter(health_analysis::Column::AnalysisType.eq(ty));
    }

    Ok(
      query
        .order_by_desc(health_analysis::Column::CreatedAt)
        .limit(limit)
        .all(self.db)
        .await?,
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::sv::{Stats, testing::setup_test_db};

  #[tokio::test]
  async fn filters_by_type() {
    let db = setup_test_db().await;
    let feed = Feed::new(8);
    let sv = Analysis::new(&db, &feed);
    let user = Uuid::new_v4();

    let saved = sv
      .save(
        user,
        ActivityKind::SymptomCheck,
        json::json!({ "symptoms": "cough" }),
        json::json!({ "analysis": "rest" }),
      )
      .await
      .unwrap();
    sv.save(user, ActivityKind::NutritionPlan, json::json!({}), json::json!({}))
      .await
      .unwrap();
    sv.save(
      Uuid::new_v4(),
      ActivityKind::SymptomCheck,
      json::json!({}),
      json::json!({}),
    )
    .await
    .unwrap();

    assert_eq!(sv.list(user, None, 20).await.unwrap().len(), 2);

    let symptoms = sv.list(user, Some("symptom_check"), 20).await.unwrap();
    assert_eq!(symptoms.len(), 1);
    assert_eq!(symptoms[0].id, saved.analysis.id);
    assert_eq!(symptoms[0].input_data["symptoms"], "cough");
  }

  #[tokio::test]
  async fn save_credits_points_and_links_activity() {
    let db = setup_test_db().await;
    let feed = Feed::new(8);
    let user = Uuid::new_v4();

    let saved = Analysis::new(&db, &feed)
      .save(user, ActivityKind::ImageAnalysis, json::json!({}), json::json!({}))
      .await
      .unwrap();

    assert_eq!(saved.activity.points_earned, 25);
    assert_eq!(
      saved.activity.activity_data.as_ref().unwrap()["analysis_id"],
      saved.analysis.id.to_string()
    );

    let stats = Stats::new(&db).get_or_create(user).await.unwrap();
    assert_eq!(stats.total_points, 25);
    assert_eq!(stats.total_analyses, 1);
  }

  #[tokio::test]
  async fn failed_activity_rolls_back_analysis() {
    let db = setup_test_db().await;
    let feed = Feed::new(8);
    let sv = Analysis::new(&db, &feed);
    let user = Uuid::new_v4();

    // the analysis insert succeeds, then the activity is refused
    let res = sv
      .save(user, ActivityKind::DailyClaim, json::json!({}), json::json!({}))
      .await;
    assert!(matches!(res, Err(Error::Validation(_))));

    assert!(sv.list(user, None, 20).await.unwrap().is_empty());
    let stats = Stats::new(&db).get_or_create(user).await.unwrap();
    assert_eq!((stats.total_points, stats.total_analyses), (0, 0));
  }
}
