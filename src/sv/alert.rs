use serde::Deserialize;

use crate::{
  entity::{Severity, health_alert},
  prelude::*,
};

#[derive(Debug, Clone, Deserialize)]
pub struct NewAlert {
  pub title: String,
  pub message: String,
  #[serde(default)]
  pub severity: Severity,
  pub category: String,
}

pub struct Alert<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Alert<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn create(
    &self,
    user_id: Uuid,
    alert: NewAlert,
  ) -> Result<health_alert::Model> {
    for (field, value) in [
      ("title", &alert.title),
      ("message", &alert.message),
      ("category", &alert.category),
    ] {
      if value.trim().is_empty() {
        return Err(Error::validation(format!("`{field}` is required")));
      }
    }

    let model = health_alert::ActiveModel {
      id: Set(Uuid::new_v4()),
      user_id: Set(user_id),
      title: Set(alert.title),
      message: Set(alert.message),
      severity: Set(alert.severity),
      category: Set(alert.category),
      is_read: Set(false),
      created_at: Set(Utc::now().naive_utc()),
    };

    Ok(model.insert(self.db).await?)
  }

  pub async fn list(
    &self,
    user_id: Uuid,
    unread_only: bool,
  ) -> Result<Vec<health_alert::Model>> {
    let mut query = health_alert::Entity::find()
      .filter(health_alert::Column::UserId.eq(user_id));

    if unread_only {
      query = query.filter(health_alert::Column::IsRead.eq(false));
    }

    Ok(
      query
        .order_by_desc(health_alert::Column::CreatedAt)
        .all(self.db)
        .await?,
    )
  }

  pub async fn mark_read(
    &self,
    user_id: Uuid,
    id: Uuid,
  ) -> Result<health_alert::Model> {
    let alert = health_alert::Entity::find_by_id(id)
      .filter(health_alert::Column::UserId.eq(user_id))
      .one(self.db)
      .await?
      .ok_or(Error::NotFound("Alert"))?;

    let alert = health_alert::ActiveModel { is_read: Set(true), ..alert.into() }
      .update(self.db)
      .await?;

    Ok(alert)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::sv::testing::setup_test_db;

  fn alert(severity: Severity) -> NewAlert {
    NewAlert {
      title: "Hydration".into(),
      message: "You logged no water today".into(),
      severity,
      category: "habits".into(),
    }
  }

  #[tokio::test]
  async fn create_and_mark_read() {
    let db = setup_test_db().await;
    let sv = Alert::new(&db);
    let user = Uuid::new_v4();

    let created = sv.create(user, alert(Severity::High)).await.unwrap();
    sv.create(user, alert(Severity::Low)).await.unwrap();
    assert!(!created.is_read);

    let read = sv.mark_read(user, created.id).await.unwrap();
    assert!(read.is_read);
    assert_eq!(read.severity, Severity::High);

    assert_eq!(sv.list(user, false).await.unwrap().len(), 2);
    assert_eq!(sv.list(user, true).await.unwrap().len(), 1);
  }

  #[tokio::test]
  async fn cannot_touch_other_users_alerts() {
    let db = setup_test_db().await;
    let sv = Alert::new(&db);

    let created = sv.create(Uuid::new_v4(), alert(Severity::Medium)).await.unwrap();
    let res = sv.mark_read(Uuid::new_v4(), created.id).await;
    assert!(matches!(res, Err(Error::NotFound(_))));
  }

  #[tokio::test]
  async fn blank_fields_are_rejected() {
    let db = setup_test_db().await;
    let mut bad = alert(Severity::Low);
    bad.title = "  ".into();

    let res = Alert::new(&db).create(Uuid::new_v4(), bad).await;
    assert!(matches!(res, Err(Error::Validation(_))));
  }

  #[test]
  fn severity_defaults_to_low() {
    let parsed: NewAlert = json::from_value(json::json!({
      "title": "t", "message": "m", "category": "c"
    }))
    .unwrap();
    assert_eq!(parsed.severity, Severity::Low);
  }
}
