//! Per-user aggregate: points, streaks and level.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_stats")]
pub struct Model {
  #[sea_orm(primary_key, auto_increment = false)]
  pub user_id: Uuid,
  pub total_points: i64,
  pub daily_streak: i32,
  pub longest_streak: i32,
  /// Always `game::level(total_points)`, rewritten on every points change
  pub current_level: i32,
  pub total_analyses: i32,
  pub last_activity_at: Option<DateTime>,
  pub created_at: DateTime,
  pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(has_many = "super::daily_claim::Entity")]
  DailyClaims,
  #[sea_orm(has_many = "super::user_activity::Entity")]
  Activities,
  #[sea_orm(has_many = "super::achievement::Entity")]
  Achievements,
}

impl Related<super::daily_claim::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::DailyClaims.def()
  }
}

impl Related<super::user_activity::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Activities.def()
  }
}

impl Related<super::achievement::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Achievements.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
