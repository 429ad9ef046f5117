use json::Value;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_activities")]
pub struct Model {
  #[sea_orm(primary_key, auto_increment = false)]
  pub id: Uuid,
  pub user_id: Uuid,
  pub activity_type: String,
  pub activity_data: Option<Value>,
  pub points_earned: i64,
  pub streak_count: Option<i32>,
  pub completed_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "super::user_stats::Entity",
    from = "Column::UserId",
    to = "super::user_stats::Column::UserId"
  )]
  UserStats,
}

impl Related<super::user_stats::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::UserStats.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
