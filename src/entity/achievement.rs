use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "achievements")]
pub struct Model {
  #[sea_orm(primary_key, auto_increment = false)]
  pub user_id: Uuid,
  #[sea_orm(primary_key, auto_increment = false)]
  pub achievement_name: String,
  pub achievement_type: String,
  pub description: Option<String>,
  pub points_reward: Option<i64>,
  pub unlocked_at: DateTime,
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
