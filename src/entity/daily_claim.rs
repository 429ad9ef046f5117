use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "daily_claims")]
pub struct Model {
  #[sea_orm(primary_key, auto_increment = false)]
  pub user_id: Uuid,
  #[sea_orm(primary_key, auto_increment = false)]
  pub claim_date: Date,
  pub points_claimed: i64,
  /// Streak length including this claim
  pub streak_days: i32,
  pub bonus_multiplier: f64,
  pub claimed_at: DateTime,
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
