use sea_orm_migration::prelude::*;

use super::m20250801_000001_create_user_stats::UserStats;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Achievements::Table)
          .if_not_exists()
          .col(ColumnDef::new(Achievements::UserId).uuid().not_null())
          .col(ColumnDef::new(Achievements::AchievementName).string().not_null())
          .col(ColumnDef::new(Achievements::AchievementType).string().not_null())
          .col(ColumnDef::new(Achievements::Description).string().null())
          .col(ColumnDef::new(Achievements::PointsReward).big_integer().null())
          .col(ColumnDef::new(Achievements::UnlockedAt).date_time().not_null())
          .primary_key(
            Index::create()
              .col(Achievements::UserId)
              .col(Achievements::AchievementName),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_achievements_user_stats")
              .from(Achievements::Table, Achievements::UserId)
              .to(UserStats::Table, UserStats::UserId)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(Achievements::Table).to_owned())
      .await
  }
}

#[derive(DeriveIden)]
pub enum Achievements {
  Table,
  UserId,
  AchievementName,
  AchievementType,
  Description,
  PointsReward,
  UnlockedAt,
}
