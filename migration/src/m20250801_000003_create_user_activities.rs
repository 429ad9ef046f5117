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
          .table(UserActivities::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(UserActivities::Id).uuid().not_null().primary_key(),
          )
          .col(ColumnDef::new(UserActivities::UserId).uuid().not_null())
          .col(ColumnDef::new(UserActivities::ActivityType).string().not_null())
          .col(ColumnDef::new(UserActivities::ActivityData).json().null())
          .col(
            ColumnDef::new(UserActivities::PointsEarned)
              .big_integer()
              .not_null()
              .default(0),
          )
          .col(ColumnDef::new(UserActivities::StreakCount).integer().null())
          .col(
            ColumnDef::new(UserActivities::CompletedAt).date_time().not_null(),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_user_activities_user_stats")
              .from(UserActivities::Table, UserActivities::UserId)
              .to(UserStats::Table, UserStats::UserId)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_user_activities_user_completed")
          .table(UserActivities::Table)
          .col(UserActivities::UserId)
          .col(UserActivities::CompletedAt)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(UserActivities::Table).to_owned())
      .await
  }
}

#[derive(DeriveIden)]
pub enum UserActivities {
  Table,
  Id,
  UserId,
  ActivityType,
  ActivityData,
  PointsEarned,
  StreakCount,
  CompletedAt,
}
