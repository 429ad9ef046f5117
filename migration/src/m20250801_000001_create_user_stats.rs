use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(UserStats::Table)
          .if_not_exists()
          .col(ColumnDef::new(UserStats::UserId).uuid().not_null().primary_key())
          .col(
            ColumnDef::new(UserStats::TotalPoints)
              .big_integer()
              .not_null()
              .default(0),
          )
          .col(
            ColumnDef::new(UserStats::DailyStreak)
              .integer()
              .not_null()
              .default(0),
          )
          .col(
            ColumnDef::new(UserStats::LongestStreak)
              .integer()
              .not_null()
              .default(0),
          )
          .col(
            ColumnDef::new(UserStats::CurrentLevel)
              .integer()
              .not_null()
              .default(1),
          )
          .col(
            ColumnDef::new(UserStats::TotalAnalyses)
              .integer()
              .not_null()
              .default(0),
          )
          .col(ColumnDef::new(UserStats::LastActivityAt).date_time().null())
          .col(ColumnDef::new(UserStats::CreatedAt).date_time().not_null())
          .col(ColumnDef::new(UserStats::UpdatedAt).date_time().not_null())
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(UserStats::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum UserStats {
  Table,
  UserId,
  TotalPoints,
  DailyStreak,
  LongestStreak,
  CurrentLevel,
  TotalAnalyses,
  LastActivityAt,
  CreatedAt,
  UpdatedAt,
}
