use sea_orm_migration::prelude::*;

use super::m20250801_000001_create_user_stats::UserStats;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    // (user_id, claim_date) is the primary key: one claim per user per day
    manager
      .create_table(
        Table::create()
          .table(DailyClaims::Table)
          .if_not_exists()
          .col(ColumnDef::new(DailyClaims::UserId).uuid().not_null())
          .col(ColumnDef::new(DailyClaims::ClaimDate).date().not_null())
          .col(
            ColumnDef::new(DailyClaims::PointsClaimed)
              .big_integer()
              .not_null()
              .default(0),
          )
          .col(
            ColumnDef::new(DailyClaims::StreakDays)
              .integer()
              .not_null()
              .default(1),
          )
          .col(
            ColumnDef::new(DailyClaims::BonusMultiplier)
              .double()
              .not_null()
              .default(1.0),
          )
          .col(ColumnDef::new(DailyClaims::ClaimedAt).date_time().not_null())
          .primary_key(
            Index::create().col(DailyClaims::UserId).col(DailyClaims::ClaimDate),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_daily_claims_user_stats")
              .from(DailyClaims::Table, DailyClaims::UserId)
              .to(UserStats::Table, UserStats::UserId)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(DailyClaims::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum DailyClaims {
  Table,
  UserId,
  ClaimDate,
  PointsClaimed,
  StreakDays,
  BonusMultiplier,
  ClaimedAt,
}
