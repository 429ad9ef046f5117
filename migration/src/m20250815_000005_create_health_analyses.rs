use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(HealthAnalyses::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(HealthAnalyses::Id).uuid().not_null().primary_key(),
          )
          .col(ColumnDef::new(HealthAnalyses::UserId).uuid().not_null())
          .col(ColumnDef::new(HealthAnalyses::AnalysisType).string().not_null())
          .col(ColumnDef::new(HealthAnalyses::InputData).json().not_null())
          .col(ColumnDef::new(HealthAnalyses::ResultData).json().not_null())
          .col(ColumnDef::new(HealthAnalyses::CreatedAt).date_time().not_null())
          .col(ColumnDef::new(HealthAnalyses::UpdatedAt).date_time().not_null())
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_health_analyses_user")
          .table(HealthAnalyses::Table)
          .col(HealthAnalyses::UserId)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(HealthAnalyses::Table).to_owned())
      .await
  }
}

#[derive(DeriveIden)]
pub enum HealthAnalyses {
  Table,
  Id,
  UserId,
  AnalysisType,
  InputData,
  ResultData,
  CreatedAt,
  UpdatedAt,
}
