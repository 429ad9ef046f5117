use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(HealthAlerts::Table)
          .if_not_exists()
          .col(ColumnDef::new(HealthAlerts::Id).uuid().not_null().primary_key())
          .col(ColumnDef::new(HealthAlerts::UserId).uuid().not_null())
          .col(ColumnDef::new(HealthAlerts::Title).string().not_null())
          .col(ColumnDef::new(HealthAlerts::Message).string().not_null())
          .col(
            ColumnDef::new(HealthAlerts::Severity)
              .string()
              .not_null()
              .default("low"),
          )
          .col(ColumnDef::new(HealthAlerts::Category).string().not_null())
          .col(
            ColumnDef::new(HealthAlerts::IsRead)
              .boolean()
              .not_null()
              .default(false),
          )
          .col(ColumnDef::new(HealthAlerts::CreatedAt).date_time().not_null())
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_health_alerts_user")
          .table(HealthAlerts::Table)
          .col(HealthAlerts::UserId)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(HealthAlerts::Table).to_owned())
      .await
  }
}

#[derive(DeriveIden)]
pub enum HealthAlerts {
  Table,
  Id,
  UserId,
  Title,
  Message,
  Severity,
  Category,
  IsRead,
  CreatedAt,
}
