pub use sea_orm_migration::prelude::*;

mod m20250801_000001_create_user_stats;
mod m20250801_000002_create_daily_claims;
mod m20250801_000003_create_user_activities;
mod m20250801_000004_create_achievements;
mod m20250815_000005_create_health_analyses;
mod m20250815_000006_create_health_alerts;
mod m20250901_000007_create_profiles;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
  fn migrations() -> Vec<Box<dyn MigrationTrait>> {
    vec![
      Box::new(m20250801_000001_create_user_stats::Migration),
      Box::new(m20250801_000002_create_daily_claims::Migration),
      Box::new(m20250801_000003_create_user_activities::Migration),
      Box::new(m20250801_000004_create_achievements::Migration),
      Box::new(m20250815_000005_create_health_analyses::Migration),
      Box::new(m20250815_000006_create_health_alerts::Migration),
      Box::new(m20250901_000007_create_profiles::Migration),
    ]
  }
}
