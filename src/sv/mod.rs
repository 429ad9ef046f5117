pub mod achievement;
pub mod activity;
pub mod alert;
pub mod analysis;
pub mod claim;
pub mod profile;
pub mod stats;

pub use achievement::Achievement;
pub use activity::{Activity, ActivityKind};
pub use alert::Alert;
pub use analysis::Analysis;
pub use claim::Claim;
pub use profile::Profile;
pub use stats::Stats;

/// Limit for list endpoints when the caller gives none or an absurd one.
pub const DEFAULT_LIMIT: u64 = 20;
pub const MAX_LIMIT: u64 = 100;

pub fn clamp_limit(limit: Option<u64>) -> u64 {
  limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

#[cfg(test)]
pub(crate) mod testing {
  use migration::{Migrator, MigratorTrait};
  use sea_orm::{ConnectOptions, Database, DatabaseConnection};

  pub async fn setup_test_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).sqlx_logging(false);

    let db = Database::connect(opts).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
  }
}
