use migration::{Migrator, MigratorTrait};
use sea_orm::Database;

use crate::{ai, config::Config, feed::Feed, prelude::*, sv};

pub struct Services<'a> {
  pub stats: sv::Stats<'a>,
  pub claim: sv::Claim<'a>,
  pub activity: sv::Activity<'a>,
  pub achievement: sv::Achievement<'a>,
  pub analysis: sv::Analysis<'a>,
  pub alert: sv::Alert<'a>,
  pub profile: sv::Profile<'a>,
}

pub struct AppState {
  pub db: DatabaseConnection,
  pub config: Config,
  pub ai: ai::Client,
  pub feed: Feed,
}

impl AppState {
  pub async fn new(config: Config) -> anyhow::Result<Self> {
    info!("Connecting to database...");
    let db = Database::connect(config.database_url.as_str())
      .await
      .context("Failed to connect to database")?;

    info!("Running migrations...");
    Migrator::up(&db, None).await.context("Failed to run migrations")?;

    Self::with_db(db, config)
  }

  pub fn with_db(
    db: DatabaseConnection,
    config: Config,
  ) -> anyhow::Result<Self> {
    let ai = ai::Client::new(config.ai.clone())?;
    let feed = Feed::new(config.feed_capacity);

    Ok(Self { db, config, ai, feed })
  }

  pub fn sv(&self) -> Services<'_> {
    Services {
      stats: sv::Stats::new(&self.db),
      claim: sv::Claim::new(&self.db, &self.feed),
      activity: sv::Activity::new(&self.db, &self.feed),
      achievement: sv::Achievement::new(&self.db),
      analysis: sv::Analysis::new(&self.db, &self.feed),
      alert: sv::Alert::new(&self.db),
      profile: sv::Profile::new(&self.db),
    }
  }

  pub fn today(&self) -> NaiveDate {
    self.config.today()
  }
}
