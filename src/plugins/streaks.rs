use std::sync::Arc;

use async_trait::async_trait;

use crate::{prelude::*, state::AppState};

/// Periodically zeroes streaks that were broken by a missed day.
pub struct Plugin;

#[async_trait]
impl super::Plugin for Plugin {
  fn name(&self) -> &'static str {
    "streaks"
  }

  async fn start(&self, app: Arc<AppState>) -> anyhow::Result<()> {
    let mut interval = time::interval(app.config.streak_sweep_interval);

    loop {
      interval.tick().await;

      match app.sv().stats.expire_streaks(app.today()).await {
        Ok(0) => debug!("No streaks to expire"),
        Ok(count) => info!("Expired {count} broken streak(s)"),
        Err(err) => error!("Streak sweep failed: {err}"),
      }
    }
  }
}
