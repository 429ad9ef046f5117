pub mod server;
pub mod streaks;

use std::{sync::Arc, time::Duration};

use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::state::AppState;

const RESTART_DELAY: Duration = Duration::from_secs(5);

#[async_trait::async_trait]
pub trait Plugin: Send + Sync {
  fn name(&self) -> &'static str {
    std::any::type_name::<Self>()
  }

  async fn start(&self, app: Arc<AppState>) -> anyhow::Result<()>;
}

/// Supervises plugins, restarting any that stop.
pub struct App {
  plugins: Vec<Arc<dyn Plugin>>,
}

impl App {
  pub fn new() -> Self {
    Self { plugins: Vec::new() }
  }

  pub fn register<P: Plugin + 'static>(mut self, plugin: P) -> Self {
    self.plugins.push(Arc::new(plugin));
    self
  }

  pub async fn run(self, app: Arc<AppState>) {
    for plugin in self.plugins {
      let app = app.clone();

      tokio::spawn(async move {
        let name = plugin.name();
        info!("Plugin `{name}` started");

        loop {
          let app = app.clone();
          let plugin = plugin.clone();

          let handle = tokio::spawn(async move { plugin.start(app).await });

          match handle.await {
            Ok(Ok(())) => warn!("Plugin `{name}` returned, restarting"),
            Ok(Err(err)) => error!("Plugin `{name}` failed: {err:#}"),
            Err(err) if err.is_cancelled() => {
              info!("Plugin `{name}` cancelled");
              break;
            }
            Err(_) => error!("Plugin `{name}` panicked"),
          }

          sleep(RESTART_DELAY).await;
        }
      });
    }
  }
}
