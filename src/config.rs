use std::env;

use crate::prelude::*;

#[derive(Debug, Clone)]
pub struct Config {
  pub database_url: String,
  pub port: u16,
  pub ai: AiConfig,
  /// Minutes east of UTC that define where a calendar day starts
  pub day_offset_minutes: i32,
  pub streak_sweep_interval: Duration,
  pub feed_capacity: usize,
}

#[derive(Debug, Clone)]
pub struct AiConfig {
  pub api_key: Option<String>,
  pub base_url: String,
  pub model: String,
  pub timeout: Duration,
  pub max_image_bytes: usize,
}

impl Default for AiConfig {
  fn default() -> Self {
    Self {
      api_key: None,
      base_url: String::from("https://generativelanguage.googleapis.com/v1"),
      model: String::from("gemini-1.5-flash"),
      timeout: Duration::from_secs(30),
      max_image_bytes: 4 * 1024 * 1024,
    }
  }
}

impl Default for Config {
  fn default() -> Self {
    Self {
      database_url: String::from("sqlite:wellness.db?mode=rwc"),
      port: 3000,
      ai: AiConfig::default(),
      day_offset_minutes: 0,
      streak_sweep_interval: Duration::from_secs(3600),
      feed_capacity: 256,
    }
  }
}

impl Config {
  pub fn from_env() -> anyhow::Result<Self> {
    let defaults = Self::default();

    let ai = AiConfig {
      api_key: env::var("GEMINI_API_KEY").ok().filter(|k| !k.trim().is_empty()),
      base_url: env::var("GEMINI_BASE_URL").unwrap_or(defaults.ai.base_url),
      model: env::var("GEMINI_MODEL").unwrap_or(defaults.ai.model),
      timeout: duration_var("AI_TIMEOUT")?.unwrap_or(defaults.ai.timeout),
      max_image_bytes: parse_var("MAX_IMAGE_BYTES")?
        .unwrap_or(defaults.ai.max_image_bytes),
    };

    let day_offset_minutes: i32 =
      parse_var("DAY_OFFSET_MINUTES")?.unwrap_or(defaults.day_offset_minutes);
    if day_offset_minutes.abs() >= 24 * 60 {
      anyhow::bail!("DAY_OFFSET_MINUTES must be within one day of UTC");
    }

    let streak_sweep_interval = duration_var("STREAK_SWEEP_INTERVAL")?
      .unwrap_or(defaults.streak_sweep_interval);
    if streak_sweep_interval.is_zero() {
      anyhow::bail!("STREAK_SWEEP_INTERVAL must be positive");
    }

    Ok(Self {
      database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
      port: parse_var("PORT")?.unwrap_or(defaults.port),
      ai,
      day_offset_minutes,
      streak_sweep_interval,
      feed_capacity: parse_var("FEED_CAPACITY")?
        .unwrap_or(defaults.feed_capacity)
        .max(1),
    })
  }

  /// The calendar day "now" falls on, shifted by the configured offset.
  pub fn today(&self) -> NaiveDate {
    let offset = TimeDelta::minutes(self.day_offset_minutes as i64);
    (Utc::now().naive_utc() + offset).date()
  }
}

fn parse_var<T>(key: &str) -> anyhow::Result<Option<T>>
where
  T: std::str::FromStr,
  T::Err: std::error::Error + Send + Sync + 'static,
{
  env::var(key)
    .ok()
    .map(|raw| raw.trim().parse().with_context(|| format!("Invalid {key}")))
    .transpose()
}

fn duration_var(key: &str) -> anyhow::Result<Option<Duration>> {
  env::var(key)
    .ok()
    .map(|raw| {
      humantime::parse_duration(raw.trim())
        .with_context(|| format!("Invalid {key}"))
    })
    .transpose()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn today_respects_offset() {
    let utc = Config::default();
    let ahead = Config { day_offset_minutes: 23 * 60, ..Config::default() };
    let behind = Config { day_offset_minutes: -23 * 60, ..Config::default() };

    let diff = |c: &Config| (c.today() - utc.today()).num_days();
    assert!((0..=1).contains(&diff(&ahead)));
    assert!((-1..=0).contains(&diff(&behind)));
  }

  #[test]
  fn humantime_durations() {
    assert_eq!(
      humantime::parse_duration("90s").unwrap(),
      Duration::from_secs(90)
    );
    assert_eq!(
      humantime::parse_duration("1h").unwrap(),
      Config::default().streak_sweep_interval
    );
  }
}
