//! SeaORM entities for the rewards and health tables.

pub mod achievement;
pub mod daily_claim;
pub mod health_alert;
pub mod health_analysis;
pub mod profile;
pub mod user_activity;
pub mod user_stats;

pub use health_alert::Severity;
