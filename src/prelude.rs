pub use std::time::Duration;

pub use anyhow::Context;
pub use chrono::{NaiveDate, NaiveDateTime as DateTime, TimeDelta, Utc};
pub use sea_orm::{
  ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection,
  EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
pub use tokio::time;
pub use tracing::{debug, error, info, warn};
pub use uuid::Uuid;

pub use crate::error::{Ai, Error, Result};
