use sea_orm::{QueryTrait, SqlErr, sea_query::Expr};
use serde::Serialize;

use crate::{
  entity::{daily_claim, user_stats},
  game::{self, Milestone, Progress},
  prelude::*,
};

/// Stats row plus everything derived from it for display.
#[derive(Debug, Serialize)]
pub struct StatsView {
  #[serde(flatten)]
  pub stats: user_stats::Model,
  pub progress: Progress,
  pub milestone: Milestone,
}

pub struct Stats<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Stats<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn get_or_create(&self, user_id: Uuid) -> Result<user_stats::Model> {
    get_or_create(self.db, user_id).await
  }

  pub async fn view(&self, user_id: Uuid) -> Result<StatsView> {
    let stats = self.get_or_create(user_id).await?;

    Ok(StatsView {
      progress: Progress::of(stats.total_points),
      milestone: Milestone::of(stats.daily_streak),
      stats,
    })
  }

  /// Zeroes `daily_streak` for users whose last claim is older than
  /// yesterday. Claims read the streak from the claim rows, so this only
  /// keeps the displayed value honest.
  pub async fn expire_streaks(&self, today: NaiveDate) -> Result<u64> {
    let yesterday = today - TimeDelta::days(1);

    let alive = daily_claim::Entity::find()
      .select_only()
      .column(daily_claim::Column::UserId)
      .filter(daily_claim::Column::ClaimDate.gte(yesterday))
      .into_query();

    let res = user_stats::Entity::update_many()
      .col_expr(user_stats::Column::DailyStreak, Expr::value(0))
      .filter(user_stats::Column::DailyStreak.gt(0))
      .filter(user_stats::Column::UserId.not_in_subquery(alive))
      .exec(self.db)
      .await?;

    Ok(res.rows_affected)
  }
}

pub(crate) async fn get_or_create<C: ConnectionTrait>(
  conn: &C,
  user_id: Uuid,
) -> Result<user_stats::Model> {
  if let Some(stats) = user_stats::Entity::find_by_id(user_id).one(conn).await?
  {
    return Ok(stats);
  }

  let now = Utc::now().naive_utc();
  let stats = user_stats::ActiveModel {
    user_id: Set(user_id),
    total_points: Set(0),
    daily_streak: Set(0),
    longest_streak: Set(0),
    current_level: Set(game::level(0)),
    total_analyses: Set(0),
    last_activity_at: Set(None),
    created_at: Set(now),
    updated_at: Set(now),
  };

  match stats.insert(conn).await {
    Ok(stats) => Ok(stats),
    // created concurrently by another request
    Err(err)
      if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) =>
    {
      user_stats::Entity::find_by_id(user_id)
        .one(conn)
        .await?
        .ok_or(Error::NotFound("User stats"))
    }
    Err(err) => Err(err.into()),
  }
}

/// Adds `points` to the row and refreshes everything derived from the total.
/// The returned model still has to be saved.
pub(crate) fn credit(
  stats: user_stats::Model,
  points: i64,
  now: DateTime,
) -> user_stats::ActiveModel {
  let total = stats.total_points + points.max(0);

  user_stats::ActiveModel {
    total_points: Set(total),
    current_level: Set(game::level(total)),
    last_activity_at: Set(Some(now)),
    updated_at: Set(now),
    ..stats.into()
  }
}
