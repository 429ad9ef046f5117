//! Daily reward claims.

use serde::Serialize;

use super::{achievement, activity, stats, ActivityKind};
use crate::{
  entity::{achievement as achievement_entity, daily_claim, user_stats},
  feed::Feed,
  game::{self, Progress, Reward},
  prelude::*,
};

#[derive(Debug, Serialize)]
pub struct ClaimStatus {
  pub can_claim: bool,
  /// Streak still alive today; after a claim, the streak including it
  pub current_streak: i32,
  pub todays_claim: Option<daily_claim::Model>,
  /// What a claim right now would award, when one is allowed
  pub reward: Option<Reward>,
  pub streak_after: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct ClaimOutcome {
  pub claim: daily_claim::Model,
  pub stats: user_stats::Model,
  pub progress: Progress,
  pub unlocked: Vec<achievement_entity::Model>,
}

pub struct Claim<'a> {
  db: &'a DatabaseConnection,
  feed: &'a Feed,
}

async fn latest<C: ConnectionTrait>(
  conn: &C,
  user_id: Uuid,
) -> Result<Option<daily_claim::Model>> {
  let claim = daily_claim::Entity::find()
    .filter(daily_claim::Column::UserId.eq(user_id))
    .order_by_desc(daily_claim::Column::ClaimDate)
    .one(conn)
    .await?;
  Ok(claim)
}

impl<'a> Claim<'a> {
  pub fn new(db: &'a DatabaseConnection, feed: &'a Feed) -> Self {
    Self { db, feed }
  }

  pub async fn status(
    &self,
    user_id: Uuid,
    today: NaiveDate,
  ) -> Result<ClaimStatus> {
    let latest = latest(self.db, user_id).await?;

    if let Some(claim) = latest.as_ref().filter(|c| c.claim_date == today) {
      return Ok(ClaimStatus {
        can_claim: false,
        current_streak: claim.streak_days,
        todays_claim: latest,
        reward: None,
        streak_after: None,
      });
    }

    let previous = latest.map(|c| (c.claim_date, c.streak_days));
    let streak_after = game::next_streak(previous, today);
    let carried = game::carried_streak(previous, today);

    Ok(ClaimStatus {
      can_claim: streak_after.is_some(),
      current_streak: carried,
      todays_claim: None,
      reward: streak_after.map(|_| Reward::for_streak(carried)),
      streak_after,
    })
  }

  /// Claims the reward for `today`.
  ///
  /// Fails with [`Error::AlreadyClaimed`] when a claim for `today` exists,
  /// including when a concurrent claim wins the insert.
  pub async fn claim(
    &self,
    user_id: Uuid,
    today: NaiveDate,
  ) -> Result<ClaimOutcome> {
    let txn = self.db.begin().await?;

    let stats = stats::get_or_create(&txn, user_id).await?;
    let previous = latest(&txn, user_id)
      .await?
      .map(|c| (c.claim_date, c.streak_days));

    let Some(streak) = game::next_streak(previous, today) else {
      return Err(Error::AlreadyClaimed);
    };
    let reward = Reward::for_streak(game::carried_streak(previous, today));
    let now = Utc::now().naive_utc();

    let claim = daily_claim::ActiveModel {
      user_id: Set(user_id),
      claim_date: Set(today),
      points_claimed: Set(reward.points),
      streak_days: Set(streak),
      bonus_multiplier: Set(reward.multiplier),
      claimed_at: Set(now),
    }
    .insert(&txn)
    .await
    .map_err(Error::on_claim_conflict)?;

    let longest = stats.longest_streak.max(streak);
    let mut update = stats::credit(stats, reward.points, now);
    update.daily_streak = Set(streak);
    update.longest_streak = Set(longest);
    let stats = update.update(&txn).await?;

    let entry = activity::append(
      &txn,
      activity::Entry {
        user_id,
        kind: ActivityKind::DailyClaim,
        data: Some(json::json!({
          "claim_date": today,
          "bonus_multiplier": reward.multiplier,
        })),
        points: reward.points,
        streak: Some(streak),
        at: now,
      },
    )
    .await?;

    let unlocked = achievement::unlock_streak(&txn, user_id, streak, now).await?;

    txn.commit().await?;

    info!(
      "User {user_id} claimed {} points (streak {streak}, x{})",
      reward.points, reward.multiplier
    );
    for a in &unlocked {
      info!("User {user_id} unlocked `{}`", a.achievement_name);
    }
    self.feed.publish(entry);

    Ok(ClaimOutcome {
      claim,
      progress: Progress::of(stats.total_points),
      stats,
      unlocked,
    })
  }

  pub async fn history(
    &self,
    user_id: Uuid,
    limit: u64,
  ) -> Result<Vec<daily_claim::Model>> {
    let claims = daily_claim::Entity::find()
      .filter(daily_claim::Column::UserId.eq(user_id))
      .order_by_desc(daily_claim::Column::ClaimDate)
      .limit(limit)
      .all(self.db)
      .await?;
    Ok(claims)
  }
}

#[cfg(test)]
mod tests {
  use futures::StreamExt;

  use super::*;
  use crate::{
    entity::user_activity,
    sv::{Achievement, Activity, Stats, testing::setup_test_db},
  };

  fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 5, d).unwrap()
  }

  #[tokio::test]
  async fn first_claim_awards_base_points() {
    let db = setup_test_db().await;
    let feed = Feed::new(8);
    let sv = Claim::new(&db, &feed);
    let user = Uuid::new_v4();

    let status = sv.status(user, day(1)).await.unwrap();
    assert!(status.can_claim);
    assert_eq!(status.reward.unwrap().points, 50);
    assert_eq!(status.streak_after, Some(1));

    let outcome = sv.claim(user, day(1)).await.unwrap();
    assert_eq!(outcome.claim.points_claimed, 50);
    assert_eq!(outcome.claim.streak_days, 1);
    assert_eq!(outcome.claim.bonus_multiplier, 1.0);
    assert_eq!(outcome.stats.total_points, 50);
    assert_eq!(outcome.stats.daily_streak, 1);
    assert_eq!(outcome.stats.longest_streak, 1);
    assert!(outcome.unlocked.is_empty());
  }

  #[tokio::test]
  async fn second_claim_same_day_is_rejected() {
    let db = setup_test_db().await;
    let feed = Feed::new(8);
    let sv = Claim::new(&db, &feed);
    let user = Uuid::new_v4();

    sv.claim(user, day(3)).await.unwrap();
    assert!(matches!(sv.claim(user, day(3)).await, Err(Error::AlreadyClaimed)));

    let status = sv.status(user, day(3)).await.unwrap();
    assert!(!status.can_claim);
    assert_eq!(status.todays_claim.unwrap().points_claimed, 50);

    let stats = Stats::new(&db).get_or_create(user).await.unwrap();
    assert_eq!(stats.total_points, 50);
    assert_eq!(sv.history(user, 10).await.unwrap().len(), 1);
  }

  #[tokio::test]
  async fn duplicate_insert_maps_to_already_claimed() {
    let db = setup_test_db().await;
    let user = Uuid::new_v4();
    stats::get_or_create(&db, user).await.unwrap();

    let row = || daily_claim::ActiveModel {
      user_id: Set(user),
      claim_date: Set(day(9)),
      points_claimed: Set(50),
      streak_days: Set(1),
      bonus_multiplier: Set(1.0),
      claimed_at: Set(Utc::now().naive_utc()),
    };

    row().insert(&db).await.unwrap();
    let err = row().insert(&db).await.unwrap_err();
    assert!(matches!(Error::on_claim_conflict(err), Error::AlreadyClaimed));
  }

  #[tokio::test]
  async fn consecutive_days_grow_streak_and_bonus() {
    let db = setup_test_db().await;
    let feed = Feed::new(8);
    let sv = Claim::new(&db, &feed);
    let user = Uuid::new_v4();

    let mut points = Vec::new();
    for d in 1..=4 {
      points.push(sv.claim(user, day(d)).await.unwrap().claim.points_claimed);
    }
    assert_eq!(points, vec![50, 55, 60, 65]);

    let stats = Stats::new(&db).get_or_create(user).await.unwrap();
    assert_eq!(stats.daily_streak, 4);
    assert_eq!(stats.total_points, 230);
  }

  #[tokio::test]
  async fn gap_resets_streak_but_keeps_longest() {
    let db = setup_test_db().await;
    let feed = Feed::new(8);
    let sv = Claim::new(&db, &feed);
    let user = Uuid::new_v4();

    for d in 1..=3 {
      sv.claim(user, day(d)).await.unwrap();
    }

    let status = sv.status(user, day(6)).await.unwrap();
    assert_eq!(status.current_streak, 0);
    assert_eq!(status.streak_after, Some(1));

    let outcome = sv.claim(user, day(6)).await.unwrap();
    assert_eq!(outcome.claim.streak_days, 1);
    assert_eq!(outcome.claim.points_claimed, 50);
    assert_eq!(outcome.stats.daily_streak, 1);
    assert_eq!(outcome.stats.longest_streak, 3);
  }

  #[tokio::test]
  async fn long_streak_caps_at_triple_and_levels_up() {
    let db = setup_test_db().await;
    let feed = Feed::new(64);
    let sv = Claim::new(&db, &feed);
    let user = Uuid::new_v4();

    let mut last = None;
    for d in 1..=25 {
      last = Some(sv.claim(user, day(d)).await.unwrap());
    }
    let last = last.unwrap();

    assert_eq!(last.claim.streak_days, 25);
    assert_eq!(last.claim.bonus_multiplier, 3.0);
    assert_eq!(last.claim.points_claimed, 150);
    assert_eq!(last.stats.current_level, game::level(last.stats.total_points));
    assert!(last.stats.current_level > 1);

    let names: Vec<_> = Achievement::new(&db)
      .list(user)
      .await
      .unwrap()
      .into_iter()
      .map(|a| a.achievement_name)
      .collect();
    assert_eq!(names, vec!["streak_7"]);
  }

  #[tokio::test]
  async fn claim_is_logged_and_published() {
    let db = setup_test_db().await;
    let feed = Feed::new(8);
    let mut stream = Box::pin(feed.subscribe(Uuid::nil()));
    let sv = Claim::new(&db, &feed);

    sv.claim(Uuid::nil(), day(2)).await.unwrap();

    let published: user_activity::Model = stream.next().await.unwrap();
    assert_eq!(published.activity_type, "daily_claim");
    assert_eq!(published.points_earned, 50);
    assert_eq!(published.streak_count, Some(1));

    let logged =
      Activity::new(&db, &feed).recent(Uuid::nil(), 10).await.unwrap();
    assert_eq!(logged.len(), 1);
    assert_eq!(logged[0].id, published.id);
  }
}
