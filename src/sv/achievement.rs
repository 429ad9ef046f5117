use crate::{entity::achievement, game, prelude::*};

const STREAK_TYPE: &str = "streak";

pub struct Achievement<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Achievement<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn list(&self, user_id: Uuid) -> Result<Vec<achievement::Model>> {
    let achievements = achievement::Entity::find()
      .filter(achievement::Column::UserId.eq(user_id))
      .order_by_asc(achievement::Column::UnlockedAt)
      .order_by_asc(achievement::Column::AchievementName)
      .all(self.db)
      .await?;
    Ok(achievements)
  }
}

/// Records streak milestones reached at `streak` that the user does not
/// have yet, returning only the new ones.
pub(crate) async fn unlock_streak<C: ConnectionTrait>(
  conn: &C,
  user_id: Uuid,
  streak: i32,
  now: DateTime,
) -> Result<Vec<achievement::Model>> {
  let owned: Vec<String> = achievement::Entity::find()
    .filter(achievement::Column::UserId.eq(user_id))
    .filter(achievement::Column::AchievementType.eq(STREAK_TYPE))
    .all(conn)
    .await?
    .into_iter()
    .map(|a| a.achievement_name)
    .collect();

  let mut unlocked = Vec::new();
  for days in game::reached_milestones(streak) {
    let name = format!("streak_{days}");
    if owned.contains(&name) {
      continue;
    }

    let model = achievement::ActiveModel {
      user_id: Set(user_id),
      achievement_name: Set(name),
      achievement_type: Set(STREAK_TYPE.into()),
      description: Set(Some(format!("Claimed the daily reward {days} days in a row"))),
      points_reward: Set(None),
      unlocked_at: Set(now),
    }
    .insert(conn)
    .await?;

    unlocked.push(model);
  }

  Ok(unlocked)
}
