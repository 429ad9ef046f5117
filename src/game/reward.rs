use serde::Serialize;

pub const BASE_POINTS: i64 = 50;

/// Percent bonus per streak day.
const BONUS_PERCENT_PER_DAY: i64 = 10;
/// Bonus cap: 200% on top of the base, i.e. a 3x multiplier.
const MAX_BONUS_PERCENT: i64 = 200;

/// Points awarded for a daily claim made with a given carried streak.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Reward {
  pub streak: i32,
  pub bonus_percent: i64,
  pub multiplier: f64,
  pub points: i64,
}

impl Reward {
  pub fn for_streak(streak: i32) -> Self {
    let streak = streak.max(0);
    let bonus_percent =
      (streak as i64 * BONUS_PERCENT_PER_DAY).min(MAX_BONUS_PERCENT);

    // floor(base * (1 + bonus / 100)) in integers so the floor is exact
    let points = BASE_POINTS * (100 + bonus_percent) / 100;

    Self {
      streak,
      bonus_percent,
      multiplier: 1.0 + bonus_percent as f64 / 100.0,
      points,
    }
  }
}
