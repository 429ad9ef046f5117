use chrono::NaiveDate;
use serde::Serialize;

/// Length of a streak "milestone" shown as progress to the user.
pub const MILESTONE_DAYS: i32 = 7;

/// Streak lengths that unlock an achievement.
pub const ACHIEVEMENT_MILESTONES: [i32; 3] = [7, 30, 100];

/// Streak after claiming on `today`, given the previous claim date and the
/// streak recorded with it.
///
/// Returns `None` when `today` is not after the previous claim date; a
/// same-day claim never reaches this point because the claim is rejected
/// first.
pub fn next_streak(
  previous: Option<(NaiveDate, i32)>,
  today: NaiveDate,
) -> Option<i32> {
  let Some((last, streak)) = previous else {
    return Some(1);
  };

  match (today - last).num_days() {
    1 => Some(streak.max(0).saturating_add(1)),
    gap if gap > 1 => Some(1),
    _ => None,
  }
}

/// Streak that is still alive going into a claim on `today`.
pub fn carried_streak(
  previous: Option<(NaiveDate, i32)>,
  today: NaiveDate,
) -> i32 {
  match previous {
    Some((last, streak)) if (today - last).num_days() == 1 => streak.max(0),
    _ => 0,
  }
}

/// Achievement milestones crossed when the streak moves to `streak`.
pub fn reached_milestones(streak: i32) -> impl Iterator<Item = i32> {
  ACHIEVEMENT_MILESTONES.into_iter().filter(move |&days| streak >= days)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Milestone {
  pub next: i32,
  pub days_until: i32,
  pub progress: f64,
}

impl Milestone {
  pub fn of(streak: i32) -> Self {
    let streak = streak.max(0);
    let next = (streak / MILESTONE_DAYS + 1) * MILESTONE_DAYS;
    Self {
      next,
      days_until: next - streak,
      progress: (streak % MILESTONE_DAYS) as f64 / MILESTONE_DAYS as f64,
    }
  }
}
