//! Daily reward rules: streaks, claim rewards, level progress.
//!
//! Everything here is pure arithmetic over dates and point totals; the
//! services in `sv` feed it rows and persist the results.

mod level;
mod reward;
mod streak;

pub use level::{Progress, level};
pub use reward::Reward;
pub use streak::{Milestone, carried_streak, next_streak, reached_milestones};
