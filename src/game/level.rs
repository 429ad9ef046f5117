use serde::Serialize;

pub const POINTS_PER_LEVEL: i64 = 500;

pub fn level(total_points: i64) -> i32 {
  let level = total_points.max(0) / POINTS_PER_LEVEL + 1;
  i32::try_from(level).unwrap_or(i32::MAX)
}

/// Level progress derived from the point total alone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progress {
  pub total_points: i64,
  pub level: i32,
  /// Fraction of the current level completed, in `[0, 1)`
  pub progress: f64,
  pub points_to_next_level: i64,
}

impl Progress {
  pub fn of(total_points: i64) -> Self {
    let total_points = total_points.max(0);
    let into_level = total_points % POINTS_PER_LEVEL;

    Self {
      total_points,
      level: level(total_points),
      progress: into_level as f64 / POINTS_PER_LEVEL as f64,
      points_to_next_level: POINTS_PER_LEVEL - into_level,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn level_boundaries() {
    assert_eq!(level(0), 1);
    assert_eq!(level(499), 1);
    assert_eq!(level(500), 2);
    assert_eq!(level(1499), 3);
    assert_eq!(level(-10), 1);
    assert_eq!(level(i64::MAX), i32::MAX);
  }

  #[test]
  fn progress_within_level() {
    let p = Progress::of(0);
    assert_eq!((p.level, p.progress, p.points_to_next_level), (1, 0.0, 500));

    let p = Progress::of(499);
    assert_eq!(p.level, 1);
    assert_eq!(p.points_to_next_level, 1);
    assert!((p.progress - 0.998).abs() < 1e-9);

    let p = Progress::of(750);
    assert_eq!((p.level, p.progress, p.points_to_next_level), (2, 0.5, 250));
  }
}
