use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Duration used when a caller names no pace at all.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(200);

/// Named transition paces mapping to fixed durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speed {
  Slow,
  Normal,
  Fast,
}

impl Speed {
  /// The fixed duration this pace stands for.
  pub fn duration(self) -> Duration {
    match self {
      Speed::Slow => Duration::from_millis(600),
      Speed::Normal => Duration::from_millis(200),
      Speed::Fast => Duration::from_millis(100),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_speed_durations() {
    assert_eq!(Speed::Slow.duration(), Duration::from_millis(600));
    assert_eq!(Speed::Normal.duration(), DEFAULT_DURATION);
    assert_eq!(Speed::Fast.duration(), Duration::from_millis(100));
  }
}
