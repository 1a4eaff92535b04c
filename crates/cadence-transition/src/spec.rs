use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Timing curve applied by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Curve {
  Linear,
  EaseIn,
  EaseOut,
  #[default]
  EaseInOut,
}

/// Presentation flags for a transition.
///
/// The chain runner never reads these; they ride along to whichever driver
/// runs the transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransitionOptions {
  #[serde(default)]
  pub curve: Curve,
  #[serde(default)]
  pub repeats: bool,
  #[serde(default)]
  pub autoreverse: bool,
}

/// Timing for a single transition: how long it runs, how long it waits before
/// starting, and the presentation flags handed to the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionSpec {
  pub duration: Duration,
  pub delay: Duration,
  pub options: TransitionOptions,
}

impl TransitionSpec {
  /// Create a spec with the given duration, no delay, and default options.
  pub fn new(duration: Duration) -> Self {
    Self {
      duration,
      delay: Duration::ZERO,
      options: TransitionOptions::default(),
    }
  }

  pub fn with_delay(mut self, delay: Duration) -> Self {
    self.delay = delay;
    self
  }

  pub fn with_options(mut self, options: TransitionOptions) -> Self {
    self.options = options;
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_spec_defaults_to_no_delay_and_ease_in_out() {
    let spec = TransitionSpec::new(Duration::from_millis(250));

    assert_eq!(spec.duration, Duration::from_millis(250));
    assert_eq!(spec.delay, Duration::ZERO);
    assert_eq!(spec.options.curve, Curve::EaseInOut);
    assert!(!spec.options.repeats);
    assert!(!spec.options.autoreverse);
  }
}
