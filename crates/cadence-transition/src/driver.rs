use async_trait::async_trait;
use tokio::time;
use tracing::debug;

use crate::spec::TransitionSpec;

/// The state change a transition applies.
pub type TransitionFrame = Box<dyn FnOnce() + Send>;

/// Facility that runs a timed transition.
///
/// Implementations apply the frame somewhere between the delay and the end of
/// the duration and report whether the transition finished without
/// interruption. The chain runner treats the returned flag as informational
/// and advances either way. There is no watchdog: a driver that never returns
/// parks its chain forever.
#[async_trait]
pub trait TransitionDriver: Send + Sync {
  /// Run one transition to completion and report whether it finished cleanly.
  async fn run(&self, spec: TransitionSpec, frame: TransitionFrame) -> bool;
}

/// In-process driver built on the tokio timer.
///
/// Sleeps the delay, applies the frame, sleeps the duration, reports a clean
/// finish. Presentation flags in the spec are hints for richer backends and
/// do not change the timeline here. Zero durations fall through the timer
/// untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimerDriver;

#[async_trait]
impl TransitionDriver for TimerDriver {
  async fn run(&self, spec: TransitionSpec, frame: TransitionFrame) -> bool {
    time::sleep(spec.delay).await;

    frame();
    debug!(
      duration_ms = spec.duration.as_millis() as u64,
      delay_ms = spec.delay.as_millis() as u64,
      curve = ?spec.options.curve,
      "transition frame applied"
    );

    time::sleep(spec.duration).await;
    true
  }
}
