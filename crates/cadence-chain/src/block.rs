//! Chain blocks: the units a chain performs.

use std::sync::Arc;

use async_trait::async_trait;
use cadence_transition::{TransitionDriver, TransitionSpec};
use tracing::warn;

/// Caller-supplied payload for a block.
pub type Work = Box<dyn FnOnce() + Send>;

/// Per-block observer for a transition's completion flag.
pub type TransitionObserver = Box<dyn FnOnce(bool) + Send>;

/// A unit of work in a chain.
///
/// The chain performs blocks strictly one at a time and advances when
/// `perform` returns; returning is the completion signal. A block is
/// performed at most once and knows nothing about the chain or its position
/// in it, which keeps the runner closed while new block kinds are added.
#[async_trait]
pub trait Block: Send {
  /// Perform the block's work.
  async fn perform(&mut self);
}

/// Runs its work synchronously, inside the chain's own poll.
pub struct ImmediateBlock {
  work: Option<Work>,
}

impl ImmediateBlock {
  pub fn new(work: impl FnOnce() + Send + 'static) -> Self {
    Self {
      work: Some(Box::new(work)),
    }
  }

  /// A block with no payload; performs nothing and advances.
  pub fn noop() -> Self {
    Self { work: None }
  }
}

#[async_trait]
impl Block for ImmediateBlock {
  async fn perform(&mut self) {
    if let Some(work) = self.work.take() {
      work();
    }
  }
}

/// Offloads its work to the blocking pool and resumes on the chain's task.
///
/// The block after this one always runs back on the chain's own context,
/// never on the worker that ran the payload.
pub struct DeferredBlock {
  work: Option<Work>,
}

impl DeferredBlock {
  pub fn new(work: impl FnOnce() + Send + 'static) -> Self {
    Self {
      work: Some(Box::new(work)),
    }
  }

  pub fn noop() -> Self {
    Self { work: None }
  }
}

#[async_trait]
impl Block for DeferredBlock {
  async fn perform(&mut self) {
    let Some(work) = self.work.take() else {
      return;
    };

    // There is no checked failure channel for payloads; a panicked worker is
    // logged and the chain keeps advancing.
    if let Err(e) = tokio::task::spawn_blocking(work).await {
      warn!(error = %e, "deferred block worker failed");
    }
  }
}

/// Runs a timed transition through a [`TransitionDriver`].
///
/// The driver's completion flag is forwarded to the block's own observer (if
/// any) and the chain advances regardless of it. Without a frame the block
/// reports `false` to its observer and performs no transition at all.
pub struct TransitionBlock {
  spec: TransitionSpec,
  driver: Arc<dyn TransitionDriver>,
  frame: Option<Work>,
  completion: Option<TransitionObserver>,
}

impl TransitionBlock {
  pub fn new(spec: TransitionSpec, driver: Arc<dyn TransitionDriver>) -> Self {
    Self {
      spec,
      driver,
      frame: None,
      completion: None,
    }
  }

  /// Attach the state change the transition applies.
  pub fn with_frame(mut self, frame: impl FnOnce() + Send + 'static) -> Self {
    self.frame = Some(Box::new(frame));
    self
  }

  /// Attach an observer for the driver's completion flag.
  ///
  /// The observer fires at most once; a block dropped before performing
  /// drops it unfired.
  pub fn with_completion(mut self, completion: impl FnOnce(bool) + Send + 'static) -> Self {
    self.completion = Some(Box::new(completion));
    self
  }

  pub fn spec(&self) -> TransitionSpec {
    self.spec
  }
}

#[async_trait]
impl Block for TransitionBlock {
  async fn perform(&mut self) {
    let completion = self.completion.take();

    let Some(frame) = self.frame.take() else {
      // Nothing to transition: report "did not complete" and move on.
      if let Some(completion) = completion {
        completion(false);
      }
      return;
    };

    let finished = self.driver.run(self.spec, frame).await;
    if let Some(completion) = completion {
      completion(finished);
    }
  }
}
