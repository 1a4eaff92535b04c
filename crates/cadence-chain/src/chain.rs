//! The chain: an ordered queue of blocks performed strictly one at a time.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use cadence_transition::{Speed, TimerDriver, TransitionDriver, TransitionSpec};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::block::{Block, DeferredBlock, ImmediateBlock, TransitionBlock};
use crate::events::{ChainEvent, ChainObserver, NoopObserver};

/// How a chain run ended.
///
/// This is the richer completion signal; the legacy flag returned by
/// [`Chain::start`] collapses both variants to `true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainOutcome {
  /// The queue drained; every block was performed.
  Completed { performed: usize },
  /// Cancellation was observed at a boundary; the remaining blocks were
  /// never performed.
  Canceled { performed: usize },
}

impl ChainOutcome {
  /// Number of blocks performed before the run ended.
  pub fn performed(self) -> usize {
    match self {
      ChainOutcome::Completed { performed } | ChainOutcome::Canceled { performed } => performed,
    }
  }

  pub fn was_canceled(self) -> bool {
    matches!(self, ChainOutcome::Canceled { .. })
  }
}

/// An ordered, single-use sequential runner of [`Block`]s.
///
/// Blocks are queued with the fluent builder methods and performed in queue
/// order once [`start`](Chain::start) is called; the chain advances only when
/// the current block signals completion by returning from `perform`.
/// Cancellation is cooperative: it never interrupts the block in flight, it
/// only stops the next one from starting.
///
/// A chain is single-use. The builder methods move it, `start` consumes it,
/// so queueing after start and re-entrant starts do not compile.
///
/// # Usage
///
/// ```ignore
/// let finished = Chain::new()
///   .immediate(|| println!("first"))
///   .deferred(|| expensive_work())
///   .transition_at(Speed::Fast, || apply_state())
///   .start()
///   .await;
/// ```
pub struct Chain {
  chain_id: String,
  blocks: VecDeque<Box<dyn Block>>,
  driver: Arc<dyn TransitionDriver>,
  observer: Arc<dyn ChainObserver>,
  cancel: CancellationToken,
}

impl Default for Chain {
  fn default() -> Self {
    Self::new()
  }
}

impl std::fmt::Debug for Chain {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Chain")
      .field("chain_id", &self.chain_id)
      .field("blocks", &self.blocks.len())
      .finish()
  }
}

impl Chain {
  /// Create an empty chain with the timer driver and no observer.
  pub fn new() -> Self {
    Self {
      chain_id: uuid::Uuid::new_v4().to_string(),
      blocks: VecDeque::new(),
      driver: Arc::new(TimerDriver),
      observer: Arc::new(NoopObserver),
      cancel: CancellationToken::new(),
    }
  }

  /// Replace the transition driver used by the builder conveniences.
  ///
  /// Blocks queued before this call keep the driver they were built with.
  pub fn driven_by(mut self, driver: Arc<dyn TransitionDriver>) -> Self {
    self.driver = driver;
    self
  }

  /// Replace the chain observer.
  pub fn observed_by(mut self, observer: Arc<dyn ChainObserver>) -> Self {
    self.observer = observer;
    self
  }

  /// Queue a block at the end of the chain.
  pub fn queue(mut self, block: Box<dyn Block>) -> Self {
    self.blocks.push_back(block);
    self
  }

  /// Queue work that runs synchronously on the chain's own context.
  pub fn immediate(self, work: impl FnOnce() + Send + 'static) -> Self {
    self.queue(Box::new(ImmediateBlock::new(work)))
  }

  /// Queue work that runs on the blocking pool; the chain resumes on its own
  /// context before the next block starts.
  pub fn deferred(self, work: impl FnOnce() + Send + 'static) -> Self {
    self.queue(Box::new(DeferredBlock::new(work)))
  }

  /// Queue a transition with the given duration, no delay, and default
  /// options.
  pub fn transition(self, duration: Duration, frame: impl FnOnce() + Send + 'static) -> Self {
    self.transition_with(TransitionSpec::new(duration), frame)
  }

  /// Queue a transition at a named pace.
  pub fn transition_at(self, speed: Speed, frame: impl FnOnce() + Send + 'static) -> Self {
    self.transition_with(TransitionSpec::new(speed.duration()), frame)
  }

  /// Queue a transition with a full spec.
  pub fn transition_with(self, spec: TransitionSpec, frame: impl FnOnce() + Send + 'static) -> Self {
    let block = TransitionBlock::new(spec, self.driver.clone()).with_frame(frame);
    self.queue(Box::new(block))
  }

  /// Unique id of this chain, as it appears in logs and events.
  pub fn chain_id(&self) -> &str {
    &self.chain_id
  }

  /// Number of queued blocks.
  pub fn len(&self) -> usize {
    self.blocks.len()
  }

  pub fn is_empty(&self) -> bool {
    self.blocks.is_empty()
  }

  /// Request cancellation.
  ///
  /// The request is monotonic and takes effect at the next block boundary; a
  /// block already performing runs to completion uninterrupted.
  pub fn cancel(&self) {
    self.cancel.cancel();
  }

  /// A handle for requesting cancellation from another task.
  pub fn cancel_handle(&self) -> CancellationToken {
    self.cancel.clone()
  }

  /// Drive the chain to its end and report the legacy completion flag.
  ///
  /// The flag is `true` even when the chain was canceled - an early stop and
  /// a full run are indistinguishable here. Use
  /// [`start_detailed`](Chain::start_detailed) to tell them apart.
  pub async fn start(self) -> bool {
    self.start_detailed().await;
    true
  }

  /// Drive the chain to its end and report how it got there.
  pub async fn start_detailed(mut self) -> ChainOutcome {
    debug!(chain_id = %self.chain_id, queued = self.blocks.len(), "chain started");
    self.observer.notify(ChainEvent::ChainStarted {
      chain_id: self.chain_id.clone(),
      queued: self.blocks.len(),
    });

    let mut performed = 0;
    let outcome = loop {
      if self.cancel.is_cancelled() {
        break ChainOutcome::Canceled { performed };
      }

      let Some(mut block) = self.blocks.pop_front() else {
        break ChainOutcome::Completed { performed };
      };

      self.observer.notify(ChainEvent::BlockStarted {
        chain_id: self.chain_id.clone(),
        index: performed,
      });

      block.perform().await;

      self.observer.notify(ChainEvent::BlockFinished {
        chain_id: self.chain_id.clone(),
        index: performed,
      });
      performed += 1;
    };

    match outcome {
      ChainOutcome::Completed { performed } => {
        debug!(chain_id = %self.chain_id, performed, "chain completed");
        self.observer.notify(ChainEvent::ChainCompleted {
          chain_id: self.chain_id.clone(),
          performed,
        });
      }
      ChainOutcome::Canceled { performed } => {
        debug!(
          chain_id = %self.chain_id,
          performed,
          discarded = self.blocks.len(),
          "chain canceled"
        );
        self.observer.notify(ChainEvent::ChainCanceled {
          chain_id: self.chain_id.clone(),
          performed,
        });
      }
    }

    outcome
  }

  /// Fire-and-forget: run the chain on a spawned task.
  ///
  /// Nobody receives the terminal notification; the outcome only reaches the
  /// log.
  pub fn start_detached(self) {
    let chain_id = self.chain_id.clone();
    tokio::spawn(async move {
      let outcome = self.start_detailed().await;
      debug!(
        chain_id = %chain_id,
        performed = outcome.performed(),
        canceled = outcome.was_canceled(),
        "detached chain finished"
      );
    });
  }
}
