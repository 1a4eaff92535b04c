//! Chain events and observers.
//!
//! Events are emitted while a chain runs so consumers can observe progress,
//! mirror it into a UI, or collect it in tests.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Events emitted while a chain runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ChainEvent {
  /// The chain has started draining its queue.
  ChainStarted { chain_id: String, queued: usize },

  /// A block has been taken off the queue and is being performed.
  BlockStarted { chain_id: String, index: usize },

  /// A block has signaled completion.
  BlockFinished { chain_id: String, index: usize },

  /// The queue drained with no cancellation observed.
  ChainCompleted { chain_id: String, performed: usize },

  /// Cancellation was observed at a block boundary; the remaining blocks
  /// were discarded.
  ChainCanceled { chain_id: String, performed: usize },
}

/// Trait for receiving chain events.
///
/// The chain calls `notify` for each event - implementations decide what to
/// do with them (log, forward, collect, ignore).
pub trait ChainObserver: Send + Sync {
  /// Called when a chain event occurs.
  fn notify(&self, event: ChainEvent);
}

/// An observer that discards all events.
#[derive(Debug, Clone, Default)]
pub struct NoopObserver;

impl ChainObserver for NoopObserver {
  fn notify(&self, _event: ChainEvent) {
    // Intentionally empty
  }
}

/// An observer that sends events to an unbounded channel.
///
/// Unbounded so a slow consumer never stalls the chain; the volume is one
/// event per block boundary.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
  sender: mpsc::UnboundedSender<ChainEvent>,
}

impl ChannelObserver {
  /// Create a new channel observer.
  pub fn new(sender: mpsc::UnboundedSender<ChainEvent>) -> Self {
    Self { sender }
  }
}

impl ChainObserver for ChannelObserver {
  fn notify(&self, event: ChainEvent) {
    // Ignore send errors - receiver may have been dropped
    let _ = self.sender.send(event);
  }
}
