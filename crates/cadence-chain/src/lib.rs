//! Sequential chain runner for cadence.
//!
//! A [`Chain`] owns an ordered queue of [`Block`]s and performs them strictly
//! one at a time, advancing only when the current block signals completion.
//! Cancellation is cooperative and observed only at block boundaries: the
//! block in flight always runs to its end.
//!
//! # Architecture
//!
//! ```text
//! Chain
//! ├── immediate/deferred/transition(..) - fluent builders, each queues a block
//! ├── start() / start_detailed()        - drive the advance loop to the end
//! ├── start_detached()                  - fire-and-forget on a spawned task
//! └── cancel() / cancel_handle()        - cooperative, boundary-only cancel
//!
//! Block (perform-then-signal contract)
//! ├── ImmediateBlock  - sync work inside the chain's poll
//! ├── DeferredBlock   - work on the blocking pool, resume on the chain task
//! └── TransitionBlock - timed transition via a TransitionDriver
//! ```

mod block;
mod chain;
mod events;

pub use block::{Block, DeferredBlock, ImmediateBlock, TransitionBlock, TransitionObserver, Work};
pub use chain::{Chain, ChainOutcome};
pub use events::{ChainEvent, ChainObserver, ChannelObserver, NoopObserver};
pub use tokio_util::sync::CancellationToken;
