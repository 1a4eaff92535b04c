//! End-to-end tests for chains mixing every block variant.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use cadence_chain::{Chain, ChainEvent, ChainOutcome, ChannelObserver, TransitionBlock};
use cadence_transition::{TimerDriver, TransitionDriver, TransitionFrame, TransitionSpec};
use tokio::sync::mpsc;

/// A driver that applies the frame but reports the transition as interrupted.
struct InterruptedDriver;

#[async_trait]
impl TransitionDriver for InterruptedDriver {
  async fn run(&self, _spec: TransitionSpec, frame: TransitionFrame) -> bool {
    frame();
    false
  }
}

#[tokio::test]
async fn test_mixed_chain_runs_in_order() {
  let log = Arc::new(Mutex::new(Vec::new()));
  let push = |value: u32| {
    let log = log.clone();
    move || log.lock().unwrap().push(value)
  };

  let (tx, mut rx) = mpsc::unbounded_channel();
  let outcome = Chain::new()
    .observed_by(Arc::new(ChannelObserver::new(tx)))
    .immediate(push(1))
    .deferred(push(2))
    .transition(Duration::from_millis(5), push(3))
    .start_detailed()
    .await;

  assert_eq!(outcome, ChainOutcome::Completed { performed: 3 });
  assert_eq!(*log.lock().unwrap(), vec![1, 2, 3]);

  let mut events = Vec::new();
  while let Ok(event) = rx.try_recv() {
    events.push(event);
  }
  assert!(matches!(
    events.first(),
    Some(ChainEvent::ChainStarted { queued: 3, .. })
  ));
  assert!(matches!(
    events.last(),
    Some(ChainEvent::ChainCompleted { performed: 3, .. })
  ));
  // started + three block started/finished pairs + completed
  assert_eq!(events.len(), 8);
}

#[tokio::test]
async fn test_interrupted_transition_flag_reaches_observer_and_chain_advances() {
  let flag = Arc::new(Mutex::new(None));
  let counter = Arc::new(AtomicUsize::new(0));

  let block = TransitionBlock::new(
    TransitionSpec::new(Duration::from_millis(5)),
    Arc::new(InterruptedDriver),
  )
  .with_frame(|| {})
  .with_completion({
    let flag = flag.clone();
    move |finished| *flag.lock().unwrap() = Some(finished)
  });

  let outcome = Chain::new()
    .queue(Box::new(block))
    .immediate({
      let counter = counter.clone();
      move || {
        counter.fetch_add(1, Ordering::SeqCst);
      }
    })
    .start_detailed()
    .await;

  assert_eq!(outcome, ChainOutcome::Completed { performed: 2 });
  assert_eq!(*flag.lock().unwrap(), Some(false));
  assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_zero_duration_transition_completes() {
  let flag = Arc::new(Mutex::new(None));

  let block = TransitionBlock::new(TransitionSpec::new(Duration::ZERO), Arc::new(TimerDriver))
    .with_frame(|| {})
    .with_completion({
      let flag = flag.clone();
      move |finished| *flag.lock().unwrap() = Some(finished)
    });

  let outcome = Chain::new().queue(Box::new(block)).start_detailed().await;

  assert_eq!(outcome, ChainOutcome::Completed { performed: 1 });
  assert_eq!(*flag.lock().unwrap(), Some(true));
}

#[tokio::test]
async fn test_detached_chain_runs_without_a_watcher() {
  let counter = Arc::new(AtomicUsize::new(0));
  let (done_tx, done_rx) = tokio::sync::oneshot::channel();

  let bump = |counter: &Arc<AtomicUsize>| {
    let counter = counter.clone();
    move || {
      counter.fetch_add(1, Ordering::SeqCst);
    }
  };

  let chain = Chain::new()
    .immediate(bump(&counter))
    .immediate(bump(&counter))
    .immediate({
      let counter = counter.clone();
      move || {
        counter.fetch_add(1, Ordering::SeqCst);
        let _ = done_tx.send(());
      }
    });

  chain.start_detached();
  done_rx.await.unwrap();

  assert_eq!(counter.load(Ordering::SeqCst), 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_cancel_from_another_task_stops_at_the_boundary() {
  let counter = Arc::new(AtomicUsize::new(0));
  let mut chain = Chain::new();
  for _ in 0..5 {
    let counter = counter.clone();
    chain = chain.transition(Duration::from_millis(30), move || {
      counter.fetch_add(1, Ordering::SeqCst);
    });
  }
  let cancel = chain.cancel_handle();

  let run = tokio::spawn(chain.start_detailed());
  tokio::time::sleep(Duration::from_millis(45)).await;
  cancel.cancel();

  let outcome = run.await.unwrap();
  assert!(outcome.was_canceled());
  assert!(outcome.performed() < 5);
  assert_eq!(counter.load(Ordering::SeqCst), outcome.performed());
}
