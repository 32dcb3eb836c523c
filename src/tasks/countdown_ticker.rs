//! Countdown ticker background task

use std::{sync::Arc, time::Duration};
use tokio::{
    sync::{oneshot, watch},
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, info, warn};

use super::registry::{TimerGuard, TimerRegistry};
use crate::countdown::{Clock, CountdownSnapshot};

/// Start a countdown toward `target_ms`, re-sampling `clock` every `tick`.
///
/// The returned handle owns the ticker. Disposing or dropping it stops the
/// task, after which no further snapshots are published.
pub fn start_countdown(
    target_ms: i64,
    clock: Arc<dyn Clock>,
    tick: Duration,
    registry: &TimerRegistry,
) -> CountdownHandle {
    let initial = CountdownSnapshot::sample(target_ms, clock.now_ms());
    let (snapshot_tx, snapshot_rx) = watch::channel(initial);
    let (cancel_tx, cancel_rx) = oneshot::channel();
    let guard = registry.register();
    // The start sample is already published, so the first tick is one period out
    let first_tick = Instant::now() + tick;

    debug!(
        "Starting countdown to {} ({} remaining, tick {:?})",
        target_ms, initial.remaining, tick
    );

    let task = tokio::spawn(countdown_tick_task(
        target_ms,
        clock,
        first_tick,
        tick,
        snapshot_tx,
        cancel_rx,
        guard,
    ));

    CountdownHandle {
        target_ms,
        snapshot_rx,
        cancel_tx: Some(cancel_tx),
        task: Some(task),
    }
}

async fn countdown_tick_task(
    target_ms: i64,
    clock: Arc<dyn Clock>,
    first_tick: Instant,
    tick: Duration,
    snapshot_tx: watch::Sender<CountdownSnapshot>,
    mut cancel_rx: oneshot::Receiver<()>,
    _guard: TimerGuard,
) {
    let mut interval = interval_at(first_tick, tick);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut expiry_logged = snapshot_tx.borrow().expired;

    loop {
        tokio::select! {
            biased;

            // Handle disposed or dropped
            _ = &mut cancel_rx => {
                debug!("Countdown to {} cancelled", target_ms);
                break;
            }

            _ = interval.tick() => {
                let snapshot = CountdownSnapshot::sample(target_ms, clock.now_ms());
                if snapshot.expired && !expiry_logged {
                    info!("Countdown to {} reached zero", target_ms);
                    expiry_logged = true;
                }
                snapshot_tx.send_replace(snapshot);
            }
        }
    }
}

/// Owner of one running countdown
#[derive(Debug)]
pub struct CountdownHandle {
    target_ms: i64,
    snapshot_rx: watch::Receiver<CountdownSnapshot>,
    cancel_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl CountdownHandle {
    pub fn target_ms(&self) -> i64 {
        self.target_ms
    }

    /// Latest published snapshot
    pub fn current(&self) -> CountdownSnapshot {
        *self.snapshot_rx.borrow()
    }

    /// Receiver notified on every tick. Closes once the ticker stops.
    pub fn subscribe(&self) -> watch::Receiver<CountdownSnapshot> {
        self.snapshot_rx.clone()
    }

    /// Check if the ticker task is still alive
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Stop ticking and wait for the task to finish
    pub async fn dispose(mut self) {
        self.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                if !e.is_cancelled() {
                    warn!("Countdown task for {} ended abnormally: {}", self.target_ms, e);
                }
            }
        }
    }

    fn cancel(&mut self) {
        if let Some(cancel_tx) = self.cancel_tx.take() {
            // The task may already be gone
            let _ = cancel_tx.send(());
        }
    }
}

impl Drop for CountdownHandle {
    fn drop(&mut self) {
        self.cancel();
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::countdown::{CountdownState, ManualClock, MS_PER_DAY, MS_PER_MINUTE};

    const NOW: i64 = 1_700_000_000_000;
    const TICK: Duration = Duration::from_secs(1);

    fn start(target_ms: i64, clock: &ManualClock, registry: &TimerRegistry) -> CountdownHandle {
        start_countdown(target_ms, Arc::new(clock.clone()), TICK, registry)
    }

    /// Fixed clock that counts how often it is sampled
    #[derive(Debug, Default)]
    struct CountingClock {
        samples: AtomicUsize,
    }

    impl Clock for CountingClock {
        fn now_ms(&self) -> i64 {
            self.samples.fetch_add(1, Ordering::SeqCst);
            NOW
        }
    }

    #[tokio::test(start_paused = true)]
    async fn missed_ticks_are_coalesced() {
        let clock = Arc::new(CountingClock::default());
        let registry = TimerRegistry::new();
        let handle = start_countdown(NOW + MS_PER_DAY, clock.clone(), TICK, &registry);
        let mut rx = handle.subscribe();
        assert_eq!(clock.samples.load(Ordering::SeqCst), 1);

        // A stalled host misses five periods at once
        tokio::time::advance(TICK * 5).await;
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        assert_eq!(clock.samples.load(Ordering::SeqCst), 2);
        assert!(rx.has_changed().unwrap());
        rx.borrow_and_update();

        // Back on schedule: one sample per period
        tokio::time::advance(TICK).await;
        rx.changed().await.unwrap();
        assert_eq!(clock.samples.load(Ordering::SeqCst), 3);

        handle.dispose().await;
    }

    #[tokio::test(start_paused = true)]
    async fn publishes_initial_sample_on_start() {
        let clock = ManualClock::new(NOW);
        let registry = TimerRegistry::new();
        let handle = start(NOW + 7 * MS_PER_DAY + 33 * MS_PER_MINUTE, &clock, &registry);

        let snapshot = handle.current();
        assert_eq!(snapshot.remaining, CountdownState { days: 7, hours: 0, minutes: 33 });
        assert_eq!(snapshot.sampled_at_ms, NOW);
        assert!(!snapshot.expired);
        assert_eq!(registry.active(), 1);

        handle.dispose().await;
        assert_eq!(registry.active(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn tick_resamples_the_clock() {
        let clock = ManualClock::new(NOW);
        let registry = TimerRegistry::new();
        let handle = start(NOW + 7 * MS_PER_DAY + 33 * MS_PER_MINUTE, &clock, &registry);
        let mut rx = handle.subscribe();

        clock.advance(33 * MS_PER_MINUTE);
        tokio::time::advance(TICK).await;
        rx.changed().await.unwrap();

        let snapshot = *rx.borrow_and_update();
        assert_eq!(snapshot.remaining, CountdownState { days: 7, hours: 0, minutes: 0 });
        assert_eq!(snapshot.sampled_at_ms, NOW + 33 * MS_PER_MINUTE);
        assert_eq!(handle.current(), snapshot);

        handle.dispose().await;
    }

    #[tokio::test(start_paused = true)]
    async fn no_updates_after_dispose() {
        let clock = ManualClock::new(NOW);
        let registry = TimerRegistry::new();
        let handle = start(NOW + MS_PER_DAY, &clock, &registry);
        let mut rx = handle.subscribe();
        let before = handle.current();

        handle.dispose().await;
        assert_eq!(registry.active(), 0);

        clock.advance(MS_PER_DAY / 2);
        tokio::time::advance(TICK * 5).await;
        assert!(rx.changed().await.is_err());
        assert_eq!(*rx.borrow(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_cancels_the_ticker() {
        let clock = ManualClock::new(NOW);
        let registry = TimerRegistry::new();
        let handle = start(NOW + MS_PER_DAY, &clock, &registry);
        let mut rx = handle.subscribe();

        drop(handle);
        assert!(rx.changed().await.is_err());
        assert_eq!(registry.active(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn expired_target_keeps_ticking_at_zero() {
        let clock = ManualClock::new(NOW);
        let registry = TimerRegistry::new();
        let handle = start(NOW - 1000, &clock, &registry);
        let mut rx = handle.subscribe();

        assert!(handle.current().remaining.is_zero());
        assert!(handle.current().expired);

        for _ in 0..3 {
            clock.advance(MS_PER_MINUTE);
            tokio::time::advance(TICK).await;
            rx.changed().await.unwrap();
            assert_eq!(rx.borrow_and_update().remaining, CountdownState::ZERO);
        }
        assert!(handle.is_running());

        handle.dispose().await;
    }

    #[tokio::test(start_paused = true)]
    async fn instances_are_independent() {
        let clock = ManualClock::new(NOW);
        let registry = TimerRegistry::new();
        let first = start(NOW + MS_PER_DAY, &clock, &registry);
        let second = start(NOW + 2 * MS_PER_DAY, &clock, &registry);
        let mut rx = second.subscribe();
        assert_eq!(registry.active(), 2);

        first.dispose().await;
        assert_eq!(registry.active(), 1);

        tokio::time::advance(TICK).await;
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().remaining.days, 2);
        assert!(second.is_running());

        second.dispose().await;
        assert_eq!(registry.active(), 0);
    }
}
