//! Ticker - cancellable periodic driver for one engine
//!
//! The ticker spawns a task on a tokio runtime that waits on an interval
//! and calls [`Tick::advance`] under the engine lock. Missed ticks are
//! delayed, never replayed: displayed time runs at `1 decisecond / period`
//! and is not corrected against the wall clock.
//!
//! Cancellation bumps a generation counter while the engine lock is held.
//! The task re-checks the generation under the same lock before every
//! advance, so no advance can run after `stop` returns.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

use clockity_core::Tick;

/// An engine shared between its commands and its ticker
pub type SharedEngine<E> = Arc<Mutex<E>>;

/// Periodic driver for one engine
pub struct Ticker<E: Tick> {
    engine: SharedEngine<E>,
    runtime: Handle,
    generation: Arc<AtomicU64>,
    /// Advances performed over the ticker's lifetime
    advances: Arc<AtomicU64>,
    task: Option<JoinHandle<()>>,
}

impl<E: Tick> Ticker<E> {
    pub fn new(engine: SharedEngine<E>, runtime: Handle) -> Self {
        Ticker {
            engine,
            runtime,
            generation: Arc::new(AtomicU64::new(0)),
            advances: Arc::new(AtomicU64::new(0)),
            task: None,
        }
    }

    /// Start driving the engine. Takes the engine lock.
    /// Returns false when the engine has nothing to drive.
    pub fn start(&mut self) -> bool {
        let engine = Arc::clone(&self.engine);
        let guard = engine.lock();
        self.start_locked(&guard)
    }

    /// Start driving while the caller already holds the engine lock.
    /// Any previous task is cancelled first.
    pub fn start_locked(&mut self, engine: &E) -> bool {
        self.stop_locked(engine);

        let Some(period) = engine.cadence() else {
            tracing::trace!("ticker not started: engine idle");
            return false;
        };

        let generation = self.generation.load(Ordering::Acquire);
        tracing::trace!(generation, period_ms = period.as_millis() as u64, "ticker started");

        self.task = Some(self.runtime.spawn(drive(
            Arc::clone(&self.engine),
            Arc::clone(&self.generation),
            generation,
            period,
            Arc::clone(&self.advances),
        )));
        true
    }

    /// Stop driving. Takes the engine lock, so it must not be called while
    /// holding it; use [`Ticker::stop_locked`] instead.
    pub fn stop(&mut self) {
        let engine = Arc::clone(&self.engine);
        let guard = engine.lock();
        self.stop_locked(&guard);
    }

    /// Stop driving while the caller holds the engine lock
    pub fn stop_locked(&mut self, _engine: &E) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    /// Whether a drive task is still alive
    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    pub fn advances(&self) -> u64 {
        self.advances.load(Ordering::Relaxed)
    }
}

impl<E: Tick> Drop for Ticker<E> {
    fn drop(&mut self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// First tick one period from now rather than immediately
fn periodic(period: Duration) -> Interval {
    let mut interval = time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

async fn drive<E: Tick>(
    engine: SharedEngine<E>,
    current: Arc<AtomicU64>,
    generation: u64,
    mut period: Duration,
    advances: Arc<AtomicU64>,
) {
    let mut interval = periodic(period);

    loop {
        interval.tick().await;

        let next = {
            let mut guard = engine.lock();
            if current.load(Ordering::Acquire) != generation {
                return;
            }
            guard.advance();
            guard.cadence()
        };
        advances.fetch_add(1, Ordering::Relaxed);

        match next {
            None => {
                tracing::trace!(generation, "ticker finished: engine idle");
                return;
            }
            Some(next) if next != period => {
                tracing::trace!(
                    generation,
                    period_ms = next.as_millis() as u64,
                    "ticker cadence changed"
                );
                period = next;
                interval = periodic(period);
            }
            Some(_) => {}
        }
    }
}
