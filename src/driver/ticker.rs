//! Tick sources for the timer engine.
//!
//! The engine only needs "one tick, then the next, serially". Any periodic
//! scheduler can provide that by implementing [`TickSource`].

use std::future::Future;

use tokio::sync::mpsc;
use tokio::time::{interval_at, Duration, Instant, Interval, MissedTickBehavior};

/// Serial source of one-second ticks.
pub trait TickSource {
    /// Waits for the next tick.
    ///
    /// Resolves to `false` once the source is exhausted and will never tick
    /// again. Must be cancel safe: the engine polls it inside `select!`.
    fn tick(&mut self) -> impl Future<Output = bool> + Send;

    /// Re-arms the source so the next tick is a full period away.
    ///
    /// Called whenever an interval starts or resumes. Sources without a
    /// clock of their own ignore it.
    fn restart(&mut self) {}
}

// ============================================================================
// IntervalTicker
// ============================================================================

/// Wall-clock ticker backed by `tokio::time::interval`.
///
/// The first tick comes one period after creation or [`TickSource::restart`].
/// Ticks missed while the process was suspended are skipped, not replayed.
#[derive(Debug)]
pub struct IntervalTicker {
    interval: Interval,
}

impl IntervalTicker {
    /// Creates a ticker firing once per second.
    ///
    /// Must be called inside a tokio runtime.
    pub fn new() -> Self {
        Self::with_period(Duration::from_secs(1))
    }

    /// Creates a ticker with a custom period.
    pub fn with_period(period: Duration) -> Self {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self { interval }
    }
}

impl Default for IntervalTicker {
    fn default() -> Self {
        Self::new()
    }
}

impl TickSource for IntervalTicker {
    async fn tick(&mut self) -> bool {
        self.interval.tick().await;
        true
    }

    fn restart(&mut self) {
        self.interval.reset();
    }
}

// ============================================================================
// ChannelTicker
// ============================================================================

/// Ticker driven by messages, one tick per message.
///
/// Lets a host loop that already has its own periodic callback forward
/// ticks, and lets tests script ticks exactly. Exhausted once every
/// [`ChannelTickHandle`] is dropped and the queue is empty.
#[derive(Debug)]
pub struct ChannelTicker {
    rx: mpsc::UnboundedReceiver<()>,
}

/// Sending half of a [`ChannelTicker`].
#[derive(Debug, Clone)]
pub struct ChannelTickHandle {
    tx: mpsc::UnboundedSender<()>,
}

impl ChannelTicker {
    /// Creates a ticker and the handle that feeds it.
    pub fn new() -> (Self, ChannelTickHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { rx }, ChannelTickHandle { tx })
    }
}

impl ChannelTickHandle {
    /// Queues one tick. Returns false if the ticker is gone.
    pub fn tick(&self) -> bool {
        self.tx.send(()).is_ok()
    }

    /// Queues `n` ticks.
    pub fn tick_n(&self, n: u32) -> bool {
        (0..n).all(|_| self.tick())
    }
}

impl TickSource for ChannelTicker {
    async fn tick(&mut self) -> bool {
        self.rx.recv().await.is_some()
    }
}
