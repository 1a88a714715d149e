//! Timer system for Horizon Loom.
//!
//! Provides cancellable one-shot and repeating timers. Time comes from an
//! injectable [`Clock`], so a host can drive timers from the real clock
//! ([`SystemClock`]) while tests drive them deterministically
//! ([`ManualClock`]).
//!
//! The host loop polls [`Timers::process_expired`] and forwards every fired
//! [`TimerId`] to the components; each component recognizes the ids it holds
//! and ignores the rest.
//!
//! Components hold their pending timers as [`TimerGuard`]s. Dropping a guard
//! stops the timer, so replacing a pending timer or tearing down the owner
//! never leaves a callback scheduled against state that no longer exists.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::error::{Result, TimerError};
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a timer.
    pub struct TimerId;
}

/// A source of monotonic time.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> Instant;
}

/// The real monotonic clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use horizon_loom_core::{Clock, ManualClock};
///
/// let clock = ManualClock::new();
/// let start = clock.now();
/// clock.advance(Duration::from_millis(50));
/// assert_eq!(clock.now() - start, Duration::from_millis(50));
/// ```
#[derive(Debug)]
pub struct ManualClock {
    origin: Instant,
    elapsed: Mutex<Duration>,
}

impl ManualClock {
    /// Create a manual clock starting at the current instant.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed: Mutex::new(Duration::ZERO),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        *self.elapsed.lock() += by;
    }

    /// Total time advanced since creation.
    pub fn elapsed(&self) -> Duration {
        *self.elapsed.lock()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + *self.elapsed.lock()
    }
}

/// The type of timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Fires once after the specified duration.
    OneShot,
    /// Fires repeatedly at the specified interval.
    Repeating,
}

#[derive(Debug)]
struct TimerData {
    next_fire: Instant,
    interval: Duration,
    kind: TimerKind,
}

/// An entry in the timer queue (min-heap by fire time, then by start order).
#[derive(Debug, Clone, Copy)]
struct TimerQueueEntry {
    id: TimerId,
    fire_time: Instant,
    sequence: u64,
}

impl PartialEq for TimerQueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.fire_time == other.fire_time && self.sequence == other.sequence
    }
}

impl Eq for TimerQueueEntry {}

impl PartialOrd for TimerQueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimerQueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap; equal fire times fire in start order.
        other
            .fire_time
            .cmp(&self.fire_time)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Manages all timers started through one [`Timers`] handle.
struct TimerManager {
    clock: Arc<dyn Clock>,
    timers: SlotMap<TimerId, TimerData>,
    queue: BinaryHeap<TimerQueueEntry>,
    sequence: u64,
}

impl TimerManager {
    fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            timers: SlotMap::with_key(),
            queue: BinaryHeap::new(),
            sequence: 0,
        }
    }

    fn start(&mut self, interval: Duration, kind: TimerKind) -> TimerId {
        let next_fire = self.clock.now() + interval;
        let id = self.timers.insert(TimerData {
            next_fire,
            interval,
            kind,
        });
        self.push(id, next_fire);
        tracing::trace!(target: targets::TIMER, ?id, ?interval, ?kind, "timer started");
        id
    }

    fn push(&mut self, id: TimerId, fire_time: Instant) {
        self.sequence += 1;
        self.queue.push(TimerQueueEntry {
            id,
            fire_time,
            sequence: self.sequence,
        });
    }

    fn stop(&mut self, id: TimerId) -> Result<()> {
        if self.timers.remove(id).is_some() {
            tracing::trace!(target: targets::TIMER, ?id, "timer stopped");
            Ok(())
        } else {
            Err(TimerError::InvalidTimerId.into())
        }
    }

    fn is_active(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    fn time_until_next(&mut self) -> Option<Duration> {
        // Drop stopped timers from the front of the queue.
        while let Some(entry) = self.queue.peek() {
            if self.is_live(entry) {
                break;
            }
            self.queue.pop();
        }

        let now = self.clock.now();
        self.queue
            .peek()
            .map(|entry| entry.fire_time.saturating_duration_since(now))
    }

    /// A queue entry is live if its timer still exists and it is the
    /// timer's current schedule (not a stale entry left by a restart).
    fn is_live(&self, entry: &TimerQueueEntry) -> bool {
        self.timers
            .get(entry.id)
            .is_some_and(|t| t.next_fire == entry.fire_time)
    }

    #[tracing::instrument(skip(self), target = "horizon_loom_core::timer", level = "trace")]
    fn process_expired(&mut self) -> Vec<TimerId> {
        let now = self.clock.now();
        let mut fired = Vec::new();

        while let Some(entry) = self.queue.peek().copied() {
            if entry.fire_time > now {
                break;
            }
            self.queue.pop();

            if !self.is_live(&entry) {
                continue;
            }

            let id = entry.id;
            tracing::trace!(target: targets::TIMER, ?id, "timer fired");
            fired.push(id);

            let Some(timer) = self.timers.get_mut(id) else {
                continue;
            };
            match timer.kind {
                TimerKind::OneShot => {
                    self.timers.remove(id);
                }
                TimerKind::Repeating => {
                    timer.next_fire = entry.fire_time + timer.interval;
                    let next_fire = timer.next_fire;
                    self.push(id, next_fire);
                }
            }
        }

        fired
    }
}

/// A cloneable, thread-safe handle to a set of timers.
///
/// All clones share the same timers and clock.
#[derive(Clone)]
pub struct Timers {
    inner: Arc<Mutex<TimerManager>>,
}

impl Timers {
    /// Create a timer set driven by the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a timer set driven by the given clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(TimerManager::new(clock))),
        }
    }

    /// The current instant according to this timer set's clock.
    pub fn now(&self) -> Instant {
        self.inner.lock().clock.now()
    }

    /// Start a one-shot timer and return its raw id.
    ///
    /// Prefer [`one_shot`](Self::one_shot), which stops the timer when the
    /// guard is dropped.
    pub fn start_one_shot(&self, duration: Duration) -> TimerId {
        self.inner.lock().start(duration, TimerKind::OneShot)
    }

    /// Start a repeating timer and return its raw id.
    ///
    /// The first fire occurs after `interval`.
    pub fn start_repeating(&self, interval: Duration) -> TimerId {
        self.inner.lock().start(interval, TimerKind::Repeating)
    }

    /// Start a one-shot timer owned by the returned guard.
    pub fn one_shot(&self, duration: Duration) -> TimerGuard {
        TimerGuard {
            timers: self.clone(),
            id: self.start_one_shot(duration),
        }
    }

    /// Start a repeating timer owned by the returned guard.
    pub fn repeating(&self, interval: Duration) -> TimerGuard {
        TimerGuard {
            timers: self.clone(),
            id: self.start_repeating(interval),
        }
    }

    /// Stop and remove a timer.
    ///
    /// Returns an error if the timer already fired (one-shot) or was stopped.
    pub fn stop(&self, id: TimerId) -> Result<()> {
        self.inner.lock().stop(id)
    }

    /// Check if a timer is still pending.
    pub fn is_active(&self, id: TimerId) -> bool {
        self.inner.lock().is_active(id)
    }

    /// Get the duration until the next timer fires, if any.
    pub fn time_until_next(&self) -> Option<Duration> {
        self.inner.lock().time_until_next()
    }

    /// Collect every timer whose fire time has passed, in fire order.
    ///
    /// One-shot timers are removed; repeating timers are rescheduled.
    pub fn process_expired(&self) -> Vec<TimerId> {
        self.inner.lock().process_expired()
    }

    /// Get the number of pending timers.
    pub fn active_count(&self) -> usize {
        self.inner.lock().timers.len()
    }
}

impl Default for Timers {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Timers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timers")
            .field("active", &self.active_count())
            .finish()
    }
}

/// Owns a pending timer; dropping the guard stops it.
#[must_use = "dropping a TimerGuard stops the timer immediately"]
pub struct TimerGuard {
    timers: Timers,
    id: TimerId,
}

impl TimerGuard {
    /// The id the host will report when this timer fires.
    pub fn id(&self) -> TimerId {
        self.id
    }

    /// Check if the timer is still pending.
    pub fn is_active(&self) -> bool {
        self.timers.is_active(self.id)
    }
}

impl Drop for TimerGuard {
    fn drop(&mut self) {
        // Already fired or stopped is fine.
        let _ = self.timers.stop(self.id);
    }
}

impl fmt::Debug for TimerGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerGuard").field("id", &self.id).finish()
    }
}

static_assertions::assert_impl_all!(Timers: Send, Sync);
