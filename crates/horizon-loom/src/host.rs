//! The services a host provides to every component.
//!
//! A [`Host`] bundles the shared [`Timers`] and [`ListenerRegistry`]. Each
//! component clones the handles it needs at construction. The host loop polls
//! expired timers and forwards them through [`Host::dispatch_expired`] to the
//! components that implement [`TimerHandler`].

use std::sync::Arc;
use std::time::Duration;

use horizon_loom_core::{Clock, ListenerRegistry, ManualClock, TimerId, Timers};

/// A component that owns timers.
pub trait TimerHandler {
    /// Handle a fired timer.
    ///
    /// Returns `true` if the id belonged to this component. Ids the component
    /// no longer holds are ignored.
    fn handle_timer(&mut self, id: TimerId) -> bool;
}

/// Shared timer and listener services.
#[derive(Debug, Clone, Default)]
pub struct Host {
    timers: Timers,
    listeners: ListenerRegistry,
}

static_assertions::assert_impl_all!(Host: Send, Sync, Clone);

impl Host {
    /// Create a host driven by the system clock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a host driven by the given clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            timers: Timers::with_clock(clock),
            listeners: ListenerRegistry::new(),
        }
    }

    /// Create a host driven by a fresh [`ManualClock`], returned alongside.
    pub fn manual() -> (Self, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        (Self::with_clock(clock.clone()), clock)
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    /// Time until the next timer fires, for sleeping the host loop.
    pub fn time_until_next(&self) -> Option<Duration> {
        self.timers.time_until_next()
    }

    /// Forward every expired timer to the handlers.
    ///
    /// Each id goes to the first handler that claims it. Returns the number
    /// of ids that were claimed.
    pub fn dispatch_expired(&self, handlers: &mut [&mut dyn TimerHandler]) -> usize {
        let mut claimed = 0;
        for id in self.timers.process_expired() {
            if handlers.iter_mut().any(|handler| handler.handle_timer(id)) {
                claimed += 1;
            }
        }
        claimed
    }
}
