//! Integration tests for timers and listeners driven the way a host loop does.

use std::sync::Arc;
use std::time::Duration;

use horizon_loom_core::{ListenerKind, ListenerRegistry, ManualClock, Signal, TimerId, Timers};
use parking_lot::Mutex;

fn setup() -> (Arc<ManualClock>, Timers) {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("horizon_loom_core=trace")
        .try_init();
    let clock = Arc::new(ManualClock::new());
    let timers = Timers::with_clock(clock.clone());
    (clock, timers)
}

/// A component that counts how often its own timer fired.
struct Blinker {
    timer: Option<horizon_loom_core::TimerGuard>,
    blinks: u32,
}

impl Blinker {
    fn handle_timer(&mut self, id: TimerId) -> bool {
        match &self.timer {
            Some(guard) if guard.id() == id => {
                self.blinks += 1;
                true
            }
            _ => false,
        }
    }
}

#[test]
fn host_loop_forwards_fired_ids() {
    let (clock, timers) = setup();
    let mut blinker = Blinker {
        timer: Some(timers.repeating(Duration::from_millis(100))),
        blinks: 0,
    };
    let unrelated = timers.one_shot(Duration::from_millis(150));

    for _ in 0..3 {
        clock.advance(Duration::from_millis(100));
        for id in timers.process_expired() {
            if !blinker.handle_timer(id) {
                assert_eq!(id, unrelated.id());
            }
        }
    }

    assert_eq!(blinker.blinks, 3);
    assert!(!unrelated.is_active());

    blinker.timer = None;
    assert_eq!(timers.active_count(), 0);
}

#[test]
fn replacing_a_guard_cancels_the_old_timer() {
    let (clock, timers) = setup();
    let first = timers.one_shot(Duration::from_millis(200));
    let first_id = first.id();

    clock.advance(Duration::from_millis(100));
    let mut slot = Some(first);
    assert!(timers.is_active(first_id));
    drop(slot.replace(timers.one_shot(Duration::from_millis(200))));
    let second_id = slot.as_ref().map(|g| g.id());

    clock.advance(Duration::from_millis(150));
    assert!(timers.process_expired().is_empty());
    assert!(!timers.is_active(first_id));

    clock.advance(Duration::from_millis(50));
    assert_eq!(timers.process_expired().first().copied(), second_id);
}

#[test]
fn timer_handles_are_shared_across_clones() {
    let (clock, timers) = setup();
    let other = timers.clone();
    let id = other.start_one_shot(Duration::from_millis(10));
    assert!(timers.is_active(id));
    assert_eq!(timers.time_until_next(), Some(Duration::from_millis(10)));

    clock.advance(Duration::from_millis(10));
    assert_eq!(timers.process_expired(), vec![id]);
    assert_eq!(timers.time_until_next(), None);
}

#[test]
fn signal_reports_listener_release() {
    let registry = ListenerRegistry::new();
    let released = Signal::<usize>::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = seen.clone();
    released.connect(move |count| seen_clone.lock().push(*count));

    let guards: Vec<_> = [ListenerKind::WindowResize, ListenerKind::WindowScroll]
        .into_iter()
        .map(|kind| registry.acquire(kind))
        .collect();
    released.emit(registry.active_count());

    drop(guards);
    released.emit(registry.active_count());

    assert_eq!(*seen.lock(), vec![2, 0]);
}
