//! Core systems for Horizon Loom.
//!
//! This crate provides the foundational pieces the headless components are
//! built from:
//!
//! - **Geometry**: [`Point`], [`Size`] and [`Rect`] in logical pixels
//! - **Signal/Slot System**: Type-safe change notification
//! - **Property System**: Values with change detection
//! - **Timers**: Cancellable one-shot and repeating timers driven by an injectable [`Clock`]
//! - **Listeners**: Scoped acquisition of global listeners (outside clicks, resize, scroll)
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_loom_core::Signal;
//!
//! let value_changed = Signal::<i32>::new();
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! value_changed.emit(42);
//! value_changed.disconnect(conn_id);
//! ```
//!
//! # Timer Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use horizon_loom_core::{ManualClock, Timers};
//!
//! let clock = Arc::new(ManualClock::new());
//! let timers = Timers::with_clock(clock.clone());
//!
//! let guard = timers.one_shot(Duration::from_millis(150));
//! clock.advance(Duration::from_millis(150));
//!
//! assert_eq!(timers.process_expired(), vec![guard.id()]);
//! ```
//!
//! # Listener Example
//!
//! ```
//! use horizon_loom_core::{ListenerKind, ListenerRegistry};
//!
//! let listeners = ListenerRegistry::new();
//! {
//!     let _guard = listeners.acquire(ListenerKind::PointerDown);
//!     assert_eq!(listeners.active_count(), 1);
//! }
//! // Dropping the guard detaches the listener.
//! assert_eq!(listeners.active_count(), 0);
//! ```

mod error;
pub mod geometry;
pub mod listener;
pub mod logging;
pub mod property;
pub mod signal;
pub mod timer;

pub use error::{ListenerError, LoomError, Result, TimerError};
pub use geometry::{Point, Rect, Size};
pub use listener::{ListenerGuard, ListenerId, ListenerKind, ListenerRegistry};
pub use property::Property;
pub use signal::{ConnectionId, Signal};
pub use timer::{Clock, ManualClock, SystemClock, TimerGuard, TimerId, TimerKind, Timers};
