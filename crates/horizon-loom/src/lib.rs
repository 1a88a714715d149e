//! Horizon Loom - headless state and positioning engine for GUI components.
//!
//! The crate holds the behavior of a component library without any
//! rendering: overlay positioning and lifecycle, outside-click dismissal,
//! keyboard list navigation, sorted and paginated tables, range selection,
//! controlled/uncontrolled values, and persisted preferences.
//!
//! A host application owns one [`Host`], creates components against it, and
//! forwards input events and expired timers to them.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use horizon_loom::prelude::*;
//!
//! let (host, clock) = Host::manual();
//! let trigger = Region::new(Rect::new(40.0, 100.0, 80.0, 32.0));
//! let mut tooltip = Tooltip::new(&host, trigger, "Save changes");
//!
//! tooltip.pointer_enter();
//! clock.advance(Duration::from_millis(200));
//! host.dispatch_expired(&mut [&mut tooltip]);
//!
//! assert!(tooltip.is_visible());
//! ```

pub use horizon_loom_core::*;

/// Core systems re-exported under their own path.
pub mod core {
    pub use horizon_loom_core::*;
}

pub mod dismiss;
mod error;
pub mod event;
mod host;
pub mod navigator;
pub mod platform;
pub mod positioner;
pub mod prelude;
pub mod range;
pub mod settings;
pub mod table;
mod value_sync;
pub mod widgets;

pub use error::{Error, Result};
pub use host::{Host, TimerHandler};
pub use value_sync::{ValueMode, ValueSync};
