//! Logging facilities for Horizon Loom.
//!
//! Horizon Loom uses the `tracing` crate for instrumentation and never installs
//! a subscriber itself. To see logs, install one in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("horizon_loom=debug,horizon_loom_core=trace")
//!         .init();
//! }
//! ```
//!
//! Overlay lifecycle transitions are logged at `debug`, timer and signal
//! internals at `trace`, and recoverable environment failures (clipboard,
//! settings file) at `warn` or `error`.

/// Span names used throughout Horizon Loom for tracing.
pub mod span_names {
    /// Timer processing span.
    pub const TIMER: &str = "horizon_loom::timer";
    /// Signal emission span.
    pub const SIGNAL: &str = "horizon_loom::signal";
    /// Overlay lifecycle span.
    pub const OVERLAY: &str = "horizon_loom::overlay";
    /// Table projection span.
    pub const TABLE: &str = "horizon_loom::table";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "horizon_loom_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_loom_core::signal";
    /// Timer system target.
    pub const TIMER: &str = "horizon_loom_core::timer";
    /// Global listener bookkeeping target.
    pub const LISTENER: &str = "horizon_loom_core::listener";
    /// Overlay positioning and lifecycle target.
    pub const OVERLAY: &str = "horizon_loom::overlay";
    /// Outside-click dismissal target.
    pub const DISMISS: &str = "horizon_loom::dismiss";
    /// Keyboard navigation target.
    pub const NAVIGATOR: &str = "horizon_loom::navigator";
    /// Sorted/paginated table target.
    pub const TABLE: &str = "horizon_loom::table";
    /// Settings persistence target.
    pub const SETTINGS: &str = "horizon_loom::settings";
    /// Clipboard access target.
    pub const CLIPBOARD: &str = "horizon_loom::clipboard";
    /// Composite widget target.
    pub const WIDGET: &str = "horizon_loom::widget";
}
