//! Prelude module for Horizon Loom.
//!
//! ```
//! use horizon_loom::prelude::*;
//! ```
//!
//! This provides access to:
//! - Host services (`Host`, `TimerHandler`, `Timers`, `ListenerRegistry`)
//! - Signals and values (`Signal`, `ValueSync`)
//! - Geometry (`Point`, `Size`, `Rect`, `Region`)
//! - Building blocks (`Positioner`, `OutsideDismiss`, `KeyboardNavigator`)
//! - Tables and components

// ============================================================================
// Host services
// ============================================================================

pub use crate::{Host, TimerHandler};
pub use horizon_loom_core::{
    Clock, ListenerGuard, ListenerKind, ListenerRegistry, ManualClock, SystemClock, TimerGuard,
    TimerId, Timers,
};

// ============================================================================
// Signals and values
// ============================================================================

pub use crate::{ValueMode, ValueSync};
pub use horizon_loom_core::{ConnectionId, Property, Signal};

// ============================================================================
// Geometry and input
// ============================================================================

pub use crate::dismiss::{OutsideDismiss, Region};
pub use crate::event::Key;
pub use horizon_loom_core::{Point, Rect, Size};

// ============================================================================
// Building blocks
// ============================================================================

pub use crate::navigator::{KeyboardNavigator, NavAction, SelectionMode};
pub use crate::positioner::{OverlayState, Placement, Positioner, PositionerConfig, Side};
pub use crate::range::{DualThumb, RangeSelection, RangeValue};

// ============================================================================
// Tables
// ============================================================================

pub use crate::table::{CellValue, Column, SortDirection, SortSpec, SortedPaginatedView, TableRow};

// ============================================================================
// Components
// ============================================================================

pub use crate::widgets::{
    Collapse, ColorPicker, ComboOption, Combobox, CopyButton, DatePicker, DatePickerMode, DateValue,
    FileSelection, Modal, Slider, SliderValue, Tabs, ToastQueue, Tooltip,
};

// ============================================================================
// Settings
// ============================================================================

pub use crate::settings::{PreferenceStore, Settings, SettingsFormat};
