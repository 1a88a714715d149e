//! Headless components.
//!
//! Each component owns its state and exposes methods for user events. None of
//! them draw anything:
//!
//! - [`Tooltip`]: hover/focus overlay with a show delay
//! - [`Combobox`]: searchable single or multi select
//! - [`DatePicker`]: date, time, date-time and range picking
//! - [`ColorPicker`]: hex input with preset swatches
//! - [`Slider`]: single or dual-thumb slider
//! - [`Tabs`]: tab set with explicitly registered triggers
//! - [`Collapse`]: expandable panels, optionally as an accordion
//! - [`Modal`]: dialog with deferred unmount and scroll lock
//! - [`ToastQueue`]: auto-dismissing notifications
//! - [`CopyButton`]: copy to clipboard with a confirmation state
//! - [`FileSelection`]: upload field selection with size limits
//!
//! Components that own timers implement [`TimerHandler`](crate::TimerHandler)
//! and must be passed to [`Host::dispatch_expired`](crate::Host::dispatch_expired).

mod collapse;
mod color_picker;
mod combobox;
mod copy_button;
mod date_picker;
mod file_selection;
mod modal;
mod slider;
mod tabs;
mod toast;
mod tooltip;

pub use collapse::{Collapse, CollapsePanel};
pub use color_picker::{ColorPicker, Contrast, PRESET_COLORS, contrast_for, is_hex_color, parse_hex_color};
pub use combobox::{ComboOption, Combobox, DEFAULT_PLACEHOLDER};
pub use copy_button::{CopyButton, DEFAULT_COPIED_DURATION};
pub use date_picker::{
    CalendarDay, DatePicker, DatePickerMode, DateValue, WEEKDAY_LABELS, month_grid, parse_time,
};
pub use file_selection::{FileSelection, SelectedFile, format_size};
pub use modal::{CloseReason, Modal};
pub use slider::{Slider, SliderValue, Thumb};
pub use tabs::{TabTrigger, Tabs};
pub use toast::{DEFAULT_AUTO_DISMISS, Toast, ToastId, ToastKind, ToastQueue};
pub use tooltip::Tooltip;
