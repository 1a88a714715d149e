//! Modal dialog lifecycle.
//!
//! The owner drives the open flag. Closing keeps the dialog rendered for the
//! exit animation, then unmounts it. While rendered, the dialog holds a
//! scroll-lock listener on the page.

use std::time::Duration;

use horizon_loom_core::logging::targets;
use horizon_loom_core::{ListenerGuard, ListenerKind, ListenerRegistry, Signal, TimerGuard, TimerId, Timers};

use crate::event::Key;
use crate::host::{Host, TimerHandler};

/// Time the dialog stays rendered after closing.
pub const DEFAULT_EXIT_DELAY: Duration = Duration::from_millis(200);

/// Why the dialog asked its owner to close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    Escape,
    Backdrop,
    CloseButton,
}

/// A modal dialog.
pub struct Modal {
    timers: Timers,
    listeners: ListenerRegistry,
    exit_delay: Duration,
    open: bool,
    title: Option<String>,
    scroll_lock: Option<ListenerGuard>,
    unmount_timer: Option<TimerGuard>,
    close_requested: Signal<CloseReason>,
}

impl Modal {
    pub fn new(host: &Host) -> Self {
        Self {
            timers: host.timers().clone(),
            listeners: host.listeners().clone(),
            exit_delay: DEFAULT_EXIT_DELAY,
            open: false,
            title: None,
            scroll_lock: None,
            unmount_timer: None,
            close_requested: Signal::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_exit_delay(mut self, delay: Duration) -> Self {
        self.exit_delay = delay;
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Emitted when the user asks to close; the owner decides.
    pub fn close_requested(&self) -> &Signal<CloseReason> {
        &self.close_requested
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether the dialog is rendered (open, or playing its exit animation).
    pub fn is_mounted(&self) -> bool {
        self.scroll_lock.is_some()
    }

    /// Whether the dialog ignores pointer input (while closing).
    pub fn is_interactive(&self) -> bool {
        self.open
    }

    /// Apply the owner's open flag.
    pub fn set_open(&mut self, open: bool) {
        if open == self.open {
            return;
        }
        self.open = open;
        tracing::debug!(target: targets::OVERLAY, open, "modal");
        if open {
            self.unmount_timer = None;
            if self.scroll_lock.is_none() {
                self.scroll_lock = Some(self.listeners.acquire(ListenerKind::ScrollLock));
            }
        } else if self.is_mounted() {
            if self.exit_delay.is_zero() {
                self.unmount();
            } else {
                self.unmount_timer = Some(self.timers.one_shot(self.exit_delay));
            }
        }
    }

    /// Close and unmount immediately.
    pub fn force_close(&mut self) {
        self.open = false;
        self.unmount();
    }

    /// Handle a key press. Escape requests close while open.
    pub fn handle_key(&mut self, key: Key) -> bool {
        if self.open && key == Key::Escape {
            self.request_close(CloseReason::Escape);
            true
        } else {
            false
        }
    }

    /// Handle a click on the backdrop.
    pub fn handle_backdrop_click(&mut self) -> bool {
        self.request_close(CloseReason::Backdrop)
    }

    /// Handle a click on the header's close button.
    pub fn handle_close_button(&mut self) -> bool {
        self.request_close(CloseReason::CloseButton)
    }

    fn request_close(&self, reason: CloseReason) -> bool {
        if !self.open {
            return false;
        }
        self.close_requested.emit(reason);
        true
    }

    fn unmount(&mut self) {
        self.unmount_timer = None;
        if self.scroll_lock.take().is_some() {
            tracing::debug!(target: targets::OVERLAY, "modal unmounted");
        }
    }
}

impl TimerHandler for Modal {
    fn handle_timer(&mut self, id: TimerId) -> bool {
        if self.unmount_timer.as_ref().is_some_and(|t| t.id() == id) {
            self.unmount();
            true
        } else {
            false
        }
    }
}

impl std::fmt::Debug for Modal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Modal")
            .field("open", &self.open)
            .field("mounted", &self.is_mounted())
            .field("title", &self.title)
            .finish()
    }
}
