//! Copy-to-clipboard button.

use std::time::Duration;

use horizon_loom_core::logging::targets;
use horizon_loom_core::{Signal, TimerGuard, TimerId, Timers};

use crate::host::{Host, TimerHandler};
use crate::platform::ClipboardBackend;

/// How long the "copied" indicator stays on.
pub const DEFAULT_COPIED_DURATION: Duration = Duration::from_secs(2);

/// A button that copies fixed text and briefly shows a confirmation.
pub struct CopyButton {
    text: String,
    clipboard: Box<dyn ClipboardBackend>,
    timers: Timers,
    duration: Duration,
    reset_timer: Option<TimerGuard>,
    copied_changed: Signal<bool>,
}

impl CopyButton {
    pub fn new(host: &Host, text: impl Into<String>, clipboard: Box<dyn ClipboardBackend>) -> Self {
        Self {
            text: text.into(),
            clipboard,
            timers: host.timers().clone(),
            duration: DEFAULT_COPIED_DURATION,
            reset_timer: None,
            copied_changed: Signal::new(),
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn is_copied(&self) -> bool {
        self.reset_timer.is_some()
    }

    pub fn copied_changed(&self) -> &Signal<bool> {
        &self.copied_changed
    }

    /// Tooltip or accessible label for the current state.
    pub fn label(&self) -> &'static str {
        if self.is_copied() { "Copied!" } else { "Copy to clipboard" }
    }

    /// Copy the text.
    ///
    /// On success the indicator turns on and a fresh reset timer replaces any
    /// pending one. A clipboard failure is logged and leaves the button idle.
    pub fn click(&mut self) -> bool {
        if let Err(err) = self.clipboard.set_text(&self.text) {
            tracing::warn!(target: targets::CLIPBOARD, error = %err, "failed to copy text");
            return false;
        }
        let was_copied = self.is_copied();
        self.reset_timer = Some(self.timers.one_shot(self.duration));
        if !was_copied {
            self.copied_changed.emit(true);
        }
        true
    }
}

impl TimerHandler for CopyButton {
    fn handle_timer(&mut self, id: TimerId) -> bool {
        if self.reset_timer.as_ref().is_some_and(|t| t.id() == id) {
            self.reset_timer = None;
            self.copied_changed.emit(false);
            true
        } else {
            false
        }
    }
}

impl std::fmt::Debug for CopyButton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CopyButton")
            .field("text", &self.text)
            .field("copied", &self.is_copied())
            .field("duration", &self.duration)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::ClipboardError;
    use std::sync::Arc;
    use parking_lot::Mutex;

    #[derive(Default, Clone)]
    struct MemoryClipboard {
        contents: Arc<Mutex<Option<String>>>,
        deny: bool,
    }

    impl ClipboardBackend for MemoryClipboard {
        fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            if self.deny {
                return Err(ClipboardError::new("permission denied"));
            }
            *self.contents.lock() = Some(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_copy_and_reset() {
        let (host, clock) = Host::manual();
        let clipboard = MemoryClipboard::default();
        let mut button = CopyButton::new(&host, "npm i horizon", Box::new(clipboard.clone()));

        assert!(button.click());
        assert_eq!(clipboard.contents.lock().as_deref(), Some("npm i horizon"));
        assert_eq!(button.label(), "Copied!");

        clock.advance(Duration::from_secs(2));
        host.dispatch_expired(&mut [&mut button]);
        assert!(!button.is_copied());
    }

    #[test]
    fn test_click_again_restarts_timer() {
        let (host, clock) = Host::manual();
        let mut button = CopyButton::new(&host, "x", Box::new(MemoryClipboard::default()))
            .with_duration(Duration::from_millis(500));
        button.click();
        clock.advance(Duration::from_millis(400));
        button.click();
        clock.advance(Duration::from_millis(400));
        host.dispatch_expired(&mut [&mut button]);
        assert!(button.is_copied());
        assert_eq!(host.timers().active_count(), 1);
    }

    #[test]
    fn test_failure_stays_idle() {
        let host = Host::new();
        let clipboard = MemoryClipboard { deny: true, ..Default::default() };
        let mut button = CopyButton::new(&host, "secret", Box::new(clipboard));
        assert!(!button.click());
        assert!(!button.is_copied());
        assert_eq!(button.label(), "Copy to clipboard");
    }
}
