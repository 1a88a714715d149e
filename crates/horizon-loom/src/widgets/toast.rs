//! Toast notification queue.
//!
//! Toasts are shown in FIFO order, dismiss themselves after a timeout, and
//! stay in the queue marked as exiting while their exit animation plays.

use std::time::Duration;

use horizon_loom_core::logging::targets;
use horizon_loom_core::{Signal, TimerGuard, TimerId, Timers};
use slotmap::{SlotMap, new_key_type};

use crate::host::{Host, TimerHandler};

/// Time before a toast dismisses itself.
pub const DEFAULT_AUTO_DISMISS: Duration = Duration::from_secs(5);
/// Time an exiting toast stays in the queue.
pub const DEFAULT_EXIT_DELAY: Duration = Duration::from_millis(300);

new_key_type! {
    /// Identifies a toast in a [`ToastQueue`].
    pub struct ToastId;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastKind {
    #[default]
    Success,
    Warning,
    Error,
}

/// A toast message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub message: String,
    pub kind: ToastKind,
    exiting: bool,
}

impl Toast {
    pub fn is_exiting(&self) -> bool {
        self.exiting
    }
}

struct Entry {
    toast: Toast,
    dismiss_timer: Option<TimerGuard>,
    removal_timer: Option<TimerGuard>,
}

/// Queue of visible toasts.
pub struct ToastQueue {
    timers: Timers,
    entries: SlotMap<ToastId, Entry>,
    order: Vec<ToastId>,
    auto_dismiss: Duration,
    exit_delay: Duration,
    changed: Signal<()>,
}

impl ToastQueue {
    pub fn new(host: &Host) -> Self {
        Self {
            timers: host.timers().clone(),
            entries: SlotMap::with_key(),
            order: Vec::new(),
            auto_dismiss: DEFAULT_AUTO_DISMISS,
            exit_delay: DEFAULT_EXIT_DELAY,
            changed: Signal::new(),
        }
    }

    pub fn with_auto_dismiss(mut self, after: Duration) -> Self {
        self.auto_dismiss = after;
        self
    }

    pub fn with_exit_delay(mut self, delay: Duration) -> Self {
        self.exit_delay = delay;
        self
    }

    /// Emitted whenever toasts are added, start exiting, or are removed.
    pub fn changed(&self) -> &Signal<()> {
        &self.changed
    }

    /// Show a toast.
    pub fn push(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        kind: ToastKind,
    ) -> ToastId {
        let toast = Toast {
            title: title.into(),
            message: message.into(),
            kind,
            exiting: false,
        };
        let id = self.entries.insert(Entry {
            toast,
            dismiss_timer: Some(self.timers.one_shot(self.auto_dismiss)),
            removal_timer: None,
        });
        self.order.push(id);
        tracing::debug!(target: targets::WIDGET, ?id, ?kind, "toast shown");
        self.changed.emit(());
        id
    }

    pub fn success(&mut self, title: impl Into<String>, message: impl Into<String>) -> ToastId {
        self.push(title, message, ToastKind::Success)
    }

    pub fn warning(&mut self, title: impl Into<String>, message: impl Into<String>) -> ToastId {
        self.push(title, message, ToastKind::Warning)
    }

    pub fn error(&mut self, title: impl Into<String>, message: impl Into<String>) -> ToastId {
        self.push(title, message, ToastKind::Error)
    }

    /// Start dismissing a toast.
    ///
    /// Unknown ids and toasts that are already exiting are left alone.
    pub fn dismiss(&mut self, id: ToastId) -> bool {
        let Some(entry) = self.entries.get_mut(id) else {
            return false;
        };
        if entry.toast.exiting {
            return false;
        }
        entry.toast.exiting = true;
        entry.dismiss_timer = None;
        entry.removal_timer = Some(self.timers.one_shot(self.exit_delay));
        self.changed.emit(());
        true
    }

    pub fn get(&self, id: ToastId) -> Option<&Toast> {
        self.entries.get(id).map(|e| &e.toast)
    }

    /// Toasts in the order they were shown.
    pub fn iter(&self) -> impl Iterator<Item = (ToastId, &Toast)> {
        self.order
            .iter()
            .filter_map(|&id| self.entries.get(id).map(|e| (id, &e.toast)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn remove(&mut self, id: ToastId) {
        if self.entries.remove(id).is_some() {
            self.order.retain(|&other| other != id);
            tracing::debug!(target: targets::WIDGET, ?id, "toast removed");
            self.changed.emit(());
        }
    }
}

impl TimerHandler for ToastQueue {
    fn handle_timer(&mut self, timer: TimerId) -> bool {
        let fired = |guard: &Option<TimerGuard>| guard.as_ref().is_some_and(|t| t.id() == timer);
        let hit = self.entries.iter().find_map(|(id, entry)| {
            if fired(&entry.dismiss_timer) {
                Some((id, false))
            } else if fired(&entry.removal_timer) {
                Some((id, true))
            } else {
                None
            }
        });
        match hit {
            Some((id, false)) => self.dismiss(id),
            Some((id, true)) => {
                self.remove(id);
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for ToastQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToastQueue")
            .field("len", &self.len())
            .field("auto_dismiss", &self.auto_dismiss)
            .field("exit_delay", &self.exit_delay)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let host = Host::new();
        let mut queue = ToastQueue::new(&host);
        queue.success("Saved", "Your changes were saved.");
        queue.error("Failed", "Could not reach the server.");
        let titles: Vec<_> = queue.iter().map(|(_, t)| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Saved", "Failed"]);
    }

    #[test]
    fn test_auto_dismiss_then_remove() {
        let (host, clock) = Host::manual();
        let mut queue = ToastQueue::new(&host);
        let id = queue.warning("Heads up", "Disk almost full");

        clock.advance(Duration::from_secs(5));
        host.dispatch_expired(&mut [&mut queue]);
        assert!(queue.get(id).is_some_and(Toast::is_exiting));

        clock.advance(Duration::from_millis(300));
        host.dispatch_expired(&mut [&mut queue]);
        assert!(queue.get(id).is_none());
        assert!(queue.is_empty());
        assert_eq!(host.timers().active_count(), 0);
    }

    #[test]
    fn test_manual_dismiss_cancels_auto_timer() {
        let (host, clock) = Host::manual();
        let mut queue = ToastQueue::new(&host);
        let id = queue.success("Copied", "");
        assert!(queue.dismiss(id));
        assert!(!queue.dismiss(id));

        clock.advance(Duration::from_millis(300));
        host.dispatch_expired(&mut [&mut queue]);
        assert!(queue.is_empty());

        // Removing again, or removing an id that never existed, is a no-op.
        assert!(!queue.dismiss(id));
        assert!(!queue.dismiss(ToastId::default()));
    }
}
