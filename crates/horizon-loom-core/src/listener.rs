//! Scoped global listener bookkeeping.
//!
//! Overlays need process-wide listeners while they are active: a pointer-down
//! listener for outside-click dismissal, window resize and scroll listeners to
//! keep a floating element anchored, and a scroll lock while a modal is
//! rendered. The host owns the actual hooks; components only record which
//! listeners they hold through a [`ListenerRegistry`].
//!
//! Every acquisition returns a [`ListenerGuard`]. Dropping the guard releases
//! the listener, so deactivation, forced close and teardown all release it
//! without explicit bookkeeping. [`ListenerRegistry::active_count`] lets hosts
//! and tests assert that nothing leaks.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::error::{ListenerError, Result};
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for an acquired listener.
    pub struct ListenerId;
}

/// The kinds of global listener a component can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    /// Pointer-down anywhere in the document.
    PointerDown,
    /// Window resize.
    WindowResize,
    /// Window (or any scroll container) scroll.
    WindowScroll,
    /// Body scroll lock held by a modal.
    ScrollLock,
}

/// A cloneable, thread-safe record of acquired global listeners.
#[derive(Clone, Default)]
pub struct ListenerRegistry {
    inner: Arc<Mutex<SlotMap<ListenerId, ListenerKind>>>,
}

impl ListenerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire a listener of the given kind.
    ///
    /// The listener stays attached until the returned guard is dropped.
    pub fn acquire(&self, kind: ListenerKind) -> ListenerGuard {
        let id = self.inner.lock().insert(kind);
        tracing::trace!(target: targets::LISTENER, ?id, ?kind, "listener acquired");
        ListenerGuard {
            registry: self.clone(),
            id,
            kind,
        }
    }

    /// Release a listener by id.
    ///
    /// Guards call this on drop; releasing twice is an error.
    pub fn release(&self, id: ListenerId) -> Result<()> {
        match self.inner.lock().remove(id) {
            Some(kind) => {
                tracing::trace!(target: targets::LISTENER, ?id, ?kind, "listener released");
                Ok(())
            }
            None => Err(ListenerError::InvalidListenerId.into()),
        }
    }

    /// Check if a listener is still attached.
    pub fn is_attached(&self, id: ListenerId) -> bool {
        self.inner.lock().contains_key(id)
    }

    /// Total number of attached listeners.
    pub fn active_count(&self) -> usize {
        self.inner.lock().len()
    }

    /// Number of attached listeners of one kind.
    pub fn count_of(&self, kind: ListenerKind) -> usize {
        self.inner.lock().values().filter(|k| **k == kind).count()
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("active", &self.active_count())
            .finish()
    }
}

/// Holds an acquired listener; dropping the guard releases it.
#[must_use = "dropping a ListenerGuard releases the listener immediately"]
pub struct ListenerGuard {
    registry: ListenerRegistry,
    id: ListenerId,
    kind: ListenerKind,
}

impl ListenerGuard {
    pub fn id(&self) -> ListenerId {
        self.id
    }

    pub fn kind(&self) -> ListenerKind {
        self.kind
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        let _ = self.registry.release(self.id);
    }
}

impl fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerGuard")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .finish()
    }
}

static_assertions::assert_impl_all!(ListenerRegistry: Send, Sync);
static_assertions::assert_impl_all!(ListenerGuard: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_releases_on_drop() {
        let registry = ListenerRegistry::new();
        let guard = registry.acquire(ListenerKind::WindowResize);
        let id = guard.id();
        assert!(registry.is_attached(id));
        assert_eq!(registry.count_of(ListenerKind::WindowResize), 1);

        drop(guard);
        assert!(!registry.is_attached(id));
        assert_eq!(registry.active_count(), 0);
    }

    #[test]
    fn test_count_by_kind() {
        let registry = ListenerRegistry::new();
        let _a = registry.acquire(ListenerKind::PointerDown);
        let _b = registry.acquire(ListenerKind::PointerDown);
        let _c = registry.acquire(ListenerKind::ScrollLock);

        assert_eq!(registry.active_count(), 3);
        assert_eq!(registry.count_of(ListenerKind::PointerDown), 2);
        assert_eq!(registry.count_of(ListenerKind::WindowScroll), 0);
    }

    #[test]
    fn test_double_release_errors() {
        let registry = ListenerRegistry::new();
        let guard = registry.acquire(ListenerKind::PointerDown);
        let id = guard.id();
        registry.release(id).unwrap();
        assert!(registry.release(id).is_err());
        // The guard's own release on drop is silently ignored.
        drop(guard);
        assert_eq!(registry.active_count(), 0);
    }
}
