//! Outside-click dismissal.
//!
//! An [`OutsideDismiss`] watches pointer-downs while it is active and reports
//! the ones that land outside every region it knows about: the primary region
//! (the component itself) plus an allow-list of extra regions such as a
//! dropdown list rendered elsewhere in the tree.
//!
//! The global pointer-down listener is only held while active.

use std::sync::Arc;

use horizon_loom_core::logging::targets;
use horizon_loom_core::{ListenerGuard, ListenerKind, ListenerRegistry, Point, Rect, Signal};
use parking_lot::RwLock;

/// A shared handle to an element's bounding box.
///
/// The host updates the bounds on layout; every clone sees the new bounds.
#[derive(Debug, Clone, Default)]
pub struct Region {
    bounds: Arc<RwLock<Rect>>,
}

static_assertions::assert_impl_all!(Region: Send, Sync);

impl Region {
    /// Create a region with initial bounds.
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds: Arc::new(RwLock::new(bounds)),
        }
    }

    /// The current bounds.
    pub fn bounds(&self) -> Rect {
        *self.bounds.read()
    }

    /// Replace the bounds after a layout pass.
    pub fn set_bounds(&self, bounds: Rect) {
        *self.bounds.write() = bounds;
    }

    /// Check whether a point lies inside the current bounds.
    pub fn contains(&self, point: Point) -> bool {
        self.bounds.read().contains(point)
    }

    /// Check whether two handles refer to the same region.
    pub fn same_region(&self, other: &Region) -> bool {
        Arc::ptr_eq(&self.bounds, &other.bounds)
    }
}

/// Detects pointer-downs outside a set of regions.
pub struct OutsideDismiss {
    primary: Region,
    allowed: Vec<Region>,
    listeners: ListenerRegistry,
    listener: Option<ListenerGuard>,
    dismissed: Signal<Point>,
}

impl OutsideDismiss {
    /// Create an inactive detector for the given primary region.
    pub fn new(listeners: &ListenerRegistry, primary: Region) -> Self {
        Self {
            primary,
            allowed: Vec::new(),
            listeners: listeners.clone(),
            listener: None,
            dismissed: Signal::new(),
        }
    }

    /// Add a region to the allow-list (builder form).
    pub fn with_allowed(mut self, region: Region) -> Self {
        self.allow(region);
        self
    }

    /// Add a region to the allow-list.
    pub fn allow(&mut self, region: Region) {
        if !self.allowed.iter().any(|r| r.same_region(&region)) {
            self.allowed.push(region);
        }
    }

    /// Remove a region from the allow-list.
    pub fn disallow(&mut self, region: &Region) {
        self.allowed.retain(|r| !r.same_region(region));
    }

    pub fn primary(&self) -> &Region {
        &self.primary
    }

    pub fn is_active(&self) -> bool {
        self.listener.is_some()
    }

    /// Start watching pointer-downs.
    pub fn activate(&mut self) {
        if self.listener.is_none() {
            self.listener = Some(self.listeners.acquire(ListenerKind::PointerDown));
            tracing::trace!(target: targets::DISMISS, "outside dismiss activated");
        }
    }

    /// Stop watching pointer-downs and release the listener.
    pub fn deactivate(&mut self) {
        if self.listener.take().is_some() {
            tracing::trace!(target: targets::DISMISS, "outside dismiss deactivated");
        }
    }

    /// Activate or deactivate.
    pub fn set_active(&mut self, active: bool) {
        if active {
            self.activate();
        } else {
            self.deactivate();
        }
    }

    /// Handle a pointer-down from the host.
    ///
    /// Returns `true` (and emits `dismissed`) if the detector is active and
    /// the point lies outside the primary region and every allowed region.
    pub fn handle_pointer_down(&self, point: Point) -> bool {
        if !self.is_active() {
            return false;
        }
        if self.primary.contains(point) || self.allowed.iter().any(|r| r.contains(point)) {
            return false;
        }
        tracing::debug!(target: targets::DISMISS, x = point.x, y = point.y, "pointer down outside");
        self.dismissed.emit(point);
        true
    }

    /// Signal emitted once per outside pointer-down while active.
    pub fn dismissed(&self) -> &Signal<Point> {
        &self.dismissed
    }
}

impl std::fmt::Debug for OutsideDismiss {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutsideDismiss")
            .field("primary", &self.primary.bounds())
            .field("allowed", &self.allowed.len())
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn setup() -> (ListenerRegistry, OutsideDismiss) {
        let listeners = ListenerRegistry::new();
        let dismiss = OutsideDismiss::new(&listeners, Region::new(Rect::new(0.0, 0.0, 100.0, 40.0)));
        (listeners, dismiss)
    }

    #[test]
    fn test_inactive_ignores_pointer() {
        let (listeners, dismiss) = setup();
        assert!(!dismiss.handle_pointer_down(Point::new(500.0, 500.0)));
        assert_eq!(listeners.active_count(), 0);
    }

    #[test]
    fn test_outside_emits_once_per_pointer_down() {
        let (_listeners, mut dismiss) = setup();
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = count.clone();
        dismiss.dismissed().connect(move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        dismiss.activate();
        assert!(!dismiss.handle_pointer_down(Point::new(10.0, 10.0)));
        assert!(dismiss.handle_pointer_down(Point::new(10.0, 200.0)));
        assert!(dismiss.handle_pointer_down(Point::new(10.0, 200.0)));
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_allowed_region_is_not_outside() {
        let (_listeners, dismiss) = setup();
        let list = Region::new(Rect::new(0.0, 48.0, 100.0, 200.0));
        let mut dismiss = dismiss.with_allowed(list.clone());
        dismiss.activate();

        assert!(!dismiss.handle_pointer_down(Point::new(50.0, 100.0)));

        // The host moves the list; the detector sees the new bounds.
        list.set_bounds(Rect::new(300.0, 300.0, 50.0, 50.0));
        assert!(dismiss.handle_pointer_down(Point::new(50.0, 100.0)));
        assert!(!dismiss.handle_pointer_down(Point::new(320.0, 320.0)));

        dismiss.disallow(&list);
        assert!(dismiss.handle_pointer_down(Point::new(320.0, 320.0)));
    }

    #[test]
    fn test_listener_held_only_while_active() {
        let (listeners, mut dismiss) = setup();
        dismiss.activate();
        dismiss.activate();
        assert_eq!(listeners.count_of(ListenerKind::PointerDown), 1);

        dismiss.deactivate();
        assert_eq!(listeners.active_count(), 0);

        dismiss.set_active(true);
        drop(dismiss);
        assert_eq!(listeners.active_count(), 0);
    }
}
