//! Anchored positioning and open/close lifecycle for floating content.
//!
//! [`compute`] places a floating element next to its anchor on one of four
//! sides. The returned [`Placement`] is the point on the content's edge that
//! touches the gap, together with the transform origin the host uses for
//! enter/exit animation; the content is centered on the anchor along the
//! parallel axis.
//!
//! Near the viewport edges content may end up off-screen. Hosts that know the
//! viewport and the content size can opt into [`compute_with_collision`],
//! which flips to the opposite side when that side fits and then shifts the
//! content along the parallel axis to stay inside the viewport.
//!
//! [`Positioner`] adds the lifecycle:
//!
//! ```text
//! Closed --show--> Opening --show delay--> Open --hide--> Closing --exit delay--> Closed
//!                     |                     ^                |
//!                     +--------hide---------|----> Closed    |
//!                                           +------show------+
//! ```
//!
//! Content is mounted in `Open` and kept mounted through `Closing` so the
//! host can play an exit animation. Nothing is mounted in `Closed` or during
//! the show delay.

use std::time::Duration;

use horizon_loom_core::logging::targets;
use horizon_loom_core::{
    ListenerGuard, ListenerKind, ListenerRegistry, Rect, Signal, Size, TimerGuard, TimerId, Timers,
};

use crate::dismiss::Region;
use crate::host::{Host, TimerHandler};

/// Default gap between the anchor and the floating content, in pixels.
pub const DEFAULT_GAP: f32 = 8.0;

/// Default delay before content is shown.
pub const DEFAULT_SHOW_DELAY: Duration = Duration::from_millis(200);

/// Default delay between starting to close and unmounting.
pub const DEFAULT_EXIT_DELAY: Duration = Duration::from_millis(150);

/// The side of the anchor the content is placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

impl Side {
    /// The side across the anchor.
    pub fn opposite(self) -> Self {
        match self {
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Whether the content sits above or below the anchor.
    pub fn is_vertical(self) -> bool {
        matches!(self, Side::Top | Side::Bottom)
    }
}

/// The point the content scales from when it animates in or out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformOrigin {
    BottomCenter,
    TopCenter,
    RightCenter,
    LeftCenter,
}

impl TransformOrigin {
    /// The origin facing the anchor for content placed on `side`.
    pub fn for_side(side: Side) -> Self {
        match side {
            Side::Top => TransformOrigin::BottomCenter,
            Side::Bottom => TransformOrigin::TopCenter,
            Side::Left => TransformOrigin::RightCenter,
            Side::Right => TransformOrigin::LeftCenter,
        }
    }

    /// CSS `transform-origin` keywords.
    pub fn as_css(self) -> &'static str {
        match self {
            TransformOrigin::BottomCenter => "bottom center",
            TransformOrigin::TopCenter => "top center",
            TransformOrigin::RightCenter => "right center",
            TransformOrigin::LeftCenter => "left center",
        }
    }
}

/// Where to put floating content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub top: f32,
    pub left: f32,
    /// The side actually used (differs from the requested side after a flip).
    pub side: Side,
    pub transform_origin: TransformOrigin,
}

impl Placement {
    /// The rectangle the content occupies for a given content size.
    pub fn content_rect(&self, size: Size) -> Rect {
        let (x, y) = match self.side {
            Side::Top => (self.left - size.width / 2.0, self.top - size.height),
            Side::Bottom => (self.left - size.width / 2.0, self.top),
            Side::Left => (self.left - size.width, self.top - size.height / 2.0),
            Side::Right => (self.left, self.top - size.height / 2.0),
        };
        Rect::new(x, y, size.width, size.height)
    }
}

/// Place content next to `anchor` on `side`, `gap` pixels away.
pub fn compute(anchor: &Rect, side: Side, gap: f32) -> Placement {
    let center = anchor.center();
    let (top, left) = match side {
        Side::Top => (anchor.top() - gap, center.x),
        Side::Bottom => (anchor.bottom() + gap, center.x),
        Side::Left => (center.y, anchor.left() - gap),
        Side::Right => (center.y, anchor.right() + gap),
    };
    Placement {
        top,
        left,
        side,
        transform_origin: TransformOrigin::for_side(side),
    }
}

/// Viewport and content size for collision-aware placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionBounds {
    pub viewport: Rect,
    pub content: Size,
}

/// Place content like [`compute`], then keep it inside the viewport.
///
/// The content flips to the opposite side if it overflows the viewport on
/// the requested side and fits on the opposite one. It is then shifted along
/// the parallel axis so it stays inside the viewport where possible.
pub fn compute_with_collision(
    anchor: &Rect,
    side: Side,
    gap: f32,
    bounds: &CollisionBounds,
) -> Placement {
    let mut placement = compute(anchor, side, gap);

    if overflows_main_axis(&placement, bounds) {
        let flipped = compute(anchor, side.opposite(), gap);
        if !overflows_main_axis(&flipped, bounds) {
            placement = flipped;
        }
    }

    let rect = placement.content_rect(bounds.content);
    let viewport = bounds.viewport;
    if placement.side.is_vertical() {
        placement.left += shift_into(rect.left(), rect.right(), viewport.left(), viewport.right());
    } else {
        placement.top += shift_into(rect.top(), rect.bottom(), viewport.top(), viewport.bottom());
    }

    placement
}

fn overflows_main_axis(placement: &Placement, bounds: &CollisionBounds) -> bool {
    let rect = placement.content_rect(bounds.content);
    let viewport = bounds.viewport;
    match placement.side {
        Side::Top => rect.top() < viewport.top(),
        Side::Bottom => rect.bottom() > viewport.bottom(),
        Side::Left => rect.left() < viewport.left(),
        Side::Right => rect.right() > viewport.right(),
    }
}

/// Offset that moves the span `[start, end)` inside `[min, max)`.
///
/// Content larger than the viewport is aligned to `min`.
fn shift_into(start: f32, end: f32, min: f32, max: f32) -> f32 {
    if start < min {
        min - start
    } else if end > max {
        (max - end).max(min - start)
    } else {
        0.0
    }
}

/// Lifecycle state of floating content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayState {
    #[default]
    Closed,
    /// Waiting for the show delay; nothing is mounted yet.
    Opening,
    Open,
    /// Mounted while the exit animation plays.
    Closing,
}

impl OverlayState {
    /// Whether the content is in the render tree.
    pub fn is_mounted(self) -> bool {
        matches!(self, OverlayState::Open | OverlayState::Closing)
    }
}

/// Configuration for a [`Positioner`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionerConfig {
    pub side: Side,
    pub gap: f32,
    pub show_delay: Duration,
    pub exit_delay: Duration,
}

impl Default for PositionerConfig {
    fn default() -> Self {
        Self {
            side: Side::default(),
            gap: DEFAULT_GAP,
            show_delay: DEFAULT_SHOW_DELAY,
            exit_delay: DEFAULT_EXIT_DELAY,
        }
    }
}

impl PositionerConfig {
    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    pub fn with_gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }

    pub fn with_show_delay(mut self, delay: Duration) -> Self {
        self.show_delay = delay;
        self
    }

    pub fn with_exit_delay(mut self, delay: Duration) -> Self {
        self.exit_delay = delay;
        self
    }
}

/// Positions floating content and runs its open/close lifecycle.
pub struct Positioner {
    config: PositionerConfig,
    trigger: Region,
    timers: Timers,
    listeners: ListenerRegistry,
    state: OverlayState,
    anchor: Rect,
    placement: Option<Placement>,
    collision: Option<CollisionBounds>,
    show_timer: Option<TimerGuard>,
    exit_timer: Option<TimerGuard>,
    viewport_listeners: Vec<ListenerGuard>,
    state_changed: Signal<OverlayState>,
}

impl Positioner {
    /// Create a closed positioner anchored to `trigger`.
    pub fn new(host: &Host, trigger: Region, config: PositionerConfig) -> Self {
        Self {
            config,
            trigger,
            timers: host.timers().clone(),
            listeners: host.listeners().clone(),
            state: OverlayState::Closed,
            anchor: Rect::ZERO,
            placement: None,
            collision: None,
            show_timer: None,
            exit_timer: None,
            viewport_listeners: Vec::new(),
            state_changed: Signal::new(),
        }
    }

    pub fn config(&self) -> &PositionerConfig {
        &self.config
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    /// Whether the content is in the render tree.
    pub fn is_mounted(&self) -> bool {
        self.state.is_mounted()
    }

    /// Whether the content is fully shown.
    pub fn is_open(&self) -> bool {
        self.state == OverlayState::Open
    }

    /// The anchor captured at the last show or recompute.
    pub fn anchor(&self) -> Rect {
        self.anchor
    }

    /// The current placement, present only while mounted.
    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }

    pub fn trigger(&self) -> &Region {
        &self.trigger
    }

    /// Change the requested side; takes effect on the next recompute.
    pub fn set_side(&mut self, side: Side) {
        self.config.side = side;
        if self.is_mounted() {
            self.recompute();
        }
    }

    /// Change the show delay; takes effect on the next show.
    pub fn set_show_delay(&mut self, delay: Duration) {
        self.config.show_delay = delay;
    }

    /// Change the exit delay; takes effect on the next hide.
    pub fn set_exit_delay(&mut self, delay: Duration) {
        self.config.exit_delay = delay;
    }

    /// Opt into collision handling.
    pub fn set_collision_bounds(&mut self, bounds: Option<CollisionBounds>) {
        self.collision = bounds;
        if self.is_mounted() {
            self.recompute();
        }
    }

    /// Signal emitted on every state transition.
    pub fn state_changed(&self) -> &Signal<OverlayState> {
        &self.state_changed
    }

    /// Request the content to be shown.
    pub fn show(&mut self) {
        match self.state {
            OverlayState::Closed | OverlayState::Opening => {
                self.anchor = self.trigger.bounds();
                if self.config.show_delay.is_zero() {
                    self.open_now();
                } else {
                    self.show_timer = Some(self.timers.one_shot(self.config.show_delay));
                    self.set_state(OverlayState::Opening);
                }
            }
            OverlayState::Open => self.recompute(),
            OverlayState::Closing => {
                self.exit_timer = None;
                self.set_state(OverlayState::Open);
                self.recompute();
            }
        }
    }

    /// Request the content to be hidden.
    pub fn hide(&mut self) {
        match self.state {
            OverlayState::Closed | OverlayState::Closing => {}
            OverlayState::Opening => {
                self.show_timer = None;
                self.set_state(OverlayState::Closed);
            }
            OverlayState::Open => {
                if self.config.exit_delay.is_zero() {
                    self.unmount();
                } else {
                    self.exit_timer = Some(self.timers.one_shot(self.config.exit_delay));
                    self.set_state(OverlayState::Closing);
                }
            }
        }
    }

    /// Show if closed or closing, hide otherwise.
    pub fn toggle(&mut self) {
        match self.state {
            OverlayState::Closed | OverlayState::Closing => self.show(),
            OverlayState::Opening | OverlayState::Open => self.hide(),
        }
    }

    /// Recompute the placement after the viewport resized or scrolled.
    ///
    /// Returns `true` if the content is mounted and was repositioned.
    pub fn handle_viewport_change(&mut self) -> bool {
        if !self.is_mounted() {
            return false;
        }
        self.recompute();
        true
    }

    /// Close immediately, skipping the exit delay.
    ///
    /// Drops every pending timer and held listener.
    pub fn force_close(&mut self) {
        self.show_timer = None;
        self.unmount();
    }

    fn open_now(&mut self) {
        self.show_timer = None;
        self.set_state(OverlayState::Open);
        if self.viewport_listeners.is_empty() {
            self.viewport_listeners = vec![
                self.listeners.acquire(ListenerKind::WindowResize),
                self.listeners.acquire(ListenerKind::WindowScroll),
            ];
        }
        self.recompute();
    }

    fn unmount(&mut self) {
        self.exit_timer = None;
        self.viewport_listeners.clear();
        self.placement = None;
        self.set_state(OverlayState::Closed);
    }

    fn recompute(&mut self) {
        self.anchor = self.trigger.bounds();
        let placement = match &self.collision {
            Some(bounds) => {
                compute_with_collision(&self.anchor, self.config.side, self.config.gap, bounds)
            }
            None => compute(&self.anchor, self.config.side, self.config.gap),
        };
        tracing::trace!(
            target: targets::OVERLAY,
            top = placement.top,
            left = placement.left,
            side = ?placement.side,
            "placement computed"
        );
        self.placement = Some(placement);
    }

    fn set_state(&mut self, state: OverlayState) {
        if self.state != state {
            tracing::debug!(target: targets::OVERLAY, from = ?self.state, to = ?state, "overlay state");
            self.state = state;
            self.state_changed.emit(state);
        }
    }
}

impl TimerHandler for Positioner {
    fn handle_timer(&mut self, id: TimerId) -> bool {
        if self.show_timer.as_ref().is_some_and(|t| t.id() == id) {
            self.open_now();
            true
        } else if self.exit_timer.as_ref().is_some_and(|t| t.id() == id) {
            self.unmount();
            true
        } else {
            false
        }
    }
}

impl std::fmt::Debug for Positioner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Positioner")
            .field("state", &self.state)
            .field("config", &self.config)
            .field("placement", &self.placement)
            .finish()
    }
}
