//! Hover and focus tooltips.

use std::time::Duration;

use horizon_loom_core::TimerId;

use crate::dismiss::Region;
use crate::host::{Host, TimerHandler};
use crate::positioner::{OverlayState, Placement, Positioner, PositionerConfig, Side};

/// A tooltip anchored to a trigger element.
///
/// Shown after a delay when the pointer enters or the trigger gains focus,
/// hidden when the pointer leaves or focus is lost. Leaving before the delay
/// elapses means the tooltip is never mounted.
#[derive(Debug)]
pub struct Tooltip {
    content: String,
    positioner: Positioner,
}

impl Tooltip {
    pub fn new(host: &Host, trigger: Region, content: impl Into<String>) -> Self {
        let config = PositionerConfig::default().with_side(Side::Top);
        Self {
            content: content.into(),
            positioner: Positioner::new(host, trigger, config),
        }
    }

    pub fn with_side(mut self, side: Side) -> Self {
        self.positioner.set_side(side);
        self
    }

    /// Change the show delay.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.positioner.set_show_delay(delay);
        self
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub fn pointer_enter(&mut self) {
        self.positioner.show();
    }

    pub fn pointer_leave(&mut self) {
        self.positioner.hide();
    }

    pub fn focus(&mut self) {
        self.positioner.show();
    }

    pub fn blur(&mut self) {
        self.positioner.hide();
    }

    pub fn state(&self) -> OverlayState {
        self.positioner.state()
    }

    /// Whether the tooltip is in the render tree.
    pub fn is_mounted(&self) -> bool {
        self.positioner.is_mounted()
    }

    /// Whether the tooltip is fully shown.
    pub fn is_visible(&self) -> bool {
        self.positioner.is_open()
    }

    pub fn placement(&self) -> Option<Placement> {
        self.positioner.placement()
    }

    pub fn positioner(&self) -> &Positioner {
        &self.positioner
    }

    pub fn positioner_mut(&mut self) -> &mut Positioner {
        &mut self.positioner
    }
}

impl TimerHandler for Tooltip {
    fn handle_timer(&mut self, id: TimerId) -> bool {
        self.positioner.handle_timer(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_loom_core::Rect;

    #[test]
    fn test_focus_shows_after_delay() {
        let (host, clock) = Host::manual();
        let trigger = Region::new(Rect::new(10.0, 100.0, 60.0, 20.0));
        let mut tooltip = Tooltip::new(&host, trigger, "Save");

        tooltip.focus();
        assert!(!tooltip.is_mounted());
        clock.advance(Duration::from_millis(200));
        host.dispatch_expired(&mut [&mut tooltip]);
        assert!(tooltip.is_visible());
        assert_eq!(tooltip.placement().map(|p| p.top), Some(92.0));

        tooltip.blur();
        assert_eq!(tooltip.state(), OverlayState::Closing);
        clock.advance(Duration::from_millis(150));
        host.dispatch_expired(&mut [&mut tooltip]);
        assert!(!tooltip.is_mounted());
    }

    #[test]
    fn test_custom_delay() {
        let (host, clock) = Host::manual();
        let mut tooltip = Tooltip::new(&host, Region::default(), "Hi")
            .with_delay(Duration::from_millis(500))
            .with_side(Side::Right);
        tooltip.pointer_enter();
        clock.advance(Duration::from_millis(200));
        host.dispatch_expired(&mut [&mut tooltip]);
        assert!(!tooltip.is_mounted());
        clock.advance(Duration::from_millis(300));
        host.dispatch_expired(&mut [&mut tooltip]);
        assert_eq!(tooltip.placement().map(|p| p.side), Some(Side::Right));
    }
}
