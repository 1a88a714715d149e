//! Collapsible panels and accordions.
//!
//! Panels are registered on the [`Collapse`] parent, which owns the list of
//! expanded panels. In accordion mode at most one panel is expanded.

use horizon_loom_core::logging::targets;

use crate::error::{Error, Result};
use crate::value_sync::ValueSync;

/// A registered panel header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollapsePanel {
    pub id: String,
    pub header: String,
    pub disabled: bool,
}

/// A set of panels with any number expanded.
#[derive(Debug)]
pub struct Collapse {
    accordion: bool,
    panels: Vec<CollapsePanel>,
    expanded: ValueSync<Vec<String>>,
}

impl Collapse {
    /// Create a collapse over the given expanded ids.
    ///
    /// Seed an uncontrolled value with the panels expanded by default.
    pub fn new(expanded: ValueSync<Vec<String>>) -> Self {
        Self {
            accordion: false,
            panels: Vec::new(),
            expanded,
        }
    }

    /// Keep at most one panel expanded.
    pub fn accordion(mut self) -> Self {
        self.accordion = true;
        self
    }

    pub fn with_panel(mut self, id: impl Into<String>, header: impl Into<String>) -> Self {
        self.register(id, header);
        self
    }

    /// Register a panel. Registering an existing id replaces its header.
    pub fn register(&mut self, id: impl Into<String>, header: impl Into<String>) {
        let id = id.into();
        let header = header.into();
        match self.panels.iter_mut().find(|p| p.id == id) {
            Some(panel) => panel.header = header,
            None => self.panels.push(CollapsePanel {
                id,
                header,
                disabled: false,
            }),
        }
    }

    pub fn unregister(&mut self, id: &str) -> bool {
        let before = self.panels.len();
        self.panels.retain(|p| p.id != id);
        self.panels.len() != before
    }

    pub fn panels(&self) -> &[CollapsePanel] {
        &self.panels
    }

    pub fn is_accordion(&self) -> bool {
        self.accordion
    }

    pub fn set_disabled(&mut self, id: &str, disabled: bool) -> Result<()> {
        let panel = self
            .panels
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::unknown_panel(id))?;
        panel.disabled = disabled;
        Ok(())
    }

    pub fn value(&self) -> &ValueSync<Vec<String>> {
        &self.expanded
    }

    /// Ids of the expanded panels, in the order they were expanded.
    pub fn expanded(&self) -> Vec<String> {
        self.expanded.current()
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.with(|ids| ids.iter().any(|k| k == id))
    }

    /// Toggle a panel from its header.
    ///
    /// Returns `Ok(false)` for a disabled panel and [`Error::UnknownPanel`]
    /// for an id that was never registered.
    pub fn toggle(&mut self, id: &str) -> Result<bool> {
        let panel = self
            .panels
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::unknown_panel(id))?;
        if panel.disabled {
            tracing::trace!(target: targets::WIDGET, id, "disabled panel ignored");
            return Ok(false);
        }

        let open = self.is_expanded(id);
        let next = if self.accordion {
            if open { Vec::new() } else { vec![id.to_string()] }
        } else {
            let mut ids = self.expanded();
            if open {
                ids.retain(|k| k != id);
            } else {
                ids.push(id.to_string());
            }
            ids
        };
        tracing::debug!(target: targets::WIDGET, id, expanded = !open, "panel toggled");
        self.expanded.request_change(next);
        Ok(true)
    }
}
