//! Tab sets.
//!
//! Triggers are registered on the [`Tabs`] parent, which owns the active tab.
//! Panels ask the parent whether they are visible.

use horizon_loom_core::logging::targets;

use crate::error::{Error, Result};
use crate::value_sync::ValueSync;

/// A registered tab trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabTrigger {
    pub id: String,
    pub label: String,
    pub disabled: bool,
}

/// A set of tabs with one active tab.
#[derive(Debug)]
pub struct Tabs {
    triggers: Vec<TabTrigger>,
    value: ValueSync<String>,
}

impl Tabs {
    pub fn new(value: ValueSync<String>) -> Self {
        Self {
            triggers: Vec::new(),
            value,
        }
    }

    /// Register a trigger (builder form).
    pub fn with_tab(mut self, id: impl Into<String>, label: impl Into<String>) -> Self {
        self.register(id, label);
        self
    }

    /// Register a trigger. Registering an existing id replaces its label.
    pub fn register(&mut self, id: impl Into<String>, label: impl Into<String>) {
        let id = id.into();
        let label = label.into();
        match self.triggers.iter_mut().find(|t| t.id == id) {
            Some(trigger) => trigger.label = label,
            None => self.triggers.push(TabTrigger {
                id,
                label,
                disabled: false,
            }),
        }
    }

    pub fn unregister(&mut self, id: &str) -> bool {
        let before = self.triggers.len();
        self.triggers.retain(|t| t.id != id);
        self.triggers.len() != before
    }

    pub fn triggers(&self) -> &[TabTrigger] {
        &self.triggers
    }

    pub fn set_disabled(&mut self, id: &str, disabled: bool) -> Result<()> {
        let trigger = self.trigger_mut(id)?;
        trigger.disabled = disabled;
        Ok(())
    }

    pub fn value(&self) -> &ValueSync<String> {
        &self.value
    }

    /// Id of the active tab.
    pub fn active(&self) -> String {
        self.value.current()
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.value.with(|active| active == id)
    }

    /// Whether the panel for `id` should render.
    pub fn is_panel_visible(&self, id: &str) -> bool {
        self.is_active(id)
    }

    /// Activate a trigger.
    ///
    /// Returns `Ok(false)` for a disabled trigger and
    /// [`Error::UnknownTab`] for an id that was never registered.
    pub fn activate(&mut self, id: &str) -> Result<bool> {
        let trigger = self
            .triggers
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| Error::unknown_tab(id))?;
        if trigger.disabled {
            tracing::trace!(target: targets::WIDGET, id, "disabled tab ignored");
            return Ok(false);
        }
        self.value.request_change(id.to_string());
        Ok(true)
    }

    fn trigger_mut(&mut self, id: &str) -> Result<&mut TabTrigger> {
        self.triggers
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| Error::unknown_tab(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tabs(value: ValueSync<String>) -> Tabs {
        Tabs::new(value)
            .with_tab("account", "Account")
            .with_tab("password", "Password")
            .with_tab("billing", "Billing")
    }

    #[test]
    fn test_activate() {
        let mut tabs = tabs(ValueSync::uncontrolled("account".into()));
        assert!(tabs.is_panel_visible("account"));
        assert!(tabs.activate("password").unwrap());
        assert_eq!(tabs.active(), "password");
        assert!(!tabs.is_panel_visible("account"));
    }

    #[test]
    fn test_unknown_tab_is_an_error() {
        let mut tabs = tabs(ValueSync::default());
        assert!(matches!(tabs.activate("nope"), Err(Error::UnknownTab { .. })));
        assert!(tabs.set_disabled("nope", true).is_err());
    }

    #[test]
    fn test_disabled_tab_ignored() {
        let mut tabs = tabs(ValueSync::uncontrolled("account".into()));
        tabs.set_disabled("billing", true).unwrap();
        assert!(!tabs.activate("billing").unwrap());
        assert_eq!(tabs.active(), "account");
    }

    #[test]
    fn test_controlled_notifies_owner() {
        use std::sync::Arc;
        use parking_lot::Mutex;

        let mut tabs = tabs(ValueSync::controlled("account".into()));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        tabs.value().value_changed().connect(move |v: &String| sink.lock().push(v.clone()));

        tabs.activate("billing").unwrap();
        assert_eq!(tabs.active(), "account");
        assert_eq!(*seen.lock(), vec!["billing".to_string()]);
    }

    #[test]
    fn test_register_replaces_label() {
        let mut tabs = tabs(ValueSync::default());
        tabs.register("billing", "Payments");
        assert_eq!(tabs.triggers().len(), 3);
        assert_eq!(tabs.triggers()[2].label, "Payments");
        assert!(tabs.unregister("billing"));
        assert!(!tabs.unregister("billing"));
    }
}
