//! Searchable single- and multi-select combobox.
//!
//! Combines a [`KeyboardNavigator`] over the filtered options, a
//! [`Positioner`] for the dropdown list and an [`OutsideDismiss`] that closes
//! the list on clicks outside the trigger and the list.
//!
//! The value is a list of option values: at most one entry in single mode,
//! any number (in selection order) in multi mode.

use std::time::Duration;

use horizon_loom_core::logging::targets;
use horizon_loom_core::{Point, TimerId};
use unicode_segmentation::UnicodeSegmentation;

use crate::dismiss::{OutsideDismiss, Region};
use crate::error::Result;
use crate::event::Key;
use crate::host::{Host, TimerHandler};
use crate::navigator::{KeyboardNavigator, NavAction, SelectionMode};
use crate::positioner::{OverlayState, Positioner, PositionerConfig, Side};
use crate::value_sync::ValueSync;

/// Placeholder shown when nothing is selected or typed.
pub const DEFAULT_PLACEHOLDER: &str = "Select option...";

/// One selectable option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComboOption {
    pub label: String,
    pub value: String,
}

impl ComboOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A combobox over a list of options.
pub struct Combobox {
    options: Vec<ComboOption>,
    filtered: Vec<usize>,
    search: String,
    focused: bool,
    placeholder: String,
    value: ValueSync<Vec<String>>,
    navigator: KeyboardNavigator,
    positioner: Positioner,
    dismiss: OutsideDismiss,
}

impl Combobox {
    /// Create a closed combobox whose input occupies `trigger`.
    pub fn new(
        host: &Host,
        trigger: Region,
        options: Vec<ComboOption>,
        mode: SelectionMode,
        value: ValueSync<Vec<String>>,
    ) -> Self {
        let config = PositionerConfig::default()
            .with_side(Side::Bottom)
            .with_show_delay(Duration::ZERO);
        let mut combobox = Self {
            options,
            filtered: Vec::new(),
            search: String::new(),
            focused: false,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            value,
            navigator: KeyboardNavigator::new(mode),
            positioner: Positioner::new(host, trigger.clone(), config),
            dismiss: OutsideDismiss::new(host.listeners(), trigger),
        };
        combobox.refilter();
        combobox
    }

    /// Register the region of the dropdown list, which may be rendered
    /// outside the trigger.
    pub fn with_list_region(mut self, region: Region) -> Self {
        self.dismiss.allow(region);
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn mode(&self) -> SelectionMode {
        self.navigator.mode()
    }

    fn is_multi(&self) -> bool {
        self.mode() == SelectionMode::Multiple
    }

    pub fn options(&self) -> &[ComboOption] {
        &self.options
    }

    /// Replace the options; the highlight is clamped into the new list.
    pub fn set_options(&mut self, options: Vec<ComboOption>) {
        self.options = options;
        self.refilter();
    }

    pub fn value(&self) -> &ValueSync<Vec<String>> {
        &self.value
    }

    /// Supply the owner's value to a controlled combobox.
    pub fn supply(&mut self, values: Vec<String>) -> Result<bool> {
        let changed = self.value.supply(values)?;
        self.refilter();
        Ok(changed)
    }

    /// Selected options, in option order.
    pub fn selected_options(&self) -> Vec<&ComboOption> {
        self.value.with(|values| {
            if self.is_multi() {
                self.options
                    .iter()
                    .filter(|o| values.contains(&o.value))
                    .collect()
            } else {
                values
                    .first()
                    .and_then(|v| self.options.iter().find(|o| &o.value == v))
                    .into_iter()
                    .collect()
            }
        })
    }

    pub fn is_selected(&self, value: &str) -> bool {
        self.value.with(|values| values.iter().any(|v| v == value))
    }

    /// Options matching the current search text.
    pub fn filtered_options(&self) -> Vec<&ComboOption> {
        self.filtered.iter().map(|&i| &self.options[i]).collect()
    }

    pub fn search_text(&self) -> &str {
        &self.search
    }

    /// Text shown in the input.
    ///
    /// While focused this is the search text; otherwise the selected label
    /// in single mode and nothing in multi mode (tags show the selection).
    pub fn display_text(&self) -> String {
        if self.focused {
            self.search.clone()
        } else if self.is_multi() {
            String::new()
        } else {
            self.selected_options()
                .first()
                .map(|o| o.label.clone())
                .unwrap_or_default()
        }
    }

    /// Placeholder to show, if any.
    pub fn placeholder(&self) -> Option<&str> {
        let has_tags = self.is_multi() && !self.selected_options().is_empty();
        if self.focused || has_tags {
            None
        } else {
            Some(&self.placeholder)
        }
    }

    /// Position of the highlighted option in the filtered list.
    pub fn highlighted(&self) -> Option<usize> {
        self.navigator.highlighted()
    }

    /// Highlight a filtered option on pointer hover.
    pub fn highlight(&mut self, position: usize) {
        self.navigator
            .highlight(i32::try_from(position).unwrap_or(i32::MAX));
    }

    pub fn is_open(&self) -> bool {
        matches!(
            self.positioner.state(),
            OverlayState::Opening | OverlayState::Open
        )
    }

    pub fn positioner(&self) -> &Positioner {
        &self.positioner
    }

    /// Handle the input gaining focus: open, and in single mode seed the
    /// search text with the selected label.
    pub fn focus(&mut self) {
        self.focused = true;
        if !self.is_multi() {
            self.search = self
                .selected_options()
                .first()
                .map(|o| o.label.clone())
                .unwrap_or_default();
        }
        self.open();
        self.refilter();
    }

    /// Handle typing into the input.
    pub fn input(&mut self, text: &str) {
        self.search = text.to_string();
        self.focused = true;
        self.open();
        self.refilter();
        if !self.filtered.is_empty() {
            self.navigator.highlight(0);
        }
        if !self.is_multi() && text.is_empty() {
            self.value.request_change(Vec::new());
            self.refilter();
        }
    }

    /// Handle a key press. Returns whether the key was consumed.
    pub fn handle_key(&mut self, key: Key) -> bool {
        if !self.is_open() {
            if matches!(key, Key::ArrowDown | Key::Enter) {
                self.focus();
                return true;
            }
            return false;
        }

        if key == Key::Backspace {
            return self.backspace();
        }

        match self.navigator.handle_key(key) {
            NavAction::Commit { index, .. } => {
                self.select(index);
                true
            }
            NavAction::Close => {
                self.close();
                true
            }
            NavAction::Highlighted(_) => true,
            NavAction::Ignored => false,
        }
    }

    fn backspace(&mut self) -> bool {
        if let Some((last, _)) = self.search.grapheme_indices(true).next_back() {
            let text = self.search[..last].to_string();
            self.input(&text);
            return true;
        }
        if self.is_multi() {
            let mut values = self.value.current();
            if values.pop().is_some() {
                self.value.request_change(values);
                self.refilter();
                return true;
            }
        }
        false
    }

    /// Commit the option at `position` in the filtered list.
    ///
    /// Single mode selects it and closes; multi mode toggles it and keeps
    /// the list open. The search text is cleared either way.
    pub fn select(&mut self, position: usize) {
        let Some(option) = self.filtered.get(position).map(|&i| self.options[i].clone()) else {
            return;
        };
        tracing::debug!(target: targets::WIDGET, value = %option.value, "combobox select");
        self.search.clear();

        if self.is_multi() {
            let mut values = self.value.current();
            if let Some(at) = values.iter().position(|v| *v == option.value) {
                values.remove(at);
            } else {
                values.push(option.value);
            }
            self.value.request_change(values);
            self.refilter();
        } else {
            self.value.request_change(vec![option.value]);
            self.close();
        }
    }

    /// Remove a tag in multi mode.
    pub fn remove(&mut self, value: &str) {
        if !self.is_multi() {
            return;
        }
        let mut values = self.value.current();
        let before = values.len();
        values.retain(|v| v != value);
        if values.len() != before {
            self.value.request_change(values);
            self.refilter();
        }
    }

    /// Close the list and drop focus.
    pub fn close(&mut self) {
        self.focused = false;
        self.navigator.reset();
        self.dismiss.deactivate();
        self.positioner.hide();
        self.refilter();
    }

    /// Handle a pointer-down from the host; closes on outside clicks.
    pub fn handle_pointer_down(&mut self, point: Point) -> bool {
        if self.dismiss.handle_pointer_down(point) {
            self.close();
            true
        } else {
            false
        }
    }

    fn open(&mut self) {
        self.dismiss.activate();
        if !self.is_open() {
            self.positioner.show();
        }
    }

    fn refilter(&mut self) {
        let selected_label = if self.is_multi() {
            None
        } else {
            self.selected_options().first().map(|o| o.label.clone())
        };

        let show_all = match &selected_label {
            Some(label) => self.search.is_empty() || self.search == *label,
            None => self.is_multi() && self.search.is_empty(),
        };

        let needle = self.search.to_lowercase();
        self.filtered = self
            .options
            .iter()
            .enumerate()
            .filter(|(_, o)| show_all || o.label.to_lowercase().contains(&needle))
            .map(|(i, _)| i)
            .collect();
        self.navigator.set_len(self.filtered.len());
    }
}

impl TimerHandler for Combobox {
    fn handle_timer(&mut self, id: TimerId) -> bool {
        self.positioner.handle_timer(id)
    }
}

impl std::fmt::Debug for Combobox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Combobox")
            .field("options", &self.options.len())
            .field("filtered", &self.filtered.len())
            .field("search", &self.search)
            .field("value", &self.value)
            .field("open", &self.is_open())
            .finish()
    }
}
