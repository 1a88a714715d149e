//! Hex color picker.
//!
//! The picker holds a committed color (through [`ValueSync`]) and a free-form
//! input. Valid `#RRGGBB` input commits immediately; invalid input stays in
//! the field with a validation message and is reverted on blur or close.

use std::sync::OnceLock;

use horizon_loom_core::logging::targets;
use horizon_loom_core::Point;
use regex::Regex;

use crate::dismiss::{OutsideDismiss, Region};
use crate::error::{Error, Result};
use crate::host::Host;
use crate::value_sync::ValueSync;

/// Swatches offered below the hex input.
pub const PRESET_COLORS: [&str; 18] = [
    "#ef4444", "#f97316", "#f59e0b", "#84cc16", "#10b981", "#06b6d4", "#3b82f6", "#6366f1",
    "#8b5cf6", "#d946ef", "#f43f5e", "#0f172a", "#ffffff", "#f3f4f6", "#9ca3af", "#4b5563",
    "#1f2937", "#000000",
];

/// Maximum length of the hex input.
const MAX_INPUT_LEN: usize = 7;

fn hex_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new("^#[0-9A-Fa-f]{6}$").ok())
        .as_ref()
}

/// Check whether `input` is a `#RRGGBB` color.
pub fn is_hex_color(input: &str) -> bool {
    hex_pattern().is_some_and(|re| re.is_match(input))
}

/// Validate a `#RRGGBB` color.
pub fn parse_hex_color(input: &str) -> Result<String> {
    if is_hex_color(input) {
        Ok(input.to_string())
    } else {
        Err(Error::invalid_color(input))
    }
}

/// Text color that stays readable on a background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contrast {
    Black,
    White,
}

/// Pick black or white text for a `#RRGGBB` background (YIQ brightness).
pub fn contrast_for(hex: &str) -> Option<Contrast> {
    if !is_hex_color(hex) {
        return None;
    }
    let channel = |i: usize| u32::from_str_radix(&hex[i..i + 2], 16).ok();
    let (r, g, b) = (channel(1)?, channel(3)?, channel(5)?);
    let yiq = (r * 299 + g * 587 + b * 114) / 1000;
    Some(if yiq >= 128 { Contrast::Black } else { Contrast::White })
}

/// A color picker with a hex input and preset swatches.
pub struct ColorPicker {
    value: ValueSync<String>,
    input: String,
    error: Option<String>,
    open: bool,
    dismiss: OutsideDismiss,
}

impl ColorPicker {
    /// Create a closed picker for the component occupying `region`.
    pub fn new(host: &Host, region: Region, value: ValueSync<String>) -> Self {
        let input = value.current();
        Self {
            value,
            input,
            error: None,
            open: false,
            dismiss: OutsideDismiss::new(host.listeners(), region),
        }
    }

    /// The committed color.
    pub fn value(&self) -> &ValueSync<String> {
        &self.value
    }

    /// Supply the owner's color; the input follows it.
    pub fn supply(&mut self, color: String) -> Result<bool> {
        let changed = self.value.supply(color)?;
        self.revert_input();
        Ok(changed)
    }

    /// Text currently in the hex input.
    pub fn input_text(&self) -> &str {
        &self.input
    }

    /// Inline validation text for invalid input.
    pub fn validation_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        if !self.open {
            self.open = true;
            self.dismiss.activate();
        }
    }

    /// Close the popover, resetting the input to the committed color.
    pub fn close(&mut self) {
        if self.open {
            self.open = false;
            self.dismiss.deactivate();
            self.revert_input();
        }
    }

    pub fn toggle(&mut self) {
        if self.open { self.close() } else { self.open() }
    }

    /// Handle typing into the hex input.
    ///
    /// Valid input is committed. Invalid input is kept in the field with a
    /// validation message, and the committed color is unchanged.
    pub fn input(&mut self, text: &str) -> Result<()> {
        self.input = text.chars().take(MAX_INPUT_LEN).collect();
        match parse_hex_color(&self.input) {
            Ok(color) => {
                self.error = None;
                self.value.request_change(color);
                Ok(())
            }
            Err(e) => {
                tracing::trace!(target: targets::WIDGET, input = %self.input, "invalid color input");
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Handle the input losing focus; invalid input is reverted.
    pub fn blur(&mut self) {
        if !is_hex_color(&self.input) {
            self.revert_input();
        }
    }

    /// Commit a preset swatch.
    pub fn select_preset(&mut self, color: &str) -> Result<()> {
        let color = parse_hex_color(color)?;
        self.input = color.clone();
        self.error = None;
        self.value.request_change(color);
        Ok(())
    }

    /// Whether `color` is the committed color (case-insensitive).
    pub fn is_selected(&self, color: &str) -> bool {
        self.value.with(|v| v.eq_ignore_ascii_case(color))
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

    fn revert_input(&mut self) {
        self.input = self.value.current();
        self.error = None;
    }
}

impl std::fmt::Debug for ColorPicker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColorPicker")
            .field("value", &self.value)
            .field("input", &self.input)
            .field("open", &self.open)
            .finish()
    }
}
