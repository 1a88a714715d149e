//! Single-value and range sliders.

use crate::event::Key;
use crate::range::DualThumb;
use crate::value_sync::ValueSync;

/// Keyboard steps taken by PageUp/PageDown.
const PAGE_STEPS: f64 = 10.0;

/// A slider value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SliderValue {
    Single(f64),
    /// Low and high thumbs; `lo <= hi`.
    Range(f64, f64),
}

impl Default for SliderValue {
    fn default() -> Self {
        SliderValue::Single(0.0)
    }
}

/// Which thumb an edit applies to. Single sliders accept either.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Thumb {
    Lo,
    Hi,
}

/// A slider over `[min, max]` with a step.
#[derive(Debug)]
pub struct Slider {
    min: f64,
    max: f64,
    step: f64,
    unit: String,
    label: Option<String>,
    value: ValueSync<SliderValue>,
}

impl Slider {
    /// Create a slider over `0..=100` with step 1.
    pub fn new(value: ValueSync<SliderValue>) -> Self {
        Self {
            min: 0.0,
            max: 100.0,
            step: 1.0,
            unit: String::new(),
            label: None,
            value,
        }
    }

    /// Set the bounds, swapping them if given out of order.
    pub fn with_bounds(mut self, min: f64, max: f64) -> Self {
        self.min = min.min(max);
        self.max = min.max(max);
        self
    }

    /// Set the step; non-positive steps disable snapping.
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn value(&self) -> &ValueSync<SliderValue> {
        &self.value
    }

    pub fn is_range(&self) -> bool {
        matches!(self.value.current(), SliderValue::Range(..))
    }

    /// Clamp into the bounds and snap to the nearest step from `min`.
    pub fn snap(&self, value: f64) -> f64 {
        let clamped = value.clamp(self.min, self.max);
        if self.step <= 0.0 {
            return clamped;
        }
        let steps = ((clamped - self.min) / self.step).round();
        let snapped = (self.min + steps * self.step).min(self.max);
        // Drop float noise such as 0.30000000000000004.
        (snapped * 1e9).round() / 1e9
    }

    /// Position of `value` along the track, in percent.
    pub fn percentage(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 0.0;
        }
        ((value - self.min) / span * 100.0).clamp(0.0, 100.0)
    }

    /// Move a thumb. Range thumbs stop at each other.
    pub fn set_thumb(&mut self, thumb: Thumb, value: f64) {
        let value = self.snap(value);
        let next = match self.value.current() {
            SliderValue::Single(_) => SliderValue::Single(value),
            SliderValue::Range(lo, hi) => {
                let mut thumbs = DualThumb::new(lo, hi);
                match thumb {
                    Thumb::Lo => thumbs.set_lo(value),
                    Thumb::Hi => thumbs.set_hi(value),
                }
                SliderValue::Range(thumbs.lo(), thumbs.hi())
            }
        };
        self.value.request_change(next);
    }

    /// Set a single slider's value.
    pub fn set_value(&mut self, value: f64) {
        self.set_thumb(Thumb::Lo, value);
    }

    fn thumb_value(&self, thumb: Thumb) -> f64 {
        match (self.value.current(), thumb) {
            (SliderValue::Single(v), _) => v,
            (SliderValue::Range(lo, _), Thumb::Lo) => lo,
            (SliderValue::Range(_, hi), Thumb::Hi) => hi,
        }
    }

    /// Handle a key press on a thumb. Returns whether the key was consumed.
    pub fn handle_key(&mut self, thumb: Thumb, key: Key) -> bool {
        let current = self.thumb_value(thumb);
        let step = if self.step > 0.0 { self.step } else { (self.max - self.min) / 100.0 };
        let target = match key {
            Key::ArrowRight | Key::ArrowUp => current + step,
            Key::ArrowLeft | Key::ArrowDown => current - step,
            Key::PageUp => current + step * PAGE_STEPS,
            Key::PageDown => current - step * PAGE_STEPS,
            Key::Home => self.min,
            Key::End => self.max,
            _ => return false,
        };
        self.set_thumb(thumb, target);
        true
    }

    /// Value text with the unit, e.g. `40%`; ranges show both thumbs.
    pub fn display_text(&self) -> String {
        match self.value.current() {
            SliderValue::Single(v) => format!("{v}{}", self.unit),
            SliderValue::Range(lo, hi) => format!("{lo}{unit} — {hi}{unit}", unit = self.unit),
        }
    }
}
