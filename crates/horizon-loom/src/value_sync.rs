//! Controlled and uncontrolled value reconciliation.
//!
//! Every form control keeps its value in a [`ValueSync`]. The provenance of
//! the value is fixed when the control is created:
//!
//! - **Controlled**: the owner supplies every value through
//!   [`ValueSync::supply`]. User edits only notify the owner through
//!   `value_changed`; the displayed value changes when the owner supplies it.
//! - **Uncontrolled**: the control seeds its state once and then updates it
//!   on every edit, notifying observers afterwards.
//!
//! # Example
//!
//! ```
//! use horizon_loom::ValueSync;
//!
//! let field = ValueSync::controlled(String::from("a"));
//! field.request_change(String::from("b"));
//! assert_eq!(field.current(), "a");
//!
//! field.supply(String::from("b")).unwrap();
//! assert_eq!(field.current(), "b");
//! ```

use std::fmt;

use horizon_loom_core::{Property, Signal};

use crate::error::{Error, Result};

/// Who owns the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueMode {
    /// The owner supplies every value.
    Controlled,
    /// The control holds its own state.
    Uncontrolled,
}

/// A value whose source of truth is either the owner or the control.
pub struct ValueSync<T: 'static> {
    mode: ValueMode,
    value: Property<T>,
    value_changed: Signal<T>,
}

impl<T: Clone + PartialEq + 'static> ValueSync<T> {
    /// Create a controlled value seeded with the owner's current value.
    pub fn controlled(value: T) -> Self {
        Self::with_mode(ValueMode::Controlled, value)
    }

    /// Create an uncontrolled value seeded once with `initial`.
    pub fn uncontrolled(initial: T) -> Self {
        Self::with_mode(ValueMode::Uncontrolled, initial)
    }

    /// Pick the mode from the owner's props: a supplied value makes the
    /// control controlled, otherwise it is uncontrolled and seeded with
    /// `default`.
    pub fn from_props(value: Option<T>, default: T) -> Self {
        match value {
            Some(value) => Self::controlled(value),
            None => Self::uncontrolled(default),
        }
    }

    fn with_mode(mode: ValueMode, value: T) -> Self {
        Self {
            mode,
            value: Property::new(value),
            value_changed: Signal::new(),
        }
    }

    pub fn mode(&self) -> ValueMode {
        self.mode
    }

    pub fn is_controlled(&self) -> bool {
        self.mode == ValueMode::Controlled
    }

    /// The authoritative value.
    pub fn current(&self) -> T {
        self.value.get()
    }

    /// Borrow the authoritative value without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.value.with(f)
    }

    /// Report a user edit.
    ///
    /// An uncontrolled value is updated first; a controlled value is left
    /// untouched. `value_changed` is emitted with the candidate either way.
    pub fn request_change(&self, candidate: T) {
        if self.mode == ValueMode::Uncontrolled {
            self.value.set(candidate.clone());
        }
        self.value_changed.emit(candidate);
    }

    /// Supply the owner's value to a controlled field.
    ///
    /// Returns whether the value changed. Supplying to an uncontrolled field
    /// is rejected and leaves the value untouched.
    pub fn supply(&self, value: T) -> Result<bool> {
        match self.mode {
            ValueMode::Controlled => Ok(self.value.set(value)),
            ValueMode::Uncontrolled => Err(Error::UncontrolledValue),
        }
    }

    /// Signal emitted on every user edit with the candidate value.
    pub fn value_changed(&self) -> &Signal<T> {
        &self.value_changed
    }
}

impl<T: Clone + PartialEq + Default + 'static> Default for ValueSync<T> {
    fn default() -> Self {
        Self::uncontrolled(T::default())
    }
}

impl<T: Clone + fmt::Debug + 'static> fmt::Debug for ValueSync<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueSync")
            .field("mode", &self.mode)
            .field("value", &self.value.get())
            .finish()
    }
}
