//! Two-step range selection and dual-thumb clamping.

/// A range whose end may not be picked yet.
///
/// `from <= to` whenever `to` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RangeValue<T> {
    pub from: T,
    pub to: Option<T>,
}

impl<T: Ord + Copy> RangeValue<T> {
    /// A range with only its start picked.
    pub fn start(from: T) -> Self {
        Self { from, to: None }
    }

    /// A complete range; the ends are swapped if given out of order.
    pub fn new(a: T, b: T) -> Self {
        Self {
            from: a.min(b),
            to: Some(a.max(b)),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.to.is_some()
    }

    /// Check if `value` lies inside a complete range (inclusive).
    pub fn contains(&self, value: T) -> bool {
        self.to.is_some_and(|to| self.from <= value && value <= to)
    }
}

/// What a pick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickOutcome {
    /// A new range was started.
    Started,
    /// The range was completed; date contexts close on this.
    Completed,
}

/// Apply a pick to the current selection.
///
/// With no selection or a complete range, `value` starts a new range. With
/// only a start, `value` completes the range, swapping the ends if it lies
/// before the start.
pub fn pick<T: Ord + Copy>(current: Option<RangeValue<T>>, value: T) -> (RangeValue<T>, PickOutcome) {
    match current {
        Some(RangeValue { from, to: None }) => (RangeValue::new(from, value), PickOutcome::Completed),
        _ => (RangeValue::start(value), PickOutcome::Started),
    }
}

/// Stateful wrapper around [`pick`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeSelection<T> {
    value: Option<RangeValue<T>>,
}

impl<T> Default for RangeSelection<T> {
    fn default() -> Self {
        Self { value: None }
    }
}

impl<T: Ord + Copy> RangeSelection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_value(value: Option<RangeValue<T>>) -> Self {
        Self { value }
    }

    pub fn value(&self) -> Option<RangeValue<T>> {
        self.value
    }

    pub fn pick(&mut self, value: T) -> PickOutcome {
        let (next, outcome) = pick(self.value, value);
        self.value = Some(next);
        outcome
    }

    pub fn clear(&mut self) {
        self.value = None;
    }
}

/// Two slider thumbs that may meet but never cross.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DualThumb<T> {
    lo: T,
    hi: T,
}

impl<T: PartialOrd + Copy> DualThumb<T> {
    /// Create thumbs, swapping them if given out of order.
    pub fn new(a: T, b: T) -> Self {
        if b < a { Self { lo: b, hi: a } } else { Self { lo: a, hi: b } }
    }

    pub fn lo(&self) -> T {
        self.lo
    }

    pub fn hi(&self) -> T {
        self.hi
    }

    /// Move the low thumb; it stops at the high thumb.
    pub fn set_lo(&mut self, value: T) {
        self.lo = if value > self.hi { self.hi } else { value };
    }

    /// Move the high thumb; it stops at the low thumb.
    pub fn set_hi(&mut self, value: T) {
        self.hi = if value < self.lo { self.lo } else { value };
    }
}
