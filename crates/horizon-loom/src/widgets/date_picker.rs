//! Date, time, date-time and date-range picker.

use chrono::{Datelike, Days, Local, Months, NaiveDate, NaiveDateTime, NaiveTime};
use horizon_loom_core::Point;
use horizon_loom_core::logging::targets;

use crate::dismiss::{OutsideDismiss, Region};
use crate::error::{Error, Result};
use crate::host::Host;
use crate::range::{self, PickOutcome, RangeValue};
use crate::value_sync::ValueSync;

/// What the picker selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatePickerMode {
    #[default]
    Date,
    Time,
    DateTime,
    Range,
}

impl DatePickerMode {
    /// Text shown while no value is selected.
    pub fn placeholder(self) -> &'static str {
        match self {
            DatePickerMode::Date => "Select date...",
            DatePickerMode::Time => "Select time...",
            DatePickerMode::DateTime => "Select date & time...",
            DatePickerMode::Range => "Select date range...",
        }
    }

    fn has_calendar(self) -> bool {
        self != DatePickerMode::Time
    }
}

/// A picked value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateValue {
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
    Range(RangeValue<NaiveDate>),
}

impl DateValue {
    /// Date the calendar should show for this value.
    fn anchor_date(&self) -> Option<NaiveDate> {
        match self {
            DateValue::Date(d) => Some(*d),
            DateValue::DateTime(dt) => Some(dt.date()),
            DateValue::Range(r) => Some(r.from),
            DateValue::Time(_) => None,
        }
    }

    /// Format the value for the trigger.
    pub fn format(&self) -> String {
        match self {
            DateValue::Date(d) => d.format("%B %-d, %Y").to_string(),
            DateValue::Time(t) => t.format("%-I:%M %p").to_string(),
            DateValue::DateTime(dt) => dt.format("%b %-d, %Y %-I:%M %p").to_string(),
            DateValue::Range(r) => {
                let from = r.from.format("%b %-d, %Y");
                match r.to {
                    Some(to) => format!("{from} - {}", to.format("%b %-d, %Y")),
                    None => from.to_string(),
                }
            }
        }
    }
}

/// Time of day given to a date-time value picked before any time was set.
fn default_time() -> NaiveTime {
    NaiveTime::MIN + chrono::Duration::hours(12)
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Column headers of the month grid; weeks start on Sunday.
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// One cell of the calendar grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// False for the leading and trailing days of neighbouring months.
    pub in_month: bool,
    pub is_today: bool,
    /// The selected date, or either end of a range.
    pub is_selected: bool,
    /// Inside a complete range, ends included.
    pub in_range: bool,
}

/// Lay out the weeks covering `month`, Sunday to Saturday.
///
/// The result always holds whole weeks, so its length is a multiple of 7.
pub fn month_grid(month: NaiveDate, today: NaiveDate, selected: Option<DateValue>) -> Vec<CalendarDay> {
    let first = first_of_month(month);
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(first);
    let start = first
        .checked_sub_days(Days::new(first.weekday().num_days_from_sunday().into()))
        .unwrap_or(first);
    let end = last
        .checked_add_days(Days::new((6 - last.weekday().num_days_from_sunday()).into()))
        .unwrap_or(last);

    start
        .iter_days()
        .take_while(|day| *day <= end)
        .map(|date| {
            let (is_selected, in_range) = match selected {
                Some(DateValue::Date(d)) => (d == date, false),
                Some(DateValue::DateTime(dt)) => (dt.date() == date, false),
                Some(DateValue::Range(r)) => (r.from == date || r.to == Some(date), r.contains(date)),
                _ => (false, false),
            };
            CalendarDay {
                date,
                in_month: date.month() == first.month() && date.year() == first.year(),
                is_today: date == today,
                is_selected,
                in_range,
            }
        })
        .collect()
}

/// Parse a `HH:MM` time.
pub fn parse_time(input: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(input.trim(), "%H:%M").map_err(|_| Error::invalid_time(input))
}

/// A picker popover with a calendar and/or time list.
pub struct DatePicker {
    mode: DatePickerMode,
    value: ValueSync<Option<DateValue>>,
    visible_month: NaiveDate,
    placeholder: Option<String>,
    open: bool,
    dismiss: OutsideDismiss,
}

impl DatePicker {
    pub fn new(
        host: &Host,
        region: Region,
        mode: DatePickerMode,
        value: ValueSync<Option<DateValue>>,
    ) -> Self {
        let seeded = value.current();
        let visible_month = first_of_month(
            seeded
                .and_then(|v| v.anchor_date())
                .unwrap_or_else(|| Local::now().date_naive()),
        );
        Self {
            mode,
            value,
            visible_month,
            placeholder: None,
            open: false,
            dismiss: OutsideDismiss::new(host.listeners(), region),
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn mode(&self) -> DatePickerMode {
        self.mode
    }

    pub fn value(&self) -> &ValueSync<Option<DateValue>> {
        &self.value
    }

    /// Supply the owner's value to a controlled picker.
    pub fn supply(&mut self, value: Option<DateValue>) -> Result<bool> {
        self.value.supply(value)
    }

    /// Formatted value, or the placeholder when nothing is selected.
    pub fn display_text(&self) -> String {
        match self.value.current() {
            Some(value) => value.format(),
            None => self.placeholder().to_string(),
        }
    }

    pub fn placeholder(&self) -> &str {
        self.placeholder
            .as_deref()
            .unwrap_or_else(|| self.mode.placeholder())
    }

    pub fn has_value(&self) -> bool {
        self.value.with(Option::is_some)
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

    pub fn close(&mut self) {
        if self.open {
            self.open = false;
            self.dismiss.deactivate();
        }
    }

    pub fn toggle(&mut self) {
        if self.open { self.close() } else { self.open() }
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

    /// First day of the month shown by the calendar.
    pub fn visible_month(&self) -> NaiveDate {
        self.visible_month
    }

    pub fn next_month(&mut self) {
        if let Some(month) = self.visible_month.checked_add_months(Months::new(1)) {
            self.visible_month = month;
        }
    }

    pub fn previous_month(&mut self) {
        if let Some(month) = self.visible_month.checked_sub_months(Months::new(1)) {
            self.visible_month = month;
        }
    }

    /// Whether `date` should be drawn as selected (or inside the range).
    pub fn is_selected(&self, date: NaiveDate) -> bool {
        match self.value.current() {
            Some(DateValue::Date(d)) => d == date,
            Some(DateValue::DateTime(dt)) => dt.date() == date,
            Some(DateValue::Range(r)) => r.contains(date),
            _ => false,
        }
    }

    /// Grid for the visible month, marking today in local time.
    pub fn month_grid(&self) -> Vec<CalendarDay> {
        month_grid(self.visible_month, Local::now().date_naive(), self.value.current())
    }

    /// Handle a day click in the calendar.
    ///
    /// Date mode commits and closes. Date-time mode keeps the current time of
    /// day and stays open for the time list. Range mode closes once the range
    /// is complete.
    pub fn pick_date(&mut self, date: NaiveDate) {
        tracing::debug!(target: targets::WIDGET, %date, mode = ?self.mode, "date picked");
        match self.mode {
            DatePickerMode::Time => {}
            DatePickerMode::Date => {
                self.value.request_change(Some(DateValue::Date(date)));
                self.close();
            }
            DatePickerMode::DateTime => {
                let time = match self.value.current() {
                    Some(DateValue::DateTime(dt)) => dt.time(),
                    _ => default_time(),
                };
                self.value
                    .request_change(Some(DateValue::DateTime(date.and_time(time))));
            }
            DatePickerMode::Range => {
                let (picked, outcome) = range::pick(range_of(self.value.current()), date);
                self.value.request_change(Some(DateValue::Range(picked)));
                if outcome == PickOutcome::Completed {
                    self.close();
                }
            }
        }
    }

    /// Handle a `HH:MM` pick from the time list.
    ///
    /// In date-time mode the time is applied to the selected date, or to
    /// today when no date is selected yet. Other calendar modes ignore it.
    pub fn select_time(&mut self, input: &str) -> Result<()> {
        let time = parse_time(input)?;
        match self.mode {
            DatePickerMode::Time => self.value.request_change(Some(DateValue::Time(time))),
            DatePickerMode::DateTime => {
                let date = match self.value.current() {
                    Some(DateValue::DateTime(dt)) => dt.date(),
                    _ => Local::now().date_naive(),
                };
                self.value
                    .request_change(Some(DateValue::DateTime(date.and_time(time))));
            }
            DatePickerMode::Date | DatePickerMode::Range => {}
        }
        Ok(())
    }

    /// Clear the selection.
    pub fn clear(&mut self) {
        self.value.request_change(None);
    }

    /// Whether the popover shows a calendar.
    pub fn has_calendar(&self) -> bool {
        self.mode.has_calendar()
    }
}

fn range_of(value: Option<DateValue>) -> Option<RangeValue<NaiveDate>> {
    match value {
        Some(DateValue::Range(r)) => Some(r),
        _ => None,
    }
}

impl std::fmt::Debug for DatePicker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatePicker")
            .field("mode", &self.mode)
            .field("value", &self.value)
            .field("visible_month", &self.visible_month)
            .field("open", &self.open)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_loom_core::Rect;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn picker(mode: DatePickerMode, value: Option<DateValue>) -> (Host, DatePicker) {
        let host = Host::new();
        let region = Region::new(Rect::new(0.0, 0.0, 240.0, 300.0));
        let picker = DatePicker::new(&host, region, mode, ValueSync::uncontrolled(value));
        (host, picker)
    }

    #[test]
    fn test_date_mode_closes_on_pick() {
        let (_host, mut p) = picker(DatePickerMode::Date, None);
        assert_eq!(p.display_text(), "Select date...");
        p.open();
        p.pick_date(date(2024, 3, 5));
        assert!(!p.is_open());
        assert_eq!(p.display_text(), "March 5, 2024");
        assert!(p.is_selected(date(2024, 3, 5)));
    }

    #[test]
    fn test_datetime_keeps_time_of_day() {
        let start = date(2024, 1, 1).and_hms_opt(15, 45, 0).unwrap();
        let (_host, mut p) = picker(DatePickerMode::DateTime, Some(DateValue::DateTime(start)));
        p.open();
        p.pick_date(date(2024, 2, 10));
        assert!(p.is_open());
        assert_eq!(p.display_text(), "Feb 10, 2024 3:45 PM");

        p.select_time("09:05").unwrap();
        assert_eq!(p.display_text(), "Feb 10, 2024 9:05 AM");
    }

    #[test]
    fn test_datetime_without_time_uses_noon() {
        let (_host, mut p) = picker(DatePickerMode::DateTime, None);
        p.pick_date(date(2024, 2, 10));
        assert_eq!(p.display_text(), "Feb 10, 2024 12:00 PM");
    }

    #[test]
    fn test_time_mode() {
        let (_host, mut p) = picker(DatePickerMode::Time, None);
        assert!(!p.has_calendar());
        assert!(matches!(p.select_time("25:00"), Err(Error::InvalidTime { .. })));
        assert!(!p.has_value());
        p.select_time("00:30").unwrap();
        assert_eq!(p.display_text(), "12:30 AM");
    }

    #[test]
    fn test_range_swaps_and_closes() {
        let (_host, mut p) = picker(DatePickerMode::Range, None);
        p.open();
        p.pick_date(date(2024, 5, 20));
        assert!(p.is_open());
        assert_eq!(p.display_text(), "May 20, 2024");

        p.pick_date(date(2024, 5, 10));
        assert!(!p.is_open());
        assert_eq!(p.display_text(), "May 10, 2024 - May 20, 2024");
        assert!(p.is_selected(date(2024, 5, 15)));

        p.open();
        p.pick_date(date(2024, 6, 1));
        assert_eq!(p.display_text(), "Jun 1, 2024");
    }

    #[test]
    fn test_controlled_range_follows_owner_value() {
        use parking_lot::Mutex;
        use std::sync::Arc;

        let host = Host::new();
        let mut p = DatePicker::new(
            &host,
            Region::default(),
            DatePickerMode::Range,
            ValueSync::controlled(None),
        );
        let emitted = Arc::new(Mutex::new(Vec::new()));
        let sink = emitted.clone();
        p.value()
            .value_changed()
            .connect(move |v: &Option<DateValue>| sink.lock().push(*v));

        p.open();
        p.pick_date(date(2024, 5, 20));
        p.pick_date(date(2024, 5, 10));
        // The owner never accepted the first pick, so the second starts over.
        assert!(p.is_open());
        assert!(!p.has_value());
        assert_eq!(
            emitted.lock().last(),
            Some(&Some(DateValue::Range(RangeValue::start(date(2024, 5, 10)))))
        );

        p.supply(Some(DateValue::Range(RangeValue::start(date(2024, 5, 20)))))
            .unwrap();
        p.pick_date(date(2024, 5, 10));
        assert!(!p.is_open());
        assert_eq!(
            emitted.lock().last(),
            Some(&Some(DateValue::Range(RangeValue::new(date(2024, 5, 10), date(2024, 5, 20)))))
        );
    }

    #[test]
    fn test_month_grid_covers_whole_weeks() {
        // March 2024 starts on a Friday and ends on a Sunday.
        let grid = month_grid(date(2024, 3, 14), date(2024, 3, 8), None);
        assert_eq!(grid.len(), 42);
        assert_eq!(grid[0].date, date(2024, 2, 25));
        assert_eq!(grid[41].date, date(2024, 4, 6));
        assert!(!grid[0].in_month);
        assert!(grid[5].in_month);
        assert_eq!(grid[5].date, date(2024, 3, 1));
        assert_eq!(grid.iter().filter(|d| d.in_month).count(), 31);
        assert_eq!(grid.iter().filter(|d| d.is_today).count(), 1);
        assert!(grid.iter().all(|d| !d.is_selected && !d.in_range));

        // February 2026 fills exactly four weeks.
        assert_eq!(month_grid(date(2026, 2, 1), date(2026, 2, 1), None).len(), 28);
    }

    #[test]
    fn test_month_grid_marks_range() {
        let range = DateValue::Range(RangeValue::new(date(2024, 5, 10), date(2024, 5, 12)));
        let grid = month_grid(date(2024, 5, 1), date(2000, 1, 1), Some(range));
        let day = |d: u32| grid.iter().find(|c| c.date == date(2024, 5, d)).unwrap();
        assert!(day(10).is_selected && day(10).in_range);
        assert!(!day(11).is_selected && day(11).in_range);
        assert!(day(12).is_selected);
        assert!(!day(13).in_range);

        let (_host, p) = picker(DatePickerMode::Date, Some(DateValue::Date(date(2024, 5, 3))));
        let grid = p.month_grid();
        assert_eq!(grid.iter().filter(|c| c.is_selected).count(), 1);
    }

    #[test]
    fn test_clear_and_month_navigation() {
        let (_host, mut p) = picker(DatePickerMode::Date, Some(DateValue::Date(date(2024, 12, 25))));
        assert_eq!(p.visible_month(), date(2024, 12, 1));
        p.next_month();
        assert_eq!(p.visible_month(), date(2025, 1, 1));
        p.previous_month();
        p.previous_month();
        assert_eq!(p.visible_month(), date(2024, 11, 1));

        p.clear();
        assert!(!p.has_value());
        assert_eq!(p.display_text(), "Select date...");
    }

    #[test]
    fn test_outside_click_closes() {
        let (host, mut p) = picker(DatePickerMode::Date, None);
        p.toggle();
        assert!(!p.handle_pointer_down(Point::new(10.0, 10.0)));
        assert!(p.handle_pointer_down(Point::new(500.0, 10.0)));
        assert!(!p.is_open());
        assert_eq!(host.listeners().active_count(), 0);
    }
}
