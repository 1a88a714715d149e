//! Keyboard navigation through an option list.
//!
//! A [`KeyboardNavigator`] tracks the highlighted index of a list whose length
//! may change at any time (typically because the user typed a filter). The
//! index is `-1` when nothing is highlighted and is otherwise always inside
//! the list: moving clamps at both ends instead of wrapping, and shrinking
//! the list clamps the index to the new last item.

use horizon_loom_core::Signal;
use horizon_loom_core::logging::targets;

use crate::event::Key;

/// Default number of items PageUp/PageDown move by.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Whether committing an option closes the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Commit selects one option and closes.
    #[default]
    Single,
    /// Commit toggles an option and keeps the list open.
    Multiple,
}

/// What the owner should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    /// The key had no effect.
    Ignored,
    /// The highlight is now at this index (possibly unchanged at a boundary).
    Highlighted(i32),
    /// Commit the option at `index`; close the list if `close` is set.
    Commit { index: usize, close: bool },
    /// Close the list without committing.
    Close,
}

/// Tracks the highlighted index of a list.
#[derive(Debug)]
pub struct KeyboardNavigator {
    index: i32,
    len: usize,
    mode: SelectionMode,
    page_size: usize,
    highlight_changed: Signal<i32>,
}

impl KeyboardNavigator {
    /// Create a navigator over an empty list.
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            index: -1,
            len: 0,
            mode,
            page_size: DEFAULT_PAGE_SIZE,
            highlight_changed: Signal::new(),
        }
    }

    /// Set the PageUp/PageDown step (at least 1).
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// The highlighted index, `-1` if none.
    pub fn index(&self) -> i32 {
        self.index
    }

    /// The highlighted index as a list position.
    pub fn highlighted(&self) -> Option<usize> {
        usize::try_from(self.index).ok()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Signal emitted when the highlighted index changes.
    pub fn highlight_changed(&self) -> &Signal<i32> {
        &self.highlight_changed
    }

    /// Update the list length, clamping the index into the new list.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if self.index > self.last() {
            self.move_to(self.last());
        }
    }

    /// Highlight an index (for pointer hover), clamped into the list.
    pub fn highlight(&mut self, index: i32) {
        let index = if self.len == 0 {
            -1
        } else {
            index.clamp(-1, self.last())
        };
        self.move_to(index);
    }

    /// Clear the highlight.
    pub fn reset(&mut self) {
        self.move_to(-1);
    }

    /// Handle a key press while the list is open.
    pub fn handle_key(&mut self, key: Key) -> NavAction {
        match key {
            Key::ArrowDown => self.step(1),
            Key::ArrowUp => self.step(-1),
            Key::PageDown => self.step(self.page_step()),
            Key::PageUp => self.step(-self.page_step()),
            Key::Home => self.jump(0),
            Key::End => self.jump(self.last()),
            Key::Enter => self.commit(),
            Key::Escape | Key::Tab => {
                self.reset();
                NavAction::Close
            }
            _ => NavAction::Ignored,
        }
    }

    fn commit(&mut self) -> NavAction {
        let Some(index) = self.highlighted().filter(|i| *i < self.len) else {
            return NavAction::Ignored;
        };
        let close = self.mode == SelectionMode::Single;
        if close {
            self.reset();
        }
        tracing::trace!(target: targets::NAVIGATOR, index, close, "commit");
        NavAction::Commit { index, close }
    }

    fn step(&mut self, delta: i32) -> NavAction {
        if self.len == 0 {
            return NavAction::Highlighted(self.index);
        }
        let next = if delta > 0 {
            self.index.saturating_add(delta).min(self.last())
        } else {
            self.index.saturating_add(delta).max(0)
        };
        self.move_to(next);
        NavAction::Highlighted(self.index)
    }

    fn jump(&mut self, index: i32) -> NavAction {
        if self.len > 0 {
            self.move_to(index);
        }
        NavAction::Highlighted(self.index)
    }

    fn page_step(&self) -> i32 {
        i32::try_from(self.page_size).unwrap_or(i32::MAX)
    }

    /// Index of the last item, `-1` for an empty list.
    fn last(&self) -> i32 {
        i32::try_from(self.len).map_or(i32::MAX, |len| len - 1)
    }

    fn move_to(&mut self, index: i32) {
        if self.index != index {
            self.index = index;
            self.highlight_changed.emit(index);
        }
    }
}

impl Default for KeyboardNavigator {
    fn default() -> Self {
        Self::new(SelectionMode::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nav(len: usize) -> KeyboardNavigator {
        let mut nav = KeyboardNavigator::new(SelectionMode::Single);
        nav.set_len(len);
        nav
    }

    #[test]
    fn test_arrows_clamp_without_wrapping() {
        let mut nav = nav(3);
        assert_eq!(nav.handle_key(Key::ArrowDown), NavAction::Highlighted(0));
        nav.handle_key(Key::ArrowDown);
        nav.handle_key(Key::ArrowDown);
        assert_eq!(nav.handle_key(Key::ArrowDown), NavAction::Highlighted(2));

        for _ in 0..5 {
            nav.handle_key(Key::ArrowUp);
        }
        assert_eq!(nav.index(), 0);
    }

    #[test]
    fn test_empty_list_stays_unhighlighted() {
        let mut nav = nav(0);
        assert_eq!(nav.handle_key(Key::ArrowDown), NavAction::Highlighted(-1));
        assert_eq!(nav.handle_key(Key::ArrowUp), NavAction::Highlighted(-1));
        assert_eq!(nav.handle_key(Key::End), NavAction::Highlighted(-1));
        assert_eq!(nav.handle_key(Key::Enter), NavAction::Ignored);
    }

    #[test]
    fn test_enter_without_highlight_is_noop() {
        let mut nav = nav(3);
        assert_eq!(nav.handle_key(Key::Enter), NavAction::Ignored);
    }

    #[test]
    fn test_single_commit_closes_and_resets() {
        let mut nav = nav(3);
        nav.highlight(1);
        assert_eq!(
            nav.handle_key(Key::Enter),
            NavAction::Commit { index: 1, close: true }
        );
        assert_eq!(nav.index(), -1);
    }

    #[test]
    fn test_multi_commit_stays_open() {
        let mut nav = KeyboardNavigator::new(SelectionMode::Multiple);
        nav.set_len(3);
        nav.highlight(2);
        assert_eq!(
            nav.handle_key(Key::Enter),
            NavAction::Commit { index: 2, close: false }
        );
        assert_eq!(nav.index(), 2);
    }

    #[test]
    fn test_shrinking_list_clamps() {
        let mut nav = nav(5);
        nav.highlight(4);
        nav.set_len(2);
        assert_eq!(nav.index(), 1);
        nav.set_len(0);
        assert_eq!(nav.index(), -1);
    }

    #[test]
    fn test_home_end_and_paging() {
        let mut nav = KeyboardNavigator::new(SelectionMode::Single).with_page_size(4);
        nav.set_len(10);
        assert_eq!(nav.handle_key(Key::End), NavAction::Highlighted(9));
        assert_eq!(nav.handle_key(Key::PageUp), NavAction::Highlighted(5));
        assert_eq!(nav.handle_key(Key::Home), NavAction::Highlighted(0));
        nav.handle_key(Key::PageDown);
        nav.handle_key(Key::PageDown);
        assert_eq!(nav.handle_key(Key::PageDown), NavAction::Highlighted(9));
    }

    #[test]
    fn test_escape_and_tab_close() {
        let mut nav = nav(3);
        nav.highlight(1);
        assert_eq!(nav.handle_key(Key::Escape), NavAction::Close);
        assert_eq!(nav.index(), -1);
        assert_eq!(nav.handle_key(Key::Tab), NavAction::Close);
        assert_eq!(nav.handle_key(Key::Other), NavAction::Ignored);
    }

    #[test]
    fn test_highlight_clamps() {
        let mut nav = nav(3);
        nav.highlight(10);
        assert_eq!(nav.index(), 2);
        nav.highlight(-7);
        assert_eq!(nav.index(), -1);
    }
}
