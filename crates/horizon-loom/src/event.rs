//! Input events forwarded from the host.

/// Keys the components react to.
///
/// Hosts translate their native key codes into this enum; everything a
/// component does not handle can be reported as [`Key::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    PageUp,
    PageDown,
    Enter,
    Escape,
    Tab,
    Backspace,
    /// Any key without a component binding.
    Other,
}

impl Key {
    /// Whether this key moves a highlight through a list.
    pub fn is_navigation(self) -> bool {
        matches!(
            self,
            Key::ArrowUp | Key::ArrowDown | Key::Home | Key::End | Key::PageUp | Key::PageDown
        )
    }
}
