//! Clipboard access.
//!
//! Components write through the [`ClipboardBackend`] trait so hosts and tests
//! can substitute their own clipboard. [`SystemClipboard`] is the default
//! backend, a thin wrapper around `arboard`.

use std::fmt;

use horizon_loom_core::logging::targets;

/// Error type for clipboard operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardError {
    message: String,
}

impl ClipboardError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "clipboard error: {}", self.message)
    }
}

impl std::error::Error for ClipboardError {}

impl From<arboard::Error> for ClipboardError {
    fn from(err: arboard::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// Somewhere text can be copied to.
pub trait ClipboardBackend {
    /// Replace the clipboard contents with `text`.
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The system clipboard.
///
/// The underlying `arboard` handle is opened on first use, so creating a
/// `SystemClipboard` never fails; an unavailable clipboard surfaces as an
/// error from [`ClipboardBackend::set_text`].
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current text content of the clipboard.
    pub fn get_text(&mut self) -> Result<String, ClipboardError> {
        self.handle()?.get_text().map_err(Into::into)
    }

    fn handle(&mut self) -> Result<&mut arboard::Clipboard, ClipboardError> {
        if self.inner.is_none() {
            tracing::trace!(target: targets::CLIPBOARD, "opening system clipboard");
            self.inner = Some(arboard::Clipboard::new()?);
        }
        self.inner
            .as_mut()
            .ok_or_else(|| ClipboardError::new("clipboard unavailable"))
    }
}

impl ClipboardBackend for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.handle()?.set_text(text).map_err(Into::into)
    }
}

impl fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SystemClipboard")
            .field("open", &self.inner.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ClipboardError::new("denied");
        assert_eq!(err.to_string(), "clipboard error: denied");
        assert_eq!(err.message(), "denied");
    }

    #[test]
    fn test_system_clipboard_is_lazy() {
        let clipboard = SystemClipboard::new();
        assert!(format!("{clipboard:?}").contains("open: false"));
    }
}
