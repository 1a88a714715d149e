//! Platform services used by components.

mod clipboard;

pub use clipboard::{ClipboardBackend, ClipboardError, SystemClipboard};
