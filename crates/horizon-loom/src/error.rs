//! Error types for the component layer.

use std::path::PathBuf;

use crate::platform::ClipboardError;

/// Result type alias for component operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by components.
///
/// Invalid user input and programmer misuse are both returned here; the
/// components also keep their prior state and expose inline validation text
/// where the user should see it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A color string that is not `#RRGGBB`.
    #[error("Invalid color '{input}': expected #RRGGBB")]
    InvalidColor { input: String },

    /// A selected file exceeds the configured maximum size.
    #[error("File {name} is too large. Max size is {:.1}MB.", megabytes(.max))]
    FileTooLarge { name: String, size: u64, max: u64 },

    /// A time string that is not `HH:MM`.
    #[error("Invalid time '{input}': expected HH:MM")]
    InvalidTime { input: String },

    /// A tab id that was never registered on the tab set.
    #[error("Unknown tab '{id}'")]
    UnknownTab { id: String },

    /// A panel id that was never registered on the collapse.
    #[error("Unknown panel '{id}'")]
    UnknownPanel { id: String },

    /// A value was supplied to a field that owns its own state.
    #[error("Cannot supply a value to an uncontrolled field")]
    UncontrolledValue,

    /// File I/O error.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A settings file that could not be parsed or serialized.
    #[error("Failed to parse '{path}': {message}")]
    Parse { path: PathBuf, message: String },

    /// Clipboard access failed.
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
}

impl Error {
    /// Create an invalid color error.
    pub fn invalid_color(input: impl Into<String>) -> Self {
        Self::InvalidColor {
            input: input.into(),
        }
    }

    /// Create an oversized file error.
    pub fn file_too_large(name: impl Into<String>, size: u64, max: u64) -> Self {
        Self::FileTooLarge {
            name: name.into(),
            size,
            max,
        }
    }

    /// Create an invalid time error.
    pub fn invalid_time(input: impl Into<String>) -> Self {
        Self::InvalidTime {
            input: input.into(),
        }
    }

    /// Create an unknown tab error.
    pub fn unknown_tab(id: impl Into<String>) -> Self {
        Self::UnknownTab { id: id.into() }
    }

    pub fn unknown_panel(id: impl Into<String>) -> Self {
        Self::UnknownPanel { id: id.into() }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a parse error.
    pub fn parse(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

fn megabytes(bytes: &u64) -> f64 {
    *bytes as f64 / 1024.0 / 1024.0
}
