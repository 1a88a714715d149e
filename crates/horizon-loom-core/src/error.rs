//! Error types for Horizon Loom core services.

use std::fmt;

/// The main error type for Horizon Loom core operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoomError {
    /// Timer-related error.
    Timer(TimerError),
    /// Listener-related error.
    Listener(ListenerError),
}

impl fmt::Display for LoomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timer(err) => write!(f, "Timer error: {err}"),
            Self::Listener(err) => write!(f, "Listener error: {err}"),
        }
    }
}

impl std::error::Error for LoomError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Timer(err) => Some(err),
            Self::Listener(err) => Some(err),
        }
    }
}

/// Timer-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    /// The timer ID is invalid or has already fired or been stopped.
    InvalidTimerId,
}

impl fmt::Display for TimerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTimerId => write!(f, "Invalid or expired timer ID"),
        }
    }
}

impl std::error::Error for TimerError {}

impl From<TimerError> for LoomError {
    fn from(err: TimerError) -> Self {
        Self::Timer(err)
    }
}

/// Listener-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenerError {
    /// The listener ID is invalid or has already been released.
    InvalidListenerId,
}

impl fmt::Display for ListenerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidListenerId => write!(f, "Invalid or released listener ID"),
        }
    }
}

impl std::error::Error for ListenerError {}

impl From<ListenerError> for LoomError {
    fn from(err: ListenerError) -> Self {
        Self::Listener(err)
    }
}

/// A specialized Result type for Horizon Loom core operations.
pub type Result<T> = std::result::Result<T, LoomError>;
