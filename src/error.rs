//! Crate-level error types.

use std::fmt;

use crate::puzzle::MoveError;

/// Errors produced by the hanoi-viz crate.
#[derive(Debug)]
pub enum HanoiError {
    /// A disk count, speed, frame count, or layout value was out of range.
    InvalidConfiguration(String),
    /// The tower model rejected a move.
    IllegalMove(MoveError),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// Failed to spawn the playback thread.
    ThreadSpawn(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for HanoiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfiguration(msg) => {
                write!(f, "invalid configuration: {msg}")
            }
            Self::IllegalMove(e) => write!(f, "illegal move: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ThreadSpawn(e) => {
                write!(f, "failed to spawn thread: {e}")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for HanoiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IllegalMove(e) => Some(e),
            Self::Io(e) | Self::ThreadSpawn(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MoveError> for HanoiError {
    fn from(e: MoveError) -> Self {
        Self::IllegalMove(e)
    }
}

impl From<std::io::Error> for HanoiError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
