//! Error types for wslevels.
//!
//! Everything that can abort a directive funnels into [`LevelsError`]. State
//! store failures are deliberately absent: the store absorbs them and logs.

use thiserror::Error;

use crate::config::ConfigError;

/// Result type alias for fallible directive and command execution.
pub type LevelsResult<T> = Result<T, LevelsError>;

/// Errors that end an invocation with a non-zero exit status.
#[derive(Debug, Error)]
pub enum LevelsError {
    /// The window manager rejected a command or reported a failure.
    #[error("Window manager error: {0}")]
    WindowManager(String),

    /// The window manager message binary could not be located or started.
    #[error("Failed to run `{command}`: {reason}")]
    Spawn {
        /// The command line that was attempted.
        command: String,
        /// Why it could not run.
        reason: String,
    },

    /// The window manager returned output that could not be understood.
    #[error("Failed to parse window manager output: {0}")]
    Parse(String),

    /// No level without workspaces was found below the search bound.
    #[error("Could not create new level after looking through {searched} levels")]
    NoEmptyLevel {
        /// The search bound that was exhausted.
        searched: i32,
    },

    /// The directive name is not one of the known directives.
    #[error("Unrecognized directive {0:?}")]
    UnrecognizedDirective(String),

    /// A workspace number cannot be moved up without leaving the `i32` range.
    #[error("Workspace {0} cannot be renumbered past the largest workspace number")]
    NumberOutOfRange(i32),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(String),
}

impl LevelsError {
    /// Creates a window manager error with the given message.
    #[must_use]
    pub fn window_manager(message: impl Into<String>) -> Self { Self::WindowManager(message.into()) }

    /// Creates a spawn error for the given command line.
    #[must_use]
    pub fn spawn(command: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Spawn {
            command: command.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` if the error came from talking to the window manager.
    #[must_use]
    pub const fn is_window_manager_failure(&self) -> bool {
        matches!(self, Self::WindowManager(_) | Self::Spawn { .. } | Self::Parse(_))
    }
}

impl From<std::io::Error> for LevelsError {
    fn from(err: std::io::Error) -> Self { Self::Io(err.to_string()) }
}

impl From<serde_json::Error> for LevelsError {
    fn from(err: serde_json::Error) -> Self { Self::Parse(err.to_string()) }
}

impl From<ConfigError> for LevelsError {
    fn from(err: ConfigError) -> Self { Self::Config(err.to_string()) }
}
