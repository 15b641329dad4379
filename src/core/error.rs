//! Error types shared by actions and checks.

use thiserror::Error;

/// Failure raised by the remote session itself, before any command result
/// is available.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("no remote session available")]
    Unavailable,

    #[error("transport error: {0}")]
    Transport(String),
}

/// Errors produced while applying an action or evaluating a check.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ActionError {
    /// Deliberate abort of the whole plan.
    #[error("ERROR: {0}")]
    Fatal(String),

    /// Generic failure reported by a caller-supplied action or check.
    #[error("{0}")]
    Failed(String),

    #[error("command `{command}` exited with status {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: i32,
        stderr: String,
    },

    #[error("remote session error: {0}")]
    Session(#[from] SessionError),
}

impl ActionError {
    /// Build a generic failure from any message.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal(_))
    }
}
