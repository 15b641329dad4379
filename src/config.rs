//! Execution configuration.

use crate::core::remote::{self, DEFAULT_ELEVATION};
use crate::core::{Context, OutputSink, RemoteCommand, RemoteSession};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Parse(String),

    #[error("Elevation command must not be empty when use_elevated is set")]
    EmptyElevation,
}

/// How a plan is executed on the remote host.
///
/// Missing fields take their defaults, so `{}` is a valid configuration.
///
/// # Example
///
/// ```rust
/// use stepwise::config::ExecutionConfig;
///
/// let config = ExecutionConfig::from_json(r#"{ "use_elevated": true }"#).unwrap();
/// assert!(config.use_elevated);
/// assert_eq!(config.elevation_command, "sudo");
/// assert_eq!(config.command("kubeadm version").command_line(config.use_elevated), "sudo kubeadm version");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Run remote commands with elevated privileges
    pub use_elevated: bool,

    /// Command prepended to elevated command lines
    pub elevation_command: String,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            use_elevated: false,
            elevation_command: DEFAULT_ELEVATION.to_string(),
        }
    }
}

impl ExecutionConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.use_elevated && self.elevation_command.trim().is_empty() {
            return Err(ConfigError::EmptyElevation);
        }
        Ok(self)
    }

    /// Execution context for one top-level invocation.
    pub fn context<'a>(
        &self,
        sink: &'a dyn OutputSink,
        session: &'a dyn RemoteSession,
    ) -> Context<'a> {
        Context::new(sink, session, self.use_elevated)
    }

    /// Remote command that elevates with the configured command.
    pub fn command(&self, command: impl Into<String>) -> RemoteCommand {
        RemoteCommand::new(command).elevate_with(self.elevation_command.clone())
    }

    /// Command check that elevates with the configured command.
    pub fn check_command(&self, command: impl Into<String>) -> RemoteCommand {
        self.command(command)
    }

    /// File check that elevates with the configured command.
    pub fn check_file_exists(&self, path: &str) -> RemoteCommand {
        remote::check_file_exists(path).elevate_with(self.elevation_command.clone())
    }
}
