//! Leaf actions and checks that run commands through the remote session.

use super::action::Action;
use super::check::{Check, CheckFn};
use super::context::Context;
use super::error::ActionError;
use tracing::debug;

/// Command used to elevate privileges when the context asks for it.
pub const DEFAULT_ELEVATION: &str = "sudo";

/// A shell command to run on the remote host.
///
/// When the context's `use_elevated` flag is set, the command line is
/// prefixed with the elevation command (`sudo` unless overridden).
///
/// As an [`Action`] it forwards each non-empty stdout line to the sink and
/// fails when the command exits with a non-zero status.
///
/// # Example
///
/// ```rust
/// use stepwise::core::RemoteCommand;
///
/// let cmd = RemoteCommand::new("kubeadm init --skip-token-print");
/// assert_eq!(cmd.command_line(false), "kubeadm init --skip-token-print");
/// assert_eq!(cmd.command_line(true), "sudo kubeadm init --skip-token-print");
///
/// let doas = cmd.elevate_with("doas");
/// assert_eq!(doas.command_line(true), "doas kubeadm init --skip-token-print");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteCommand {
    command: String,
    elevation: String,
}

impl RemoteCommand {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            elevation: DEFAULT_ELEVATION.to_string(),
        }
    }

    /// Replace the elevation command.
    ///
    /// An empty elevation means no prefix at all: the command then runs
    /// unelevated even when the context asks for elevation.
    pub fn elevate_with(mut self, elevation: impl Into<String>) -> Self {
        self.elevation = elevation.into();
        self
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// The command line actually sent to the session.
    pub fn command_line(&self, use_elevated: bool) -> String {
        if use_elevated && !self.elevation.is_empty() {
            format!("{} {}", self.elevation, self.command)
        } else {
            self.command.clone()
        }
    }

    /// Run the command and report whether it exited successfully.
    ///
    /// A non-zero exit is `Ok(false)`; only session failures are errors.
    fn succeeds(&self, ctx: &Context<'_>) -> Result<bool, ActionError> {
        let line = self.command_line(ctx.use_elevated());
        let output = ctx.session().run(&line)?;
        debug!(command = %line, status = output.exit_status, "remote check finished");
        Ok(output.success())
    }
}

impl Action for RemoteCommand {
    fn apply(&self, ctx: &Context<'_>) -> Result<(), ActionError> {
        let line = self.command_line(ctx.use_elevated());
        debug!(command = %line, "running remote command");
        let output = ctx.session().run(&line)?;

        for stdout_line in output.stdout.lines().filter(|l| !l.trim().is_empty()) {
            ctx.output(stdout_line);
        }

        if output.success() {
            Ok(())
        } else {
            Err(ActionError::CommandFailed {
                command: line,
                status: output.exit_status,
                stderr: output.stderr.trim().to_string(),
            })
        }
    }
}

impl Check for RemoteCommand {
    fn check(&self, ctx: &Context<'_>) -> Result<bool, ActionError> {
        self.succeeds(ctx)
    }
}

/// Action that runs `command` on the remote host.
pub fn run_command(command: impl Into<String>) -> RemoteCommand {
    RemoteCommand::new(command)
}

/// Check that holds when `command` exits with status 0.
pub fn check_command(command: impl Into<String>) -> RemoteCommand {
    RemoteCommand::new(command)
}

/// Check that holds when `path` is a regular file on the remote host.
pub fn check_file_exists(path: &str) -> RemoteCommand {
    RemoteCommand::new(format!("test -f {}", shell_quote(path)))
}

/// Check that holds when `binary` can be found on the remote `PATH`.
///
/// Never elevated: the lookup must see the caller's own `PATH`.
pub fn check_binary_exists(binary: &str) -> CheckFn {
    let cmd = RemoteCommand::new(format!("command -v {}", shell_quote(binary)));
    CheckFn::new(move |ctx| {
        let output = ctx.session().run(cmd.command())?;
        Ok(output.success())
    })
}

/// Wrap `value` in single quotes for a POSIX shell.
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}
