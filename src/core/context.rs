//! Execution context threaded through every action and check.
//!
//! The context bundles the two collaborators the engine consumes (an output
//! sink and a remote session) with the elevated-privilege flag. It is
//! created once by the top-level driver and passed unchanged to every
//! nested call.

use super::error::SessionError;
use std::fmt;
use std::sync::Mutex;

/// Destination for human-readable progress lines.
///
/// Writes are assumed to succeed and to be visible to the caller
/// immediately.
pub trait OutputSink: Send + Sync {
    /// Write a single line of output.
    fn output(&self, line: &str);
}

/// Adapter that lets a plain closure act as an [`OutputSink`].
///
/// # Example
///
/// ```rust
/// use stepwise::core::{OutputFn, OutputSink};
///
/// let sink = OutputFn::new(|line| println!("{line}"));
/// sink.output("hello");
/// ```
pub struct OutputFn {
    f: Box<dyn Fn(&str) + Send + Sync>,
}

impl OutputFn {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        Self { f: Box::new(f) }
    }
}

impl OutputSink for OutputFn {
    fn output(&self, line: &str) {
        (self.f)(line)
    }
}

/// Sink that keeps every line in memory, in write order.
#[derive(Debug, Default)]
pub struct CapturedOutput {
    lines: Mutex<Vec<String>>,
}

impl CapturedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the lines written so far.
    pub fn lines(&self) -> Vec<String> {
        match self.lines.lock() {
            Ok(lines) => lines.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl OutputSink for CapturedOutput {
    fn output(&self, line: &str) {
        match self.lines.lock() {
            Ok(mut lines) => lines.push(line.to_string()),
            Err(poisoned) => poisoned.into_inner().push(line.to_string()),
        }
    }
}

/// Sink that forwards every line to `tracing` at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl OutputSink for TracingSink {
    fn output(&self, line: &str) {
        tracing::info!(target: "stepwise::output", "{line}");
    }
}

/// Captured result of running a command on the remote host.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub exit_status: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_status == 0
    }
}

/// Stateful handle used to execute commands on a remote host.
///
/// Combinators never call into the session; they only hand the same
/// handle to their children. Leaf actions and checks in
/// [`crate::core::remote`] are the ones that run commands.
pub trait RemoteSession: Send + Sync {
    fn run(&self, command: &str) -> Result<CommandOutput, SessionError>;
}

/// Session for plans that never touch a remote host.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSession;

impl RemoteSession for NoSession {
    fn run(&self, _command: &str) -> Result<CommandOutput, SessionError> {
        Err(SessionError::Unavailable)
    }
}

/// The `(sink, session, use_elevated)` triple for one top-level invocation.
///
/// `Context` is `Copy` and only borrows its collaborators, so it cannot be
/// modified on the way down the tree.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    sink: &'a dyn OutputSink,
    session: &'a dyn RemoteSession,
    use_elevated: bool,
}

impl<'a> Context<'a> {
    pub fn new(
        sink: &'a dyn OutputSink,
        session: &'a dyn RemoteSession,
        use_elevated: bool,
    ) -> Self {
        Self {
            sink,
            session,
            use_elevated,
        }
    }

    pub fn sink(&self) -> &'a dyn OutputSink {
        self.sink
    }

    pub fn session(&self) -> &'a dyn RemoteSession {
        self.session
    }

    pub fn use_elevated(&self) -> bool {
        self.use_elevated
    }

    /// Shorthand for `ctx.sink().output(line)`.
    pub fn output(&self, line: &str) {
        self.sink.output(line)
    }
}

impl fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("use_elevated", &self.use_elevated)
            .finish_non_exhaustive()
    }
}
