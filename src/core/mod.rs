//! Action and check combinators.
//!
//! This module contains the execution engine:
//! - The execution context and the sink/session contracts it carries
//! - Actions, their closure adapter, and the sequencing, conditional and
//!   best-effort combinators
//! - Checks, their closure adapter, and short-circuit boolean combinators
//! - Leaf actions and checks that run commands on the remote host
//!
//! Evaluation is synchronous and strictly left to right. Every combinator
//! hands its children the same context it was given.

mod action;
mod check;
mod context;
mod error;
pub mod remote;

pub use action::{
    apply_composed, apply_if, apply_if_else, apply_list, apply_try, apply_try_with, fatal,
    message, message_info, message_warn, no_op, Action, ActionList, ApplyFn, BoxedAction,
    MessageLevel,
};
pub use check::{always, check_and, check_not, check_or, BoxedCheck, Check, CheckFn};
pub use context::{
    CapturedOutput, CommandOutput, Context, NoSession, OutputFn, OutputSink, RemoteSession,
    TracingSink,
};
pub use error::{ActionError, SessionError};
pub use remote::{
    check_binary_exists, check_command, check_file_exists, run_command, RemoteCommand,
};
