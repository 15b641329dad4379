//! Stepwise: composable actions and checks for remote provisioning
//!
//! Stepwise expresses a provisioning step as a tree of ordered,
//! side-effecting actions with conditional branching, best-effort
//! execution, and short-circuit boolean preconditions. Trees run against
//! an output sink, a remote session, and an elevated-privilege flag that
//! are threaded unchanged through every call. The first error stops the
//! tree and is returned as-is.
//!
//! # Core Concepts
//!
//! - **Action**: a unit of work (`apply`), combined with `apply_composed`,
//!   `apply_if`, `apply_if_else` and `apply_try`
//! - **Check**: a boolean precondition (`check`), combined with
//!   `check_and`, `check_or` and `check_not`
//! - **Plan**: a validated list of named steps that keeps a run journal
//!
//! # Example
//!
//! ```rust
//! use stepwise::core::{
//!     always, apply_if, fatal, message, Action, CapturedOutput, Context, NoSession,
//! };
//! use stepwise::{all_of, sequence};
//!
//! let tree = sequence![
//!     apply_if(all_of![always(true), always(true)], message("A")),
//!     fatal("boom"),
//!     message("never printed"),
//! ];
//!
//! let sink = CapturedOutput::new();
//! let result = tree.apply(&Context::new(&sink, &NoSession, false));
//!
//! assert!(result.unwrap_err().to_string().contains("boom"));
//! assert_eq!(sink.lines(), vec!["A", "ERROR: boom"]);
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod effects;
pub mod journal;
pub mod validation;

// Re-export commonly used types
pub use builder::{BuildError, Plan, PlanBuilder, PlanError, Step};
pub use config::ExecutionConfig;
pub use crate::core::{Action, ActionError, Check, Context, OutputSink, RemoteSession};
pub use journal::RunReport;
