//! Builder API for assembling provisioning plans.
//!
//! A plan is a named list of named steps. Building one validates it with
//! [`crate::validation`] rules, and running one produces a
//! [`crate::journal::RunReport`].

pub mod error;
pub mod macros;
pub mod plan;

pub use error::{BuildError, PlanError};
pub use plan::{Plan, PlanBuilder, Step};

use crate::core::{apply_if, apply_if_else, Action, ApplyFn, Check};

/// Create a step that only runs when `condition` holds.
///
/// # Example
///
/// ```
/// use stepwise::builder::guarded_step;
/// use stepwise::core::{check_file_exists, check_not, run_command};
///
/// let step = guarded_step(
///     "init",
///     check_not(check_file_exists("/etc/kubernetes/admin.conf")),
///     run_command("kubeadm init --skip-token-print"),
/// );
/// assert_eq!(step.name(), "init");
/// ```
pub fn guarded_step<C, A>(name: impl Into<String>, condition: C, action: A) -> Step
where
    C: Check + 'static,
    A: Action + 'static,
{
    Step::new(name, apply_if(condition, action))
}

/// Create a step that picks one of two actions depending on `condition`.
pub fn branch_step<C, T, E>(
    name: impl Into<String>,
    condition: C,
    if_true: T,
    if_false: E,
) -> Step
where
    C: Check + 'static,
    T: Action + 'static,
    E: Action + 'static,
{
    let action: ApplyFn = apply_if_else(condition, if_true, if_false);
    Step::new(name, action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{always, message, message_warn, CapturedOutput, Context, NoSession};

    #[test]
    fn guarded_step_respects_condition() {
        let sink = CapturedOutput::new();
        let ctx = Context::new(&sink, &NoSession, false);

        guarded_step("skip", always(false), message("never"))
            .apply(&ctx)
            .unwrap();
        guarded_step("run", always(true), message("ran"))
            .apply(&ctx)
            .unwrap();

        assert_eq!(sink.lines(), vec!["ran"]);
    }

    #[test]
    fn branch_step_follows_condition() {
        let plan = PlanBuilder::new()
            .name("init")
            .steps([branch_step(
                "maybe-init",
                always(true),
                message_warn("admin.conf already exists: skipping `kubeadm init`"),
                message("kubeadm init"),
            )])
            .build()
            .unwrap();
        let sink = CapturedOutput::new();

        let report = plan.run(&Context::new(&sink, &NoSession, false)).unwrap();

        assert!(report.succeeded());
        assert_eq!(
            sink.lines(),
            vec!["WARNING: admin.conf already exists: skipping `kubeadm init`"]
        );
    }
}
