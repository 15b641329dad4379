//! Actions: composable units of side-effecting work.
//!
//! Leaf actions print messages or fail on purpose; composite actions
//! sequence other actions, branch on a [`Check`], or run an action on a
//! best-effort basis. Every composite stops at the first error and returns
//! it unchanged, except the best-effort wrappers.

use super::check::Check;
use super::context::Context;
use super::error::ActionError;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// A unit of work applied against an execution [`Context`].
///
/// Actions are built once when a plan is assembled and may be applied any
/// number of times. They can have side effects and are not safe to retry
/// blindly.
///
/// # Example
///
/// ```rust
/// use stepwise::core::{Action, ApplyFn, CapturedOutput, Context, NoSession};
///
/// let greet = ApplyFn::new(|ctx| {
///     ctx.output("hello");
///     Ok(())
/// });
///
/// let sink = CapturedOutput::new();
/// greet.apply(&Context::new(&sink, &NoSession, false)).unwrap();
/// assert_eq!(sink.lines(), vec!["hello"]);
/// ```
pub trait Action: Send + Sync {
    fn apply(&self, ctx: &Context<'_>) -> Result<(), ActionError>;
}

pub type BoxedAction = Box<dyn Action>;

impl<A: Action + ?Sized> Action for Box<A> {
    fn apply(&self, ctx: &Context<'_>) -> Result<(), ActionError> {
        (**self).apply(ctx)
    }
}

impl<A: Action + ?Sized> Action for Arc<A> {
    fn apply(&self, ctx: &Context<'_>) -> Result<(), ActionError> {
        (**self).apply(ctx)
    }
}

type ApplyClosure = dyn Fn(&Context<'_>) -> Result<(), ActionError> + Send + Sync;

/// Adapter that turns a closure into an [`Action`].
///
/// Every combinator in this module returns an `ApplyFn`, so combinators
/// nest freely.
pub struct ApplyFn {
    f: Box<ApplyClosure>,
}

impl ApplyFn {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Context<'_>) -> Result<(), ActionError> + Send + Sync + 'static,
    {
        Self { f: Box::new(f) }
    }

    pub fn boxed(self) -> BoxedAction {
        Box::new(self)
    }
}

impl Action for ApplyFn {
    fn apply(&self, ctx: &Context<'_>) -> Result<(), ActionError> {
        (self.f)(ctx)
    }
}

impl fmt::Debug for ApplyFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApplyFn")
    }
}

/// Severity prefix for messages written to the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Warn,
    Error,
}

impl MessageLevel {
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warn => "WARNING",
            Self::Error => "ERROR",
        }
    }

    /// Render `text` with this level's prefix, e.g. `"ERROR: boom"`.
    pub fn annotate(self, text: &str) -> String {
        format!("{}: {}", self.prefix(), text)
    }
}

/// Action that does nothing. Handy as a placeholder branch.
pub fn no_op() -> ApplyFn {
    ApplyFn::new(|_ctx| Ok(()))
}

/// Action that writes `text` to the output sink.
pub fn message(text: impl Into<String>) -> ApplyFn {
    let text = text.into();
    ApplyFn::new(move |ctx| {
        ctx.output(&text);
        Ok(())
    })
}

fn leveled(level: MessageLevel, text: impl Into<String>) -> ApplyFn {
    let line = level.annotate(&text.into());
    ApplyFn::new(move |ctx| {
        ctx.output(&line);
        Ok(())
    })
}

/// Action that writes `"INFO: {text}"` to the output sink.
pub fn message_info(text: impl Into<String>) -> ApplyFn {
    leveled(MessageLevel::Info, text)
}

/// Action that writes `"WARNING: {text}"` to the output sink.
pub fn message_warn(text: impl Into<String>) -> ApplyFn {
    leveled(MessageLevel::Warn, text)
}

/// Action that writes `"ERROR: {text}"` and then fails with
/// [`ActionError::Fatal`].
pub fn fatal(text: impl Into<String>) -> ApplyFn {
    let text = text.into();
    ApplyFn::new(move |ctx| {
        ctx.output(&MessageLevel::Error.annotate(&text));
        Err(ActionError::Fatal(text.clone()))
    })
}

/// Apply each action in order, stopping at the first failure.
///
/// Actions after the failing one are never invoked and nothing is rolled
/// back. An empty slice succeeds.
pub fn apply_list<A: Action>(actions: &[A], ctx: &Context<'_>) -> Result<(), ActionError> {
    for action in actions {
        action.apply(ctx)?;
    }
    Ok(())
}

/// Owned, ordered list of actions that is itself an [`Action`].
#[derive(Default)]
pub struct ActionList {
    actions: Vec<BoxedAction>,
}

impl ActionList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<A: Action + 'static>(&mut self, action: A) {
        self.actions.push(Box::new(action));
    }

    /// Builder-style variant of [`ActionList::push`].
    pub fn then<A: Action + 'static>(mut self, action: A) -> Self {
        self.push(action);
        self
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl Action for ActionList {
    fn apply(&self, ctx: &Context<'_>) -> Result<(), ActionError> {
        apply_list(&self.actions, ctx)
    }
}

impl From<Vec<BoxedAction>> for ActionList {
    fn from(actions: Vec<BoxedAction>) -> Self {
        Self { actions }
    }
}

impl FromIterator<BoxedAction> for ActionList {
    fn from_iter<I: IntoIterator<Item = BoxedAction>>(iter: I) -> Self {
        Self {
            actions: iter.into_iter().collect(),
        }
    }
}

impl Extend<BoxedAction> for ActionList {
    fn extend<I: IntoIterator<Item = BoxedAction>>(&mut self, iter: I) {
        self.actions.extend(iter);
    }
}

impl fmt::Debug for ActionList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionList")
            .field("len", &self.actions.len())
            .finish()
    }
}

/// Package a list of actions as a single action with [`apply_list`]
/// semantics.
pub fn apply_composed<I>(actions: I) -> ApplyFn
where
    I: IntoIterator<Item = BoxedAction>,
{
    let list: ActionList = actions.into_iter().collect();
    ApplyFn::new(move |ctx| list.apply(ctx))
}

/// Run `action` only when `condition` holds.
///
/// The condition is evaluated once. If it fails, its error is returned and
/// the action does not run.
pub fn apply_if<C, A>(condition: C, action: A) -> ApplyFn
where
    C: Check + 'static,
    A: Action + 'static,
{
    ApplyFn::new(move |ctx| {
        let holds = condition.check(ctx)?;
        debug!(holds, "apply_if: condition evaluated");
        if holds {
            action.apply(ctx)
        } else {
            Ok(())
        }
    })
}

/// Run `if_true` when `condition` holds, `if_false` otherwise.
///
/// The condition is evaluated exactly once per invocation, so the branch
/// taken always matches the decision even if remote state changes.
pub fn apply_if_else<C, T, E>(condition: C, if_true: T, if_false: E) -> ApplyFn
where
    C: Check + 'static,
    T: Action + 'static,
    E: Action + 'static,
{
    ApplyFn::new(move |ctx| {
        let holds = condition.check(ctx)?;
        debug!(holds, "apply_if_else: condition evaluated");
        if holds {
            if_true.apply(ctx)
        } else {
            if_false.apply(ctx)
        }
    })
}

/// Run `action` and report success no matter what it returns.
///
/// A suppressed failure is only visible as a `warn` event in the log. Use
/// [`apply_try_with`] to observe it programmatically.
pub fn apply_try<A>(action: A) -> ApplyFn
where
    A: Action + 'static,
{
    apply_try_with(action, |_err| {})
}

/// Like [`apply_try`], calling `on_error` with every suppressed failure.
pub fn apply_try_with<A, H>(action: A, on_error: H) -> ApplyFn
where
    A: Action + 'static,
    H: Fn(&ActionError) + Send + Sync + 'static,
{
    ApplyFn::new(move |ctx| {
        if let Err(err) = action.apply(ctx) {
            warn!(error = %err, "best-effort action failed; continuing");
            on_error(&err);
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::check::{always, CheckFn};
    use crate::core::context::{CapturedOutput, NoSession};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn run<A: Action>(action: &A) -> (Result<(), ActionError>, Vec<String>) {
        let sink = CapturedOutput::new();
        let result = action.apply(&Context::new(&sink, &NoSession, false));
        (result, sink.lines())
    }

    fn counting(counter: &Arc<AtomicUsize>) -> ApplyFn {
        let counter = Arc::clone(counter);
        ApplyFn::new(move |_ctx| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    }

    fn failing(reason: &'static str) -> ApplyFn {
        ApplyFn::new(move |_ctx| Err(ActionError::msg(reason)))
    }

    #[test]
    fn no_op_succeeds_silently() {
        let (result, lines) = run(&no_op());
        assert!(result.is_ok());
        assert!(lines.is_empty());
    }

    #[test]
    fn message_writes_text_verbatim() {
        let (result, lines) = run(&message("Checking binaries..."));
        assert!(result.is_ok());
        assert_eq!(lines, vec!["Checking binaries..."]);
    }

    #[test]
    fn leveled_messages_are_prefixed() {
        let list = ActionList::new()
            .then(message_info("starting"))
            .then(message_warn("admin.conf already exists"));

        let (result, lines) = run(&list);

        assert!(result.is_ok());
        assert_eq!(
            lines,
            vec!["INFO: starting", "WARNING: admin.conf already exists"]
        );
    }

    #[test]
    fn fatal_writes_then_fails() {
        let (result, lines) = run(&fatal("boom"));

        assert_eq!(lines, vec!["ERROR: boom"]);
        assert_eq!(result, Err(ActionError::Fatal("boom".to_string())));
    }

    #[test]
    fn apply_list_runs_in_order() {
        let actions: Vec<BoxedAction> = vec![
            message("1").boxed(),
            message("2").boxed(),
            message("3").boxed(),
        ];
        let sink = CapturedOutput::new();

        apply_list(&actions, &Context::new(&sink, &NoSession, false)).unwrap();

        assert_eq!(sink.lines(), vec!["1", "2", "3"]);
    }

    #[test]
    fn apply_list_stops_at_first_failure() {
        let after = Arc::new(AtomicUsize::new(0));
        let list = ActionList::new()
            .then(message("before"))
            .then(failing("nope"))
            .then(counting(&after));

        let (result, lines) = run(&list);

        assert_eq!(result, Err(ActionError::msg("nope")));
        assert_eq!(lines, vec!["before"]);
        assert_eq!(after.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn empty_list_succeeds() {
        let empty: Vec<BoxedAction> = Vec::new();
        let sink = CapturedOutput::new();
        assert!(apply_list(&empty, &Context::new(&sink, &NoSession, false)).is_ok());
        assert!(run(&apply_composed(Vec::<BoxedAction>::new())).0.is_ok());
    }

    #[test]
    fn composed_actions_nest() {
        let inner = apply_composed(vec![message("a").boxed(), message("b").boxed()]);
        let outer = apply_composed(vec![inner.boxed(), message("c").boxed()]);

        let (result, lines) = run(&outer);

        assert!(result.is_ok());
        assert_eq!(lines, vec!["a", "b", "c"]);
    }

    #[test]
    fn apply_if_runs_only_when_true() {
        assert_eq!(run(&apply_if(always(true), message("yes"))).1, vec!["yes"]);
        assert!(run(&apply_if(always(false), message("yes"))).1.is_empty());
    }

    #[test]
    fn apply_if_else_picks_one_branch() {
        let (_, lines) = run(&apply_if_else(always(true), message("if"), message("else")));
        assert_eq!(lines, vec!["if"]);

        let (_, lines) = run(&apply_if_else(always(false), message("if"), message("else")));
        assert_eq!(lines, vec!["else"]);
    }

    #[test]
    fn apply_if_else_evaluates_condition_once() {
        let evaluations = Arc::new(AtomicUsize::new(0));
        let evaluations_clone = Arc::clone(&evaluations);
        let flip_flop = CheckFn::new(move |_ctx| {
            // true on the first call, false afterwards
            Ok(evaluations_clone.fetch_add(1, Ordering::SeqCst) == 0)
        });

        let (result, lines) = run(&apply_if_else(flip_flop, message("if"), message("else")));

        assert!(result.is_ok());
        assert_eq!(lines, vec!["if"]);
        assert_eq!(evaluations.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn condition_error_skips_both_branches() {
        let taken = Arc::new(AtomicUsize::new(0));
        let broken = CheckFn::new(|_ctx| Err(ActionError::msg("cannot tell")));

        let action = apply_if_else(broken, counting(&taken), counting(&taken));
        let (result, _) = run(&action);

        assert_eq!(result, Err(ActionError::msg("cannot tell")));
        assert_eq!(taken.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn apply_try_swallows_failure() {
        let (result, lines) = run(&apply_try(fatal("ignored")));

        assert!(result.is_ok());
        assert_eq!(lines, vec!["ERROR: ignored"]);
    }

    #[test]
    fn apply_try_with_reports_suppressed_error() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        let action = apply_try_with(failing("flaky"), move |err| {
            seen_clone.lock().unwrap().push(err.clone());
        });

        assert!(run(&action).0.is_ok());
        assert_eq!(*seen.lock().unwrap(), vec![ActionError::msg("flaky")]);
    }

    #[test]
    fn apply_try_with_skips_hook_on_success() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = Arc::clone(&calls);
        let action = apply_try_with(no_op(), move |_err| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert!(run(&action).0.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn context_reaches_children_unchanged() {
        let flags = Arc::new(Mutex::new(Vec::new()));
        let probe = {
            let flags = Arc::clone(&flags);
            ApplyFn::new(move |ctx| {
                flags.lock().unwrap().push(ctx.use_elevated());
                Ok(())
            })
        };
        let shared = Arc::new(probe);
        let tree = apply_composed(vec![
            Box::new(Arc::clone(&shared)) as BoxedAction,
            apply_if(always(true), Arc::clone(&shared)).boxed(),
            apply_try(Arc::clone(&shared)).boxed(),
        ]);

        let sink = CapturedOutput::new();
        tree.apply(&Context::new(&sink, &NoSession, true)).unwrap();

        assert_eq!(*flags.lock().unwrap(), vec![true, true, true]);
    }
}
